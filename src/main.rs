mod app;
mod core;
mod coverage;
mod generator;
mod vcs;

include!(concat!(env!("OUT_DIR"), "/version.rs"));

fn main() -> std::process::ExitCode {
    app::startup::startup()
}
