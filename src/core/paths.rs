//! Default filesystem layout for the generated artifacts
//!
//! The tool is expected to live in a `tools/` directory inside the C++
//! project it generates headers for; every default path is resolved relative
//! to the executable's own location, so the binary works no matter where the
//! project is checked out.

use std::io;
use std::path::{Path, PathBuf};

/// Resolved project layout rooted at the directory containing the tool
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    tool_dir: PathBuf,
    root: PathBuf,
}

impl ProjectLayout {
    /// Resolve the layout from the running executable's location
    pub fn discover() -> io::Result<Self> {
        let exe = std::env::current_exe()?;
        let tool_dir = exe
            .parent()
            .ok_or_else(|| io::Error::other("executable has no parent directory"))?
            .to_path_buf();
        Ok(Self::from_tool_dir(tool_dir))
    }

    /// Build a layout for a known tool directory; the project root is its parent
    pub fn from_tool_dir(tool_dir: impl Into<PathBuf>) -> Self {
        let tool_dir = tool_dir.into();
        let root = tool_dir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| tool_dir.clone());
        Self { tool_dir, root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Settings document consumed by the configuration generator
    pub fn settings(&self) -> PathBuf {
        self.root.join("settings.json")
    }

    /// Configuration template, kept next to the tool itself
    pub fn config_template(&self) -> PathBuf {
        self.tool_dir.join("config.template")
    }

    /// Generated configuration header
    pub fn config_header(&self) -> PathBuf {
        self.root.join("include").join("psl").join("config.hpp")
    }

    /// Generated project-info header
    pub fn project_header(&self) -> PathBuf {
        self.root.join("include").join("psl").join("psl.hpp")
    }

    /// Default output directory for coverage reports
    pub fn coverage_output_dir(&self) -> PathBuf {
        self.root.join("build").join("coverage")
    }
}
