//! Generation pipeline error and outcome types

use crate::core::error_handling::ContextualError;
use thiserror::Error;

/// What a generation run did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Header written (created or replaced)
    Written,
    /// Existing header already embeds the current staleness markers
    UpToDate,
    /// A required input file does not exist; nothing was written
    MissingInput,
}

/// Generation pipeline errors
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("{message}")]
    Io { message: String },
    #[error("malformed settings document: {message}")]
    Settings { message: String },
}

impl From<std::io::Error> for GenerateError {
    fn from(e: std::io::Error) -> Self {
        GenerateError::Io {
            message: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for GenerateError {
    fn from(e: serde_json::Error) -> Self {
        GenerateError::Settings {
            message: e.to_string(),
        }
    }
}

impl ContextualError for GenerateError {
    fn is_user_actionable(&self) -> bool {
        match self {
            GenerateError::Settings { .. } => true, // user can fix the settings document
            GenerateError::Io { .. } => false,
        }
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            GenerateError::Settings { message } => Some(message),
            GenerateError::Io { .. } => None,
        }
    }
}

pub type GenerateResult = Result<Outcome, GenerateError>;
