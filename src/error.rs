//! Error types for loading plant documents.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for viewer operations.
pub type ViewerResult<T> = Result<T, ViewerError>;

/// Errors that end a single load, read or export operation.
///
/// None of these are retried. After an error the session keeps whatever
/// plant it held before the operation started.
#[derive(Error, Debug)]
pub enum ViewerError {
    /// The requested library file does not exist.
    #[error("file not found: {0}")]
    NotFound(String),

    /// An upload path without a `.json` extension.
    #[error("not a JSON file: {}", .0.display())]
    NotJsonFile(PathBuf),

    /// The input could not be parsed as JSON.
    #[error("Invalid JSON file. Please check the file format. ({0})")]
    InvalidJson(#[from] serde_json::Error),

    /// A previous load has not completed yet.
    #[error("a load is already in progress")]
    LoadInProgress,

    /// Export was requested with no plant loaded.
    #[error("no plant data loaded")]
    NothingLoaded,

    /// Reading or writing failed for any other reason.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Writing the scene manifest failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ViewerError {
    /// Returns `true` for errors that mean "the input is not usable JSON".
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidJson(_) | Self::NotJsonFile(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_json_message_is_user_facing() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let msg = ViewerError::from(err).to_string();
        assert!(msg.starts_with("Invalid JSON file."));
    }

    #[test]
    fn invalid_input_classification() {
        assert!(ViewerError::NotJsonFile(PathBuf::from("a.txt")).is_invalid_input());
        assert!(!ViewerError::NotFound("a.json".into()).is_invalid_input());
        assert!(!ViewerError::LoadInProgress.is_invalid_input());
    }
}
