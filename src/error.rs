//! Error types for board operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by board and session operations
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("invalid board size {input:?}: expected a positive integer{}", limit_hint(*max))]
    InvalidSize { input: String, max: Option<usize> },

    #[error("unknown cell status {token:?} at line {line}, column {column}")]
    Parse {
        line: usize,
        column: usize,
        token: String,
    },

    #[error("cell ({row}, {col}) is outside the {side}x{side} board")]
    OutOfBounds { row: usize, col: usize, side: usize },

    #[error("failed to access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn limit_hint(max: Option<usize>) -> String {
    match max {
        Some(max) => format!(" no greater than {}", max),
        None => String::new(),
    }
}

impl BoardError {
    /// Short title used when the error is shown to the user
    pub fn title(&self) -> &'static str {
        match self {
            BoardError::InvalidSize { .. } => "Invalid size",
            BoardError::Parse { .. } => "Invalid state file",
            BoardError::OutOfBounds { .. } => "Invalid cell",
            BoardError::Io { .. } => "File error",
        }
    }
}

pub type BoardResult<T> = std::result::Result<T, BoardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_size_message() {
        let err = BoardError::InvalidSize { input: "abc".to_string(), max: None };
        assert_eq!(err.to_string(), "invalid board size \"abc\": expected a positive integer");

        let err = BoardError::InvalidSize { input: "500".to_string(), max: Some(200) };
        assert!(err.to_string().ends_with("no greater than 200"));
        assert_eq!(err.title(), "Invalid size");
    }

    #[test]
    fn test_io_error_keeps_source() {
        let err = BoardError::Io {
            path: PathBuf::from("missing/state.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("missing/state.txt"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
