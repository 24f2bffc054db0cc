//! Error types and exit codes for requote
//!
//! Exit codes:
//! - 0: Success (including a declined overwrite prompt)
//! - 1: Generic failure (I/O while reading or writing)
//! - 2: Usage error (bad flags/args)
//! - 3: Data error (input missing, output collision)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the requote binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - input missing, output collision (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during a requote run
#[derive(Error, Debug)]
pub enum RequoteError {
    // Usage errors (exit code 2)
    #[error("{0}")]
    UsageError(String),

    // Data errors (exit code 3)
    #[error("input file not found: {path:?}")]
    InputNotFound { path: PathBuf },

    #[error("output file already exists: {path:?} (pass --force to overwrite)")]
    OutputExists { path: PathBuf },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl RequoteError {
    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            RequoteError::UsageError(_) => ExitCode::Usage,

            RequoteError::InputNotFound { .. } | RequoteError::OutputExists { .. } => {
                ExitCode::Data
            }

            RequoteError::Io(_) | RequoteError::Json(_) | RequoteError::Other(_) => {
                ExitCode::Failure
            }
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            RequoteError::UsageError(_) => "usage_error",
            RequoteError::InputNotFound { .. } => "input_not_found",
            RequoteError::OutputExists { .. } => "output_exists",
            RequoteError::Io(_) => "io_error",
            RequoteError::Json(_) => "json_error",
            RequoteError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for requote operations
pub type Result<T> = std::result::Result<T, RequoteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            RequoteError::UsageError("bad".into()).exit_code(),
            ExitCode::Usage
        );
        assert_eq!(
            RequoteError::InputNotFound {
                path: PathBuf::from("missing.tsv")
            }
            .exit_code(),
            ExitCode::Data
        );
        assert_eq!(
            RequoteError::Other("boom".into()).exit_code(),
            ExitCode::Failure
        );
    }

    #[test]
    fn test_to_json_envelope() {
        let err = RequoteError::InputNotFound {
            path: PathBuf::from("missing.tsv"),
        };
        let json = err.to_json();
        assert_eq!(json["error"]["code"], 3);
        assert_eq!(json["error"]["type"], "input_not_found");
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("missing.tsv"));
    }
}
