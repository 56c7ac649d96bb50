//! Error types for orcasync

use std::path::PathBuf;
use thiserror::Error;

/// Error types for orcasync operations
#[derive(Debug, Error)]
pub enum SyncError {
    /// I/O failure on a specific path (hash, copy, delete, config write)
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// The tree an operation reads from does not exist
    #[error("Source tree does not exist: {path}")]
    MissingSource { path: PathBuf },

    /// A destructive operation was requested without confirmation
    #[error("Confirmation required: {0}")]
    MissingConfirmation(String),

    /// Baseline file exists but could not be parsed or written
    #[error("Baseline error at {path}: {source}")]
    Baseline {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// One or more actions of an apply batch failed
    #[error("Apply failed for {failed} file(s): {summary}")]
    Apply { failed: usize, summary: String },

    /// External version-control command exited unsuccessfully
    #[error("`{command}` failed{}: {output}", exit_suffix(.code))]
    External {
        command: String,
        code: Option<i32>,
        output: String,
    },
}

fn exit_suffix(code: &Option<i32>) -> String {
    code.map(|c| format!(" with exit code {c}")).unwrap_or_default()
}

impl SyncError {
    /// Wrap an `io::Error` together with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SyncError::Io {
            path: path.into(),
            source,
        }
    }

    /// Check if this error is a precondition failure (nothing was attempted)
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            SyncError::MissingSource { .. }
                | SyncError::MissingConfirmation(_)
                | SyncError::Config(_)
        )
    }

    /// Process exit code for this error.
    ///
    /// Preconditions map to `2`, external failures propagate the command's
    /// own code, everything else is `1`.
    pub fn exit_code(&self) -> i32 {
        match self {
            SyncError::External { code, .. } => match code {
                Some(c) if *c != 0 => *c,
                _ => 1,
            },
            e if e.is_precondition() => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn test_io_error_mentions_path() {
        let error = SyncError::io("machine/printer.json", IoError::new(ErrorKind::NotFound, "gone"));
        let message = error.to_string();
        assert!(message.contains("machine/printer.json"));
        assert!(message.contains("gone"));
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn test_missing_source_is_precondition() {
        let error = SyncError::MissingSource {
            path: PathBuf::from("/nowhere"),
        };
        assert!(error.is_precondition());
        assert_eq!(error.exit_code(), 2);
        assert!(error.to_string().contains("/nowhere"));
    }

    #[test]
    fn test_missing_confirmation_exit_code() {
        let error = SyncError::MissingConfirmation("pass --yes".to_string());
        assert!(error.is_precondition());
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn test_config_error_exit_code() {
        let error = SyncError::Config("bad toml".to_string());
        assert!(error.to_string().contains("Configuration error"));
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn test_external_error_propagates_code() {
        let error = SyncError::External {
            command: "git push".to_string(),
            code: Some(128),
            output: "fatal: no upstream".to_string(),
        };
        assert_eq!(error.exit_code(), 128);
        let message = error.to_string();
        assert!(message.contains("git push"));
        assert!(message.contains("exit code 128"));
        assert!(message.contains("fatal: no upstream"));
    }

    #[test]
    fn test_external_error_without_code() {
        let error = SyncError::External {
            command: "git pull --rebase".to_string(),
            code: None,
            output: String::new(),
        };
        assert_eq!(error.exit_code(), 1);
        assert!(!error.to_string().contains("exit code"));
    }

    #[test]
    fn test_apply_error_is_not_precondition() {
        let error = SyncError::Apply {
            failed: 2,
            summary: "a: denied".to_string(),
        };
        assert!(!error.is_precondition());
        assert_eq!(error.exit_code(), 1);
    }
}
