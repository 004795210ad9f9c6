//! Error types for the jobfile CLI.

use std::path::PathBuf;

use jobfile_codec::JobfileError;
use thiserror::Error;

/// Main error type for CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Codec operation failed outside of file parsing.
    #[error(transparent)]
    Jobfile(#[from] JobfileError),

    /// File content is not a valid jobfile.
    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: JobfileError,
    },

    /// Reading an input file failed.
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing an output file failed.
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Jobfile parsed but cannot be handed to the equipment.
    #[error("{} is not adequately specified", .0.display())]
    Inadequate(PathBuf),
}

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_path() {
        let err = CliError::Read {
            path: PathBuf::from("jobs/a.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.to_string(), "Failed to read jobs/a.txt: missing");
    }

    #[test]
    fn test_codec_error_is_transparent() {
        let err: CliError = JobfileError::UnknownSection("NOPE".to_string()).into();
        assert_eq!(err.to_string(), "Unknown section: NOPE");
    }
}
