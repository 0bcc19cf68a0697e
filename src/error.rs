// Error types for report generation

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("invalid reporter configuration: {0}")]
    Config(String),

    #[error("failed to write report {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize report: {0}")]
    Serialize(String),

    #[error("invalid event on line {line}: {message}")]
    Event { line: usize, message: String },
}

impl ReportError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn serialize(err: impl std::fmt::Display) -> Self {
        Self::Serialize(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
