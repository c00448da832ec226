use std::path::{Path, PathBuf};

use thiserror::Error;

/// Reasons a transcript is rejected before import
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralInputError {
    #[error("File is empty")]
    Empty,

    #[error("No valid chat message format detected in the first {probed} lines")]
    NoRecognizableFormat { probed: usize },

    #[error("File seems too short to be a valid chat export ({lines} lines, need at least {minimum})")]
    TooShort { lines: usize, minimum: usize },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("transcript rejected: {0}")]
    Structural(#[from] StructuralInputError),

    #[error("invalid vocabulary table: {0}")]
    Vocabulary(#[from] toml::de::Error),

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
