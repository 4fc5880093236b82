//! Error type for fetching passage markup over HTTP or from a local file.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to obtain the raw passage HTML. Always fatal for the run; never retried.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to create HTTP client: {source}")]
    ClientBuild { source: reqwest::Error },

    #[error("Error fetching data: could not reach {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("Error fetching data: HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Failed to read response body: {source}")]
    BodyRead { source: reqwest::Error },

    #[error("Cannot read {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl FetchError {
    /// True when the request timed out (connect or read).
    pub fn is_timeout(&self) -> bool {
        match self {
            FetchError::Network { source, .. } | FetchError::BodyRead { source } => {
                source.is_timeout()
            }
            _ => false,
        }
    }
}
