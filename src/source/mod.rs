//! Passage sources. Resolves where the markup comes from and fetches it once.

mod client;
mod error;

pub mod file;
pub mod gateway;

pub use client::{PassageClient, PassageClientBuilder};
pub use error::FetchError;

use crate::config::FetchConfig;
use std::path::{Path, PathBuf};

/// Where the raw passage HTML comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Remote lookup of `reference`; the version comes from [FetchConfig].
    Gateway { reference: String },
    /// A saved page on disk.
    File { path: PathBuf },
}

impl Source {
    pub fn is_remote(&self) -> bool {
        matches!(self, Source::Gateway { .. })
    }
}

/// A local file, when given, takes precedence over the remote lookup.
pub fn resolve_source(reference: &str, file: Option<&Path>) -> Source {
    match file {
        Some(path) => Source::File {
            path: path.to_path_buf(),
        },
        None => Source::Gateway {
            reference: reference.to_string(),
        },
    }
}

/// Fetch the raw HTML for `source`. Makes at most one HTTP request.
pub fn fetch_html(source: &Source, config: &FetchConfig) -> Result<String, FetchError> {
    match source {
        Source::File { path } => file::read_passage(path),
        Source::Gateway { reference } => {
            let client = PassageClient::from_config(config)
                .map_err(|e| FetchError::ClientBuild { source: e })?;
            gateway::fetch_passage(&client, reference, &config.version)
        }
    }
}
