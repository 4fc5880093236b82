//! Local file source: a saved passage page read whole as UTF-8.

use crate::source::error::FetchError;
use std::path::Path;

pub fn read_passage(path: &Path) -> Result<String, FetchError> {
    tracing::info!(path = %path.display(), "Reading from local file");
    std::fs::read_to_string(path).map_err(|e| FetchError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}
