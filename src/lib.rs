//! versescrape: fetch one Bible chapter and extract its subtitles and numbered verses.

pub mod cli;
pub mod config;
pub mod document;
pub mod extract;
pub mod formats;
pub mod model;
pub mod normalize;
pub mod source;

// Re-exports for CLI and consumers.
pub use config::FetchConfig;
pub use document::{Child, DocumentNode};
pub use extract::{extract_chapter, parse_chapter};
pub use formats::{write_chapter, FormatError, OutputFormat};
pub use model::{Chapter, Element};
pub use normalize::{normalize_fragment, normalize_node};
pub use source::{fetch_html, resolve_source, FetchError, PassageClient, PassageClientBuilder, Source};
