//! Output formats for a parsed chapter: one line per element, or JSON.

use crate::model::{Chapter, Element};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Characters of element text shown in the verbose summary.
const PREVIEW_CHARS: usize = 40;

/// Output format selector for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `SUBTITLE: ...` / `VERSE n: ...` lines.
    #[default]
    Text,
    /// JSON array of tagged elements.
    Json,
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Failed to write output: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write output: {0}")]
    Write(#[from] std::io::Error),
}

/// Write one line per element.
pub fn write_text<W: Write>(chapter: &Chapter, out: &mut W) -> Result<(), FormatError> {
    for element in chapter {
        writeln!(out, "{}", element)?;
    }
    Ok(())
}

/// Write the chapter as a pretty-printed JSON array followed by a newline.
pub fn write_json<W: Write>(chapter: &Chapter, out: &mut W) -> Result<(), FormatError> {
    serde_json::to_writer_pretty(&mut *out, chapter)?;
    writeln!(out)?;
    Ok(())
}

pub fn write_chapter<W: Write>(
    chapter: &Chapter,
    format: OutputFormat,
    out: &mut W,
) -> Result<(), FormatError> {
    match format {
        OutputFormat::Text => write_text(chapter, out),
        OutputFormat::Json => write_json(chapter, out),
    }
}

/// Write to `path` (created or truncated), or to stdout when `path` is None.
pub fn write_chapter_to(
    chapter: &Chapter,
    format: OutputFormat,
    path: Option<&Path>,
) -> Result<(), FormatError> {
    match path {
        Some(path) => {
            let f = File::create(path).map_err(|e| FormatError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
            let mut w = BufWriter::new(f);
            write_chapter(chapter, format, &mut w)?;
            w.flush()?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            write_chapter(chapter, format, &mut lock)?;
            lock.flush()?;
        }
    }
    Ok(())
}

/// `<label>: <first 40 chars>...`, as shown in verbose summaries.
pub fn summary_line(element: &Element) -> String {
    let preview: String = element.text().chars().take(PREVIEW_CHARS).collect();
    format!("{}: {}...", element.label(), preview)
}
