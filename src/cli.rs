//! CLI parsing and orchestration. Parses args, fetches one chapter, extracts it, writes text or JSON. Maps errors to exit codes.

use crate::config::{self, Config, FetchConfig};
use crate::extract::parse_chapter;
use crate::formats::{summary_line, write_chapter_to, FormatError, OutputFormat};
use crate::source::{fetch_html, resolve_source, FetchError};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// CLI error carrying exit code and message.
#[derive(Debug, Error)]
pub enum CliRunError {
    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Format(#[from] FormatError),
}

impl CliRunError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliRunError::InvalidInput(_) => 1,
            CliRunError::Fetch(_) => 2,
            CliRunError::Format(_) => 3,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "versescrape")]
#[command(about = "Fetch and parse a Bible chapter")]
#[command(
    after_help = "Config file keys (version, connect_timeout_secs, read_timeout_secs, user_agent, format) are read from ./versescrape.toml or the user config directory. CLI flags override config."
)]
pub struct Args {
    /// Bible chapter reference (e.g. 'John 1').
    pub reference: String,

    /// Bible version (default: NKJV).
    #[arg(short = 'v', long = "version")]
    pub version: Option<String>,

    /// Enable verbose output: log each step, summarize parsed elements, print the error chain.
    #[arg(short = 'i', long)]
    pub verbose: bool,

    /// Read from a local file instead of fetching.
    #[arg(short = 'f', long = "file")]
    pub file: Option<PathBuf>,

    /// Output format: text or json (default text).
    #[arg(long, value_parser = parse_format)]
    pub format: Option<OutputFormat>,

    /// Write output to this path instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Suppress the progress spinner.
    #[arg(short, long)]
    pub quiet: bool,

    /// Connect timeout in seconds (overrides config; default 30).
    #[arg(long, value_parser = parse_timeout)]
    pub connect_timeout: Option<u64>,

    /// Read timeout in seconds (overrides config; default 10).
    #[arg(long, value_parser = parse_timeout)]
    pub read_timeout: Option<u64>,

    /// HTTP User-Agent (overrides config).
    #[arg(long)]
    pub user_agent: Option<String>,
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    match s.to_lowercase().as_str() {
        "text" | "txt" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        _ => Err(format!(
            "Invalid --format value: '{}'. Use text or json.",
            s
        )),
    }
}

fn parse_timeout(s: &str) -> Result<u64, String> {
    let secs: u64 = s
        .trim()
        .parse()
        .map_err(|_| format!("Invalid timeout: '{}' is not a number of seconds", s))?;
    if secs == 0 {
        return Err("Invalid timeout: must be at least 1 second".to_string());
    }
    Ok(secs)
}

/// Combine CLI flags, config file, and defaults (in that order of precedence).
fn resolve_fetch_config(args: &Args, config: Option<&Config>) -> Result<FetchConfig, CliRunError> {
    let version = args
        .version
        .clone()
        .or_else(|| config.and_then(|c| c.version.clone()))
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| config::DEFAULT_VERSION.to_string());
    if version.is_empty() {
        return Err(CliRunError::InvalidInput(
            "Bible version must not be empty.".to_string(),
        ));
    }
    let connect_secs = args
        .connect_timeout
        .or_else(|| config.and_then(|c| c.connect_timeout_secs))
        .unwrap_or(config::DEFAULT_CONNECT_TIMEOUT_SECS);
    let read_secs = args
        .read_timeout
        .or_else(|| config.and_then(|c| c.read_timeout_secs))
        .unwrap_or(config::DEFAULT_READ_TIMEOUT_SECS);
    if connect_secs == 0 || read_secs == 0 {
        return Err(CliRunError::InvalidInput(
            "Invalid config: connect_timeout_secs and read_timeout_secs must be at least 1."
                .to_string(),
        ));
    }
    let user_agent = args
        .user_agent
        .clone()
        .or_else(|| config.and_then(|c| c.user_agent.clone()));
    Ok(FetchConfig {
        version,
        connect_timeout: Duration::from_secs(connect_secs),
        read_timeout: Duration::from_secs(read_secs),
        user_agent,
    })
}

fn resolve_format(args: &Args, config: Option<&Config>) -> Result<OutputFormat, CliRunError> {
    if let Some(format) = args.format {
        return Ok(format);
    }
    match config.and_then(|c| c.format.as_deref()) {
        Some(s) => parse_format(s).map_err(CliRunError::InvalidInput),
        None => Ok(OutputFormat::default()),
    }
}

/// Ensure output path parent exists.
fn validate_output_path(path: &Path) -> Result<(), CliRunError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Err(CliRunError::InvalidInput(format!(
                "Cannot write output: {}: parent directory does not exist.",
                path.display()
            )));
        }
    }
    Ok(())
}

/// Install the stderr tracing subscriber. RUST_LOG wins; otherwise info when verbose, warn when not.
pub fn init_tracing(verbose: bool) {
    let level = if verbose {
        "info,selectors=warn,html5ever=warn"
    } else {
        "warn"
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn fetch_spinner(reference: &str) -> indicatif::ProgressBar {
    let spinner = indicatif::ProgressBar::new_spinner();
    if let Ok(style) = indicatif::ProgressStyle::default_spinner()
        .template("{spinner} {msg} ({elapsed})")
    {
        spinner.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
    }
    spinner.set_message(format!("Fetching {}", reference));
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Entry point for the CLI. Returns Ok(()) on success; Err with exit code and message on failure.
pub fn run(args: &Args) -> Result<(), CliRunError> {
    check_reference(args)?;
    let config = config::load_config().map_err(CliRunError::InvalidInput)?;
    run_with_config(args, config.as_ref())
}

fn check_reference(args: &Args) -> Result<&str, CliRunError> {
    let reference = args.reference.trim();
    if reference.is_empty() {
        return Err(CliRunError::InvalidInput(
            "Expected a chapter reference, e.g. 'John 1'.".to_string(),
        ));
    }
    Ok(reference)
}

/// Run with an already loaded config file (None when there is no file).
pub fn run_with_config(args: &Args, config: Option<&Config>) -> Result<(), CliRunError> {
    let reference = check_reference(args)?;
    let fetch_config = resolve_fetch_config(args, config)?;
    let format = resolve_format(args, config)?;
    if let Some(ref path) = args.output {
        validate_output_path(path)?;
    }

    let source = resolve_source(reference, args.file.as_deref());
    let spinner = (source.is_remote() && !args.quiet).then(|| fetch_spinner(reference));
    let fetched = fetch_html(&source, &fetch_config);
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let html = fetched.inspect_err(|e| {
        if e.is_timeout() {
            tracing::warn!("Request timed out; raise --connect-timeout or --read-timeout to wait longer");
        }
    })?;

    let chapter = parse_chapter(&html);
    if chapter.is_empty() {
        tracing::warn!(reference, "No subtitles or verses found in the passage markup");
    }
    if args.verbose {
        tracing::info!(
            elements = chapter.len(),
            verses = chapter.verse_count(),
            "== Parsed Chapter =="
        );
        for element in &chapter {
            tracing::info!("{}", summary_line(element));
        }
    }

    write_chapter_to(&chapter, format, args.output.as_deref())?;

    if let Some(ref path) = args.output {
        if !args.quiet {
            eprintln!("Wrote {}", path.display());
        }
    }
    Ok(())
}
