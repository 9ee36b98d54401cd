pub mod error;
pub mod extractor;
pub mod fetcher;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub use error::{FetchError, Result};
pub use fetcher::WikipediaFetcher;

/// Which artifact `fetch` should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// The raw fetched HTML, conversion skipped entirely.
    Html,
    /// Readability-extracted content rendered as Markdown.
    #[default]
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "html" => Ok(Self::Html),
            "markdown" | "md" => Ok(Self::Markdown),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Html => f.write_str("html"),
            Self::Markdown => f.write_str("markdown"),
        }
    }
}

/// A fetched or derived result: the cache file it lives in plus its full
/// content. Content is never partial; a failed fetch returns an error, not a
/// truncated artifact.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub path: PathBuf,
    pub content: String,
    pub format: OutputFormat,
}

/// High-level pipeline:
///
/// Article title
/// → WikipediaFetcher::fetch()       (html cache, else network GET)
/// → WikipediaFetcher::to_markdown() (markdown cache, else extractor)
/// → Artifact { path, content, format }
///
/// This is the top-level API used by the CLI. Each call builds a fresh
/// fetcher; the only state shared between calls is the filesystem cache.
pub fn get(
    title: &str,
    overwrite: bool,
    format: OutputFormat,
    proxy: Option<&str>,
) -> Result<Artifact> {
    let fetcher = WikipediaFetcher::new();
    fetcher.fetch(title, overwrite, format, proxy)
}
