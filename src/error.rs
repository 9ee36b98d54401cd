use std::io;
use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong while fetching or converting an article.
///
/// No variant is retried; each failure surfaces to the caller as-is.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The title would not survive being used as a cache filename.
    #[error("invalid article title: {title:?}")]
    InvalidTitle { title: String },

    /// The wiki returned 404 for this title.
    #[error("404 - page not found: [{title}]")]
    NotFound { title: String },

    /// Any other non-200 HTTP status.
    #[error("{status} - error fetching article")]
    Status { status: StatusCode },

    /// Timeout, DNS failure, proxy failure, connection reset.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to read cache file {}: {source}", path.display())]
    CacheRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write cache file {}: {source}", path.display())]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Readability extraction or Markdown conversion failed.
    #[error("failed to extract readable text from {}: {reason}", path.display())]
    Extract { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, FetchError>;
