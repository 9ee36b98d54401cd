use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::{Proxy, StatusCode};
use tracing::{debug, info, warn};

use crate::error::{FetchError, Result};
use crate::extractor;
use crate::{Artifact, OutputFormat};

/// Fixed User-Agent sent with every article request.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

const DEFAULT_LANGUAGE: &str = "en";
const DEFAULT_CACHE_ROOT: &str = ".cache/wikipedia";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Fetches one article's HTML (network or cache), persists it, and derives a
/// Markdown rendition on demand.
///
/// Cache files are keyed by title alone: `{title}.html` and `{title}.md`
/// under the cache root. Instances sharing a cache root may race on the same
/// title; writes are whole-file, so the last writer wins.
pub struct WikipediaFetcher {
    url_root: String,
    cache_root: PathBuf,
}

impl WikipediaFetcher {
    pub fn new() -> Self {
        Self {
            url_root: wiki_url_root(DEFAULT_LANGUAGE),
            cache_root: PathBuf::from(DEFAULT_CACHE_ROOT),
        }
    }

    /// Switch to another language edition of Wikipedia. Cache filenames stay
    /// keyed by title only, so two languages sharing a cache root will
    /// collide on identical titles.
    pub fn with_language(mut self, lang: &str) -> Self {
        self.url_root = wiki_url_root(lang);
        self
    }

    /// Override the article URL root entirely, e.g. to point at a mirror.
    pub fn with_url_root(mut self, url_root: impl Into<String>) -> Self {
        self.url_root = url_root.into();
        self
    }

    /// Override the cache directory (default `.cache/wikipedia`, relative to
    /// the working directory).
    pub fn with_cache_root(mut self, cache_root: impl Into<PathBuf>) -> Self {
        self.cache_root = cache_root.into();
        self
    }

    /// Retrieve an article by title.
    ///
    /// The title is appended to the URL root verbatim; no percent-encoding
    /// is applied, so callers must pre-encode titles containing characters
    /// that are not URL-safe.
    ///
    /// With `overwrite` false, a cached HTML file short-circuits the network
    /// entirely; the same flag governs the Markdown cache tier. `proxy`
    /// routes both http and https through the given URL for the network path.
    pub fn fetch(
        &self,
        title: &str,
        overwrite: bool,
        format: OutputFormat,
        proxy: Option<&str>,
    ) -> Result<Artifact> {
        validate_title(title)?;
        info!(title, "fetching from wikipedia");

        let html_path = self.html_path(title);
        let html = if !overwrite && html_path.exists() {
            debug!(path = %html_path.display(), "html cache hit");
            read_cache(&html_path)?
        } else {
            self.download(title, &html_path, proxy)?
        };

        match format {
            OutputFormat::Html => Ok(Artifact {
                path: html_path,
                content: html,
                format: OutputFormat::Html,
            }),
            OutputFormat::Markdown => self.to_markdown(&html_path, overwrite),
        }
    }

    /// Derive the Markdown rendition of an already-cached HTML file.
    ///
    /// The Markdown path is the HTML path with its extension swapped. A
    /// cached file is returned as-is unless `overwrite` is set; otherwise the
    /// extractor runs and its output is persisted alongside the HTML.
    pub fn to_markdown(&self, html_path: &Path, overwrite: bool) -> Result<Artifact> {
        let md_path = html_path.with_extension("md");

        let markdown = if !overwrite && md_path.exists() {
            debug!(path = %md_path.display(), "markdown cache hit");
            read_cache(&md_path)?
        } else {
            let markdown = extractor::markdown_from_file(html_path)?;
            write_cache(&md_path, &markdown)?;
            info!(path = %md_path.display(), "markdown saved");
            markdown
        };

        Ok(Artifact {
            path: md_path,
            content: markdown,
            format: OutputFormat::Markdown,
        })
    }

    fn download(&self, title: &str, html_path: &Path, proxy: Option<&str>) -> Result<String> {
        let url = self.article_url(title);
        let client = build_client(proxy)?;
        let resp = client.get(&url).send()?;

        let status = resp.status();
        match status {
            StatusCode::OK => {
                info!(%status, %url, "fetched article");
                let html = resp.text()?;
                write_cache(html_path, &html)?;
                info!(path = %html_path.display(), "html saved");
                Ok(html)
            }
            StatusCode::NOT_FOUND => {
                warn!(%status, title, "page not found");
                Err(FetchError::NotFound {
                    title: title.to_string(),
                })
            }
            status => {
                warn!(%status, %url, "unexpected response status");
                Err(FetchError::Status { status })
            }
        }
    }

    fn article_url(&self, title: &str) -> String {
        // Title goes in unescaped; see `fetch`.
        format!("{}{}", self.url_root, title)
    }

    fn html_path(&self, title: &str) -> PathBuf {
        self.cache_root.join(format!("{title}.html"))
    }
}

impl Default for WikipediaFetcher {
    fn default() -> Self {
        Self::new()
    }
}

fn wiki_url_root(lang: &str) -> String {
    format!("https://{lang}.wikipedia.org/wiki/")
}

fn build_client(proxy: Option<&str>) -> Result<Client> {
    let mut builder = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .redirect(reqwest::redirect::Policy::limited(10));

    if let Some(proxy) = proxy {
        builder = builder
            .proxy(Proxy::http(proxy)?)
            .proxy(Proxy::https(proxy)?);
    }

    Ok(builder.build()?)
}

// The title doubles as a cache filename, so path separators are out.
fn validate_title(title: &str) -> Result<()> {
    if title.is_empty() || title.contains('/') || title.contains('\\') {
        return Err(FetchError::InvalidTitle {
            title: title.to_string(),
        });
    }
    Ok(())
}

fn read_cache(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| FetchError::CacheRead {
        path: path.to_path_buf(),
        source,
    })
}

fn write_cache(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| FetchError::CacheWrite {
            path: path.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, content).map_err(|source| FetchError::CacheWrite {
        path: path.to_path_buf(),
        source,
    })
}
