use std::fs;
use std::path::Path;

use dom_smoothie::{Article, Config, Readability};

use crate::error::{FetchError, Result};

/// Run Readability (via dom_smoothie) on the given HTML.
/// `url` is optional but recommended for resolving relative links.
fn extract_article(html: &str, url: Option<&str>) -> Option<Article> {
    // Reasonable default; tune later if needed.
    let cfg = Config {
        max_elements_to_parse: 9000,
        ..Default::default()
    };

    let mut readability = Readability::new(html, url, Some(cfg)).ok()?;
    let article = readability.parse().ok()?;
    Some(article)
}

/// Convert a cached HTML file into Markdown: Readability extraction of the
/// main content, then HTML-to-Markdown conversion of that fragment.
pub fn markdown_from_file(path: &Path) -> Result<String> {
    let html = fs::read_to_string(path).map_err(|source| FetchError::CacheRead {
        path: path.to_path_buf(),
        source,
    })?;

    let article = extract_article(&html, None).ok_or_else(|| FetchError::Extract {
        path: path.to_path_buf(),
        reason: "readability found no article content".to_string(),
    })?;

    let content_html = article.content.to_string();
    let mut markdown = htmd::convert(&content_html).map_err(|e| FetchError::Extract {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    if !article.title.is_empty() {
        markdown = format!("# {}\n\n{}", article.title, markdown);
    }

    Ok(markdown)
}
