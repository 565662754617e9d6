//! Per-page [`SearchDocument`] extraction.
//!
//! Pages are heterogeneous: themed post pages, tag listings, about pages,
//! synthesized placeholders. Extraction works in priority order over the
//! parsed document (explicit metadata first, then progressively weaker
//! fallbacks) and produces `None` for pages with nothing to index.

use std::path::Path;

use chrono::Utc;

use crate::html::{element_text, Page};
use crate::models::{SearchDocument, UNTITLED};

/// Containers tried in order for the primary content region.
const CONTENT_SELECTORS: &[&str] = &["main", "article", ".post-content", ".content"];

/// Elements whose subtrees never contribute body text.
const STRIP_ALWAYS: &[&str] = &["script", "style"];

/// Additional elements stripped when falling back to the whole `<body>`.
const STRIP_CHROME: &[&str] = &["script", "style", "nav", "footer"];

/// Excerpt length when no description metadata exists.
const EXCERPT_CHARS: usize = 200;

/// Extract one page into a [`SearchDocument`].
///
/// `rel_path` is the page's path relative to the tree root. Returns `None`
/// when the page has neither a title nor extractable body text.
pub fn extract_document(html: &str, rel_path: &Path) -> Option<SearchDocument> {
    let page = Page::parse(html);

    let title = page.first_text("title").unwrap_or_default();
    let content = extract_body_text(&page);

    if title.is_empty() && content.is_empty() {
        return None;
    }

    let excerpt = page
        .meta_content(r#"meta[name="description"]"#)
        .or_else(|| page.meta_content(r#"meta[property="og:description"]"#))
        .unwrap_or_else(|| excerpt_from(&content));

    let tags = page
        .meta_content(r#"meta[name="keywords"]"#)
        .map(|keywords| parse_tags(&keywords))
        .unwrap_or_default();

    let date = page
        .first_attr("time[datetime]", "datetime")
        .unwrap_or_else(|| Utc::now().to_rfc3339());

    Some(SearchDocument {
        title: if title.is_empty() {
            UNTITLED.to_string()
        } else {
            title
        },
        url: normalize_url(rel_path),
        excerpt,
        content,
        tags,
        date,
    })
}

/// Whitespace-collapsed plain text of the page's content region.
///
/// Prefers the first matching semantic container; falls back to the whole
/// `<body>` with navigation and footer chrome stripped.
fn extract_body_text(page: &Page) -> String {
    let raw = match page.first_of(CONTENT_SELECTORS) {
        Some(container) => element_text(container, STRIP_ALWAYS),
        None => match page.first("body") {
            Some(body) => element_text(body, STRIP_CHROME),
            None => String::new(),
        },
    };
    collapse_whitespace(&raw)
}

/// Map a tree-relative file path to its site-relative URL.
///
/// `index.html` → `/`; `blog/index.html` → `/blog/`; `about.html` →
/// `/about.html`. Separators are normalized to `/` regardless of platform.
pub fn normalize_url(rel_path: &Path) -> String {
    let parts: Vec<String> = rel_path
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect();
    let joined = parts.join("/");

    if joined == "index.html" {
        return "/".to_string();
    }
    if let Some(dir) = joined.strip_suffix("/index.html") {
        return format!("/{}/", dir);
    }
    format!("/{}", joined)
}

/// Comma-split keyword metadata: entries trimmed, empties removed, order
/// preserved.
pub fn parse_tags(keywords: &str) -> Vec<String> {
    keywords
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn excerpt_from(content: &str) -> String {
    if content.chars().count() <= EXCERPT_CHARS {
        return content.to_string();
    }
    let prefix: String = content.chars().take(EXCERPT_CHARS).collect();
    format!("{}...", prefix)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
