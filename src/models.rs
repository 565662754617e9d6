//! Core data models used throughout site-freeze.
//!
//! A [`SearchDocument`] is one page's extracted, indexable representation.
//! The full ordered sequence of documents for an export run is the corpus,
//! serialized verbatim to `search.json` and consumed read-only by the
//! client query engine. Corpus order is directory-walk order and is the
//! only ranking the system has.

use serde::{Deserialize, Serialize};

/// Title used when a page has no extractable `<title>` text.
pub const UNTITLED: &str = "Untitled";

/// One indexed page, as written to `search.json`.
///
/// The schema is an open contract: a bare JSON array of these objects, no
/// envelope or version field. Consumers must tolerate additive fields only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchDocument {
    /// Page title, or [`UNTITLED`] when absent.
    pub title: String,
    /// Site-relative URL: `/` for the root index, `/<dir>/` for directory
    /// indexes, `/<path>.html` for everything else.
    pub url: String,
    /// Short summary shown in results: description metadata, else a
    /// truncated prefix of the body text.
    pub excerpt: String,
    /// Whitespace-collapsed plain-text body. Matched against, never
    /// displayed in full.
    pub content: String,
    /// Keywords in page order, trimmed, empties removed.
    #[serde(default)]
    pub tags: Vec<String>,
    /// ISO-8601 timestamp from the page, else the build wall-clock time.
    pub date: String,
}
