//! Client-side query engine over the serialized corpus.
//!
//! This is the logic layer of the in-browser search feature: corpus
//! loading, the open/closed overlay state machine, synchronous substring
//! matching, query highlighting, and the markup for the overlay and the
//! result list. DOM side effects are expressed as data (rendered markup
//! strings, anchor selector choices, a prevent-default flag) that a thin
//! host shim applies, keeping every behavior testable off-browser.
//!
//! The engine is an explicit handle created by [`SearchUi::initialize`];
//! there is no self-constructing global. The `freeze search` CLI command
//! drives the same evaluator against a built `search.json`.

use regex::RegexBuilder;

use crate::html::Page;
use crate::models::SearchDocument;

/// Where the trigger button attaches, tried in order: the CMS navigation
/// menu, any `nav`, any `header`. No match means no trigger is rendered;
/// the keyboard shortcut still works.
pub const TRIGGER_ANCHORS: &[&str] = &[".gh-head-menu", "nav", "header"];

/// Overlay visibility. `Closed` is the initial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayState {
    Closed,
    Open,
}

/// A user interaction the host forwards to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// Click on the trigger button.
    TriggerClick,
    /// Ctrl/Cmd+K.
    Shortcut,
    /// Click on the close control.
    CloseClick,
    /// Click on the dimmed backdrop outside the modal.
    BackdropClick,
    /// Escape key.
    Escape,
}

/// Parse the fetched index artifact into a corpus.
///
/// A fetch or parse failure degrades search to inert: the error is logged
/// and an empty corpus is returned, never an error to the page.
pub fn load_corpus(bytes: &[u8]) -> Vec<SearchDocument> {
    match serde_json::from_slice(bytes) {
        Ok(corpus) => corpus,
        Err(e) => {
            eprintln!("Warning: failed to load search index: {}", e);
            Vec::new()
        }
    }
}

/// The search overlay engine handle.
///
/// Holds the read-only corpus for the lifetime of a page view plus the
/// overlay state and current query. All methods are synchronous.
pub struct SearchUi {
    corpus: Vec<SearchDocument>,
    state: OverlayState,
    query: String,
}

impl SearchUi {
    /// Create the engine over a loaded corpus. Call exactly once per page
    /// view; the overlay starts closed with an empty query.
    pub fn initialize(corpus: Vec<SearchDocument>) -> SearchUi {
        SearchUi {
            corpus,
            state: OverlayState::Closed,
            query: String::new(),
        }
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == OverlayState::Open
    }

    /// Page scroll is locked exactly while the overlay is open.
    pub fn scroll_locked(&self) -> bool {
        self.is_open()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Apply one interaction. Returns `true` when the host must suppress
    /// the browser's default handling (the Ctrl/Cmd+K shortcut).
    pub fn handle(&mut self, event: UiEvent) -> bool {
        match event {
            UiEvent::TriggerClick => {
                self.open();
                false
            }
            UiEvent::Shortcut => {
                self.open();
                true
            }
            UiEvent::CloseClick | UiEvent::BackdropClick => {
                self.close();
                false
            }
            UiEvent::Escape => {
                if self.is_open() {
                    self.close();
                }
                false
            }
        }
    }

    /// Show the overlay and focus the input.
    pub fn open(&mut self) {
        self.state = OverlayState::Open;
    }

    /// Hide the overlay, clear the query and results, restore scrolling.
    pub fn close(&mut self) {
        self.state = OverlayState::Closed;
        self.query.clear();
    }

    /// Tear the engine down. The host removes the injected markup and
    /// detaches listeners when this returns.
    pub fn destroy(self) {}

    /// Update the query from the input field. Evaluation is synchronous;
    /// call [`SearchUi::render_results`] afterwards for the new markup.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    /// Matching documents in corpus order. An empty or whitespace-only
    /// query yields no results, not the full corpus.
    pub fn results(&self) -> Vec<&SearchDocument> {
        if self.query.trim().is_empty() {
            return Vec::new();
        }
        self.corpus
            .iter()
            .filter(|doc| matches(doc, &self.query))
            .collect()
    }

    /// Result-list markup for the current query.
    pub fn render_results(&self) -> String {
        if self.query.trim().is_empty() {
            return String::new();
        }
        let results = self.results();
        if results.is_empty() {
            return r#"<div class="search-no-results">No results found</div>"#.to_string();
        }
        results
            .iter()
            .map(|doc| render_result(doc, &self.query))
            .collect()
    }

    /// Trigger selector for `page`: the first [`TRIGGER_ANCHORS`] entry
    /// present in the document, if any.
    pub fn trigger_anchor(page: &Page) -> Option<&'static str> {
        TRIGGER_ANCHORS
            .iter()
            .copied()
            .find(|sel| page.first(sel).is_some())
    }
}

/// Case-insensitive substring match of the raw query against the
/// concatenation of title, content, excerpt, and tags.
pub fn matches(doc: &SearchDocument, query: &str) -> bool {
    let haystack = format!(
        "{} {} {} {}",
        doc.title,
        doc.content,
        doc.excerpt,
        doc.tags.join(" ")
    )
    .to_lowercase();
    haystack.contains(&query.to_lowercase())
}

/// The overlay skeleton the host injects once at startup.
pub fn render_overlay() -> String {
    r#"<div class="search-overlay">
  <div class="search-modal">
    <div class="search-header">
      <input type="text" class="search-input" placeholder="Search articles..." autocomplete="off">
      <button class="search-close" aria-label="Close search">&times;</button>
    </div>
    <div class="search-results"></div>
  </div>
</div>"#
        .to_string()
}

/// The trigger button attached to the navigation anchor.
pub fn render_trigger() -> String {
    r#"<button class="search-trigger" aria-label="Open search">Search</button>"#.to_string()
}

/// One result entry: linked title, highlighted excerpt, tags, and a
/// human-readable date.
fn render_result(doc: &SearchDocument, query: &str) -> String {
    let title = highlight(&doc.title, query);
    let excerpt = highlight(&doc.excerpt, query);

    let tags = if doc.tags.is_empty() {
        String::new()
    } else {
        let spans: String = doc
            .tags
            .iter()
            .map(|tag| format!(r#"<span class="tag">{}</span>"#, escape_html(tag)))
            .collect();
        format!(r#"<div class="search-tags">{}</div>"#, spans)
    };

    let date = if doc.date.is_empty() {
        String::new()
    } else {
        format!(
            r#"<time class="search-date">{}</time>"#,
            escape_html(&format_date(&doc.date))
        )
    };

    format!(
        r#"<div class="search-result">
  <h3><a href="{}">{}</a></h3>
  <p>{}</p>
  {}{}
</div>"#,
        escape_html(&doc.url),
        title,
        excerpt,
        tags,
        date
    )
}

/// Wrap every case-insensitive occurrence of `query` in `<mark>`.
///
/// The query is a literal: regex metacharacters are escaped before the
/// pattern is built, and non-matching segments are HTML-escaped so page
/// text cannot re-enter the result markup as markup.
pub fn highlight(text: &str, query: &str) -> String {
    if query.trim().is_empty() {
        return escape_html(text);
    }
    let pattern = match RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => pattern,
        Err(_) => return escape_html(text),
    };

    let mut out = String::new();
    let mut last = 0;
    for m in pattern.find_iter(text) {
        out.push_str(&escape_html(&text[last..m.start()]));
        out.push_str("<mark>");
        out.push_str(&escape_html(m.as_str()));
        out.push_str("</mark>");
        last = m.end();
    }
    out.push_str(&escape_html(&text[last..]));
    out
}

/// Render an ISO-8601 date for display; unparseable values pass through.
fn format_date(date: &str) -> String {
    if let Ok(parsed) = chrono::DateTime::parse_from_rfc3339(date) {
        return parsed.format("%b %-d, %Y").to_string();
    }
    if let Ok(parsed) = chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return parsed.format("%b %-d, %Y").to_string();
    }
    date.to_string()
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
