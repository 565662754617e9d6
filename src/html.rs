//! Minimal HTML access layer for the index builder and client engine.
//!
//! Wraps the parser behind a handle + selector-query interface so the
//! extraction logic in [`crate::extract`] never touches the parser API
//! directly. Selectors are CSS strings; an invalid selector behaves as
//! "no match" rather than failing the page, since every selector in this
//! crate is a compile-time constant.

use scraper::{ElementRef, Html, Selector};

/// A parsed HTML page handle.
pub struct Page {
    doc: Html,
}

impl Page {
    /// Parse a full HTML document. The parser is lenient; malformed markup
    /// yields a best-effort tree rather than an error.
    pub fn parse(html: &str) -> Page {
        Page {
            doc: Html::parse_document(html),
        }
    }

    /// First element matching `selector`, in document order.
    pub fn first(&self, selector: &str) -> Option<ElementRef<'_>> {
        let sel = Selector::parse(selector).ok()?;
        self.doc.select(&sel).next()
    }

    /// First element matching any of `selectors`, tried in the given order.
    pub fn first_of(&self, selectors: &[&str]) -> Option<ElementRef<'_>> {
        selectors.iter().find_map(|s| self.first(s))
    }

    /// Trimmed descendant text of the first element matching `selector`.
    pub fn first_text(&self, selector: &str) -> Option<String> {
        let el = self.first(selector)?;
        let text = element_text(el, &[]);
        let text = text.trim().to_string();
        (!text.is_empty()).then_some(text)
    }

    /// Trimmed value of `attr` on the first element matching `selector`.
    pub fn first_attr(&self, selector: &str, attr: &str) -> Option<String> {
        let el = self.first(selector)?;
        let value = el.value().attr(attr)?.trim().to_string();
        (!value.is_empty()).then_some(value)
    }

    /// `content` attribute of the first matching `<meta>` element.
    pub fn meta_content(&self, selector: &str) -> Option<String> {
        self.first_attr(selector, "content")
    }
}

/// Descendant text of `el`, skipping any element whose tag name appears in
/// `skip` (and its whole subtree). No whitespace normalization.
pub fn element_text(el: ElementRef<'_>, skip: &[&str]) -> String {
    let mut out = String::new();
    collect_text(*el, skip, &mut out);
    out
}

fn collect_text(
    node: ego_tree::NodeRef<'_, scraper::Node>,
    skip: &[&str],
    out: &mut String,
) {
    for child in node.children() {
        match child.value() {
            scraper::Node::Text(text) => out.push_str(&text.text),
            scraper::Node::Element(element) => {
                if !skip.contains(&element.name()) {
                    collect_text(child, skip, out);
                }
            }
            _ => {}
        }
    }
}
