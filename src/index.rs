//! Search index construction over a normalized tree.
//!
//! Walks the deployable tree depth-first in sorted order, extracts one
//! [`SearchDocument`] per content page, and serializes the ordered corpus
//! to `search.json` at the tree root. Corpus order is walk order; the
//! client treats it as the ranking.

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;
use walkdir::WalkDir;

use crate::extract::extract_document;
use crate::models::SearchDocument;

/// Root-relative path of the index artifact.
pub const SEARCH_INDEX_FILE: &str = "search.json";

/// Paths never indexed: hidden directories, reserved asset directories,
/// and the platform's 404 page.
const EXCLUDE_GLOBS: &[&str] = &["**/.*/**", "public/**", "assets/**", "404.html"];

/// Only content pages are indexed.
const INCLUDE_GLOBS: &[&str] = &["**/*.html"];

/// Build the corpus for the tree rooted at `root` and write `search.json`.
///
/// Returns the number of indexed documents. A single unreadable or
/// unindexable page is logged and skipped, never fatal.
pub fn run_index(root: &Path) -> Result<usize> {
    let corpus = build_corpus(root)?;

    let json = serde_json::to_string_pretty(&corpus)?;
    let out_path = root.join(SEARCH_INDEX_FILE);
    std::fs::write(&out_path, json)
        .with_context(|| format!("Failed to write {}", out_path.display()))?;

    println!("index {}", root.display());
    println!("  pages indexed: {}", corpus.len());
    println!("  artifact: {}", out_path.display());
    println!("ok");

    Ok(corpus.len())
}

/// Walk the tree and extract the ordered document sequence.
pub fn build_corpus(root: &Path) -> Result<Vec<SearchDocument>> {
    if !root.exists() {
        anyhow::bail!("Site tree does not exist: {}", root.display());
    }

    let include_set = build_globset(INCLUDE_GLOBS)?;
    let exclude_set = build_globset(EXCLUDE_GLOBS)?;

    let mut corpus = Vec::new();

    let walker = WalkDir::new(root).sort_by_file_name();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        let rel_str = relative.to_string_lossy().to_string();

        if exclude_set.is_match(&rel_str) {
            continue;
        }
        if !include_set.is_match(&rel_str) {
            continue;
        }

        let html = match std::fs::read_to_string(path) {
            Ok(html) => html,
            Err(e) => {
                eprintln!("Warning: failed to read {}: {}, skipping", path.display(), e);
                continue;
            }
        };

        if let Some(doc) = extract_document(&html, relative) {
            corpus.push(doc);
        }
    }

    Ok(corpus)
}

fn build_globset(patterns: &[&str]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
