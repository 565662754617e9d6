//! Integration tests for the normalize → index pipeline over synthetic
//! mirrored trees, plus end-to-end consumption of the index artifact by
//! the client query engine.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tempfile::TempDir;

use site_freeze::client::{load_corpus, SearchUi};
use site_freeze::index::{run_index, SEARCH_INDEX_FILE};
use site_freeze::models::SearchDocument;
use site_freeze::normalize::run_normalize;

fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn post_page(title: &str, description: &str, keywords: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <title>{title}</title>
  <meta name="description" content="{description}">
  <meta name="keywords" content="{keywords}">
</head>
<body>
  <nav class="gh-head-menu">Home</nav>
  <main>
    <article>
      <time datetime="2024-01-15T08:30:00.000Z">Jan 15</time>
      {body}
    </article>
  </main>
  <footer>Powered by Ghost</footer>
</body>
</html>"#
    )
}

/// Snapshot a tree as relative-path → contents, for idempotence checks.
fn snapshot(root: &Path) -> BTreeMap<String, Vec<u8>> {
    let mut map = BTreeMap::new();
    for entry in walkdir::WalkDir::new(root).sort_by_file_name() {
        let entry = entry.unwrap();
        if entry.file_type().is_file() {
            let rel = entry
                .path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .to_string();
            map.insert(rel, fs::read(entry.path()).unwrap());
        }
    }
    map
}

/// A raw mirror with the `:`-delimited host directory, one collision, and
/// loose root files.
fn seed_mirrored_tree(root: &Path) {
    write_file(
        root,
        "localhost:2368/index.html",
        &post_page("My Blog", "A blog about things.", "blog, meta", "Welcome to the blog."),
    );
    write_file(
        root,
        "localhost:2368/blog/widget-post/index.html",
        &post_page(
            "All About Widgets",
            "Everything widgets.",
            "widgets, tools",
            "The widget factory never sleeps.",
        ),
    );
    write_file(
        root,
        "localhost:2368/about.html",
        &post_page("About", "Who we are.", "", "We write about widgets and more."),
    );
    write_file(root, "localhost:2368/404.html", &post_page("Not Found", "", "", "Gone."));
    write_file(root, "localhost:2368/public/ghost.css", "body {}");
    // Stale root-level file the merge must replace
    write_file(root, "about.html", "stale");
}

#[test]
fn test_normalize_then_index_end_to_end() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    seed_mirrored_tree(root);

    run_normalize(root, "localhost:2368", Some("blog.example.com")).unwrap();

    // De-nesting happened and the collision was replaced
    assert!(!root.join("localhost:2368").exists());
    assert!(fs::read_to_string(root.join("about.html"))
        .unwrap()
        .contains("About"));

    // Platform files
    assert_eq!(fs::read_to_string(root.join(".nojekyll")).unwrap(), "");
    assert_eq!(
        fs::read_to_string(root.join("CNAME")).unwrap(),
        "blog.example.com"
    );
    // The mirrored index.html was kept, not replaced by the placeholder
    assert!(fs::read_to_string(root.join("index.html"))
        .unwrap()
        .contains("My Blog"));

    let count = run_index(root).unwrap();
    assert_eq!(count, 3);

    let json = fs::read_to_string(root.join(SEARCH_INDEX_FILE)).unwrap();
    let corpus: Vec<SearchDocument> = serde_json::from_str(&json).unwrap();

    // Sorted walk order: about.html, blog/widget-post/index.html, index.html
    let urls: Vec<&str> = corpus.iter().map(|d| d.url.as_str()).collect();
    assert_eq!(urls, vec!["/about.html", "/blog/widget-post/", "/"]);

    let widget = &corpus[1];
    assert_eq!(widget.title, "All About Widgets");
    assert_eq!(widget.excerpt, "Everything widgets.");
    assert_eq!(widget.tags, vec!["widgets", "tools"]);
    assert_eq!(widget.date, "2024-01-15T08:30:00.000Z");
    // Nav and footer chrome stay out of the content region
    assert!(widget.content.contains("widget factory"));
    assert!(!widget.content.contains("Powered by Ghost"));
}

#[test]
fn test_plus_delimited_host_directory() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_file(
        root,
        "localhost+2368/index.html",
        &post_page("Home", "d", "", "body"),
    );

    run_normalize(root, "localhost:2368", None).unwrap();

    assert!(root.join("index.html").exists());
    assert!(!root.join("localhost+2368").exists());
    assert!(!root.join("CNAME").exists());
}

#[test]
fn test_normalize_twice_is_identical() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    seed_mirrored_tree(root);

    run_normalize(root, "localhost:2368", Some("blog.example.com")).unwrap();
    let first = snapshot(root);

    run_normalize(root, "localhost:2368", Some("blog.example.com")).unwrap();
    let second = snapshot(root);

    assert_eq!(first, second);
}

#[test]
fn test_placeholder_entry_point_for_bare_mirror() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_file(root, "feed.xml", "<rss/>");

    run_normalize(root, "localhost:2368", None).unwrap();

    let index = fs::read_to_string(root.join("index.html")).unwrap();
    assert!(index.starts_with("<!DOCTYPE html>"));
    assert!(index.contains("charset=\"utf-8\""));
}

#[test]
fn test_client_engine_consumes_artifact() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    seed_mirrored_tree(root);

    run_normalize(root, "localhost:2368", None).unwrap();
    run_index(root).unwrap();

    let bytes = fs::read(root.join(SEARCH_INDEX_FILE)).unwrap();
    let mut ui = SearchUi::initialize(load_corpus(&bytes));

    // Mixed-case substring hits exactly the widget post page plus the
    // about page that mentions widgets
    ui.set_query("Widget");
    let titles: Vec<&str> = ui.results().iter().map(|d| d.title.as_str()).collect();
    assert_eq!(titles, vec!["About", "All About Widgets"]);

    // The excluded 404 page is not in the corpus
    ui.set_query("Gone");
    assert!(ui.results().is_empty());

    let html = ui.render_results();
    assert!(html.contains("No results found"));
}
