//! Tree normalization: repair a raw mirror into a deployable static site.
//!
//! A recursive mirror leaves artifacts behind: pages nested under a
//! directory named after the origin host and port, no `.nojekyll`, no
//! `CNAME`, and sometimes no entry point at all. Each repair step here is
//! idempotent and independently skippable when its precondition is absent,
//! so running the normalizer over an already-normalized tree is a no-op.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Run every normalization step against `root`.
///
/// `host_port` is the origin `host:port` string used to detect the nested
/// mirror directory; `domain` enables the `CNAME` step when present.
pub fn run_normalize(root: &Path, host_port: &str, domain: Option<&str>) -> Result<()> {
    merge_host_dir(root, host_port)?;
    write_nojekyll(root)?;
    if let Some(domain) = domain {
        write_cname(root, domain)?;
    }
    ensure_entry_point(root)?;
    Ok(())
}

/// Move the contents of a `host:port`-named child directory into the root.
///
/// `wget --restrict-file-names=windows` encodes the `:` as `+`, so both
/// delimiters are recognized. Colliding destinations are fully replaced,
/// not merged. Absence of either variant is a no-op.
pub fn merge_host_dir(root: &Path, host_port: &str) -> Result<()> {
    let plus_variant = host_port.replace(':', "+");
    for name in [host_port, plus_variant.as_str()] {
        let host_dir = root.join(name);
        if !host_dir.is_dir() {
            continue;
        }

        println!("Merging {} into site root...", host_dir.display());
        let entries = fs::read_dir(&host_dir)
            .with_context(|| format!("Failed to read {}", host_dir.display()))?;
        for entry in entries {
            let entry = entry?;
            let dest = root.join(entry.file_name());
            if dest.exists() {
                remove_path(&dest)?;
            }
            fs::rename(entry.path(), &dest).with_context(|| {
                format!(
                    "Failed to move {} to {}",
                    entry.path().display(),
                    dest.display()
                )
            })?;
        }
        fs::remove_dir_all(&host_dir)
            .with_context(|| format!("Failed to remove {}", host_dir.display()))?;
    }
    Ok(())
}

/// Write an empty `.nojekyll` marker so GitHub Pages serves the tree as-is
/// instead of running it through Jekyll. Truncates on every run.
pub fn write_nojekyll(root: &Path) -> Result<()> {
    let path = root.join(".nojekyll");
    fs::write(&path, "").with_context(|| format!("Failed to write {}", path.display()))
}

/// Write the custom domain verbatim to a root-level `CNAME` file.
pub fn write_cname(root: &Path, domain: &str) -> Result<()> {
    let path = root.join("CNAME");
    fs::write(&path, domain).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Created CNAME file for domain: {}", domain);
    Ok(())
}

/// Synthesize a placeholder `index.html` when the mirror produced none, so
/// the site is never served as a bare directory listing.
pub fn ensure_entry_point(root: &Path) -> Result<()> {
    let index = root.join("index.html");
    if index.exists() {
        return Ok(());
    }
    println!("No index.html found, creating a basic one...");
    fs::write(&index, PLACEHOLDER_INDEX)
        .with_context(|| format!("Failed to write {}", index.display()))
}

const PLACEHOLDER_INDEX: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Blog</title>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
</head>
<body>
  <h1>Blog</h1>
  <p>This site is being set up. Please check back soon.</p>
</body>
</html>
"#;

fn remove_path(path: &Path) -> Result<()> {
    let result = if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    result.with_context(|| format!("Failed to remove {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_merge_colon_variant() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        touch(&root.join("localhost:2368/a.html"), "a");
        touch(&root.join("b.html"), "b");

        merge_host_dir(root, "localhost:2368").unwrap();

        assert!(root.join("a.html").exists());
        assert!(root.join("b.html").exists());
        assert!(!root.join("localhost:2368").exists());
    }

    #[test]
    fn test_merge_plus_variant() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        touch(&root.join("localhost+2368/a.html"), "a");

        merge_host_dir(root, "localhost:2368").unwrap();

        assert!(root.join("a.html").exists());
        assert!(!root.join("localhost+2368").exists());
    }

    #[test]
    fn test_merge_replaces_colliding_directory() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        touch(&root.join("localhost:2368/blog/new.html"), "new");
        touch(&root.join("blog/old.html"), "old");

        merge_host_dir(root, "localhost:2368").unwrap();

        // Directory collision is full replace, not merge
        assert!(root.join("blog/new.html").exists());
        assert!(!root.join("blog/old.html").exists());
    }

    #[test]
    fn test_merge_without_host_dir_is_noop() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        touch(&root.join("a.html"), "a");

        merge_host_dir(root, "localhost:2368").unwrap();

        assert!(root.join("a.html").exists());
    }

    #[test]
    fn test_entry_point_created_only_when_missing() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();

        ensure_entry_point(root).unwrap();
        let synthesized = fs::read_to_string(root.join("index.html")).unwrap();
        assert!(synthesized.starts_with("<!DOCTYPE html>"));
        assert!(synthesized.contains("charset=\"utf-8\""));

        touch(&root.join("index.html"), "real page");
        ensure_entry_point(root).unwrap();
        assert_eq!(
            fs::read_to_string(root.join("index.html")).unwrap(),
            "real page"
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        touch(&root.join("localhost:2368/index.html"), "home");
        touch(&root.join("localhost:2368/about.html"), "about");

        run_normalize(root, "localhost:2368", Some("blog.example.com")).unwrap();
        run_normalize(root, "localhost:2368", Some("blog.example.com")).unwrap();

        assert_eq!(fs::read_to_string(root.join("index.html")).unwrap(), "home");
        assert_eq!(
            fs::read_to_string(root.join("about.html")).unwrap(),
            "about"
        );
        assert_eq!(fs::read_to_string(root.join(".nojekyll")).unwrap(), "");
        assert_eq!(
            fs::read_to_string(root.join("CNAME")).unwrap(),
            "blog.example.com"
        );
        assert!(!root.join("localhost:2368").exists());
    }
}
