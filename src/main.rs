//! # Site Freeze CLI (`freeze`)
//!
//! The `freeze` binary drives the static export pipeline and offers
//! maintenance commands for its individual stages.
//!
//! ## Usage
//!
//! ```bash
//! freeze --config ./freeze.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `freeze export` | Full pipeline: probe, mirror, normalize, index |
//! | `freeze normalize` | Repair an already-mirrored tree |
//! | `freeze index` | Rebuild `search.json` for a tree |
//! | `freeze search "<query>"` | Query a built index from the terminal |
//! | `freeze status` | Show resolved configuration and origin health |

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use site_freeze::{client, config, index, mirror, normalize, probe};

/// Site Freeze — freeze a dynamically rendered blog into a static tree
/// with client-side search.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file; every setting has a default, so the flag is optional.
#[derive(Parser)]
#[command(
    name = "freeze",
    about = "Site Freeze — static export and client-side search for a dynamically rendered blog",
    version,
    long_about = "Site Freeze mirrors a running CMS into a fully static file tree suitable for \
    zero-backend hosting, repairs the artifacts a generic site mirror produces, and builds a \
    search index served entirely in the browser."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./freeze.toml`. Missing file means built-in defaults.
    /// `FREEZE_SOURCE_URL`, `FREEZE_OUTPUT_DIR`, and `FREEZE_PAGES_DOMAIN`
    /// override the file.
    #[arg(long, global = true, default_value = "./freeze.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Run the full export pipeline.
    ///
    /// Waits for the origin CMS to respond, clears the output directory,
    /// mirrors the site with wget, normalizes the tree for static hosting,
    /// and writes the search index. Stages run strictly in sequence.
    Export,

    /// Normalize an existing mirrored tree.
    ///
    /// Merges the host-named subdirectory into the root, writes the
    /// `.nojekyll` marker and optional `CNAME`, and synthesizes an
    /// `index.html` if none exists. Idempotent.
    Normalize {
        /// Tree root to normalize. Defaults to the configured output dir.
        #[arg(long)]
        tree: Option<PathBuf>,
    },

    /// Build `search.json` for a normalized tree.
    ///
    /// Walks the tree, extracts a searchable document per content page,
    /// and overwrites the index artifact at the tree root.
    Index {
        /// Tree root to index. Defaults to the configured output dir.
        #[arg(long)]
        tree: Option<PathBuf>,
    },

    /// Query a built search index from the terminal.
    ///
    /// Loads `search.json` from the tree root and evaluates the query with
    /// the same matcher the browser engine uses.
    Search {
        /// The search query string.
        query: String,

        /// Tree root containing `search.json`. Defaults to the configured
        /// output dir.
        #[arg(long)]
        tree: Option<PathBuf>,

        /// Maximum number of results to print.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show the resolved configuration and origin reachability.
    Status,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Export => run_export(&cfg),
        Commands::Normalize { tree } => {
            let root = tree.unwrap_or_else(|| cfg.output.dir.clone());
            normalize::run_normalize(
                &root,
                &cfg.source_host_port()?,
                cfg.output.domain.as_deref(),
            )
        }
        Commands::Index { tree } => {
            let root = tree.unwrap_or_else(|| cfg.output.dir.clone());
            index::run_index(&root).map(|_| ())
        }
        Commands::Search { query, tree, limit } => {
            let root = tree.unwrap_or_else(|| cfg.output.dir.clone());
            run_search(&root, &query, limit)
        }
        Commands::Status => run_status(&cfg),
    }
}

/// The export pipeline: probe → clean → mirror → normalize → index.
fn run_export(cfg: &config::Config) -> Result<()> {
    println!("Starting static site export...");

    probe::wait_until_ready(cfg)?;

    let out = &cfg.output.dir;
    if out.exists() {
        std::fs::remove_dir_all(out)
            .with_context(|| format!("Failed to clear output dir {}", out.display()))?;
    }
    std::fs::create_dir_all(out)
        .with_context(|| format!("Failed to create output dir {}", out.display()))?;

    mirror::run_mirror(cfg, out)?;

    println!("Processing exported files...");
    normalize::run_normalize(out, &cfg.source_host_port()?, cfg.output.domain.as_deref())?;

    index::run_index(out)?;

    println!("Static site export completed successfully!");
    println!("Files exported to: {}", out.display());
    Ok(())
}

/// Evaluate a query against a built index, the way the browser engine does.
fn run_search(root: &std::path::Path, query: &str, limit: Option<usize>) -> Result<()> {
    let artifact = root.join(index::SEARCH_INDEX_FILE);
    let bytes = std::fs::read(&artifact)
        .with_context(|| format!("Failed to read {}", artifact.display()))?;

    let mut ui = client::SearchUi::initialize(client::load_corpus(&bytes));
    ui.set_query(query);
    let results = ui.results();

    if results.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let shown = limit.unwrap_or(results.len()).min(results.len());
    for doc in &results[..shown] {
        println!("{}  {}", doc.title, doc.url);
        if !doc.excerpt.is_empty() {
            println!("  {}", doc.excerpt);
        }
        if !doc.tags.is_empty() {
            println!("  tags: {}", doc.tags.join(", "));
        }
    }
    println!("{} of {} result(s)", shown, results.len());
    Ok(())
}

/// Health listing: resolved settings plus one reachability probe.
fn run_status(cfg: &config::Config) -> Result<()> {
    println!("source url:     {}", cfg.source.url);
    println!("output dir:     {}", cfg.output.dir.display());
    println!(
        "custom domain:  {}",
        cfg.output.domain.as_deref().unwrap_or("(none)")
    );
    println!(
        "probe:          {} attempts, {}s delay",
        cfg.source.probe_attempts, cfg.source.probe_delay_secs
    );

    let http = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(cfg.source.probe_timeout_secs))
        .build()?;
    let reachable = http
        .get(&cfg.source.url)
        .send()
        .map(|r| r.status().is_success())
        .unwrap_or(false);
    println!("origin:         {}", if reachable { "OK" } else { "UNREACHABLE" });

    let artifact = cfg.output.dir.join(index::SEARCH_INDEX_FILE);
    println!(
        "search index:   {}",
        if artifact.exists() { "built" } else { "not built" }
    );
    Ok(())
}
