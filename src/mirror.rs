//! Mirror invocation contract.
//!
//! The recursive fetch itself is delegated to `wget`: given the origin URL,
//! it fetches the page and every asset it references, rewrites internal
//! links to relative paths, and stops at the domain boundary. This module
//! owns the argument construction and the interpretation of the tool's exit
//! status; retry/backoff/politeness knobs come from [`MirrorConfig`].
//!
//! `wget` reserves exit code 8 for "server issued an error response", the
//! class a handful of expected 404s (a missing favicon, an unused feed URL)
//! fall into even when the mirror is otherwise complete. That code is logged
//! as a warning and the pipeline continues; any other non-zero code aborts
//! the run.

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::Command;

use crate::config::{Config, MirrorConfig};

/// Exit code `wget` uses when the server returned an error response for at
/// least one request.
const WGET_SERVER_ERROR: i32 = 8;

/// Mirror the origin site into `output_dir`.
pub fn run_mirror(config: &Config, output_dir: &Path) -> Result<()> {
    let host = config.source_host()?;
    let args = build_wget_args(&config.mirror, &host, output_dir, &config.source.url);

    println!("Mirroring {} with wget...", config.source.url);

    let status = Command::new("wget")
        .args(&args)
        .status()
        .with_context(|| "Failed to run wget — is it installed and on PATH?")?;

    interpret_exit(status.code())
}

/// Classify the mirror tool's exit status: success, tolerated
/// partial-content failure, or fatal.
fn interpret_exit(code: Option<i32>) -> Result<()> {
    match code {
        Some(0) => Ok(()),
        Some(WGET_SERVER_ERROR) => {
            eprintln!(
                "Warning: wget reported server errors (exit code {}); \
                 expected for missing assets such as a favicon, continuing",
                WGET_SERVER_ERROR
            );
            Ok(())
        }
        Some(code) => bail!("wget failed with exit code {}", code),
        None => bail!("wget terminated by signal"),
    }
}

/// The flag set the mirror contract requires: recursive fetch with page
/// requisites, `.html` extensions, links rewritten to relative paths,
/// Windows-safe file names, bounded to the origin domain.
pub fn build_wget_args(
    mirror: &MirrorConfig,
    host: &str,
    output_dir: &Path,
    url: &str,
) -> Vec<String> {
    let mut args = vec![
        "--recursive".to_string(),
        "--no-clobber".to_string(),
        "--page-requisites".to_string(),
        "--html-extension".to_string(),
        "--convert-links".to_string(),
        "--restrict-file-names=windows".to_string(),
        format!("--domains={}", host),
        "--no-parent".to_string(),
        format!("--wait={}", mirror.wait_secs),
    ];
    if mirror.random_wait {
        args.push("--random-wait".to_string());
    }
    args.push(format!("--timeout={}", mirror.timeout_secs));
    args.push(format!("--tries={}", mirror.tries));
    args.push(format!("--directory-prefix={}", output_dir.display()));
    args.push(url.to_string());
    args
}
