//! Readiness probe for the origin CMS.
//!
//! The mirror step can only run once the source HTTP server responds, so the
//! export pipeline polls the origin URL with a bounded attempt count and a
//! fixed inter-attempt delay. Exhausting the attempts is fatal.

use anyhow::{bail, Result};
use std::time::Duration;

use crate::config::Config;

/// Poll the origin URL until it answers 200, or fail after the configured
/// number of attempts.
pub fn wait_until_ready(config: &Config) -> Result<()> {
    let attempts = config.source.probe_attempts;
    let delay = Duration::from_secs(config.source.probe_delay_secs);

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(config.source.probe_timeout_secs))
        .build()?;

    println!("Waiting for {} to be ready...", config.source.url);

    for attempt in 1..=attempts {
        if is_ready(&client, &config.source.url) {
            println!("Source is ready.");
            return Ok(());
        }
        println!(
            "Attempt {}/{}: source not ready, waiting...",
            attempt, attempts
        );
        if attempt < attempts {
            std::thread::sleep(delay);
        }
    }

    bail!(
        "Source {} failed to become ready after {} attempts",
        config.source.url,
        attempts
    );
}

/// One probe attempt. Connection errors, timeouts, and non-200 statuses all
/// count as "not ready".
fn is_ready(client: &reqwest::blocking::Client, url: &str) -> bool {
    match client.get(url).send() {
        Ok(resp) => resp.status() == reqwest::StatusCode::OK,
        Err(_) => false,
    }
}
