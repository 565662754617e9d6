use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub mirror: MirrorConfig,
}

/// Origin CMS and readiness-probe settings.
#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    #[serde(default = "default_source_url")]
    pub url: String,
    #[serde(default = "default_probe_attempts")]
    pub probe_attempts: u32,
    #[serde(default = "default_probe_delay_secs")]
    pub probe_delay_secs: u64,
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,
}

fn default_source_url() -> String {
    "http://localhost:2368".to_string()
}
fn default_probe_attempts() -> u32 {
    30
}
fn default_probe_delay_secs() -> u64 {
    2
}
fn default_probe_timeout_secs() -> u64 {
    5
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_source_url(),
            probe_attempts: default_probe_attempts(),
            probe_delay_secs: default_probe_delay_secs(),
            probe_timeout_secs: default_probe_timeout_secs(),
        }
    }
}

/// Output tree location and optional custom domain (enables `CNAME`).
#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    #[serde(default)]
    pub domain: Option<String>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("static-site")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            domain: None,
        }
    }
}

/// Politeness parameters passed through to the mirroring tool.
#[derive(Debug, Deserialize, Clone)]
pub struct MirrorConfig {
    #[serde(default = "default_wait_secs")]
    pub wait_secs: u64,
    #[serde(default = "default_random_wait")]
    pub random_wait: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_tries")]
    pub tries: u32,
}

fn default_wait_secs() -> u64 {
    1
}
fn default_random_wait() -> bool {
    true
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_tries() -> u32 {
    3
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            wait_secs: default_wait_secs(),
            random_wait: default_random_wait(),
            timeout_secs: default_timeout_secs(),
            tries: default_tries(),
        }
    }
}

impl Config {
    /// Origin host for the mirror's domain boundary (no port).
    pub fn source_host(&self) -> Result<String> {
        let url = reqwest::Url::parse(&self.source.url)
            .with_context(|| format!("Invalid source URL: {}", self.source.url))?;
        url.host_str()
            .map(|h| h.to_string())
            .ok_or_else(|| anyhow::anyhow!("Source URL has no host: {}", self.source.url))
    }

    /// `host:port` as it appears in the mirror tool's directory naming.
    /// The port is omitted when the URL carries none (default ports).
    pub fn source_host_port(&self) -> Result<String> {
        let url = reqwest::Url::parse(&self.source.url)
            .with_context(|| format!("Invalid source URL: {}", self.source.url))?;
        let host = url
            .host_str()
            .ok_or_else(|| anyhow::anyhow!("Source URL has no host: {}", self.source.url))?;
        Ok(match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        })
    }
}

/// Load configuration from an optional TOML file, apply environment
/// overrides, and validate.
///
/// A missing file is not an error — every setting has a default, matching
/// the zero-config behavior of the export pipeline. Recognized overrides:
/// `FREEZE_SOURCE_URL`, `FREEZE_OUTPUT_DIR`, `FREEZE_PAGES_DOMAIN`.
pub fn load_config(path: &Path) -> Result<Config> {
    let mut config: Config = if path.exists() {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content).with_context(|| "Failed to parse config file")?
    } else {
        Config::default()
    };

    apply_env_overrides(&mut config);

    // Validate source
    config
        .source_host()
        .with_context(|| "source.url must be an absolute URL with a host")?;
    if config.source.probe_attempts == 0 {
        anyhow::bail!("source.probe_attempts must be >= 1");
    }

    // Validate mirror
    if config.mirror.tries == 0 {
        anyhow::bail!("mirror.tries must be >= 1");
    }

    // Validate output
    if let Some(domain) = &config.output.domain {
        if domain.trim().is_empty() {
            anyhow::bail!("output.domain must not be blank when set");
        }
    }

    Ok(config)
}

fn apply_env_overrides(config: &mut Config) {
    if let Ok(url) = std::env::var("FREEZE_SOURCE_URL") {
        if !url.is_empty() {
            config.source.url = url;
        }
    }
    if let Ok(dir) = std::env::var("FREEZE_OUTPUT_DIR") {
        if !dir.is_empty() {
            config.output.dir = PathBuf::from(dir);
        }
    }
    if let Ok(domain) = std::env::var("FREEZE_PAGES_DOMAIN") {
        if !domain.is_empty() {
            config.output.domain = Some(domain);
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            output: OutputConfig::default(),
            mirror: MirrorConfig::default(),
        }
    }
}
