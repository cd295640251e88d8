use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// HTTP transport settings shared by both fetches of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Seconds allowed for establishing the TCP/TLS connection.
    pub connect_timeout_secs: u64,
    /// Seconds allowed for a whole request, body included.
    pub timeout_secs: u64,
    /// Maximum number of redirects followed per request.
    pub max_redirections: u32,
    /// `User-Agent` header value; none is sent when unset.
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 120,
            max_redirections: 10,
            user_agent: None,
        }
    }
}

impl HttpConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    /// Number of trailing script bytes scanned for `//# sourceMappingURL=`.
    pub tail_window_bytes: usize,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            tail_window_bytes: crate::locate::DEFAULT_TAIL_WINDOW,
        }
    }
}

/// External HTML generator invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    /// Program name or path; receives `<script> <map> --html` after `args`.
    pub command: String,
    /// Extra arguments placed before the file paths.
    pub args: Vec<String>,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            command: "source-map-explorer".to_string(),
            args: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Opener program to use instead of the platform default (`xdg-open`, `open`, `start`).
    pub command: Option<String>,
    /// When true, failing to open the browser fails the whole run.
    pub required: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            command: None,
            required: true,
        }
    }
}

/// Global configuration loaded from `~/.config/rsme/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RsmeConfig {
    pub http: HttpConfig,
    pub locator: LocatorConfig,
    pub visualizer: VisualizerConfig,
    pub browser: BrowserConfig,
}

impl RsmeConfig {
    /// Rejects values that would make every run fail for a confusing reason.
    pub fn validate(&self) -> Result<()> {
        let min_window = crate::locate::SOURCE_MAPPING_URL_TOKEN.len() + 1;
        if self.locator.tail_window_bytes < min_window {
            anyhow::bail!(
                "locator.tail_window_bytes = {} is too small (minimum {})",
                self.locator.tail_window_bytes,
                min_window
            );
        }
        Ok(())
    }
}

/// Location of `config.toml` under the XDG config dir. Creates nothing.
pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs =
        xdg::BaseDirectories::with_prefix("rsme").context("locate XDG config directory")?;
    Ok(xdg_dirs.get_config_file("config.toml"))
}

/// Load configuration from disk, creating a default file if none exists.
///
/// Writing the default file is best effort: if the config dir is unusable
/// the built-in defaults are returned and a warning is logged.
pub fn load_or_init() -> Result<RsmeConfig> {
    match config_path() {
        Ok(path) => load_or_init_at(&path),
        Err(e) => {
            tracing::warn!("{:#}; using built-in defaults", e);
            Ok(RsmeConfig::default())
        }
    }
}

/// `load_or_init` against an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<RsmeConfig> {
    if path.exists() {
        return load_from(path);
    }

    let default_cfg = RsmeConfig::default();
    match write_default(path, &default_cfg) {
        Ok(()) => tracing::info!("created default config at {}", path.display()),
        Err(e) => tracing::warn!("{:#}; using built-in defaults", e),
    }
    Ok(default_cfg)
}

fn write_default(path: &Path, cfg: &RsmeConfig) -> Result<()> {
    let toml = toml::to_string_pretty(cfg)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create default config dir {}", parent.display()))?;
    }
    fs::write(path, toml).with_context(|| format!("create default config {}", path.display()))?;
    Ok(())
}

/// Load configuration from an explicit file. Missing keys take their defaults.
pub fn load_from(path: &Path) -> Result<RsmeConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: RsmeConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}
