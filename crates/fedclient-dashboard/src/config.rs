//! Dashboard configuration, read from a TOML file.
//!
//! ```toml
//! [backend]
//! url = "http://localhost:8000"
//!
//! [ui]
//! tick_rate_ms = 100
//! max_tree_depth = 64
//! strict_table = false
//!
//! [log]
//! filter = "info"
//!
//! [client]
//! client_id = "client-1"
//! client_name = "St. Mary Clinic"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use fedclient_api::ApiConfig;
use fedclient_protocol::DEFAULT_BACKEND_URL;
use fedclient_results::{DetailOptions, TreeLimits};
use fedclient_state::ClientIdentity;

const APP_DIR: &str = "fedclient";
const CONFIG_FILE_NAME: &str = "config.toml";
const LOG_FILE_NAME: &str = "fedclient.log";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub backend: BackendConfig,
    pub ui: UiConfig,
    pub log: LogConfig,
    pub client: ClientIdentity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub url: String,
    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,
    pub max_body_bytes: usize,
}

impl Default for BackendConfig {
    fn default() -> Self {
        let api = ApiConfig::default();
        Self {
            url: DEFAULT_BACKEND_URL.to_string(),
            connect_timeout_secs: api.connect_timeout.as_secs(),
            read_timeout_secs: api.read_timeout.as_secs(),
            max_body_bytes: api.max_body_bytes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub tick_rate_ms: u64,
    pub max_tree_depth: usize,
    pub strict_table: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 100,
            max_tree_depth: TreeLimits::default().max_depth,
            strict_table: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub filter: String,
    /// Log file used while the TUI owns the terminal.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            file: None,
        }
    }
}

impl DashboardConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the platform config
    /// directory is consulted and a missing file yields defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.ui.tick_rate_ms == 0 {
            anyhow::bail!("ui.tick_rate_ms must be greater than zero");
        }
        if self.backend.max_body_bytes == 0 {
            anyhow::bail!("backend.max_body_bytes must be greater than zero");
        }
        Ok(())
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.backend.url.clone(),
            connect_timeout: Duration::from_secs(self.backend.connect_timeout_secs),
            read_timeout: Duration::from_secs(self.backend.read_timeout_secs),
            max_body_bytes: self.backend.max_body_bytes,
        }
    }

    pub fn detail_options(&self) -> DetailOptions {
        DetailOptions {
            limits: TreeLimits {
                max_depth: self.ui.max_tree_depth,
            },
            strict_table: self.ui.strict_table,
        }
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.ui.tick_rate_ms)
    }

    /// Log file for TUI mode: the configured one, else the platform data directory.
    pub fn log_file(&self) -> Option<PathBuf> {
        self.log
            .file
            .clone()
            .or_else(|| dirs::data_local_dir().map(|dir| dir.join(APP_DIR).join(LOG_FILE_NAME)))
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE_NAME))
}
