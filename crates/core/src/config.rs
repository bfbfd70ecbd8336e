// crates/core/src/config.rs
//! Process configuration.
//!
//! Built once at startup (defaults → TOML file → CLI overrides) and then
//! shared read-only as an `Arc<Config>`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Delay between a socket close and the next connection attempt.
pub const RECONNECT_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub herofest: HerofestConfig,
    pub assets: AssetsConfig,
}

/// Outbound pick/ban forwarding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HerofestConfig {
    /// Feature flag for the whole forwarding subsystem.
    pub enabled: bool,
    /// Websocket endpoint of the presentation consumer.
    pub ws: String,
    /// Prefix prepended to asset paths to build absolute artwork URLs.
    pub host: String,
    pub handshake_timeout_ms: u64,
    pub connect_timeout_ms: u64,
}

impl Default for HerofestConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ws: "ws://localhost:8080".into(),
            host: "http://localhost:3003".into(),
            handshake_timeout_ms: 100_000,
            connect_timeout_ms: 10_000,
        }
    }
}

impl HerofestConfig {
    pub fn handshake_timeout(&self) -> Duration {
        Duration::from_millis(self.handshake_timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

/// Champion metadata source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Data Dragon `champion.json`. None = names and artwork unresolved.
    pub champions: Option<PathBuf>,
    /// Patch version used in artwork paths.
    pub version: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            champions: None,
            version: "latest".into(),
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub herofest_enabled: Option<bool>,
    pub herofest_ws: Option<String>,
    pub herofest_host: Option<String>,
    pub champions: Option<PathBuf>,
}

impl Config {
    /// `<config_dir>/pickban-relay/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("pickban-relay").join("config.toml"))
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "config file not found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::io(path, e)),
        };
        toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })
    }

    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(enabled) = overrides.herofest_enabled {
            self.herofest.enabled = enabled;
        }
        if let Some(ws) = overrides.herofest_ws {
            self.herofest.ws = ws;
        }
        if let Some(host) = overrides.herofest_host {
            self.herofest.host = host;
        }
        if let Some(champions) = overrides.champions {
            self.assets.champions = Some(champions);
        }
        self
    }
}
