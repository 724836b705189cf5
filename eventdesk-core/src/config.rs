//! Client configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{EventDeskError, EventDeskResult};

static DEFAULT_BASE_URL: &str = "http://localhost:3000";
static DEFAULT_COLLECTION: &str = "events";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

/// Global configuration at ~/.config/eventdesk/config.toml
///
/// Every key is optional; a missing file means all defaults.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct GlobalConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_collection")]
    pub collection: String,

    /// Per-request timeout. No timeout when unset.
    pub timeout_secs: Option<u64>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        GlobalConfig {
            base_url: default_base_url(),
            collection: default_collection(),
            timeout_secs: None,
        }
    }
}

impl GlobalConfig {
    pub fn config_path() -> EventDeskResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| EventDeskError::Config("Could not determine config directory".into()))?
            .join("eventdesk");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location.
    pub fn load() -> EventDeskResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> EventDeskResult<Self> {
        if !path.exists() {
            return Ok(GlobalConfig::default());
        }

        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents).map_err(|e| {
            EventDeskError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// `{base_url}/{collection}` with stray slashes removed.
    pub fn collection_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.collection.trim_matches('/')
        )
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
