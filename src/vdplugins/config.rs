use crate::error::{Result, VdError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

const CONFIG_FILENAME: &str = "config.json";

pub const DEFAULT_CATALOG_URL: &str = "https://vd-plugins.github.io/proxy/plugins-full.json";
pub const DEFAULT_SHARE_URL: &str = "https://vd-plugins.github.io/web/";
const DEFAULT_DEBOUNCE_MS: u64 = 250;
const DEFAULT_THRESHOLD: f64 = 0.3;
const DEFAULT_DISTANCE: usize = 100;
const MAX_DEBOUNCE_MS: u64 = 60_000;

/// Keys accepted by [`VdConfig::get`] and [`VdConfig::set`].
pub const CONFIG_KEYS: &[&str] = &[
    "catalog-url",
    "share-url",
    "debounce-ms",
    "threshold",
    "distance",
];

/// Configuration for vdplugins, stored in `<config dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VdConfig {
    /// Where the plugin catalog is fetched from
    #[serde(default = "default_catalog_url")]
    pub catalog_url: String,

    /// Page that share links point at; the query goes after `#`
    #[serde(default = "default_share_url")]
    pub share_url: String,

    /// Quiet period before the shareable state is rewritten
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Fuzzy match cut-off, 0.0 = exact only, 1.0 = match anything
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// How far from the start of a field a match may drift before it stops counting
    #[serde(default = "default_distance")]
    pub distance: usize,
}

fn default_catalog_url() -> String {
    DEFAULT_CATALOG_URL.to_string()
}

fn default_share_url() -> String {
    DEFAULT_SHARE_URL.to_string()
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_distance() -> usize {
    DEFAULT_DISTANCE
}

impl Default for VdConfig {
    fn default() -> Self {
        Self {
            catalog_url: default_catalog_url(),
            share_url: default_share_url(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            threshold: DEFAULT_THRESHOLD,
            distance: DEFAULT_DISTANCE,
        }
    }
}

impl VdConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: VdConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Reject values a hand-edited `config.json` may carry but `set` never writes.
    pub fn validate(&self) -> Result<()> {
        check_threshold(self.threshold)?;
        check_debounce_ms(self.debounce_ms)?;
        reqwest::Url::parse(&self.share_url).map_err(|e| {
            VdError::Config(format!("Invalid share-url {}: {}", self.share_url, e))
        })?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "catalog-url" => Some(self.catalog_url.clone()),
            "share-url" => Some(self.share_url.clone()),
            "debounce-ms" => Some(self.debounce_ms.to_string()),
            "threshold" => Some(self.threshold.to_string()),
            "distance" => Some(self.distance.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "catalog-url" => {
                self.catalog_url = value.to_string();
            }
            "share-url" => {
                reqwest::Url::parse(value)
                    .map_err(|e| VdError::Config(format!("Invalid share-url {}: {}", value, e)))?;
                self.share_url = value.to_string();
            }
            "debounce-ms" => {
                let debounce_ms: u64 = value.parse().map_err(|_| {
                    VdError::Config(format!("debounce-ms must be a whole number, got {}", value))
                })?;
                check_debounce_ms(debounce_ms)?;
                self.debounce_ms = debounce_ms;
            }
            "threshold" => {
                let threshold: f64 = value.parse().map_err(|_| {
                    VdError::Config(format!("threshold must be a number, got {}", value))
                })?;
                check_threshold(threshold)?;
                self.threshold = threshold;
            }
            "distance" => {
                self.distance = value.parse().map_err(|_| {
                    VdError::Config(format!("distance must be a whole number, got {}", value))
                })?;
            }
            _ => return Err(VdError::Config(format!("Unknown config key: {}", key))),
        }
        Ok(())
    }
}

fn check_threshold(threshold: f64) -> Result<()> {
    if threshold.is_finite() && (0.0..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(VdError::Config(format!(
            "threshold must be between 0.0 and 1.0, got {}",
            threshold
        )))
    }
}

fn check_debounce_ms(debounce_ms: u64) -> Result<()> {
    if debounce_ms <= MAX_DEBOUNCE_MS {
        Ok(())
    } else {
        Err(VdError::Config(format!(
            "debounce-ms must be at most {}, got {}",
            MAX_DEBOUNCE_MS, debounce_ms
        )))
    }
}
