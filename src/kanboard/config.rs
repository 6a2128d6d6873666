//! # Configuration
//!
//! Board configuration lives in `config.json` inside the data directory.
//! A missing file, or a missing field, falls back to the defaults below.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `storage-key` | `lists` | Blob key the board is stored under |
//! | `search-threshold` | `0.3` | Fuzzy search looseness (0.0 strict .. 1.0 anything) |
//! | `match-all-when-empty` | `false` | An empty search returns every list |
//! | `seed-defaults` | `true` | A first run starts from the sample board |
//! | `log-level` | `info` | `error`, `warn`, `info`, `debug` or `trace` |

use crate::error::{KanbanError, Result};
use crate::persistence::DEFAULT_KEY;
use crate::search::DEFAULT_THRESHOLD;
use crate::store::validate_key;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

pub const KEYS: [&str; 5] = [
    "storage-key",
    "search-threshold",
    "match-all-when-empty",
    "seed-defaults",
    "log-level",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct BoardConfig {
    pub storage_key: String,
    pub search_threshold: f64,
    pub match_all_when_empty: bool,
    pub seed_defaults: bool,
    pub log_level: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_KEY.to_string(),
            search_threshold: DEFAULT_THRESHOLD,
            match_all_when_empty: false,
            seed_defaults: true,
            log_level: "info".to_string(),
        }
    }
}

impl BoardConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(KanbanError::Io)?;
        let config: BoardConfig =
            serde_json::from_str(&content).map_err(KanbanError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(KanbanError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(KanbanError::Serialization)?;
        fs::write(config_path, content).map_err(KanbanError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "storage-key" => Some(self.storage_key.clone()),
            "search-threshold" => Some(self.search_threshold.to_string()),
            "match-all-when-empty" => Some(self.match_all_when_empty.to_string()),
            "seed-defaults" => Some(self.seed_defaults.to_string()),
            "log-level" => Some(self.log_level.clone()),
            _ => None,
        }
    }

    /// Set a value by key. The value is validated before anything changes.
    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "storage-key" => {
                let reserved = Some(value) == CONFIG_FILENAME.strip_suffix(".json");
                if reserved || validate_key(value).is_err() {
                    return Err(format!(
                        "Invalid storage key: {} (use letters, digits, '-', '_' or '.')",
                        value
                    ));
                }
                self.storage_key = value.to_string();
            }
            "search-threshold" => {
                let threshold: f64 = value
                    .parse()
                    .map_err(|_| format!("Invalid threshold: {}", value))?;
                if !(0.0..=1.0).contains(&threshold) {
                    return Err(format!("Threshold must be between 0 and 1, got {}", value));
                }
                self.search_threshold = threshold;
            }
            "match-all-when-empty" => self.match_all_when_empty = parse_bool(value)?,
            "seed-defaults" => self.seed_defaults = parse_bool(value)?,
            "log-level" => {
                let level = value.to_ascii_lowercase();
                if !LOG_LEVELS.contains(&level.as_str()) {
                    return Err(format!("Invalid log level: {}", value));
                }
                self.log_level = level;
            }
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }

    /// All keys with their current values, in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        KEYS.iter()
            .filter_map(|key| self.get(key).map(|value| (*key, value)))
            .collect()
    }
}

fn parse_bool(value: &str) -> std::result::Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(format!("Invalid boolean: {}", value)),
    }
}
