use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ChansplitError, Result};
use crate::splitter::SplitOptions;

const CONFIG_FILE: &str = "config.toml";

pub const DEFAULT_DATA_DIR: &str = "./data/final_backup";

/// Default config template with rich comments
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# chansplit configuration file
# Location: ~/.chansplit/config.toml

[split]
# Directory holding the exported backup (one *.json file); output
# subdirectories are created inside it
# Default: "./data/final_backup"
data_dir = "./data/final_backup"

# Omit categories and channels not visible to @everyone
# Default: true
filter_public = true

# Also split the channels.others array into other_channels/
# Default: false
include_others = false

# Clear output subdirectories before writing, so index files from a
# previous larger run do not linger
# Default: true
clean_output = true
"#;

/// Global configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub split: SplitConfig,
}

/// Split-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Directory holding the backup export
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Omit non-public entities
    #[serde(default = "default_true")]
    pub filter_public: bool,

    /// Split channels.others as well
    #[serde(default)]
    pub include_others: bool,

    /// Clear output subdirectories before writing
    #[serde(default = "default_true")]
    pub clean_output: bool,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_true() -> bool {
    true
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            filter_public: true,
            include_others: false,
            clean_output: true,
        }
    }
}

impl Config {
    /// Load config from base directory
    pub fn load(base_dir: &Path) -> Result<Self> {
        let path = base_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content).map_err(|e| ChansplitError::ConfigParse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        Ok(config)
    }

    /// Save config to base directory
    pub fn save(&self, base_dir: &Path) -> Result<()> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Get config file path
    pub fn path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE)
    }

    /// Initialize config with default template (rich comments)
    pub fn init(base_dir: &Path) -> Result<PathBuf> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        if !path.exists() {
            fs::write(&path, DEFAULT_CONFIG_TEMPLATE)?;
        }

        Ok(path)
    }

    /// Get a config value by dot-notation key
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "split.data_dir" => Some(self.split.data_dir.display().to_string()),
            "split.filter_public" => Some(self.split.filter_public.to_string()),
            "split.include_others" => Some(self.split.include_others.to_string()),
            "split.clean_output" => Some(self.split.clean_output.to_string()),
            _ => None,
        }
    }

    /// Set a config value by dot-notation key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "split.data_dir" => {
                self.split.data_dir = PathBuf::from(value);
                Ok(())
            }
            "split.filter_public" => {
                self.split.filter_public = parse_bool(key, value)?;
                Ok(())
            }
            "split.include_others" => {
                self.split.include_others = parse_bool(key, value)?;
                Ok(())
            }
            "split.clean_output" => {
                self.split.clean_output = parse_bool(key, value)?;
                Ok(())
            }
            _ => Err(ChansplitError::ConfigKeyNotFound {
                key: key.to_string(),
            }),
        }
    }

    /// List all config keys with their current values
    pub fn list(&self) -> Vec<(String, String)> {
        ["split.data_dir", "split.filter_public", "split.include_others", "split.clean_output"]
            .iter()
            .map(|key| (key.to_string(), self.get(key).unwrap_or_default()))
            .collect()
    }

    /// Convert to SplitOptions for a split run
    pub fn to_split_options(&self) -> SplitOptions {
        SplitOptions {
            filter_public: self.split.filter_public,
            include_others: self.split.include_others,
            clean_output: self.split.clean_output,
        }
    }
}

/// Parse a boolean config value (true/false, yes/no, 1/0)
fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(ChansplitError::ConfigInvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
