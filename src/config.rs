// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::model::timezone::parse_time_zone;
use anyhow::Result;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;
use std::fs;

/// Zone used when the caller's own zone is unknown.
pub const DEFAULT_TIME_ZONE: &str = "Etc/UTC";
/// Name given to a meeting when the command text is empty.
pub const DEFAULT_MEETING_NAME: &str = "/meet";

fn default_time_zone() -> String {
    DEFAULT_TIME_ZONE.to_string()
}
fn default_meeting_name() -> String {
    DEFAULT_MEETING_NAME.to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
    #[serde(default = "default_meeting_name")]
    pub default_meeting_name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String, // off, error, warn, info, debug, trace
    #[serde(default)]
    pub json_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_zone: default_time_zone(),
            default_meeting_name: default_meeting_name(),
            log_level: default_log_level(),
            json_output: false,
        }
    }
}

impl Config {
    /// Load the configuration using an explicit context.
    ///
    /// A missing file is not an error: the defaults apply. Unreadable or
    /// malformed files are reported with their path.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&path, toml_str).map_err(|e| {
            anyhow::anyhow!("Failed to write config file '{}': {}", path.display(), e)
        })?;
        Ok(())
    }

    pub fn tz(&self) -> Result<Tz> {
        Ok(parse_time_zone(&self.time_zone)?)
    }

    /// Unrecognised level names fall back to `Warn`.
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Warn)
    }
}
