//! Game configuration supplied by the host page.
//!
//! Every field has a default, so an empty object (or `undefined` from JS)
//! yields the stock three-level game.

use serde::Deserialize;

pub const DEFAULT_TICK_INTERVAL_MS: u32 = 1000;

fn default_levels() -> Vec<String> {
    vec![
        "levels/level1.json".to_string(),
        "levels/level2.json".to_string(),
        "levels/level3.json".to_string(),
    ]
}

fn default_tick_interval_ms() -> u32 {
    DEFAULT_TICK_INTERVAL_MS
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    /// Ordered level identifiers. The first one is loaded on startup.
    #[serde(default = "default_levels")]
    pub levels: Vec<String>,
    /// How often the timer reports elapsed seconds.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u32,
    /// Console log level for the browser build (`error`, `warn`, `info`, `debug`, `trace`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Fixed seed for level selection; entropy is used when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            levels: default_levels(),
            tick_interval_ms: default_tick_interval_ms(),
            log_level: default_log_level(),
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// The level to show on startup.
    pub fn initial_level(&self) -> Option<&str> {
        self.levels.first().map(String::as_str)
    }

    /// Parsed `log_level`, falling back to `Info` on unknown names.
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}
