//! Dashboard configuration
//!
//! Loaded from a JSON file; every field falls back to its default when omitted.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{market::HistoryPeriod, news::NewsOptions, DashboardError, Result};

/// Locations searched by [`DashboardConfig::load`], in order
pub const CONFIG_PATHS: [&str; 2] = ["tickerlens.json", "config/tickerlens.json"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Symbols shown when the symbol input is blank
    #[serde(default = "default_symbols")]
    pub default_symbols: Vec<String>,
    #[serde(default)]
    pub default_period: HistoryPeriod,
    /// Maximum news items per symbol
    #[serde(default = "default_news_limit")]
    pub news_limit: usize,
    /// News sections must be longer than this many characters
    #[serde(default = "default_min_news_section_len")]
    pub min_news_section_len: usize,
    /// Currency marker prefixed to money values
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_symbols() -> Vec<String> {
    vec!["AAPL".to_string()]
}
fn default_news_limit() -> usize {
    5
}
fn default_min_news_section_len() -> usize {
    50
}
fn default_currency_symbol() -> String {
    "$".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_symbols: default_symbols(),
            default_period: HistoryPeriod::default(),
            news_limit: default_news_limit(),
            min_news_section_len: default_min_news_section_len(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

impl DashboardConfig {
    /// Load and validate a JSON config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: DashboardConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the first readable file in [`CONFIG_PATHS`], else defaults
    pub fn load() -> Self {
        for path in CONFIG_PATHS {
            if Path::new(path).exists() {
                match Self::from_file(path) {
                    Ok(config) => {
                        log::info!("loaded config from {path}");
                        return config;
                    }
                    Err(e) => {
                        log::warn!("failed to load config {path}: {e}");
                    }
                }
            }
        }

        log::info!("using default config");
        Self::default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_symbols.iter().all(|s| s.trim().is_empty()) {
            return Err(DashboardError::InvalidConfig(
                "default_symbols must name at least one symbol".into(),
            ));
        }
        if self.news_limit == 0 {
            return Err(DashboardError::InvalidConfig("news_limit must be > 0".into()));
        }
        Ok(())
    }

    pub fn news_options(&self) -> NewsOptions {
        NewsOptions {
            limit: self.news_limit,
            min_section_len: self.min_news_section_len,
        }
    }
}
