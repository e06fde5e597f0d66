//! Configuration management for barber-stats

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Date search limits
    pub search: SearchConfig,

    /// Pricing fallbacks
    pub pricing: PricingConfig,

    /// Terminal output
    pub display: DisplayConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Directory holding the JSON export of the data API
    /// (default: ~/.local/share/barber-stats)
    pub data_dir: Option<PathBuf>,
}

/// Limits applied to search input before it reaches the period resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum length of a free-form period expression, in characters
    pub max_query_len: usize,

    /// Maximum span of an explicit date range, in days
    pub max_range_days: i64,

    /// How far back an explicit range may start, in years
    pub max_lookback_years: u32,
}

/// Pricing fallbacks used when a sale record carries no service count
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Base price assumed for services missing from the price table
    pub default_base_price: i64,
}

/// Terminal output settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Hide days with no revenue from history listings
    pub hide_zero_days: bool,

    /// Width of the bar charts, in characters
    pub bar_width: usize,
}

// Default implementations

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            data_dir: None,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_query_len: 50,
            max_range_days: 365,
            max_lookback_years: 5,
        }
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            default_base_price: 8000,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            hide_zero_days: true,
            bar_width: 20,
        }
    }
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get the default configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::config("Could not determine config directory"))?;
        Ok(config_dir.join("barber-stats").join("config.toml"))
    }

    /// Get the data directory
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.general.data_dir {
            Ok(dir.clone())
        } else {
            let data_dir = dirs::data_local_dir()
                .ok_or_else(|| Error::config("Could not determine data directory"))?;
            Ok(data_dir.join("barber-stats"))
        }
    }

    /// Validate configuration values.
    ///
    /// Call this after loading to ensure all values are within acceptable ranges.
    pub fn validate(&self) -> Result<()> {
        if self.search.max_query_len == 0 {
            return Err(Error::config("max_query_len must be at least 1"));
        }

        if self.search.max_range_days <= 0 {
            return Err(Error::config(format!(
                "max_range_days must be positive, got {}",
                self.search.max_range_days
            )));
        }

        if self.pricing.default_base_price <= 0 {
            return Err(Error::config(format!(
                "default_base_price must be positive, got {}",
                self.pricing.default_base_price
            )));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.to_lowercase().as_str()) {
            return Err(Error::config(format!(
                "log_level must be one of {:?}, got '{}'",
                valid_levels, self.general.log_level
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.search.max_query_len, 50);
        assert_eq!(config.search.max_range_days, 365);
        assert_eq!(config.search.max_lookback_years, 5);
        assert_eq!(config.pricing.default_base_price, 8000);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [search]
            max_range_days = 90
            "#,
        )
        .unwrap();
        assert_eq!(config.search.max_range_days, 90);
        assert_eq!(config.search.max_query_len, 50);
        assert_eq!(config.general.log_level, "info");
        assert!(config.display.hide_zero_days);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.general.log_level = "loud".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.search.max_range_days = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.pricing.default_base_price = -1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.display.bar_width = 32;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.display.bar_width, 32);
        assert_eq!(loaded.search, config.search);
    }
}
