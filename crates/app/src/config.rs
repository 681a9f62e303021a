//! Process configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use shop_observability::LogFormat;

pub const ENV_DEFAULT_PAGE_SIZE: &str = "SHOP_DEFAULT_PAGE_SIZE";
pub const ENV_MAX_PAGE_SIZE: &str = "SHOP_MAX_PAGE_SIZE";
pub const ENV_LOG_FORMAT: &str = "SHOP_LOG_FORMAT";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid value: {message}")]
    Invalid { var: &'static str, message: String },

    #[error("default page size {default} must be between 1 and max page size {max}")]
    PageSizeRange { default: i64, max: i64 },
}

/// Store-facing settings. Everything has a default; the environment can
/// override each field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    /// Page size used when a listing does not specify one.
    pub default_page_size: i64,
    /// Upper bound applied to any requested page size.
    pub max_page_size: i64,
    pub log_format: LogFormat,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            default_page_size: shop_core::DEFAULT_LIMIT,
            max_page_size: 1000,
            log_format: LogFormat::default(),
        }
    }
}

impl ShopConfig {
    /// Load from `SHOP_*` environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_DEFAULT_PAGE_SIZE) {
            config.default_page_size = parse_int(ENV_DEFAULT_PAGE_SIZE, &raw)?;
        }
        if let Some(raw) = lookup(ENV_MAX_PAGE_SIZE) {
            config.max_page_size = parse_int(ENV_MAX_PAGE_SIZE, &raw)?;
        }
        if let Some(raw) = lookup(ENV_LOG_FORMAT) {
            config.log_format = raw.parse::<LogFormat>().map_err(|e| ConfigError::Invalid {
                var: ENV_LOG_FORMAT,
                message: e.to_string(),
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_page_size < 1 || self.default_page_size > self.max_page_size {
            return Err(ConfigError::PageSizeRange {
                default: self.default_page_size,
                max: self.max_page_size,
            });
        }
        Ok(())
    }
}

fn parse_int(var: &'static str, raw: &str) -> Result<i64, ConfigError> {
    raw.trim().parse::<i64>().map_err(|e| ConfigError::Invalid {
        var,
        message: e.to_string(),
    })
}
