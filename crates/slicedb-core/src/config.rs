//! Query defaults handed to every slice descriptor a session creates.
//!
//! Defaults are explicit values owned by the session, never process-wide
//! statics, so two sessions may run with different limits side by side.

use crate::db::consistency::ConsistencyLevel;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

const DEFAULT_LIMIT: u32 = 100;
const DEFAULT_PAGE_SIZE: u32 = 100;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to parse slice config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("slice config field '{field}' must be strictly positive")]
    NonPositive { field: &'static str },
}

///
/// SliceConfig
///
/// Defaults applied when a query leaves a setting unspecified.
/// Loadable from TOML; unknown keys are rejected.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SliceConfig {
    /// Row limit applied to selects and iterations without an explicit limit.
    pub default_limit: u32,

    /// Rows fetched per round trip when iterating without an explicit page size.
    pub default_page_size: u32,

    /// Consistency used when a query does not request one.
    pub default_consistency: ConsistencyLevel,
}

impl Default for SliceConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            default_page_size: DEFAULT_PAGE_SIZE,
            default_consistency: ConsistencyLevel::One,
        }
    }
}

impl SliceConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;

        Ok(config)
    }

    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.default_limit == 0 {
            return Err(ConfigError::NonPositive {
                field: "default_limit",
            });
        }
        if self.default_page_size == 0 {
            return Err(ConfigError::NonPositive {
                field: "default_page_size",
            });
        }

        Ok(())
    }

    #[must_use]
    pub const fn with_default_limit(mut self, limit: u32) -> Self {
        self.default_limit = limit;
        self
    }

    #[must_use]
    pub const fn with_default_page_size(mut self, page_size: u32) -> Self {
        self.default_page_size = page_size;
        self
    }

    #[must_use]
    pub const fn with_default_consistency(mut self, consistency: ConsistencyLevel) -> Self {
        self.default_consistency = consistency;
        self
    }
}
