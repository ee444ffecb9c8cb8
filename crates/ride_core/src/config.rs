//! Configuration for the ride-creation core.
//!
//! Every section has defaults, so a partial JSON document only needs to name
//! what it overrides.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pricing::PricingConfig;
use crate::spatial::GridBucketer;

/// Default directions provider host.
const DEFAULT_DIRECTIONS_ENDPOINT: &str = "https://maps.googleapis.com";
/// Default HTTP timeout for a directions request (seconds).
const DEFAULT_DIRECTIONS_TIMEOUT_SECS: u64 = 10;
/// Default number of cached directions answers.
const DEFAULT_DIRECTIONS_CACHE_CAPACITY: usize = 256;
/// Default vehicle capacity when the host has not picked a vehicle yet.
const DEFAULT_VEHICLE_CAPACITY: u32 = 4;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Directions provider connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectionsConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    /// 0 disables caching.
    pub cache_capacity: usize,
}

impl Default for DirectionsConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_DIRECTIONS_ENDPOINT.to_string(),
            api_key: None,
            timeout_secs: DEFAULT_DIRECTIONS_TIMEOUT_SECS,
            cache_capacity: DEFAULT_DIRECTIONS_CACHE_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RideCoreConfig {
    pub grid: GridBucketer,
    pub pricing: PricingConfig,
    pub directions: DirectionsConfig,
    pub default_capacity: u32,
}

impl Default for RideCoreConfig {
    fn default() -> Self {
        Self {
            grid: GridBucketer::default(),
            pricing: PricingConfig::default(),
            directions: DirectionsConfig::default(),
            default_capacity: DEFAULT_VEHICLE_CAPACITY,
        }
    }
}

impl RideCoreConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let cell = self.grid.cell_size_deg;
        if !(cell.is_finite() && cell > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "grid.cell_size_deg must be positive, got {}",
                cell
            )));
        }
        for (name, value) in [
            ("pricing.base_fare", self.pricing.base_fare),
            ("pricing.rate_per_km", self.pricing.rate_per_km),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        if self.default_capacity == 0 {
            return Err(ConfigError::Invalid(
                "default_capacity must be at least 1".to_string(),
            ));
        }
        if self.directions.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "directions.endpoint must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_grid(mut self, grid: GridBucketer) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_pricing(mut self, pricing: PricingConfig) -> Self {
        self.pricing = pricing;
        self
    }

    pub fn with_directions(mut self, directions: DirectionsConfig) -> Self {
        self.directions = directions;
        self
    }

    pub fn with_default_capacity(mut self, capacity: u32) -> Self {
        self.default_capacity = capacity;
        self
    }
}
