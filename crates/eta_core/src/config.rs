//! Estimator configuration, read from a JSON file.
//!
//! Every field has a default so a partial file (or none at all) is valid.
//!
//! ```json
//! {
//!   "reference_path": "data/tti.csv",
//!   "hour_multipliers": { "kind": "standard" },
//!   "route_provider": { "kind": "fixture", "path": "data/routes.json" },
//!   "route_cache_capacity": 256,
//!   "request_timeout_secs": 10,
//!   "composition_mode": "day_hour"
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::compose::CompositionMode;
use crate::error::EtaError;
use crate::routing::{RouteProviderKind, DEFAULT_REQUEST_TIMEOUT, DEFAULT_ROUTE_CACHE_CAPACITY};
use crate::traffic::HourMultiplierKind;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// CSV file with the historical travel time indices.
    #[serde(default)]
    pub reference_path: Option<String>,
    #[serde(default)]
    pub hour_multipliers: HourMultiplierKind,
    /// Mapping provider; only needed for full estimates.
    #[serde(default)]
    pub route_provider: Option<RouteProviderKind>,
    #[serde(default = "default_cache_capacity")]
    pub route_cache_capacity: usize,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub composition_mode: CompositionMode,
}

fn default_cache_capacity() -> usize {
    DEFAULT_ROUTE_CACHE_CAPACITY
}

fn default_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT.as_secs()
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            reference_path: None,
            hour_multipliers: HourMultiplierKind::default(),
            route_provider: None,
            route_cache_capacity: default_cache_capacity(),
            request_timeout_secs: default_timeout_secs(),
            composition_mode: CompositionMode::default(),
        }
    }
}

impl EstimatorConfig {
    pub fn from_file(path: &Path) -> Result<Self, EtaError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| EtaError::Config(format!("cannot read {}: {e}", path.display())))?;
        let config: Self = serde_json::from_str(&data)
            .map_err(|e| EtaError::Config(format!("invalid config {}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EtaError> {
        if self.request_timeout_secs == 0 {
            return Err(EtaError::Config(
                "request_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
