use crate::{
    error::{DeskError, DeskResult},
    name_generator::DEFAULT_SEED_NAMES,
    store::MAX_BORROWERS,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Simulated network round-trip per query, in milliseconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LatencyConfig {
    pub list_ms:      u64,
    pub get_ms:       u64,
    pub analytics_ms: u64,
}

impl LatencyConfig {
    pub fn none() -> Self {
        Self { list_ms: 0, get_ms: 0, analytics_ms: 0 }
    }

    pub fn list(&self) -> Duration      { Duration::from_millis(self.list_ms) }
    pub fn get(&self) -> Duration       { Duration::from_millis(self.get_ms) }
    pub fn analytics(&self) -> Duration { Duration::from_millis(self.analytics_ms) }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self { list_ms: 500, get_ms: 300, analytics_ms: 400 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeskConfig {
    /// Master seed for every random stream.
    pub seed: u64,
    /// One borrower per name, in order.
    pub seed_names: Vec<String>,
    /// When set, replaces `seed_names` with a generated roster of this size.
    pub population: Option<usize>,
    pub latency: LatencyConfig,
    /// Period of the detail-view status feed.
    pub status_tick_ms: u64,
    /// How many history entries a detail view shows.
    pub history_display_limit: usize,
    /// Months covered by the analytics filler series.
    pub trailing_months: u32,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            seed_names: DEFAULT_SEED_NAMES.iter().map(|n| n.to_string()).collect(),
            population: None,
            latency: LatencyConfig::default(),
            status_tick_ms: 3_000,
            history_display_limit: 5,
            trailing_months: 6,
        }
    }
}

impl DeskConfig {
    /// Reference values with latency switched off.
    /// In tests that measure latency, use default() under a paused clock.
    pub fn default_test() -> Self {
        Self { latency: LatencyConfig::none(), ..Self::default() }
    }

    /// Load from a JSON file. Missing fields take their defaults.
    pub fn load(path: &str) -> DeskResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: DeskConfig = serde_json::from_str(&content)?;
        config.validate()?;
        log::info!("config: loaded {path} (seed={})", config.seed);
        Ok(config)
    }

    pub fn validate(&self) -> DeskResult<()> {
        if self.status_tick_ms == 0 {
            return Err(DeskError::Config { reason: "status_tick_ms must be > 0".into() });
        }
        if self.seed_names.iter().any(|n| n.trim().is_empty()) {
            return Err(DeskError::Config { reason: "seed_names contains a blank name".into() });
        }
        if self.population.is_none() && self.seed_names.len() > MAX_BORROWERS {
            return Err(DeskError::Config {
                reason: format!("{} names exceed the LOAN-NNNN range", self.seed_names.len()),
            });
        }
        if self.population.is_some_and(|n| n > MAX_BORROWERS) {
            return Err(DeskError::Config { reason: "population exceeds the LOAN-NNNN range".into() });
        }
        Ok(())
    }

    pub fn status_tick(&self) -> Duration {
        Duration::from_millis(self.status_tick_ms)
    }
}
