//! Configuration options for the CFR solver.
//!
//! This module provides configuration structs that control the behavior
//! of the traversal: which estimator runs, how the traverser explores its
//! own actions in sampling mode, how the average strategy is weighted, and
//! the seed of the solver's random source.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Which traversal the solver runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalMode {
    /// Chance sampled without weighting, traverser full-width, opponents sampled.
    #[default]
    Vanilla,
    /// Outcome-sampling MCCFR: one sampled trajectory per iteration,
    /// importance-weighted by its sample probability.
    OutcomeSampling,
}

/// Configuration for the CFR solver.
///
/// # Example
/// ```
/// use cfr_poker::cfr::{CFRConfig, TraversalMode};
///
/// let config = CFRConfig::outcome_sampling().with_seed(7);
/// assert_eq!(config.mode, TraversalMode::OutcomeSampling);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CFRConfig {
    /// Traversal estimator.
    pub mode: TraversalMode,

    /// Exploration probability for outcome sampling.
    ///
    /// At the traverser's own nodes the sampling policy mixes this much of a
    /// uniform distribution into the current strategy so every action keeps
    /// being visited. Ignored in vanilla mode.
    ///
    /// Recommended range: 0.3 - 0.6
    pub exploration: f64,

    /// Weight strategy-sum updates by the traverser's own reach probability.
    ///
    /// When false, vanilla mode adds the plain current strategy at every
    /// visit of a traverser-owned node.
    pub reach_weighted_average: bool,

    /// Random seed for reproducibility.
    ///
    /// If set, the solver will use this seed for random number generation,
    /// making results reproducible. If `None`, a random seed is used.
    pub seed: Option<u64>,
}

impl Default for CFRConfig {
    fn default() -> Self {
        Self {
            mode: TraversalMode::Vanilla,
            exploration: 0.6,
            reach_weighted_average: false,
            seed: None,
        }
    }
}

impl CFRConfig {
    /// Create a new CFRConfig with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Vanilla traversal with plain strategy-sum accumulation.
    pub fn vanilla() -> Self {
        Self::default()
    }

    /// Outcome-sampling MCCFR with moderate exploration.
    pub fn outcome_sampling() -> Self {
        Self {
            mode: TraversalMode::OutcomeSampling,
            exploration: 0.6,
            ..Default::default()
        }
    }

    /// Builder method: set the traversal mode.
    pub fn with_mode(mut self, mode: TraversalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Builder method: set exploration probability.
    pub fn with_exploration(mut self, exploration: f64) -> Self {
        self.exploration = exploration.clamp(0.0, 1.0);
        self
    }

    /// Builder method: weight the average strategy by own reach.
    pub fn with_reach_weighted_average(mut self, enable: bool) -> Self {
        self.reach_weighted_average = enable;
        self
    }

    /// Builder method: set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_json_str(&content)
    }

    /// Parse a configuration from a JSON string. Missing fields take their
    /// defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.exploration) {
            return Err(ConfigError::InvalidExploration(self.exploration));
        }
        Ok(())
    }
}

/// Errors that can occur when loading or validating CFR configuration.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Exploration probability is out of range [0, 1].
    #[error("exploration probability {0} is out of range [0, 1]")]
    InvalidExploration(f64),
    /// Config file could not be read.
    #[error("IO error: {0}")]
    Io(String),
    /// Config file is not valid JSON for this struct.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Statistics tracked during CFR training.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CFRStats {
    /// Total number of iterations completed.
    pub iterations: u64,

    /// Number of unique information sets discovered.
    pub info_sets: usize,

    /// Total time spent training (in seconds).
    pub elapsed_seconds: f64,

    /// Iterations per second.
    pub iterations_per_second: f64,

    /// Value returned by the most recent traversal, for its target player.
    pub last_value: f64,
}

impl CFRStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update iterations per second based on elapsed time.
    pub fn update_rate(&mut self) {
        if self.elapsed_seconds > 0.0 {
            self.iterations_per_second = self.iterations as f64 / self.elapsed_seconds;
        }
    }
}
