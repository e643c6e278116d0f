// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Engine configuration loaded from TOML.
//!
//! ```toml
//! max_rounds = 5
//! restarts = 16
//! round_attempts = 8
//! seed = 42
//! unseated_policy = "allow_repeat"
//! strategy = "greedy"
//! time_limit_ms = 2000
//! ```
//!
//! Every key is optional. `EngineConfig::run` turns a configuration into a
//! strategy, a random source and a monitor stack, and runs the engine.

use crate::{
    engine::AllocationEngine,
    error::EngineError,
    monitor::{composite::CompositeMonitor, log::LogMonitor, time_limit::TimeLimitMonitor},
    policy::UnseatedPolicy,
    result::AllocationOutcome,
    strategy::{
        greedy::{DEFAULT_ROUND_ATTEMPTS, GreedyStrategy},
        rotation::RotationStrategy,
    },
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use roundtable_model::model::{Model, ParticipantId};
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;

/// Reruns allowed after an incomplete run unless configured otherwise.
pub const DEFAULT_RESTARTS: usize = 16;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    #[default]
    Greedy,
    Rotation,
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyKind::Greedy => write!(f, "greedy"),
            StrategyKind::Rotation => write!(f, "rotation"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Round cap. Defaults to the table count of the model.
    pub max_rounds: Option<usize>,
    pub restarts: usize,
    /// Shuffles drafted per round by the greedy strategy.
    pub round_attempts: usize,
    /// Seed for the random source. Drawn from the OS when absent.
    pub seed: Option<u64>,
    pub unseated_policy: UnseatedPolicy,
    pub strategy: StrategyKind,
    pub time_limit_ms: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_rounds: None,
            restarts: DEFAULT_RESTARTS,
            round_attempts: DEFAULT_ROUND_ATTEMPTS,
            seed: None,
            unseated_policy: UnseatedPolicy::default(),
            strategy: StrategyKind::default(),
            time_limit_ms: None,
        }
    }
}

impl EngineConfig {
    /// Parses and validates a TOML configuration.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML configuration file.
    pub fn load<A>(path: A) -> Result<Self, ConfigError>
    where
        A: AsRef<Path>,
    {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_rounds == Some(0) {
            return Err(ConfigError::Invalid(
                "max_rounds must be at least 1".to_string(),
            ));
        }
        if self.round_attempts == 0 {
            return Err(ConfigError::Invalid(
                "round_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the engine described by this configuration.
    pub fn engine(&self) -> AllocationEngine {
        AllocationEngine::builder()
            .with_policy(self.unseated_policy)
            .with_restarts(self.restarts)
            .build()
    }

    fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }

    /// Runs the configured strategy on `model` with a logging monitor and,
    /// if set, a time limit.
    pub fn run<P>(&self, model: &Model<P>) -> Result<AllocationOutcome<P>, EngineError>
    where
        P: ParticipantId,
    {
        let mut monitor = CompositeMonitor::with_capacity(2);
        if let Some(ms) = self.time_limit_ms {
            monitor.add_monitor(TimeLimitMonitor::with_default_check_interval(
                Duration::from_millis(ms),
            ));
        }
        monitor.add_monitor(LogMonitor::new());

        let engine = self.engine();
        match self.strategy {
            StrategyKind::Greedy => {
                let mut strategy = GreedyStrategy::new(self.rng()).with_attempts(self.round_attempts);
                engine.allocate(model, &mut strategy, &mut monitor, self.max_rounds)
            }
            StrategyKind::Rotation => {
                engine.allocate(model, &mut RotationStrategy::new(), &mut monitor, self.max_rounds)
            }
        }
    }
}
