//! Configuration of [`Collector`](super::Collector).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`Collector`](super::Collector).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct CollectorConfig {
    /// Environment steps before the first optimization step.
    pub learning_starts: usize,

    /// Interval of optimization steps in environment steps.
    pub learning_freq: usize,

    /// Number of transitions in a batch.
    pub batch_size: usize,

    /// Interval of updating the target network in optimization steps.
    pub target_update_freq: usize,

    /// Interval of logging progress in environment steps.
    pub log_interval: usize,

    /// Number of recent episodes averaged for the mean episode return.
    pub n_recent_episodes: usize,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            learning_starts: 50_000,
            learning_freq: 4,
            batch_size: 32,
            target_update_freq: 10_000,
            log_interval: 10_000,
            n_recent_episodes: 100,
        }
    }
}

impl CollectorConfig {
    /// Sets the number of environment steps before optimization starts.
    pub fn learning_starts(mut self, v: usize) -> Self {
        self.learning_starts = v;
        self
    }

    /// Sets the interval of optimization in environment steps.
    pub fn learning_freq(mut self, v: usize) -> Self {
        self.learning_freq = v;
        self
    }

    /// Sets the batch size.
    pub fn batch_size(mut self, v: usize) -> Self {
        self.batch_size = v;
        self
    }

    /// Sets the interval of updating the target network in optimization steps.
    pub fn target_update_freq(mut self, v: usize) -> Self {
        self.target_update_freq = v;
        self
    }

    /// Sets the interval of logging in environment steps.
    pub fn log_interval(mut self, v: usize) -> Self {
        self.log_interval = v;
        self
    }

    /// Sets the number of episodes averaged for the mean episode return.
    pub fn n_recent_episodes(mut self, v: usize) -> Self {
        self.n_recent_episodes = v;
        self
    }

    /// Constructs [`CollectorConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`CollectorConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
