//! Configuration of [`FrameBuffer`](super::FrameBuffer).
use crate::FrameShape;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    default::Default,
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`FrameBuffer`](super::FrameBuffer).
///
/// ```rust
/// use lazyframe_core::{FrameBufferConfig, FrameShape};
///
/// let config = FrameBufferConfig::default()
///     .capacity(100_000)
///     .history_len(4)
///     .frame_shape(Some(FrameShape::new([84, 84, 1])))
///     .seed(0);
/// ```
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct FrameBufferConfig {
    /// Maximum number of frames held in the buffer.
    pub capacity: usize,

    /// Number of frames stacked into an observation.
    pub history_len: usize,

    /// Shape of a frame. If `None`, the first stored frame fixes a flat shape.
    pub frame_shape: Option<FrameShape>,

    /// Random seed used for sampling transitions.
    pub seed: u64,
}

impl Default for FrameBufferConfig {
    fn default() -> Self {
        Self {
            capacity: 1_000_000,
            history_len: 4,
            frame_shape: None,
            seed: 42,
        }
    }
}

impl FrameBufferConfig {
    /// Sets the capacity of the buffer.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the number of stacked frames.
    pub fn history_len(mut self, history_len: usize) -> Self {
        self.history_len = history_len;
        self
    }

    /// Sets the shape of a frame.
    pub fn frame_shape(mut self, frame_shape: Option<FrameShape>) -> Self {
        self.frame_shape = frame_shape;
        self
    }

    /// Sets the random seed for sampling.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Loads [`FrameBufferConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`FrameBufferConfig`] as YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
