//! Environment.
use super::Step;
use crate::frame_buffer::Element;
use anyhow::Result;

/// Represents an environment with a discrete action space, typically an MDP.
///
/// Observations are single frames; stacking them into histories is the job
/// of [`FrameBuffer`](crate::FrameBuffer).
pub trait Env {
    /// Configurations.
    type Config: Clone;

    /// Element type of observed frames.
    type Elem: Element;

    /// Builds an environment with a given random seed.
    fn build(config: &Self::Config, seed: i64) -> Result<Self>
    where
        Self: Sized;

    /// Number of discrete actions.
    fn n_actions(&self) -> usize;

    /// Resets the environment and returns the initial frame.
    fn reset(&mut self) -> Result<Vec<Self::Elem>>;

    /// Performes an environment step.
    fn step(&mut self, act: usize) -> Result<Step<Self>>
    where
        Self: Sized;
}
