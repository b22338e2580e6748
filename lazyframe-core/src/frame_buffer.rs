//! Replay buffer storing frames once and stacking them lazily.
//!
//! Atari-style agents feed their value function a history of the last few
//! frames. Storing that history per transition multiplies memory by the
//! history length; [`FrameBuffer`] instead stores every frame once and
//! assembles histories as borrowed views ([`StackedObs`]) when they are
//! requested.
//!
//! # Key Components
//!
//! - [`FrameBuffer`]: the circular frame and effect store with the sampler
//! - [`StackedObs`]: a history of frames borrowed from the buffer
//! - [`SampledBatch`]: a batch of transitions with borrowed observations
//! - [`FrameTransitionBatch`]: a batch owning contiguous observation tensors
//! - [`FrameBufferConfig`]: configuration of the buffer
mod base;
mod batch;
mod config;
mod history;
mod store;
pub use base::FrameBuffer;
pub use batch::{FrameTransitionBatch, SampledBatch};
pub use config::FrameBufferConfig;
pub use history::StackedObs;
pub use store::Element;
