#![warn(missing_docs)]
//! Memory-efficient replay buffer for reinforcement learning on frame sequences.
//!
//! [`FrameBuffer`] stores each observed frame once in a fixed-capacity
//! circular arena and assembles histories of the last few frames on demand,
//! without mixing frames of different episodes. Around it, the crate provides
//! the pieces of a DQN-style training loop that touch the buffer:
//! [`Schedule`]s, an [`EpsilonGreedy`] explorer and a [`Collector`] driving an
//! [`Env`].
pub mod dummy;
pub mod error;
pub mod frame_buffer;
pub mod schedule;

mod base;
pub use base::{Env, Policy, ReplayBufferBase, Step};

mod collector;
pub use collector::{Collector, CollectorConfig, CollectorState};

mod explorer;
pub use explorer::EpsilonGreedy;

mod shape;
pub use shape::FrameShape;

pub use error::LazyFrameError;
pub use frame_buffer::{
    Element, FrameBuffer, FrameBufferConfig, FrameTransitionBatch, SampledBatch, StackedObs,
};
pub use schedule::{ConstantSchedule, LinearSchedule, PiecewiseSchedule, Schedule, ScheduleConfig};
