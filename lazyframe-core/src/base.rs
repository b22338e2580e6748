//! Core interfaces between the buffer and its collaborators.
mod env;
mod policy;
mod replay_buffer;
mod step;
pub use env::Env;
pub use policy::Policy;
pub use replay_buffer::ReplayBufferBase;
pub use step::Step;
