//! Policy.
use super::Env;
use crate::StackedObs;

/// A policy on an environment.
///
/// Maps a history of frames to an action, typically the greedy action of a
/// value function approximator.
pub trait Policy<E: Env> {
    /// Sample an action given a stacked observation.
    fn sample(&mut self, obs: &StackedObs<'_, E::Elem>) -> usize;
}
