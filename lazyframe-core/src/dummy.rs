//! Deterministic environment and policy used in tests.
use crate::{Env, Policy, StackedObs, Step};
use anyhow::Result;

/// Configuration of [`CountingEnv`].
#[derive(Clone, Debug)]
pub struct CountingEnvConfig {
    /// Number of steps of an episode.
    pub episode_len: usize,

    /// Number of elements of a frame.
    pub frame_len: usize,

    /// Number of actions.
    pub n_actions: usize,
}

impl Default for CountingEnvConfig {
    fn default() -> Self {
        Self {
            episode_len: 5,
            frame_len: 4,
            n_actions: 2,
        }
    }
}

/// Environment emitting frames filled with a running frame counter.
///
/// Every step yields reward 1 and episodes terminate after `episode_len`
/// steps.
pub struct CountingEnv {
    config: CountingEnvConfig,
    n_frames: usize,
    n_steps_in_episode: usize,
}

impl CountingEnv {
    fn next_frame(&mut self) -> Vec<u8> {
        let frame = vec![(self.n_frames % 256) as u8; self.config.frame_len];
        self.n_frames += 1;
        frame
    }
}

impl Env for CountingEnv {
    type Config = CountingEnvConfig;
    type Elem = u8;

    fn build(config: &Self::Config, _seed: i64) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            n_frames: 0,
            n_steps_in_episode: 0,
        })
    }

    fn n_actions(&self) -> usize {
        self.config.n_actions
    }

    fn reset(&mut self) -> Result<Vec<u8>> {
        self.n_steps_in_episode = 0;
        Ok(self.next_frame())
    }

    fn step(&mut self, act: usize) -> Result<Step<Self>> {
        self.n_steps_in_episode += 1;
        let is_terminated = self.n_steps_in_episode >= self.config.episode_len;
        let obs = self.next_frame();
        Ok(Step::new(act, obs, 1.0, is_terminated, false))
    }
}

/// Policy always taking the same action.
pub struct FixedPolicy {
    /// The action.
    pub act: usize,

    /// Number of calls of [`Policy::sample`].
    pub n_calls: usize,
}

impl FixedPolicy {
    /// Creates a policy taking `act`.
    pub fn new(act: usize) -> Self {
        Self { act, n_calls: 0 }
    }
}

impl<E: Env> Policy<E> for FixedPolicy {
    fn sample(&mut self, _obs: &StackedObs<'_, E::Elem>) -> usize {
        self.n_calls += 1;
        self.act
    }
}
