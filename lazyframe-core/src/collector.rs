//! Collects transitions from an environment into a [`FrameBuffer`].
mod config;
use crate::{Env, EpsilonGreedy, FrameBuffer, Policy, Schedule, Step};
use anyhow::Result;
pub use config::CollectorConfig;
use log::info;
use rand::Rng;
use std::collections::VecDeque;

/// Counters of the training loop.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectorState {
    /// Environment steps taken so far.
    pub env_steps: usize,

    /// Finished episodes.
    pub n_episodes: usize,

    /// Return of the running episode.
    pub episode_return: f32,

    /// Set once the first optimization step is done. Until then actions are random.
    pub model_initialized: bool,

    /// Optimization steps taken so far.
    pub num_param_updates: usize,

    /// Mean return of recent episodes, once enough episodes have finished.
    pub mean_episode_return: Option<f32>,

    /// Best value of `mean_episode_return` so far.
    pub best_mean_episode_return: Option<f32>,
}

/// Interacts with an environment and stores every step in a [`FrameBuffer`].
///
/// Each call of [`Collector::collect_step`] does the following:
///
/// 1. Store the last observation with [`FrameBuffer::store_frame`].
/// 2. Select an action: a random one if the explorer says so or the model is
///    not initialized yet, otherwise the policy's action for
///    [`FrameBuffer::encode_recent_observation`].
/// 3. Step the environment and store the effect with
///    [`FrameBuffer::store_effect`].
/// 4. If the episode ended, reset the environment.
///
/// The optimization step itself is left to the caller, which asks
/// [`Collector::should_learn`] whether to take one.
pub struct Collector<E: Env> {
    env: E,
    config: CollectorConfig,
    last_obs: Option<Vec<E::Elem>>,
    state: CollectorState,
    recent_returns: VecDeque<f32>,
}

impl<E: Env> Collector<E> {
    /// Creates a collector.
    pub fn new(env: E, config: CollectorConfig) -> Self {
        let recent_returns = VecDeque::with_capacity(config.n_recent_episodes);
        Self {
            env,
            config,
            last_obs: None,
            state: CollectorState::default(),
            recent_returns,
        }
    }

    /// Counters of the training loop.
    pub fn state(&self) -> &CollectorState {
        &self.state
    }

    /// Configuration.
    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// The environment.
    pub fn env(&self) -> &E {
        &self.env
    }

    /// Takes an environment step and stores it in `buffer`.
    pub fn collect_step<P, S, R>(
        &mut self,
        buffer: &mut FrameBuffer<E::Elem>,
        explorer: &EpsilonGreedy<S>,
        policy: &mut P,
        rng: &mut R,
    ) -> Result<Step<E>>
    where
        P: Policy<E>,
        S: Schedule,
        R: Rng,
    {
        let obs = match self.last_obs.take() {
            Some(obs) => obs,
            None => self.env.reset()?,
        };
        let stored = buffer.store_frame(&obs);
        self.last_obs = Some(obs);
        let idx = stored?;

        let t = self.state.env_steps;
        let explore = explorer.explore(t, rng);
        let act = if explore || !self.state.model_initialized {
            explorer.random_action(self.env.n_actions(), rng)
        } else {
            let obs = buffer.encode_recent_observation()?;
            policy.sample(&obs)
        };

        let step = self.env.step(act)?;
        let is_done = step.is_done();
        buffer.store_effect(idx, act, step.reward, is_done)?;
        self.state.episode_return += step.reward;

        self.last_obs = if is_done {
            self.finish_episode();
            Some(self.env.reset()?)
        } else {
            Some(step.obs.clone())
        };
        self.state.env_steps += 1;

        if self.state.model_initialized && t % self.config.log_interval.max(1) == 0 {
            self.log_progress(t, explorer.epsilon(t));
        }

        Ok(step)
    }

    fn finish_episode(&mut self) {
        let n = self.config.n_recent_episodes;
        if n > 0 && self.recent_returns.len() == n {
            self.recent_returns.pop_front();
        }
        if n > 0 {
            self.recent_returns.push_back(self.state.episode_return);
        }
        self.state.n_episodes += 1;
        self.state.episode_return = 0.0;

        if n > 0 && self.state.n_episodes > n {
            let mean = self.recent_returns.iter().sum::<f32>() / n as f32;
            self.state.mean_episode_return = Some(mean);
            self.state.best_mean_episode_return = Some(
                self.state
                    .best_mean_episode_return
                    .map_or(mean, |best| best.max(mean)),
            );
        }
    }

    fn log_progress(&self, t: usize, epsilon: f64) {
        info!(
            "Timestep: {}, mean return ({} ep): {:?}, best mean return: {:?}, episodes: {}, exploration: {}",
            t,
            self.config.n_recent_episodes,
            self.state.mean_episode_return,
            self.state.best_mean_episode_return,
            self.state.n_episodes,
            epsilon
        );
    }

    /// Returns `true` if an optimization step should be taken now.
    pub fn should_learn(&self, buffer: &FrameBuffer<E::Elem>) -> bool {
        let t = self.state.env_steps;
        t > self.config.learning_starts
            && t % self.config.learning_freq.max(1) == 0
            && buffer.can_sample(self.config.batch_size)
    }

    /// Marks the model as initialized, after which the policy is consulted.
    pub fn mark_model_initialized(&mut self) {
        if !self.state.model_initialized {
            info!("Model is ready for training");
            self.state.model_initialized = true;
        }
    }

    /// Counts an optimization step and returns the number of them so far.
    pub fn add_param_update(&mut self) -> usize {
        self.state.num_param_updates += 1;
        self.state.num_param_updates
    }

    /// Returns `true` if the target network should be updated after the
    /// latest optimization step.
    pub fn is_target_update_step(&self) -> bool {
        let n = self.state.num_param_updates;
        n > 0 && n % self.config.target_update_freq.max(1) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::{Collector, CollectorConfig};
    use crate::{
        dummy::{CountingEnv, CountingEnvConfig, FixedPolicy},
        ConstantSchedule, Env, EpsilonGreedy, FrameBuffer,
    };
    use rand::{rngs::StdRng, SeedableRng};

    fn collector(episode_len: usize, config: CollectorConfig) -> Collector<CountingEnv> {
        let env_config = CountingEnvConfig {
            episode_len,
            frame_len: 2,
            n_actions: 3,
        };
        Collector::new(CountingEnv::build(&env_config, 0).unwrap(), config)
    }

    #[test]
    fn test_collect_stores_episode_boundaries() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut rng = StdRng::seed_from_u64(0);
        let mut buffer = FrameBuffer::<u8>::new(100, 4).unwrap();
        let explorer = EpsilonGreedy::new(ConstantSchedule::new(1.0));
        let mut policy = FixedPolicy::new(0);
        let mut collector = collector(3, CollectorConfig::default().n_recent_episodes(1));

        for _ in 0..7 {
            collector
                .collect_step(&mut buffer, &explorer, &mut policy, &mut rng)
                .unwrap();
        }

        // Terminal frames 3 and 7 are never stored.
        assert_eq!(buffer.num_stored(), 7);
        assert_eq!(buffer.get_frame(3).unwrap(), &[4, 4]);
        assert_eq!(collector.state().n_episodes, 2);
        assert_eq!(collector.state().env_steps, 7);
        assert_eq!(collector.state().mean_episode_return, Some(3.0));

        // The history of the first frame of the second episode is padded.
        let obs = buffer.encode_observation(3, 4).unwrap();
        assert_eq!(obs.padding(), 3);
        assert_eq!(policy.n_calls, 0);
    }

    #[test]
    fn test_policy_used_after_initialization() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut buffer = FrameBuffer::<u8>::new(10, 2).unwrap();
        let explorer = EpsilonGreedy::new(ConstantSchedule::new(0.0));
        let mut policy = FixedPolicy::new(2);
        let mut collector = collector(100, CollectorConfig::default());

        collector.mark_model_initialized();
        for _ in 0..5 {
            let step = collector
                .collect_step(&mut buffer, &explorer, &mut policy, &mut rng)
                .unwrap();
            assert_eq!(step.act, 2);
        }
        assert_eq!(policy.n_calls, 5);
    }

    #[test]
    fn test_should_learn() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut buffer = FrameBuffer::<u8>::new(10, 2).unwrap();
        let explorer = EpsilonGreedy::new(ConstantSchedule::new(1.0));
        let mut policy = FixedPolicy::new(0);
        let config = CollectorConfig::default()
            .learning_starts(4)
            .learning_freq(2)
            .batch_size(3);
        let mut collector = collector(100, config);

        let mut learn_steps = vec![];
        for _ in 0..10 {
            collector
                .collect_step(&mut buffer, &explorer, &mut policy, &mut rng)
                .unwrap();
            if collector.should_learn(&buffer) {
                learn_steps.push(collector.state().env_steps);
            }
        }
        assert_eq!(learn_steps, vec![6, 8, 10]);
    }

    #[test]
    fn test_target_update_step() {
        let mut collector = collector(10, CollectorConfig::default().target_update_freq(2));
        assert!(!collector.is_target_update_step());
        collector.add_param_update();
        assert!(!collector.is_target_update_step());
        assert_eq!(collector.add_param_update(), 2);
        assert!(collector.is_target_update_step());
    }
}
