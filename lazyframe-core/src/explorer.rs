//! Epsilon-greedy exploration.
use crate::{Schedule, ScheduleConfig};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Epsilon-greedy explorer whose exploration rate follows a [`Schedule`] of
/// environment steps.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct EpsilonGreedy<S = ScheduleConfig> {
    /// Schedule of the probability of taking a random action.
    pub schedule: S,
}

impl<S: Schedule> EpsilonGreedy<S> {
    /// Constructs epsilon-greedy explorer.
    pub fn new(schedule: S) -> Self {
        Self { schedule }
    }

    /// Probability of a random action at step `t`.
    pub fn epsilon(&self, t: usize) -> f64 {
        self.schedule.value(t)
    }

    /// Returns `true` if a random action should be taken at step `t`.
    pub fn explore(&self, t: usize, rng: &mut impl Rng) -> bool {
        rng.gen::<f64>() < self.epsilon(t)
    }

    /// Uniformly random action.
    ///
    /// # Panics
    ///
    /// Panics if `n_actions == 0`.
    pub fn random_action(&self, n_actions: usize, rng: &mut impl Rng) -> usize {
        rng.gen_range(0..n_actions)
    }
}

#[cfg(test)]
mod tests {
    use super::EpsilonGreedy;
    use crate::{ConstantSchedule, LinearSchedule};
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_always_and_never_explore() {
        let mut rng = StdRng::seed_from_u64(0);
        let always = EpsilonGreedy::new(ConstantSchedule::new(1.0));
        let never = EpsilonGreedy::new(ConstantSchedule::new(0.0));
        for t in 0..100 {
            assert!(always.explore(t, &mut rng));
            assert!(!never.explore(t, &mut rng));
        }
    }

    #[test]
    fn test_epsilon_follows_schedule() {
        let explorer = EpsilonGreedy::new(LinearSchedule::new(10, 0.0));
        assert_eq!(explorer.epsilon(0), 1.0);
        assert_eq!(explorer.epsilon(10), 0.0);
    }

    #[test]
    fn test_random_action_range() {
        let mut rng = StdRng::seed_from_u64(0);
        let explorer = EpsilonGreedy::new(ConstantSchedule::new(1.0));
        let acts = (0..1000)
            .map(|_| explorer.random_action(3, &mut rng))
            .collect::<Vec<_>>();
        assert!(acts.iter().all(|&a| a < 3));
        assert!((0..3).all(|a| acts.contains(&a)));
    }
}
