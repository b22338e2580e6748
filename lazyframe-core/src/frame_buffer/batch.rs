//! Batches of transitions sampled from [`FrameBuffer`](super::FrameBuffer).
use super::{Element, StackedObs};

/// A batch of transitions `(o_t, a_t, r_t, o_t+1, done_t)` whose observations
/// borrow frames from the buffer.
///
/// The batch keeps the buffer borrowed; call [`SampledBatch::materialize`] to
/// obtain a [`FrameTransitionBatch`] owning its data.
#[derive(Debug, Clone)]
pub struct SampledBatch<'a, T> {
    /// Stacked observations at time `t`.
    pub obs: Vec<StackedObs<'a, T>>,

    /// Actions taken after observing `obs`.
    pub act: Vec<usize>,

    /// Rewards received for `act`.
    pub reward: Vec<f32>,

    /// Stacked observations at time `t + 1`.
    pub next_obs: Vec<StackedObs<'a, T>>,

    /// Whether `act` ended the episode.
    pub is_done: Vec<bool>,

    /// Logical indices of the sampled transitions.
    pub ix_sample: Vec<u64>,
}

impl<'a, T: Element> SampledBatch<'a, T> {
    pub(super) fn with_capacity(capacity: usize) -> Self {
        Self {
            obs: Vec::with_capacity(capacity),
            act: Vec::with_capacity(capacity),
            reward: Vec::with_capacity(capacity),
            next_obs: Vec::with_capacity(capacity),
            is_done: Vec::with_capacity(capacity),
            ix_sample: Vec::with_capacity(capacity),
        }
    }

    /// Number of transitions in the batch.
    pub fn len(&self) -> usize {
        self.reward.len()
    }

    /// Returns `true` if the batch holds no transitions.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copies the stacked observations into contiguous tensors.
    pub fn materialize(&self) -> FrameTransitionBatch<T> {
        let mut obs_shape = vec![self.len()];
        if let Some(o) = self.obs.first() {
            obs_shape.extend(o.shape().dims);
        }

        FrameTransitionBatch {
            obs: concat(&self.obs),
            act: self.act.clone(),
            next_obs: concat(&self.next_obs),
            reward: self.reward.clone(),
            is_done: self.is_done.iter().map(|&d| d as i8).collect(),
            ix_sample: self.ix_sample.clone(),
            obs_shape,
        }
    }
}

fn concat<T: Element>(obs: &[StackedObs<'_, T>]) -> Vec<T> {
    let len = obs.iter().map(|o| o.materialized_len()).sum();
    let mut out = vec![T::zero(); len];
    let mut offset = 0;
    for o in obs.iter() {
        let n = o.materialized_len();
        o.write_to(&mut out[offset..offset + n]);
        offset += n;
    }
    out
}

/// A batch of transitions owning contiguous observation tensors.
///
/// `obs` and `next_obs` are row-major tensors of shape `obs_shape`, i.e.
/// `[batch_size, stacked frame shape...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameTransitionBatch<T> {
    /// Observations at time `t`.
    pub obs: Vec<T>,

    /// Actions.
    pub act: Vec<usize>,

    /// Observations at time `t + 1`.
    pub next_obs: Vec<T>,

    /// Rewards.
    pub reward: Vec<f32>,

    /// Episode end flags, `1` if the action ended the episode.
    pub is_done: Vec<i8>,

    /// Logical indices of the sampled transitions.
    pub ix_sample: Vec<u64>,

    /// Shape of `obs` and `next_obs`.
    pub obs_shape: Vec<usize>,
}

impl<T> FrameTransitionBatch<T> {
    /// Number of transitions in the batch.
    pub fn len(&self) -> usize {
        self.reward.len()
    }

    /// Returns `true` if the batch holds no transitions.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Unpacks the data `(o_t, a_t, r_t, o_t+1, is_done_t)`.
    pub fn unpack(self) -> (Vec<T>, Vec<usize>, Vec<f32>, Vec<T>, Vec<i8>) {
        (self.obs, self.act, self.reward, self.next_obs, self.is_done)
    }
}
