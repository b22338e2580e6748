//! Frame buffer with lazily stacked observations.
use super::{
    store::{EffectStore, FrameStore},
    Element, FrameBufferConfig, FrameTransitionBatch, SampledBatch, StackedObs,
};
use crate::{FrameShape, LazyFrameError, ReplayBufferBase};
use log::{debug, info, trace};
use rand::{rngs::StdRng, Rng, SeedableRng};

#[cfg_attr(doc, aquamarine::aquamarine)]
/// A fixed-capacity replay buffer storing each frame exactly once.
///
/// Frames are stored in a circular arena and identified by monotonically
/// increasing logical indices; the physical slot of index `i` is
/// `i % capacity`. Observations fed to a value function are histories of
/// `history_len` frames, assembled on demand as lists of borrowed slices, so
/// memory stays `O(capacity)` frames regardless of `history_len`.
///
/// Each environment step is stored in two phases:
///
/// ```mermaid
/// graph LR
///     A[store_frame o_t] -->|idx| B[select a_t]
///     B --> C[env step]
///     C -->|r_t, done_t| D[store_effect idx]
///     D --> A
/// ```
///
/// A history never crosses an episode boundary: if the effect of frame `i`
/// is marked done, the history of frame `i + 1` starts at `i + 1` and its
/// older positions are zero padding. The same holds at the first stored
/// frame and at the oldest frame still held in the buffer.
///
/// ```rust
/// use lazyframe_core::FrameBuffer;
///
/// let mut buffer = FrameBuffer::<u8>::new(5, 2).unwrap();
/// let idx = buffer.store_frame(&[0, 0]).unwrap();
/// buffer.store_effect(idx, 1, 0.5, false).unwrap();
/// let idx = buffer.store_frame(&[1, 1]).unwrap();
///
/// let obs = buffer.encode_observation(idx, 2).unwrap();
/// assert_eq!(obs.to_vec(), vec![0, 0, 1, 1]);
/// ```
pub struct FrameBuffer<T: Element = u8> {
    capacity: usize,
    history_len: usize,
    frame_shape: Option<FrameShape>,
    frames: FrameStore<T>,
    effects: EffectStore,

    /// Physical slot the next frame is written to.
    write_cursor: usize,

    /// Number of live frames, at most `capacity`.
    num_filled: usize,

    /// Number of `store_frame` calls so far.
    num_stored: u64,

    rng: StdRng,
}

impl<T: Element> FrameBuffer<T> {
    /// Creates a buffer with the default seed, inferring the frame shape from
    /// the first stored frame.
    pub fn new(capacity: usize, history_len: usize) -> Result<Self, LazyFrameError> {
        Self::with_config(
            &FrameBufferConfig::default()
                .capacity(capacity)
                .history_len(history_len),
        )
    }

    /// Creates a buffer from a configuration.
    ///
    /// A configured frame shape with no elements is ignored.
    pub fn with_config(config: &FrameBufferConfig) -> Result<Self, LazyFrameError> {
        let capacity = config.capacity;
        let history_len = config.history_len;
        if capacity == 0 || history_len == 0 {
            return Err(LazyFrameError::BadCapacity {
                capacity,
                history_len,
            });
        }

        let frame_shape = config.frame_shape.clone().filter(|s| !s.is_empty());
        let frame_len = frame_shape.as_ref().map_or(0, |s| s.len());
        info!(
            "Build frame buffer: capacity = {}, history_len = {}, frame_shape = {:?}",
            capacity, history_len, frame_shape
        );

        Ok(Self {
            capacity,
            history_len,
            frame_shape,
            frames: FrameStore::new(capacity, frame_len),
            effects: EffectStore::new(capacity),
            write_cursor: 0,
            num_filled: 0,
            num_stored: 0,
            rng: StdRng::seed_from_u64(config.seed),
        })
    }

    /// Maximum number of frames held in the buffer.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of frames stacked by [`FrameBuffer::encode_recent_observation`].
    pub fn history_len(&self) -> usize {
        self.history_len
    }

    /// Number of live frames.
    pub fn len(&self) -> usize {
        self.num_filled
    }

    /// Returns `true` if no frame has been stored.
    pub fn is_empty(&self) -> bool {
        self.num_filled == 0
    }

    /// Number of `store_frame` calls so far.
    pub fn num_stored(&self) -> u64 {
        self.num_stored
    }

    /// Physical slot the next frame will be written to.
    pub fn write_cursor(&self) -> usize {
        self.write_cursor
    }

    /// Number of elements of a frame, `0` until it is known.
    pub fn frame_len(&self) -> usize {
        self.frames.frame_len()
    }

    /// Shape of a frame, `None` until it is known.
    pub fn frame_shape(&self) -> Option<&FrameShape> {
        self.frame_shape.as_ref()
    }

    #[inline]
    fn slot(&self, idx: u64) -> usize {
        (idx % self.capacity as u64) as usize
    }

    /// Oldest live logical index.
    #[inline]
    fn oldest(&self) -> u64 {
        self.num_stored - self.num_filled as u64
    }

    /// Returns `true` if `idx` has been written and not overwritten since.
    pub fn is_live(&self, idx: u64) -> bool {
        idx < self.num_stored && idx >= self.oldest()
    }

    fn live_slot(&self, idx: u64) -> Result<usize, LazyFrameError> {
        if self.is_live(idx) {
            Ok(self.slot(idx))
        } else {
            Err(LazyFrameError::StaleIndex {
                idx,
                num_stored: self.num_stored,
                capacity: self.capacity,
            })
        }
    }

    /// Stores a frame and returns its logical index.
    ///
    /// The slot's previous frame and effect, if any, are overwritten. The
    /// effect of the new frame must be stored with
    /// [`FrameBuffer::store_effect`] before the next call.
    pub fn store_frame(&mut self, obs: &[T]) -> Result<u64, LazyFrameError> {
        let slot = self.write_cursor;
        self.frames.write(slot, obs)?;
        self.effects.clear(slot);

        if self.frame_shape.is_none() {
            self.frame_shape = Some(FrameShape::flat(obs.len()));
        }

        let idx = self.num_stored;
        self.write_cursor = (self.write_cursor + 1) % self.capacity;
        self.num_stored += 1;
        if self.num_filled < self.capacity {
            self.num_filled += 1;
        }
        trace!("Stored frame {} in slot {}", idx, slot);

        Ok(idx)
    }

    /// Stores the effect of the action taken after observing frame `idx`.
    pub fn store_effect(
        &mut self,
        idx: u64,
        act: usize,
        reward: f32,
        is_done: bool,
    ) -> Result<(), LazyFrameError> {
        let slot = self.live_slot(idx)?;
        self.effects.write(slot, act, reward, is_done);
        Ok(())
    }

    /// Borrows the frame with logical index `idx`.
    pub fn get_frame(&self, idx: u64) -> Result<&[T], LazyFrameError> {
        let slot = self.live_slot(idx)?;
        Ok(self.frames.read(slot))
    }

    /// Assembles the history of `history_len` frames ending at `idx`.
    ///
    /// Walking back from `idx`, the history stops before the first stored
    /// frame, before frames no longer held in the buffer and before a frame
    /// whose effect ended an episode. The remaining positions are padding.
    pub fn encode_observation(
        &self,
        idx: u64,
        history_len: usize,
    ) -> Result<StackedObs<'_, T>, LazyFrameError> {
        self.live_slot(idx)?;
        let frame_shape = self
            .frame_shape
            .as_ref()
            .ok_or(LazyFrameError::InsufficientData)?;

        let oldest = self.oldest();
        let mut start = idx;
        for _ in 1..history_len {
            if start == oldest || self.effects.is_done(self.slot(start - 1)) {
                break;
            }
            start -= 1;
        }

        let frames = (start..=idx)
            .take(history_len)
            .map(|i| self.frames.read(self.slot(i)))
            .collect::<Vec<_>>();
        let padding = history_len - frames.len();

        Ok(StackedObs::new(frame_shape, padding, frames))
    }

    /// Assembles the history of the most recently stored frame, used to select
    /// the next action.
    pub fn encode_recent_observation(&self) -> Result<StackedObs<'_, T>, LazyFrameError> {
        if self.num_stored == 0 {
            return Err(LazyFrameError::InsufficientData);
        }
        self.encode_observation(self.num_stored - 1, self.history_len)
    }

    /// Returns `true` if a batch of `batch_size` transitions can be sampled.
    pub fn can_sample(&self, batch_size: usize) -> bool {
        self.num_filled > batch_size && self.num_filled >= 2
    }

    /// Draws `batch_size` indices of transitions `(i, i + 1)`, independently
    /// and uniformly from those with both frames live.
    fn sample_indices(&mut self, batch_size: usize) -> Result<Vec<u64>, LazyFrameError> {
        if self.num_stored == 0 {
            return Err(LazyFrameError::InsufficientData);
        }
        if batch_size == 0 || !self.can_sample(batch_size) {
            return Err(LazyFrameError::InvalidBatchSize {
                batch_size,
                num_filled: self.num_filled,
            });
        }

        // The frame at `num_stored - 1` has no successor yet.
        let lo = self.oldest();
        let hi = self.num_stored - 2;
        let ixs = (0..batch_size)
            .map(|_| self.rng.gen_range(lo..=hi))
            .collect::<Vec<_>>();
        debug!("Sampled {} transitions from [{}, {}]", batch_size, lo, hi);

        Ok(ixs)
    }

    /// Samples a batch of transitions.
    ///
    /// Indices are drawn with replacement. Observations of the batch borrow
    /// frames from the buffer.
    pub fn sample(&mut self, batch_size: usize) -> Result<SampledBatch<'_, T>, LazyFrameError> {
        let ixs = self.sample_indices(batch_size)?;
        let this: &Self = self;
        let mut batch = SampledBatch::with_capacity(batch_size);

        for ix in ixs.into_iter() {
            let slot = this.slot(ix);
            batch.obs.push(this.encode_observation(ix, this.history_len)?);
            batch.act.push(this.effects.act(slot));
            batch.reward.push(this.effects.reward(slot));
            batch
                .next_obs
                .push(this.encode_observation(ix + 1, this.history_len)?);
            batch.is_done.push(this.effects.is_done(slot));
            batch.ix_sample.push(ix);
        }

        Ok(batch)
    }
}

impl<T: Element> ReplayBufferBase for FrameBuffer<T> {
    type Config = FrameBufferConfig;
    type Batch = FrameTransitionBatch<T>;

    fn build(config: &Self::Config) -> anyhow::Result<Self> {
        Ok(Self::with_config(config)?)
    }

    fn batch(&mut self, size: usize) -> anyhow::Result<Self::Batch> {
        Ok(self.sample(size)?.materialize())
    }
}
