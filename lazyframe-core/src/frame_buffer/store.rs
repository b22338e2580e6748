//! Arenas backing the frame buffer.
use crate::LazyFrameError;
use log::info;
use num_traits::Zero;
use std::fmt::Debug;

/// Element type of frames, e.g. `u8` for pixels or `f32` for low-dimensional states.
pub trait Element: Copy + Zero + Debug + PartialEq + 'static {}

impl<T> Element for T where T: Copy + Zero + Debug + PartialEq + 'static {}

/// Contiguous arena of `capacity` frames.
///
/// The arena is allocated when the first frame arrives, so the frame length
/// may be inferred from that frame.
pub(super) struct FrameStore<T> {
    capacity: usize,
    frame_len: usize,
    data: Vec<T>,
}

impl<T: Element> FrameStore<T> {
    /// `frame_len == 0` means the length is taken from the first frame.
    pub(super) fn new(capacity: usize, frame_len: usize) -> Self {
        Self {
            capacity,
            frame_len,
            data: Vec::new(),
        }
    }

    pub(super) fn frame_len(&self) -> usize {
        self.frame_len
    }

    pub(super) fn is_allocated(&self) -> bool {
        !self.data.is_empty()
    }

    /// Copies `obs` into `slot`.
    pub(super) fn write(&mut self, slot: usize, obs: &[T]) -> Result<(), LazyFrameError> {
        if self.frame_len == 0 {
            if obs.is_empty() {
                return Err(LazyFrameError::FrameShapeMismatch {
                    expected: 1,
                    actual: 0,
                });
            }
            self.frame_len = obs.len();
        }

        if obs.len() != self.frame_len {
            return Err(LazyFrameError::FrameShapeMismatch {
                expected: self.frame_len,
                actual: obs.len(),
            });
        }

        if !self.is_allocated() {
            info!(
                "Allocate frame arena: {} frames x {} elements",
                self.capacity, self.frame_len
            );
            self.data = vec![T::zero(); self.capacity * self.frame_len];
        }

        let offset = slot * self.frame_len;
        self.data[offset..offset + self.frame_len].copy_from_slice(obs);
        Ok(())
    }

    /// Borrows the frame in `slot`. The arena must have been allocated.
    #[inline]
    pub(super) fn read(&self, slot: usize) -> &[T] {
        let offset = slot * self.frame_len;
        &self.data[offset..offset + self.frame_len]
    }
}

/// Parallel arrays of the effects of actions taken after each frame.
pub(super) struct EffectStore {
    act: Vec<usize>,
    reward: Vec<f32>,
    is_done: Vec<bool>,
}

impl EffectStore {
    pub(super) fn new(capacity: usize) -> Self {
        Self {
            act: vec![0; capacity],
            reward: vec![0.; capacity],
            is_done: vec![false; capacity],
        }
    }

    /// Forgets the effect of the previous occupant of `slot`.
    pub(super) fn clear(&mut self, slot: usize) {
        self.write(slot, 0, 0., false);
    }

    pub(super) fn write(&mut self, slot: usize, act: usize, reward: f32, is_done: bool) {
        self.act[slot] = act;
        self.reward[slot] = reward;
        self.is_done[slot] = is_done;
    }

    #[inline]
    pub(super) fn act(&self, slot: usize) -> usize {
        self.act[slot]
    }

    #[inline]
    pub(super) fn reward(&self, slot: usize) -> f32 {
        self.reward[slot]
    }

    #[inline]
    pub(super) fn is_done(&self, slot: usize) -> bool {
        self.is_done[slot]
    }
}

#[cfg(test)]
mod tests {
    use super::{EffectStore, FrameStore};
    use crate::LazyFrameError;

    #[test]
    fn test_frame_store_infers_len() {
        let mut store = FrameStore::<u8>::new(3, 0);
        assert!(!store.is_allocated());
        store.write(1, &[1, 2]).unwrap();
        assert!(store.is_allocated());
        assert_eq!(store.frame_len(), 2);
        assert_eq!(store.read(1), &[1, 2]);
        assert_eq!(store.read(0), &[0, 0]);
        assert_eq!(
            store.write(2, &[1, 2, 3]),
            Err(LazyFrameError::FrameShapeMismatch {
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn test_frame_store_rejects_empty_frame() {
        let mut store = FrameStore::<f32>::new(3, 0);
        assert!(store.write(0, &[]).is_err());
        assert!(!store.is_allocated());
    }

    #[test]
    fn test_effect_store_clear() {
        let mut effects = EffectStore::new(2);
        effects.write(1, 3, 1.5, true);
        assert_eq!(effects.act(1), 3);
        assert_eq!(effects.reward(1), 1.5);
        assert!(effects.is_done(1));
        effects.clear(1);
        assert!(!effects.is_done(1));
        assert_eq!(effects.act(1), 0);
    }
}
