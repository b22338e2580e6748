//! Stacked observations assembled from borrowed frames.
use super::Element;
use crate::FrameShape;

/// A history of `len()` frames, oldest first, borrowed from the frame arena.
///
/// Positions that could not be filled, because the history would reach before
/// the first stored frame, into overwritten slots or across an episode
/// boundary, are zero padding. Padding always occupies the oldest positions.
///
/// No frame data is copied until [`StackedObs::write_to`] or
/// [`StackedObs::to_vec`] is called.
#[derive(Debug, Clone, PartialEq)]
pub struct StackedObs<'a, T> {
    frame_shape: &'a FrameShape,
    padding: usize,
    frames: Vec<&'a [T]>,
}

impl<'a, T: Element> StackedObs<'a, T> {
    pub(super) fn new(frame_shape: &'a FrameShape, padding: usize, frames: Vec<&'a [T]>) -> Self {
        Self {
            frame_shape,
            padding,
            frames,
        }
    }

    /// Number of positions in the history, including padding.
    pub fn len(&self) -> usize {
        self.padding + self.frames.len()
    }

    /// Returns `true` if the history has no positions.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of zero-padded positions at the start of the history.
    pub fn padding(&self) -> usize {
        self.padding
    }

    /// Frame at position `k` (0 is the oldest), or `None` for padding.
    pub fn frame(&self, k: usize) -> Option<&'a [T]> {
        if k < self.padding {
            None
        } else {
            self.frames.get(k - self.padding).copied()
        }
    }

    /// The most recent frame.
    pub fn latest(&self) -> Option<&'a [T]> {
        self.frames.last().copied()
    }

    /// Iterates over positions, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = Option<&'a [T]>> + '_ {
        (0..self.len()).map(move |k| self.frame(k))
    }

    /// Shape of a single frame.
    pub fn frame_shape(&self) -> &'a FrameShape {
        self.frame_shape
    }

    /// Shape of the materialized observation.
    pub fn shape(&self) -> FrameShape {
        self.frame_shape.stacked(self.len())
    }

    /// Number of elements of the materialized observation.
    pub fn materialized_len(&self) -> usize {
        self.len() * self.frame_shape.len()
    }

    /// Writes the observation into `out`, stacking frames along the last
    /// dimension of the frame shape.
    ///
    /// # Panics
    ///
    /// Panics if `out.len() != self.materialized_len()`.
    pub fn write_to(&self, out: &mut [T]) {
        assert_eq!(out.len(), self.materialized_len());

        let h = self.len();
        let c = self.frame_shape.channels();
        if h == 0 || c == 0 {
            return;
        }
        let n_positions = self.frame_shape.len() / c;

        for p in 0..n_positions {
            let dst = &mut out[p * h * c..(p + 1) * h * c];
            for (k, d) in dst.chunks_exact_mut(c).enumerate() {
                match self.frame(k) {
                    Some(f) => d.copy_from_slice(&f[p * c..(p + 1) * c]),
                    None => d.iter_mut().for_each(|x| *x = T::zero()),
                }
            }
        }
    }

    /// Materializes the observation into a new vector.
    pub fn to_vec(&self) -> Vec<T> {
        let mut out = vec![T::zero(); self.materialized_len()];
        self.write_to(&mut out);
        out
    }
}
