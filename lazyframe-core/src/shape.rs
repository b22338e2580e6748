//! Shape of frames.
use serde::{Deserialize, Serialize};

/// Shape of a single frame, e.g. `[84, 84, 1]` for a grayscale Atari screen or
/// `[128]` for a RAM observation.
///
/// The last dimension is treated as the channel dimension when frames are
/// stacked: a history of `h` frames of shape `[H, W, C]` is materialized as
/// `[H, W, h * C]`.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone)]
pub struct FrameShape {
    /// Dimensions of the frame.
    pub dims: Vec<usize>,
}

impl FrameShape {
    /// Creates a shape with the given dimensions.
    pub fn new(dims: impl Into<Vec<usize>>) -> Self {
        Self { dims: dims.into() }
    }

    /// Flat shape `[len]`.
    pub fn flat(len: usize) -> Self {
        Self { dims: vec![len] }
    }

    /// Number of elements of a frame.
    pub fn len(&self) -> usize {
        if self.dims.is_empty() {
            0
        } else {
            self.dims.iter().product()
        }
    }

    /// Returns `true` if a frame of this shape has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Size of the last dimension.
    pub fn channels(&self) -> usize {
        self.dims.last().copied().unwrap_or(0)
    }

    /// Shape of `history_len` stacked frames.
    pub fn stacked(&self, history_len: usize) -> Self {
        let mut dims = self.dims.clone();
        if let Some(c) = dims.last_mut() {
            *c *= history_len;
        }
        Self { dims }
    }
}

impl From<&[usize]> for FrameShape {
    fn from(dims: &[usize]) -> Self {
        Self::new(dims)
    }
}
