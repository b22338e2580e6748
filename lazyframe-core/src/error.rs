//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
///
/// All of these are violations of the caller's contract with the buffer.
/// None of them are transient, so there is nothing to retry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LazyFrameError {
    /// The buffer was configured with a zero capacity or a zero history length.
    #[error("bad capacity: capacity = {capacity}, history_len = {history_len}")]
    BadCapacity {
        /// Configured capacity.
        capacity: usize,
        /// Configured history length.
        history_len: usize,
    },

    /// The index was never written, or its slot has been overwritten since.
    #[error("stale index {idx}: {num_stored} frames stored, capacity {capacity}")]
    StaleIndex {
        /// The offending logical index.
        idx: u64,
        /// Number of `store_frame` calls so far.
        num_stored: u64,
        /// Capacity of the buffer.
        capacity: usize,
    },

    /// No frame has been stored yet.
    #[error("insufficient data: no frame has been stored")]
    InsufficientData,

    /// The batch size is zero or the buffer cannot produce a batch of that size.
    #[error("invalid batch size {batch_size} for a buffer holding {num_filled} frames")]
    InvalidBatchSize {
        /// Requested batch size.
        batch_size: usize,
        /// Number of live frames in the buffer.
        num_filled: usize,
    },

    /// The observation does not have the number of elements of a frame.
    #[error("frame shape mismatch: expected {expected} elements, got {actual}")]
    FrameShapeMismatch {
        /// Number of elements of a frame.
        expected: usize,
        /// Number of elements of the given observation.
        actual: usize,
    },

    /// A schedule was built from invalid parameters.
    #[error("bad schedule: {0}")]
    BadSchedule(String),
}
