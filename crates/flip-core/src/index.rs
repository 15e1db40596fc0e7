//! Index and slice normalization.
//!
//! The sequence container follows standard Python-style indexing: indices
//! are 0-based from the front, negative indices count from the end, and
//! slices are half-open `[start, stop)` ranges whose bounds clamp into
//! `[0, length]`. This module centralizes that arithmetic so every
//! container operation validates arguments the same way, before any
//! backing-store mutation.

use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

use crate::{Error, Result};

/// Normalizes a read/delete index into `[0, length)`.
///
/// Negative indices count from the end (`-1` is the last element). The
/// valid caller domain is `[-length, length)`.
///
/// # Errors
///
/// Returns [`Error::OutOfRange`] if the index falls outside that domain.
///
/// # Example
///
/// ```rust
/// use flip_core::normalize_index;
///
/// assert_eq!(normalize_index(2, 4).unwrap(), 2);
/// assert_eq!(normalize_index(-1, 4).unwrap(), 3);
/// assert!(normalize_index(4, 4).is_err());
/// assert!(normalize_index(-5, 4).is_err());
/// ```
pub fn normalize_index(index: isize, length: usize) -> Result<usize> {
    let len = length as isize;
    if index >= len || index < -len {
        return Err(Error::out_of_range(index, length));
    }
    let normalized = if index < 0 { index + len } else { index };
    Ok(normalized as usize)
}

/// Normalizes an insert index into `[0, length]`.
///
/// Negative indices count from the end; inserting at `length` appends.
///
/// # Errors
///
/// Returns [`Error::OutOfRange`] if the adjusted index falls outside
/// `[0, length]`.
pub fn normalize_insert_index(index: isize, length: usize) -> Result<usize> {
    let len = length as isize;
    let adjusted = if index < 0 { index + len } else { index };
    if adjusted < 0 || adjusted > len {
        return Err(Error::out_of_range(index, length));
    }
    Ok(adjusted as usize)
}

/// A Python-style slice argument: optional start, stop and step.
///
/// Only unit steps are accepted by the container contract; `resolve`
/// rejects anything else before the caller touches the backing store.
///
/// Plain Rust ranges convert directly:
///
/// ```rust
/// use flip_core::FrameSlice;
///
/// let s: FrameSlice = (1..3).into();
/// assert_eq!(s.resolve(4).unwrap(), 1..3);
///
/// let tail: FrameSlice = (-2..).into();
/// assert_eq!(tail.resolve(4).unwrap(), 2..4);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameSlice {
    /// Inclusive start bound; `None` means the front.
    pub start: Option<isize>,
    /// Exclusive stop bound; `None` means the end.
    pub stop: Option<isize>,
    /// Step; only `None` or `Some(1)` resolve successfully.
    pub step: Option<isize>,
}

impl FrameSlice {
    /// Creates a slice from explicit bounds.
    pub fn new(start: Option<isize>, stop: Option<isize>, step: Option<isize>) -> Self {
        Self { start, stop, step }
    }

    /// The full-container slice.
    pub fn full() -> Self {
        Self::default()
    }

    /// Resolves this slice against a container of `length` elements.
    ///
    /// Negative bounds count from the end; out-of-range bounds clamp into
    /// `[0, length]`. An empty result range is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BadStep`] if the step is set and not 1.
    pub fn resolve(&self, length: usize) -> Result<Range<usize>> {
        if let Some(step) = self.step {
            if step != 1 {
                return Err(Error::bad_step(step));
            }
        }
        let len = length as isize;
        let clamp = |bound: isize| -> usize {
            let adjusted = if bound < 0 { bound + len } else { bound };
            adjusted.clamp(0, len) as usize
        };
        let start = self.start.map_or(0, clamp);
        let stop = self.stop.map_or(length, clamp);
        // A reversed range resolves empty, matching Python slice semantics.
        Ok(start..stop.max(start))
    }
}

impl From<Range<isize>> for FrameSlice {
    fn from(range: Range<isize>) -> Self {
        Self::new(Some(range.start), Some(range.end), None)
    }
}

impl From<RangeFrom<isize>> for FrameSlice {
    fn from(range: RangeFrom<isize>) -> Self {
        Self::new(Some(range.start), None, None)
    }
}

impl From<RangeTo<isize>> for FrameSlice {
    fn from(range: RangeTo<isize>) -> Self {
        Self::new(None, Some(range.end), None)
    }
}

impl From<RangeFull> for FrameSlice {
    fn from(_: RangeFull) -> Self {
        Self::full()
    }
}
