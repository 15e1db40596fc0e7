//! Error types for frame-sequence operations.
//!
//! Provides the unified error taxonomy shared by the whole workspace:
//!
//! - **Range errors**: [`OutOfRange`](Error::OutOfRange) - a normalized
//!   index falls outside the valid bounds for the requested operation
//! - **Slice errors**: [`BadStep`](Error::BadStep) - a slice with a step
//!   other than 1 was supplied
//! - **Validation errors**: [`InvalidFrame`](Error::InvalidFrame) - a
//!   caller supplied a frame value the container cannot hold
//! - **Resource errors**: [`Resource`](Error::Resource) - an opaque
//!   backing-store failure
//!
//! All of these are detected *before* any backing-store mutation: an
//! operation either fully succeeds or fails with no observable side effect.

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during frame-sequence operations.
///
/// This enum uses [`thiserror`] for automatic [`std::error::Error`] and
/// [`std::fmt::Display`] implementations.
#[derive(Debug, Error)]
pub enum Error {
    /// A normalized index falls outside the valid bounds.
    ///
    /// For reads and deletes the valid domain is `[-length, length)`;
    /// for inserts it is `[0, length]` after negative adjustment.
    #[error("index {index} out of range (length: {length})")]
    OutOfRange {
        /// Index as supplied by the caller.
        index: isize,
        /// Container length at the time of the call.
        length: usize,
    },

    /// A slice step other than 1 (or unset) was supplied.
    ///
    /// Strided access is not part of the container contract; get/set/delete
    /// with a slice all require a unit step.
    #[error("slice step must be 1, got {step}")]
    BadStep {
        /// Step as supplied by the caller.
        step: isize,
    },

    /// The caller supplied a frame value the container cannot hold.
    ///
    /// Raised before any mutation, e.g. for zero-area frames or pixel
    /// buffers whose length does not match the stated dimensions.
    #[error("invalid frame: {reason}")]
    InvalidFrame {
        /// Why the value was rejected.
        reason: String,
    },

    /// Opaque failure surfaced by the backing store.
    ///
    /// The container does not attempt to recover from these; the current
    /// operation is aborted without partial mutation.
    #[error("backing store failure: {0}")]
    Resource(String),
}

impl Error {
    /// Creates an [`Error::OutOfRange`] error.
    #[inline]
    pub fn out_of_range(index: isize, length: usize) -> Self {
        Self::OutOfRange { index, length }
    }

    /// Creates an [`Error::BadStep`] error.
    #[inline]
    pub fn bad_step(step: isize) -> Self {
        Self::BadStep { step }
    }

    /// Creates an [`Error::InvalidFrame`] error.
    #[inline]
    pub fn invalid_frame(reason: impl Into<String>) -> Self {
        Self::InvalidFrame {
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::Resource`] error.
    #[inline]
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::Resource(msg.into())
    }

    /// Returns `true` if this is a range error.
    #[inline]
    pub fn is_range_error(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }

    /// Returns `true` if this is a slice-step error.
    #[inline]
    pub fn is_slice_error(&self) -> bool {
        matches!(self, Self::BadStep { .. })
    }

    /// Returns `true` if this is a validation error.
    #[inline]
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Self::InvalidFrame { .. })
    }

    /// Returns `true` if this is a backing-store failure.
    #[inline]
    pub fn is_resource_error(&self) -> bool {
        matches!(self, Self::Resource(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range() {
        let err = Error::out_of_range(-5, 4);
        let msg = err.to_string();
        assert!(msg.contains("-5"));
        assert!(msg.contains("4"));
        assert!(err.is_range_error());
        assert!(!err.is_slice_error());
    }

    #[test]
    fn test_bad_step() {
        let err = Error::bad_step(3);
        assert!(err.to_string().contains("3"));
        assert!(err.is_slice_error());
    }

    #[test]
    fn test_invalid_frame() {
        let err = Error::invalid_frame("zero-area frame");
        assert!(err.to_string().contains("zero-area"));
        assert!(err.is_validation_error());
    }

    #[test]
    fn test_resource() {
        let err = Error::resource("allocation failed");
        assert!(err.is_resource_error());
        assert!(err.to_string().contains("allocation failed"));
    }
}
