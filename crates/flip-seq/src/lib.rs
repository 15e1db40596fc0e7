//! # flip-seq
//!
//! A random-access, mutable frame-sequence container over a positional
//! multi-frame store.
//!
//! Native multi-frame resources (animations, multi-resolution icon
//! containers) only offer iterator-style access: select an active
//! position, operate on the current frame, move the position. This crate
//! reconciles that with an ordinary ordered-collection contract:
//!
//! - [`Sequence`] - the container facade: length, indexed and sliced
//!   get/set/delete, insert, append, extend, iteration
//! - [`FrameHandle`] - a lazily materialized per-frame proxy that callers
//!   may hold across container edits
//! - [`FrameValue`] - the values accepted by mutating operations (owned
//!   frames or existing handles)
//!
//! Indices follow standard slice semantics: 0-based from the front,
//! negative indices count from the end, slices are half-open unit-step
//! ranges with clamped bounds.
//!
//! ## Cache coherency
//!
//! The container memoizes proxy *objects*, never content: the backing
//! store stays the single source of truth. Every structural edit
//! invalidates or renumbers the affected cache slots, so a handle's live
//! position follows the frame it was created for, and a detached handle
//! keeps serving the content it wrapped.
//!
//! ## Usage
//!
//! ```rust
//! use flip_core::Frame;
//! use flip_seq::Sequence;
//!
//! let mut seq = Sequence::from_frames([
//!     Frame::filled(32, 32, [255, 0, 0, 255]),
//!     Frame::filled(16, 16, [0, 255, 0, 255]),
//! ])?;
//!
//! assert_eq!(seq.len(), 2);
//! assert_eq!(seq.get(-1)?.size(), (16, 16));
//!
//! seq.append(Frame::filled(8, 8, [0, 0, 255, 255]))?;
//! assert_eq!(seq.len(), 3);
//! # Ok::<(), flip_core::Error>(())
//! ```

#![warn(missing_docs)]

mod cache;
pub mod handle;
pub mod sequence;
pub mod value;

pub use handle::FrameHandle;
pub use sequence::{Frames, Sequence};
pub use value::FrameValue;

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use flip_seq::prelude::*;
/// ```
pub mod prelude {
    pub use crate::handle::FrameHandle;
    pub use crate::sequence::{Frames, Sequence};
    pub use crate::value::FrameValue;
    pub use flip_core::{Error, Frame, FrameSlice, Result, Signature};
    pub use flip_store::{FrameStore, NativeStore};
}
