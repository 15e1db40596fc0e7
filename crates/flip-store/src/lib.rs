//! # flip-store
//!
//! The backing-store boundary for frame sequences.
//!
//! A multi-frame native resource (an animation, a multi-resolution icon
//! container) exposes *positional, cursor-driven* access: select an active
//! position, operate on the current frame, insert after a position, remove
//! at a position. This crate pins that interface down as the [`FrameStore`]
//! trait and ships [`NativeStore`], an in-memory arena implementation with
//! refcounted frame entries.
//!
//! The higher-level random-access container lives in `flip-seq`; it drives
//! exactly one store at a time (the store is single-threaded per instance,
//! and the active cursor is global mutable state that every caller sets
//! immediately before use).
//!
//! The [`runtime`] module carries the process-wide acquire/release
//! lifecycle: the first acquire initializes shared native state, the last
//! release tears it down.

#![warn(missing_docs)]

pub mod native;
pub mod runtime;
pub mod store;

pub use native::NativeStore;
pub use runtime::{acquire, is_initialized, release, RuntimeGuard};
pub use store::{FrameId, FrameStore};
