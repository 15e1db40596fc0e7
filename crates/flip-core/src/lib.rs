//! # flip-core
//!
//! Core types for multi-frame raster containers.
//!
//! This crate provides the foundational types used throughout the flipbook
//! workspace:
//!
//! - [`Frame`] - Owned RGBA8 raster frame with display-delay metadata
//! - [`Signature`] - Content signature used for frame equality
//! - [`Error`], [`Result`] - Unified error taxonomy
//! - [`FrameSlice`] and the index normalization helpers - Python-style
//!   index and slice semantics (negative indices, clamped unit-step slices)
//!
//! ## Design Philosophy
//!
//! Frames compare by **content**, never by identity or position: two frames
//! cloned into unrelated containers are equal iff their pixel content and
//! dimensions match. Pixel buffers live behind an `Arc`, so cloning a frame
//! is cheap and mutation is copy-on-write.
//!
//! ## Crate Structure
//!
//! This crate is the foundation of the workspace and has no internal
//! dependencies:
//!
//! ```text
//! flip-core (this crate)
//!    ^
//!    |
//!    +-- flip-store (backing-store boundary)
//!    +-- flip-seq (sequence container)
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod frame;
pub mod index;

pub use error::{Error, Result};
pub use frame::{Frame, Signature};
pub use index::{normalize_index, normalize_insert_index, FrameSlice};
