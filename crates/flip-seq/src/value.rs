//! Values accepted by mutating sequence operations.
//!
//! `set`, `insert`, `append` and `extend` all take anything convertible
//! into a [`FrameValue`]: an owned or borrowed [`Frame`], or an existing
//! [`FrameHandle`] (possibly from another sequence). Handles contribute
//! their current content; the receiving container always stores its own
//! clone, so later edits to the source do not leak across.

use flip_core::{Frame, Result};

use crate::handle::FrameHandle;

/// A single-frame value headed into a sequence.
#[derive(Debug, Clone)]
pub enum FrameValue {
    /// An owned frame value.
    Data(Frame),
    /// An existing frame proxy; its current content is used.
    Handle(FrameHandle),
}

impl FrameValue {
    /// Resolves the value to an owned frame, validating it for storage.
    ///
    /// # Errors
    ///
    /// Returns a validation error for frames a container cannot hold
    /// (zero-area). Detected before any backing-store mutation.
    pub fn into_frame(self) -> Result<Frame> {
        let frame = match self {
            Self::Data(frame) => frame,
            Self::Handle(handle) => handle.to_frame(),
        };
        frame.validate()?;
        Ok(frame)
    }
}

impl From<Frame> for FrameValue {
    fn from(frame: Frame) -> Self {
        Self::Data(frame)
    }
}

impl From<&Frame> for FrameValue {
    fn from(frame: &Frame) -> Self {
        Self::Data(frame.clone())
    }
}

impl From<FrameHandle> for FrameValue {
    fn from(handle: FrameHandle) -> Self {
        Self::Handle(handle)
    }
}

impl From<&FrameHandle> for FrameValue {
    fn from(handle: &FrameHandle) -> Self {
        Self::Handle(handle.clone())
    }
}
