//! The positional backing-store interface.
//!
//! [`FrameStore`] is the seam between the sequence container and whatever
//! native multi-frame resource backs it. The trait is object-safe so the
//! container can hold `Rc<RefCell<dyn FrameStore>>` and frame proxies can
//! keep weak back-references without naming a concrete store type.

use flip_core::{Frame, Result};

/// Identifier of one native frame owned by a store's arena.
///
/// Ids carry a generation counter so a stale id (one whose entry has been
/// destroyed and its arena slot reused) is detected instead of silently
/// resolving to an unrelated frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId {
    pub(crate) slot: u32,
    pub(crate) generation: u32,
}

impl FrameId {
    /// Arena slot index. Only meaningful to the owning store.
    #[inline]
    pub fn slot(&self) -> u32 {
        self.slot
    }

    /// Generation of the arena slot this id was minted for.
    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// Positional, cursor-driven access to a multi-frame resource.
///
/// # Cursor discipline
///
/// The active position is global mutable state on the store. Callers must
/// call [`set_active`](Self::set_active) immediately before any operation
/// that depends on it and must not assume a previous call left the cursor
/// in place.
///
/// # Reference counting
///
/// Every [`FrameId`] is a counted reference. [`clone_frame`](Self::clone_frame)
/// and [`adopt`](Self::adopt) mint new refs; [`insert_after`](Self::insert_after)
/// transfers ownership of a ref to the frame list; [`remove`](Self::remove)
/// and [`destroy`](Self::destroy) release refs. An entry is freed when its
/// last ref is released, and never before.
pub trait FrameStore {
    /// Returns the number of frames in the store.
    fn count(&self) -> usize;

    /// Moves the active cursor to `position`.
    ///
    /// # Errors
    ///
    /// Fails with a range error if `position >= count()`.
    fn set_active(&mut self, position: usize) -> Result<()>;

    /// Returns the frame at the active cursor.
    ///
    /// # Errors
    ///
    /// Fails if the store is empty.
    fn current(&self) -> Result<FrameId>;

    /// Inserts `frame` after `position`, or at the front for `None`.
    ///
    /// Ownership of the ref passes to the frame list. The `None` case
    /// models the pre-first cursor state of the native resource.
    ///
    /// # Errors
    ///
    /// Fails with a range error if `position >= count()`.
    fn insert_after(&mut self, position: Option<usize>, frame: FrameId) -> Result<()>;

    /// Removes the frame at `position`, releasing the list's ref.
    ///
    /// The active cursor is clamped back into range if the removal left it
    /// past the end.
    ///
    /// # Errors
    ///
    /// Fails with a range error if `position >= count()`.
    fn remove(&mut self, position: usize) -> Result<()>;

    /// Clones `frame` into an independent ref.
    ///
    /// The clone has its own identity and lifetime; pixel storage may be
    /// shared copy-on-write.
    ///
    /// # Errors
    ///
    /// Fails if `frame` is stale.
    fn clone_frame(&mut self, frame: FrameId) -> Result<FrameId>;

    /// Brings a caller-supplied frame value into the store's arena.
    ///
    /// # Errors
    ///
    /// Fails if the store rejects the frame.
    fn adopt(&mut self, frame: Frame) -> Result<FrameId>;

    /// Releases one ref on `frame`.
    ///
    /// Stale ids are ignored; releasing the last ref frees the entry.
    fn destroy(&mut self, frame: FrameId);

    /// Borrows the frame behind `frame`.
    ///
    /// # Errors
    ///
    /// Fails if `frame` is stale.
    fn frame(&self, frame: FrameId) -> Result<&Frame>;

    /// Mutably borrows the frame behind `frame`.
    ///
    /// # Errors
    ///
    /// Fails if `frame` is stale.
    fn frame_mut(&mut self, frame: FrameId) -> Result<&mut Frame>;
}
