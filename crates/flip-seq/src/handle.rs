//! Per-frame proxy handles.
//!
//! A [`FrameHandle`] represents one frame of a [`Sequence`](crate::Sequence).
//! Handles are created lazily when a cache slot is first read and may be
//! held by callers for as long as they like; cloning a handle aliases the
//! same proxy.
//!
//! A handle owns one cloned native frame ref (released exactly once, when
//! the last alias drops) and keeps a content snapshot. While the handle is
//! *attached* - its sequence still maps it to a live position - reads go
//! through the backing store, which is the single source of truth; once
//! detached by a structural edit, the handle keeps serving the content it
//! wrapped from its snapshot.
//!
//! The back-reference to the store is weak with an explicit liveness check:
//! a handle never assumes its container still exists.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

use flip_core::{Frame, Result, Signature};
use flip_store::{FrameId, FrameStore};

struct HandleInner {
    /// Non-owning back-reference to the originating store.
    store: Weak<RefCell<dyn FrameStore>>,
    /// Cloned native ref owned by this proxy.
    native: FrameId,
    /// Content snapshot; kept in sync with in-place edits made through
    /// this handle, and the read source once detached.
    snapshot: RefCell<Frame>,
    /// Live position within the sequence; `None` once detached.
    position: Cell<Option<usize>>,
    /// Logical index at creation time. Advisory only.
    born_at: usize,
}

impl Drop for HandleInner {
    fn drop(&mut self) {
        if let Some(store) = self.store.upgrade() {
            if let Ok(mut store) = store.try_borrow_mut() {
                store.destroy(self.native);
            }
        }
    }
}

/// Proxy for one frame of a sequence.
///
/// Cloning a handle produces an alias of the same proxy; use
/// [`aliases`](Self::aliases) to test proxy identity. Equality and hashing
/// use the content [`Signature`] instead, so handles from unrelated
/// containers compare equal iff their pixel content matches.
#[derive(Clone)]
pub struct FrameHandle {
    inner: Rc<HandleInner>,
}

impl FrameHandle {
    /// Materializes a handle for the frame at `position`.
    ///
    /// Selects the position on the store, clones the active frame and
    /// wraps the clone. Only the sequence calls this; callers obtain
    /// handles through `Sequence::get`.
    pub(crate) fn materialize(
        store: &Rc<RefCell<dyn FrameStore>>,
        position: usize,
    ) -> Result<Self> {
        let (native, snapshot) = {
            let mut s = store.borrow_mut();
            s.set_active(position)?;
            let current = s.current()?;
            let native = s.clone_frame(current)?;
            let snapshot = s.frame(native)?.clone();
            (native, snapshot)
        };
        Ok(Self {
            inner: Rc::new(HandleInner {
                store: Rc::downgrade(store),
                native,
                snapshot: RefCell::new(snapshot),
                position: Cell::new(Some(position)),
                born_at: position,
            }),
        })
    }

    /// Runs `f` against the live frame in the backing store, if this
    /// handle is still attached and the store is still alive.
    fn with_live<R>(&self, f: impl FnOnce(&Frame) -> R) -> Option<R> {
        let position = self.inner.position.get()?;
        let store = self.inner.store.upgrade()?;
        let mut s = store.try_borrow_mut().ok()?;
        s.set_active(position).ok()?;
        let current = s.current().ok()?;
        let frame = s.frame(current).ok()?;
        Some(f(frame))
    }

    /// Returns the frame dimensions as (width, height).
    pub fn size(&self) -> (u32, u32) {
        self.with_live(|f| f.size())
            .unwrap_or_else(|| self.inner.snapshot.borrow().size())
    }

    /// Returns the frame width in pixels.
    pub fn width(&self) -> u32 {
        self.size().0
    }

    /// Returns the frame height in pixels.
    pub fn height(&self) -> u32 {
        self.size().1
    }

    /// Returns the display delay in ticks.
    pub fn delay(&self) -> u32 {
        self.with_live(|f| f.delay())
            .unwrap_or_else(|| self.inner.snapshot.borrow().delay())
    }

    /// Sets the display delay, committing through to the backing store
    /// when attached.
    ///
    /// # Errors
    ///
    /// Propagates backing-store failures.
    pub fn set_delay(&self, delay: u32) -> Result<()> {
        self.edit(|f| f.set_delay(delay))
    }

    /// Edits the frame in place.
    ///
    /// While attached, the edit is applied to the live frame in the
    /// backing store (so a later re-materialized read observes it) and the
    /// snapshot is refreshed to match. Once detached, only the snapshot is
    /// edited.
    ///
    /// # Errors
    ///
    /// Propagates backing-store failures.
    pub fn edit<R>(&self, f: impl FnOnce(&mut Frame) -> R) -> Result<R> {
        if let (Some(position), Some(store)) =
            (self.inner.position.get(), self.inner.store.upgrade())
        {
            let mut s = store.borrow_mut();
            s.set_active(position)?;
            let current = s.current()?;
            let frame = s.frame_mut(current)?;
            let out = f(&mut *frame);
            let refreshed = frame.clone();
            drop(s);
            *self.inner.snapshot.borrow_mut() = refreshed;
            Ok(out)
        } else {
            Ok(f(&mut self.inner.snapshot.borrow_mut()))
        }
    }

    /// Returns an owned copy of the frame content.
    ///
    /// Attached handles read the live frame; detached handles return the
    /// snapshot. Pixel buffers are shared copy-on-write either way.
    pub fn to_frame(&self) -> Frame {
        self.with_live(Frame::clone)
            .unwrap_or_else(|| self.inner.snapshot.borrow().clone())
    }

    /// Computes the content signature.
    pub fn signature(&self) -> Signature {
        self.with_live(Frame::signature)
            .unwrap_or_else(|| self.inner.snapshot.borrow().signature())
    }

    /// Returns the live position within the owning sequence, or `None`
    /// once the handle has been detached by a structural edit.
    pub fn index(&self) -> Option<usize> {
        self.inner.position.get()
    }

    /// Returns the logical index this handle was created at.
    ///
    /// Advisory only: not to be trusted after any container mutation. Use
    /// [`index`](Self::index) for the live position.
    pub fn born_at(&self) -> usize {
        self.inner.born_at
    }

    /// Returns `true` while the owning sequence still maps this handle to
    /// a live position.
    pub fn is_attached(&self) -> bool {
        self.inner.position.get().is_some() && self.inner.store.strong_count() > 0
    }

    /// Returns `true` if `self` and `other` alias the same proxy.
    pub fn aliases(&self, other: &FrameHandle) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Moves the live position. Cache renumbering hook.
    pub(crate) fn set_position(&self, position: usize) {
        self.inner.position.set(Some(position));
    }

    /// Cuts the handle loose from its sequence; reads fall back to the
    /// snapshot from here on.
    pub(crate) fn detach(&self) {
        self.inner.position.set(None);
    }
}

impl fmt::Debug for FrameHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (width, height) = self.size();
        f.debug_struct("FrameHandle")
            .field("index", &self.inner.position.get())
            .field("born_at", &self.inner.born_at)
            .field("width", &width)
            .field("height", &height)
            .finish()
    }
}

impl PartialEq for FrameHandle {
    fn eq(&self, other: &Self) -> bool {
        self.signature() == other.signature()
    }
}

impl Eq for FrameHandle {}

impl Hash for FrameHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.signature().hash(state);
    }
}
