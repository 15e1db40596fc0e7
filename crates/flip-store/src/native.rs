//! In-memory native store.
//!
//! [`NativeStore`] is the reference [`FrameStore`] backend: a slab arena of
//! refcounted frame entries plus an ordered frame list and an active
//! cursor. It behaves like the native resources it stands in for:
//!
//! - frame refs are counted; an entry is freed exactly when its last ref
//!   is released
//! - arena slots are reused, with a generation bump so stale refs are
//!   detected instead of resolving to an unrelated frame
//! - the active cursor clamps back into range when a removal leaves it
//!   past the end
//!
//! Each store holds a [`runtime`](crate::runtime) reference for as long as
//! it lives, so the process-wide native state outlives every store.

use flip_core::{Error, Frame, Result};

use crate::runtime::{self, RuntimeGuard};
use crate::store::{FrameId, FrameStore};

struct Entry {
    frame: Frame,
    refs: usize,
}

struct Slot {
    generation: u32,
    entry: Option<Entry>,
}

/// In-memory, single-threaded multi-frame store.
///
/// # Example
///
/// ```rust
/// use flip_core::Frame;
/// use flip_store::{FrameStore, NativeStore};
///
/// let mut store = NativeStore::from_frames([
///     Frame::filled(32, 32, [1, 0, 0, 255]),
///     Frame::filled(16, 16, [0, 1, 0, 255]),
/// ]).unwrap();
///
/// assert_eq!(store.count(), 2);
/// store.set_active(1).unwrap();
/// let id = store.current().unwrap();
/// assert_eq!(store.frame(id).unwrap().size(), (16, 16));
/// ```
pub struct NativeStore {
    arena: Vec<Slot>,
    free: Vec<u32>,
    order: Vec<FrameId>,
    active: usize,
    _runtime: RuntimeGuard,
}

impl NativeStore {
    /// Creates an empty store, acquiring the process runtime.
    pub fn new() -> Self {
        Self {
            arena: Vec::new(),
            free: Vec::new(),
            order: Vec::new(),
            active: 0,
            _runtime: runtime::acquire(),
        }
    }

    /// Creates a store holding the given frames in order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFrame`] if any frame is zero-area; no store
    /// is created in that case.
    pub fn from_frames(frames: impl IntoIterator<Item = Frame>) -> Result<Self> {
        let mut store = Self::new();
        for frame in frames {
            let id = store.adopt(frame)?;
            store.order.push(id);
        }
        Ok(store)
    }

    fn alloc(&mut self, frame: Frame) -> FrameId {
        if let Some(slot) = self.free.pop() {
            let s = &mut self.arena[slot as usize];
            s.entry = Some(Entry { frame, refs: 1 });
            FrameId {
                slot,
                generation: s.generation,
            }
        } else {
            let slot = self.arena.len() as u32;
            self.arena.push(Slot {
                generation: 0,
                entry: Some(Entry { frame, refs: 1 }),
            });
            FrameId {
                slot,
                generation: 0,
            }
        }
    }

    fn entry(&self, id: FrameId) -> Result<&Entry> {
        self.arena
            .get(id.slot as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.entry.as_ref())
            .ok_or_else(|| Error::resource(format!("stale frame ref {id:?}")))
    }

    fn entry_mut(&mut self, id: FrameId) -> Result<&mut Entry> {
        self.arena
            .get_mut(id.slot as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.entry.as_mut())
            .ok_or_else(|| Error::resource(format!("stale frame ref {id:?}")))
    }
}

impl Default for NativeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for NativeStore {
    fn drop(&mut self) {
        let order = std::mem::take(&mut self.order);
        for id in order {
            self.destroy(id);
        }
    }
}

impl FrameStore for NativeStore {
    fn count(&self) -> usize {
        self.order.len()
    }

    fn set_active(&mut self, position: usize) -> Result<()> {
        if position >= self.order.len() {
            return Err(Error::out_of_range(position as isize, self.order.len()));
        }
        self.active = position;
        Ok(())
    }

    fn current(&self) -> Result<FrameId> {
        self.order
            .get(self.active)
            .copied()
            .ok_or_else(|| Error::resource("no current frame: store is empty"))
    }

    fn insert_after(&mut self, position: Option<usize>, frame: FrameId) -> Result<()> {
        self.entry(frame)?;
        let at = match position {
            None => 0,
            Some(p) => {
                if p >= self.order.len() {
                    return Err(Error::out_of_range(p as isize, self.order.len()));
                }
                p + 1
            }
        };
        tracing::trace!(at, ?frame, "store insert");
        self.order.insert(at, frame);
        Ok(())
    }

    fn remove(&mut self, position: usize) -> Result<()> {
        if position >= self.order.len() {
            return Err(Error::out_of_range(position as isize, self.order.len()));
        }
        let id = self.order.remove(position);
        tracing::trace!(position, ?id, "store remove");
        self.destroy(id);
        if self.active >= self.order.len() {
            self.active = self.order.len().saturating_sub(1);
        }
        Ok(())
    }

    fn clone_frame(&mut self, frame: FrameId) -> Result<FrameId> {
        let cloned = self.entry(frame)?.frame.clone();
        Ok(self.alloc(cloned))
    }

    fn adopt(&mut self, frame: Frame) -> Result<FrameId> {
        frame.validate()?;
        Ok(self.alloc(frame))
    }

    fn destroy(&mut self, frame: FrameId) {
        let Some(slot) = self
            .arena
            .get_mut(frame.slot as usize)
            .filter(|s| s.generation == frame.generation)
        else {
            tracing::trace!(?frame, "destroy of stale frame ref ignored");
            return;
        };
        let Some(entry) = slot.entry.as_mut() else {
            return;
        };
        entry.refs -= 1;
        if entry.refs == 0 {
            slot.entry = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(frame.slot);
        }
    }

    fn frame(&self, frame: FrameId) -> Result<&Frame> {
        Ok(&self.entry(frame)?.frame)
    }

    fn frame_mut(&mut self, frame: FrameId) -> Result<&mut Frame> {
        Ok(&mut self.entry_mut(frame)?.frame)
    }
}
