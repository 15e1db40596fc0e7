//! Position cache bookkeeping.
//!
//! One optional [`FrameHandle`] slot per logical index, mirroring - but
//! never overriding - the backing store's length. The cache memoizes proxy
//! objects only; content always comes from the store.
//!
//! Invariants:
//!
//! - after every operation, `len()` equals the store's frame count
//! - a populated slot at index `i` holds a handle whose live position is
//!   `i`; a handle is never carried across a position shift without being
//!   renumbered or detached
//!
//! Renumbering after an edit is one linear pass over the surviving slots:
//! the net length delta is applied by a single splice/drain, then every
//! slot at or after the edit point gets its handle's position rewritten.

use std::ops::Range;

use crate::handle::FrameHandle;

#[derive(Default)]
pub(crate) struct PositionCache {
    slots: Vec<Option<FrameHandle>>,
}

impl PositionCache {
    pub(crate) fn with_len(len: usize) -> Self {
        let mut slots = Vec::new();
        slots.resize_with(len, || None);
        Self { slots }
    }

    /// Re-syncs the slot count to the store's length.
    ///
    /// Growth adds empty slots; shrinkage detaches and drops the handles
    /// past the new end. Out-of-band store edits are the only way the two
    /// lengths drift, so this runs before every cache-consulting read.
    pub(crate) fn sync_len(&mut self, len: usize) {
        if len < self.slots.len() {
            for slot in self.slots.drain(len..) {
                if let Some(handle) = slot {
                    handle.detach();
                }
            }
        } else {
            self.slots.resize_with(len, || None);
        }
    }

    /// Returns the cached handle at `index`, if one is present and still
    /// attached.
    pub(crate) fn get(&self, index: usize) -> Option<&FrameHandle> {
        self.slots
            .get(index)?
            .as_ref()
            .filter(|handle| handle.is_attached())
    }

    pub(crate) fn put(&mut self, index: usize, handle: FrameHandle) {
        self.slots[index] = Some(handle);
    }

    /// Empties the slot at `index`, detaching any cached handle so the
    /// next read re-materializes from the store.
    pub(crate) fn invalidate(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            if let Some(handle) = slot.take() {
                handle.detach();
            }
        }
    }

    /// Detaches and empties every slot.
    pub(crate) fn invalidate_all(&mut self) {
        for slot in &mut self.slots {
            if let Some(handle) = slot.take() {
                handle.detach();
            }
        }
    }

    /// Detaches every slot without emptying the vector. Container
    /// teardown hook.
    pub(crate) fn detach_all(&self) {
        for slot in self.slots.iter().flatten() {
            slot.detach();
        }
    }

    /// Removes `span` and renumbers the survivors left in one pass.
    pub(crate) fn remove_span(&mut self, span: Range<usize>) {
        let start = span.start;
        for slot in self.slots.drain(span) {
            if let Some(handle) = slot {
                handle.detach();
            }
        }
        self.renumber_from(start);
    }

    /// Splices `count` empty slots in at `at` and renumbers the shifted
    /// suffix right in one pass.
    pub(crate) fn open_gap(&mut self, at: usize, count: usize) {
        self.slots
            .splice(at..at, std::iter::repeat_with(|| None).take(count));
        self.renumber_from(at + count);
    }

    fn renumber_from(&mut self, start: usize) {
        for (index, slot) in self.slots.iter().enumerate().skip(start) {
            if let Some(handle) = slot {
                handle.set_position(index);
            }
        }
    }
}
