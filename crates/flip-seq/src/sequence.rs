//! The sequence container facade.
//!
//! [`Sequence`] composes a positional [`FrameStore`] with a
//! [`PositionCache`](crate::cache) and exposes the ordered-collection
//! contract: length, indexed and sliced get/set/delete, insert, append,
//! extend and iteration. Every operation validates its arguments before
//! the first store mutation, translates logical indices into store
//! positions, performs the edit and then brings the cache back in step
//! (invalidation plus one-pass renumbering).

use std::cell::RefCell;
use std::ops::Range;
use std::rc::Rc;

use flip_core::{normalize_index, normalize_insert_index, Error, Frame, FrameSlice, Result};
use flip_store::{FrameId, FrameStore, NativeStore};

use crate::cache::PositionCache;
use crate::handle::FrameHandle;
use crate::value::FrameValue;

/// Random-access, mutable view over a positional multi-frame store.
///
/// The sequence drives exactly one store; the store's active cursor is set
/// immediately before every use and never assumed to survive a call. The
/// store may be shared (other `Rc` owners keep it alive past the
/// sequence), but must not be driven by two sequences at once.
///
/// # Example
///
/// ```rust
/// use flip_core::Frame;
/// use flip_seq::Sequence;
///
/// let mut seq = Sequence::from_frames([
///     Frame::filled(32, 32, [255, 0, 0, 255]),
///     Frame::filled(16, 16, [0, 255, 0, 255]),
///     Frame::filled(32, 32, [0, 0, 255, 255]),
/// ])?;
///
/// seq.delete(0)?;
/// assert_eq!(seq.len(), 2);
/// assert_eq!(seq.get(0)?.size(), (16, 16));
/// # Ok::<(), flip_core::Error>(())
/// ```
pub struct Sequence {
    // Declared before `store` so cached proxies release their native refs
    // into a live store during drop.
    cache: PositionCache,
    store: Rc<RefCell<dyn FrameStore>>,
}

impl Sequence {
    /// Creates a sequence over an existing store.
    pub fn new(store: Rc<RefCell<dyn FrameStore>>) -> Self {
        let len = store.borrow().count();
        Self {
            cache: PositionCache::with_len(len),
            store,
        }
    }

    /// Creates a sequence over a fresh in-memory [`NativeStore`] holding
    /// the given frames.
    ///
    /// # Errors
    ///
    /// Returns a validation error if any frame is zero-area.
    pub fn from_frames(frames: impl IntoIterator<Item = Frame>) -> Result<Self> {
        let store = NativeStore::from_frames(frames)?;
        Ok(Self::new(Rc::new(RefCell::new(store))))
    }

    /// Returns a shared handle on the backing store.
    pub fn store(&self) -> Rc<RefCell<dyn FrameStore>> {
        Rc::clone(&self.store)
    }

    /// Returns the number of frames.
    ///
    /// Always the store's count; the cache never overrides it.
    pub fn len(&self) -> usize {
        self.store.borrow().count()
    }

    /// Returns `true` if the sequence holds no frames.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the frame proxy at `index`.
    ///
    /// Negative indices count from the end. Repeated reads before any
    /// mutation return the same proxy (identity-stable); a missing slot is
    /// materialized by selecting the position on the store and cloning the
    /// active frame.
    ///
    /// # Errors
    ///
    /// Returns a range error for indices outside `[-len, len)`.
    pub fn get(&mut self, index: isize) -> Result<FrameHandle> {
        let position = normalize_index(index, self.len())?;
        self.get_at(position)
    }

    /// Returns a lazy iterator over the frames selected by `slice`.
    ///
    /// The slice must have a unit (or unset) step; bounds clamp into
    /// range, and an empty selection yields an empty iterator, not an
    /// error. The iterator is restartable: call `get_slice` again.
    ///
    /// # Errors
    ///
    /// Returns a slice error for non-unit steps.
    pub fn get_slice(&mut self, slice: impl Into<FrameSlice>) -> Result<Frames<'_>> {
        let range = slice.into().resolve(self.len())?;
        Ok(Frames { seq: self, range })
    }

    /// Iterates over all frames.
    ///
    /// The range is fixed at the length observed here. Mutating the
    /// sequence during iteration is unrepresentable: the iterator holds
    /// the exclusive borrow.
    pub fn iter(&mut self) -> Frames<'_> {
        let range = 0..self.len();
        Frames { seq: self, range }
    }

    /// Replaces the frame at `index` with a clone of `value`'s content.
    ///
    /// The cache slot is invalidated, so the next read re-materializes
    /// from the new backing content; a proxy obtained earlier detaches but
    /// keeps serving the content it wrapped.
    ///
    /// # Errors
    ///
    /// Validation errors for unusable values and range errors for bad
    /// indices are raised before any mutation.
    pub fn set(&mut self, index: isize, value: impl Into<FrameValue>) -> Result<()> {
        let len = self.len();
        let position = normalize_index(index, len)?;
        let frame = value.into().into_frame()?;
        {
            let mut s = self.store.borrow_mut();
            let id = s.adopt(frame)?;
            if let Err(err) = s.remove(position) {
                s.destroy(id);
                return Err(err);
            }
            store_insert(&mut *s, position, id)?;
        }
        self.cache.sync_len(len);
        self.cache.invalidate(position);
        Ok(())
    }

    /// Replaces the frames selected by `slice` with `values`.
    ///
    /// Equivalent to deleting the slice and inserting the values at its
    /// start; the replacement need not have the same length, and indices
    /// after the edit point reflect the net delta.
    ///
    /// # Errors
    ///
    /// Slice and validation errors are raised before any mutation.
    pub fn set_slice<I, V>(&mut self, slice: impl Into<FrameSlice>, values: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<FrameValue>,
    {
        let len = self.len();
        let span = slice.into().resolve(len)?;
        let frames: Vec<Frame> = values
            .into_iter()
            .map(|value| value.into().into_frame())
            .collect::<Result<_>>()?;
        let count = frames.len();
        {
            let mut s = self.store.borrow_mut();
            for position in span.clone().rev() {
                s.remove(position)?;
            }
            let mut position = span.start;
            for frame in frames {
                let id = s.adopt(frame)?;
                store_insert(&mut *s, position, id)?;
                position += 1;
            }
        }
        self.cache.sync_len(len);
        self.cache.remove_span(span.clone());
        self.cache.open_gap(span.start, count);
        tracing::trace!(start = span.start, removed = span.len(), added = count, "splice");
        Ok(())
    }

    /// Removes the frame at `index`.
    ///
    /// Cache slots after it shift left by one; a proxy for the removed
    /// frame detaches.
    ///
    /// # Errors
    ///
    /// Returns a range error for indices outside `[-len, len)`.
    pub fn delete(&mut self, index: isize) -> Result<()> {
        let len = self.len();
        let position = normalize_index(index, len)?;
        self.store.borrow_mut().remove(position)?;
        self.cache.sync_len(len);
        self.cache.remove_span(position..position + 1);
        Ok(())
    }

    /// Removes the contiguous range selected by `slice`.
    ///
    /// # Errors
    ///
    /// Returns a slice error for non-unit steps; an empty selection is a
    /// no-op.
    pub fn delete_slice(&mut self, slice: impl Into<FrameSlice>) -> Result<()> {
        let len = self.len();
        let span = slice.into().resolve(len)?;
        if span.is_empty() {
            return Ok(());
        }
        {
            let mut s = self.store.borrow_mut();
            for position in span.clone().rev() {
                s.remove(position)?;
            }
        }
        self.cache.sync_len(len);
        self.cache.remove_span(span);
        Ok(())
    }

    /// Inserts a clone of `value`'s content at `index`.
    ///
    /// Valid insert positions are `[0, len]` (negative indices adjusted
    /// first); inserting at `len` appends. The new slot stays empty and
    /// materializes lazily on the next read.
    ///
    /// # Errors
    ///
    /// Validation and range errors are raised before any mutation.
    pub fn insert(&mut self, index: isize, value: impl Into<FrameValue>) -> Result<()> {
        let len = self.len();
        let position = normalize_insert_index(index, len)?;
        let frame = value.into().into_frame()?;
        {
            let mut s = self.store.borrow_mut();
            let id = s.adopt(frame)?;
            if let Err(err) = store_insert(&mut *s, position, id) {
                s.destroy(id);
                return Err(err);
            }
        }
        self.cache.sync_len(len);
        self.cache.open_gap(position, 1);
        Ok(())
    }

    /// Appends a clone of `value`'s content.
    ///
    /// Equivalent to `insert(len, value)`.
    ///
    /// # Errors
    ///
    /// Validation errors are raised before any mutation.
    pub fn append(&mut self, value: impl Into<FrameValue>) -> Result<()> {
        let len = self.len();
        self.insert(len as isize, value)
    }

    /// Inserts every value of `values`, in order, starting at `at`
    /// (default: the end).
    ///
    /// All shifts are computed once, so a large extend renumbers the cache
    /// in a single pass rather than once per element.
    ///
    /// # Errors
    ///
    /// Every value is validated before the first store mutation.
    pub fn extend<I, V>(&mut self, values: I, at: Option<isize>) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<FrameValue>,
    {
        let len = self.len();
        let start = match at {
            Some(index) => normalize_insert_index(index, len)?,
            None => len,
        };
        let frames: Vec<Frame> = values
            .into_iter()
            .map(|value| value.into().into_frame())
            .collect::<Result<_>>()?;
        if frames.is_empty() {
            return Ok(());
        }
        let count = frames.len();
        {
            let mut s = self.store.borrow_mut();
            let mut position = start;
            for frame in frames {
                let id = s.adopt(frame)?;
                if let Err(err) = store_insert(&mut *s, position, id) {
                    s.destroy(id);
                    return Err(err);
                }
                position += 1;
            }
        }
        self.cache.sync_len(len);
        self.cache.open_gap(start, count);
        tracing::trace!(at = start, count, "extend");
        Ok(())
    }

    /// Discards the cached proxy at `index`, detaching it.
    ///
    /// The next read re-materializes from whatever the store holds at that
    /// position. Content edits made out of band (directly on the store)
    /// become observable this way.
    ///
    /// # Errors
    ///
    /// Returns a range error for indices outside `[-len, len)`.
    pub fn invalidate(&mut self, index: isize) -> Result<()> {
        let len = self.len();
        let position = normalize_index(index, len)?;
        self.cache.sync_len(len);
        self.cache.invalidate(position);
        Ok(())
    }

    /// Discards every cached proxy.
    pub fn invalidate_all(&mut self) {
        let len = self.len();
        self.cache.sync_len(len);
        self.cache.invalidate_all();
    }

    /// Cached read / lazy materialization at an already-normalized
    /// position.
    fn get_at(&mut self, position: usize) -> Result<FrameHandle> {
        let len = self.len();
        if position >= len {
            return Err(Error::out_of_range(position as isize, len));
        }
        self.cache.sync_len(len);
        if let Some(handle) = self.cache.get(position) {
            return Ok(handle.clone());
        }
        let handle = FrameHandle::materialize(&self.store, position)?;
        self.cache.put(position, handle.clone());
        Ok(handle)
    }
}

impl Drop for Sequence {
    fn drop(&mut self) {
        self.cache.detach_all();
    }
}

/// Inserts `id` so it ends up at list position `at`.
///
/// `insert_after(None, _)` models the store's pre-first cursor state.
fn store_insert(store: &mut dyn FrameStore, at: usize, id: FrameId) -> Result<()> {
    if at == 0 {
        store.insert_after(None, id)
    } else {
        store.insert_after(Some(at - 1), id)
    }
}

/// Lazy iterator over a range of sequence positions.
///
/// Yields `get` results in ascending order over the range fixed when the
/// iterator was created. Created by [`Sequence::iter`] and
/// [`Sequence::get_slice`].
pub struct Frames<'a> {
    seq: &'a mut Sequence,
    range: Range<usize>,
}

impl Iterator for Frames<'_> {
    type Item = Result<FrameHandle>;

    fn next(&mut self) -> Option<Self::Item> {
        let position = self.range.next()?;
        Some(self.seq.get_at(position))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl DoubleEndedIterator for Frames<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let position = self.range.next_back()?;
        Some(self.seq.get_at(position))
    }
}

impl ExactSizeIterator for Frames<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn icon_frames() -> Vec<Frame> {
        vec![
            Frame::filled(32, 32, [255, 0, 0, 255]),
            Frame::filled(16, 16, [0, 255, 0, 255]),
            Frame::filled(32, 32, [0, 0, 255, 255]),
            Frame::filled(16, 16, [255, 255, 0, 255]),
        ]
    }

    fn icon() -> Sequence {
        Sequence::from_frames(icon_frames()).unwrap()
    }

    #[test]
    fn test_get_is_identity_stable() {
        let mut seq = icon();
        let a = seq.get(1).unwrap();
        let b = seq.get(1).unwrap();
        assert!(a.aliases(&b));
        assert_eq!(a.index(), Some(1));
    }

    #[test]
    fn test_invalidate_breaks_identity_not_content() {
        let mut seq = icon();
        let a = seq.get(1).unwrap();
        seq.invalidate(1).unwrap();
        let b = seq.get(1).unwrap();
        assert!(!a.aliases(&b));
        assert_eq!(a, b);
        assert_eq!(a.index(), None);
        assert_eq!(b.index(), Some(1));
    }

    #[test]
    fn test_delete_renumbers_held_handles() {
        let mut seq = icon();
        let h2 = seq.get(2).unwrap();
        let h3 = seq.get(3).unwrap();
        seq.delete(0).unwrap();
        assert_eq!(h2.index(), Some(1));
        assert_eq!(h3.index(), Some(2));
        assert!(seq.get(1).unwrap().aliases(&h2));
    }

    #[test]
    fn test_delete_detaches_removed_handle() {
        let mut seq = icon();
        let removed = seq.get(1).unwrap();
        let old_sig = removed.signature();
        seq.delete(1).unwrap();
        assert_eq!(removed.index(), None);
        assert!(!removed.is_attached());
        // Snapshot keeps serving the removed content.
        assert_eq!(removed.size(), (16, 16));
        assert_eq!(removed.signature(), old_sig);
    }

    #[test]
    fn test_insert_shifts_right_and_leaves_gap_lazy() {
        let mut seq = icon();
        let h2 = seq.get(2).unwrap();
        seq.insert(2, Frame::filled(8, 8, [9, 9, 9, 255])).unwrap();
        assert_eq!(seq.len(), 5);
        assert_eq!(h2.index(), Some(3));
        assert_eq!(seq.get(2).unwrap().size(), (8, 8));
        assert!(seq.get(3).unwrap().aliases(&h2));
    }

    #[test]
    fn test_set_invalidates_slot() {
        let mut seq = icon();
        let old = seq.get(2).unwrap();
        seq.set(2, Frame::filled(16, 16, [7, 7, 7, 255])).unwrap();
        assert_eq!(seq.len(), 4);
        assert_eq!(old.index(), None);
        let fresh = seq.get(2).unwrap();
        assert!(!fresh.aliases(&old));
        assert_eq!(fresh.size(), (16, 16));
        assert_ne!(fresh, old);
    }

    #[test]
    fn test_failed_set_leaves_container_unchanged() {
        let mut seq = icon();
        let before: Vec<_> = seq.iter().map(|h| h.unwrap().signature()).collect();
        let err = seq.set(1, Frame::new(0, 0)).unwrap_err();
        assert!(err.is_validation_error());
        let after: Vec<_> = seq.iter().map(|h| h.unwrap().signature()).collect();
        assert_eq!(before, after);
        assert_eq!(seq.len(), 4);
    }

    #[test]
    fn test_extend_validates_before_mutating() {
        let mut seq = icon();
        let values = vec![Frame::filled(4, 4, [1, 1, 1, 255]), Frame::new(0, 4)];
        assert!(seq.extend(values, Some(0)).unwrap_err().is_validation_error());
        assert_eq!(seq.len(), 4);
        assert_eq!(seq.get(0).unwrap().size(), (32, 32));
    }

    #[test]
    fn test_get_slice_lazy_and_restartable() {
        let mut seq = icon();
        let sizes: Vec<_> = seq
            .get_slice(1..3)
            .unwrap()
            .map(|h| h.unwrap().size())
            .collect();
        assert_eq!(sizes, vec![(16, 16), (32, 32)]);
        // Restart.
        let again: Vec<_> = seq
            .get_slice(1..3)
            .unwrap()
            .map(|h| h.unwrap().size())
            .collect();
        assert_eq!(sizes, again);
        // Empty selection is fine.
        assert_eq!(seq.get_slice(3..1).unwrap().count(), 0);
    }

    #[test]
    fn test_slice_step_is_rejected() {
        let mut seq = icon();
        let err = seq
            .get_slice(FrameSlice::new(None, None, Some(3)))
            .map(|_| ())
            .unwrap_err();
        assert!(err.is_slice_error());
        assert!(seq
            .delete_slice(FrameSlice::new(None, None, Some(2)))
            .unwrap_err()
            .is_slice_error());
        assert_eq!(seq.len(), 4);
    }

    #[test]
    fn test_set_slice_net_delta() {
        let mut seq = icon();
        let tail = seq.get(3).unwrap();
        seq.set_slice(1..3, vec![Frame::filled(8, 8, [5, 5, 5, 255])])
            .unwrap();
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.get(1).unwrap().size(), (8, 8));
        assert_eq!(tail.index(), Some(2));
        assert!(seq.get(2).unwrap().aliases(&tail));
    }

    #[test]
    fn test_out_of_band_store_edit_observed_after_invalidate() {
        let mut seq = icon();
        let before = seq.get(0).unwrap().signature();
        let store = seq.store();
        {
            let mut s = store.borrow_mut();
            s.set_active(0).unwrap();
            let id = s.current().unwrap();
            s.frame_mut(id).unwrap().set_pixel(0, 0, [1, 2, 3, 4]).unwrap();
        }
        seq.invalidate(0).unwrap();
        let after = seq.get(0).unwrap().signature();
        assert_ne!(before, after);
    }

    #[test]
    fn test_handle_edit_survives_invalidation() {
        let mut seq = icon();
        let handle = seq.get(2).unwrap();
        handle.set_delay(10).unwrap();
        seq.invalidate(2).unwrap();
        // The edit was committed to the store, so a fresh proxy sees it.
        assert_eq!(seq.get(2).unwrap().delay(), 10);
        // And the detached proxy still reports what it wrote.
        assert_eq!(handle.delay(), 10);
    }

    #[test]
    fn test_drop_detaches_outstanding_handles() {
        let mut seq = icon();
        let handle = seq.get(0).unwrap();
        drop(seq);
        assert!(!handle.is_attached());
        assert_eq!(handle.size(), (32, 32));
    }

    #[test]
    fn test_iter_double_ended() {
        let mut seq = icon();
        let sizes: Vec<_> = seq.iter().rev().map(|h| h.unwrap().size()).collect();
        assert_eq!(sizes, vec![(16, 16), (32, 32), (16, 16), (32, 32)]);
    }

    #[test]
    fn test_empty_sequence() {
        let mut seq = Sequence::from_frames([]).unwrap();
        assert!(seq.is_empty());
        assert!(seq.get(0).unwrap_err().is_range_error());
        assert!(seq.get(-1).unwrap_err().is_range_error());
        assert_eq!(seq.iter().count(), 0);
        seq.append(Frame::filled(2, 2, [1, 1, 1, 255])).unwrap();
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.get(-1).unwrap().size(), (2, 2));
    }
}
