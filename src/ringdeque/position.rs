//! Position handles and the operations addressed by them.
//!
//! A `Pos` names a physical slot, not an element. It stays meaningful until
//! the deque grows, shifts or pops; after that it must be recomputed.

use core::borrow::Borrow;

use super::RingDeque;

/// A detached cursor into a `RingDeque`.
///
/// Obtained from `begin`, `end`, `find` and the position-returning insert
/// and erase operations. Comparing a position against `end()` tells whether a
/// search came up empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pos {
    slot: usize,
    /// Mask of the block the position was taken from.
    #[cfg(debug_assertions)]
    mask: usize,
}

impl<T> RingDeque<T> {
    #[inline]
    pub(super) fn pos(&self, slot: usize) -> Pos {
        Pos {
            slot,
            #[cfg(debug_assertions)]
            mask: self.mask,
        }
    }

    /// Resolves `pos` to a physical slot, asserting in debug builds that it
    /// was not invalidated by a reallocation and lies within `start..=end`.
    #[inline]
    fn checked_slot(&self, pos: Pos) -> usize {
        #[cfg(debug_assertions)]
        debug_assert_eq!(pos.mask, self.mask, "position used after the deque reallocated");
        debug_assert!(
            self.to_index(pos.slot) <= self.len(),
            "position slot={} outside of start={} end={}",
            pos.slot,
            self.start,
            self.end
        );
        pos.slot
    }

    /// Position of the front element, equal to `end()` when empty.
    #[inline]
    pub fn begin(&self) -> Pos {
        self.pos(self.start)
    }

    /// The past-the-end position.
    #[inline]
    pub fn end(&self) -> Pos {
        self.pos(self.end)
    }

    /// Steps `pos` one element toward the back.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `pos` is already the end position.
    #[inline]
    pub fn advance(&self, pos: Pos) -> Pos {
        let slot = self.checked_slot(pos);
        debug_assert!(slot != self.end, "advanced past the end");
        self.pos(self.wrap_add(slot, 1))
    }

    /// The element at `pos`, or `None` for the end position.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingDeque;
    ///
    /// let deque: RingDeque<_> = (1..4).collect();
    /// let mut pos = deque.begin();
    /// let mut seen = Vec::new();
    /// while let Some(v) = deque.value_at(pos) {
    ///     seen.push(*v);
    ///     pos = deque.advance(pos);
    /// }
    /// assert_eq!(seen, [1, 2, 3]);
    /// assert_eq!(pos, deque.end());
    /// ```
    #[inline]
    pub fn value_at(&self, pos: Pos) -> Option<&T> {
        let slot = self.checked_slot(pos);
        if slot == self.end {
            None
        } else {
            unsafe { Some(&*self.slot_ptr(slot)) }
        }
    }

    /// The element at `pos` mutably, or `None` for the end position.
    #[inline]
    pub fn value_at_mut(&mut self, pos: Pos) -> Option<&mut T> {
        let slot = self.checked_slot(pos);
        if slot == self.end {
            None
        } else {
            unsafe { Some(&mut *self.slot_ptr(slot)) }
        }
    }

    /// Logical index of `pos`; the end position maps to `len()`.
    #[inline]
    pub fn index_of(&self, pos: Pos) -> usize {
        let slot = self.checked_slot(pos);
        self.to_index(slot)
    }

    /// Position of logical index `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx > len`.
    #[inline]
    pub fn pos_of(&self, idx: usize) -> Pos {
        assert!(idx <= self.len(), "index {} out of bounds for len {}", idx, self.len());
        self.pos(self.to_slot(idx))
    }

    /// Inserts `element` before `pos` and returns its position.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingDeque;
    ///
    /// let mut deque: RingDeque<_> = vec![1, 3].into_iter().collect();
    /// let three = deque.find(&3);
    /// let two = deque.insert_at(three, 2);
    /// assert_eq!(deque.value_at(two), Some(&2));
    /// assert!(deque.iter().eq([1, 2, 3].iter()));
    /// ```
    pub fn insert_at(&mut self, pos: Pos, element: T) -> Pos {
        let idx = self.index_of(pos);
        self.insert(idx, element);
        self.pos_of(idx)
    }

    /// Builds an element from `raw` and inserts it before `pos`.
    #[inline]
    pub fn emplace_at<R>(&mut self, pos: Pos, raw: R) -> Pos
    where
        T: From<R>,
    {
        self.insert_at(pos, T::from(raw))
    }

    /// Drops the element at `pos`.
    ///
    /// Returns the position now holding the element that followed it, which
    /// is the end position when the back element was erased.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is the end position.
    pub fn erase_at(&mut self, pos: Pos) -> Pos {
        let idx = self.index_of(pos);
        assert!(idx < self.len(), "cannot erase the end position");
        self.erase_n(idx, 1);
        self.pos(self.to_slot(idx))
    }

    /// Drops the elements in `first..last`.
    ///
    /// Returns the position now holding the element that followed the range,
    /// which is the end position when the range reached the back.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingDeque;
    ///
    /// let mut deque: RingDeque<_> = (0..5).collect();
    /// let first = deque.pos_of(1);
    /// let last = deque.pos_of(5);
    /// let after = deque.erase_range(first, last);
    /// assert_eq!(after, deque.end());
    /// assert!(deque.iter().eq([0].iter()));
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `last` comes before `first`.
    pub fn erase_range(&mut self, first: Pos, last: Pos) -> Pos {
        let idx1 = self.index_of(first);
        let idx2 = self.index_of(last);
        assert!(idx1 <= idx2, "erase range starts at {} but ends at {}", idx1, idx2);
        self.erase_n(idx1, idx2 - idx1);
        self.pos(self.to_slot(idx1))
    }

    /// First position in `first..last` whose element satisfies `pred`, or
    /// `last` when none does.
    pub fn find_in_by<F>(&self, first: Pos, last: Pos, mut pred: F) -> Pos
    where
        F: FnMut(&T) -> bool,
    {
        let last_slot = self.checked_slot(last);
        let mut slot = self.checked_slot(first);
        debug_assert!(
            self.to_index(slot) <= self.to_index(last_slot),
            "search range ends before it starts"
        );
        while slot != last_slot {
            if pred(unsafe { &*self.slot_ptr(slot) }) {
                break;
            }
            slot = self.wrap_add(slot, 1);
        }
        self.pos(slot)
    }

    /// First position whose element satisfies `pred`, or `end()`.
    #[inline]
    pub fn find_by<F>(&self, pred: F) -> Pos
    where
        F: FnMut(&T) -> bool,
    {
        self.find_in_by(self.begin(), self.end(), pred)
    }

    /// First position in `first..last` whose element equals `needle`, or
    /// `last` when none does.
    ///
    /// Elements are compared through their `Borrow<Q>` view, so a deque of
    /// `String` can be searched with a `&str`.
    #[inline]
    pub fn find_in<Q>(&self, first: Pos, last: Pos, needle: &Q) -> Pos
    where
        T: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.find_in_by(first, last, |element| element.borrow() == needle)
    }

    /// First position whose element equals `needle`, or `end()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingDeque;
    ///
    /// let mut names: RingDeque<String> = RingDeque::new();
    /// names.emplace_back("ada");
    /// names.emplace_back("bob");
    ///
    /// let pos = names.find("bob");
    /// assert_eq!(names.index_of(pos), 1);
    /// assert_eq!(names.find("eve"), names.end());
    /// ```
    #[inline]
    pub fn find<Q>(&self, needle: &Q) -> Pos
    where
        T: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.find_in(self.begin(), self.end(), needle)
    }

    /// The first element equal to `needle`.
    #[inline]
    pub fn get_matching<Q>(&self, needle: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.value_at(self.find(needle))
    }

    /// The first element equal to `needle`, mutably.
    #[inline]
    pub fn get_matching_mut<Q>(&mut self, needle: &Q) -> Option<&mut T>
    where
        T: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        let pos = self.find(needle);
        self.value_at_mut(pos)
    }

    /// Returns `true` if the `RingDeque` contains an element equal to the
    /// given value.
    #[inline]
    pub fn contains<Q>(&self, needle: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.find(needle) != self.end()
    }
}
