use core::marker::PhantomData;
use core::ptr::{self, NonNull};
use core::slice;

pub use odds::IndexRange as RangeArgument;

use crate::error::{CapacityError, ErrorKind};
use crate::utils::count;

mod internal;
mod iterator_impls;
mod position;
mod trait_impls;

pub use self::position::Pos;

/// A growable ring buffer.
///
/// Elements live in a single block whose slot count is a power of two. A
/// logical index `i` lives in physical slot `(start + i) & mask`, so indexing
/// is `O(1)` and pushing or popping at either end is `O(1)` amortized.
///
/// The "default" usage of this type as a queue is to use `push_back` to add to
/// the queue, and `pop_front` to remove from the queue. `extend` and `append`
/// push onto the back in this manner, and iterating over `RingDeque` goes front
/// to back.
///
/// # Capacity
///
/// One slot is always kept free so that `start == end` can only mean empty.
/// `capacity()` is therefore always `slots - 1`, and a full deque grows before
/// the last slot is taken. Growing moves every element into logical order at
/// the beginning of the new block.
pub struct RingDeque<T> {
    buf: NonNull<T>,
    start: usize,
    end: usize,
    mask: usize,
    marker: PhantomData<T>,
}

/// `RingDeque` iterator
#[must_use = "iterator adaptors are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    ring: *const T,
    mask: usize,
    start: usize,
    end: usize,
    marker: PhantomData<&'a T>,
}

/// `RingDeque` mutable iterator
#[must_use = "iterator adaptors are lazy and do nothing unless consumed"]
pub struct IterMut<'a, T: 'a> {
    ring: *mut T,
    mask: usize,
    start: usize,
    end: usize,
    marker: PhantomData<&'a mut T>,
}

/// A by-value `RingDeque` iterator
#[must_use = "iterator adaptors are lazy and do nothing unless consumed"]
pub struct IntoIter<T> {
    inner: RingDeque<T>,
}

/// A draining `RingDeque` iterator
pub struct Drain<'a, T: 'a> {
    deque: &'a mut RingDeque<T>,
    /// Drained range, in logical indices.
    drain_start: usize,
    drain_end: usize,
    /// Length of the deque before draining.
    orig_len: usize,
    /// Remaining range to yield.
    next: usize,
    next_back: usize,
}

unsafe impl<T: Send> Send for RingDeque<T> {}
unsafe impl<T: Sync> Sync for RingDeque<T> {}

impl<T> RingDeque<T> {
    /// Creates an empty `RingDeque`. Nothing is allocated until the first
    /// element arrives.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingDeque;
    ///
    /// let deque: RingDeque<usize> = RingDeque::new();
    /// assert_eq!(deque.capacity(), 0);
    /// ```
    #[inline]
    pub const fn new() -> RingDeque<T> {
        RingDeque {
            buf: NonNull::dangling(),
            start: 0,
            end: 0,
            mask: 0,
            marker: PhantomData,
        }
    }

    /// Creates an empty `RingDeque` with room for at least `n` elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingDeque;
    ///
    /// let deque: RingDeque<u8> = RingDeque::with_capacity(5);
    /// assert_eq!(deque.capacity(), 7);
    /// ```
    pub fn with_capacity(n: usize) -> RingDeque<T> {
        let mut deque = RingDeque::new();
        deque.reserve(n);
        deque
    }

    /// Like `with_capacity`, but reports allocation failure.
    pub fn try_with_capacity(n: usize) -> Result<RingDeque<T>, CapacityError> {
        let mut deque = RingDeque::new();
        deque.try_reserve(n)?;
        Ok(deque)
    }

    /// Creates a `RingDeque` holding `n` clones of `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingDeque;
    ///
    /// let deque = RingDeque::with_size(3, 'x');
    /// assert_eq!(deque.iter().collect::<String>(), "xxx");
    /// ```
    pub fn with_size(n: usize, value: T) -> RingDeque<T>
    where
        T: Clone,
    {
        let mut deque = RingDeque::with_capacity(n);
        deque.extend(core::iter::repeat(value).take(n));
        deque
    }

    /// Returns the number of elements in the `RingDeque`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingDeque;
    ///
    /// let mut v = RingDeque::new();
    /// assert_eq!(v.len(), 0);
    /// v.push_back(1);
    /// assert_eq!(v.len(), 1);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        count(self.start, self.end, self.mask)
    }

    /// Returns true if the deque contains no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns how many elements fit before the next reallocation.
    ///
    /// This is `slots - 1` for an allocated deque and `0` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingDeque;
    ///
    /// let mut deque = RingDeque::new();
    /// deque.push_back(1);
    /// assert_eq!(deque.capacity(), 3);
    /// deque.extend(2..5);
    /// assert_eq!(deque.capacity(), 7);
    /// ```
    #[inline]
    pub fn capacity(&self) -> usize {
        self.mask
    }

    /// Makes room for at least `n` elements in total.
    ///
    /// # Panics
    ///
    /// Panics if the slot count overflows; aborts through
    /// `handle_alloc_error` if the allocator fails.
    pub fn reserve(&mut self, n: usize) {
        if let Err(kind) = self.try_grow(n) {
            kind.abort();
        }
    }

    /// Makes room for at least `n` elements in total, reporting failure
    /// instead of aborting. The deque is unchanged on error.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::{ErrorKind, RingDeque};
    ///
    /// let mut deque: RingDeque<u64> = RingDeque::new();
    /// assert!(deque.try_reserve(10).is_ok());
    /// assert_eq!(deque.capacity(), 15);
    ///
    /// let err = deque.try_reserve(usize::MAX).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::CapacityOverflow);
    /// assert_eq!(deque.capacity(), 15);
    /// ```
    pub fn try_reserve(&mut self, n: usize) -> Result<(), CapacityError> {
        self.try_grow(n).map_err(CapacityError::from)
    }

    /// Shrinks the backing block to the smallest power of two that still
    /// holds every element plus the free slot. An empty deque releases its
    /// block entirely.
    pub fn shrink_to_fit(&mut self) {
        let len = self.len();
        if len == 0 {
            unsafe { self.release() }
            return;
        }
        let slots = (len + 1).next_power_of_two();
        if slots < self.slots() {
            if let Err(kind) = unsafe { self.relocate(slots) } {
                kind.abort();
            }
        }
    }

    /// Returns a reference to the element at logical index `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingDeque;
    ///
    /// let mut deque = RingDeque::new();
    /// deque.push_back(2);
    /// deque.push_front(1);
    /// assert_eq!(*deque.at(0), 1);
    /// assert_eq!(*deque.at(1), 2);
    /// ```
    #[inline]
    pub fn at(&self, idx: usize) -> &T {
        let len = self.len();
        assert!(idx < len, "index out of bounds: the len is {} but the index is {}", len, idx);
        unsafe { self.get_unchecked(idx) }
    }

    /// Returns a mutable reference to the element at logical index `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= len`.
    #[inline]
    pub fn at_mut(&mut self, idx: usize) -> &mut T {
        let len = self.len();
        assert!(idx < len, "index out of bounds: the len is {} but the index is {}", len, idx);
        unsafe { self.get_unchecked_mut(idx) }
    }

    /// Returns the element at `idx` without a bounds check.
    ///
    /// # Safety
    ///
    /// `idx` must be less than `len`. Debug builds assert it.
    #[inline]
    pub unsafe fn get_unchecked(&self, idx: usize) -> &T {
        debug_assert!(idx < self.len(), "idx={} len={}", idx, self.len());
        &*self.slot_ptr(self.to_slot(idx))
    }

    /// Returns the element at `idx` mutably without a bounds check.
    ///
    /// # Safety
    ///
    /// `idx` must be less than `len`. Debug builds assert it.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, idx: usize) -> &mut T {
        debug_assert!(idx < self.len(), "idx={} len={}", idx, self.len());
        &mut *self.slot_ptr(self.to_slot(idx))
    }

    /// Retrieves an element in the `RingDeque` by index.
    ///
    /// Element at index 0 is the front of the queue.
    #[inline]
    pub fn get(&self, idx: usize) -> Option<&T> {
        if idx < self.len() {
            unsafe { Some(self.get_unchecked(idx)) }
        } else {
            None
        }
    }

    /// Retrieves an element in the `RingDeque` mutably by index.
    #[inline]
    pub fn get_mut(&mut self, idx: usize) -> Option<&mut T> {
        if idx < self.len() {
            unsafe { Some(self.get_unchecked_mut(idx)) }
        } else {
            None
        }
    }

    /// Provides a reference to the front element, or `None` if the deque is
    /// empty.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    /// Provides a mutable reference to the front element, or `None` if the
    /// deque is empty.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0)
    }

    /// Provides a reference to the back element, or `None` if the deque is
    /// empty.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.len().checked_sub(1).and_then(|idx| self.get(idx))
    }

    /// Provides a mutable reference to the back element, or `None` if the
    /// deque is empty.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        match self.len().checked_sub(1) {
            Some(idx) => self.get_mut(idx),
            None => None,
        }
    }

    /// Swaps elements at indices `i` and `j`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn swap(&mut self, i: usize, j: usize) {
        assert!(i < self.len());
        assert!(j < self.len());
        let ri = self.slot_ptr(self.to_slot(i));
        let rj = self.slot_ptr(self.to_slot(j));
        unsafe { ptr::swap(ri, rj) }
    }

    /// Returns a front-to-back iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingDeque;
    ///
    /// let mut deque = RingDeque::new();
    /// deque.push_back(5);
    /// deque.push_back(3);
    /// deque.push_front(4);
    /// let c: Vec<&i32> = deque.iter().collect();
    /// assert_eq!(c, [&4, &5, &3]);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            ring: self.buf.as_ptr(),
            mask: self.mask,
            start: self.start,
            end: self.end,
            marker: PhantomData,
        }
    }

    /// Returns a front-to-back iterator that returns mutable references.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            ring: self.buf.as_ptr(),
            mask: self.mask,
            start: self.start,
            end: self.end,
            marker: PhantomData,
        }
    }

    /// Returns a pair of slices which contain, in order, the contents of the
    /// `RingDeque`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingDeque;
    ///
    /// let mut deque = RingDeque::with_capacity(7);
    ///
    /// deque.push_back(0);
    /// deque.push_back(1);
    /// deque.push_back(2);
    ///
    /// assert_eq!(deque.as_slices(), (&[0, 1, 2][..], &[][..]));
    ///
    /// deque.push_front(10);
    /// deque.push_front(9);
    ///
    /// assert_eq!(deque.as_slices(), (&[9, 10][..], &[0, 1, 2][..]));
    /// ```
    #[inline]
    pub fn as_slices(&self) -> (&[T], &[T]) {
        let base = self.buf.as_ptr();
        unsafe {
            if self.is_contiguous() {
                (slice::from_raw_parts(base.add(self.start), self.end - self.start), &[])
            } else {
                (
                    slice::from_raw_parts(base.add(self.start), self.slots() - self.start),
                    slice::from_raw_parts(base, self.end),
                )
            }
        }
    }

    /// Returns a pair of slices which contain, in order, the contents of the
    /// `RingDeque`.
    #[inline]
    pub fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
        let base = self.buf.as_ptr();
        unsafe {
            if self.is_contiguous() {
                (slice::from_raw_parts_mut(base.add(self.start), self.end - self.start), &mut [])
            } else {
                (
                    slice::from_raw_parts_mut(base.add(self.start), self.slots() - self.start),
                    slice::from_raw_parts_mut(base, self.end),
                )
            }
        }
    }

    #[inline]
    fn push_back_expecting_space_available(&mut self, element: T) -> &mut T {
        debug_assert!(!self.is_full());
        let end = self.end;
        self.end = self.wrap_add(end, 1);
        unsafe { self.buffer_write(end, element) }
    }

    #[inline]
    fn push_front_expecting_space_available(&mut self, element: T) -> &mut T {
        debug_assert!(!self.is_full());
        let new_start = self.wrap_sub(self.start, 1);
        self.start = new_start;
        unsafe { self.buffer_write(new_start, element) }
    }

    /// Appends an element to the back of the deque, growing if it is full,
    /// and returns a reference to the stored element.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingDeque;
    ///
    /// let mut deque = RingDeque::new();
    /// *deque.push_back(1) += 10;
    /// assert_eq!(deque.back(), Some(&11));
    /// ```
    pub fn push_back(&mut self, element: T) -> &mut T {
        match self.try_push_back(element) {
            Ok(stored) => stored,
            Err(err) => err.kind().abort(),
        }
    }

    /// Like `push_back`, but hands the element back if the deque could not
    /// grow.
    pub fn try_push_back(&mut self, element: T) -> Result<&mut T, CapacityError<T>> {
        if self.is_full() {
            if let Err(kind) = self.grow_for_push() {
                return Err(CapacityError::new(element, kind));
            }
        }
        Ok(self.push_back_expecting_space_available(element))
    }

    /// Prepends an element to the deque, growing if it is full, and returns a
    /// reference to the stored element.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingDeque;
    ///
    /// let mut deque = RingDeque::new();
    /// deque.push_front(1);
    /// deque.push_front(2);
    /// assert_eq!(deque.front(), Some(&2));
    /// ```
    pub fn push_front(&mut self, element: T) -> &mut T {
        match self.try_push_front(element) {
            Ok(stored) => stored,
            Err(err) => err.kind().abort(),
        }
    }

    /// Like `push_front`, but hands the element back if the deque could not
    /// grow.
    pub fn try_push_front(&mut self, element: T) -> Result<&mut T, CapacityError<T>> {
        if self.is_full() {
            if let Err(kind) = self.grow_for_push() {
                return Err(CapacityError::new(element, kind));
            }
        }
        Ok(self.push_front_expecting_space_available(element))
    }

    /// Builds an element from `raw` and appends it.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingDeque;
    ///
    /// let mut names: RingDeque<String> = RingDeque::new();
    /// names.emplace_back("ada");
    /// names.emplace_front("bob");
    /// assert!(names.iter().eq(["bob", "ada"].iter()));
    /// ```
    #[inline]
    pub fn emplace_back<R>(&mut self, raw: R) -> &mut T
    where
        T: From<R>,
    {
        self.push_back(T::from(raw))
    }

    /// Builds an element from `raw` and prepends it.
    #[inline]
    pub fn emplace_front<R>(&mut self, raw: R) -> &mut T
    where
        T: From<R>,
    {
        self.push_front(T::from(raw))
    }

    /// Removes and returns an element from the front of the deque.
    ///
    /// Returns the element, or `None` if the deque is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingDeque;
    ///
    /// let mut deque = RingDeque::new();
    /// deque.push_back(1);
    /// deque.push_back(2);
    ///
    /// assert_eq!(deque.pop_front(), Some(1));
    /// assert_eq!(deque.pop_front(), Some(2));
    /// assert_eq!(deque.pop_front(), None);
    /// ```
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let start = self.start;
        self.start = self.wrap_add(start, 1);
        unsafe { Some(self.buffer_read(start)) }
    }

    /// Removes an element from the back of the deque.
    ///
    /// Returns the element, or `None` if the deque is empty.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let new_end = self.wrap_sub(self.end, 1);
        self.end = new_end;
        unsafe { Some(self.buffer_read(new_end)) }
    }

    /// Fills a freshly opened gap from `iter`, closing whatever part of the
    /// gap it leaves unfilled. Returns the physical slot of the gap.
    fn try_insert_from<I>(&mut self, idx: usize, n: usize, iter: I) -> Result<usize, ErrorKind>
    where
        I: IntoIterator<Item = T>,
    {
        let slot = unsafe { self.insert_uninit(idx, n)? };

        let mut gap = Gap {
            deque: self,
            idx,
            n,
            filled: 0,
        };
        for element in iter.into_iter().take(n) {
            let at = gap.deque.to_slot(gap.idx + gap.filled);
            unsafe {
                gap.deque.buffer_write(at, element);
            }
            gap.filled += 1;
        }
        drop(gap);

        Ok(slot)
    }

    /// Inserts clones of `values` so that the first lands at logical index
    /// `idx`, shifting the elements at `idx..` toward the back.
    ///
    /// Returns the position of the first inserted element.
    ///
    /// # Panics
    ///
    /// Panics if `idx > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingDeque;
    ///
    /// let mut deque: RingDeque<_> = vec![1, 5].into_iter().collect();
    /// let pos = deque.insert_n(1, &[2, 3, 4]);
    /// assert_eq!(deque.value_at(pos), Some(&2));
    /// assert!(deque.iter().eq([1, 2, 3, 4, 5].iter()));
    /// ```
    pub fn insert_n(&mut self, idx: usize, values: &[T]) -> Pos
    where
        T: Clone,
    {
        match self.try_insert_n(idx, values) {
            Ok(pos) => pos,
            Err(err) => err.kind().abort(),
        }
    }

    /// Like `insert_n`, but reports growth failure. The deque is unchanged on
    /// error.
    pub fn try_insert_n(&mut self, idx: usize, values: &[T]) -> Result<Pos, CapacityError>
    where
        T: Clone,
    {
        let slot = self.try_insert_from(idx, values.len(), values.iter().cloned())?;
        Ok(self.pos(slot))
    }

    /// Inserts elements built from `raws` with `T::from`, starting at logical
    /// index `idx`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingDeque;
    ///
    /// let mut words: RingDeque<String> = RingDeque::new();
    /// words.emplace_back("c");
    /// words.insert_constructed_n(0, ["a", "b"]);
    /// assert!(words.iter().eq(["a", "b", "c"].iter()));
    /// ```
    pub fn insert_constructed_n<R, I>(&mut self, idx: usize, raws: I) -> Pos
    where
        T: From<R>,
        I: IntoIterator<Item = R>,
        I::IntoIter: ExactSizeIterator,
    {
        match self.try_insert_constructed_n(idx, raws) {
            Ok(pos) => pos,
            Err(err) => err.kind().abort(),
        }
    }

    /// Like `insert_constructed_n`, but reports growth failure.
    pub fn try_insert_constructed_n<R, I>(&mut self, idx: usize, raws: I) -> Result<Pos, CapacityError>
    where
        T: From<R>,
        I: IntoIterator<Item = R>,
        I::IntoIter: ExactSizeIterator,
    {
        let raws = raws.into_iter();
        let slot = self.try_insert_from(idx, raws.len(), raws.map(T::from))?;
        Ok(self.pos(slot))
    }

    /// Inserts the items of `iter` starting at logical index `idx`.
    ///
    /// If the iterator yields fewer items than it announced, only the yielded
    /// items are inserted.
    pub fn insert_iter<I>(&mut self, idx: usize, iter: I) -> Pos
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let iter = iter.into_iter();
        match self.try_insert_from(idx, iter.len(), iter) {
            Ok(slot) => self.pos(slot),
            Err(kind) => kind.abort(),
        }
    }

    /// Inserts an element at `idx` within the `RingDeque` and returns a
    /// reference to it.
    ///
    /// Element at index 0 is the front of the queue.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is greater than `RingDeque`'s length
    pub fn insert(&mut self, idx: usize, element: T) -> &mut T {
        match self.try_insert_from(idx, 1, Some(element)) {
            Ok(slot) => unsafe { &mut *self.slot_ptr(slot) },
            Err(kind) => kind.abort(),
        }
    }

    /// Drops the `n` elements at logical indices `idx..idx + n` and closes the
    /// gap by shifting the elements behind it toward the front. Capacity is
    /// retained.
    ///
    /// Elements are dropped back to front.
    ///
    /// # Panics
    ///
    /// Panics if `idx + n > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingDeque;
    ///
    /// let mut deque: RingDeque<_> = (0..6).collect();
    /// deque.erase_n(1, 3);
    /// assert!(deque.iter().eq([0, 4, 5].iter()));
    /// ```
    pub fn erase_n(&mut self, idx: usize, n: usize) {
        let len = self.len();
        assert!(
            idx <= len && n <= len - idx,
            "erase range {}..{} out of bounds for len {}",
            idx,
            idx.saturating_add(n),
            len
        );
        if n == 0 {
            return;
        }

        // Detach everything from `idx` on first: a panicking drop then leaks
        // the rest instead of dropping twice.
        let end = self.end;
        self.end = self.to_slot(idx);
        for i in (idx..idx + n).rev() {
            unsafe { ptr::drop_in_place(self.slot_ptr(self.to_slot(i))) }
        }
        self.end = end;
        unsafe { self.close_gap(idx, n) }
    }

    /// Removes and returns the element at `idx`, shifting the elements behind
    /// it toward the front. Returns `None` if `idx` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingDeque;
    ///
    /// let mut deque: RingDeque<_> = (1..4).collect();
    /// assert_eq!(deque.remove(1), Some(2));
    /// assert_eq!(deque.get(1), Some(&3));
    /// assert_eq!(deque.remove(5), None);
    /// ```
    pub fn remove(&mut self, idx: usize) -> Option<T> {
        if idx >= self.len() {
            return None;
        }
        unsafe {
            let element = self.buffer_read(self.to_slot(idx));
            self.close_gap(idx, 1);
            Some(element)
        }
    }

    /// Shortens the deque to `len` elements, dropping the rest.
    pub fn truncate(&mut self, len: usize) {
        let cur = self.len();
        if len < cur {
            self.erase_n(len, cur - len);
        }
    }

    /// Clears the deque, removing all values. Capacity is retained.
    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Retains only the elements specified by the predicate.
    ///
    /// In other words, remove all elements `e` such that `f(&e)` returns false.
    /// This method operates in place and preserves the order of the retained
    /// elements.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> bool,
    {
        let len = self.len();
        let mut del = 0;
        for i in 0..len {
            if !f(&self[i]) {
                del += 1;
            } else if del > 0 {
                self.swap(i - del, i);
            }
        }
        if del > 0 {
            self.truncate(len - del);
        }
    }

    /// Create a draining iterator that removes the specified range in the
    /// `RingDeque` and yields the removed items.
    ///
    /// Note 1: The element range is removed even if the iterator is not
    /// consumed until the end.
    ///
    /// Note 2: It is unspecified how many elements are removed from the deque,
    /// if the `Drain` value is not dropped, but the borrow it holds expires
    /// (eg. due to mem::forget).
    ///
    /// # Panics
    ///
    /// Panics if the starting point is greater than the end point or if
    /// the end point is greater than the length of the deque.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingDeque;
    ///
    /// let mut deque: RingDeque<_> = vec![1, 2, 3].into_iter().collect();
    /// let drain1: Vec<_> = deque.drain(2..).collect();
    /// assert_eq!(drain1, vec![3]);
    ///
    /// // A full range clears all contents
    /// let drain2: Vec<_> = deque.drain(..).collect();
    /// assert_eq!(drain2, vec![1, 2]);
    /// assert!(deque.is_empty());
    /// ```
    pub fn drain<R>(&mut self, range: R) -> Drain<'_, T>
    where
        R: RangeArgument<usize>,
    {
        let len = self.len();
        let start = range.start().unwrap_or(0);
        let end = range.end().unwrap_or(len);
        assert!(start <= end, "drain lower bound was too large");
        assert!(end <= len, "drain upper bound was too large");

        // Only the prefix stays visible while the drain is alive.
        self.end = self.to_slot(start);

        Drain {
            deque: self,
            drain_start: start,
            drain_end: end,
            orig_len: len,
            next: start,
            next_back: end,
        }
    }

    /// Moves all the elements of `other` to the back of `self`, leaving
    /// `other` empty.
    pub fn append(&mut self, other: &mut RingDeque<T>) {
        self.reserve(self.len() + other.len());
        self.extend(other.drain(..));
    }
}

/// Tracks a partially filled gap and closes the unfilled remainder on drop,
/// including when a clone or conversion unwinds.
struct Gap<'a, T: 'a> {
    deque: &'a mut RingDeque<T>,
    idx: usize,
    n: usize,
    filled: usize,
}

impl<'a, T> Drop for Gap<'a, T> {
    fn drop(&mut self) {
        if self.filled < self.n {
            unsafe {
                self.deque
                    .close_gap(self.idx + self.filled, self.n - self.filled)
            }
        }
    }
}

impl<T> Drop for RingDeque<T> {
    fn drop(&mut self) {
        /// Drops the back half even if dropping the front half panics.
        struct Dropper<'a, T>(&'a mut [T]);

        impl<'a, T> Drop for Dropper<'a, T> {
            fn drop(&mut self) {
                unsafe { ptr::drop_in_place(self.0) }
            }
        }

        let (front, back) = self.as_mut_slices();
        unsafe {
            let _back_dropper = Dropper(back);
            ptr::drop_in_place(front);
        }
        unsafe { self.release() }
    }
}
