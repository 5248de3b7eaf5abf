use alloc::alloc::{alloc as allocate, dealloc, Layout};
use core::cmp;
use core::mem;
use core::ptr::{self, NonNull};

use super::RingDeque;
use crate::error::ErrorKind;
use crate::utils::*;

impl<T> RingDeque<T> {
    #[inline]
    pub(super) fn wrap_add(&self, index: usize, addend: usize) -> usize {
        wrap_add(index, addend, self.mask)
    }

    #[inline]
    pub(super) fn wrap_sub(&self, index: usize, subtrahend: usize) -> usize {
        wrap_sub(index, subtrahend, self.mask)
    }

    /// Physical slot of logical index `idx`.
    #[inline]
    pub(super) fn to_slot(&self, idx: usize) -> usize {
        self.wrap_add(self.start, idx)
    }

    /// Logical index of physical slot `slot`.
    #[inline]
    pub(super) fn to_index(&self, slot: usize) -> usize {
        count(self.start, slot, self.mask)
    }

    /// Number of physical slots in the backing block.
    #[inline]
    pub(super) fn slots(&self) -> usize {
        if self.mask == 0 {
            0
        } else {
            self.mask + 1
        }
    }

    #[inline]
    pub(super) fn is_contiguous(&self) -> bool {
        self.start <= self.end
    }

    #[inline]
    pub(super) fn is_full(&self) -> bool {
        self.len() == self.mask
    }

    #[inline]
    pub(super) fn slot_ptr(&self, slot: usize) -> *mut T {
        debug_assert!(
            slot < cmp::max(self.slots(), 1),
            "slot={} slots={}",
            slot,
            self.slots()
        );
        // SAFETY: `slot` lies inside the block (or the block is empty and
        // `slot` is zero, giving the dangling base pointer back).
        unsafe { self.buf.as_ptr().add(slot) }
    }

    #[inline]
    pub(super) unsafe fn buffer_read(&mut self, slot: usize) -> T {
        ptr::read(self.slot_ptr(slot))
    }

    #[inline]
    pub(super) unsafe fn buffer_write(&mut self, slot: usize, element: T) -> &mut T {
        let p = self.slot_ptr(slot);
        ptr::write(p, element);
        &mut *p
    }

    /// Copies a contiguous block of memory len long from src to dst
    #[inline]
    unsafe fn copy(&mut self, dst: usize, src: usize, len: usize) {
        debug_assert!(
            dst + len <= self.slots(),
            "cpy dst={} src={} len={} cap={}",
            dst,
            src,
            len,
            self.slots()
        );
        debug_assert!(
            src + len <= self.slots(),
            "cpy dst={} src={} len={} cap={}",
            dst,
            src,
            len,
            self.slots()
        );
        ptr::copy(self.slot_ptr(src), self.slot_ptr(dst), len);
    }

    /// Copies a potentially wrapping block of memory len long from src to dest.
    /// (abs(dst - src) + len) must be no larger than the slot count (there must
    /// be at most one continuous overlapping region between src and dest).
    pub(super) unsafe fn wrap_copy(&mut self, dst: usize, src: usize, len: usize) {
        if src == dst || len == 0 {
            return;
        }

        let cap = self.slots();
        debug_assert!(
            cmp::min(self.wrap_sub(dst, src), self.wrap_sub(src, dst)) + len <= cap,
            "wrc dst={} src={} len={} cap={}",
            dst,
            src,
            len,
            cap
        );

        let dst_after_src = self.wrap_sub(dst, src) < len;

        let src_pre_wrap_len = cap - src;
        let dst_pre_wrap_len = cap - dst;
        let src_wraps = src_pre_wrap_len < len;
        let dst_wraps = dst_pre_wrap_len < len;

        match (dst_after_src, src_wraps, dst_wraps) {
            (_, false, false) => {
                // src doesn't wrap, dst doesn't wrap
                //
                //        S . . .
                // 1 [_ _ A A B B C C _]
                // 2 [_ _ A A A A B B _]
                //            D . . .
                //
                self.copy(dst, src, len);
            }
            (false, false, true) => {
                // dst before src, src doesn't wrap, dst wraps
                //
                //    S . . .
                // 1 [A A B B _ _ _ C C]
                // 2 [A A B B _ _ _ A A]
                // 3 [B B B B _ _ _ A A]
                //    . .           D .
                //
                self.copy(dst, src, dst_pre_wrap_len);
                self.copy(0, src + dst_pre_wrap_len, len - dst_pre_wrap_len);
            }
            (true, false, true) => {
                // src before dst, src doesn't wrap, dst wraps
                //
                //              S . . .
                // 1 [C C _ _ _ A A B B]
                // 2 [B B _ _ _ A A B B]
                // 3 [B B _ _ _ A A A A]
                //    . .           D .
                //
                self.copy(0, src + dst_pre_wrap_len, len - dst_pre_wrap_len);
                self.copy(dst, src, dst_pre_wrap_len);
            }
            (false, true, false) => {
                // dst before src, src wraps, dst doesn't wrap
                //
                //    . .           S .
                // 1 [C C _ _ _ A A B B]
                // 2 [C C _ _ _ B B B B]
                // 3 [C C _ _ _ B B C C]
                //              D . . .
                //
                self.copy(dst, src, src_pre_wrap_len);
                self.copy(dst + src_pre_wrap_len, 0, len - src_pre_wrap_len);
            }
            (true, true, false) => {
                // src before dst, src wraps, dst doesn't wrap
                //
                //    . .           S .
                // 1 [A A B B _ _ _ C C]
                // 2 [A A A A _ _ _ C C]
                // 3 [C C A A _ _ _ C C]
                //    D . . .
                //
                self.copy(dst + src_pre_wrap_len, 0, len - src_pre_wrap_len);
                self.copy(dst, src, src_pre_wrap_len);
            }
            (false, true, true) => {
                // dst before src, src wraps, dst wraps
                //
                //    . . .         S .
                // 1 [A B C D _ E F G H]
                // 2 [A B C D _ E G H H]
                // 3 [A B C D _ E G H A]
                // 4 [B C C D _ E G H A]
                //    . .         D . .
                //
                debug_assert!(dst_pre_wrap_len > src_pre_wrap_len);
                let delta = dst_pre_wrap_len - src_pre_wrap_len;
                self.copy(dst, src, src_pre_wrap_len);
                self.copy(dst + src_pre_wrap_len, 0, delta);
                self.copy(0, delta, len - dst_pre_wrap_len);
            }
            (true, true, true) => {
                // src before dst, src wraps, dst wraps
                //
                //    . .         S . .
                // 1 [A B C D _ E F G H]
                // 2 [A A B D _ E F G H]
                // 3 [H A B D _ E F G H]
                // 4 [H A B D _ E F F G]
                //    . . .         D .
                //
                debug_assert!(src_pre_wrap_len > dst_pre_wrap_len);
                let delta = src_pre_wrap_len - dst_pre_wrap_len;
                self.copy(delta, 0, len - src_pre_wrap_len);
                self.copy(0, cap - delta, delta);
                self.copy(dst, src, dst_pre_wrap_len);
            }
        }
    }

    /// Opens `n` uninitialized slots at logical index `idx`.
    ///
    /// Elements at `idx..` move `n` slots toward the back and `end` advances
    /// by `n`, so the gap counts as live. The caller must fill it (or close it
    /// again with `close_gap`) before anything else observes the deque.
    ///
    /// Returns the physical slot of the first opened position, computed after
    /// any reallocation.
    pub(super) unsafe fn insert_uninit(&mut self, idx: usize, n: usize) -> Result<usize, ErrorKind> {
        let len = self.len();
        assert!(
            idx <= len,
            "insertion index (is {}) should be <= len (is {})",
            idx,
            len
        );

        let total = len.checked_add(n).ok_or(ErrorKind::CapacityOverflow)?;
        if total > self.mask {
            self.try_grow(total)?;
        }

        let src = self.to_slot(idx);
        let dst = self.to_slot(idx + n);
        self.wrap_copy(dst, src, len - idx);
        self.end = self.wrap_add(self.end, n);
        Ok(src)
    }

    /// Closes `n` slots at logical index `idx` without dropping them.
    ///
    /// Elements behind the gap move `n` slots toward the front and `end`
    /// retreats by `n`.
    pub(super) unsafe fn close_gap(&mut self, idx: usize, n: usize) {
        let len = self.len();
        debug_assert!(idx + n <= len, "gap idx={} n={} len={}", idx, n, len);

        let dst = self.to_slot(idx);
        let src = self.to_slot(idx + n);
        self.wrap_copy(dst, src, len - idx - n);
        self.end = self.wrap_sub(self.end, n);
    }

    /// Makes room for `total` elements, growing the block to the smallest
    /// power of two that keeps one slot free.
    pub(super) fn try_grow(&mut self, total: usize) -> Result<(), ErrorKind> {
        if total <= self.mask {
            return Ok(());
        }
        let slots = total
            .checked_add(1)
            .and_then(usize::checked_next_power_of_two)
            .ok_or(ErrorKind::CapacityOverflow)?;
        unsafe { self.relocate(slots) }
    }

    /// Growth step taken by a push onto a full deque; doubles the slot count.
    #[inline]
    pub(super) fn grow_for_push(&mut self) -> Result<(), ErrorKind> {
        let total = self.mask.checked_add(3).ok_or(ErrorKind::CapacityOverflow)?;
        self.try_grow(total)
    }

    /// Moves every element into a fresh block of `slots` slots, in logical
    /// order starting at physical slot zero.
    ///
    /// On failure nothing has been touched.
    pub(super) unsafe fn relocate(&mut self, slots: usize) -> Result<(), ErrorKind> {
        let len = self.len();
        debug_assert!(slots.is_power_of_two(), "slots={}", slots);
        debug_assert!(slots > len, "slots={} len={}", slots, len);

        if mem::size_of::<T>() == 0 {
            self.start = 0;
            self.end = len;
            self.mask = slots - 1;
            return Ok(());
        }

        let layout = Self::array_layout(slots)?;
        let buf = NonNull::new(allocate(layout) as *mut T).ok_or(ErrorKind::AllocError { layout })?;

        let (front, back) = self.as_slices();
        let (front_len, back_len) = (front.len(), back.len());
        ptr::copy_nonoverlapping(front.as_ptr(), buf.as_ptr(), front_len);
        ptr::copy_nonoverlapping(back.as_ptr(), buf.as_ptr().add(front_len), back_len);

        self.release();
        self.buf = buf;
        self.start = 0;
        self.end = len;
        self.mask = slots - 1;
        Ok(())
    }

    /// Frees the backing block without touching any element.
    pub(super) unsafe fn release(&mut self) {
        let slots = self.slots();
        if slots != 0 && mem::size_of::<T>() != 0 {
            // Already allocated with this layout, so it cannot overflow.
            let layout = Layout::from_size_align_unchecked(mem::size_of::<T>() * slots, mem::align_of::<T>());
            dealloc(self.buf.as_ptr() as *mut u8, layout);
        }
        self.buf = NonNull::dangling();
        self.start = 0;
        self.end = 0;
        self.mask = 0;
    }

    fn array_layout(slots: usize) -> Result<Layout, ErrorKind> {
        match Layout::array::<T>(slots) {
            Ok(layout) if layout.size() <= isize::MAX as usize => Ok(layout),
            _ => Err(ErrorKind::CapacityOverflow),
        }
    }

    /// Places the cursors of an empty deque at `slot`.
    #[cfg(test)]
    pub(crate) unsafe fn set_padding(&mut self, slot: usize) {
        assert!(self.is_empty());
        self.start = slot & self.mask;
        self.end = self.start;
    }

    #[cfg(test)]
    pub(crate) fn cursors(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots()
    }
}
