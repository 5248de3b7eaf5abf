use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::ptr;

use super::*;
use crate::utils::{count, wrap_add, wrap_sub};

unsafe impl<'a, T: Sync> Send for Iter<'a, T> {}
unsafe impl<'a, T: Sync> Sync for Iter<'a, T> {}
unsafe impl<'a, T: Send> Send for IterMut<'a, T> {}
unsafe impl<'a, T: Sync> Sync for IterMut<'a, T> {}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Iter {
            ring: self.ring,
            mask: self.mask,
            start: self.start,
            end: self.end,
            marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        if self.start == self.end {
            return None;
        }
        let start = self.start;
        self.start = wrap_add(self.start, 1, self.mask);
        unsafe { Some(&*self.ring.add(start)) }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = count(self.start, self.end, self.mask);
        (len, Some(len))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        if self.start == self.end {
            return None;
        }
        self.end = wrap_sub(self.end, 1, self.mask);
        unsafe { Some(&*self.ring.add(self.end)) }
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        if self.start == self.end {
            return None;
        }
        let start = self.start;
        self.start = wrap_add(self.start, 1, self.mask);
        unsafe { Some(&mut *self.ring.add(start)) }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = count(self.start, self.end, self.mask);
        (len, Some(len))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.start == self.end {
            return None;
        }
        self.end = wrap_sub(self.end, 1, self.mask);
        unsafe { Some(&mut *self.ring.add(self.end)) }
    }
}

impl<'a, T> ExactSizeIterator for IterMut<'a, T> {}

impl<'a, T> FusedIterator for IterMut<'a, T> {}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.inner.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.inner.len();
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.inner.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<'a, T: 'a> Drop for Drain<'a, T> {
    fn drop(&mut self) {
        // Drop whatever the caller left behind, front to back.
        while self.next < self.next_back {
            let slot = self.deque.to_slot(self.next);
            self.next += 1;
            unsafe { ptr::drop_in_place(self.deque.slot_ptr(slot)) }
        }

        // S = deque start; d = drain start; D = drain end; E = deque end
        //
        //        S   d   D   E
        // [. . . o o x x o o . . .]
        //
        let orig_end = self.deque.to_slot(self.orig_len);
        self.deque.end = orig_end;
        unsafe {
            self.deque
                .close_gap(self.drain_start, self.drain_end - self.drain_start)
        }
    }
}

impl<'a, T: 'a> Iterator for Drain<'a, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.next == self.next_back {
            return None;
        }
        let slot = self.deque.to_slot(self.next);
        self.next += 1;
        unsafe { Some(self.deque.buffer_read(slot)) }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.next_back - self.next;
        (len, Some(len))
    }
}

impl<'a, T: 'a> DoubleEndedIterator for Drain<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.next == self.next_back {
            return None;
        }
        self.next_back -= 1;
        let slot = self.deque.to_slot(self.next_back);
        unsafe { Some(self.deque.buffer_read(slot)) }
    }
}

impl<'a, T: 'a> ExactSizeIterator for Drain<'a, T> {}

impl<'a, T: 'a> FusedIterator for Drain<'a, T> {}
