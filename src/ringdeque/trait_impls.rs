use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter;
use core::ops::{Index, IndexMut};

use super::*;

impl<T> Clone for RingDeque<T>
where
    T: Clone,
{
    fn clone(&self) -> RingDeque<T> {
        let mut deque = RingDeque::with_capacity(self.len());
        deque.extend(self.iter().cloned());
        deque
    }
}

impl<T> Default for RingDeque<T> {
    #[inline]
    fn default() -> RingDeque<T> {
        RingDeque::new()
    }
}

impl<T> PartialEq for RingDeque<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &RingDeque<T>) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let (sa, sb) = self.as_slices();
        let (oa, ob) = other.as_slices();
        if sa.len() == oa.len() {
            sa == oa && sb == ob
        } else if sa.len() < oa.len() {
            // Always divisible in three sections, for example:
            // self:  [a b c|d e f]
            // other: [0 1 2 3|4 5]
            // front = 3, mid = 1,
            // [a b c] == [0 1 2] && [d] == [3] && [e f] == [4 5]
            let front = sa.len();
            let mid = oa.len() - front;

            let (oa_front, oa_mid) = oa.split_at(front);
            let (sb_mid, sb_back) = sb.split_at(mid);
            debug_assert_eq!(sa.len(), oa_front.len());
            debug_assert_eq!(sb_mid.len(), oa_mid.len());
            debug_assert_eq!(sb_back.len(), ob.len());
            sa == oa_front && sb_mid == oa_mid && sb_back == ob
        } else {
            let front = oa.len();
            let mid = sa.len() - front;

            let (sa_front, sa_mid) = sa.split_at(front);
            let (ob_mid, ob_back) = ob.split_at(mid);
            debug_assert_eq!(sa_front.len(), oa.len());
            debug_assert_eq!(sa_mid.len(), ob_mid.len());
            debug_assert_eq!(sb.len(), ob_back.len());
            sa_front == oa && sa_mid == ob_mid && sb == ob_back
        }
    }
}

#[cfg(test)]
impl<'a, T> PartialEq<&'a [T]> for RingDeque<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &&'a [T]) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().zip(other.iter()).all(|(l, r)| l == r)
    }
}

#[cfg(test)]
impl<T> PartialEq<Vec<T>> for RingDeque<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Vec<T>) -> bool {
        *self == &other[..]
    }
}

impl<T> Eq for RingDeque<T> where T: Eq {}

impl<T> PartialOrd for RingDeque<T>
where
    T: PartialOrd,
{
    fn partial_cmp(&self, other: &RingDeque<T>) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T> Ord for RingDeque<T>
where
    T: Ord,
{
    #[inline]
    fn cmp(&self, other: &RingDeque<T>) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T> Hash for RingDeque<T>
where
    T: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        // Element by element, so the hash does not depend on where the
        // ring wraps.
        self.iter().for_each(|element| element.hash(state));
    }
}

impl<T> Index<usize> for RingDeque<T> {
    type Output = T;

    #[inline]
    fn index(&self, idx: usize) -> &T {
        self.at(idx)
    }
}

impl<T> IndexMut<usize> for RingDeque<T> {
    #[inline]
    fn index_mut(&mut self, idx: usize) -> &mut T {
        self.at_mut(idx)
    }
}

impl<T> iter::FromIterator<T> for RingDeque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deque = RingDeque::new();
        deque.extend(iter);
        deque
    }
}

impl<T> IntoIterator for RingDeque<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { inner: self }
    }
}

impl<'a, T> IntoIterator for &'a RingDeque<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut RingDeque<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Extend the `RingDeque` with an iterator, growing as needed.
impl<T> Extend<T> for RingDeque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.reserve(self.len().saturating_add(lower));
        for element in iter {
            self.push_back(element);
        }
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for RingDeque<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().cloned());
    }
}

impl<T> fmt::Debug for RingDeque<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self).finish()
    }
}

impl<'a, T: 'a + fmt::Debug> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, T: 'a> fmt::Debug for IterMut<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut").field("len", &self.len()).finish()
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.inner).finish()
    }
}

impl<'a, T: 'a> fmt::Debug for Drain<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Drain").field("len", &self.len()).finish()
    }
}
