//! Index arithmetic over a power-of-two ring.
//!
//! `mask` is always `slots - 1`. An unallocated ring has a mask of zero, which
//! maps every index to slot zero and every count to zero.

#[inline]
pub fn wrap_add(index: usize, addend: usize, mask: usize) -> usize {
    index.wrapping_add(addend) & mask
}

#[inline]
pub fn wrap_sub(index: usize, subtrahend: usize, mask: usize) -> usize {
    index.wrapping_sub(subtrahend) & mask
}

/// Number of slots walked going forward from `start` to `end`.
#[inline]
pub fn count(start: usize, end: usize, mask: usize) -> usize {
    end.wrapping_sub(start) & mask
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_around_the_mask() {
        assert_eq!(wrap_add(3, 1, 3), 0);
        assert_eq!(wrap_add(2, 5, 7), 7);
        assert_eq!(wrap_sub(0, 1, 3), 3);
        assert_eq!(wrap_sub(5, 2, 7), 3);
    }

    #[test]
    fn count_across_the_seam() {
        assert_eq!(count(3, 1, 3), 2);
        assert_eq!(count(1, 1, 7), 0);
        assert_eq!(count(6, 2, 7), 4);
    }

    #[test]
    fn unallocated_mask_collapses() {
        assert_eq!(wrap_add(0, 1, 0), 0);
        assert_eq!(wrap_sub(0, 1, 0), 0);
        assert_eq!(count(0, 0, 0), 0);
    }
}
