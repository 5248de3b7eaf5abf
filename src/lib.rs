//! A growable circular buffer with power-of-two capacity.
//!
//! This queue has `O(1)` amortized inserts and removals from both ends of the
//! container. It also has `O(1)` indexing like a vector: a logical index `i`
//! is stored in physical slot `(start + i) & mask`. Inserting or erasing in
//! the middle shifts the elements behind the position and costs `O(n)`.
//!
//! This crate is inspired by [**andylokandy/arraydeque**]
//! [**andylokandy/arraydeque**]: https://github.com/andylokandy/arraydeque
//!
//! # Feature Flags
//! The **ringdeque** crate has the following cargo feature flags:
//!
//! - `std`
//!   - Optional, enabled by default
//!   - Use libstd and implement `std::error::Error` for `CapacityError`
//!
//! # Usage
//!
//! First, add the following to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! ringdeque = "0.1"
//! ```
//!
//! Without the standard library the crate only needs `alloc`:
//!
//! ```toml
//! [dependencies]
//! ringdeque = { version = "0.1", default-features = false }
//! ```
//!
//! # Capacity
//!
//! The backing block always holds a power-of-two number of slots and one slot
//! is kept free, so `capacity()` is always `slots - 1`. A push onto a full
//! deque doubles the block and moves the elements into logical order at the
//! beginning of the new one.
//!
//! # Examples
//! ```
//! use ringdeque::RingDeque;
//!
//! let mut deque = RingDeque::new();
//! assert_eq!(deque.capacity(), 0);
//!
//! deque.push_back(1);
//! deque.push_back(2);
//! assert_eq!(deque.len(), 2);
//! assert_eq!(deque.capacity(), 3);
//!
//! assert_eq!(deque.pop_front(), Some(1));
//! assert_eq!(deque.pop_front(), Some(2));
//! assert_eq!(deque.pop_front(), None);
//! ```
//!
//! # Insert & Erase
//! ```
//! use ringdeque::RingDeque;
//!
//! let mut deque: RingDeque<_> = (0..4).collect();
//!
//! deque.insert_n(2, &[10, 11]);
//! assert_eq!(format!("{:?}", deque), "[0, 1, 10, 11, 2, 3]");
//!
//! deque.erase_n(1, 2);
//! assert_eq!(format!("{:?}", deque), "[0, 11, 2, 3]");
//! assert_eq!(deque[1], 11);
//! ```
//!
//! # Positions
//! ```
//! use ringdeque::RingDeque;
//!
//! let mut deque: RingDeque<_> = vec![3, 1, 4, 1, 5].into_iter().collect();
//!
//! let pos = deque.find(&1);
//! assert_eq!(deque.index_of(pos), 1);
//!
//! let next = deque.erase_at(pos);
//! assert_eq!(deque.value_at(next), Some(&4));
//! assert_eq!(deque.find(&9), deque.end());
//! ```
//!
//! # Fallible growth
//! ```
//! use ringdeque::{ErrorKind, RingDeque};
//!
//! let mut deque: RingDeque<u32> = RingDeque::new();
//! let err = deque.try_reserve(usize::MAX).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::CapacityOverflow);
//! assert!(deque.is_empty());
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![deny(missing_docs)]

extern crate alloc;

mod utils;
mod ringdeque;
pub mod error;

pub use crate::error::{CapacityError, ErrorKind};
pub use crate::ringdeque::{Drain, IntoIter, Iter, IterMut, Pos, RangeArgument, RingDeque};
