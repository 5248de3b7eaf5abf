//! Error types returned when the deque cannot grow.

use alloc::alloc::{handle_alloc_error, Layout};
use core::fmt;
#[cfg(feature = "std")]
use std::error::Error;

/// Why the backing storage could not grow.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// The requested slot count overflows `usize` or `isize::MAX` bytes.
    CapacityOverflow,
    /// The allocator refused a request for `layout`.
    AllocError {
        /// The layout that could not be allocated.
        layout: Layout,
    },
}

impl ErrorKind {
    /// Escalates a failed growth the way the infallible operations report it.
    pub(crate) fn abort(self) -> ! {
        match self {
            ErrorKind::CapacityOverflow => panic!("{}", CAPERROR),
            ErrorKind::AllocError { layout } => handle_alloc_error(layout),
        }
    }
}

/// Error value indicating that the deque could not grow.
///
/// The operation that hit it has been aborted and the deque is unchanged.
/// Fallible pushes hand the rejected element back through `element`.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct CapacityError<T = ()> {
    /// The element that caused the error.
    pub element: T,
    kind: ErrorKind,
}

const CAPERROR: &str = "capacity overflow";
const ALLOCERROR: &str = "memory allocation failed";

impl<T> CapacityError<T> {
    #[inline]
    pub(crate) const fn new(element: T, kind: ErrorKind) -> Self {
        CapacityError { element, kind }
    }

    /// What went wrong while growing.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Extracts the element that could not be stored.
    #[inline]
    pub fn into_element(self) -> T {
        self.element
    }

    /// Drops the element, keeping only the failure.
    #[inline]
    pub fn simplify(self) -> CapacityError {
        CapacityError::new((), self.kind)
    }

    fn description(&self) -> &'static str {
        match self.kind {
            ErrorKind::CapacityOverflow => CAPERROR,
            ErrorKind::AllocError { .. } => ALLOCERROR,
        }
    }
}

impl From<ErrorKind> for CapacityError {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        CapacityError::new((), kind)
    }
}

#[cfg(feature = "std")]
impl<T> Error for CapacityError<T> {}

impl<T> fmt::Display for CapacityError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl<T> fmt::Debug for CapacityError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CapacityError: {} ({:?})", self.description(), self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_failure() {
        let overflow = CapacityError::new(7, ErrorKind::CapacityOverflow);
        assert_eq!(format!("{}", overflow), "capacity overflow");

        let layout = Layout::new::<u64>();
        let oom = CapacityError::from(ErrorKind::AllocError { layout });
        assert_eq!(format!("{}", oom), "memory allocation failed");
        assert_eq!(oom.kind(), ErrorKind::AllocError { layout });
    }

    #[test]
    fn element_is_handed_back() {
        let err = CapacityError::new(String::from("kept"), ErrorKind::CapacityOverflow);
        assert_eq!(err.simplify().kind(), ErrorKind::CapacityOverflow);

        let err = CapacityError::new(String::from("kept"), ErrorKind::CapacityOverflow);
        assert_eq!(err.into_element(), "kept");
    }
}
