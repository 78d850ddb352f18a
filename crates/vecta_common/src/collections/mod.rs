mod imp;

mod dynarr;
mod sequence;

use core::{alloc::Layout, fmt};

pub use dynarr::*;
pub use sequence::Sequence;

//--------------------------------------------------------------

macro_rules! impl_slice_partial_eq_generic {
    ([$($vars:tt)*] $lhs:ty, $rhs:ty) => {
        impl<T, U, $($vars)*> PartialEq<$rhs> for $lhs where
            T : PartialEq<U>,
        {
            #[inline]
            fn eq(&self, other: &$rhs) -> bool { self[..] == other[..] }
            #[allow(clippy::partialeq_ne_impl)]
            #[inline]
            fn ne(&self, other: &$rhs) -> bool { self[..] != other[..] }
        }
    };
}
use impl_slice_partial_eq_generic;

//--------------------------------------------------------------

/// Error returned when an element position or range does not fit the container.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DynArrError {
    /// `index` does not refer to a live element (`index >= len`), or the container is empty.
    OutOfRange { index: usize, len: usize },
    /// `start..end` is inverted, or is not contained in `0..=len`.
    InvalidRange { start: usize, end: usize, len: usize },
}

impl fmt::Display for DynArrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DynArrError::OutOfRange { index, len: 0 } => write!(f, "index {index} is out of range for an empty container"),
            DynArrError::OutOfRange { index, len } => write!(f, "index {index} is out of range (len is {len})"),
            DynArrError::InvalidRange { start, end, len } => write!(f, "invalid range {start}..{end} (len is {len})"),
        }
    }
}

impl std::error::Error for DynArrError {}

/// Error returned when a reservation can't be fulfilled.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TryReserveError {
    /// The requested capacity exceeds `isize::MAX` bytes.
    CapacityOverflow,
    /// The allocator returned an error for the given layout.
    AllocError(Layout),
}

impl fmt::Display for TryReserveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("memory allocation failed")?;
        match self {
            TryReserveError::CapacityOverflow => f.write_str(" because the computed capacity exceeded the collection's maximum"),
            TryReserveError::AllocError(layout) => write!(f, " because the allocator could not provide {} bytes (align {})", layout.size(), layout.align()),
        }
    }
}

impl std::error::Error for TryReserveError {}
