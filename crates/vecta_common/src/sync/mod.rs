//! Containers that can be shared between threads.
//!
//! [`DynArr`](crate::collections::DynArr) has no internal locking, it relies on the borrow checker to give a single writer at a time.
//! When the same array needs to be mutated from multiple threads through a shared reference, use [`GuardedDynArr`] instead:
//! every one of its operations, reads included, holds its mutex for the duration of the call.

mod guarded;

pub use guarded::GuardedDynArr;

pub use parking_lot::MutexGuard;
