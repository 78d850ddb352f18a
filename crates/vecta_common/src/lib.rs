//! Resizable array containers.
//!
//! - [`DynArr`](collections::DynArr): an unsynchronized, contiguous, growable array that manages its own heap buffer.
//! - [`GuardedDynArr`](sync::GuardedDynArr): the same container behind a mutex, serializing every operation.

pub mod collections;
pub mod sync;
pub mod prelude;

cfg_if::cfg_if! {
    if #[cfg(feature = "alloc_logging")] {
        use vecta_logging::LogCategory;

        /// Category used for buffer (re)allocation messages
        pub const ALLOC_LOG_CAT: LogCategory = LogCategory::new_with_sub("DynArr", "alloc");
    }
}

/// Logs a buffer (re)allocation at verbose level, when the `alloc_logging` feature is enabled.
macro_rules! log_alloc {
    ($($arg:tt)+) => {
        #[cfg(feature = "alloc_logging")]
        {
            ::vecta_logging::log_verbose!($crate::ALLOC_LOG_CAT, $($arg)+);
        }
    };
}
pub(crate) use log_alloc;
