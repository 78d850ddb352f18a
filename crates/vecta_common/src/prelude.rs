pub use crate::collections::{DynArr, DynArrError, Sequence, TryReserveError};
pub use crate::sync::GuardedDynArr;
pub use crate::dynarr;
