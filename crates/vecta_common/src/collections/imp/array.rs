use std::{
    alloc::{self, Layout},
    marker::PhantomData,
    mem::size_of,
    ptr::{self, NonNull},
};

use crate::collections::TryReserveError;

/// Low level utility for more ergonomically allocating, reallocating, and deallocating
/// a buffer of memory on the heap without having to worry about all the corner cases involved.
/// In particular:
///
/// - Produces a dangling pointer on zero-sized types.
/// - Produces a dangling pointer on zero-length allocations.
/// - Avoids freeing the dangling pointer.
/// - Catches all overflows in capacity computations (promotes them to "capacity overflow" errors).
///
/// This type does not in anyway inspect the memory it manages. When dropped it *will* free its memory, but it *won't* try to drop its contents.
/// It is up to the user of `RawArray` to handle the actual things *stored* inside of `RawArray`.
///
/// Note that the capacity of a zero-sized type is always infinite, so `capacity()` always returns `usize::MAX`.
pub(crate) struct RawArray<T> {
    ptr:      NonNull<T>,
    cap:      usize,
    _phantom: PhantomData<T>,
}

// SAFETY: `RawArray` uniquely owns its allocation, so it is as thread-safe as `T` itself.
unsafe impl<T: Send> Send for RawArray<T> {}
unsafe impl<T: Sync> Sync for RawArray<T> {}

impl<T> RawArray<T> {
    const IS_ZST: bool = size_of::<T>() == 0;

    /// Creates an empty `RawArray` without allocating.
    /// If `T` has a non-zero size, the this makes a `RawArray` with a capacity of `0`.
    /// If `T` is zero-sized, the it makes a `RawArray` with a capacity of `usize::MAX`.
    #[must_use]
    pub const fn new() -> Self {
        Self { ptr: NonNull::dangling(), cap: 0, _phantom: PhantomData }
    }

    /// Creates a `RawArray` with exactly the capacity and alignment requirements for a `[T; capacity]`.
    /// This is equivalent to calling `RawArray::new` when `capacity` is `0` or `T` is zero-sized.
    ///
    /// # Panics
    ///
    /// Panics if the requested capacity exceed `isize::MAX` bytes.
    ///
    /// # Aborts
    ///
    /// Aborts on OOM
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        match Self::try_with_capacity(capacity) {
            Ok(arr) => arr,
            Err(err) => handle_error(err),
        }
    }

    /// Tries to create a `RawArray` with exactly the capacity and alignment requirements for a `[T; capacity]`.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, TryReserveError> {
        let mut arr = Self::new();
        if !Self::IS_ZST && capacity != 0 {
            arr.ptr = allocate::<T>(capacity)?;
            arr.cap = capacity;
            crate::log_alloc!("allocated buffer of {capacity} elements of {}", core::any::type_name::<T>());
        }
        Ok(arr)
    }

    /// Get the capacity of the allocation.
    ///
    /// This will always be `usize::MAX` if `T` is zero-sized.
    #[inline]
    pub const fn capacity(&self) -> usize {
        if Self::IS_ZST {
            usize::MAX
        } else {
            self.cap
        }
    }

    /// Get a raw pointer to the start of the allocation.
    /// Note that this is a dangling pointer when either `capacity() == 0` or `T` is zero-sized.
    #[inline]
    pub const fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    fn current_memory(&self) -> Option<(NonNull<u8>, Layout)> {
        if Self::IS_ZST || self.cap == 0 {
            None
        } else {
            // The layout was validated when the buffer was allocated, so it can't fail now.
            Layout::array::<T>(self.cap).ok().map(|layout| (self.ptr.cast(), layout))
        }
    }

    /// Ensures that the buffer contains at least enough space to hold `len + additional` elements.
    /// If it doesn't already have enough capacity, the capacity is doubled (or set to the required size, if that is bigger),
    /// which gives amortized *O*(1) appends.
    ///
    /// `len` may not exceed `self.capacity()`.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity exceeds `isize::MAX` bytes.
    ///
    /// # Aborts
    ///
    /// Aborts on OOM.
    pub fn reserve(&mut self, len: usize, additional: usize) {
        // Callers expect this to be very cheap when there is already sufficient capacity,
        // so keep the growing out of line.
        #[cold]
        fn do_reserve_and_handle<T>(slf: &mut RawArray<T>, len: usize, additional: usize) {
            if let Err(err) = slf.grow_amortized(len, additional) {
                handle_error(err);
            }
        }

        if self.needs_to_grow(len, additional) {
            do_reserve_and_handle(self, len, additional);
        }
    }

    /// A specialized version of `self.reserve(len, 1)`, which requires the caller to ensure `len == self.capacity()`.
    ///
    /// An unallocated buffer grows to a capacity of 1, any other buffer doubles its capacity.
    pub fn grow_one(&mut self) {
        if let Err(err) = self.grow_amortized(self.capacity(), 1) {
            handle_error(err);
        }
    }

    /// Ensures that the buffer contains at least enough space to hold `len + additional` elements.
    /// If it doesn't already, will reallocate to exactly `len + additional` elements.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity exceeds `isize::MAX` _bytes_.
    ///
    /// # Aborts
    ///
    /// Aborts on OOM.
    pub fn reserve_exact(&mut self, len: usize, additional: usize) {
        if let Err(err) = self.try_reserve_exact(len, additional) {
            handle_error(err);
        }
    }

    pub fn try_reserve_exact(&mut self, len: usize, additional: usize) -> Result<(), TryReserveError> {
        if self.needs_to_grow(len, additional) {
            let new_cap = len.checked_add(additional).ok_or(TryReserveError::CapacityOverflow)?;
            self.move_to_new_buffer(new_cap, len)?;
        }
        Ok(())
    }

    /// Shrinks the buffer down to the specified capacity, moving the first `len` elements.
    /// If the given amount is 0, actually completely deallocates.
    ///
    /// # Panics
    ///
    /// Panics if the given amount is *larger* than the current capacity, or smaller than `len`.
    ///
    /// # Aborts
    ///
    /// Aborts on OOM.
    pub fn shrink_to_fit(&mut self, len: usize, cap: usize) {
        assert!(cap <= self.capacity(), "Tried to shrink to a larger capacity");
        assert!(len <= cap, "Tried to shrink below the number of live elements");

        if Self::IS_ZST || cap == self.cap {
            return;
        }

        if cap == 0 {
            self.release();
        } else if let Err(err) = self.move_to_new_buffer(cap, len) {
            handle_error(err);
        }
    }

    /// Frees the buffer, leaving an unallocated `RawArray` behind.
    pub fn release(&mut self) {
        if let Some((ptr, layout)) = self.current_memory() {
            // SAFETY: `ptr` was allocated with `layout` by `allocate` and has not been freed yet.
            unsafe { alloc::dealloc(ptr.as_ptr(), layout) };
            crate::log_alloc!("released buffer of {} elements of {}", self.cap, core::any::type_name::<T>());
        }
        self.ptr = NonNull::dangling();
        self.cap = 0;
    }

    //--------------------------------------------------------------

    /// Returns if the buffer needs to grow to fulfill the needed extra capacity.
    fn needs_to_grow(&self, len: usize, additional: usize) -> bool {
        additional > self.capacity().wrapping_sub(len)
    }

    fn grow_amortized(&mut self, len: usize, additional: usize) -> Result<(), TryReserveError> {
        debug_assert!(additional > 0);

        if Self::IS_ZST {
            // Since we return a capacity of `usize::MAX` when `T` is zero-sized, getting to here necessarily means that `RawArray` is overfull.
            return Err(TryReserveError::CapacityOverflow);
        }

        let required_cap = len.checked_add(additional).ok_or(TryReserveError::CapacityOverflow)?;
        let new_cap = grow_capacity(self.cap, required_cap)?;
        self.move_to_new_buffer(new_cap, len)
    }

    /// Allocates a buffer of exactly `new_cap` elements, moves the first `len` elements into it and frees the old buffer.
    fn move_to_new_buffer(&mut self, new_cap: usize, len: usize) -> Result<(), TryReserveError> {
        debug_assert!(len <= self.cap && len <= new_cap);

        if Self::IS_ZST {
            return Ok(());
        }

        let new_ptr = allocate::<T>(new_cap)?;
        let old_cap = self.cap;
        // SAFETY:
        // - The first `len` slots of the old buffer are initialized, the new buffer has room for at least `len` elements.
        // - Both buffers are distinct allocations, so they can't overlap.
        unsafe { ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_ptr.as_ptr(), len) };
        self.release();
        self.ptr = new_ptr;
        self.cap = new_cap;

        crate::log_alloc!("moved {len} elements of {} from a buffer of {old_cap} to {new_cap}", core::any::type_name::<T>());
        Ok(())
    }
}

impl<T> Drop for RawArray<T> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Capacity for a buffer that needs to hold at least `min_capacity` elements:
/// double the current capacity (an unallocated buffer starts at 1), or `min_capacity` if that is bigger.
pub(crate) fn grow_capacity(cur_capacity: usize, min_capacity: usize) -> Result<usize, TryReserveError> {
    let double_cap = cur_capacity.checked_mul(2).ok_or(TryReserveError::CapacityOverflow)?;
    let new_cap = double_cap.max(min_capacity).max(1);
    if new_cap <= isize::MAX as usize {
        Ok(new_cap)
    } else {
        Err(TryReserveError::CapacityOverflow)
    }
}

fn allocate<T>(capacity: usize) -> Result<NonNull<T>, TryReserveError> {
    debug_assert!(size_of::<T>() != 0 && capacity != 0);

    let layout = Layout::array::<T>(capacity).map_err(|_| TryReserveError::CapacityOverflow)?;
    if layout.size() > isize::MAX as usize {
        return Err(TryReserveError::CapacityOverflow);
    }

    // SAFETY: `layout` has a non-zero size, as neither `T` nor `capacity` is zero.
    let ptr = unsafe { alloc::alloc(layout) };
    NonNull::new(ptr.cast::<T>()).ok_or(TryReserveError::AllocError(layout))
}

/// Central function for reserve error handling
#[cold]
fn handle_error(e: TryReserveError) -> ! {
    match e {
        TryReserveError::CapacityOverflow => capacity_overflow(),
        TryReserveError::AllocError(layout) => alloc::handle_alloc_error(layout),
    }
}

#[track_caller]
fn capacity_overflow() -> ! {
    panic!("capacity overflow");
}
