use core::{fmt, ops::RangeBounds, ptr};

use parking_lot::{Mutex, MutexGuard};

use crate::collections::{DynArr, DynArrError, Sequence, TryReserveError};

/// A [`DynArr`] guarded by a mutex, so it can be mutated through a shared reference from multiple threads.
///
/// Every operation acquires the guard for the duration of the call, and releases it on every exit path, including errors and panics.
/// This includes the read-only operations, which hand out clones instead of references,
/// as a reference into the buffer would outlive the guard.
/// Use [`with`], [`with_mut`] or [`lock`] to work with the array in place, e.g. to iterate it.
///
/// # Examples
///
/// ```
/// # use vecta_common::sync::GuardedDynArr;
/// let arr = GuardedDynArr::new();
/// std::thread::scope(|s| {
///     for i in 0..4 {
///         let arr = &arr;
///         s.spawn(move || arr.push(i));
///     }
/// });
/// assert_eq!(arr.len(), 4);
/// ```
///
/// [`with`]: GuardedDynArr::with
/// [`with_mut`]: GuardedDynArr::with_mut
/// [`lock`]: GuardedDynArr::lock
pub struct GuardedDynArr<T> {
    inner: Mutex<DynArr<T>>,
}

impl<T> GuardedDynArr<T> {
    /// Constructs a new, empty `GuardedDynArr<T>`, without allocating.
    #[must_use]
    pub const fn new() -> Self {
        Self { inner: Mutex::new(DynArr::new()) }
    }

    /// Constructs a new, empty `GuardedDynArr<T>` with exactly the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { inner: Mutex::new(DynArr::with_capacity(capacity)) }
    }

    /// Acquires the guard, blocking the current thread until it is able to do so.
    ///
    /// The array can be used freely through the returned guard, the guard is released when it is dropped.
    pub fn lock(&self) -> MutexGuard<'_, DynArr<T>> {
        self.inner.lock()
    }

    /// Runs `f` with shared access to the array, while holding the guard.
    pub fn with<R, F>(&self, f: F) -> R where
        F: FnOnce(&DynArr<T>) -> R
    {
        f(&self.inner.lock())
    }

    /// Runs `f` with exclusive access to the array, while holding the guard.
    pub fn with_mut<R, F>(&self, f: F) -> R where
        F: FnOnce(&mut DynArr<T>) -> R
    {
        f(&mut self.inner.lock())
    }

    /// Returns a mutable reference to the array.
    ///
    /// No locking is needed, as the mutable borrow statically guarantees exclusive access.
    pub fn get_mut(&mut self) -> &mut DynArr<T> {
        self.inner.get_mut()
    }

    /// Consumes the guarded array, returning the array itself.
    pub fn into_inner(self) -> DynArr<T> {
        self.inner.into_inner()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// See [`DynArr::reserve`]
    pub fn reserve(&self, new_capacity: usize) {
        self.inner.lock().reserve(new_capacity)
    }

    /// See [`DynArr::try_reserve`]
    pub fn try_reserve(&self, new_capacity: usize) -> Result<(), TryReserveError> {
        self.inner.lock().try_reserve(new_capacity)
    }

    /// See [`DynArr::shrink_to_fit`]
    pub fn shrink_to_fit(&self) {
        self.inner.lock().shrink_to_fit()
    }

    /// Appends an element to the back of the array.
    pub fn push(&self, value: T) {
        self.inner.lock().push(value)
    }

    /// Constructs an element at the back of the array.
    ///
    /// `ctor` runs while the guard is held, so it must not use this array.
    pub fn emplace_back<F>(&self, ctor: F) where
        F: FnOnce() -> T
    {
        self.inner.lock().emplace_back(ctor);
    }

    /// Inserts an element at an existing position, see [`DynArr::insert`].
    pub fn insert(&self, index: usize, value: T) -> Result<(), DynArrError> {
        self.inner.lock().insert(index, value)
    }

    /// Constructs an element at an existing position, see [`DynArr::emplace`].
    ///
    /// `ctor` runs while the guard is held, so it must not use this array.
    pub fn emplace<F>(&self, index: usize, ctor: F) -> Result<(), DynArrError> where
        F: FnOnce() -> T
    {
        self.inner.lock().emplace(index, ctor).map(|_| ())
    }

    /// Removes and returns the element at `index`, see [`DynArr::remove`].
    pub fn remove(&self, index: usize) -> Result<T, DynArrError> {
        self.inner.lock().remove(index)
    }

    /// Removes the elements in `range`, see [`DynArr::remove_range`].
    pub fn remove_range<R>(&self, range: R) -> Result<(), DynArrError> where
        R: RangeBounds<usize>
    {
        self.inner.lock().remove_range(range)
    }

    pub fn pop(&self) -> Option<T> {
        self.inner.lock().pop()
    }

    pub fn clear(&self) {
        self.inner.lock().clear()
    }

    /// See [`DynArr::destroy_and_recover`]
    pub fn destroy_and_recover(&self, new_capacity: usize) {
        self.inner.lock().destroy_and_recover(new_capacity)
    }
}

impl<T: Clone> GuardedDynArr<T> {
    /// Creates a guarded array holding clones of the elements of `src`, with a capacity of exactly `src.len()`.
    pub fn from_slice(src: &[T]) -> Self {
        Self { inner: Mutex::new(DynArr::from_slice(src)) }
    }

    /// Creates a guarded array of `n` clones of `elem`, with a capacity of exactly `n`.
    pub fn from_elem(elem: T, n: usize) -> Self {
        Self { inner: Mutex::new(DynArr::from_elem(elem, n)) }
    }

    /// Returns a clone of the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrError::OutOfRange`] when `index >= len`.
    pub fn at(&self, index: usize) -> Result<T, DynArrError> {
        self.inner.lock().at(index).cloned()
    }

    /// Returns a clone of the first element.
    pub fn front(&self) -> Result<T, DynArrError> {
        self.inner.lock().front().cloned()
    }

    /// Returns a clone of the last element.
    pub fn back(&self) -> Result<T, DynArrError> {
        self.inner.lock().back().cloned()
    }

    /// Returns a clone of the array, taken while holding the guard.
    pub fn snapshot(&self) -> DynArr<T> {
        self.inner.lock().clone()
    }
}

impl<T: Clone> Clone for GuardedDynArr<T> {
    fn clone(&self) -> Self {
        Self { inner: Mutex::new(self.snapshot()) }
    }

    fn clone_from(&mut self, source: &Self) {
        let source = source.inner.lock();
        self.inner.get_mut().clone_from(&source);
    }
}

impl<T> Default for GuardedDynArr<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<DynArr<T>> for GuardedDynArr<T> {
    fn from(value: DynArr<T>) -> Self {
        Self { inner: Mutex::new(value) }
    }
}

impl<T: PartialEq> PartialEq for GuardedDynArr<T> {
    fn eq(&self, other: &Self) -> bool {
        // Locking the same mutex twice would deadlock
        if ptr::eq(self, other) {
            return true;
        }
        // Lock in address order, `a == b` and `b == a` on two threads would deadlock otherwise
        let (first, second) = if (self as *const Self) < (other as *const Self) { (self, other) } else { (other, self) };
        let first = first.inner.lock();
        let second = second.inner.lock();
        *first == *second
    }
}

impl<T: fmt::Debug> fmt::Debug for GuardedDynArr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_lock() {
            Some(arr) => f.debug_tuple("GuardedDynArr").field(&*arr).finish(),
            None => f.write_str("GuardedDynArr(<locked>)"),
        }
    }
}

impl<T: Clone> Sequence<T> for GuardedDynArr<T> {
    fn len(&self) -> usize {
        GuardedDynArr::len(self)
    }

    fn capacity(&self) -> usize {
        GuardedDynArr::capacity(self)
    }

    // `&mut self` already guarantees exclusive access, so mutations skip the lock

    fn push(&mut self, value: T) {
        self.get_mut().push(value)
    }

    fn pop(&mut self) -> Option<T> {
        self.get_mut().pop()
    }

    fn insert(&mut self, index: usize, value: T) -> Result<(), DynArrError> {
        self.get_mut().insert(index, value)
    }

    fn remove(&mut self, index: usize) -> Result<T, DynArrError> {
        self.get_mut().remove(index)
    }

    fn remove_range(&mut self, start: usize, end: usize) -> Result<(), DynArrError> {
        self.get_mut().remove_range(start..end)
    }

    fn at(&self, index: usize) -> Result<T, DynArrError> {
        GuardedDynArr::at(self, index)
    }

    fn front(&self) -> Result<T, DynArrError> {
        GuardedDynArr::front(self)
    }

    fn back(&self) -> Result<T, DynArrError> {
        GuardedDynArr::back(self)
    }

    fn clear(&mut self) {
        self.get_mut().clear()
    }

    fn reserve(&mut self, new_capacity: usize) {
        self.get_mut().reserve(new_capacity)
    }

    fn shrink_to_fit(&mut self) {
        self.get_mut().shrink_to_fit()
    }

    fn destroy_and_recover(&mut self, new_capacity: usize) {
        self.get_mut().destroy_and_recover(new_capacity)
    }

    fn to_dynarr(&self) -> DynArr<T> {
        self.snapshot()
    }
}
