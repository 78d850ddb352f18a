use core::{
    fmt,
    hash::Hash,
    mem::ManuallyDrop,
    ops::{self, Bound, Index, IndexMut, RangeBounds},
    ptr,
    slice::{self, SliceIndex},
};

use super::{imp::array::RawArray, impl_slice_partial_eq_generic, DynArrError, TryReserveError};

mod into_iter;

pub use into_iter::IntoIter;

#[cfg(test)]
mod tests;

/// A contiguous growable array type, also known as a dynamic array, or DynArr.
///
/// Dynamic arrays have *O*(1) indexing, amortized *O*(1) push (to the end), and *O*(1) pop (from the back).
///
/// _Note: It was decided to not name this `Vec` as in the standard library, as this is easily confusable with a math vector_
///
/// # Examples
///
/// ```
/// use vecta_common::{collections::DynArr, dynarr};
///
/// let mut arr = DynArr::new();
/// arr.push(1);
/// arr.push(2);
///
/// assert_eq!(arr.len(), 2);
/// assert_eq!(arr[0], 1);
///
/// arr[0] = 7;
/// assert_eq!(arr[0], 7);
///
/// arr.extend([1, 2, 3]);
/// assert_eq!(arr, [7, 2, 1, 2, 3]);
///
/// let filled = dynarr![0; 5];
/// assert_eq!(filled, [0, 0, 0, 0, 0]);
/// ```
///
/// # Checked access
///
/// Indexing with `[]` panics when the index is out of bounds.
/// [`at`], [`front`], [`back`] and all positional mutations ([`insert`], [`emplace`], [`remove`], [`remove_range`])
/// instead report a [`DynArrError`], before touching the contents of the array.
///
/// # Capacity and reallocation
///
/// The capacity of a dynamic array is the amount of space allocated for any future elements that will be added onto it.
/// This is not to be confused with the *length* of the dynamic array, which specifies the number of actual elements within the dynamic array.
/// If a dynamic array's length would exceed its capacity, its capacity will automatically be increased, but its elements will have to be moved.
///
/// Growth triggered by [`push`], [`emplace_back`], [`insert`] and [`emplace`] always follows the same policy:
/// an unallocated array grows to a capacity of 1, any other array doubles its capacity.
/// [`reserve`] and the constructors allocate exactly the capacity that was asked for.
///
/// A `DynArr` holding the elements `'a'` and `'b'` with capacity 4 can be visualized as below.
///
/// ```text
///             ptr      cap      len
///         +--------+--------+--------+
///         | 0x1234 |    4   |    2   |
///         +--------+--------+--------+
///             |
///             v
///    Heap +--------+--------+--------+--------+
///         |   'a'  |   'b'  | uninit | uninit |
///         +--------+--------+--------+--------+
/// ```
///
/// `DynArr` will never automatically shrink itself, even if completely empty.
/// If you wish to free up unused memory use [`shrink_to_fit`] or [`destroy_and_recover`].
///
/// [`at`]: DynArr::at
/// [`front`]: DynArr::front
/// [`back`]: DynArr::back
/// [`insert`]: DynArr::insert
/// [`emplace`]: DynArr::emplace
/// [`remove`]: DynArr::remove
/// [`remove_range`]: DynArr::remove_range
/// [`push`]: DynArr::push
/// [`emplace_back`]: DynArr::emplace_back
/// [`reserve`]: DynArr::reserve
/// [`shrink_to_fit`]: DynArr::shrink_to_fit
/// [`destroy_and_recover`]: DynArr::destroy_and_recover
pub struct DynArr<T> {
    arr: RawArray<T>,
    len: usize,
}

impl<T> DynArr<T> {
    /// Constructs a new, empty `DynArr<T>`.
    ///
    /// The dynamic array will not allocate until elements are pushed onto it.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { arr: RawArray::new(), len: 0 }
    }

    /// Constructs a new, empty `DynArr<T>` with exactly the specified capacity.
    ///
    /// If `capacity` is 0, or `T` is zero-sized, the dynamic array will not allocate.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity exceeds `isize::MAX` _bytes_.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { arr: RawArray::with_capacity(capacity), len: 0 }
    }

    /// Tries to construct a new, empty `DynArr<T>` with exactly the specified capacity.
    ///
    /// # Errors
    ///
    /// Returns an error if the capacity exceeds `isize::MAX` _bytes_, or if the allocator reports a failure.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, TryReserveError> {
        Ok(Self { arr: RawArray::try_with_capacity(capacity)?, len: 0 })
    }

    /// Returns the total number of elements the dynamic array can hold without reallocating.
    ///
    /// For zero-sized `T` this is always `usize::MAX`.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.arr.capacity()
    }

    /// Makes sure the dynamic array can hold at least `new_capacity` elements.
    ///
    /// Does nothing if the capacity is already sufficient, otherwise the elements are moved into a new buffer of exactly `new_capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity exceeds `isize::MAX` _bytes_.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vecta_common::dynarr;
    /// let mut arr = dynarr![1];
    /// arr.reserve(10);
    /// assert_eq!(arr.capacity(), 10);
    /// arr.reserve(4);
    /// assert_eq!(arr.capacity(), 10);
    /// ```
    pub fn reserve(&mut self, new_capacity: usize) {
        if new_capacity > self.capacity() {
            self.arr.reserve_exact(self.len, new_capacity - self.len);
        }
    }

    /// Tries to make sure the dynamic array can hold at least `new_capacity` elements.
    ///
    /// # Errors
    ///
    /// If the capacity overflows, or the allocator reports a failure, an error is returned and the dynamic array is left untouched.
    pub fn try_reserve(&mut self, new_capacity: usize) -> Result<(), TryReserveError> {
        if new_capacity > self.capacity() {
            self.arr.try_reserve_exact(self.len, new_capacity - self.len)
        } else {
            Ok(())
        }
    }

    /// Shrinks the capacity of the dynamic array to exactly its length.
    ///
    /// An empty dynamic array releases its buffer entirely.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vecta_common::collections::DynArr;
    /// let mut arr = DynArr::with_capacity(10);
    /// arr.extend([1, 2, 3]);
    /// arr.shrink_to_fit();
    /// assert_eq!(arr.capacity(), 3);
    /// ```
    pub fn shrink_to_fit(&mut self) {
        // The capacity is never less than the length, and there's nothing to do when they are equal
        if self.capacity() > self.len {
            self.arr.shrink_to_fit(self.len, self.len);
        }
    }

    /// Extracts a slice containing the entire dynamic array.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self
    }

    /// Extracts a mutable slice of the entire dynamic array.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }

    /// Returns a raw pointer to the dynamic array's buffer, or a dangling raw pointer valid for zero sized reads if the dynamic array didn't allocate.
    ///
    /// Modifying the dynamic array may cause its buffer to be reallocated, which would also make any pointer to it invalid.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.arr.ptr()
    }

    /// Returns an unsafe mutable pointer to the dynamic array's buffer, or a dangling raw pointer valid for zero sized reads if the dynamic array didn't allocate.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.arr.ptr()
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrError::OutOfRange`] when `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vecta_common::{dynarr, collections::DynArrError};
    /// let arr = dynarr![10, 40, 30];
    /// assert_eq!(arr.at(1), Ok(&40));
    /// assert_eq!(arr.at(3), Err(DynArrError::OutOfRange { index: 3, len: 3 }));
    /// ```
    #[inline]
    pub fn at(&self, index: usize) -> Result<&T, DynArrError> {
        let len = self.len;
        self.as_slice().get(index).ok_or(DynArrError::OutOfRange { index, len })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrError::OutOfRange`] when `index >= len`.
    #[inline]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, DynArrError> {
        let len = self.len;
        self.as_mut_slice().get_mut(index).ok_or(DynArrError::OutOfRange { index, len })
    }

    /// Returns a reference to the first element.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrError::OutOfRange`] when the dynamic array is empty.
    pub fn front(&self) -> Result<&T, DynArrError> {
        self.at(0)
    }

    /// Returns a mutable reference to the first element.
    pub fn front_mut(&mut self) -> Result<&mut T, DynArrError> {
        self.at_mut(0)
    }

    /// Returns a reference to the last element.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrError::OutOfRange`] when the dynamic array is empty.
    pub fn back(&self) -> Result<&T, DynArrError> {
        self.at(self.last_index()?)
    }

    /// Returns a mutable reference to the last element.
    pub fn back_mut(&mut self) -> Result<&mut T, DynArrError> {
        let index = self.last_index()?;
        self.at_mut(index)
    }

    fn last_index(&self) -> Result<usize, DynArrError> {
        self.len.checked_sub(1).ok_or(DynArrError::OutOfRange { index: 0, len: 0 })
    }

    /// Inserts an element at position `index`, shifting all elements after it to the right.
    ///
    /// Only existing positions are accepted: `index` must be smaller than the length, so `insert` can't be used to append.
    /// Use [`push`] to add an element at the end, this also means that inserting into an empty dynamic array always fails.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrError::OutOfRange`] if `index >= len`, the dynamic array is left untouched and `element` is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vecta_common::dynarr;
    /// let mut arr = dynarr![1, 2, 3];
    /// arr.insert(1, 4).unwrap();
    /// assert_eq!(arr, [1, 4, 2, 3]);
    /// assert!(arr.insert(4, 5).is_err());
    /// ```
    ///
    /// # Time complexity
    ///
    /// Takes *O*([`DynArr::len`] - `index`) time.
    ///
    /// [`push`]: DynArr::push
    pub fn insert(&mut self, index: usize, element: T) -> Result<(), DynArrError> {
        self.check_index(index)?;
        // SAFETY: `index < len` was checked above
        unsafe { self.insert_unchecked(index, element) };
        Ok(())
    }

    /// Constructs an element in place at position `index`, shifting all elements after it to the right.
    ///
    /// `ctor` is only called once `index` was validated, with the same rules as [`insert`].
    /// Returns a reference to the new element.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrError::OutOfRange`] if `index >= len`, without calling `ctor`.
    ///
    /// [`insert`]: DynArr::insert
    pub fn emplace<F>(&mut self, index: usize, ctor: F) -> Result<&mut T, DynArrError> where
        F: FnOnce() -> T
    {
        self.check_index(index)?;
        let element = ctor();
        // SAFETY: `index < len` was checked above, and `ctor` can't have touched `self`
        Ok(unsafe { self.insert_unchecked(index, element) })
    }

    fn check_index(&self, index: usize) -> Result<(), DynArrError> {
        if index < self.len {
            Ok(())
        } else {
            Err(DynArrError::OutOfRange { index, len: self.len })
        }
    }

    /// # Safety
    ///
    /// `index` must be less than or equal to `len`.
    unsafe fn insert_unchecked(&mut self, index: usize, element: T) -> &mut T {
        let len = self.len;
        debug_assert!(index <= len);

        // Space for the new element
        if len == self.arr.capacity() {
            self.arr.grow_one();
        }

        unsafe {
            let p = self.as_mut_ptr().add(index);
            if index < len {
                // Shift everything over to make space.
                // (Duplicating the `index`th element into two consecutive places.)
                ptr::copy(p, p.add(1), len - index);
            }
            // Write it in, overwriting the first copy of the `index`th element.
            ptr::write(p, element);
            self.len = len + 1;
            &mut *p
        }
    }

    /// Removes and returns the element at position `index`, shifting all elements after it to the left.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrError::OutOfRange`] if `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vecta_common::dynarr;
    /// let mut arr = dynarr![1, 2, 3];
    /// assert_eq!(arr.remove(1), Ok(2));
    /// assert_eq!(arr, [1, 3]);
    /// ```
    ///
    /// # Time complexity
    ///
    /// Takes *O*([`DynArr::len`] - `index`) time.
    pub fn remove(&mut self, index: usize) -> Result<T, DynArrError> {
        self.check_index(index)?;

        let len = self.len;
        unsafe {
            // the place we are taking from
            let p = self.as_mut_ptr().add(index);
            // copy it out, unsafely having a copy of the value on the stack and in the dynamic array at the same time
            let ret = ptr::read(p);

            // Shift everything down to fill in that spot
            ptr::copy(p.add(1), p, len - index - 1);
            self.len = len - 1;
            Ok(ret)
        }
    }

    /// Removes the elements in `range`, shifting all elements after it to the left.
    ///
    /// # Errors
    ///
    /// Returns [`DynArrError::InvalidRange`] if the start of the range lies past its end, or if the range is not contained in `0..=len`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vecta_common::dynarr;
    /// let mut arr = dynarr![1, 2, 3, 4, 5];
    /// arr.remove_range(1..3).unwrap();
    /// assert_eq!(arr, [1, 4, 5]);
    /// assert!(arr.remove_range(2..5).is_err());
    /// ```
    pub fn remove_range<R>(&mut self, range: R) -> Result<(), DynArrError> where
        R: RangeBounds<usize>
    {
        let len = self.len;
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&end) => end.saturating_add(1),
            Bound::Excluded(&end) => end,
            Bound::Unbounded => len,
        };

        if start > end || end > len {
            return Err(DynArrError::InvalidRange { start, end, len });
        }
        if start == end {
            return Ok(());
        }

        let tail = len - end;
        let base = self.as_mut_ptr();

        // Shrink the length first, so a panicking destructor can at worst leak elements, never drop them twice.
        self.len = start;
        let this = scopeguard::guard(self, move |this| {
            // SAFETY: `[end, len)` are still live, and `start + tail <= len` fits in the buffer
            unsafe { ptr::copy(base.add(end), base.add(start), tail) };
            this.len = start + tail;
        });

        // SAFETY: `[start, end)` are live elements that are no longer covered by `len`
        unsafe { ptr::drop_in_place(ptr::slice_from_raw_parts_mut(base.add(start), end - start)) };
        drop(this);
        Ok(())
    }

    /// Appends an element to the back of the dynamic array.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity exceeds `isize::MAX` _bytes_.
    ///
    /// # Time complexity
    ///
    /// Takes amortized *O*(1) time.
    /// If the dynamic array's length would exceed its capacity after the push, *O*(*capacity*) time is taken to move the elements to a buffer of double the size.
    #[inline]
    pub fn push(&mut self, value: T) {
        let len = self.len;
        if len == self.arr.capacity() {
            self.arr.grow_one();
        }
        unsafe {
            let end = self.as_mut_ptr().add(len);
            ptr::write(end, value);
            self.len += 1;
        }
    }

    /// Constructs an element in place at the back of the dynamic array and returns a reference to it.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vecta_common::collections::DynArr;
    /// let mut arr = DynArr::<String>::new();
    /// arr.emplace_back(|| "hello".to_string()).push_str(" world");
    /// assert_eq!(arr, ["hello world"]);
    /// ```
    pub fn emplace_back<F>(&mut self, ctor: F) -> &mut T where
        F: FnOnce() -> T
    {
        let element = ctor();
        let len = self.len;
        // SAFETY: `len <= len`
        unsafe { self.insert_unchecked(len, element) }
    }

    /// Removes the last element from the dynamic array and returns it, or [`None`] if it is empty.
    ///
    /// # Time complexity
    ///
    /// Takes *O*(1) time.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            unsafe {
                self.len -= 1;
                Some(ptr::read(self.as_ptr().add(self.len)))
            }
        }
    }

    /// Clears the dynamic array, removing all values.
    ///
    /// Note that this method has no effect on the allocated capacity of the dynamic array.
    #[inline]
    pub fn clear(&mut self) {
        let elems: *mut [T] = self.as_mut_slice();

        // SAFETY
        // - `elems` comes directly from `as_mut_slice` and is therefore valid.
        // - Setting `self.len` before calling `drop_in_place` means that if an element's `Drop` impl panics,
        //   the dynamic array's `Drop` impl will do nothing (leaking the rest of the elements) instead of dropping some twice.
        unsafe {
            self.len = 0;
            ptr::drop_in_place(elems);
        }
    }

    /// Drops all elements and releases the buffer.
    ///
    /// If `new_capacity` is not 0, a fresh buffer of exactly `new_capacity` elements is allocated afterwards.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vecta_common::dynarr;
    /// let mut arr = dynarr![1, 2, 3];
    /// arr.destroy_and_recover(8);
    /// assert!(arr.is_empty());
    /// assert_eq!(arr.capacity(), 8);
    ///
    /// arr.destroy_and_recover(0);
    /// assert_eq!(arr.capacity(), 0);
    /// ```
    pub fn destroy_and_recover(&mut self, new_capacity: usize) {
        self.clear();
        self.arr.release();
        if new_capacity > 0 {
            self.arr.reserve_exact(0, new_capacity);
        }
    }

    /// Returns the number of elements in the dynamic array, also referred to as the 'length'.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the dynamic array contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T: Clone> DynArr<T> {
    /// Creates a dynamic array with a capacity of exactly `n`, holding `n` clones of `elem`.
    ///
    /// This is what the `dynarr![elem; n]` form expands to.
    pub fn from_elem(elem: T, n: usize) -> Self {
        let mut arr = Self::with_capacity(n);
        arr.extend_with(n, elem);
        arr
    }

    /// Creates a dynamic array with a capacity of exactly `src.len()`, holding clones of the elements of `src`, in order.
    pub fn from_slice(src: &[T]) -> Self {
        let mut arr = Self::with_capacity(src.len());
        arr.extend_from_slice(src);
        arr
    }

    /// Clones and appends all elements in a slice to the dynamic array.
    pub fn extend_from_slice(&mut self, other: &[T]) {
        self.arr.reserve(self.len, other.len());
        for elem in other {
            // SAFETY: Room for `other.len()` elements was reserved above, `len` is updated after every write,
            // so a panicking `clone` leaves only initialized elements behind.
            unsafe {
                ptr::write(self.as_mut_ptr().add(self.len), elem.clone());
                self.len += 1;
            }
        }
    }

    /// Extend the dynamic array by `n` clones of `value`
    fn extend_with(&mut self, n: usize, value: T) {
        self.arr.reserve(self.len, n);
        unsafe {
            let mut p = self.as_mut_ptr().add(self.len);
            // Write all elements except the last one
            for _ in 1..n {
                ptr::write(p, value.clone());
                p = p.add(1);
                self.len += 1;
            }

            if n > 0 {
                // We can write the last element directly without cloning needlessly
                ptr::write(p, value);
                self.len += 1;
            }
        }
    }
}

//------------------------------------------------------------------------------------------------------------------------------

impl<T> ops::Deref for DynArr<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &Self::Target {
        unsafe { slice::from_raw_parts(self.as_ptr(), self.len) }
    }
}

impl<T> ops::DerefMut for DynArr<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) }
    }
}

impl<T: Clone> Clone for DynArr<T> {
    /// Creates a deep copy with its own buffer of the same capacity.
    fn clone(&self) -> Self {
        let mut arr = Self::with_capacity(self.capacity());
        arr.extend_from_slice(self);
        arr
    }

    /// Overwrites the contents of `self` with a clone of the contents of `source`.
    ///
    /// Afterwards, `self` has the same capacity as `source`.
    /// The buffer of `self` is reused when the capacities already match.
    fn clone_from(&mut self, source: &Self) {
        if self.capacity() == source.capacity() {
            self.clear();
        } else {
            self.destroy_and_recover(source.capacity());
        }
        self.extend_from_slice(source);
    }
}

impl<T: Hash> Hash for DynArr<T> {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        Hash::hash(&**self, state)
    }
}

impl<T, I: SliceIndex<[T]>> Index<I> for DynArr<T> {
    type Output = I::Output;

    fn index(&self, index: I) -> &Self::Output {
        Index::index(&**self, index)
    }
}

impl<T, I: SliceIndex<[T]>> IndexMut<I> for DynArr<T> {
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(&mut **self, index)
    }
}

/// Collects an iterator into a DynArr, commonly called via [`Iterator::collect()`].
///
/// The dynamic array grows with the regular doubling policy, so the final capacity can exceed the number of elements.
impl<T> FromIterator<T> for DynArr<T> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut arr = Self::new();
        arr.extend(iter);
        arr
    }
}

impl<T> IntoIterator for DynArr<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Creates a consuming iterator, that is, one that moves each value out of the dynamic array (from start to end).
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        let me = ManuallyDrop::new(self);
        // SAFETY: `me` is never used or dropped again, so the buffer is moved into the iterator exactly once.
        let buf = unsafe { ptr::read(&me.arr) };
        IntoIter::new(buf, me.len)
    }
}

impl<'a, T> IntoIterator for &'a DynArr<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynArr<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> Extend<T> for DynArr<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        if lower > 0 {
            self.arr.reserve(self.len, lower);
        }
        for elem in iter {
            self.push(elem);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for DynArr<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

impl_slice_partial_eq_generic!([] DynArr<T>, DynArr<U>);
impl_slice_partial_eq_generic!([] DynArr<T>, &[U]);
impl_slice_partial_eq_generic!([] DynArr<T>, &mut [U]);
impl_slice_partial_eq_generic!([] &[T], DynArr<U>);
impl_slice_partial_eq_generic!([] &mut [T], DynArr<U>);
impl_slice_partial_eq_generic!([] DynArr<T>, [U]);
impl_slice_partial_eq_generic!([] [T], DynArr<U>);
impl_slice_partial_eq_generic!([const N: usize] DynArr<T>, [U; N]);
impl_slice_partial_eq_generic!([const N: usize] [T; N], DynArr<U>);

/// Lexicographic comparison: the first differing element decides, otherwise the shorter dynamic array orders first.
impl<T: PartialOrd> PartialOrd for DynArr<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        PartialOrd::partial_cmp(&**self, &**other)
    }
}

impl<T: Eq> Eq for DynArr<T> {}

impl<T: Ord> Ord for DynArr<T> {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        Ord::cmp(&**self, &**other)
    }
}

impl<T> Drop for DynArr<T> {
    fn drop(&mut self) {
        unsafe {
            // use drop for [T]
            // uses a raw slice to refer to the elements of the dynamic array as the weakest necessary type;
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.as_mut_ptr(), self.len))
        }
        // RawArray handles deallocation
    }
}

impl<T> Default for DynArr<T> {
    /// Creates an empty `DynArr<T>`.
    ///
    /// The dynamic array will not allocate until elements are pushed onto it.
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for DynArr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

impl<T> AsRef<[T]> for DynArr<T> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T> AsMut<[T]> for DynArr<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T: Clone> From<&[T]> for DynArr<T> {
    fn from(value: &[T]) -> Self {
        Self::from_slice(value)
    }
}

impl<T: Clone> From<&mut [T]> for DynArr<T> {
    fn from(value: &mut [T]) -> Self {
        Self::from_slice(value)
    }
}

impl<T: Clone, const N: usize> From<&[T; N]> for DynArr<T> {
    fn from(value: &[T; N]) -> Self {
        Self::from_slice(value)
    }
}

impl<T, const N: usize> From<[T; N]> for DynArr<T> {
    /// Moves the elements of an array into a dynamic array with a capacity of exactly `N`.
    fn from(value: [T; N]) -> Self {
        let mut arr = Self::with_capacity(N);
        let value = ManuallyDrop::new(value);
        // SAFETY: The buffer has room for `N` elements, and ownership of the elements moves out of `value`, which is never dropped.
        unsafe {
            ptr::copy_nonoverlapping(value.as_ptr(), arr.as_mut_ptr(), N);
        }
        arr.len = N;
        arr
    }
}

/// Creates a [`DynArr`] containing the arguments.
///
/// - `dynarr![]` creates an empty dynamic array.
/// - `dynarr![a, b, c]` creates a dynamic array holding the given elements, with a capacity of exactly their count.
/// - `dynarr![elem; n]` creates a dynamic array of `n` clones of `elem`, with a capacity of exactly `n`.
#[macro_export]
macro_rules! dynarr {
    () => {
        $crate::collections::DynArr::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::collections::DynArr::from_elem($elem, $n)
    };
    ($($x:expr),+ $(,)?) => {
        $crate::collections::DynArr::from([$($x),+])
    };
}

// A buffer pointer, a capacity and a length, nothing more
static_assertions::assert_eq_size!(DynArr<u8>, [usize; 3]);
