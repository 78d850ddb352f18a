use core::{
    fmt,
    iter::FusedIterator,
    ptr,
    slice,
};

use crate::collections::imp::array::RawArray;
use super::DynArr;

/// An iterator that moves out of a dynamic array.
///
/// This `struct` is created by the `into_iter` method on [`DynArr`] (provided by the [`IntoIterator`] trait).
/// The buffer is released when the iterator is dropped, together with any elements that were not yielded.
pub struct IntoIter<T> {
    buf:   RawArray<T>,
    /// Index of the next element to yield from the front
    start: usize,
    /// One past the index of the next element to yield from the back
    end:   usize,
}

impl<T> IntoIter<T> {
    pub(super) fn new(buf: RawArray<T>, len: usize) -> Self {
        Self { buf, start: 0, end: len }
    }

    /// Returns the remaining items of this iterator as a slice.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vecta_common::dynarr;
    /// let arr = dynarr!['a', 'b', 'c'];
    /// let mut into_iter = arr.into_iter();
    /// assert_eq!(into_iter.as_slice(), &['a', 'b', 'c']);
    /// let _ = into_iter.next().unwrap();
    /// assert_eq!(into_iter.as_slice(), &['b', 'c']);
    /// ```
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.buf.ptr().add(self.start), self.end - self.start) }
    }

    /// Returns the remaining items of this iterator as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.buf.ptr().add(self.start), self.end - self.start) }
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            None
        } else {
            // SAFETY: `start < end <= len`, so the slot is initialized and is never read again after `start` moves past it.
            let value = unsafe { ptr::read(self.buf.ptr().add(self.start)) };
            self.start += 1;
            Some(value)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.start;
        (len, Some(len))
    }

    #[inline]
    fn count(self) -> usize {
        self.len()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            None
        } else {
            self.end -= 1;
            // SAFETY: see `next`
            Some(unsafe { ptr::read(self.buf.ptr().add(self.end)) })
        }
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: Clone> Clone for IntoIter<T> {
    fn clone(&self) -> Self {
        DynArr::from_slice(self.as_slice()).into_iter()
    }
}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let remaining: *mut [T] = self.as_mut_slice();
        // Nothing may be dropped twice if a destructor panics
        self.start = self.end;
        // SAFETY: the remaining elements were never yielded. `RawArray` frees the buffer afterwards.
        unsafe { ptr::drop_in_place(remaining) };
    }
}
