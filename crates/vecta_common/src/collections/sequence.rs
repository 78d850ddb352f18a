use super::{DynArr, DynArrError};

/// Operations shared by the unsynchronized and the guarded dynamic array.
///
/// Reads hand out clones, so the trait can be implemented by containers that can't lend out references to their elements.
pub trait Sequence<T: Clone> {
    /// Number of live elements
    fn len(&self) -> usize;

    /// Number of elements that fit in the current buffer
    fn capacity(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&mut self, value: T);

    fn pop(&mut self) -> Option<T>;

    /// Insert `value` at an existing position, see [`DynArr::insert`]
    fn insert(&mut self, index: usize, value: T) -> Result<(), DynArrError>;

    fn remove(&mut self, index: usize) -> Result<T, DynArrError>;

    /// Remove the elements in `start..end`
    fn remove_range(&mut self, start: usize, end: usize) -> Result<(), DynArrError>;

    /// Clone of the element at `index`
    fn at(&self, index: usize) -> Result<T, DynArrError>;

    fn front(&self) -> Result<T, DynArrError>;

    fn back(&self) -> Result<T, DynArrError>;

    fn clear(&mut self);

    fn reserve(&mut self, new_capacity: usize);

    fn shrink_to_fit(&mut self);

    fn destroy_and_recover(&mut self, new_capacity: usize);

    /// Clone of the live elements, in order
    fn to_dynarr(&self) -> DynArr<T>;
}

impl<T: Clone> Sequence<T> for DynArr<T> {
    fn len(&self) -> usize {
        DynArr::len(self)
    }

    fn capacity(&self) -> usize {
        DynArr::capacity(self)
    }

    fn push(&mut self, value: T) {
        DynArr::push(self, value)
    }

    fn pop(&mut self) -> Option<T> {
        DynArr::pop(self)
    }

    fn insert(&mut self, index: usize, value: T) -> Result<(), DynArrError> {
        DynArr::insert(self, index, value)
    }

    fn remove(&mut self, index: usize) -> Result<T, DynArrError> {
        DynArr::remove(self, index)
    }

    fn remove_range(&mut self, start: usize, end: usize) -> Result<(), DynArrError> {
        DynArr::remove_range(self, start..end)
    }

    fn at(&self, index: usize) -> Result<T, DynArrError> {
        DynArr::at(self, index).cloned()
    }

    fn front(&self) -> Result<T, DynArrError> {
        DynArr::front(self).cloned()
    }

    fn back(&self) -> Result<T, DynArrError> {
        DynArr::back(self).cloned()
    }

    fn clear(&mut self) {
        DynArr::clear(self)
    }

    fn reserve(&mut self, new_capacity: usize) {
        DynArr::reserve(self, new_capacity)
    }

    fn shrink_to_fit(&mut self) {
        DynArr::shrink_to_fit(self)
    }

    fn destroy_and_recover(&mut self, new_capacity: usize) {
        DynArr::destroy_and_recover(self, new_capacity)
    }

    fn to_dynarr(&self) -> DynArr<T> {
        self.clone()
    }
}
