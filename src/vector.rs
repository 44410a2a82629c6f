use std::{
    fmt,
    hash::{Hash, Hasher},
    iter::FusedIterator,
    ops::{Index, IndexMut},
};

use log::trace;

use crate::{error::OutOfRangeError, raw_buf::RawBuf};

/// A growable sequence over a manually managed contiguous arena.
///
/// - `len <= capacity` always holds.
/// - Slots `[0, len)` are live and kept in insertion order.
/// - Capacity grows by doubling (`0 -> 1 -> 2 -> 4 -> ...`) and only
///   shrinks through [`Vector::shrink`] and [`Vector::shrink_to_fit`].
///
/// Any operation that reallocates or shifts elements invalidates every
/// [`Cursor`] taken before it.
pub struct Vector<T> {
    buf: RawBuf<T>,
    len: usize,
}
impl<T> Vector<T> {
    pub fn new() -> Self {
        Self {
            buf: RawBuf::new(),
            len: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: RawBuf::with_capacity(capacity),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[0, len)` is always initialized.
        unsafe { self.buf.slice(self.len) }
    }
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: `[0, len)` is always initialized.
        unsafe { self.buf.slice_mut(self.len) }
    }

    pub fn at(&self, index: usize) -> Result<&T, OutOfRangeError> {
        let len = self.len;
        self.as_slice()
            .get(index)
            .ok_or(OutOfRangeError::Index { index, len })
    }
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, OutOfRangeError> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(OutOfRangeError::Index { index, len })
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    /// # Safety
    ///
    /// `index` must be less than [`Vector::len`].
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        self.as_slice().get_unchecked(index)
    }
    /// # Safety
    ///
    /// `index` must be less than [`Vector::len`].
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        self.as_mut_slice().get_unchecked_mut(index)
    }

    pub fn front(&self) -> Result<&T, OutOfRangeError> {
        self.as_slice().first().ok_or(OutOfRangeError::Empty)
    }
    pub fn front_mut(&mut self) -> Result<&mut T, OutOfRangeError> {
        self.as_mut_slice().first_mut().ok_or(OutOfRangeError::Empty)
    }
    pub fn back(&self) -> Result<&T, OutOfRangeError> {
        self.as_slice().last().ok_or(OutOfRangeError::Empty)
    }
    pub fn back_mut(&mut self) -> Result<&mut T, OutOfRangeError> {
        self.as_mut_slice().last_mut().ok_or(OutOfRangeError::Empty)
    }

    /// Ensures room for `n` elements; allocates exactly `n` slots when growing
    /// and never shrinks.
    pub fn reserve(&mut self, n: usize) {
        if n <= self.capacity() {
            return;
        }
        self.reallocate(n);
    }

    pub fn push_back(&mut self, value: T) {
        self.grow_if_full();
        // SAFETY: `grow_if_full` leaves slot `len` allocated and unused.
        unsafe { self.buf.write(self.len, value) };
        self.len += 1;
    }

    /// Removes the last element; capacity is left untouched.
    pub fn pop_back(&mut self) -> Result<T, OutOfRangeError> {
        if self.is_empty() {
            return Err(OutOfRangeError::Empty);
        }
        self.len -= 1;
        // SAFETY: the slot was live and is now past the live range.
        Ok(unsafe { self.buf.read(self.len) })
    }

    /// Inserts `value` at `index`, shifting `[index, len)` right.
    ///
    /// `index == len` appends.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), OutOfRangeError> {
        if index > self.len {
            return Err(OutOfRangeError::InsertPosition {
                index,
                len: self.len,
            });
        }
        self.grow_if_full();
        // SAFETY: `len < capacity` after growing; the hole at `index` is
        // filled right away.
        unsafe {
            self.buf.shift_right(index, self.len);
            self.buf.write(index, value);
        }
        self.len += 1;
        Ok(())
    }
    pub fn insert_at(&mut self, position: Cursor, value: T) -> Result<(), OutOfRangeError> {
        self.insert(position.index(), value)
    }

    /// Removes and returns the element at `index`, shifting `[index + 1, len)`
    /// left.
    pub fn erase(&mut self, index: usize) -> Result<T, OutOfRangeError> {
        if index >= self.len {
            return Err(OutOfRangeError::Index {
                index,
                len: self.len,
            });
        }
        // SAFETY: `index` is live; the hole it leaves is closed before `len`
        // is observed again.
        let value = unsafe {
            let value = self.buf.read(index);
            self.buf.shift_left(index, self.len);
            value
        };
        self.len -= 1;
        Ok(value)
    }
    pub fn erase_at(&mut self, position: Cursor) -> Result<T, OutOfRangeError> {
        self.erase(position.index())
    }

    /// Halves the capacity once `len <= capacity / 4`; otherwise a no-op.
    pub fn shrink(&mut self) {
        let capacity = self.capacity();
        if capacity == 0 || self.len > capacity / 4 {
            return;
        }
        self.reallocate(capacity / 2);
    }

    /// Reallocates to exactly `max(len, 1)` slots.
    pub fn shrink_to_fit(&mut self) {
        let target = self.len.max(1);
        if target == self.capacity() {
            return;
        }
        self.reallocate(target);
    }

    /// Drops every live element; capacity is left untouched.
    pub fn clear(&mut self) {
        let len = self.len;
        self.len = 0;
        // SAFETY: `[0, len)` was live and is no longer reachable.
        unsafe { self.buf.drop_range(0, len) };
    }

    /// Moves the whole contents out, leaving `self` empty with no allocation.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    pub fn begin(&self) -> Iter<'_, T> {
        Iter { vec: self, pos: 0 }
    }
    pub fn end(&self) -> Iter<'_, T> {
        Iter {
            vec: self,
            pos: self.len,
        }
    }
    pub fn iter(&self) -> Iter<'_, T> {
        self.begin()
    }
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    fn grow_if_full(&mut self) {
        if self.len < self.capacity() {
            return;
        }
        let capacity = self.capacity().saturating_mul(2).max(1);
        assert!(capacity > self.len, "capacity overflow");
        self.reallocate(capacity);
    }

    fn reallocate(&mut self, capacity: usize) {
        trace!(
            "reallocate: len: {}, capacity: {} -> {}",
            self.len,
            self.capacity(),
            capacity
        );
        self.buf.relocate(self.len, capacity);
    }
}
impl<T> Drop for Vector<T> {
    fn drop(&mut self) {
        self.clear();
    }
}
impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self::new()
    }
}
impl<T: Clone> Clone for Vector<T> {
    fn clone(&self) -> Self {
        let mut copy = Self::with_capacity(self.len);
        for value in self {
            copy.push_back(value.clone());
        }
        copy
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.reserve(source.len);
        for value in source {
            self.push_back(value.clone());
        }
    }
}
impl<T: fmt::Debug> fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
impl<T: PartialEq> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}
impl<T: Eq> Eq for Vector<T> {}
impl<T: Hash> Hash for Vector<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}
impl<T> AsRef<[T]> for Vector<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}
/// Panics when `index >= len`, like slice indexing.
impl<T> Index<usize> for Vector<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}
impl<T> IndexMut<usize> for Vector<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.as_mut_slice()[index]
    }
}
impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vec = Self::new();
        vec.extend(iter);
        vec
    }
}
impl<T> Extend<T> for Vector<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        if lower > self.capacity() - self.len {
            let needed = self.len.saturating_add(lower);
            self.reserve(needed.max(self.capacity().saturating_mul(2)));
        }
        for value in iter {
            self.push_back(value);
        }
    }
}
impl<T> IntoIterator for Vector<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        let buf = std::mem::take(&mut self.buf);
        let end = std::mem::take(&mut self.len);
        IntoIter { buf, start: 0, end }
    }
}
impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
impl<'a, T> IntoIterator for &'a mut Vector<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// A detached position inside a [`Vector`].
///
/// It does not borrow the vector, so it can be handed back to
/// [`Vector::insert_at`] and [`Vector::erase_at`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cursor {
    index: usize,
}
impl Cursor {
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Forward iterator over the live range of a [`Vector`].
///
/// Two iterators are equal when they point at the same position of the same
/// vector, so `begin()` can be walked until it equals `end()`.
#[derive(Debug)]
pub struct Iter<'a, T> {
    vec: &'a Vector<T>,
    pos: usize,
}
impl<'a, T> Iter<'a, T> {
    /// The element under the iterator; `None` at the end.
    pub fn get(&self) -> Option<&'a T> {
        self.vec.get(self.pos)
    }

    /// Pre-increment.
    pub fn advance(&mut self) -> &mut Self {
        if self.pos < self.vec.len {
            self.pos += 1;
        }
        self
    }

    /// Post-increment: advances and returns the iterator as it was.
    pub fn post_advance(&mut self) -> Self {
        let old = self.clone();
        self.advance();
        old
    }

    pub fn cursor(&self) -> Cursor {
        Cursor { index: self.pos }
    }
}
impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            vec: self.vec,
            pos: self.pos,
        }
    }
}
impl<T> PartialEq for Iter<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.vec, other.vec) && self.pos == other.pos
    }
}
impl<T> Eq for Iter<'_, T> {}
impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.get()?;
        self.pos += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.vec.len - self.pos;
        (n, Some(n))
    }
}
impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Owning iterator returned by `Vector::into_iter`.
#[derive(Debug)]
pub struct IntoIter<T> {
    buf: RawBuf<T>,
    start: usize,
    end: usize,
}
impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: `[start, end)` is live; `start` leaves it right away.
        let value = unsafe { self.buf.read(self.start) };
        self.start += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end - self.start;
        (n, Some(n))
    }
}
impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}
impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let (start, end) = (self.start, self.end);
        self.start = end;
        // SAFETY: `[start, end)` was never yielded.
        unsafe { self.buf.drop_range(start, end) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unallocated() {
        let v = Vector::<i32>::new();
        assert!(v.is_empty());
        assert_eq!(v.len(), 0);
        assert_eq!(v.capacity(), 0);
    }

    #[test]
    fn with_capacity_is_exact() {
        let v = Vector::<i32>::with_capacity(7);
        assert_eq!(v.capacity(), 7);
        assert!(v.is_empty());
    }

    #[test]
    fn front_and_back() {
        let mut v = Vector::new();
        assert_eq!(v.front(), Err(OutOfRangeError::Empty));
        assert_eq!(v.back(), Err(OutOfRangeError::Empty));
        v.push_back(10);
        v.push_back(20);
        v.push_back(30);
        assert_eq!(*v.front().unwrap(), 10);
        assert_eq!(*v.back().unwrap(), 30);
        *v.front_mut().unwrap() = 1;
        *v.back_mut().unwrap() = 3;
        assert_eq!(v.as_slice(), &[1, 20, 3]);
    }

    #[test]
    fn index_operator() {
        let mut v: Vector<i32> = [1, 2].into_iter().collect();
        v[0] = 10;
        v[1] = 20;
        assert_eq!(v[0], 10);
        assert_eq!(v[1], 20);
        assert_eq!(unsafe { *v.get_unchecked(1) }, 20);
    }

    #[test]
    #[should_panic]
    fn index_operator_out_of_range_panics() {
        let v: Vector<i32> = [1, 2].into_iter().collect();
        let _ = v[2];
    }

    #[test]
    fn begin_equals_end_when_empty() {
        let v = Vector::<i32>::new();
        assert!(v.begin() == v.end());
        assert_eq!(v.begin().get(), None);
    }

    #[test]
    fn walk_begin_to_end() {
        let mut v = Vector::new();
        for i in 0..5 {
            v.push_back(i * 10);
        }
        let mut expected = 0;
        let mut it = v.begin();
        while it != v.end() {
            assert_eq!(*it.get().unwrap(), expected);
            expected += 10;
            it.advance();
        }
        assert_eq!(expected, 50);

        let mut it = v.begin();
        let old = it.post_advance();
        assert_eq!(*old.get().unwrap(), 0);
        assert_eq!(*it.get().unwrap(), 10);
    }

    #[test]
    fn iterators_of_different_vectors_differ() {
        let a = Vector::<i32>::new();
        let b = Vector::<i32>::new();
        assert!(a.begin() != b.begin());
    }

    #[test]
    fn advance_stops_at_end() {
        let v: Vector<i32> = [1].into_iter().collect();
        let mut it = v.begin();
        it.advance().advance();
        assert!(it == v.end());
    }

    #[test]
    fn insert_and_erase_by_cursor() {
        let mut v: Vector<i32> = [1, 3].into_iter().collect();
        let pos = v.begin().advance().cursor();
        v.insert_at(pos, 2).unwrap();
        assert_eq!(v.as_slice(), &[1, 2, 3]);

        let pos = v.begin().advance().cursor();
        assert_eq!(v.erase_at(pos), Ok(2));
        assert_eq!(v.as_slice(), &[1, 3]);

        let end = v.end().cursor();
        v.insert_at(end, 4).unwrap();
        assert_eq!(v.as_slice(), &[1, 3, 4]);
        let end = v.end().cursor();
        assert!(v.erase_at(end).is_err());
    }

    #[test]
    fn iter_mut_modifies_in_place() {
        let mut v: Vector<i32> = (1..=3).collect();
        for x in &mut v {
            *x *= 2;
        }
        assert_eq!(v.as_slice(), &[2, 4, 6]);
    }

    #[test]
    fn into_iter_yields_in_order() {
        let v: Vector<String> = ["a", "b", "c"].into_iter().map(String::from).collect();
        let mut it = v.into_iter();
        assert_eq!(it.len(), 3);
        assert_eq!(it.next().as_deref(), Some("a"));
        let rest: Vec<String> = it.collect();
        assert_eq!(rest, ["b", "c"]);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut v: Vector<i32> = (0..10).collect();
        let capacity = v.capacity();
        v.clear();
        assert!(v.is_empty());
        assert_eq!(v.capacity(), capacity);
    }

    #[test]
    fn debug_lists_elements() {
        let v: Vector<i32> = (1..=3).collect();
        assert_eq!(format!("{v:?}"), "[1, 2, 3]");
    }
}
