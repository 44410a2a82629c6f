use std::{mem::MaybeUninit, ptr};

/// An owned arena of `capacity` possibly-uninitialized slots.
///
/// The arena never knows which slots are live; its owner tracks the live
/// prefix and passes it into every operation that moves elements.
/// Dropping the arena releases the slots without dropping any element.
#[derive(Debug)]
pub struct RawBuf<T> {
    slots: Box<[MaybeUninit<T>]>,
}
impl<T> RawBuf<T> {
    /// Zero slots, no allocation.
    pub fn new() -> Self {
        Self {
            slots: Box::new([]),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let slots = std::iter::repeat_with(MaybeUninit::uninit)
            .take(capacity)
            .collect();
        Self { slots }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Moves the live prefix `[0, len)` into a fresh arena of exactly
    /// `capacity` slots and releases the old one.
    pub fn relocate(&mut self, len: usize, capacity: usize) {
        assert!(len <= self.capacity());
        assert!(len <= capacity);
        let mut new = Self::with_capacity(capacity);
        // SAFETY: both arenas hold at least `len` slots and never overlap.
        // The old slots are `MaybeUninit`, so freeing them does not drop the
        // moved elements a second time.
        unsafe {
            ptr::copy_nonoverlapping(self.slots.as_ptr(), new.slots.as_mut_ptr(), len);
        }
        *self = new;
    }

    /// # Safety
    ///
    /// Slots `[0, len)` must be initialized.
    pub unsafe fn slice(&self, len: usize) -> &[T] {
        debug_assert!(len <= self.capacity());
        std::slice::from_raw_parts(self.slots.as_ptr().cast::<T>(), len)
    }

    /// # Safety
    ///
    /// Slots `[0, len)` must be initialized.
    pub unsafe fn slice_mut(&mut self, len: usize) -> &mut [T] {
        debug_assert!(len <= self.capacity());
        std::slice::from_raw_parts_mut(self.slots.as_mut_ptr().cast::<T>(), len)
    }

    /// # Safety
    ///
    /// `index` must be an uninitialized slot, otherwise its old value leaks.
    pub unsafe fn write(&mut self, index: usize, value: T) {
        self.slots[index].write(value);
    }

    /// Moves the element out of slot `index`, leaving the slot logically
    /// uninitialized.
    ///
    /// # Safety
    ///
    /// `index` must be initialized and must not be read again before being
    /// rewritten.
    pub unsafe fn read(&self, index: usize) -> T {
        self.slots[index].assume_init_read()
    }

    /// Shifts `[index, len)` one slot to the right, opening a hole at `index`.
    ///
    /// # Safety
    ///
    /// Slots `[0, len)` must be initialized and `len < capacity`.
    pub unsafe fn shift_right(&mut self, index: usize, len: usize) {
        assert!(index <= len);
        assert!(len < self.capacity());
        let base = self.slots.as_mut_ptr();
        ptr::copy(base.add(index), base.add(index + 1), len - index);
    }

    /// Shifts `[index + 1, len)` one slot to the left over the hole at
    /// `index`.
    ///
    /// # Safety
    ///
    /// Slot `index` must already have been moved out, and the rest of
    /// `[0, len)` must be initialized.
    pub unsafe fn shift_left(&mut self, index: usize, len: usize) {
        assert!(index < len);
        assert!(len <= self.capacity());
        let base = self.slots.as_mut_ptr();
        ptr::copy(base.add(index + 1), base.add(index), len - index - 1);
    }

    /// Drops the elements in `[start, end)` in place.
    ///
    /// # Safety
    ///
    /// Slots `[start, end)` must be initialized and must not be used again
    /// before being rewritten.
    pub unsafe fn drop_range(&mut self, start: usize, end: usize) {
        assert!(start <= end);
        assert!(end <= self.capacity());
        let base = self.slots.as_mut_ptr().cast::<T>();
        let range = ptr::slice_from_raw_parts_mut(base.add(start), end - start);
        ptr::drop_in_place(range);
    }
}
impl<T> Default for RawBuf<T> {
    fn default() -> Self {
        Self::new()
    }
}
