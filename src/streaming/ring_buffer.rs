//! Fixed-capacity FIFO ring buffer.
//!
//! The backing store holds `capacity + 1` slots and one slot is always left
//! empty, so two cursors are enough to tell a full buffer from an empty one:
//!
//! - empty iff `read == write`
//! - full iff `next(write) == read`
//! - the logical content runs from `read` (inclusive) to `write`
//!   (exclusive) in circular order
//!
//! `push` refuses to overwrite when full; the caller decides what to drop.

use thiserror::Error;

/// Errors raised while constructing a [`RingBuffer`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RingError {
    #[error("ring buffer capacity must be at least 1")]
    ZeroCapacity,

    #[error("cannot allocate ring buffer of {0} slots")]
    Allocation(usize),
}

/// Bounded FIFO with O(1) push/pop and order-preserving enumeration.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    /// Backing store, `capacity + 1` slots. Empty after `finalize`.
    slots: Vec<T>,
    /// Index of the oldest element.
    read: usize,
    /// Index of the next free slot.
    write: usize,
}

impl<T: Copy + Default> RingBuffer<T> {
    /// Create a buffer that holds at most `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Result<Self, RingError> {
        if capacity == 0 {
            return Err(RingError::ZeroCapacity);
        }
        let size = capacity
            .checked_add(1)
            .ok_or(RingError::Allocation(capacity))?;

        let mut slots = Vec::new();
        slots
            .try_reserve_exact(size)
            .map_err(|_| RingError::Allocation(size))?;
        slots.resize(size, T::default());

        Ok(Self {
            slots,
            read: 0,
            write: 0,
        })
    }
}

impl<T: Copy> RingBuffer<T> {
    /// Cursor position following `ptr`.
    #[inline]
    fn next(&self, ptr: usize) -> usize {
        (ptr + 1) % self.slots.len()
    }

    /// Maximum number of elements the buffer can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len().saturating_sub(1)
    }

    /// Number of elements currently held.
    #[inline]
    pub fn len(&self) -> usize {
        if self.write >= self.read {
            self.write - self.read
        } else {
            self.slots.len() - self.read + self.write
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.read == self.write
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        // A finalized buffer has no slots and accepts nothing.
        self.slots.is_empty() || self.next(self.write) == self.read
    }

    /// Append `value` at the tail.
    ///
    /// Returns `false` and leaves the buffer untouched when it is full.
    #[inline]
    pub fn push(&mut self, value: T) -> bool {
        if self.is_full() {
            return false;
        }
        self.slots[self.write] = value;
        self.write = self.next(self.write);
        true
    }

    /// Remove and return the oldest element.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let value = self.slots[self.read];
        self.read = self.next(self.read);
        Some(value)
    }

    /// Visit every element from oldest to newest without consuming them.
    pub fn for_each_in_order<F: FnMut(T)>(&self, mut visitor: F) {
        let mut i = self.read;
        while i != self.write {
            visitor(self.slots[i]);
            i = self.next(i);
        }
    }

    /// The logical content as two contiguous slices.
    ///
    /// Concatenating the first and second slice yields the elements in
    /// insertion order; the second slice is empty unless the content wraps.
    pub fn as_slices(&self) -> (&[T], &[T]) {
        if self.write >= self.read {
            (&self.slots[self.read..self.write], &[])
        } else {
            (&self.slots[self.read..], &self.slots[..self.write])
        }
    }

    /// Drop all elements, keeping the backing store.
    #[inline]
    pub fn clear(&mut self) {
        self.read = 0;
        self.write = 0;
    }

    /// Release the backing store.
    ///
    /// Safe to call more than once. A finalized buffer is empty and
    /// refuses every push.
    pub fn finalize(&mut self) {
        self.slots = Vec::new();
        self.read = 0;
        self.write = 0;
    }
}
