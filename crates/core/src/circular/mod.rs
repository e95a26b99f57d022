//! Fixed-capacity ring buffer with a configurable overwrite policy.
//!
//! Storage grows lazily up to `capacity` physical slots on the first fill and
//! is then reused through modular indexing. `len` is the only authority on
//! emptiness and fullness: `head == tail` holds both when empty and when full.
//!
//! The buffer is not synchronized. Share it across threads only behind a lock
//! that guards every operation, iteration included.

mod iter;
mod policy;

use crate::util::fmt::write_list;
use std::fmt;

pub use iter::{IntoIter, Iter};
pub use policy::{OverwritePolicy, ParsePolicyError};

/// Capacity used by [`CircularBuffer::default`] and by `collect()` on an empty source.
pub const DEFAULT_CAPACITY: usize = 16;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityError {
    #[error("capacity must be > 0")]
    Zero,
}

/// Result of a single [`CircularBuffer::enqueue`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnqueueOutcome<T> {
    /// The element was stored without displacing anything.
    Stored,
    /// The element was stored after evicting the oldest one, returned here.
    Overwrote(T),
    /// The buffer was full under [`OverwritePolicy::Ignore`]; the element is handed back.
    Dropped(T),
}

impl<T> EnqueueOutcome<T> {
    pub fn is_stored(&self) -> bool {
        !matches!(self, Self::Dropped(_))
    }
}

#[derive(Clone, Debug)]
pub struct CircularBuffer<T> {
    slots: Vec<Option<T>>,
    head: usize,
    tail: usize,
    capacity: usize,
    len: usize,
    policy: OverwritePolicy,
}

impl<T> CircularBuffer<T> {
    pub fn new(capacity: usize, policy: OverwritePolicy) -> Result<Self, CapacityError> {
        if capacity == 0 {
            return Err(CapacityError::Zero);
        }
        Ok(Self::with_valid_capacity(capacity, policy))
    }

    /// Same as [`CircularBuffer::new`] with [`OverwritePolicy::Overwrite`].
    pub fn with_capacity(capacity: usize) -> Result<Self, CapacityError> {
        Self::new(capacity, OverwritePolicy::default())
    }

    /// Builds a buffer and enqueues every item in order, applying `policy`
    /// while populating.
    pub fn from_iter_with<I>(
        items: I,
        capacity: usize,
        policy: OverwritePolicy,
    ) -> Result<Self, CapacityError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut buffer = Self::new(capacity, policy)?;
        buffer.extend(items);
        Ok(buffer)
    }

    pub(crate) fn with_valid_capacity(capacity: usize, policy: OverwritePolicy) -> Self {
        Self {
            slots: Vec::new(),
            head: 0,
            tail: 0,
            capacity,
            len: 0,
            policy,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn policy(&self) -> OverwritePolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity
    }

    /// Appends `element` at the tail.
    ///
    /// When the buffer is full the policy decides: `Ignore` leaves the buffer
    /// untouched and returns the element in [`EnqueueOutcome::Dropped`];
    /// `Overwrite` evicts the oldest element first.
    pub fn enqueue(&mut self, element: T) -> EnqueueOutcome<T> {
        let mut outcome = EnqueueOutcome::Stored;

        if self.is_full() {
            match self.policy {
                OverwritePolicy::Ignore => {
                    tracing::trace!(capacity = self.capacity, "buffer full, dropping element");
                    return EnqueueOutcome::Dropped(element);
                }
                OverwritePolicy::Overwrite => {
                    if let Some(evicted) = self.dequeue() {
                        tracing::trace!(capacity = self.capacity, "buffer full, evicted oldest");
                        outcome = EnqueueOutcome::Overwrote(evicted);
                    }
                }
            }
        }

        if self.slots.len() < self.capacity {
            // Still growing: the write cursor always sits at the end of storage.
            debug_assert_eq!(self.tail, self.slots.len());
            if self.slots.capacity() == 0 {
                self.slots.reserve_exact(self.capacity);
            }
            self.slots.push(Some(element));
        } else {
            self.slots[self.tail] = Some(element);
        }

        self.tail = self.advance(self.tail);
        self.len += 1;
        outcome
    }

    /// Removes and returns the oldest element, or `None` when empty.
    pub fn dequeue(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let element = self.slots[self.head].take();
        self.head = self.advance(self.head);
        self.len -= 1;
        element
    }

    /// The oldest element, without removing it.
    pub fn peek(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.slots.get(self.head).and_then(Option::as_ref)
    }

    pub fn get(&self, index_from_oldest: usize) -> Option<&T> {
        if index_from_oldest >= self.len {
            return None;
        }
        let idx = (self.head + index_from_oldest) % self.capacity;
        self.slots.get(idx).and_then(Option::as_ref)
    }

    /// Drops every element and releases storage. Capacity and policy are kept.
    pub fn clear(&mut self) {
        tracing::debug!(dropped = self.len, "clearing buffer");
        self.head = 0;
        self.tail = 0;
        self.len = 0;
        self.slots = Vec::new();
    }

    pub fn iter(&self) -> Iter<'_, T> {
        if self.is_empty() {
            return Iter::new(&[], &[], 0);
        }
        if self.head >= self.tail {
            // Wrapped (or exactly full): [head, capacity) then [0, tail).
            Iter::new(&self.slots[self.head..], &self.slots[..self.tail], self.len)
        } else {
            Iter::new(&self.slots[self.head..self.tail], &[], self.len)
        }
    }

    fn advance(&self, cursor: usize) -> usize {
        (cursor + 1) % self.capacity
    }
}

impl<T> Default for CircularBuffer<T> {
    fn default() -> Self {
        Self::with_valid_capacity(DEFAULT_CAPACITY, OverwritePolicy::default())
    }
}

impl<T> Extend<T> for CircularBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.enqueue(item);
        }
    }
}

impl<T> FromIterator<T> for CircularBuffer<T> {
    /// Sizes the buffer to exactly the collected items; an empty source gets
    /// [`DEFAULT_CAPACITY`].
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let items: Vec<T> = iter.into_iter().collect();
        let capacity = if items.is_empty() {
            DEFAULT_CAPACITY
        } else {
            items.len()
        };
        let mut buffer = Self::with_valid_capacity(capacity, OverwritePolicy::default());
        buffer.extend(items);
        buffer
    }
}

impl<'a, T> IntoIterator for &'a CircularBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for CircularBuffer<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<T: PartialEq> PartialEq for CircularBuffer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.capacity == other.capacity
            && self.policy == other.policy
            && self.len == other.len
            && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for CircularBuffer<T> {}

impl<T: fmt::Display> fmt::Display for CircularBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(f, self.iter())
    }
}
