use std::iter::FusedIterator;
use std::slice;

use super::CircularBuffer;

/// Borrowing iterator over a [`CircularBuffer`], oldest element first.
///
/// The live region is split into at most two physical segments; `front`
/// is walked before `back`.
#[derive(Clone, Debug)]
pub struct Iter<'a, T> {
    front: slice::Iter<'a, Option<T>>,
    back: slice::Iter<'a, Option<T>>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(super) fn new(front: &'a [Option<T>], back: &'a [Option<T>], remaining: usize) -> Self {
        Self {
            front: front.iter(),
            back: back.iter(),
            remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let slot = self.front.next().or_else(|| self.back.next())?;
        self.remaining -= 1;
        slot.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Owning iterator that drains a [`CircularBuffer`] in FIFO order.
#[derive(Clone, Debug)]
pub struct IntoIter<T> {
    buffer: CircularBuffer<T>,
}

impl<T> IntoIter<T> {
    pub(super) fn new(buffer: CircularBuffer<T>) -> Self {
        Self { buffer }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.buffer.dequeue()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.buffer.len();
        (len, Some(len))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}
