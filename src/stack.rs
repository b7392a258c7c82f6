use alloc::vec::Vec;

use crate::NodeId;

/// A last-in, first-out stack.
///
/// Iterating a stack by value drains it, yielding items in pop order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stack<T> {
    items: Vec<T>,
}

/// The nodes visited while descending from the root to a key.
pub type PathStack = Stack<NodeId>;

impl<T> Stack<T> {
    /// Returns a new empty stack.
    pub const fn new() -> Self {
        Stack { items: Vec::new() }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Removes and returns the most recently pushed item.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Returns the item that the next call to [`Stack::pop`] would return.
    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Reverses the pop order of the stack in place.
    pub fn reverse(&mut self) {
        self.items.reverse();
    }

    /// Returns the items in push order, bottom of the stack first.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T: PartialEq> Stack<T> {
    /// Replaces the first occurrence of `old`, counting from the bottom, with `new`.
    ///
    /// Returns `false` if `old` is not on the stack.
    pub fn replace(&mut self, old: &T, new: T) -> bool {
        match self.items.iter_mut().find(|item| **item == *old) {
            Some(slot) => {
                *slot = new;
                true
            }
            None => false,
        }
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Stack::new()
    }
}

impl<T> FromIterator<T> for Stack<T> {
    /// Pushes every item in iteration order, leaving the last one on top.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Stack {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for Stack<T> {
    type Item = T;
    type IntoIter = Drain<T>;

    fn into_iter(self) -> Self::IntoIter {
        Drain { stack: self }
    }
}

/// A draining iterator over a [`Stack`], in pop order.
#[derive(Debug)]
pub struct Drain<T> {
    stack: Stack<T>,
}

impl<T> Iterator for Drain<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.stack.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len(), Some(self.stack.len()))
    }
}

impl<T> ExactSizeIterator for Drain<T> {}

impl<T> core::iter::FusedIterator for Drain<T> {}
