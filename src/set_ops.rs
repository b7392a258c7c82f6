use core::cmp::Ordering;

use crate::{AvlTree, Stack};

impl<K: Ord + Clone> AvlTree<K> {
    /// Returns a new tree holding the keys present in both `self` and `other`.
    ///
    /// This operation completes in _O(n + m)_ comparisons; the result is built by insertion.
    pub fn intersection(&self, other: &AvlTree<K>) -> AvlTree<K> {
        let mut lhs = self.ascending_stack();
        let mut rhs = other.ascending_stack();
        let mut result = AvlTree::new();

        let (mut a, mut b) = (lhs.pop(), rhs.pop());
        while let (Some(x), Some(y)) = (a, b) {
            match x.cmp(y) {
                Ordering::Less => a = lhs.pop(),
                Ordering::Greater => b = rhs.pop(),
                Ordering::Equal => {
                    result.push_merged(x.clone());
                    (a, b) = (lhs.pop(), rhs.pop());
                }
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            lhs = self.len(),
            rhs = other.len(),
            result = result.len(),
            "intersection"
        );

        result
    }

    /// Returns a new tree holding the keys present in `self`, `other`, or both.
    ///
    /// This operation completes in _O(n + m)_ comparisons; the result is built by insertion.
    pub fn union(&self, other: &AvlTree<K>) -> AvlTree<K> {
        let mut lhs = self.ascending_stack();
        let mut rhs = other.ascending_stack();
        let mut result = AvlTree::new();

        let (mut a, mut b) = (lhs.pop(), rhs.pop());
        loop {
            let next = match (a, b) {
                (None, None) => break,
                (Some(x), None) => {
                    a = lhs.pop();
                    x
                }
                (None, Some(y)) => {
                    b = rhs.pop();
                    y
                }
                (Some(x), Some(y)) => match x.cmp(y) {
                    Ordering::Less => {
                        a = lhs.pop();
                        x
                    }
                    Ordering::Greater => {
                        b = rhs.pop();
                        y
                    }
                    Ordering::Equal => {
                        (a, b) = (lhs.pop(), rhs.pop());
                        x
                    }
                },
            };

            result.push_merged(next.clone());
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            lhs = self.len(),
            rhs = other.len(),
            result = result.len(),
            "union"
        );

        result
    }

    // Pushes the keys in descending order so that popping yields them ascending.
    fn ascending_stack(&self) -> Stack<&K> {
        self.keys(true).collect()
    }

    // Inserts a key produced by a merge walk, which never repeats a key.
    fn push_merged(&mut self, key: K) {
        let inserted = self.insert(key);
        debug_assert!(inserted.is_ok(), "merge walk produced a duplicate key");
    }
}
