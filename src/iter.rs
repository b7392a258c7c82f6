use core::iter::FusedIterator;

use crate::{
    node::{Dir, NodePool},
    AvlTree, NodeId, NodeRef, PathStack,
};

/// An in-order iterator over the nodes of an [`AvlTree`].
///
/// Created by [`AvlTree::traverse`].
pub struct Traverse<'tree, K> {
    nodes: &'tree NodePool<K>,

    // Nodes whose `first` subtree has been entered but that have not been yielded yet. The top of
    // the stack is always the next node to yield.
    pending: PathStack,
    first: Dir,

    len: usize,
}

impl<'tree, K> Traverse<'tree, K> {
    fn new(nodes: &'tree NodePool<K>, root: Option<NodeId>, len: usize, reverse: bool) -> Self {
        let first = if reverse { Dir::Right } else { Dir::Left };

        let mut iter = Traverse {
            nodes,
            pending: PathStack::new(),
            first,
            len,
        };
        iter.descend(root);
        iter
    }

    // Pushes `opt_cur` and its chain of `first` descendants.
    fn descend(&mut self, mut opt_cur: Option<NodeId>) {
        while let Some(cur) = opt_cur {
            self.pending.push(cur);
            opt_cur = self.nodes[cur].child(self.first);
        }
    }
}

impl<'tree, K> Iterator for Traverse<'tree, K> {
    type Item = NodeRef<'tree, K>;

    fn next(&mut self) -> Option<Self::Item> {
        let cur = self.pending.pop()?;

        // Everything on the `first` side of `cur` has been yielded; the other side comes next.
        self.descend(self.nodes[cur].child(!self.first));
        self.len -= 1;

        Some(NodeRef::new(self.nodes, cur))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<K> ExactSizeIterator for Traverse<'_, K> {}

impl<K> FusedIterator for Traverse<'_, K> {}

/// An in-order iterator over the keys of an [`AvlTree`].
///
/// Created by [`AvlTree::keys`] and [`AvlTree::iter`].
pub struct Keys<'tree, K> {
    inner: Traverse<'tree, K>,
}

impl<'tree, K> Iterator for Keys<'tree, K> {
    type Item = &'tree K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|node| node.key())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> ExactSizeIterator for Keys<'_, K> {}

impl<K> FusedIterator for Keys<'_, K> {}

impl<K: Ord> AvlTree<K> {
    /// Returns an iterator over the nodes of the tree, in ascending key order or, if `reverse` is
    /// set, in descending key order.
    ///
    /// The walk keeps its own stack of pending ancestors and does not recurse.
    pub fn traverse(&self, reverse: bool) -> Traverse<'_, K> {
        Traverse::new(&self.nodes, self.root, self.len, reverse)
    }

    /// Returns an iterator over the keys of the tree, ascending unless `reverse` is set.
    pub fn keys(&self, reverse: bool) -> Keys<'_, K> {
        Keys {
            inner: self.traverse(reverse),
        }
    }

    /// Returns an iterator over the keys of the tree in ascending order.
    pub fn iter(&self) -> Keys<'_, K> {
        self.keys(false)
    }

    /// Counts the nodes of the tree by walking it.
    ///
    /// Always equal to [`AvlTree::len`], which is _O(1)_.
    pub fn size(&self) -> usize {
        self.traverse(false).count()
    }
}
