//! An AVL tree: a height-balanced binary search tree over a set of ordered keys.
#![cfg_attr(not(feature = "std"), no_std)]

// Conventions used in comments:
// - The height of a node `x` is denoted `h(x)`. A leaf has height 1 and a missing child has
//   height 0.
// - The balance factor of `x` is `h(right(x)) - h(left(x))`.
//
// The fundamental invariants of an AVL tree are:
// 1. Every key in the left subtree of `x` is less than the key of `x`, and every key in the right
//    subtree of `x` is greater.
// 2. All balance factors are -1, 0 or 1.
// 3. `h(x) = 1 + max(h(left(x)), h(right(x)))`.
//
// Corollary:
// 4. A tree of height `h` has at least `F(h + 2) - 1` nodes, where `F` is the Fibonacci sequence,
//    so `h < 1.4405 * log2(n + 2)`.
//
// Nodes are stored in an arena owned by the tree. Child and parent links are arena indices; the
// parent link never owns anything and is only used to walk back up after an edit.

extern crate alloc;

mod debug;
mod error;
mod iter;
mod node;
mod rotate;
mod set_ops;
mod stack;

#[cfg(any(test, feature = "model"))]
pub mod model;


use core::{borrow::Borrow, cmp, cmp::Ordering, fmt};

pub use crate::{
    error::{Error, Result},
    iter::{Keys, Traverse},
    node::{NodeId, NodeRef},
    stack::{Drain, PathStack, Stack},
};

use crate::node::{Dir, NodePool};

/// An ordered set of unique keys, stored in an AVL tree.
pub struct AvlTree<K: Ord> {
    nodes: NodePool<K>,
    root: Option<NodeId>,
    len: usize,
}

impl<K: Ord> AvlTree<K> {
    /// Returns a new empty tree.
    pub const fn new() -> AvlTree<K> {
        AvlTree {
            nodes: NodePool::new(),
            root: None,
            len: 0,
        }
    }

    /// Builds a tree by inserting each key in turn.
    ///
    /// Fails with [`Error::DuplicateKey`] if `keys` yields the same key twice.
    pub fn from_keys<I>(keys: I) -> Result<AvlTree<K>>
    where
        I: IntoIterator<Item = K>,
    {
        let mut tree = AvlTree::new();

        for key in keys {
            tree.insert(key)?;
        }

        Ok(tree)
    }

    /// Returns `true` if the tree contains no keys.
    pub fn is_empty(&self) -> bool {
        let empty = self.len == 0;
        debug_assert_eq!(empty, self.root.is_none());
        empty
    }

    /// Returns the number of keys in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the height of the tree, or 0 if it is empty.
    pub fn height(&self) -> usize {
        self.nodes.height_of(self.root) as usize
    }

    /// Returns the root node, if any.
    pub fn root(&self) -> Option<NodeRef<'_, K>> {
        self.root.map(|root| self.node(root))
    }

    /// Resolves a node handle, such as one taken from a [`PathStack`].
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to a node currently in this tree.
    pub fn node(&self, id: NodeId) -> NodeRef<'_, K> {
        NodeRef::new(&self.nodes, id)
    }

    /// Removes every key from the tree.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    #[doc(hidden)]
    pub fn assert_invariants(&self) {
        match self.root {
            Some(root) => {
                assert_eq!(self.nodes[root].parent(), None, "root has a parent link");
                self.assert_invariants_at(root);
            }
            None => assert_eq!(self.len, 0, "empty tree has a nonzero length"),
        }

        // Check the global ordering as well as the local one.
        let mut count = 0;
        let mut prev: Option<&K> = None;
        for key in self.iter() {
            if let Some(prev) = prev {
                assert!(prev < key, "keys are not strictly ascending");
            }
            prev = Some(key);
            count += 1;
        }

        assert_eq!(count, self.len, "cached length disagrees with node count");
    }

    fn assert_invariants_at(&self, node: NodeId) -> u8 {
        let mut child_heights = [0; 2];

        for dir in [Dir::Left, Dir::Right] {
            if let Some(child) = self.nodes[node].child(dir) {
                // Ensure child's parent link points to this node.
                assert_eq!(
                    self.nodes[child].parent(),
                    Some(node),
                    "child's parent link does not point to its parent"
                );

                let expected = match dir {
                    Dir::Left => Ordering::Less,
                    Dir::Right => Ordering::Greater,
                };
                assert_eq!(
                    self.nodes[child].key.cmp(&self.nodes[node].key),
                    expected,
                    "child is on the wrong side of its parent"
                );

                child_heights[dir as usize] = self.assert_invariants_at(child);
            }
        }

        let height = cmp::max(child_heights[0], child_heights[1]) + 1;
        assert_eq!(self.nodes[node].height(), height, "stale cached height");
        assert!(self.nodes.is_balanced(node), "balance factor out of range");

        height
    }

    /// Returns `true` if the tree contains `key`.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_id(key).is_some()
    }

    /// Returns a reference to the stored key equal to `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_id(key).map(|id| &self.nodes[id].key)
    }

    /// Returns the node holding `key`.
    pub fn find<Q>(&self, key: &Q) -> Result<NodeRef<'_, K>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_id(key)
            .map(|id| self.node(id))
            .ok_or(Error::KeyNotFound)
    }

    fn find_id<Q>(&self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut opt_cur = self.root;

        loop {
            let cur = opt_cur?;

            match key.cmp(self.nodes[cur].key.borrow()) {
                Ordering::Less => opt_cur = self.nodes[cur].left(),
                Ordering::Equal => return Some(cur),
                Ordering::Greater => opt_cur = self.nodes[cur].right(),
            }
        }
    }

    /// Returns the stack of nodes visited while descending from the root to `key`.
    ///
    /// The node holding `key` is on top, so popping walks back up towards the root.
    pub fn path_to_root<Q>(&self, key: &Q) -> Result<PathStack>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut path = PathStack::new();
        let mut opt_cur = self.root;

        while let Some(cur) = opt_cur {
            path.push(cur);

            match key.cmp(self.nodes[cur].key.borrow()) {
                Ordering::Less => opt_cur = self.nodes[cur].left(),
                Ordering::Equal => return Ok(path),
                Ordering::Greater => opt_cur = self.nodes[cur].right(),
            }
        }

        Err(Error::KeyNotFound)
    }

    /// Like [`AvlTree::path_to_root`], but the root is on top and the node holding `key` at the
    /// bottom.
    pub fn path_to_node<Q>(&self, key: &Q) -> Result<PathStack>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut path = self.path_to_root(key)?;
        path.reverse();
        Ok(path)
    }

    /// Returns the minimum key of the tree.
    pub fn min(&self) -> Result<&K> {
        self.min_node(None).map(|id| &self.nodes[id].key)
    }

    /// Returns the maximum key of the tree.
    pub fn max(&self) -> Result<&K> {
        self.max_node(None).map(|id| &self.nodes[id].key)
    }

    /// Returns the minimum node in the subtree rooted at `start`, or in the whole tree.
    pub fn min_node(&self, start: Option<NodeId>) -> Result<NodeId> {
        self.extreme_node(start, Dir::Left)
    }

    /// Returns the maximum node in the subtree rooted at `start`, or in the whole tree.
    pub fn max_node(&self, start: Option<NodeId>) -> Result<NodeId> {
        self.extreme_node(start, Dir::Right)
    }

    fn extreme_node(&self, start: Option<NodeId>, dir: Dir) -> Result<NodeId> {
        let root = self.root.ok_or(Error::EmptyTree)?;
        let mut cur = start.unwrap_or(root);

        while let Some(next) = self.nodes[cur].child(dir) {
            cur = next;
        }

        Ok(cur)
    }

    /// Removes and returns the minimum key of the tree.
    pub fn pop_min(&mut self) -> Option<K> {
        let path = self.path_to_extreme(Dir::Left)?;
        Some(self.remove_at(path))
    }

    /// Removes and returns the maximum key of the tree.
    pub fn pop_max(&mut self) -> Option<K> {
        let path = self.path_to_extreme(Dir::Right)?;
        Some(self.remove_at(path))
    }

    fn path_to_extreme(&self, dir: Dir) -> Option<PathStack> {
        let mut path = PathStack::new();
        let mut cur = self.root?;
        path.push(cur);

        while let Some(next) = self.nodes[cur].child(dir) {
            path.push(next);
            cur = next;
        }

        Some(path)
    }

    /// Inserts `key` into the tree.
    ///
    /// Fails with [`Error::DuplicateKey`], leaving the tree unchanged, if `key` is already
    /// present. This operation completes in _O(log(n))_ time.
    pub fn insert(&mut self, key: K) -> Result<()> {
        let Some(root) = self.root else {
            // Tree is empty. The new node becomes the root and nothing needs rebalancing.
            self.root = Some(self.nodes.alloc(key, None));
            self.len += 1;
            return Ok(());
        };

        // Descend the tree, looking for a free slot.
        let mut parent = root;
        let dir = loop {
            let dir = match key.cmp(&self.nodes[parent].key) {
                Ordering::Less => Dir::Left,
                Ordering::Equal => return Err(Error::DuplicateKey),
                Ordering::Greater => Dir::Right,
            };

            match self.nodes[parent].child(dir) {
                Some(child) => parent = child,
                None => break dir,
            }
        };

        let node = self.nodes.alloc(key, Some(parent));
        self.nodes[parent].set_child(dir, Some(node));
        self.len += 1;

        // Every ancestor of the new leaf may have grown.
        let mut opt_cur = Some(parent);
        while let Some(cur) = opt_cur {
            let local_root = self.rebalance_node(cur);
            opt_cur = self.nodes[local_root].parent();
        }

        Ok(())
    }

    // Recomputes the height of `node` and, if it is out of balance, restores balance with one
    // single or double rotation.
    //
    // Returns the root of the subtree formerly rooted at `node`.
    fn rebalance_node(&mut self, node: NodeId) -> NodeId {
        self.nodes.update_height(node);

        let balance = self.nodes.balance(node);
        if balance > 1 {
            let right = self.nodes[node]
                .right()
                .expect("right-heavy node must have a right child");

            if self.nodes.balance(right) < 0 {
                self.rotate_double_left(node)
            } else {
                self.rotate_left(node)
            }
        } else if balance < -1 {
            let left = self.nodes[node]
                .left()
                .expect("left-heavy node must have a left child");

            if self.nodes.balance(left) > 0 {
                self.rotate_double_right(node)
            } else {
                self.rotate_right(node)
            }
        } else {
            node
        }
    }

    /// Removes `key` from the tree and returns the stored key.
    ///
    /// Fails with [`Error::EmptyTree`] if the tree is empty, or with [`Error::KeyNotFound`] if
    /// `key` is not present; in both cases the tree is unchanged. This operation completes in
    /// _O(log(n))_ time.
    pub fn delete<Q>(&mut self, key: &Q) -> Result<K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        if self.root.is_none() {
            return Err(Error::EmptyTree);
        }

        let path = self.path_to_root(key)?;
        Ok(self.remove_at(path))
    }

    // Unlinks and frees the node on top of `path`, then rebalances every node left on `path`.
    //
    // `path` must run from the root to the node.
    fn remove_at(&mut self, mut path: PathStack) -> K {
        // There are three possible cases:
        //
        // 1. `node` is a leaf. It is simply detached.
        //
        // 2. `node` has one child, which is spliced into `node`'s slot.
        //
        // 3. `node` has two children. Its predecessor (the maximum of its left subtree) has no
        //    right child, so it is first detached as in case 1 or 2 and then takes over `node`'s
        //    position. The recorded path is extended down to the predecessor's parent, and
        //    `node`'s entry in it is replaced by the predecessor.
        //
        // Afterwards the path holds every node whose height may have changed, deepest on top.
        let node = path.pop().expect("path must end at the node to remove");
        let parent = self.nodes[node].parent();
        debug_assert_eq!(path.peek().copied(), parent);

        match (self.nodes[node].left(), self.nodes[node].right()) {
            (Some(left), Some(right)) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(?node, "delete: two children, substituting predecessor");

                path.push(node);

                let mut pred = left;
                while let Some(next) = self.nodes[pred].right() {
                    path.push(pred);
                    pred = next;
                }

                // Detach the predecessor, elevating its left child (which may be None).
                let pred_parent = self.nodes[pred]
                    .parent()
                    .expect("predecessor must lie below the removed node");
                let pred_left = self.nodes[pred].left();
                self.replace_child(pred_parent, pred, pred_left);
                self.nodes.maybe_set_parent(pred_left, Some(pred_parent));

                // Move the predecessor into `node`'s position. `node`'s left link was updated
                // above iff `pred` was its left child.
                let left = self.nodes[node].left();
                self.nodes[pred].set_left(left);
                self.nodes.maybe_set_parent(left, Some(pred));
                self.nodes[pred].set_right(Some(right));
                self.nodes[right].set_parent(Some(pred));

                self.nodes[pred].set_parent(parent);
                self.replace_child_or_set_root(parent, node, Some(pred));
                self.nodes.update_height(pred);

                let replaced = path.replace(&node, pred);
                debug_assert!(replaced);
            }

            (Some(child), None) | (None, Some(child)) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(?node, ?child, "delete: one child, splicing it in");

                self.replace_child_or_set_root(parent, node, Some(child));
                self.nodes[child].set_parent(parent);
            }

            (None, None) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(?node, "delete: leaf");

                self.replace_child_or_set_root(parent, node, None);
            }
        }

        let key = self.nodes.free(node);
        self.len -= 1;

        // A rotation high up may be needed even if the heights just above the edit did not
        // change, so every recorded ancestor is revisited.
        while let Some(ancestor) = path.pop() {
            self.rebalance_node(ancestor);
        }

        key
    }

    #[inline]
    fn replace_child_or_set_root(
        &mut self,
        parent: Option<NodeId>,
        old_child: NodeId,
        new_child: Option<NodeId>,
    ) {
        match parent {
            Some(parent) => self.replace_child(parent, old_child, new_child),
            None => self.root = new_child,
        }
    }

    // Replaces the child link of `parent` pointing at `old_child` with `new_child`.
    //
    // `new_child`'s parent link is not updated.
    #[inline]
    fn replace_child(&mut self, parent: NodeId, old_child: NodeId, new_child: Option<NodeId>) {
        let dir = self.nodes.which_child(parent, old_child);
        self.nodes[parent].set_child(dir, new_child);
    }
}

impl<K: Ord> Default for AvlTree<K> {
    fn default() -> Self {
        AvlTree::new()
    }
}

impl<K: Ord + Clone> Clone for AvlTree<K> {
    fn clone(&self) -> Self {
        AvlTree {
            nodes: self.nodes.clone(),
            root: self.root,
            len: self.len,
        }
    }
}

impl<K: Ord + fmt::Debug> fmt::Debug for AvlTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'tree, K: Ord> IntoIterator for &'tree AvlTree<K> {
    type Item = &'tree K;
    type IntoIter = Keys<'tree, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
