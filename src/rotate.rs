use crate::{node::Dir, AvlTree, NodeId};

impl<K: Ord> AvlTree<K> {
    /// Rotates left at `root`, moving its right child up. Returns the new local root.
    pub(crate) fn rotate_left(&mut self, root: NodeId) -> NodeId {
        self.rotate(root, Dir::Left)
    }

    /// Rotates right at `root`, moving its left child up. Returns the new local root.
    pub(crate) fn rotate_right(&mut self, root: NodeId) -> NodeId {
        self.rotate(root, Dir::Right)
    }

    /// Handles a right-heavy `root` whose right child is left-heavy.
    pub(crate) fn rotate_double_left(&mut self, root: NodeId) -> NodeId {
        let right = self.nodes[root]
            .right()
            .expect("double left rotation needs a right child");

        self.rotate_right(right);
        self.rotate_left(root)
    }

    /// Handles a left-heavy `root` whose left child is right-heavy.
    pub(crate) fn rotate_double_right(&mut self, root: NodeId) -> NodeId {
        let left = self.nodes[root]
            .left()
            .expect("double right rotation needs a left child");

        self.rotate_left(left);
        self.rotate_right(root)
    }

    // Performs a rotation moving `root` down in direction `dir` and its `!dir` child (the pivot)
    // up into its place, reattaching the pivot to `root`'s old parent or to the tree root.
    //
    // Heights of `root` and the pivot are recomputed, in that order.
    fn rotate(&mut self, root: NodeId, dir: Dir) -> NodeId {
        let pivot = self.nodes[root]
            .child(!dir)
            .expect("rotation pivot must exist");

        // - `root` becomes the `dir` child of `pivot`.
        // - `across` goes from the `dir` child of `pivot` to the `!dir` child of `root`.
        let across = self.nodes[pivot].child(dir);
        self.nodes[root].set_child(!dir, across);
        self.nodes.maybe_set_parent(across, Some(root));

        self.nodes[pivot].set_child(dir, Some(root));
        let parent = self.nodes[root].set_parent(Some(pivot));
        self.nodes[pivot].set_parent(parent);

        self.replace_child_or_set_root(parent, root, Some(pivot));

        self.nodes.update_height(root);
        self.nodes.update_height(pivot);

        #[cfg(feature = "tracing")]
        tracing::trace!(?root, ?pivot, ?dir, "rotate");

        pivot
    }
}

#[cfg(test)]
mod tests {
    use crate::AvlTree;

    // Builds an unbalanced chain without going through `insert`, so rotations can be observed in
    // isolation.
    fn chain(keys: &[u32], dir: super::Dir) -> AvlTree<u32> {
        let mut tree = AvlTree::new();
        let mut parent = None;

        for &key in keys {
            let id = tree.nodes.alloc(key, parent);
            match parent {
                Some(p) => {
                    tree.nodes[p].set_child(dir, Some(id));
                }
                None => tree.root = Some(id),
            }
            tree.len += 1;
            parent = Some(id);
        }

        let mut opt_cur = parent;
        while let Some(cur) = opt_cur {
            tree.nodes.update_height(cur);
            opt_cur = tree.nodes[cur].parent();
        }

        tree
    }

    fn shape(tree: &AvlTree<u32>) -> (u32, Option<u32>, Option<u32>) {
        let root = tree.root().unwrap();
        (
            *root.key(),
            root.left().map(|n| *n.key()),
            root.right().map(|n| *n.key()),
        )
    }

    #[test]
    fn single_left() {
        let mut tree = chain(&[1, 2, 3], super::Dir::Right);
        let root = tree.root.unwrap();

        let new_root = tree.rotate_left(root);
        assert_eq!(tree.root, Some(new_root));
        assert_eq!(shape(&tree), (2, Some(1), Some(3)));
        assert_eq!(tree.height(), 2);
        tree.assert_invariants();
    }

    #[test]
    fn single_right() {
        let mut tree = chain(&[3, 2, 1], super::Dir::Left);
        let root = tree.root.unwrap();

        tree.rotate_right(root);
        assert_eq!(shape(&tree), (2, Some(1), Some(3)));
        tree.assert_invariants();
    }

    #[test]
    fn double_left() {
        // 1 -> 3 -> 2 is a right-left zig-zag.
        let mut tree = chain(&[1, 3], super::Dir::Right);
        let three = tree.root().unwrap().right().unwrap().id();
        let two = tree.nodes.alloc(2, Some(three));
        tree.nodes[three].set_left(Some(two));
        tree.len += 1;
        tree.nodes.update_height(three);
        let root = tree.root.unwrap();
        tree.nodes.update_height(root);

        tree.rotate_double_left(root);
        assert_eq!(shape(&tree), (2, Some(1), Some(3)));
        tree.assert_invariants();
    }

    #[test]
    fn double_right() {
        // 3 -> 1 -> 2 is a left-right zig-zag.
        let mut tree = chain(&[3, 1], super::Dir::Left);
        let one = tree.root().unwrap().left().unwrap().id();
        let two = tree.nodes.alloc(2, Some(one));
        tree.nodes[one].set_right(Some(two));
        tree.len += 1;
        tree.nodes.update_height(one);
        let root = tree.root.unwrap();
        tree.nodes.update_height(root);

        tree.rotate_double_right(root);
        assert_eq!(shape(&tree), (2, Some(1), Some(3)));
        tree.assert_invariants();
    }

    #[test]
    fn rotation_below_root_relinks_parent() {
        let mut tree = AvlTree::from_keys([10, 5, 20, 30]).unwrap();
        let twenty = tree.find(&20).unwrap().id();
        let root = tree.root.unwrap();

        // Force 30 up over 20 and back.
        let thirty = tree.rotate_left(twenty);
        assert_eq!(tree.root, Some(root));
        assert_eq!(tree.root().unwrap().right().unwrap().id(), thirty);
        assert_eq!(*tree.node(thirty).left().unwrap().key(), 20);

        tree.rotate_right(thirty);
        assert_eq!(tree.root().unwrap().right().unwrap().id(), twenty);
        tree.assert_invariants();
    }
}
