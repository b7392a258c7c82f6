use alloc::vec::Vec;
use core::{
    cmp, fmt, mem,
    ops::{Index, IndexMut, Not},
};

/// Handle to a node stored in an [`AvlTree`](crate::AvlTree).
///
/// A `NodeId` is only meaningful for the tree that produced it, and only until that tree's next
/// structural mutation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Dir {
    Left = 0,
    Right = 1,
}

impl Not for Dir {
    type Output = Dir;

    fn not(self) -> Self::Output {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node<K> {
    pub(crate) key: K,
    parent: Option<NodeId>,
    children: [Option<NodeId>; 2],
    height: u8,
}

impl<K> Node<K> {
    fn new(key: K, parent: Option<NodeId>) -> Self {
        Node {
            key,
            parent,
            children: [None; 2],
            height: 1,
        }
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.left().is_none() && self.right().is_none()
    }

    #[inline]
    pub(crate) fn height(&self) -> u8 {
        self.height
    }

    #[inline]
    pub(crate) fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub(crate) fn child(&self, dir: Dir) -> Option<NodeId> {
        self.children[dir as usize]
    }

    #[inline]
    pub(crate) fn left(&self) -> Option<NodeId> {
        self.child(Dir::Left)
    }

    #[inline]
    pub(crate) fn right(&self) -> Option<NodeId> {
        self.child(Dir::Right)
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) -> Option<NodeId> {
        mem::replace(&mut self.parent, parent)
    }

    #[inline]
    pub(crate) fn set_child(&mut self, dir: Dir, child: Option<NodeId>) -> Option<NodeId> {
        mem::replace(&mut self.children[dir as usize], child)
    }

    #[inline]
    pub(crate) fn set_left(&mut self, left: Option<NodeId>) -> Option<NodeId> {
        self.set_child(Dir::Left, left)
    }

    #[inline]
    pub(crate) fn set_right(&mut self, right: Option<NodeId>) -> Option<NodeId> {
        self.set_child(Dir::Right, right)
    }
}

/// Arena owning every node of one tree.
///
/// Vacated slots are kept on a free list and handed out again by [`NodePool::alloc`].
#[derive(Clone, Debug)]
pub(crate) struct NodePool<K> {
    slots: Vec<Option<Node<K>>>,
    free: Vec<NodeId>,
}

impl<K> NodePool<K> {
    pub(crate) const fn new() -> Self {
        NodePool {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn alloc(&mut self, key: K, parent: Option<NodeId>) -> NodeId {
        let node = Node::new(key, parent);

        match self.free.pop() {
            Some(id) => {
                debug_assert!(self.slots[id.0].is_none());
                self.slots[id.0] = Some(node);
                id
            }
            None => {
                let id = NodeId(self.slots.len());
                self.slots.push(Some(node));
                id
            }
        }
    }

    /// Releases the slot of `id`, returning its key. The node must already be unlinked.
    pub(crate) fn free(&mut self, id: NodeId) -> K {
        let node = self.slots[id.0]
            .take()
            .expect("node id must refer to a live node");
        self.free.push(id);
        node.key
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }

    /// Height of a possibly absent subtree.
    #[inline]
    pub(crate) fn height_of(&self, node: Option<NodeId>) -> u8 {
        node.map(|n| self[n].height).unwrap_or(0)
    }

    /// Recomputes the cached height of `id` from its children's cached heights.
    #[inline]
    pub(crate) fn update_height(&mut self, id: NodeId) {
        let left = self.height_of(self[id].left());
        let right = self.height_of(self[id].right());
        self[id].height = cmp::max(left, right) + 1;
    }

    /// `height(right) - height(left)`.
    #[inline]
    pub(crate) fn balance(&self, id: NodeId) -> i8 {
        let left = self.height_of(self[id].left()) as i8;
        let right = self.height_of(self[id].right()) as i8;
        right - left
    }

    #[inline]
    pub(crate) fn is_balanced(&self, id: NodeId) -> bool {
        (-1..=1).contains(&self.balance(id))
    }

    /// Rebinds `node`'s parent link, if `node` is present.
    #[inline]
    pub(crate) fn maybe_set_parent(&mut self, node: Option<NodeId>, parent: Option<NodeId>) {
        if let Some(node) = node {
            self[node].set_parent(parent);
        }
    }

    /// Returns which child of `parent` `child` is.
    #[inline]
    pub(crate) fn which_child(&self, parent: NodeId, child: NodeId) -> Dir {
        if self[parent].left() == Some(child) {
            Dir::Left
        } else {
            debug_assert_eq!(self[parent].right(), Some(child));
            Dir::Right
        }
    }
}

impl<K> Index<NodeId> for NodePool<K> {
    type Output = Node<K>;

    #[inline]
    fn index(&self, id: NodeId) -> &Node<K> {
        self.slots[id.0]
            .as_ref()
            .expect("node id must refer to a live node")
    }
}

impl<K> IndexMut<NodeId> for NodePool<K> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node<K> {
        self.slots[id.0]
            .as_mut()
            .expect("node id must refer to a live node")
    }
}

/// A shared view of one node of an [`AvlTree`](crate::AvlTree).
pub struct NodeRef<'tree, K> {
    nodes: &'tree NodePool<K>,
    id: NodeId,
}

impl<'tree, K> NodeRef<'tree, K> {
    pub(crate) fn new(nodes: &'tree NodePool<K>, id: NodeId) -> Self {
        NodeRef { nodes, id }
    }

    #[inline]
    fn node(&self) -> &'tree Node<K> {
        &self.nodes[self.id]
    }

    fn link(&self, link: Option<NodeId>) -> Option<NodeRef<'tree, K>> {
        link.map(|id| NodeRef::new(self.nodes, id))
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn key(&self) -> &'tree K {
        &self.node().key
    }

    /// Returns the height of the subtree rooted at this node. A leaf has height 1.
    pub fn height(&self) -> usize {
        self.node().height() as usize
    }

    /// Returns the height of the right subtree minus the height of the left subtree.
    pub fn balance(&self) -> i8 {
        self.nodes.balance(self.id)
    }

    pub fn is_balanced(&self) -> bool {
        self.nodes.is_balanced(self.id)
    }

    pub fn is_leaf(&self) -> bool {
        self.node().is_leaf()
    }

    pub fn left(&self) -> Option<NodeRef<'tree, K>> {
        self.link(self.node().left())
    }

    pub fn right(&self) -> Option<NodeRef<'tree, K>> {
        self.link(self.node().right())
    }

    pub fn parent(&self) -> Option<NodeRef<'tree, K>> {
        self.link(self.node().parent())
    }
}

impl<K> Clone for NodeRef<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for NodeRef<'_, K> {}

impl<K: fmt::Debug> fmt::Debug for NodeRef<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", self.key())
            .field("height", &self.height())
            .finish()
    }
}
