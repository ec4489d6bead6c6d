use std::fmt;

use crate::arena::{Arena, NodeId};
use crate::Weight;

/// A node as stored in the arena. Children are owned through the parent's `left`/`right` slots;
/// `parent` is a back-reference that is only ever used to re-link subtrees.
#[derive(Debug, Clone)]
pub(crate) struct Node<V> {
    pub(crate) weight: Weight,
    pub(crate) value: V,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    pub(crate) parent: Option<NodeId>,
}

impl<V> Node<V> {
    pub(crate) fn new(weight: Weight, value: V) -> Self {
        Self {
            weight,
            value,
            left: None,
            right: None,
            parent: None,
        }
    }
}

/// A read-only view of one node of a [`Tree`](crate::Tree).
///
/// The view borrows the tree, so the tree can't change while it's held. Use [`NodeRef::id`] to
/// keep hold of the node across mutations.
pub struct NodeRef<'a, V> {
    nodes: &'a Arena<Node<V>>,
    id: NodeId,
    node: &'a Node<V>,
}

impl<'a, V> Clone for NodeRef<'a, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, V> Copy for NodeRef<'a, V> {}

impl<'a, V> fmt::Debug for NodeRef<'a, V>
where
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("weight", &self.weight())
            .field("value", self.value())
            .field("left", &self.left())
            .field("right", &self.right())
            .finish()
    }
}

impl<'a, V> NodeRef<'a, V> {
    /// `id` must be live in `nodes`.
    pub(crate) fn new(nodes: &'a Arena<Node<V>>, id: NodeId) -> Self {
        Self {
            nodes,
            id,
            node: &nodes[id],
        }
    }

    pub(crate) fn resolve(nodes: &'a Arena<Node<V>>, id: NodeId) -> Option<Self> {
        nodes.get(id).map(|node| Self { nodes, id, node })
    }

    /// The handle of this node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The weight (key) of this node.
    pub fn weight(&self) -> Weight {
        self.node.weight
    }

    /// The value stored with the weight.
    pub fn value(&self) -> &'a V {
        &self.node.value
    }

    /// The left child, whose subtree holds only smaller weights.
    pub fn left(&self) -> Option<Self> {
        self.node.left.map(|id| Self::new(self.nodes, id))
    }

    /// The right child, whose subtree holds only larger weights.
    pub fn right(&self) -> Option<Self> {
        self.node.right.map(|id| Self::new(self.nodes, id))
    }

    /// The parent node, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        self.node.parent.map(|id| Self::new(self.nodes, id))
    }

    /// Returns true if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.node.left.is_none() && self.node.right.is_none()
    }
}
