//! A mutable BST whose nodes live in an arena and keep a handle to their parent. Deletion
//! re-links subtrees through that parent handle instead of rebuilding the path from the root.
//!
//! # Examples
//!
//! ```
//! use weighted_bst::Tree;
//!
//! let mut tree = Tree::new(5, "five");
//!
//! tree.insert(1, "one");
//! assert_eq!(tree.find(1), Some(&"one"));
//!
//! // Inserting a new value for the same weight overwrites the value.
//! tree.insert(1, "uno");
//! assert_eq!(tree.find(1), Some(&"uno"));
//!
//! // Deleting a node returns its value.
//! assert_eq!(tree.delete_node(1), Some("uno"));
//! assert_eq!(tree.find(1), None);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use crate::arena::{Arena, NodeId};
use crate::error::TreeError;
use crate::inorder::Inorder;
use crate::node::{Node, NodeRef};
use crate::Weight;

/// A binary search tree keyed by an integer weight. This can be used for inserting, finding, and
/// deleting weights and their values.
///
/// The tree does not balance itself. Its shape depends only on the order of insertions and
/// deletions.
#[derive(Clone)]
pub struct Tree<V> {
    nodes: Arena<Node<V>>,
    root: Option<NodeId>,
}

impl<V> fmt::Debug for Tree<V>
where
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree").field("root", &self.get_root()).finish()
    }
}

impl<'a, V> IntoIterator for &'a Tree<V> {
    type Item = (Weight, &'a V);
    type IntoIter = Inorder<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V> Tree<V> {
    /// Creates a tree holding a single root node.
    ///
    /// # Examples
    ///
    /// ```
    /// use weighted_bst::Tree;
    ///
    /// let tree = Tree::new(5, 'a');
    /// let root = tree.get_root().unwrap();
    ///
    /// assert_eq!(root.weight(), 5);
    /// assert_eq!(root.value(), &'a');
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn new(weight: Weight, value: V) -> Self {
        let mut nodes = Arena::new();
        let root = nodes.alloc(Node::new(weight, value));
        Self {
            nodes,
            root: Some(root),
        }
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true once every node has been deleted.
    pub fn is_empty(&self) -> bool {
        debug_assert_eq!(self.nodes.is_empty(), self.root.is_none());
        self.root.is_none()
    }

    /// Number of levels in the tree. A lone root has a height of 1 and an empty tree 0.
    pub fn height(&self) -> usize {
        self.height_at(self.root)
    }

    fn height_at(&self, slot: Option<NodeId>) -> usize {
        match slot {
            None => 0,
            Some(id) => {
                let node = &self.nodes[id];
                self.height_at(node.left).max(self.height_at(node.right)) + 1
            }
        }
    }

    /// Returns the root node, or `None` if every node has been deleted.
    ///
    /// The root can change when the current root is deleted.
    pub fn get_root(&self) -> Option<NodeRef<'_, V>> {
        self.root.map(|id| NodeRef::new(&self.nodes, id))
    }

    /// Resolves a node handle, returning `None` if the node has since been deleted.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, V>> {
        NodeRef::resolve(&self.nodes, id)
    }

    fn live(&self, id: NodeId) -> Result<NodeRef<'_, V>, TreeError> {
        self.node(id).ok_or(TreeError::StaleNode(id))
    }

    /// Finds the value stored with the given weight. If no node has the weight, `None` is
    /// returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use weighted_bst::Tree;
    ///
    /// let mut tree = Tree::new(2, "two");
    /// tree.insert(1, "one");
    ///
    /// assert_eq!(tree.find(1), Some(&"one"));
    /// assert_eq!(tree.find(42), None);
    /// ```
    pub fn find(&self, weight: Weight) -> Option<&V> {
        self.locate(weight).map(|id| &self.nodes[id].value)
    }

    /// Like [`Tree::find`] but allows the value to be modified in place.
    pub fn find_mut(&mut self, weight: Weight) -> Option<&mut V> {
        let id = self.locate(weight)?;
        Some(&mut self.nodes[id].value)
    }

    /// Like [`Tree::find`] but returns the whole node.
    pub fn find_node(&self, weight: Weight) -> Option<NodeRef<'_, V>> {
        self.locate(weight).map(|id| NodeRef::new(&self.nodes, id))
    }

    /// Returns true if a node has the given weight.
    pub fn contains(&self, weight: Weight) -> bool {
        self.locate(weight).is_some()
    }

    fn locate(&self, weight: Weight) -> Option<NodeId> {
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.nodes[id];
            match weight.cmp(&node.weight) {
                Ordering::Less => current = node.left,
                Ordering::Equal => return Some(id),
                Ordering::Greater => current = node.right,
            }
        }
        None
    }

    /// Searches for a node holding `value`, walking down from `from`.
    ///
    /// The walk compares values, not weights, so it only finds its target when values are
    /// ordered the same way as their weights. A value smaller than the value at the minimum
    /// weight, or larger than the value at the maximum weight, is reported as not found without
    /// walking.
    ///
    /// # Errors
    ///
    /// [`TreeError::StaleNode`] if `from` is not a live node of this tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use weighted_bst::Tree;
    ///
    /// let mut tree = Tree::new(5, 50);
    /// tree.insert(1, 10);
    /// tree.insert(7, 70);
    /// let root = tree.get_root().unwrap().id();
    ///
    /// assert_eq!(tree.search(root, &70).unwrap().map(|n| n.weight()), Some(7));
    /// assert!(tree.search(root, &60).unwrap().is_none());
    /// // Out of the [10, 70] range.
    /// assert!(tree.search(root, &99).unwrap().is_none());
    /// ```
    pub fn search(&self, from: NodeId, value: &V) -> Result<Option<NodeRef<'_, V>>, TreeError>
    where
        V: Ord,
    {
        let start = self.live(from)?;

        let in_range = match (self.find_minimum(), self.find_maximum()) {
            (Some(min), Some(max)) => value >= min.value() && value <= max.value(),
            _ => false,
        };
        if !in_range {
            return Ok(None);
        }

        let mut current = Some(start);
        while let Some(node) = current {
            match value.cmp(node.value()) {
                Ordering::Less => current = node.left(),
                Ordering::Equal => return Ok(Some(node)),
                Ordering::Greater => current = node.right(),
            }
        }
        Ok(None)
    }

    /// Inserts the given value into the tree under the given weight. Inserting a new value for
    /// an existing weight overwrites its value and returns the old one.
    ///
    /// # Examples
    ///
    /// ```
    /// use weighted_bst::Tree;
    ///
    /// let mut tree = Tree::new(5, 'a');
    ///
    /// assert_eq!(tree.insert(3, 'b'), None);
    /// assert_eq!(tree.insert(3, 'c'), Some('b'));
    /// assert_eq!(tree.find(3), Some(&'c'));
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn insert(&mut self, weight: Weight, value: V) -> Option<V> {
        let mut replaced = None;
        let root = self.insert_at(self.root, weight, value, &mut replaced);
        self.root = Some(root);
        replaced
    }

    /// Inserts into the subtree at `slot` and returns the root of that subtree, which is a new
    /// node when `slot` is empty. The caller re-links the returned node under itself.
    fn insert_at(
        &mut self,
        slot: Option<NodeId>,
        weight: Weight,
        value: V,
        replaced: &mut Option<V>,
    ) -> NodeId {
        let Some(id) = slot else {
            tracing::trace!(weight, "inserted node");
            return self.nodes.alloc(Node::new(weight, value));
        };

        let node = &mut self.nodes[id];
        match weight.cmp(&node.weight) {
            Ordering::Equal => {
                tracing::trace!(weight, "replaced value");
                *replaced = Some(mem::replace(&mut node.value, value));
            }
            Ordering::Less => {
                let left = node.left;
                let left = self.insert_at(left, weight, value, replaced);
                self.nodes[id].left = Some(left);
                self.nodes[left].parent = Some(id);
            }
            Ordering::Greater => {
                let right = node.right;
                let right = self.insert_at(right, weight, value, replaced);
                self.nodes[id].right = Some(right);
                self.nodes[right].parent = Some(id);
            }
        }

        if cfg!(debug_assertions) {
            let node = &self.nodes[id];
            if let Some(left) = node.left {
                assert!(self.nodes[left].weight < node.weight);
            }
            if let Some(right) = node.right {
                assert!(self.nodes[right].weight > node.weight);
            }
        }
        id
    }

    /// Deletes the node with the given weight and returns its value. If the tree does not
    /// contain a node with the weight, nothing happens and `None` is returned.
    ///
    /// A node with two children takes over the weight and value of its in-order successor,
    /// which is removed instead. Deleting the root with fewer than two children promotes its
    /// child (if any) to be the new root.
    ///
    /// # Examples
    ///
    /// ```
    /// use weighted_bst::Tree;
    ///
    /// let mut tree = Tree::new(5, 5);
    /// for x in [1, 2, 3, 4, 6, 7] {
    ///     tree.insert(x, x);
    /// }
    ///
    /// assert_eq!(tree.delete_node(5), Some(5));
    /// assert_eq!(tree.get_root().unwrap().weight(), 6);
    /// assert_eq!(tree.delete_node(5), None);
    /// assert_eq!(tree.len(), 6);
    /// ```
    pub fn delete_node(&mut self, weight: Weight) -> Option<V> {
        match self.delete_at(self.root, weight) {
            Some((_, value)) => Some(value),
            None => {
                tracing::debug!(weight, "delete of absent weight ignored");
                None
            }
        }
    }

    fn delete_at(&mut self, slot: Option<NodeId>, weight: Weight) -> Option<(Weight, V)> {
        let id = slot?;
        let Node { left, right, .. } = self.nodes[id];
        match weight.cmp(&self.nodes[id].weight) {
            Ordering::Less => self.delete_at(left, weight),
            Ordering::Greater => self.delete_at(right, weight),
            Ordering::Equal => Some(self.remove_entry(id)),
        }
    }

    /// Unlinks the node `id` (or its successor, see `delete_node`) and returns the weight and
    /// value that were stored at `id`.
    fn remove_entry(&mut self, id: NodeId) -> (Weight, V) {
        let node = &self.nodes[id];
        match (node.left, node.right) {
            (Some(_), Some(right)) => {
                let successor = self.subtree_minimum(right);
                // The successor has no left child so this recursion splices it out directly.
                let (weight, value) = self.remove_entry(successor);
                let node = &mut self.nodes[id];
                (
                    mem::replace(&mut node.weight, weight),
                    mem::replace(&mut node.value, value),
                )
            }
            (Some(child), None) | (None, Some(child)) => {
                self.replace_node_in_parent(id, Some(child));
                self.free(id)
            }
            (None, None) => {
                self.replace_node_in_parent(id, None);
                self.free(id)
            }
        }
    }

    fn free(&mut self, id: NodeId) -> (Weight, V) {
        let node = self
            .nodes
            .remove(id)
            .expect("Unlinked node was reached through the tree so it is live");
        tracing::trace!(weight = node.weight, "removed node");
        (node.weight, node.value)
    }

    /// Points whichever slot holds `current` (its parent's left or right child, or the tree's
    /// root) at `new`.
    fn replace_node_in_parent(&mut self, current: NodeId, new: Option<NodeId>) {
        let parent = self.nodes[current].parent;
        match parent {
            Some(parent) => {
                let parent = &mut self.nodes[parent];
                if parent.left == Some(current) {
                    parent.left = new;
                } else {
                    debug_assert_eq!(parent.right, Some(current));
                    parent.right = new;
                }
            }
            None => {
                debug_assert_eq!(self.root, Some(current));
                self.root = new;
            }
        }
        if let Some(new) = new {
            self.nodes[new].parent = parent;
        }
    }

    /// Returns the node with the smallest weight, or `None` for an empty tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use weighted_bst::Tree;
    ///
    /// let mut tree = Tree::new(5, ());
    /// tree.insert(3, ());
    /// tree.insert(8, ());
    ///
    /// assert_eq!(tree.find_minimum().map(|n| n.weight()), Some(3));
    /// assert_eq!(tree.find_maximum().map(|n| n.weight()), Some(8));
    /// ```
    pub fn find_minimum(&self) -> Option<NodeRef<'_, V>> {
        self.root
            .map(|root| NodeRef::new(&self.nodes, self.subtree_minimum(root)))
    }

    /// Returns the node with the largest weight, or `None` for an empty tree.
    pub fn find_maximum(&self) -> Option<NodeRef<'_, V>> {
        self.root
            .map(|root| NodeRef::new(&self.nodes, self.subtree_maximum(root)))
    }

    /// Returns the node with the smallest weight in the subtree rooted at `from`.
    ///
    /// # Errors
    ///
    /// [`TreeError::StaleNode`] if `from` is not a live node of this tree.
    pub fn find_minimum_from(&self, from: NodeId) -> Result<NodeRef<'_, V>, TreeError> {
        self.live(from)?;
        Ok(NodeRef::new(&self.nodes, self.subtree_minimum(from)))
    }

    /// Returns the node with the largest weight in the subtree rooted at `from`.
    ///
    /// # Errors
    ///
    /// [`TreeError::StaleNode`] if `from` is not a live node of this tree.
    pub fn find_maximum_from(&self, from: NodeId) -> Result<NodeRef<'_, V>, TreeError> {
        self.live(from)?;
        Ok(NodeRef::new(&self.nodes, self.subtree_maximum(from)))
    }

    fn subtree_minimum(&self, mut current: NodeId) -> NodeId {
        while let Some(left) = self.nodes[current].left {
            current = left;
        }
        current
    }

    fn subtree_maximum(&self, mut current: NodeId) -> NodeId {
        while let Some(right) = self.nodes[current].right {
            current = right;
        }
        current
    }

    /// Calls `visitor` with every weight in the tree in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use weighted_bst::Tree;
    ///
    /// let mut tree = Tree::new(5, 5);
    /// for x in [1, 2, 3, 4, 6, 7] {
    ///     tree.insert(x, x);
    /// }
    ///
    /// let mut weights = Vec::new();
    /// tree.traverse(|weight| weights.push(weight));
    /// assert_eq!(weights, [1, 2, 3, 4, 5, 6, 7]);
    /// ```
    pub fn traverse<F>(&self, mut visitor: F)
    where
        F: FnMut(Weight),
    {
        self.traverse_at(self.root, &mut visitor);
    }

    /// Like [`Tree::traverse`] but only visits the subtree rooted at `from`.
    ///
    /// # Errors
    ///
    /// [`TreeError::StaleNode`] if `from` is not a live node of this tree.
    pub fn traverse_from<F>(&self, from: NodeId, mut visitor: F) -> Result<(), TreeError>
    where
        F: FnMut(Weight),
    {
        self.live(from)?;
        self.traverse_at(Some(from), &mut visitor);
        Ok(())
    }

    fn traverse_at<F>(&self, slot: Option<NodeId>, visitor: &mut F)
    where
        F: FnMut(Weight),
    {
        let Some(id) = slot else {
            return;
        };
        let node = &self.nodes[id];
        self.traverse_at(node.left, visitor);
        visitor(node.weight);
        self.traverse_at(node.right, visitor);
    }

    /// Returns an iterator over the weights and values of the tree in ascending weight order.
    pub fn iter(&self) -> Inorder<'_, V> {
        Inorder::new(&self.nodes, self.root)
    }

    /// Checks the search tree ordering: every weight in a node's left subtree is smaller than
    /// its own and every weight in its right subtree is larger.
    ///
    /// Note this says nothing about the tree's height. A tree built from sorted insertions is a
    /// single chain and still passes.
    pub fn is_balanced(&self) -> bool {
        self.is_ordered(self.root, Weight::MIN.into(), Weight::MAX.into())
    }

    /// Checks the search tree ordering of the subtree rooted at `from`, additionally requiring
    /// every weight in it to lie in `min_weight..=max_weight`.
    ///
    /// # Errors
    ///
    /// [`TreeError::StaleNode`] if `from` is not a live node of this tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use weighted_bst::Tree;
    ///
    /// let mut tree = Tree::new(5, ());
    /// tree.insert(3, ());
    /// let root = tree.get_root().unwrap().id();
    ///
    /// assert_eq!(tree.is_balanced_within(root, 0, 10), Ok(true));
    /// assert_eq!(tree.is_balanced_within(root, 4, 10), Ok(false));
    /// ```
    pub fn is_balanced_within(
        &self,
        from: NodeId,
        min_weight: Weight,
        max_weight: Weight,
    ) -> Result<bool, TreeError> {
        self.live(from)?;
        Ok(self.is_ordered(Some(from), min_weight.into(), max_weight.into()))
    }

    // Bounds are widened to `i64` so `weight - 1` and `weight + 1` can't overflow.
    fn is_ordered(&self, slot: Option<NodeId>, min: i64, max: i64) -> bool {
        let Some(id) = slot else {
            return true;
        };
        let node = &self.nodes[id];
        let weight = i64::from(node.weight);
        if weight < min || weight > max {
            return false;
        }
        self.is_ordered(node.left, min, weight - 1) && self.is_ordered(node.right, weight + 1, max)
    }

    /// Manual rebalancing is not implemented. This always fails and leaves the tree as it is.
    ///
    /// # Errors
    ///
    /// Always [`TreeError::BalanceUnimplemented`].
    pub fn balance(&mut self) -> Result<NodeId, TreeError> {
        tracing::warn!(len = self.len(), "balance requested but rebalancing is not implemented");
        Err(TreeError::BalanceUnimplemented)
    }
}
