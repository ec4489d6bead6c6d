use std::iter::FusedIterator;

use crate::arena::{Arena, NodeId};
use crate::node::Node;
use crate::Weight;

/// Ascending iterator over the `(weight, value)` pairs of a [`Tree`](crate::Tree).
///
/// Created by [`Tree::iter`](crate::Tree::iter).
pub struct Inorder<'a, V> {
    nodes: &'a Arena<Node<V>>,
    stack: Vec<NodeId>,
    remaining: usize,
}

// See: https://www.geeksforgeeks.org/inorder-tree-traversal-without-recursion/
impl<'a, V> Inorder<'a, V> {
    pub(crate) fn new(nodes: &'a Arena<Node<V>>, root: Option<NodeId>) -> Self {
        let mut iter = Self {
            nodes,
            stack: Vec::new(),
            remaining: nodes.len(),
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut current: Option<NodeId>) {
        while let Some(id) = current {
            self.stack.push(id);
            current = self.nodes[id].left;
        }
    }
}

impl<'a, V> Iterator for Inorder<'a, V> {
    type Item = (Weight, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let nodes = self.nodes;
        let node = &nodes[id];
        self.push_left_spine(node.right);
        self.remaining -= 1;

        Some((node.weight, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, V> ExactSizeIterator for Inorder<'a, V> {}

impl<'a, V> FusedIterator for Inorder<'a, V> {}
