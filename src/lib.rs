//! This crate exposes a Binary Search Tree (BST) keyed by an integer weight, mostly for
//! educational purposes.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. Every `Node` of the [`Tree`] stores a
//! weight (its key) and a value, and may have a left and a right child. The most
//! important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    weight less than its own weight.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    weight greater than its own weight.
//!
//! [`Tree::is_balanced`] checks exactly these two invariants. Despite the name it does not
//! check the height of the tree, and the tree never rebalances itself: [`Tree::balance`]
//! always returns [`TreeError::BalanceUnimplemented`].
//!
//! ## Nodes and handles
//!
//! Nodes live in an arena owned by the tree. Each node knows its parent, which is what
//! lets [`Tree::delete_node`] splice a child into the place of its deleted parent. Operations
//! that start from an arbitrary subtree take a [`NodeId`] handle, and reject handles to
//! nodes that have since been deleted with [`TreeError::StaleNode`].
//!
//! # Examples
//!
//! ```
//! use weighted_bst::Tree;
//!
//! let mut tree = Tree::new(5, 5);
//! for x in [1, 2, 3, 4, 6, 7] {
//!     tree.insert(x, x);
//! }
//!
//! let mut weights = Vec::new();
//! tree.traverse(|weight| weights.push(weight));
//! assert_eq!(weights, [1, 2, 3, 4, 5, 6, 7]);
//!
//! assert_eq!(tree.find_minimum().unwrap().weight(), 1);
//! assert_eq!(tree.find_maximum().unwrap().weight(), 7);
//!
//! // The root has two children so its in-order successor takes its place.
//! tree.delete_node(5);
//! assert_eq!(tree.get_root().unwrap().weight(), 6);
//! assert!(tree.is_balanced());
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod arena;
mod error;
mod inorder;
mod node;
pub mod tree;

pub use arena::NodeId;
pub use error::TreeError;
pub use inorder::Inorder;
pub use node::NodeRef;
pub use tree::Tree;

/// The integer key that orders the nodes of a [`Tree`].
pub type Weight = i32;
