use thiserror::Error;

use crate::arena::NodeId;

/// Errors returned by [`Tree`](crate::Tree) operations that take a node handle or that are not
/// supported.
///
/// Absence is never an error: lookups return `Option` and deleting a weight that isn't in the
/// tree returns `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The handle doesn't refer to a live node of this tree. The node was deleted or the handle
    /// came from another tree.
    #[error("node {0} is not live in this tree")]
    StaleNode(NodeId),
    /// Manual rebalancing was requested but the tree has no rebalancing algorithm.
    #[error("manual rebalancing is not implemented")]
    BalanceUnimplemented,
}
