//! Error types for structural tree operations

use crate::tree::NodeId;
use std::fmt;

/// Errors signalled when a tree mutation is asked to do something impossible.
///
/// These are programmer errors: the caller's logic is wrong and retrying the
/// same call will fail the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The node given as anchor or target is not a direct child of the receiver
    NotAChild { parent: NodeId, node: NodeId },
    /// Inserting the node would make it its own ancestor
    Cycle { parent: NodeId, node: NodeId },
    /// The id does not belong to this tree
    UnknownNode(NodeId),
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::NotAChild { parent, node } => {
                write!(f, "Node {node} is not a child of node {parent}")
            }
            TreeError::Cycle { parent, node } => {
                write!(f, "Inserting node {node} under node {parent} would create a cycle")
            }
            TreeError::UnknownNode(node) => write!(f, "Node {node} does not belong to this tree"),
        }
    }
}

impl std::error::Error for TreeError {}
