//! Deep copies, filtered copies and structural comparison of subtrees.

use super::{DocumentTree, NodeId};
use crate::error::TreeError;
use crate::ir::nodes::NodeType;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Decides what each copied node turns into during a filtered clone.
///
/// The filter receives the fully copied (already filtered) subtree of a child
/// and returns the nodes to attach in its place. Returning the node itself
/// keeps it; returning other nodes substitutes them; returning nothing
/// unwraps it, so its own children take its place.
pub trait CloneFilter {
    fn filter(&mut self, tree: &mut DocumentTree, node: NodeId) -> Vec<NodeId>;
}

impl<F> CloneFilter for F
where
    F: FnMut(&mut DocumentTree, NodeId) -> Vec<NodeId>,
{
    fn filter(&mut self, tree: &mut DocumentTree, node: NodeId) -> Vec<NodeId> {
        self(tree, node)
    }
}

/// Keeps every node.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepAll;

impl CloneFilter for KeepAll {
    fn filter(&mut self, _tree: &mut DocumentTree, node: NodeId) -> Vec<NodeId> {
        vec![node]
    }
}

/// Unwraps nodes of the listed types, keeping their content.
#[derive(Debug, Clone, Default)]
pub struct UnwrapTypes(pub Vec<NodeType>);

impl CloneFilter for UnwrapTypes {
    fn filter(&mut self, tree: &mut DocumentTree, node: NodeId) -> Vec<NodeId> {
        match tree.kind(node) {
            Some(kind) if self.0.contains(&kind.node_type()) => Vec::new(),
            _ => vec![node],
        }
    }
}

impl DocumentTree {
    /// Deep copy of `node`, returned detached.
    pub fn clone_subtree(&mut self, node: NodeId) -> Result<NodeId, TreeError> {
        self.clone_filtered(node, &mut KeepAll)
    }

    /// Deep copy of `node` with `filter` applied to every copied descendant.
    ///
    /// The copy of `node` itself is always kept and returned detached.
    pub fn clone_filtered<F: CloneFilter + ?Sized>(
        &mut self,
        node: NodeId,
        filter: &mut F,
    ) -> Result<NodeId, TreeError> {
        let data = self.node(node).ok_or(TreeError::UnknownNode(node))?;
        let (kind, params) = (data.kind.clone(), data.params.clone());
        let copy = self.create_node_with(kind, params);

        let children: Vec<NodeId> = self.children(node).collect();
        for child in children {
            let cloned = self.clone_filtered(child, filter)?;
            let replacement = filter.filter(self, cloned);
            let attached = if replacement.is_empty() {
                self.children(cloned).collect()
            } else {
                replacement
            };
            for id in attached {
                self.append_child(copy, id)?;
            }
        }
        Ok(copy)
    }

    /// True when both subtrees have equal kinds and parameters, node for node.
    pub fn subtree_eq(&self, a: NodeId, other: &DocumentTree, b: NodeId) -> bool {
        let (Some(left), Some(right)) = (self.node(a), other.node(b)) else {
            return false;
        };
        left.kind == right.kind
            && left.params == right.params
            && self.child_count(a) == other.child_count(b)
            && self
                .children(a)
                .zip(other.children(b))
                .all(|(x, y)| self.subtree_eq(x, other, y))
    }

    /// Hash consistent with [`subtree_eq`](Self::subtree_eq).
    pub fn structural_hash(&self, node: NodeId) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash_subtree(node, &mut hasher);
        hasher.finish()
    }

    fn hash_subtree<H: Hasher>(&self, node: NodeId, state: &mut H) {
        let Some(data) = self.node(node) else {
            return;
        };
        data.kind.hash(state);
        data.params.hash(state);
        self.child_count(node).hash(state);
        for child in self.children(node) {
            self.hash_subtree(child, state);
        }
    }
}
