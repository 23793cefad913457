//! Axis-directed node queries.
//!
//! A query starts at a context node, walks one [`Axis`] and keeps the nodes
//! accepted by a [`NodeMatcher`]. Results come back in the axis's natural
//! order: document order for forward axes, nearest-first for the reverse ones
//! (ancestors, preceding siblings, preceding).
//!
//! `Following` and `Preceding` stay on the context node's own sibling chain:
//! following visits each later sibling's subtree in pre-order, preceding
//! visits each earlier sibling's subtree in reverse document order. Neither
//! climbs to the siblings of ancestors.

use super::{DocumentTree, NodeId};
use crate::ir::nodes::NodeType;
use std::ops::ControlFlow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    SelfNode,
    Ancestor,
    AncestorOrSelf,
    Parent,
    Descendant,
    DescendantOrSelf,
    Child,
    FollowingSibling,
    Following,
    PrecedingSibling,
    Preceding,
}

impl Axis {
    pub const ALL: [Axis; 11] = [
        Axis::SelfNode,
        Axis::Ancestor,
        Axis::AncestorOrSelf,
        Axis::Parent,
        Axis::Descendant,
        Axis::DescendantOrSelf,
        Axis::Child,
        Axis::FollowingSibling,
        Axis::Following,
        Axis::PrecedingSibling,
        Axis::Preceding,
    ];
}

/// Predicate deciding which nodes a query keeps.
pub trait NodeMatcher {
    fn matches(&self, tree: &DocumentTree, node: NodeId) -> bool;
}

impl<F> NodeMatcher for F
where
    F: Fn(&DocumentTree, NodeId) -> bool,
{
    fn matches(&self, tree: &DocumentTree, node: NodeId) -> bool {
        self(tree, node)
    }
}

/// Matches every node.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyNode;

impl NodeMatcher for AnyNode {
    fn matches(&self, _tree: &DocumentTree, _node: NodeId) -> bool {
        true
    }
}

/// Matches nodes of one type.
#[derive(Debug, Clone, Copy)]
pub struct TypeMatcher(pub NodeType);

impl NodeMatcher for TypeMatcher {
    fn matches(&self, tree: &DocumentTree, node: NodeId) -> bool {
        tree.kind(node).is_some_and(|kind| kind.node_type() == self.0)
    }
}

/// Matches nodes carrying a parameter, optionally with a given value.
#[derive(Debug, Clone)]
pub struct ParameterMatcher {
    key: String,
    value: Option<String>,
}

impl ParameterMatcher {
    pub fn has(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
        }
    }

    pub fn equals(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }
}

impl NodeMatcher for ParameterMatcher {
    fn matches(&self, tree: &DocumentTree, node: NodeId) -> bool {
        let Some(found) = tree.params(node).and_then(|params| params.get(&self.key)) else {
            return false;
        };
        self.value.as_deref().map_or(true, |expected| expected == found)
    }
}

impl DocumentTree {
    /// All nodes on `axis` from `node` accepted by `matcher`.
    pub fn find<M: NodeMatcher + ?Sized>(
        &self,
        node: NodeId,
        axis: Axis,
        matcher: &M,
    ) -> Vec<NodeId> {
        let mut found = Vec::new();
        let _ = self.walk_axis(node, axis, &mut |candidate| {
            if matcher.matches(self, candidate) {
                found.push(candidate);
            }
            ControlFlow::<()>::Continue(())
        });
        found
    }

    /// The first node on `axis` accepted by `matcher`; the walk stops there.
    pub fn find_first<M: NodeMatcher + ?Sized>(
        &self,
        node: NodeId,
        axis: Axis,
        matcher: &M,
    ) -> Option<NodeId> {
        let result = self.walk_axis(node, axis, &mut |candidate| {
            if matcher.matches(self, candidate) {
                ControlFlow::Break(candidate)
            } else {
                ControlFlow::Continue(())
            }
        });
        match result {
            ControlFlow::Break(found) => Some(found),
            ControlFlow::Continue(()) => None,
        }
    }

    fn walk_axis<B>(
        &self,
        node: NodeId,
        axis: Axis,
        visit: &mut dyn FnMut(NodeId) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        if !self.contains(node) {
            return ControlFlow::Continue(());
        }
        match axis {
            Axis::SelfNode => visit(node),
            Axis::Parent => match self.parent(node) {
                Some(parent) => visit(parent),
                None => ControlFlow::Continue(()),
            },
            Axis::Ancestor => {
                for ancestor in self.ancestors(node) {
                    visit(ancestor)?;
                }
                ControlFlow::Continue(())
            }
            Axis::AncestorOrSelf => {
                visit(node)?;
                self.walk_axis(node, Axis::Ancestor, visit)
            }
            Axis::Child => {
                for child in self.children(node) {
                    visit(child)?;
                }
                ControlFlow::Continue(())
            }
            Axis::Descendant => {
                for child in self.children(node) {
                    self.walk_subtree(child, visit)?;
                }
                ControlFlow::Continue(())
            }
            Axis::DescendantOrSelf => self.walk_subtree(node, visit),
            Axis::FollowingSibling => {
                let mut sibling = self.next_sibling(node);
                while let Some(current) = sibling {
                    visit(current)?;
                    sibling = self.next_sibling(current);
                }
                ControlFlow::Continue(())
            }
            Axis::PrecedingSibling => {
                let mut sibling = self.previous_sibling(node);
                while let Some(current) = sibling {
                    visit(current)?;
                    sibling = self.previous_sibling(current);
                }
                ControlFlow::Continue(())
            }
            Axis::Following => {
                let mut sibling = self.next_sibling(node);
                while let Some(next) = sibling {
                    self.walk_subtree(next, visit)?;
                    sibling = self.next_sibling(next);
                }
                ControlFlow::Continue(())
            }
            Axis::Preceding => {
                let mut sibling = self.previous_sibling(node);
                while let Some(prev) = sibling {
                    self.walk_subtree_reverse(prev, visit)?;
                    sibling = self.previous_sibling(prev);
                }
                ControlFlow::Continue(())
            }
        }
    }

    /// Pre-order walk of `node` and its descendants.
    fn walk_subtree<B>(
        &self,
        node: NodeId,
        visit: &mut dyn FnMut(NodeId) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        visit(node)?;
        for child in self.children(node) {
            self.walk_subtree(child, visit)?;
        }
        ControlFlow::Continue(())
    }

    /// Reverse document order: last descendant first, `node` itself last.
    fn walk_subtree_reverse<B>(
        &self,
        node: NodeId,
        visit: &mut dyn FnMut(NodeId) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        let mut child = self.last_child(node);
        while let Some(current) = child {
            self.walk_subtree_reverse(current, visit)?;
            child = self.previous_sibling(current);
        }
        visit(node)
    }
}
