//! Arena-backed document tree.
//!
//! Nodes live in a single arena owned by [`DocumentTree`] and refer to each
//! other through [`NodeId`] handles: parent, first/last child and
//! previous/next sibling. Links are only ever changed through the mutation
//! methods below, which keep them consistent:
//!
//! - a node with a parent appears exactly once among that parent's children;
//! - `next_sibling(a) == Some(b)` exactly when `previous_sibling(b) == Some(a)`;
//! - `first_child` has no previous sibling and `last_child` has no next one;
//! - a node is never its own ancestor.
//!
//! Removed nodes stay in the arena, detached. They can be reinserted anywhere.
//!
//! Axis queries live in [`axes`], subtree cloning and comparison in [`clone`].

pub mod axes;
pub mod clone;

pub use axes::{AnyNode, Axis, NodeMatcher, ParameterMatcher, TypeMatcher};
pub use clone::{CloneFilter, KeepAll, UnwrapTypes};

use crate::error::TreeError;
use crate::ir::nodes::NodeKind;
use crate::ir::parameters::Parameters;
use std::fmt;

/// Handle to a node stored in a [`DocumentTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }

    /// The position of the node in its arena.
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node's payload and its links to the surrounding nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    pub kind: NodeKind,
    pub params: Parameters,
    parent: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
    prev_sibling: Option<NodeId>,
    next_sibling: Option<NodeId>,
}

impl NodeData {
    fn new(kind: NodeKind, params: Parameters) -> Self {
        Self {
            kind,
            params,
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn first_child(&self) -> Option<NodeId> {
        self.first_child
    }

    pub fn last_child(&self) -> Option<NodeId> {
        self.last_child
    }

    pub fn previous_sibling(&self) -> Option<NodeId> {
        self.prev_sibling
    }

    pub fn next_sibling(&self) -> Option<NodeId> {
        self.next_sibling
    }
}

#[derive(Debug, Clone)]
pub struct DocumentTree {
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl Default for DocumentTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentTree {
    /// A tree holding a single, empty `Document` root.
    pub fn new() -> Self {
        Self::with_root(NodeKind::Document, Parameters::new())
    }

    pub fn with_root(kind: NodeKind, params: Parameters) -> Self {
        Self {
            nodes: vec![NodeData::new(kind, params)],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes in the arena, detached ones included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.index())
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.node(id).map(|data| &data.kind)
    }

    pub fn set_kind(&mut self, id: NodeId, kind: NodeKind) -> Result<(), TreeError> {
        let data = self
            .nodes
            .get_mut(id.index())
            .ok_or(TreeError::UnknownNode(id))?;
        data.kind = kind;
        Ok(())
    }

    pub fn params(&self, id: NodeId) -> Option<&Parameters> {
        self.node(id).map(|data| &data.params)
    }

    pub fn params_mut(&mut self, id: NodeId) -> Option<&mut Parameters> {
        self.nodes.get_mut(id.index()).map(|data| &mut data.params)
    }

    /// Allocates a detached node without parameters.
    pub fn create_node(&mut self, kind: NodeKind) -> NodeId {
        self.create_node_with(kind, Parameters::new())
    }

    /// Allocates a detached node.
    pub fn create_node_with(&mut self, kind: NodeKind, params: Parameters) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData::new(kind, params));
        id
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(NodeData::parent)
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(NodeData::first_child)
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(NodeData::last_child)
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(NodeData::next_sibling)
    }

    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(NodeData::previous_sibling)
    }

    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.first_child(id),
        }
    }

    pub fn child_count(&self, id: NodeId) -> usize {
        self.children(id).count()
    }

    /// Ancestors of `id`, nearest first, excluding `id` itself.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// True when `candidate` is `node` or one of its ancestors.
    pub fn is_ancestor_or_self(&self, candidate: NodeId, node: NodeId) -> bool {
        candidate == node || self.ancestors(node).any(|ancestor| ancestor == candidate)
    }

    /// Concatenated text of all textual leaves below `id`, in document order.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut text = String::new();
        self.collect_text(id, &mut text);
        text
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        if let Some(t) = self.kind(id).and_then(NodeKind::text) {
            out.push_str(t);
        }
        for child in self.children(id) {
            self.collect_text(child, out);
        }
    }

    // --- Mutation ---

    /// Appends `child` as the last child of `parent`, moving it if attached.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        self.insert_before(parent, child, None)
    }

    /// Inserts `new` before `anchor`, or at the end when `anchor` is `None`.
    ///
    /// `new` is detached from its current parent first. Inserting a node
    /// before itself leaves the tree unchanged.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        new: NodeId,
        anchor: Option<NodeId>,
    ) -> Result<(), TreeError> {
        self.check_insert(parent, new, anchor)?;
        if anchor == Some(new) {
            return Ok(());
        }
        self.detach(new);
        let (prev, next) = match anchor {
            Some(anchor) => (self.nodes[anchor.index()].prev_sibling, Some(anchor)),
            None => (self.nodes[parent.index()].last_child, None),
        };
        self.link(parent, new, prev, next);
        Ok(())
    }

    /// Inserts `new` after `anchor`, or at the start when `anchor` is `None`.
    pub fn insert_after(
        &mut self,
        parent: NodeId,
        new: NodeId,
        anchor: Option<NodeId>,
    ) -> Result<(), TreeError> {
        self.check_insert(parent, new, anchor)?;
        if anchor == Some(new) {
            return Ok(());
        }
        self.detach(new);
        let (prev, next) = match anchor {
            Some(anchor) => (Some(anchor), self.nodes[anchor.index()].next_sibling),
            None => (None, self.nodes[parent.index()].first_child),
        };
        self.link(parent, new, prev, next);
        Ok(())
    }

    /// Puts `new_nodes`, in order, where `old` was, and detaches `old`.
    ///
    /// Every argument is validated before anything changes. An empty slice
    /// simply removes `old`; `old` may appear among the new nodes.
    pub fn replace(
        &mut self,
        parent: NodeId,
        new_nodes: &[NodeId],
        old: NodeId,
    ) -> Result<(), TreeError> {
        self.check(parent)?;
        self.check(old)?;
        if self.parent(old) != Some(parent) {
            return Err(TreeError::NotAChild { parent, node: old });
        }
        for &node in new_nodes {
            self.check(node)?;
            if self.is_ancestor_or_self(node, parent) {
                return Err(TreeError::Cycle { parent, node });
            }
        }

        // Splice in front of the first following sibling that stays put.
        let mut next = self.next_sibling(old);
        while let Some(candidate) = next {
            if !new_nodes.contains(&candidate) {
                break;
            }
            next = self.next_sibling(candidate);
        }

        self.detach(old);
        for &node in new_nodes {
            self.detach(node);
            let prev = match next {
                Some(next) => self.nodes[next.index()].prev_sibling,
                None => self.nodes[parent.index()].last_child,
            };
            self.link(parent, node, prev, next);
        }
        Ok(())
    }

    /// Detaches `child` if it is a child of `parent`; returns whether it was.
    pub fn remove(&mut self, parent: NodeId, child: NodeId) -> bool {
        if self.parent(child) != Some(parent) {
            return false;
        }
        self.detach(child);
        true
    }

    /// Unlinks `id` from its parent and siblings. Its own children stay attached.
    pub fn detach(&mut self, id: NodeId) {
        let Some(data) = self.node(id) else {
            return;
        };
        let (parent, prev, next) = (data.parent, data.prev_sibling, data.next_sibling);
        let Some(parent) = parent else {
            return;
        };

        match prev {
            Some(prev) => self.nodes[prev.index()].next_sibling = next,
            None => self.nodes[parent.index()].first_child = next,
        }
        match next {
            Some(next) => self.nodes[next.index()].prev_sibling = prev,
            None => self.nodes[parent.index()].last_child = prev,
        }

        let data = &mut self.nodes[id.index()];
        data.parent = None;
        data.prev_sibling = None;
        data.next_sibling = None;
    }

    fn check(&self, id: NodeId) -> Result<(), TreeError> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(TreeError::UnknownNode(id))
        }
    }

    fn check_insert(
        &self,
        parent: NodeId,
        new: NodeId,
        anchor: Option<NodeId>,
    ) -> Result<(), TreeError> {
        self.check(parent)?;
        self.check(new)?;
        if let Some(anchor) = anchor {
            self.check(anchor)?;
            if self.parent(anchor) != Some(parent) {
                return Err(TreeError::NotAChild {
                    parent,
                    node: anchor,
                });
            }
        }
        if self.is_ancestor_or_self(new, parent) {
            return Err(TreeError::Cycle { parent, node: new });
        }
        Ok(())
    }

    /// Links a detached `node` under `parent` between `prev` and `next`.
    fn link(&mut self, parent: NodeId, node: NodeId, prev: Option<NodeId>, next: Option<NodeId>) {
        {
            let data = &mut self.nodes[node.index()];
            data.parent = Some(parent);
            data.prev_sibling = prev;
            data.next_sibling = next;
        }
        match prev {
            Some(prev) => self.nodes[prev.index()].next_sibling = Some(node),
            None => self.nodes[parent.index()].first_child = Some(node),
        }
        match next {
            Some(next) => self.nodes[next.index()].prev_sibling = Some(node),
            None => self.nodes[parent.index()].last_child = Some(node),
        }
    }
}

/// Iterator over the children of a node, first to last.
pub struct Children<'a> {
    tree: &'a DocumentTree,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.next_sibling(current);
        Some(current)
    }
}

/// Iterator over the ancestors of a node, nearest first.
pub struct Ancestors<'a> {
    tree: &'a DocumentTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}
