//! Property tests over random mutation sequences.

use crate::common::assert_sibling_links;
use proptest::prelude::*;
use std::collections::BTreeSet;
use wem_babel::tree::{AnyNode, TypeMatcher};
use wem_babel::{events_to_tree, tree_to_events, Axis, DocumentTree, NodeId, NodeKind, NodeType};

const POOL: usize = 10;

#[derive(Debug, Clone)]
enum Op {
    Append { parent: usize, child: usize },
    InsertBefore { parent: usize, new: usize, anchor: usize },
    InsertAfter { parent: usize, new: usize, anchor: usize },
    Replace { parent: usize, old: usize, new: Vec<usize> },
    Remove { parent: usize, child: usize },
    Detach(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..POOL, 0..POOL).prop_map(|(parent, child)| Op::Append { parent, child }),
        (0..POOL, 0..POOL, 0..6usize)
            .prop_map(|(parent, new, anchor)| Op::InsertBefore { parent, new, anchor }),
        (0..POOL, 0..POOL, 0..6usize)
            .prop_map(|(parent, new, anchor)| Op::InsertAfter { parent, new, anchor }),
        (0..POOL, 0..6usize, prop::collection::vec(0..POOL, 0..3))
            .prop_map(|(parent, old, new)| Op::Replace { parent, old, new }),
        (0..POOL, 0..6usize).prop_map(|(parent, child)| Op::Remove { parent, child }),
        (0..POOL).prop_map(Op::Detach),
    ]
}

/// A document root plus detached containers of a few kinds.
fn pool() -> (DocumentTree, Vec<NodeId>) {
    let mut tree = DocumentTree::new();
    let mut ids = vec![tree.root()];
    let kinds = [
        NodeKind::Paragraph,
        NodeKind::Quotation,
        NodeKind::ListItem,
        NodeKind::Table,
    ];
    for i in 1..POOL {
        ids.push(tree.create_node(kinds[i % kinds.len()].clone()));
    }
    (tree, ids)
}

/// The `pick`-th child of `parent`, or `None` one past the last child.
fn pick_child(tree: &DocumentTree, parent: NodeId, pick: usize) -> Option<NodeId> {
    let children: Vec<NodeId> = tree.children(parent).collect();
    children.get(pick % (children.len() + 1)).copied()
}

fn apply(tree: &mut DocumentTree, ids: &[NodeId], op: &Op) -> bool {
    match op {
        Op::Append { parent, child } => tree.append_child(ids[*parent], ids[*child]).is_ok(),
        Op::InsertBefore { parent, new, anchor } => {
            let anchor = pick_child(tree, ids[*parent], *anchor);
            tree.insert_before(ids[*parent], ids[*new], anchor).is_ok()
        }
        Op::InsertAfter { parent, new, anchor } => {
            let anchor = pick_child(tree, ids[*parent], *anchor);
            tree.insert_after(ids[*parent], ids[*new], anchor).is_ok()
        }
        Op::Replace { parent, old, new } => {
            let old = pick_child(tree, ids[*parent], *old).unwrap_or(ids[*parent]);
            let new: Vec<NodeId> = new.iter().map(|&i| ids[i]).collect();
            tree.replace(ids[*parent], &new, old).is_ok()
        }
        Op::Remove { parent, child } => match pick_child(tree, ids[*parent], *child) {
            Some(child) => tree.remove(ids[*parent], child),
            None => false,
        },
        Op::Detach(node) => {
            tree.detach(ids[*node]);
            true
        }
    }
}

fn links(tree: &DocumentTree, ids: &[NodeId]) -> Vec<Option<wem_babel::tree::NodeData>> {
    ids.iter().map(|&id| tree.node(id).cloned()).collect()
}

proptest! {
    #[test]
    fn sibling_links_survive_any_mutation(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let (mut tree, ids) = pool();
        for op in &ops {
            let before = links(&tree, &ids);
            if !apply(&mut tree, &ids, op) {
                prop_assert_eq!(&before, &links(&tree, &ids), "failed {:?} changed the tree", op);
            }
        }

        for &id in &ids {
            prop_assert!(tree.ancestors(id).take(POOL + 1).count() < POOL, "cycle above {}", id);
            assert_sibling_links(&tree, id);
        }
        let attached: usize = ids.iter().map(|&id| tree.child_count(id)).sum();
        let with_parent = ids.iter().filter(|&&id| tree.parent(id).is_some()).count();
        prop_assert_eq!(attached, with_parent);
    }

    #[test]
    fn clones_and_event_trips_preserve_structure(ops in prop::collection::vec(op_strategy(), 0..30)) {
        let (mut tree, ids) = pool();
        for op in &ops {
            apply(&mut tree, &ids, op);
        }
        let root = tree.root();

        let copy = tree.clone_subtree(root).expect("clone");
        prop_assert!(tree.subtree_eq(root, &tree, copy));
        prop_assert_eq!(tree.structural_hash(root), tree.structural_hash(copy));

        let rebuilt = events_to_tree(&tree_to_events(&tree, root)).expect("rebuild");
        prop_assert!(tree.subtree_eq(root, &rebuilt, rebuilt.root()));
    }

    #[test]
    fn following_sibling_composes_with_adjacency(
        ops in prop::collection::vec(op_strategy(), 0..30),
        origin in 0..POOL,
    ) {
        let (mut tree, ids) = pool();
        for op in &ops {
            apply(&mut tree, &ids, op);
        }
        let origin = ids[origin];
        if let Some(previous) = tree.previous_sibling(origin) {
            let matcher = TypeMatcher(NodeType::Paragraph);
            let mut expected = Vec::new();
            if tree.kind(origin) == Some(&NodeKind::Paragraph) {
                expected.push(origin);
            }
            expected.extend(tree.find(origin, Axis::FollowingSibling, &matcher));
            prop_assert_eq!(tree.find(previous, Axis::FollowingSibling, &matcher), expected);
        }
    }

    #[test]
    fn axes_partition_the_parent_subtree(
        ops in prop::collection::vec(op_strategy(), 0..30),
        origin in 0..POOL,
    ) {
        let (mut tree, ids) = pool();
        for op in &ops {
            apply(&mut tree, &ids, op);
        }
        let origin = ids[origin];
        let Some(parent) = tree.parent(origin) else {
            prop_assert!(tree.find(origin, Axis::Following, &AnyNode).is_empty());
            prop_assert!(tree.find(origin, Axis::Preceding, &AnyNode).is_empty());
            return Ok(());
        };
        let everything: BTreeSet<NodeId> =
            tree.find(parent, Axis::Descendant, &AnyNode).into_iter().collect();

        let mut seen = BTreeSet::new();
        let mut total = 0;
        for axis in [Axis::Descendant, Axis::Following, Axis::Preceding, Axis::SelfNode] {
            let found = tree.find(origin, axis, &AnyNode);
            total += found.len();
            seen.extend(found);
        }
        prop_assert_eq!(total, seen.len(), "axes overlap");
        prop_assert_eq!(seen, everything);
    }

    #[test]
    fn following_is_sibling_subtrees_in_order(
        ops in prop::collection::vec(op_strategy(), 0..30),
        origin in 0..POOL,
    ) {
        let (mut tree, ids) = pool();
        for op in &ops {
            apply(&mut tree, &ids, op);
        }
        let origin = ids[origin];
        let expected: Vec<NodeId> = tree
            .find(origin, Axis::FollowingSibling, &AnyNode)
            .into_iter()
            .flat_map(|sibling| tree.find(sibling, Axis::DescendantOrSelf, &AnyNode))
            .collect();
        prop_assert_eq!(tree.find(origin, Axis::Following, &AnyNode), expected);

        let mut mirrored: Vec<NodeId> = tree
            .find(origin, Axis::PrecedingSibling, &AnyNode)
            .into_iter()
            .rev()
            .flat_map(|sibling| tree.find(sibling, Axis::DescendantOrSelf, &AnyNode))
            .collect();
        mirrored.reverse();
        prop_assert_eq!(tree.find(origin, Axis::Preceding, &AnyNode), mirrored);
    }
}
