use crate::common::assert_sibling_links;
use wem_babel::{DocumentTree, NodeId, NodeKind, Parameters, TreeError};

fn words(tree: &mut DocumentTree, parent: NodeId, texts: &[&str]) -> Vec<NodeId> {
    texts
        .iter()
        .map(|text| {
            let id = tree.create_node(NodeKind::Word((*text).to_string()));
            tree.append_child(parent, id).expect("append");
            id
        })
        .collect()
}

fn texts(tree: &DocumentTree, parent: NodeId) -> Vec<String> {
    tree.children(parent)
        .map(|child| tree.text_content(child))
        .collect()
}

#[test]
fn test_replace_with_empty_list_links_neighbors() {
    let mut tree = DocumentTree::new();
    let root = tree.root();
    let ids = words(&mut tree, root, &["a", "b", "c"]);

    tree.replace(root, &[], ids[1]).expect("replace");

    assert_eq!(tree.next_sibling(ids[0]), Some(ids[2]));
    assert_eq!(tree.previous_sibling(ids[2]), Some(ids[0]));
    assert_eq!(tree.parent(ids[1]), None);
    assert_eq!(tree.next_sibling(ids[1]), None);
    assert_eq!(tree.previous_sibling(ids[1]), None);
    assert_sibling_links(&tree, root);
}

#[test]
fn test_replace_only_child_with_empty_list() {
    let mut tree = DocumentTree::new();
    let root = tree.root();
    let ids = words(&mut tree, root, &["only"]);

    tree.replace(root, &[], ids[0]).expect("replace");

    assert_eq!(tree.first_child(root), None);
    assert_eq!(tree.last_child(root), None);
    assert_eq!(tree.child_count(root), 0);
}

#[test]
fn test_replace_edges() {
    let mut tree = DocumentTree::new();
    let root = tree.root();
    let ids = words(&mut tree, root, &["a", "b", "c"]);
    let first = tree.create_node(NodeKind::Word("A".into()));
    let last = tree.create_node(NodeKind::Word("C".into()));

    tree.replace(root, &[first], ids[0]).expect("replace first");
    tree.replace(root, &[last], ids[2]).expect("replace last");

    assert_eq!(texts(&tree, root), ["A", "b", "C"]);
    assert_eq!(tree.first_child(root), Some(first));
    assert_eq!(tree.last_child(root), Some(last));
    assert_sibling_links(&tree, root);
}

#[test]
fn test_replace_non_child_fails() {
    let mut tree = DocumentTree::new();
    let root = tree.root();
    let paragraph = tree.create_node(NodeKind::Paragraph);
    tree.append_child(root, paragraph).expect("append");
    let inner = words(&mut tree, paragraph, &["x"]);

    assert_eq!(
        tree.replace(root, &[], inner[0]),
        Err(TreeError::NotAChild {
            parent: root,
            node: inner[0]
        })
    );
    assert_eq!(texts(&tree, paragraph), ["x"]);
}

#[test]
fn test_nodes_move_between_parents() {
    let mut tree = DocumentTree::new();
    let root = tree.root();
    let left = tree.create_node(NodeKind::Paragraph);
    let right = tree.create_node(NodeKind::Paragraph);
    tree.append_child(root, left).expect("append");
    tree.append_child(root, right).expect("append");
    let ids = words(&mut tree, left, &["a", "b"]);

    tree.insert_after(right, ids[0], None).expect("move");
    tree.insert_before(right, ids[1], Some(ids[0])).expect("move");

    assert_eq!(tree.child_count(left), 0);
    assert_eq!(texts(&tree, right), ["b", "a"]);
    assert_sibling_links(&tree, root);
}

#[test]
fn test_identity_not_equality_locates_siblings() {
    let mut tree = DocumentTree::new();
    let root = tree.root();
    let ids = words(&mut tree, root, &["same", "same"]);

    assert!(tree.remove(root, ids[1]));
    assert_eq!(tree.first_child(root), Some(ids[0]));
    assert_eq!(tree.parent(ids[1]), None);
    assert!(!tree.remove(root, ids[1]));
}

#[test]
fn test_parameters_are_never_missing() {
    let mut tree = DocumentTree::new();
    let root = tree.root();
    let id = tree.create_node_with(NodeKind::Table, Parameters::new().with("border", "1"));
    tree.append_child(root, id).expect("append");

    let params = tree.params_mut(id).expect("params");
    params.insert("border", "0");
    params.insert("class", "wide");

    let params = tree.params(id).expect("params");
    assert_eq!(params.get("border"), Some("0"));
    assert_eq!(params.get("missing"), None);
    assert_eq!(params.keys().collect::<Vec<_>>(), ["border", "class"]);
    assert_eq!(tree.params(root).map(Parameters::len), Some(0));
}

#[test]
fn test_set_kind_and_unknown_nodes() {
    let mut tree = DocumentTree::new();
    let id = tree.create_node(NodeKind::Paragraph);
    tree.set_kind(id, NodeKind::Quotation).expect("set kind");
    assert_eq!(tree.kind(id), Some(&NodeKind::Quotation));

    let foreign = {
        let mut other = DocumentTree::new();
        for _ in 0..5 {
            other.create_node(NodeKind::Paragraph);
        }
        other.create_node(NodeKind::Paragraph)
    };
    assert_eq!(
        tree.set_kind(foreign, NodeKind::Paragraph),
        Err(TreeError::UnknownNode(foreign))
    );
    assert_eq!(tree.node(foreign), None);
    assert_eq!(tree.node_count(), 2);
}
