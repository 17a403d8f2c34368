//! Tests for tree structure and traversal

use rstest::{fixture, rstest};

use treeforge::domain::{TraversalOrder, TreeArena};

/// R -> (A -> (C, D), B -> (E -> (F)))
#[fixture]
fn tree() -> TreeArena {
    let mut tree = TreeArena::with_root("R");
    for (parent, value) in [("R", "A"), ("R", "B"), ("A", "C"), ("A", "D"), ("B", "E"), ("E", "F")] {
        tree.insert(parent, value, 0).unwrap();
    }
    tree
}

// ============================================================
// Structure
// ============================================================

#[rstest]
fn given_tree_when_listing_children_then_returns_insertion_order(tree: TreeArena) {
    let a = tree.find_by_value("A").unwrap();
    let children: Vec<_> = tree
        .children_of(a)
        .iter()
        .map(|&c| tree.value(c).unwrap())
        .collect();
    assert_eq!(children, vec!["C", "D"]);
    // Repeated calls see the same sequence
    assert_eq!(tree.children_of(a), tree.children_of(a));
}

#[rstest]
fn given_add_child_when_appending_then_goes_to_end_without_uniqueness_check(mut tree: TreeArena) {
    let root = tree.root().unwrap();
    let idx = tree.add_child(root, "A").unwrap();
    assert_eq!(tree.children_of(root).last(), Some(&idx));
    assert_eq!(tree.len(), 8);
}

#[rstest]
fn given_tree_when_measuring_height_then_leaf_is_zero(tree: TreeArena) {
    assert_eq!(tree.height(), 3);
    assert_eq!(tree.height_of(tree.find_by_value("C")), 0);
    assert_eq!(tree.height_of(tree.find_by_value("B")), 2);
    assert_eq!(tree.height_of(None), -1);
    assert_eq!(TreeArena::new().height(), -1);
    assert_eq!(TreeArena::with_root("solo").height(), 0);
}

#[rstest]
fn given_subtree_when_searching_then_only_looks_below_start(tree: TreeArena) {
    let b = tree.find_by_value("B").unwrap();
    assert_eq!(tree.search(b, "F"), tree.find_by_value("F"));
    assert!(tree.search(b, "C").is_none());
    assert_eq!(tree.search(b, "B"), Some(b));
}

#[rstest]
fn given_tree_when_collecting_leaves_then_left_to_right(tree: TreeArena) {
    assert_eq!(tree.leaf_values(), vec!["C", "D", "F"]);
    assert_eq!(tree.depth_of(tree.find_by_value("F").unwrap()), Some(3));
}

// ============================================================
// Traversal
// ============================================================

#[rstest]
fn given_tree_when_bfs_then_level_order(tree: TreeArena) {
    assert_eq!(tree.bfs(), vec!["R", "A", "B", "C", "D", "E", "F"]);
}

#[rstest]
fn given_tree_when_dfs_then_preorder(tree: TreeArena) {
    assert_eq!(tree.dfs(), vec!["R", "A", "C", "D", "B", "E", "F"]);
}

#[rstest]
#[case(TraversalOrder::Bfs)]
#[case(TraversalOrder::Dfs)]
fn given_any_order_when_traversing_then_visits_every_node_once_starting_at_root(
    tree: TreeArena,
    #[case] order: TraversalOrder,
) {
    let mut values = tree.traverse(order);
    assert_eq!(values.first().map(String::as_str), Some("R"));
    assert_eq!(values.len(), tree.len());
    values.sort();
    values.dedup();
    assert_eq!(values.len(), tree.len());
}

#[test]
fn given_empty_tree_when_traversing_then_returns_empty() {
    let tree = TreeArena::new();
    assert!(tree.traverse(TraversalOrder::Bfs).is_empty());
    assert!(tree.traverse(TraversalOrder::Dfs).is_empty());
}
