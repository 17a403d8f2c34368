//! Tests for structural edits, addresses and paths

use rstest::{fixture, rstest};

use treeforge::domain::{DomainError, TreeArena};

/// R -> (A -> (C), B)
#[fixture]
fn tree() -> TreeArena {
    let mut tree = TreeArena::with_root("R");
    tree.insert("R", "A", 0).unwrap();
    tree.insert("R", "B", 0).unwrap();
    tree.insert("A", "C", 0).unwrap();
    tree
}

// ============================================================
// Insert
// ============================================================

#[rstest]
fn given_fanout_of_one_when_inserting_twice_then_second_exceeds_capacity(mut tree: TreeArena) {
    // A already has C, so use B which has none
    assert!(tree.insert("B", "X", 1).is_ok());
    assert_eq!(
        tree.insert("B", "X", 1),
        Err(DomainError::CapacityExceeded {
            parent: "B".into(),
            max: 1
        })
    );
}

#[rstest]
fn given_parent_with_child_when_inserting_with_max_one_then_capacity_exceeded(mut tree: TreeArena) {
    assert!(matches!(
        tree.insert("A", "X", 1),
        Err(DomainError::CapacityExceeded { .. })
    ));
    assert!(!tree.contains("X"));
}

#[rstest]
fn given_missing_parent_when_inserting_then_parent_not_found(mut tree: TreeArena) {
    assert_eq!(
        tree.insert("nope", "X", 0),
        Err(DomainError::ParentNotFound("nope".into()))
    );
}

#[rstest]
fn given_existing_value_when_inserting_then_duplicate(mut tree: TreeArena) {
    assert_eq!(tree.insert("B", "C", 0), Err(DomainError::DuplicateValue("C".into())));
    assert_eq!(tree.len(), 4);
}

// ============================================================
// Delete
// ============================================================

#[rstest]
fn given_inner_node_when_deleting_subtree_then_descendants_are_gone(mut tree: TreeArena) {
    let removed = tree.delete_subtree("A").unwrap();
    assert_eq!(removed, vec!["A", "C"]);
    assert!(!tree.contains("A"));
    assert!(!tree.contains("C"));
    assert_eq!(tree.bfs(), vec!["R", "B"]);
    assert_eq!(tree.len(), 2);
}

#[rstest]
fn given_root_when_deleting_subtree_then_tree_is_empty(mut tree: TreeArena) {
    tree.delete_subtree("R").unwrap();
    assert!(tree.is_empty());
    assert!(tree.bfs().is_empty());
    assert_eq!(tree.len(), 0);
}

#[rstest]
fn given_missing_value_when_deleting_then_node_not_found(mut tree: TreeArena) {
    assert_eq!(tree.delete_subtree("Z"), Err(DomainError::NodeNotFound("Z".into())));
    assert_eq!(
        tree.delete_promote_children("Z"),
        Err(DomainError::NodeNotFound("Z".into()))
    );
}

#[rstest]
fn given_middle_node_when_promoting_then_children_take_its_slot(mut tree: TreeArena) {
    // R -> (A -> (C, D), M -> (X, Y), B)
    tree.insert("A", "D", 0).unwrap();
    tree.insert("R", "M", 0).unwrap();
    tree.insert("M", "X", 0).unwrap();
    tree.insert("M", "Y", 0).unwrap();
    // Move B behind M by deleting and re-adding
    tree.delete_subtree("B").unwrap();
    tree.insert("R", "B", 0).unwrap();

    tree.delete_promote_children("M").unwrap();

    let root = tree.root().unwrap();
    let top: Vec<_> = tree
        .children_of(root)
        .iter()
        .map(|&c| tree.value(c).unwrap())
        .collect();
    assert_eq!(top, vec!["A", "X", "Y", "B"]);
    assert_eq!(tree.len(), 7);
    assert_eq!(tree.path_between_values("X", "C").unwrap(), vec!["X", "R", "A", "C"]);
}

#[rstest]
fn given_root_when_promoting_then_unsupported(mut tree: TreeArena) {
    assert_eq!(
        tree.delete_promote_children("R"),
        Err(DomainError::RootDeletionUnsupported("R".into()))
    );
    assert_eq!(tree.len(), 4);
}

// ============================================================
// Rename
// ============================================================

#[rstest]
fn given_taken_value_when_renaming_then_duplicate_and_unchanged(mut tree: TreeArena) {
    let before = tree.clone();
    assert_eq!(tree.rename("A", "B"), Err(DomainError::DuplicateValue("B".into())));
    assert_eq!(tree, before);
}

#[rstest]
fn given_free_value_when_renaming_then_node_relabelled_in_place(mut tree: TreeArena) {
    let idx = tree.find_by_value("A").unwrap();
    tree.rename("A", "Alpha").unwrap();
    assert_eq!(tree.value(idx), Some("Alpha"));
    assert!(tree.rename("A", "Q").is_err());
    assert!(tree.rename("Alpha", "Alpha").is_ok());
}

// ============================================================
// Addresses and paths
// ============================================================

#[rstest]
fn given_nested_node_when_addressing_then_dotted_child_indices(tree: TreeArena) {
    let c = tree.find_by_value("C").unwrap();
    assert_eq!(tree.address_of(c).as_deref(), Some("R.0.0"));
}

#[rstest]
fn given_every_node_when_resolving_its_address_then_round_trips(tree: TreeArena) {
    for (idx, _) in tree.iter() {
        let address = tree.address_of(idx).unwrap();
        assert_eq!(tree.resolve_address(&address), Some(idx), "address {address}");
    }
}

#[rstest]
#[case("R.2")]
#[case("R.0.0.0")]
#[case("R.-1")]
#[case("R.a")]
#[case("")]
#[case("A.0")]
#[case("R.+0")]
#[case("R.00")]
#[case("R.")]
fn given_bad_address_when_resolving_then_none(tree: TreeArena, #[case] address: &str) {
    assert!(tree.resolve_address(address).is_none());
}

#[rstest]
fn given_two_nodes_when_finding_path_then_goes_through_lca(tree: TreeArena) {
    assert_eq!(tree.path_between_values("C", "B").unwrap(), vec!["C", "A", "R", "B"]);
    assert_eq!(tree.path_between_values("B", "C").unwrap(), vec!["B", "R", "A", "C"]);
    assert_eq!(tree.path_between_values("R", "C").unwrap(), vec!["R", "A", "C"]);
}

#[rstest]
fn given_unknown_endpoint_when_finding_path_then_node_not_found(tree: TreeArena) {
    assert_eq!(
        tree.path_between_values("C", "Z"),
        Err(DomainError::NodeNotFound("Z".into()))
    );
}
