//! Tests for leaf-count widths and node placement

use std::collections::HashSet;

use rstest::{fixture, rstest};

use treeforge::domain::{LayoutOptions, TreeArena};

/// R -> (A -> (C, D, G), B, E -> (F))
#[fixture]
fn tree() -> TreeArena {
    let mut tree = TreeArena::with_root("R");
    for (parent, value) in [
        ("R", "A"),
        ("R", "B"),
        ("R", "E"),
        ("A", "C"),
        ("A", "D"),
        ("A", "G"),
        ("E", "F"),
    ] {
        tree.insert(parent, value, 0).unwrap();
    }
    tree
}

#[rstest]
fn given_any_node_when_counting_leaves_then_matches_subtree_leaves(tree: TreeArena) {
    for (idx, node) in tree.iter() {
        let leaves_below = tree
            .iter_from(idx)
            .filter(|(_, n)| n.children.is_empty())
            .count();
        assert_eq!(tree.leaf_count(idx), leaves_below, "node {}", node.value);

        if !node.children.is_empty() {
            let sum: usize = node.children.iter().map(|&c| tree.leaf_count(c)).sum();
            assert_eq!(sum, tree.leaf_count(idx));
        }
    }
    assert_eq!(tree.leaf_count(tree.root().unwrap()), 5);
}

#[rstest]
fn given_tree_when_laying_out_then_every_node_and_edge_present(tree: TreeArena) {
    let layout = tree.layout(&LayoutOptions::default());
    assert_eq!(layout.nodes.len(), tree.len());
    assert_eq!(layout.edges.len(), tree.len() - 1);

    let ids: HashSet<_> = layout.nodes.iter().map(|n| n.id).collect();
    assert_eq!(ids.len(), tree.len());
}

#[rstest]
fn given_tree_when_laying_out_then_leaves_never_share_a_slot(tree: TreeArena) {
    let layout = tree.layout(&LayoutOptions::default());
    let leaves = tree.leaf_values();
    let xs: Vec<f64> = leaves.iter().map(|l| layout.node(l).unwrap().x).collect();
    assert_eq!(xs, vec![60.0, 180.0, 300.0, 420.0, 540.0]);
}

#[rstest]
fn given_internal_node_when_laying_out_then_within_its_leaf_span_and_centered(tree: TreeArena) {
    let layout = tree.layout(&LayoutOptions::default());
    let a = layout.node("A").unwrap();
    assert_eq!(a.x, 180.0);
    assert_eq!(a.y, 180.0);

    let e = layout.node("E").unwrap();
    assert_eq!(e.x, layout.node("F").unwrap().x);

    // mean of A (180), B (420), E (540)
    let r = layout.node("R").unwrap();
    assert_eq!(r.x, 380.0);
    assert_eq!(r.y, 60.0);
    assert!(r.x >= 60.0 && r.x <= 540.0);
}

#[rstest]
fn given_tree_when_laying_out_then_edges_join_parent_to_child(tree: TreeArena) {
    let layout = tree.layout(&LayoutOptions::default());
    let f = layout.node("F").unwrap();
    let e = layout.node("E").unwrap();
    assert!(layout
        .edges
        .iter()
        .any(|edge| edge.x1 == e.x && edge.y1 == e.y && edge.x2 == f.x && edge.y2 == f.y));
}

#[rstest]
fn given_tree_when_laying_out_then_canvas_covers_all_nodes(tree: TreeArena) {
    let options = LayoutOptions::default();
    let layout = tree.layout(&options);
    // max x 540 + 60 + 60, max y 300 + 60 + 120
    assert_eq!(layout.width, 660);
    assert_eq!(layout.height, 480);
}

#[test]
fn given_custom_spacing_when_laying_out_then_positions_scale() {
    let mut tree = TreeArena::with_root("R");
    tree.insert("R", "A", 0).unwrap();
    tree.insert("R", "B", 0).unwrap();
    let options = LayoutOptions {
        x_spacing: 50.0,
        y_spacing: 30.0,
        top_margin: 10.0,
        left_margin: 10.0,
        ..LayoutOptions::default()
    };
    let layout = tree.layout(&options);
    assert_eq!(layout.node("B").unwrap().x, 60.0);
    assert_eq!(layout.node("B").unwrap().y, 40.0);
    assert_eq!(layout.node("R").unwrap().x, 35.0);
}

#[test]
fn given_empty_tree_when_laying_out_then_default_canvas() {
    let layout = TreeArena::new().layout(&LayoutOptions::default());
    assert!(layout.nodes.is_empty());
    assert!(layout.edges.is_empty());
    assert_eq!((layout.width, layout.height), (500, 300));
}

#[rstest]
fn given_layout_when_serializing_then_matches_renderer_shape(tree: TreeArena) {
    let layout = tree.layout(&LayoutOptions::default());
    let json = serde_json::to_value(&layout).unwrap();
    assert!(json["nodes"][0]["label"].is_string());
    assert!(json["nodes"][0]["id"].is_number());
    assert!(json["edges"][0]["x1"].is_number());
    assert_eq!(json["width"], 660);
}

#[test]
fn given_very_deep_chain_when_laying_out_then_single_column() {
    let depth = 10_000;
    let mut tree = TreeArena::with_root("n0");
    let mut tip = tree.root().unwrap();
    for i in 1..depth {
        tip = tree.add_child(tip, format!("n{i}")).unwrap();
    }

    assert_eq!(tree.height(), depth as isize - 1);
    assert_eq!(tree.leaf_count(tree.root().unwrap()), 1);

    let layout = tree.layout(&LayoutOptions::default());
    assert_eq!(layout.nodes.len(), depth);
    assert_eq!(layout.edges.len(), depth - 1);
    assert!(layout.nodes.iter().all(|n| n.x == 60.0));
    assert_eq!(layout.nodes[0].label, format!("n{}", depth - 1));
    assert_eq!(layout.nodes[depth - 1].label, "n0");
    assert_eq!(layout.height, (60 + (depth - 1) * 120 + 60 + 120) as u32);
}
