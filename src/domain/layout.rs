//! Tree layout: leaf-count widths and centered parent placement.
//!
//! Every leaf gets its own horizontal slot, so leaves never collide, and an
//! internal node sits at the mean x of its children. Per-node tables are
//! keyed by arena `Index`.

use std::collections::HashMap;

use generational_arena::Index;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::arena::TreeArena;

/// Spacing and margins, in drawing units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    pub x_spacing: f64,
    pub y_spacing: f64,
    pub top_margin: f64,
    pub left_margin: f64,
    /// Added after the right-most node when sizing the canvas
    pub right_padding: f64,
    /// Added after the lowest node when sizing the canvas
    pub bottom_padding: f64,
    /// Canvas size used when there is nothing to draw
    pub empty_width: u32,
    pub empty_height: u32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            x_spacing: 120.0,
            y_spacing: 120.0,
            top_margin: 60.0,
            left_margin: 60.0,
            right_padding: 60.0,
            bottom_padding: 120.0,
            empty_width: 500,
            empty_height: 300,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedNode {
    pub id: usize,
    pub label: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Disposable drawing view of a tree; recomputed on every request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub nodes: Vec<PositionedNode>,
    pub edges: Vec<Edge>,
    pub width: u32,
    pub height: u32,
}

impl Layout {
    pub fn node(&self, label: &str) -> Option<&PositionedNode> {
        self.nodes.iter().find(|n| n.label == label)
    }
}

impl TreeArena {
    /// Number of leaves in the subtree at `idx`; a leaf counts as 1.
    pub fn leaf_count(&self, idx: Index) -> usize {
        self.iter_from(idx)
            .filter(|(_, node)| node.children.is_empty())
            .count()
    }

    #[instrument(level = "debug", skip(self))]
    pub fn layout(&self, options: &LayoutOptions) -> Layout {
        let Some(root) = self.root() else {
            return Layout {
                nodes: Vec::new(),
                edges: Vec::new(),
                width: options.empty_width,
                height: options.empty_height,
            };
        };

        // ids in pre-order, widths bottom-up
        let ids: HashMap<Index, usize> = self
            .iter()
            .enumerate()
            .map(|(id, (idx, _))| (idx, id))
            .collect();
        let mut widths: HashMap<Index, usize> = HashMap::with_capacity(ids.len());
        for (idx, node) in self.iter_postorder() {
            let width = if node.children.is_empty() {
                1
            } else {
                node.children.iter().map(|c| widths[c]).sum()
            };
            widths.insert(idx, width);
        }

        // (first leaf slot, depth) top-down; siblings take consecutive slot ranges
        let mut slots: HashMap<Index, (usize, usize)> = HashMap::with_capacity(ids.len());
        slots.insert(root, (0, 0));
        for (idx, node) in self.iter() {
            let (mut cursor, depth) = slots[&idx];
            for &child in &node.children {
                slots.insert(child, (cursor, depth + 1));
                cursor += widths[&child];
            }
        }

        // x bottom-up: leaves sit on their slot, parents on the mean of their children
        let mut xs: HashMap<Index, f64> = HashMap::with_capacity(ids.len());
        let mut nodes = Vec::with_capacity(ids.len());
        let mut edges = Vec::new();
        for (idx, node) in self.iter_postorder() {
            let (slot, depth) = slots[&idx];
            let y = options.top_margin + depth as f64 * options.y_spacing;
            let x = if node.children.is_empty() {
                options.left_margin + slot as f64 * options.x_spacing
            } else {
                let centers: Vec<f64> = node.children.iter().map(|c| xs[c]).collect();
                let x = centers.iter().sum::<f64>() / centers.len() as f64;
                let child_y = y + options.y_spacing;
                edges.extend(centers.iter().map(|&cx| Edge {
                    x1: x,
                    y1: y,
                    x2: cx,
                    y2: child_y,
                }));
                x
            };
            xs.insert(idx, x);
            nodes.push(PositionedNode {
                id: ids[&idx],
                label: node.value.clone(),
                x,
                y,
            });
        }

        let max_x = nodes.iter().map(|n| n.x).fold(f64::MIN, f64::max);
        let max_y = nodes.iter().map(|n| n.y).fold(f64::MIN, f64::max);
        let width = (max_x + options.left_margin + options.right_padding) as u32;
        let height = (max_y + options.top_margin + options.bottom_padding) as u32;
        debug!("layout: {} nodes, {} edges, {}x{}", nodes.len(), edges.len(), width, height);

        Layout {
            nodes,
            edges,
            width,
            height,
        }
    }
}
