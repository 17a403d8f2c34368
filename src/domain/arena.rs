use std::fmt;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Label, unique across the whole tree
    pub value: String,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena, in sibling order
    pub children: Vec<Index>,
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Arena-based n-ary tree.
///
/// Nodes are addressed by generational `Index`, which stays valid until the
/// node is removed. The index doubles as the key for every per-node table
/// (layout widths, ids, positions), so no node identity hashing is needed.
#[derive(Debug, Clone)]
pub struct TreeArena {
    /// Arena storage for all tree nodes
    pub(super) arena: Arena<TreeNode>,
    /// Index of the root node, None for empty trees
    pub(super) root: Option<Index>,
}

impl Default for TreeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Creates a single-node tree.
    pub fn with_root(value: impl Into<String>) -> Self {
        let mut tree = Self::new();
        tree.insert_node(value.into(), None);
        tree
    }

    /// Low-level insert: attaches `value` as the last child of `parent`, or
    /// replaces the whole tree with a new root when `parent` is None.
    #[instrument(level = "trace", skip(self))]
    pub(super) fn insert_node(&mut self, value: String, parent: Option<Index>) -> Index {
        if parent.is_none() {
            self.arena.clear();
        }
        let node = TreeNode {
            value,
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.root = Some(node_idx);
        }

        node_idx
    }

    /// Appends a new node to the end of `parent`'s child list.
    ///
    /// Does not check value uniqueness; `insert` is the checked variant.
    #[instrument(level = "trace", skip(self))]
    pub fn add_child(&mut self, parent: Index, value: impl Into<String> + fmt::Debug) -> DomainResult<Index> {
        if !self.arena.contains(parent) {
            return Err(DomainError::NodeNotFound(format!("{parent:?}")));
        }
        Ok(self.insert_node(value.into(), Some(parent)))
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn value(&self, idx: Index) -> Option<&str> {
        self.get_node(idx).map(|n| n.value.as_str())
    }

    pub fn parent_of(&self, idx: Index) -> Option<Index> {
        self.get_node(idx).and_then(|n| n.parent)
    }

    /// Ordered children of `idx`; empty for leaves and unknown indices.
    pub fn children_of(&self, idx: Index) -> &[Index] {
        self.get_node(idx)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the whole tree: 0 for a single node, -1 for an empty tree.
    #[instrument(level = "debug", skip(self))]
    pub fn height(&self) -> isize {
        self.height_of(self.root)
    }

    /// Height of the subtree at `node`; -1 when there is no such node.
    pub fn height_of(&self, node: Option<Index>) -> isize {
        let Some(start) = node.filter(|&idx| self.arena.contains(idx)) else {
            return -1;
        };
        let mut height = 0;
        let mut stack = vec![(start, 0)];
        while let Some((idx, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(self.children_of(idx).iter().map(|&child| (child, depth + 1)));
        }
        height
    }

    /// Number of edges between the root and `idx`.
    pub fn depth_of(&self, idx: Index) -> Option<usize> {
        let mut node = self.get_node(idx)?;
        let mut depth = 0;
        while let Some(parent) = node.parent {
            node = self.get_node(parent)?;
            depth += 1;
        }
        Some(depth)
    }

    /// Pre-order search of the subtree rooted at `from`; first match wins.
    #[instrument(level = "trace", skip(self))]
    pub fn search(&self, from: Index, value: &str) -> Option<Index> {
        self.iter_from(from)
            .find(|(_, node)| node.value == value)
            .map(|(idx, _)| idx)
    }

    /// Searches the whole tree for `value`.
    pub fn find_by_value(&self, value: &str) -> Option<Index> {
        self.root.and_then(|root| self.search(root, value))
    }

    pub fn contains(&self, value: &str) -> bool {
        self.find_by_value(value).is_some()
    }

    /// Collects the values of all leaf nodes, left to right.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_values(&self) -> Vec<String> {
        self.iter()
            .filter(|(_, node)| node.children.is_empty())
            .map(|(_, node)| node.value.clone())
            .collect()
    }
}
