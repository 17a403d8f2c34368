//! Breadth-first and depth-first enumeration over a `TreeArena`.

use std::collections::VecDeque;

use generational_arena::Index;
use tracing::instrument;

use crate::domain::arena::{TreeArena, TreeNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalOrder {
    #[default]
    Bfs,
    Dfs,
}

impl TreeArena {
    pub fn traverse(&self, order: TraversalOrder) -> Vec<String> {
        match order {
            TraversalOrder::Bfs => self.bfs(),
            TraversalOrder::Dfs => self.dfs(),
        }
    }

    /// Pre-order iterator over the whole tree.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self, self.root)
    }

    /// Pre-order iterator over the subtree rooted at `start`.
    pub fn iter_from(&self, start: Index) -> TreeIterator<'_> {
        TreeIterator::new(self, Some(start))
    }

    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self)
    }

    pub fn iter_level_order(&self) -> LevelOrderIterator<'_> {
        LevelOrderIterator::new(self)
    }

    /// Node values in level order; empty for an empty tree.
    #[instrument(level = "debug", skip(self))]
    pub fn bfs(&self) -> Vec<String> {
        self.iter_level_order()
            .map(|(_, node)| node.value.clone())
            .collect()
    }

    /// Node values in pre-order; empty for an empty tree.
    #[instrument(level = "debug", skip(self))]
    pub fn dfs(&self) -> Vec<String> {
        self.iter().map(|(_, node)| node.value.clone()).collect()
    }
}

pub struct TreeIterator<'a> {
    arena: &'a TreeArena,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a TreeArena, start: Option<Index>) -> Self {
        Self {
            arena,
            stack: start.into_iter().collect(),
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    arena: &'a TreeArena,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(arena: &'a TreeArena) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push((root, false));
        }
        Self { arena, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}

pub struct LevelOrderIterator<'a> {
    arena: &'a TreeArena,
    queue: VecDeque<Index>,
}

impl<'a> LevelOrderIterator<'a> {
    fn new(arena: &'a TreeArena) -> Self {
        Self {
            arena,
            queue: arena.root().into_iter().collect(),
        }
    }
}

impl<'a> Iterator for LevelOrderIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.queue.pop_front() {
            if let Some(node) = self.arena.get_node(current_idx) {
                self.queue.extend(node.children.iter().copied());
                return Some((current_idx, node));
            }
        }
        None
    }
}
