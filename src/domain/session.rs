//! Breadth-first, step-wise tree construction.

use std::collections::{HashSet, VecDeque};

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::TreeArena;
use crate::domain::error::{DomainError, DomainResult};

/// Input that ends a node's child list early.
pub const END_OF_CHILDREN: &str = "NULL";

/// What happened to one pending node during `add_children`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepReport {
    pub parent: String,
    pub added: Vec<String>,
    /// Values skipped because they already label a node in this build
    pub rejected: Vec<String>,
}

/// A tree under construction.
///
/// Nodes wait in a queue in breadth-first order; each step pops the front
/// node and gives it up to `fanout` children, which join the back of the queue.
#[derive(Debug, Clone)]
pub struct BuildSession {
    name: String,
    fanout: usize,
    tree: TreeArena,
    queue: VecDeque<Index>,
    used: HashSet<String>,
}

impl BuildSession {
    #[instrument(level = "debug")]
    pub fn start(name: &str, fanout: usize, root: &str) -> DomainResult<Self> {
        let root = root.trim();
        if root.is_empty() {
            return Err(DomainError::EmptyValue);
        }
        let tree = TreeArena::with_root(root);
        Ok(Self {
            name: name.trim().to_string(),
            fanout,
            queue: tree.root().into_iter().collect(),
            used: HashSet::from([root.to_string()]),
            tree,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tree(&self) -> &TreeArena {
        &self.tree
    }

    pub fn is_used(&self, value: &str) -> bool {
        self.used.contains(value)
    }

    /// Value of the node waiting for its children.
    pub fn pending(&self) -> Option<&str> {
        self.queue.front().and_then(|&idx| self.tree.value(idx))
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn is_complete(&self) -> bool {
        self.queue.is_empty()
    }

    /// Gives the pending node its children. Returns None once the build is complete.
    ///
    /// At most `fanout` values are considered. Blank values are skipped,
    /// repeated values are rejected, and `NULL` ends the list.
    #[instrument(level = "debug", skip(self, values))]
    pub fn add_children<S: AsRef<str>>(&mut self, values: &[S]) -> Option<StepReport> {
        let parent = self.queue.pop_front()?;
        let mut report = StepReport {
            parent: self.tree.value(parent).unwrap_or_default().to_string(),
            ..StepReport::default()
        };

        for value in values.iter().take(self.fanout) {
            let value = value.as_ref().trim();
            if value.is_empty() {
                continue;
            }
            if value.eq_ignore_ascii_case(END_OF_CHILDREN) {
                break;
            }
            if self.used.contains(value) {
                debug!("rejecting duplicate value '{}'", value);
                report.rejected.push(value.to_string());
                continue;
            }
            if let Ok(child) = self.tree.add_child(parent, value) {
                self.queue.push_back(child);
                self.used.insert(value.to_string());
                report.added.push(value.to_string());
            }
        }

        Some(report)
    }

    /// Hands over the finished tree, or gives the session back if nodes are still pending.
    pub fn finish(self) -> Result<(String, TreeArena), Self> {
        if self.is_complete() {
            Ok((self.name, self.tree))
        } else {
            Err(self)
        }
    }
}
