//! Structural edits and address/path resolution.

use std::collections::HashSet;

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::TreeArena;
use crate::domain::error::{DomainError, DomainResult};

/// Address token naming the root.
pub const ROOT_ADDRESS: &str = "R";

impl TreeArena {
    /// Inserts `new_value` as the last child of the node labelled `parent_value`.
    ///
    /// `max_children == 0` means unbounded fan-out. Value uniqueness is
    /// enforced here, after the capacity check.
    #[instrument(level = "debug", skip(self))]
    pub fn insert(&mut self, parent_value: &str, new_value: &str, max_children: usize) -> DomainResult<Index> {
        if new_value.is_empty() {
            return Err(DomainError::EmptyValue);
        }
        let parent = self
            .find_by_value(parent_value)
            .ok_or_else(|| DomainError::ParentNotFound(parent_value.to_string()))?;

        let count = self.children_of(parent).len();
        if max_children > 0 && count >= max_children {
            return Err(DomainError::CapacityExceeded {
                parent: parent_value.to_string(),
                max: max_children,
            });
        }
        if self.contains(new_value) {
            return Err(DomainError::DuplicateValue(new_value.to_string()));
        }

        Ok(self.insert_node(new_value.to_string(), Some(parent)))
    }

    /// Removes the node labelled `value` together with all its descendants.
    ///
    /// Deleting the root empties the tree. Returns the removed values in
    /// pre-order.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_subtree(&mut self, value: &str) -> DomainResult<Vec<String>> {
        let target = self
            .find_by_value(value)
            .ok_or_else(|| DomainError::NodeNotFound(value.to_string()))?;

        let doomed: Vec<Index> = self.iter_from(target).map(|(idx, _)| idx).collect();
        let parent = self.parent_of(target);

        match parent {
            None => {
                debug!("deleting root '{}', tree becomes empty", value);
                self.root = None;
            }
            Some(parent_idx) => {
                if let Some(parent) = self.arena.get_mut(parent_idx) {
                    parent.children.retain(|&c| c != target);
                }
            }
        }

        let removed = doomed
            .into_iter()
            .filter_map(|idx| self.arena.remove(idx))
            .map(|node| node.value)
            .collect();
        Ok(removed)
    }

    /// Removes a single non-root node, splicing its children into the slot it
    /// occupied: preceding siblings, then its children, then following siblings.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_promote_children(&mut self, value: &str) -> DomainResult<()> {
        let target = self
            .find_by_value(value)
            .ok_or_else(|| DomainError::NodeNotFound(value.to_string()))?;
        let parent_idx = self
            .parent_of(target)
            .ok_or_else(|| DomainError::RootDeletionUnsupported(value.to_string()))?;

        let removed = self
            .arena
            .remove(target)
            .ok_or_else(|| DomainError::NodeNotFound(value.to_string()))?;

        for &child in &removed.children {
            if let Some(node) = self.arena.get_mut(child) {
                node.parent = Some(parent_idx);
            }
        }

        let parent = self
            .arena
            .get_mut(parent_idx)
            .ok_or_else(|| DomainError::CorruptData(format!("dangling parent of '{value}'")))?;
        let pos = parent
            .children
            .iter()
            .position(|&c| c == target)
            .ok_or_else(|| DomainError::CorruptData(format!("'{value}' missing from its parent")))?;
        parent.children.splice(pos..=pos, removed.children);
        Ok(())
    }

    /// Relabels `old_value` to `new_value` in place.
    #[instrument(level = "debug", skip(self))]
    pub fn rename(&mut self, old_value: &str, new_value: &str) -> DomainResult<()> {
        let target = self
            .find_by_value(old_value)
            .ok_or_else(|| DomainError::NodeNotFound(old_value.to_string()))?;
        if new_value.is_empty() {
            return Err(DomainError::EmptyValue);
        }
        if old_value == new_value {
            return Ok(());
        }
        if self.contains(new_value) {
            return Err(DomainError::DuplicateValue(new_value.to_string()));
        }
        if let Some(node) = self.arena.get_mut(target) {
            node.value = new_value.to_string();
        }
        Ok(())
    }

    /// Dotted child-index path from the root, e.g. `R.0.2`.
    ///
    /// Recomputed from the current shape; addresses shift when siblings move.
    pub fn address_of(&self, target: Index) -> Option<String> {
        let mut positions = Vec::new();
        let mut current = target;
        while let Some(parent) = self.get_node(current)?.parent {
            let pos = self.children_of(parent).iter().position(|&c| c == current)?;
            positions.push(pos);
            current = parent;
        }
        if Some(current) != self.root {
            return None;
        }

        let mut address = ROOT_ADDRESS.to_string();
        for pos in positions.iter().rev() {
            address.push('.');
            address.push_str(&pos.to_string());
        }
        Some(address)
    }

    /// Inverse of `address_of`; None on malformed tokens or out-of-range indices.
    pub fn resolve_address(&self, address: &str) -> Option<Index> {
        let mut tokens = address.trim().split('.');
        if tokens.next()? != ROOT_ADDRESS {
            return None;
        }
        let mut current = self.root?;
        for token in tokens {
            let pos = parse_child_index(token)?;
            current = *self.children_of(current).get(pos)?;
        }
        Some(current)
    }

    /// Unique path from `a` to `b` through their lowest common ancestor.
    #[instrument(level = "trace", skip(self))]
    pub fn path_between(&self, a: Index, b: Index) -> Option<Vec<Index>> {
        let up_from_a = self.ancestors_inclusive(a)?;
        let seen: HashSet<Index> = up_from_a.iter().copied().collect();

        let mut up_from_b = Vec::new();
        let mut lca = None;
        for idx in self.ancestors_inclusive(b)? {
            if seen.contains(&idx) {
                lca = Some(idx);
                break;
            }
            up_from_b.push(idx);
        }
        let lca = lca?;

        let mut path: Vec<Index> = up_from_a.into_iter().take_while(|&idx| idx != lca).collect();
        path.push(lca);
        path.extend(up_from_b.into_iter().rev());
        Some(path)
    }

    /// Value-level wrapper around `path_between`.
    pub fn path_between_values(&self, a: &str, b: &str) -> DomainResult<Vec<String>> {
        let from = self
            .find_by_value(a)
            .ok_or_else(|| DomainError::NodeNotFound(a.to_string()))?;
        let to = self
            .find_by_value(b)
            .ok_or_else(|| DomainError::NodeNotFound(b.to_string()))?;
        let path = self
            .path_between(from, to)
            .ok_or_else(|| DomainError::NodeNotFound(format!("no common ancestor of '{a}' and '{b}'")))?;
        Ok(path
            .into_iter()
            .filter_map(|idx| self.value(idx).map(str::to_string))
            .collect())
    }

    /// `idx` followed by each of its ancestors up to the root.
    fn ancestors_inclusive(&self, idx: Index) -> Option<Vec<Index>> {
        let mut chain = vec![idx];
        let mut node = self.get_node(idx)?;
        while let Some(parent) = node.parent {
            chain.push(parent);
            node = self.get_node(parent)?;
        }
        Some(chain)
    }
}

/// Canonical child index: ASCII digits only, no sign, no leading zeros.
fn parse_child_index(token: &str) -> Option<usize> {
    let canonical = match token.as_bytes() {
        [] => false,
        [b'0'] => true,
        [b'0', ..] => false,
        bytes => bytes.iter().all(u8::is_ascii_digit),
    };
    if canonical {
        token.parse().ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// R -> (A -> (C), B)
    fn small_tree() -> TreeArena {
        let mut tree = TreeArena::with_root("R");
        tree.insert("R", "A", 0).unwrap();
        tree.insert("R", "B", 0).unwrap();
        tree.insert("A", "C", 0).unwrap();
        tree
    }

    #[test]
    fn test_address_of_nested_node() {
        let tree = small_tree();
        let c = tree.find_by_value("C").unwrap();
        assert_eq!(tree.address_of(c).as_deref(), Some("R.0.0"));
        assert_eq!(tree.address_of(tree.root().unwrap()).as_deref(), Some("R"));
    }

    #[test]
    fn test_resolve_address_rejects_bad_input() {
        let tree = small_tree();
        assert_eq!(tree.resolve_address("R.1"), tree.find_by_value("B"));
        assert!(tree.resolve_address("R.5").is_none());
        assert!(tree.resolve_address("R.x").is_none());
        assert!(tree.resolve_address("X.0").is_none());
        assert!(tree.resolve_address("R..0").is_none());
    }

    #[test]
    fn test_path_between_goes_through_lca() {
        let tree = small_tree();
        assert_eq!(tree.path_between_values("C", "B").unwrap(), vec!["C", "A", "R", "B"]);
        assert_eq!(tree.path_between_values("A", "C").unwrap(), vec!["A", "C"]);
        assert_eq!(tree.path_between_values("C", "C").unwrap(), vec!["C"]);
    }

    #[test]
    fn test_insert_respects_capacity_before_uniqueness() {
        let mut tree = small_tree();
        tree.insert("B", "X", 1).unwrap();
        assert!(matches!(
            tree.insert("B", "X", 1),
            Err(DomainError::CapacityExceeded { max: 1, .. })
        ));
        assert_eq!(
            tree.insert("B", "A", 2),
            Err(DomainError::DuplicateValue("A".into()))
        );
    }

    #[test]
    fn test_delete_promote_splices_children_in_place() {
        // R -> (A -> (C, D), B)
        let mut tree = small_tree();
        tree.insert("A", "D", 0).unwrap();
        tree.insert("R", "E", 0).unwrap();
        tree.delete_promote_children("A").unwrap();
        assert_eq!(tree.bfs(), vec!["R", "C", "D", "B", "E"]);
        let d = tree.find_by_value("D").unwrap();
        assert_eq!(tree.parent_of(d), tree.root());
    }
}
