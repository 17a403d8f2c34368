//! Named trees, kept in registration order.

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{DomainResult, StoreDocument, TreeArena, TreeEntryRecord};

#[derive(Debug, Clone)]
struct Entry {
    order: u64,
    tree: TreeArena,
}

/// Maps tree names to trees.
#[derive(Debug, Clone, Default)]
pub struct TreeRegistry {
    entries: HashMap<String, Entry>,
    next_order: u64,
}

impl TreeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registers `tree` under `name`. Re-registering a name keeps its position.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn insert(&mut self, name: &str, tree: TreeArena) {
        let order = match self.entries.get(name) {
            Some(existing) => existing.order,
            None => {
                let order = self.next_order;
                self.next_order += 1;
                order
            }
        };
        self.entries.insert(name.to_string(), Entry { order, tree });
    }

    pub fn get(&self, name: &str) -> ApplicationResult<&TreeArena> {
        self.entries
            .get(name)
            .map(|e| &e.tree)
            .ok_or_else(|| ApplicationError::TreeNotFound(name.to_string()))
    }

    pub fn get_mut(&mut self, name: &str) -> ApplicationResult<&mut TreeArena> {
        self.entries
            .get_mut(name)
            .map(|e| &mut e.tree)
            .ok_or_else(|| ApplicationError::TreeNotFound(name.to_string()))
    }

    pub fn remove(&mut self, name: &str) -> ApplicationResult<TreeArena> {
        self.entries
            .remove(name)
            .map(|e| e.tree)
            .ok_or_else(|| ApplicationError::TreeNotFound(name.to_string()))
    }

    /// Drops `name` if its tree has become empty. Returns true if dropped.
    pub fn prune_if_empty(&mut self, name: &str) -> bool {
        let empty = self.entries.get(name).is_some_and(|e| e.tree.is_empty());
        if empty {
            debug!("dropping empty tree '{}'", name);
            self.entries.remove(name);
        }
        empty
    }

    /// Names in registration order.
    pub fn names(&self) -> Vec<&str> {
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_by_key(|(_, e)| e.order);
        entries.into_iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TreeArena)> {
        self.names()
            .into_iter()
            .filter_map(move |name| self.entries.get(name).map(|e| (name, &e.tree)))
    }

    /// Serializable form; orders are renumbered from 0 and empty trees are skipped.
    pub fn to_document(&self) -> StoreDocument {
        self.iter()
            .filter_map(|(name, tree)| tree.to_record().map(|record| (name, record)))
            .enumerate()
            .map(|(order, (name, tree))| {
                (
                    name.to_string(),
                    TreeEntryRecord {
                        order: order as u64,
                        tree,
                    },
                )
            })
            .collect()
    }

    /// Rebuilds a registry; fails as a whole on the first corrupt tree.
    #[instrument(level = "debug", skip(document))]
    pub fn from_document(document: &StoreDocument) -> DomainResult<Self> {
        let mut entries: Vec<_> = document.iter().collect();
        entries.sort_by(|(a_name, a), (b_name, b)| a.order.cmp(&b.order).then(a_name.cmp(b_name)));

        let mut registry = Self::new();
        for (name, entry) in entries {
            registry.insert(name, TreeArena::from_record(&entry.tree)?);
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_follow_registration_order() {
        let mut registry = TreeRegistry::new();
        registry.insert("zeta", TreeArena::with_root("z"));
        registry.insert("alpha", TreeArena::with_root("a"));
        registry.insert("zeta", TreeArena::with_root("z2"));
        assert_eq!(registry.names(), vec!["zeta", "alpha"]);
        assert_eq!(registry.get("zeta").unwrap().dfs(), vec!["z2"]);
    }

    #[test]
    fn test_unknown_tree_is_reported() {
        let registry = TreeRegistry::new();
        assert!(matches!(
            registry.get("nope"),
            Err(ApplicationError::TreeNotFound(name)) if name == "nope"
        ));
    }

    #[test]
    fn test_document_round_trip_preserves_order() {
        let mut registry = TreeRegistry::new();
        registry.insert("b", TreeArena::with_root("x"));
        registry.insert("a", TreeArena::with_root("y"));
        let restored = TreeRegistry::from_document(&registry.to_document()).unwrap();
        assert_eq!(restored.names(), vec!["b", "a"]);
    }
}
