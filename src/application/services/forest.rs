//! Tree operations against the persisted registry.
//!
//! Every successful mutation is written back to the store immediately.
//! Edits are staged on a copy so memory never runs ahead of disk.

use tracing::{debug, info, instrument};

use crate::application::registry::TreeRegistry;
use crate::application::services::store::TreeStore;
use crate::application::ApplicationResult;
use crate::domain::{DomainError, Layout, LayoutOptions, TraversalOrder, TreeArena};

/// Result of a delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteSummary {
    /// Values no longer in the tree
    pub removed: Vec<String>,
    /// True when the root went and the tree was unregistered
    pub tree_dropped: bool,
}

pub struct ForestService {
    store: TreeStore,
    registry: TreeRegistry,
}

impl ForestService {
    /// Opens the store and loads all trees.
    pub fn open(store: TreeStore) -> ApplicationResult<Self> {
        let registry = store.load()?;
        Ok(Self { store, registry })
    }

    pub fn registry(&self) -> &TreeRegistry {
        &self.registry
    }

    pub fn store(&self) -> &TreeStore {
        &self.store
    }

    pub fn tree(&self, name: &str) -> ApplicationResult<&TreeArena> {
        self.registry.get(name)
    }

    /// Registers a finished tree under `name`, replacing any tree of that name.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn commit(&mut self, name: &str, tree: TreeArena) -> ApplicationResult<()> {
        if tree.is_empty() {
            return Err(DomainError::EmptyTree.into());
        }
        self.persist(|registry| {
            registry.insert(name, tree);
            Ok(())
        })?;
        info!("committed tree '{}'", name);
        Ok(())
    }

    /// Inserts `value` under `parent`; returns the new node's address.
    #[instrument(level = "debug", skip(self))]
    pub fn insert(&mut self, name: &str, parent: &str, value: &str, max_children: usize) -> ApplicationResult<String> {
        self.persist(|registry| {
            let tree = registry.get_mut(name)?;
            let idx = tree.insert(parent, value, max_children)?;
            Ok(tree.address_of(idx).unwrap_or_default())
        })
    }

    #[instrument(level = "debug", skip(self))]
    pub fn delete(&mut self, name: &str, value: &str, promote: bool) -> ApplicationResult<DeleteSummary> {
        self.persist(|registry| {
            let tree = registry.get_mut(name)?;
            let removed = if promote {
                tree.delete_promote_children(value)?;
                vec![value.to_string()]
            } else {
                tree.delete_subtree(value)?
            };
            let tree_dropped = registry.prune_if_empty(name);
            debug!("removed {} node(s) from '{}'", removed.len(), name);
            Ok(DeleteSummary { removed, tree_dropped })
        })
    }

    #[instrument(level = "debug", skip(self))]
    pub fn rename(&mut self, name: &str, old_value: &str, new_value: &str) -> ApplicationResult<()> {
        self.persist(|registry| Ok(registry.get_mut(name)?.rename(old_value, new_value)?))
    }

    /// Unregisters a whole tree.
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, name: &str) -> ApplicationResult<TreeArena> {
        self.persist(|registry| registry.remove(name))
    }

    /// Runs `edit` on a copy of the registry and keeps the copy only once it
    /// is on disk; a failed edit or write leaves the loaded registry as it was.
    fn persist<T>(
        &mut self,
        edit: impl FnOnce(&mut TreeRegistry) -> ApplicationResult<T>,
    ) -> ApplicationResult<T> {
        let mut staged = self.registry.clone();
        let outcome = edit(&mut staged)?;
        self.store.save(&staged)?;
        self.registry = staged;
        Ok(outcome)
    }

    /// Address of the node labelled `value`.
    pub fn search(&self, name: &str, value: &str) -> ApplicationResult<String> {
        let tree = self.registry.get(name)?;
        tree.find_by_value(value)
            .and_then(|idx| tree.address_of(idx))
            .ok_or_else(|| DomainError::NodeNotFound(value.to_string()).into())
    }

    /// Value of the node at `address`.
    pub fn resolve(&self, name: &str, address: &str) -> ApplicationResult<String> {
        let tree = self.registry.get(name)?;
        tree.resolve_address(address)
            .and_then(|idx| tree.value(idx))
            .map(str::to_string)
            .ok_or_else(|| DomainError::NodeNotFound(address.to_string()).into())
    }

    pub fn path(&self, name: &str, from: &str, to: &str) -> ApplicationResult<Vec<String>> {
        Ok(self.registry.get(name)?.path_between_values(from, to)?)
    }

    pub fn traverse(&self, name: &str, order: TraversalOrder) -> ApplicationResult<Vec<String>> {
        Ok(self.registry.get(name)?.traverse(order))
    }

    pub fn height(&self, name: &str) -> ApplicationResult<isize> {
        Ok(self.registry.get(name)?.height())
    }

    pub fn layout(&self, name: &str, options: &LayoutOptions) -> ApplicationResult<Layout> {
        Ok(self.registry.get(name)?.layout(options))
    }
}
