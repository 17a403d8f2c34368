//! Nested record form of a tree, used for persistence.
//!
//! ```json
//! { "family": { "order": 0, "tree": { "value": "R", "children": [] } } }
//! ```

use std::collections::{BTreeMap, HashMap, HashSet};

use generational_arena::Index;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::arena::TreeArena;
use crate::domain::error::{DomainError, DomainResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub value: String,
    #[serde(default)]
    pub children: Vec<NodeRecord>,
}

impl NodeRecord {
    pub fn leaf(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(value: impl Into<String>, children: Vec<NodeRecord>) -> Self {
        Self {
            value: value.into(),
            children,
        }
    }
}

/// One named tree inside a store document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntryRecord {
    pub order: u64,
    pub tree: NodeRecord,
}

/// Whole store document: tree name to entry.
pub type StoreDocument = BTreeMap<String, TreeEntryRecord>;

impl TreeArena {
    /// Nested record of the whole tree; None for an empty tree.
    #[instrument(level = "debug", skip(self))]
    pub fn to_record(&self) -> Option<NodeRecord> {
        let root = self.root()?;
        // Post-order: every child record is finished before its parent claims it
        let mut built: HashMap<Index, NodeRecord> = HashMap::new();
        for (idx, node) in self.iter_postorder() {
            let children = node
                .children
                .iter()
                .filter_map(|child| built.remove(child))
                .collect();
            built.insert(idx, NodeRecord::with_children(node.value.clone(), children));
        }
        built.remove(&root)
    }

    /// Rebuilds a tree from its record.
    ///
    /// Rejects empty or repeated values with `CorruptData`; nothing is
    /// returned for partially valid input.
    #[instrument(level = "debug", skip(record))]
    pub fn from_record(record: &NodeRecord) -> DomainResult<TreeArena> {
        let mut tree = TreeArena::new();
        let mut seen: HashSet<&str> = HashSet::new();
        let mut stack: Vec<(&NodeRecord, Option<Index>)> = vec![(record, None)];

        while let Some((current, parent_idx)) = stack.pop() {
            if current.value.is_empty() {
                return Err(DomainError::CorruptData("node with empty value".to_string()));
            }
            if !seen.insert(current.value.as_str()) {
                return Err(DomainError::CorruptData(format!(
                    "value '{}' appears more than once",
                    current.value
                )));
            }

            let current_idx = tree.insert_node(current.value.clone(), parent_idx);

            // Reverse so children are attached in their recorded order
            for child in current.children.iter().rev() {
                stack.push((child, Some(current_idx)));
            }
        }

        Ok(tree)
    }
}

/// Structural equality: same values, same shape, same sibling order.
impl PartialEq for TreeArena {
    fn eq(&self, other: &Self) -> bool {
        self.to_record() == other.to_record()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_record_keeps_sibling_order() {
        let record = NodeRecord::with_children(
            "R",
            vec![
                NodeRecord::with_children("A", vec![NodeRecord::leaf("C"), NodeRecord::leaf("D")]),
                NodeRecord::leaf("B"),
            ],
        );
        let tree = TreeArena::from_record(&record).unwrap();
        assert_eq!(tree.dfs(), vec!["R", "A", "C", "D", "B"]);
        assert_eq!(tree.to_record(), Some(record));
    }

    #[test]
    fn test_from_record_rejects_duplicates() {
        let record = NodeRecord::with_children("R", vec![NodeRecord::leaf("R")]);
        assert!(matches!(
            TreeArena::from_record(&record),
            Err(DomainError::CorruptData(_))
        ));
    }

    #[test]
    fn test_record_deserializes_without_children_key() {
        let record: NodeRecord = serde_json::from_str(r#"{"value": "solo"}"#).unwrap();
        assert_eq!(record, NodeRecord::leaf("solo"));
    }
}
