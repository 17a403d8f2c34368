use std::collections::HashMap;

use generational_arena::Index;
use termtree::Tree;

use crate::domain::TreeArena;

/// Conversion into a printable `termtree::Tree`.
pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for TreeArena {
    fn to_tree_string(&self) -> Tree<String> {
        let Some(root_idx) = self.root() else {
            return Tree::new("Empty tree".to_string());
        };

        let mut built: HashMap<Index, Tree<String>> = HashMap::new();
        for (idx, node) in self.iter_postorder() {
            let leaves: Vec<_> = node
                .children
                .iter()
                .filter_map(|child| built.remove(child))
                .collect();
            built.insert(idx, Tree::new(node.value.clone()).with_leaves(leaves));
        }
        built
            .remove(&root_idx)
            .unwrap_or_else(|| Tree::new("Empty tree".to_string()))
    }
}
