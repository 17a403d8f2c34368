//! Domain layer: tree structure and algorithms
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod error;
pub mod layout;
pub mod mutation;
pub mod record;
pub mod session;
pub mod traversal;

pub use arena::{TreeArena, TreeNode};
pub use error::{DomainError, DomainResult};
pub use layout::{Edge, Layout, LayoutOptions, PositionedNode};
pub use mutation::ROOT_ADDRESS;
pub use record::{NodeRecord, StoreDocument, TreeEntryRecord};
pub use session::{BuildSession, StepReport, END_OF_CHILDREN};
pub use traversal::TraversalOrder;
