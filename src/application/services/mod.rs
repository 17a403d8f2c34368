//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem) but are themselves
//! concrete structs, not traits.

mod forest;
mod session;
mod store;

pub use forest::{DeleteSummary, ForestService};
pub use session::{SessionManager, SessionToken};
pub use store::{deserialize_registry, serialize_registry, TreeStore};
