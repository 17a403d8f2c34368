//! Application layer: registry, services and use cases
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod error;
pub mod error_ext;
pub mod outcome;
pub mod registry;
pub mod render;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use outcome::Outcome;
pub use registry::TreeRegistry;
pub use render::render_svg;
