//! Build, edit, persist and lay out general n-ary trees.
//!
//! Trees live in a generational arena (`domain::TreeArena`); structural
//! edits, traversals and the drawing layout are methods on it. The
//! `application` layer keeps named trees in a registry persisted as JSON,
//! and the `cli` layer exposes everything as subcommands.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod tree_traits;
pub mod util;
