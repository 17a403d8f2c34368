//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum, ValueHint};

use crate::domain::TraversalOrder;

/// Build, edit, persist and lay out general n-ary trees
#[derive(Parser, Debug)]
#[command(name = "treeforge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file (default: ~/.config/treeforge/treeforge.toml)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Tree store file (overrides config)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a new tree interactively, level by level
    Build {
        /// Tree name (replaces an existing tree of that name)
        name: String,
        /// Root value
        #[arg(short, long)]
        root: String,
        /// Maximum number of children per node
        #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
        fanout: u16,
    },

    /// List stored trees
    List,

    /// Show a tree as an indented hierarchy
    Show {
        name: String,
    },

    /// Insert a value under an existing parent
    Insert {
        name: String,
        parent: String,
        value: String,
        /// Fan-out bound for the parent (0 = unbounded; default from config)
        #[arg(short, long)]
        max: Option<usize>,
    },

    /// Delete a node with its subtree, or promote its children
    Delete {
        name: String,
        value: String,
        /// Keep the children, moving them into the deleted node's place
        #[arg(short, long)]
        promote: bool,
    },

    /// Rename a node
    Rename {
        name: String,
        old: String,
        new: String,
    },

    /// Print the address (e.g. R.0.1) of a value
    Search {
        name: String,
        value: String,
    },

    /// Print the value at an address
    Resolve {
        name: String,
        address: String,
    },

    /// Print the path between two values
    Path {
        name: String,
        from: String,
        to: String,
    },

    /// Print all values in traversal order
    Traverse {
        name: String,
        #[arg(short, long, value_enum, default_value_t = OrderArg::Bfs)]
        order: OrderArg,
    },

    /// Print the tree height (0 for a single node)
    Height {
        name: String,
    },

    /// Compute node positions for drawing
    Layout {
        name: String,
        #[arg(short, long, value_enum, default_value_t = FormatArg::Json)]
        format: FormatArg,
        /// Write to file instead of stdout
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Remove a whole tree from the store
    Remove {
        name: String,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a commented config template
    Template,
    /// Show config and store locations
    Path,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderArg {
    Bfs,
    Dfs,
}

impl From<OrderArg> for TraversalOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Bfs => TraversalOrder::Bfs,
            OrderArg::Dfs => TraversalOrder::Dfs,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Json,
    Svg,
}
