//! Output module for run reports
//!
//! This module handles:
//! - Printing the counters of a finished run
//! - Printing the discovered tree with its target directories (dry run)

pub mod stats;
mod tree;

pub use stats::print_summary;
pub use tree::{format_tree, print_tree};
