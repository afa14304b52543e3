//! Link handling for Portal-Mirror
//!
//! This module resolves anchor hrefs against the page they appear on and
//! recognizes the portal's endpoint families by marker substrings.

mod marker;
mod resolve;

pub use marker::{contains_marker, tree_root_marker};
pub use resolve::{canonicalize, resolve_link};
