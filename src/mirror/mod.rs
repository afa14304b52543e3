//! Local mirror layout
//!
//! [`sanitize`] turns display strings into safe path segments and
//! [`MirrorWriter`] owns directory creation and file placement under the
//! output root.

mod sanitize;
mod writer;

pub use sanitize::{sanitize, SUBSTITUTE};
pub use writer::MirrorWriter;
