//! State module for tracking run progress
//!
//! # Components
//!
//! - `RunContext`: Start time and counters of one mirror run, passed
//!   explicitly through the crawler and the downloader

mod run_context;

pub use run_context::RunContext;
