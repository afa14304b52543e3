//! Crawler module for tree discovery and mirroring
//!
//! This module contains the core crawling logic, including:
//! - Reading tree nodes out of a rendered navigation menu
//! - Label-based exclusion of subtrees
//! - Breadth-first expansion of the node set over rendered pages
//! - Finding the downloadable resources of each node
//! - Overall run coordination

mod coordinator;
mod discover;
mod exclusion;
mod frontier;
mod node;
mod resources;

pub use coordinator::{run_discovery, run_mirror, Coordinator};
pub use discover::TreeDiscoverer;
pub use exclusion::ExclusionRules;
pub use frontier::{CrawlSettings, FrontierCrawler};
pub use node::{LeafResource, NodeSet, TreeNode};
pub use resources::{find_resources, FALLBACK_RESOURCE_NAME};
