//! Portal-Mirror: a document-tree mirror for portal navigation menus
//!
//! This crate walks a nested navigation menu breadth-first, collects every
//! article node reachable from a root article, and mirrors the documents
//! linked from each node into a local directory tree. File names are resolved
//! from inconsistently encoded server metadata and zip payloads are unpacked
//! in place.

pub mod config;
pub mod crawler;
pub mod download;
pub mod links;
pub mod mirror;
pub mod naming;
pub mod output;
pub mod render;
pub mod state;
pub mod transport;

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Main error type for Portal-Mirror operations
#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Render error for {url}: {message}")]
    Render { url: String, message: String },

    #[error("Timed out after {timeout:?} waiting for selector '{selector}'")]
    SelectorTimeout { selector: String, timeout: Duration },

    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("Session state file not found: {}", path.display())]
    MissingSessionState { path: PathBuf },

    #[error("Invalid session state in {}: {message}", path.display())]
    SessionState { path: PathBuf, message: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector in config: {0}")]
    InvalidSelector(String),
}

/// Result type alias for Portal-Mirror operations
pub type Result<T> = std::result::Result<T, MirrorError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{LeafResource, NodeSet, TreeNode};
pub use naming::{resolve_filename, ResolvedFilename};
pub use state::RunContext;
