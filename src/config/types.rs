use serde::Deserialize;
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for Portal-Mirror
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub portal: PortalConfig,
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub markup: MarkupConfig,
    pub output: OutputConfig,
}

/// Portal entry point and authenticated session
#[derive(Debug, Clone, Deserialize)]
pub struct PortalConfig {
    /// Article page whose menu entry is the root of the mirrored tree
    #[serde(rename = "root-url")]
    pub root_url: String,

    /// Browser storage-state file produced by an interactive login
    #[serde(rename = "session-state")]
    pub session_state: PathBuf,

    /// User agent sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Fixed delay after every page render and download (milliseconds)
    #[serde(rename = "request-delay")]
    pub request_delay: u64,

    /// How long to wait for the menu on a node page (milliseconds)
    #[serde(rename = "menu-timeout", default = "default_menu_timeout")]
    pub menu_timeout: u64,

    /// How long to wait for the menu on the root page (milliseconds)
    #[serde(rename = "root-menu-timeout", default = "default_root_menu_timeout")]
    pub root_menu_timeout: u64,

    /// Menu labels whose branches are never visited (case-insensitive)
    #[serde(rename = "excluded-labels", default)]
    pub excluded_labels: Vec<String>,
}

impl CrawlerConfig {
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay)
    }

    pub fn menu_timeout(&self) -> Duration {
        Duration::from_millis(self.menu_timeout)
    }

    pub fn root_menu_timeout(&self) -> Duration {
        Duration::from_millis(self.root_menu_timeout)
    }

    /// Trimmed, lower-cased exclusion set
    pub fn exclusion_set(&self) -> HashSet<String> {
        self.excluded_labels
            .iter()
            .map(|label| label.trim().to_lowercase())
            .filter(|label| !label.is_empty())
            .collect()
    }
}

/// Markup conventions of the portal
#[derive(Debug, Clone, Deserialize)]
pub struct MarkupConfig {
    /// CSS selector of the navigation menu container
    #[serde(rename = "menu-selector", default = "default_menu_selector")]
    pub menu_selector: String,

    /// Substring identifying article-view links (tree nodes)
    #[serde(rename = "article-marker", default = "default_article_marker")]
    pub article_marker: String,

    /// Substring identifying resource-view links (downloads)
    #[serde(rename = "resource-marker", default = "default_resource_marker")]
    pub resource_marker: String,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            menu_selector: default_menu_selector(),
            article_marker: default_article_marker(),
            resource_marker: default_resource_marker(),
        }
    }
}

impl MarkupConfig {
    /// Selector matching every resource anchor on a node page
    pub fn resource_selector(&self) -> String {
        format!("a[href*=\"{}\"]", self.resource_marker)
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Root directory of the mirror
    pub root: PathBuf,
}

fn default_user_agent() -> String {
    format!("portal-mirror/{}", env!("CARGO_PKG_VERSION"))
}

fn default_menu_timeout() -> u64 {
    10_000
}

fn default_root_menu_timeout() -> u64 {
    15_000
}

fn default_menu_selector() -> String {
    "#leftnav .leftmenu".to_string()
}

fn default_article_marker() -> String {
    "ViewArticle.aspx?oid=".to_string()
}

fn default_resource_marker() -> String {
    "Show.aspx?oid=".to_string()
}
