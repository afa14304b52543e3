//! Breadth-first expansion of the navigation tree
//!
//! Some menu branches only appear after their parent article is opened, so
//! every collected node is rendered once and its menu re-read.

use crate::config::Config;
use crate::crawler::discover::TreeDiscoverer;
use crate::crawler::exclusion::ExclusionRules;
use crate::crawler::node::{NodeSet, TreeNode};
use crate::links::canonicalize;
use crate::render::{Renderer, WaitPolicy};
use crate::state::RunContext;
use crate::MirrorError;
use std::collections::{HashSet, VecDeque};
use std::time::Duration;
use url::Url;

/// Timing and markup settings of a crawl
#[derive(Debug, Clone)]
pub struct CrawlSettings {
    /// Selector whose presence marks a rendered menu
    pub menu_selector: String,

    /// Pause after every render
    pub request_delay: Duration,

    /// Menu wait for regular nodes
    pub menu_timeout: Duration,

    /// Menu wait for the root page
    pub root_menu_timeout: Duration,
}

impl CrawlSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            menu_selector: config.markup.menu_selector.clone(),
            request_delay: config.crawler.request_delay(),
            menu_timeout: config.crawler.menu_timeout(),
            root_menu_timeout: config.crawler.root_menu_timeout(),
        }
    }
}

/// Collects the full node set reachable from the root article
pub struct FrontierCrawler {
    discoverer: TreeDiscoverer,
    exclusions: ExclusionRules,
    settings: CrawlSettings,
}

impl FrontierCrawler {
    pub fn new(
        discoverer: TreeDiscoverer,
        exclusions: ExclusionRules,
        settings: CrawlSettings,
    ) -> Self {
        Self {
            discoverer,
            exclusions,
            settings,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, MirrorError> {
        Ok(Self::new(
            TreeDiscoverer::from_config(config)?,
            ExclusionRules::new(config.crawler.exclusion_set()),
            CrawlSettings::from_config(config),
        ))
    }

    /// Renders a page and waits for its menu
    ///
    /// A menu that never shows up is logged and the current DOM is used
    /// anyway. The configured delay follows the render whether it worked or
    /// not.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - DOM snapshot of the page
    /// * `Err(MirrorError)` - Navigation or snapshot failed
    pub async fn render_page<R: Renderer + ?Sized>(
        &self,
        renderer: &mut R,
        url: &Url,
        menu_timeout: Duration,
        ctx: &mut RunContext,
    ) -> Result<String, MirrorError> {
        let result = self.load(renderer, url, menu_timeout, ctx).await;
        tokio::time::sleep(self.settings.request_delay).await;

        match &result {
            Ok(_) => ctx.pages_rendered += 1,
            Err(_) => ctx.render_failures += 1,
        }
        result
    }

    async fn load<R: Renderer + ?Sized>(
        &self,
        renderer: &mut R,
        url: &Url,
        menu_timeout: Duration,
        ctx: &mut RunContext,
    ) -> Result<String, MirrorError> {
        renderer.goto(url, WaitPolicy::NetworkIdle).await?;

        match renderer
            .wait_for_selector(&self.settings.menu_selector, menu_timeout)
            .await
        {
            Ok(()) => {}
            Err(MirrorError::SelectorTimeout { .. }) => {
                tracing::warn!("Menu not loaded on {}, continuing", url);
                ctx.menu_timeouts += 1;
            }
            Err(e) => return Err(e),
        }

        renderer.content().await
    }

    /// Runs discovery to completion
    ///
    /// The root page is rendered first; failing to navigate to it aborts the
    /// run. Every collected node is then visited once, oldest first, and any
    /// node its menu reveals that is not yet collected is appended to the
    /// frontier. Nodes failing to render are logged and contribute nothing.
    ///
    /// # Arguments
    ///
    /// * `renderer` - Browsing context used for every page
    /// * `root_url` - The tree root article
    /// * `ctx` - Run counters
    ///
    /// # Returns
    ///
    /// * `Ok(NodeSet)` - Every collected node in discovery order
    /// * `Err(MirrorError)` - The root page could not be rendered
    pub async fn crawl<R: Renderer + ?Sized>(
        &self,
        renderer: &mut R,
        root_url: &Url,
        ctx: &mut RunContext,
    ) -> Result<NodeSet, MirrorError> {
        let root_url = canonicalize(root_url.clone());
        let mut collected = NodeSet::new();
        let mut frontier = VecDeque::new();
        let mut visited = HashSet::new();
        let mut excluded = HashSet::new();

        tracing::info!("Loading tree root: {}", root_url);
        let html = self
            .render_page(renderer, &root_url, self.settings.root_menu_timeout, ctx)
            .await?;

        let nodes = self.discover_filtered(&html, &root_url, &mut excluded);
        for node in nodes {
            let url = node.url.clone();
            if collected.insert(node) {
                frontier.push_back(url);
            }
        }
        tracing::info!(
            "Loaded {} menu items from tree root ({} excluded)",
            collected.len(),
            excluded.len()
        );

        while let Some(url) = frontier.pop_front() {
            if !visited.insert(url.clone()) {
                continue;
            }

            tracing::info!(
                "Visiting {} ({}/{})",
                url,
                visited.len(),
                collected.len()
            );

            let html = match self
                .render_page(renderer, &url, self.settings.menu_timeout, ctx)
                .await
            {
                Ok(html) => html,
                Err(e) => {
                    tracing::warn!("Failed to render {}: {}", url, e);
                    continue;
                }
            };

            let mut new_count = 0;
            for node in self.discover_filtered(&html, &url, &mut excluded) {
                let node_url = node.url.clone();
                if collected.insert(node) {
                    frontier.push_back(node_url);
                    new_count += 1;
                }
            }

            if new_count > 0 {
                tracing::info!(
                    "Found {} new menu items (total so far {})",
                    new_count,
                    collected.len()
                );
            }
        }

        // A node excluded under one branch may still be collected under another
        excluded.retain(|url| !collected.contains(url));
        ctx.nodes_collected = collected.len() as u64;
        ctx.nodes_excluded = excluded.len() as u64;
        tracing::info!("Tree discovery finished: {} nodes", collected.len());

        Ok(collected)
    }

    fn discover_filtered(
        &self,
        html: &str,
        page_url: &Url,
        excluded: &mut HashSet<Url>,
    ) -> Vec<TreeNode> {
        let nodes = self.discoverer.discover(html, page_url);
        let (kept, dropped) = self.exclusions.partition(nodes);
        for node in dropped {
            if excluded.insert(node.url.clone()) {
                tracing::debug!("Excluding '{}' ({})", node.display_path(), node.url);
            }
        }
        kept
    }
}
