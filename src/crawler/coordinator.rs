//! Run coordination
//!
//! A run has two phases sharing one browsing context:
//! - Discovery: expand the node set from the tree root
//! - Mirroring: for every node, create its directory, render its page, find
//!   its resources and download them

use crate::config::Config;
use crate::crawler::frontier::FrontierCrawler;
use crate::crawler::node::{NodeSet, TreeNode};
use crate::crawler::resources::find_resources;
use crate::download::Downloader;
use crate::mirror::MirrorWriter;
use crate::render::{Renderer, WaitPolicy};
use crate::state::RunContext;
use crate::transport::{
    build_http_client, load_session_state, Fetcher, HttpFetcher, HttpRenderer,
};
use crate::MirrorError;
use std::time::Duration;
use url::Url;

/// Main coordinator structure
pub struct Coordinator<R: Renderer, F: Fetcher> {
    crawler: FrontierCrawler,
    renderer: R,
    downloader: Downloader<F>,
    root_url: Url,
    resource_selector: String,
    resource_marker: String,
    request_delay: Duration,
}

impl<R: Renderer, F: Fetcher> Coordinator<R, F> {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - Validated configuration; its output root is the mirror root
    /// * `renderer` - Browsing context for menu and node pages
    /// * `fetcher` - Session-bound GET capability for resources
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(MirrorError)` - Root URL or selectors are invalid
    pub fn new(config: &Config, renderer: R, fetcher: F) -> Result<Self, MirrorError> {
        let request_delay = config.crawler.request_delay();
        let writer = MirrorWriter::new(&config.output.root);

        Ok(Self {
            crawler: FrontierCrawler::from_config(config)?,
            renderer,
            downloader: Downloader::new(fetcher, writer, request_delay),
            root_url: Url::parse(&config.portal.root_url)?,
            resource_selector: config.markup.resource_selector(),
            resource_marker: config.markup.resource_marker.clone(),
            request_delay,
        })
    }

    /// Collects the node set without downloading anything
    pub async fn discover(&mut self, ctx: &mut RunContext) -> Result<NodeSet, MirrorError> {
        self.crawler
            .crawl(&mut self.renderer, &self.root_url, ctx)
            .await
    }

    /// Runs discovery and mirrors every collected node
    ///
    /// Only a failure to load the tree root or to create the mirror root
    /// aborts the run. Per-node and per-resource failures are logged,
    /// counted in `ctx` and skipped.
    pub async fn run(&mut self, ctx: &mut RunContext) -> Result<NodeSet, MirrorError> {
        let root = self.downloader.writer().root().to_path_buf();
        self.downloader.writer().ensure_dir(&root).await?;

        let nodes = self.discover(ctx).await?;
        tracing::info!("Total tree nodes to download: {}", nodes.len());

        let total = nodes.len();
        for (i, node) in nodes.iter().enumerate() {
            if let Err(e) = self.mirror_node(node, i + 1, total, ctx).await {
                tracing::error!("Error mirroring {}: {}", node.url, e);
            }
        }

        tracing::info!("Done. Output in: {}", root.display());
        Ok(nodes)
    }

    /// Downloads the resources of a single node into its directory
    ///
    /// The directory is created even when the page cannot be rendered or
    /// lists no resources.
    pub async fn mirror_node(
        &mut self,
        node: &TreeNode,
        index: usize,
        total: usize,
        ctx: &mut RunContext,
    ) -> Result<(), MirrorError> {
        let dir = self.downloader.writer().node_dir(node);
        self.downloader.writer().ensure_dir(&dir).await?;

        tracing::info!("({}/{}) {}", index, total, node.display_path());

        let loaded = self.renderer.goto(&node.url, WaitPolicy::NetworkIdle).await;
        tokio::time::sleep(self.request_delay).await;
        if let Err(e) = loaded {
            ctx.render_failures += 1;
            return Err(e);
        }
        ctx.pages_rendered += 1;

        let links = self.renderer.query_links(&self.resource_selector).await?;
        let resources = find_resources(&links, &node.url, &self.resource_marker);
        ctx.resources_found += resources.len() as u64;
        tracing::info!("  Found {} resource links", resources.len());

        let count = resources.len();
        for (i, resource) in resources.iter().enumerate() {
            tracing::info!(
                "    ({}/{}) Downloading: {}",
                i + 1,
                count,
                resource.suggested_name
            );
            self.downloader
                .download_resource(resource, &dir, ctx)
                .await;
        }

        Ok(())
    }
}

type HttpCoordinator = Coordinator<HttpRenderer, HttpFetcher>;

/// Builds a coordinator over the saved session
///
/// The session-state file is checked before any network activity; a missing
/// file aborts here.
fn connect(config: &Config) -> Result<HttpCoordinator, MirrorError> {
    let jar = load_session_state(&config.portal.session_state)?;
    let client = build_http_client(&config.portal.user_agent, jar)?;

    Coordinator::new(
        config,
        HttpRenderer::new(client.clone()),
        HttpFetcher::new(client),
    )
}

/// Runs a complete mirror operation
///
/// # Returns
///
/// * `Ok(RunContext)` - Run finished; counters describe what happened
/// * `Err(MirrorError)` - A prerequisite was missing or the tree root failed
pub async fn run_mirror(config: &Config) -> Result<RunContext, MirrorError> {
    let mut coordinator = connect(config)?;
    let mut ctx = RunContext::new();

    coordinator.run(&mut ctx).await?;
    ctx.log_summary();

    Ok(ctx)
}

/// Runs discovery only and returns the collected nodes
pub async fn run_discovery(config: &Config) -> Result<(NodeSet, RunContext), MirrorError> {
    let mut coordinator = connect(config)?;
    let mut ctx = RunContext::new();

    let nodes = coordinator.discover(&mut ctx).await?;
    Ok((nodes, ctx))
}
