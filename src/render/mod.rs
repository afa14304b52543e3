//! Page rendering capability
//!
//! The crawler only depends on this narrow contract. Any implementation may
//! satisfy it: a static HTTP loader ([`crate::transport::HttpRenderer`]), an
//! external browser-automation process, or an in-memory fixture in tests.
//!
//! Structure extraction happens in Rust over the [`Renderer::content`] snapshot,
//! so an implementation only has to navigate, wait and hand back the DOM.

use crate::MirrorError;
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::time::Duration;
use url::Url;

/// When a navigation is considered finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaitPolicy {
    /// The load event fired
    Load,
    /// No network activity for a short period
    #[default]
    NetworkIdle,
}

/// An anchor reported by [`Renderer::query_links`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    /// Raw `href` attribute value (may be relative)
    pub href: String,
    /// Trimmed text content
    pub text: String,
}

/// Renders portal pages in one browsing context
///
/// Calls are strictly sequential; the context is not shared between tasks.
#[async_trait]
pub trait Renderer: Send {
    /// Navigates the browsing context to `url`
    async fn goto(&mut self, url: &Url, wait: WaitPolicy) -> Result<(), MirrorError>;

    /// Waits until `selector` matches in the current page
    ///
    /// Fails with [`MirrorError::SelectorTimeout`] when it never appears.
    async fn wait_for_selector(&mut self, selector: &str, timeout: Duration)
        -> Result<(), MirrorError>;

    /// Snapshot of the current DOM serialized as HTML
    async fn content(&mut self) -> Result<String, MirrorError>;

    /// Every anchor matching `selector` in document order
    async fn query_links(&mut self, selector: &str) -> Result<Vec<PageLink>, MirrorError> {
        let html = self.content().await?;
        select_links(&html, selector)
    }
}

/// Parses a CSS selector, mapping the error into [`MirrorError::Selector`]
pub fn parse_selector(selector: &str) -> Result<Selector, MirrorError> {
    Selector::parse(selector).map_err(|e| MirrorError::Selector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}

/// Collects `href` and text of every element matching `selector`
///
/// Elements without an `href` attribute are skipped.
pub fn select_links(html: &str, selector: &str) -> Result<Vec<PageLink>, MirrorError> {
    let selector = parse_selector(selector)?;
    let document = Html::parse_document(html);

    Ok(document
        .select(&selector)
        .filter_map(|element| {
            let href = element.value().attr("href")?;
            Some(PageLink {
                href: href.to_string(),
                text: element.text().collect::<String>().trim().to_string(),
            })
        })
        .collect())
}

/// Checks whether `selector` matches anything in `html`
pub fn matches_selector(html: &str, selector: &str) -> Result<bool, MirrorError> {
    let selector = parse_selector(selector)?;
    let document = Html::parse_document(html);
    let found = document.select(&selector).next().is_some();
    Ok(found)
}
