//! Navigation tree discovery
//!
//! The portal renders its menu as nested `ul > li > a` lists, but a child
//! list is sometimes written as a sibling following its parent item
//! (`li + ul`) instead of inside it. Both shapes are walked together.

use crate::config::Config;
use crate::crawler::node::TreeNode;
use crate::links::{contains_marker, resolve_link, tree_root_marker};
use crate::render::parse_selector;
use crate::MirrorError;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Extracts tree nodes from a rendered page's menu
#[derive(Debug, Clone)]
pub struct TreeDiscoverer {
    menu: Selector,
    anchors: Selector,
    root_marker: String,
    article_marker: String,
}

impl TreeDiscoverer {
    /// Creates a discoverer
    ///
    /// # Arguments
    ///
    /// * `menu_selector` - CSS selector of the menu container
    /// * `root_marker` - href substring identifying the tree root anchor
    /// * `article_marker` - href substring every node link must contain
    pub fn new(
        menu_selector: &str,
        root_marker: impl Into<String>,
        article_marker: impl Into<String>,
    ) -> Result<Self, MirrorError> {
        Ok(Self {
            menu: parse_selector(menu_selector)?,
            anchors: parse_selector("a[href]")?,
            root_marker: root_marker.into(),
            article_marker: article_marker.into(),
        })
    }

    /// Creates a discoverer rooted at the configured root article
    pub fn from_config(config: &Config) -> Result<Self, MirrorError> {
        let root_url = Url::parse(&config.portal.root_url)?;
        Self::new(
            &config.markup.menu_selector,
            tree_root_marker(&root_url),
            config.markup.article_marker.clone(),
        )
    }

    /// Walks the menu subtree under the root anchor
    ///
    /// Nodes come back in pre-order, deduplicated by URL (first occurrence
    /// kept). A page without the menu, the root anchor or its enclosing `li`
    /// yields an empty list.
    ///
    /// # Arguments
    ///
    /// * `html` - Snapshot of the rendered page
    /// * `page_url` - URL of that page, for resolving relative hrefs
    pub fn discover(&self, html: &str, page_url: &Url) -> Vec<TreeNode> {
        let document = Html::parse_document(html);

        let Some(root_item) = self.find_root_item(&document) else {
            tracing::debug!("No tree root found in menu of {}", page_url);
            return Vec::new();
        };

        let mut seen_items = HashSet::new();
        let mut seen_urls = HashSet::new();
        let mut nodes = Vec::new();
        let mut stack = vec![(root_item, Vec::<String>::new())];

        while let Some((item, parent_path)) = stack.pop() {
            if !seen_items.insert(item.id()) {
                continue;
            }

            let anchor = direct_anchor(item);
            let label = anchor
                .map(|a| a.text().collect::<String>().trim().to_string())
                .unwrap_or_default();
            let url = anchor
                .and_then(|a| a.value().attr("href"))
                .filter(|href| contains_marker(href, &self.article_marker))
                .and_then(|href| resolve_link(href, page_url));

            let mut path = parent_path;
            if !label.is_empty() {
                path.push(label.clone());
            }

            let children: Vec<ElementRef> = child_lists(item)
                .into_iter()
                .flat_map(list_items)
                .collect();
            for child in children.into_iter().rev() {
                stack.push((child, path.clone()));
            }

            if let Some(url) = url {
                if seen_urls.insert(url.clone()) {
                    nodes.push(TreeNode {
                        label,
                        url,
                        ancestor_path: path,
                    });
                }
            }
        }

        nodes
    }

    /// The `li` enclosing the first menu anchor that points at the tree root
    fn find_root_item<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        let menu = document.select(&self.menu).next()?;
        let root_anchor = menu.select(&self.anchors).find(|a| {
            a.value()
                .attr("href")
                .map(|href| contains_marker(href, &self.root_marker))
                .unwrap_or(false)
        })?;

        root_anchor
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|e| e.value().name() == "li")
    }
}

/// The first `a` that is a direct child of `item`
fn direct_anchor(item: ElementRef<'_>) -> Option<ElementRef<'_>> {
    item.children()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == "a")
}

/// Nested `ul` children plus an immediately following sibling `ul`
fn child_lists(item: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    let mut lists: Vec<ElementRef> = item
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|e| e.value().name() == "ul")
        .collect();

    let adjacent = item.next_siblings().find_map(ElementRef::wrap);
    if let Some(sibling) = adjacent.filter(|e| e.value().name() == "ul") {
        lists.push(sibling);
    }

    lists
}

/// Direct `li` children of a list
fn list_items(list: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    list.children()
        .filter_map(ElementRef::wrap)
        .filter(|e| e.value().name() == "li")
}
