//! Leaf resource extraction from article pages

use crate::crawler::node::LeafResource;
use crate::links::{contains_marker, resolve_link};
use crate::render::PageLink;
use std::collections::HashSet;
use url::Url;

/// Name used for resources whose anchor has no text
pub const FALLBACK_RESOURCE_NAME: &str = "soubor";

/// Turns the anchors reported for the resource selector into leaf resources
///
/// Hrefs are resolved against `page_url`; only URLs that still carry
/// `resource_marker` after resolution are kept. Duplicates (by resolved URL)
/// keep their first occurrence and document order is preserved.
///
/// # Arguments
///
/// * `links` - Anchors matching the resource selector, in document order
/// * `page_url` - URL of the page the anchors were read from
/// * `resource_marker` - Substring identifying the resource-view endpoint
pub fn find_resources(
    links: &[PageLink],
    page_url: &Url,
    resource_marker: &str,
) -> Vec<LeafResource> {
    let mut seen = HashSet::new();
    let mut resources = Vec::new();

    for link in links {
        let Some(url) = resolve_link(&link.href, page_url) else {
            tracing::debug!("Skipping unresolvable resource link '{}'", link.href);
            continue;
        };

        if !contains_marker(url.as_str(), resource_marker) {
            continue;
        }

        if !seen.insert(url.clone()) {
            continue;
        }

        let text = link.text.trim();
        let suggested_name = if text.is_empty() {
            FALLBACK_RESOURCE_NAME.to_string()
        } else {
            text.to_string()
        };

        resources.push(LeafResource {
            url,
            suggested_name,
        });
    }

    resources
}
