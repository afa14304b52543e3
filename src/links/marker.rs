use url::Url;

/// Checks whether `href` contains `marker` as a complete token
///
/// A marker that ends in an alphanumeric character must not be followed by
/// another alphanumeric one, so `oid=59` does not match `oid=5931`. Markers
/// ending in a delimiter such as `oid=` match any continuation.
///
/// # Examples
///
/// ```
/// use portal_mirror::links::contains_marker;
///
/// assert!(contains_marker("ViewArticle.aspx?oid=5931", "ViewArticle.aspx?oid="));
/// assert!(contains_marker("ViewArticle.aspx?oid=5931&x=1", "ViewArticle.aspx?oid=5931"));
/// assert!(!contains_marker("ViewArticle.aspx?oid=59310", "ViewArticle.aspx?oid=5931"));
/// ```
pub fn contains_marker(href: &str, marker: &str) -> bool {
    if marker.is_empty() {
        return false;
    }

    let needs_boundary = marker
        .chars()
        .last()
        .map(|c| c.is_ascii_alphanumeric())
        .unwrap_or(false);

    href.match_indices(marker).any(|(start, _)| {
        if !needs_boundary {
            return true;
        }
        href[start + marker.len()..]
            .chars()
            .next()
            .map(|next| !next.is_ascii_alphanumeric())
            .unwrap_or(true)
    })
}

/// Derives the marker that identifies the tree root anchor in the menu
///
/// This is the last path segment plus the query of the root URL, e.g.
/// `ViewArticle.aspx?oid=5931`, so relative and absolute hrefs both match.
pub fn tree_root_marker(root_url: &Url) -> String {
    let segment = root_url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or("");

    match root_url.query() {
        Some(query) => format!("{}?{}", segment, query),
        None => segment.to_string(),
    }
}
