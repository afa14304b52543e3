use url::Url;

/// Resolves a link href to an absolute, canonical URL
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - fragment-only links
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
///
/// # Arguments
///
/// * `href` - The raw attribute value
/// * `base_url` - The URL of the page the anchor was found on
///
/// # Examples
///
/// ```
/// use portal_mirror::links::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("https://portal.example.com/Portal/ViewArticle.aspx?oid=1").unwrap();
/// let url = resolve_link("Show.aspx?oid=7#top", &base).unwrap();
/// assert_eq!(url.as_str(), "https://portal.example.com/Portal/Show.aspx?oid=7");
/// ```
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:")
    {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
        Some(canonicalize(absolute_url))
    } else {
        None
    }
}

/// Canonical form used as node and resource identity
///
/// Parsing already lowercases the host and drops default ports; the fragment
/// never changes which document is served, so it is removed too.
pub fn canonicalize(mut url: Url) -> Url {
    url.set_fragment(None);
    url
}
