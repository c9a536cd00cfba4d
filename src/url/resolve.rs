//! Link resolution against the page a link appeared on

use crate::ResolveError;
use url::Url;

/// Resolves a raw href against the URL of the page it was extracted from.
///
/// Checks run in a fixed order: bare fragments are rejected before any
/// parsing, then the base must parse as an absolute URL, then the join must
/// succeed. The resolved URL has its fragment stripped so that anchor
/// variants of the same page collapse to one crawl target. An empty href
/// resolves to the page itself. Only `http` and `https` results survive;
/// every other scheme is rejected.
///
/// # Arguments
///
/// * `base` - Absolute URL of the page the href was found on
/// * `href` - Raw attribute value as it appeared in the document
///
/// # Returns
///
/// The absolute URL as a string, or the [`ResolveError`] describing which
/// check refused it.
pub fn resolve(base: &str, href: &str) -> Result<String, ResolveError> {
    if href.starts_with('#') {
        return Err(ResolveError::SelfFragment);
    }

    let base = Url::parse(base).map_err(|e| ResolveError::InvalidBase(e.to_string()))?;
    let mut resolved = base
        .join(href)
        .map_err(|e| ResolveError::Join(e.to_string()))?;
    resolved.set_fragment(None);

    match resolved.scheme() {
        "http" | "https" => Ok(resolved.to_string()),
        other => Err(ResolveError::DisallowedScheme(other.to_string())),
    }
}
