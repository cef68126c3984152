//! Shared crawl-time types: URL normalization.

use url::Url;

/// Normalizes a URL per the data model: lowercase host, default path `/`,
/// query preserved, fragment stripped.
pub fn normalize_url(url: &Url) -> Url {
    let mut normalized = url.clone();
    normalized.set_fragment(None);
    if normalized.path().is_empty() {
        normalized.set_path("/");
    }
    let _ = normalized.set_host(normalized.host_str().map(|h| h.to_lowercase()).as_deref());
    normalized
}
