//! Best-effort sitemap seeding, run once per seed host before the main loop.

use riptide_fetch::Fetcher;
use tracing::debug;
use url::Url;
use xml::reader::{EventReader, XmlEvent};

/// URLs found in one level of `sitemap.xml`/`sitemap index.xml`.
pub struct SitemapSeeder;

impl SitemapSeeder {
    /// Fetches and parses `https://{host}/sitemap.xml`, following one level
    /// of `<sitemap><loc>` index nesting. Any failure — missing file, parse
    /// error, timeout — yields an empty list; seeding is best-effort and
    /// always falls back to the explicit seed URLs.
    pub async fn discover(fetcher: &Fetcher, host: &str) -> Vec<Url> {
        let top = format!("https://{host}/sitemap.xml");
        let mut urls = Self::fetch_locs(fetcher, &top).await;

        if urls.is_empty() {
            return urls;
        }

        // If the top-level document was a sitemap index (its <loc> entries
        // are themselves sitemaps), follow one level of nesting.
        if urls.iter().all(|u| u.path().ends_with(".xml")) {
            let mut nested = Vec::new();
            for child in &urls {
                nested.extend(Self::fetch_locs(fetcher, child.as_str()).await);
            }
            if !nested.is_empty() {
                urls = nested;
            }
        }

        urls
    }

    async fn fetch_locs(fetcher: &Fetcher, url: &str) -> Vec<Url> {
        let body = match fetcher.fetch(url, None).await {
            Ok(resp) if resp.is_success() => resp.body,
            Ok(_) => return Vec::new(),
            Err(e) => {
                debug!(url, error = %e, "sitemap fetch failed");
                return Vec::new();
            }
        };
        let text = String::from_utf8_lossy(&body);
        Self::parse_locs(&text)
    }

    fn parse_locs(xml: &str) -> Vec<Url> {
        let parser = EventReader::from_str(xml);
        let mut urls = Vec::new();
        let mut in_loc = false;

        for event in parser {
            match event {
                Ok(XmlEvent::StartElement { name, .. }) if name.local_name == "loc" => {
                    in_loc = true;
                }
                Ok(XmlEvent::EndElement { name }) if name.local_name == "loc" => {
                    in_loc = false;
                }
                Ok(XmlEvent::Characters(data)) if in_loc => {
                    if let Ok(url) = Url::parse(data.trim()) {
                        urls.push(url);
                    }
                }
                Err(_) => break,
                _ => {}
            }
        }

        urls
    }
}
