//! Product-page URL discovery.
//!
//! Crawls a single seed page and collects hrefs that look like product
//! detail pages, for operators who want a target list without writing one
//! by hand. Heuristic by design: it recognizes the common `/products/<slug>`
//! and `/product/<slug>` path shapes.

use std::collections::HashSet;
use std::error::Error;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::ports::fetch::PageFetcher;

static HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)href=["']([^"']+)["']"#).expect("hardwired pattern"));

static PDP_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/products?/[^/]+").expect("hardwired pattern"));

/// Discovers up to `max` product-page URLs linked from the seed page.
///
/// Protocol-relative and host-relative hrefs are normalized against the
/// seed's origin; fragment, `mailto:`, and `javascript:` hrefs are skipped.
/// Results are deduplicated in document order.
///
/// # Errors
///
/// Returns an error if the seed URL is malformed or the fetch fails.
pub async fn discover_product_urls(
    fetcher: &dyn PageFetcher,
    seed: &str,
    max: usize,
) -> Result<Vec<String>, Box<dyn Error + Send + Sync>> {
    let seed_url =
        reqwest::Url::parse(seed).map_err(|e| format!("seed URL is not absolute: {e}"))?;
    let origin = seed_url.origin().ascii_serialization();

    let page = fetcher.fetch(seed).await?;

    let mut seen = HashSet::new();
    let mut urls = Vec::new();
    for captures in HREF.captures_iter(&page.body) {
        let Some(href) = captures.get(1) else { continue };
        let href = href.as_str();
        if href.starts_with('#')
            || href.starts_with("mailto:")
            || href.starts_with("javascript:")
        {
            continue;
        }

        let absolute = if let Some(rest) = href.strip_prefix("//") {
            format!("https://{rest}")
        } else if href.starts_with('/') {
            format!("{origin}{href}")
        } else {
            href.to_string()
        };

        if PDP_PATH.is_match(&absolute) && seen.insert(absolute.clone()) {
            urls.push(absolute);
            if urls.len() >= max {
                break;
            }
        }
    }

    debug!(seed = %seed, found = urls.len(), "discovered product URLs");
    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::discover_product_urls;
    use crate::ports::fetch::{FetchFuture, FetchedPage, PageFetcher};

    struct FixedFetcher(String);

    impl PageFetcher for FixedFetcher {
        fn fetch(&self, _url: &str) -> FetchFuture<'_> {
            let body = self.0.clone();
            Box::pin(async move { Ok(FetchedPage { status: 200, body }) })
        }
    }

    const SEED: &str = "https://shop.example.com/collections/all";

    #[tokio::test]
    async fn normalizes_relative_and_protocol_relative_hrefs() {
        let fetcher = FixedFetcher(
            r#"<a href="/products/red-mug">Red</a>
               <a href="//cdn.example.com/products/blue-mug">Blue</a>
               <a href="https://shop.example.com/product/green-mug">Green</a>"#
                .into(),
        );

        let urls = discover_product_urls(&fetcher, SEED, 10).await.unwrap();

        assert_eq!(
            urls,
            vec![
                "https://shop.example.com/products/red-mug",
                "https://cdn.example.com/products/blue-mug",
                "https://shop.example.com/product/green-mug",
            ]
        );
    }

    #[tokio::test]
    async fn skips_non_product_and_non_navigable_hrefs() {
        let fetcher = FixedFetcher(
            r##"<a href="#reviews">Reviews</a>
               <a href="mailto:help@example.com">Help</a>
               <a href="javascript:void(0)">Menu</a>
               <a href="/pages/about">About</a>
               <a href="/products/only-real-one">Buy</a>"##
                .into(),
        );

        let urls = discover_product_urls(&fetcher, SEED, 10).await.unwrap();

        assert_eq!(urls, vec!["https://shop.example.com/products/only-real-one"]);
    }

    #[tokio::test]
    async fn dedupes_and_respects_the_cap() {
        let body: String = (0..5)
            .flat_map(|i| {
                let link = format!("<a href=\"/products/item-{i}\">x</a>");
                [link.clone(), link]
            })
            .collect();
        let fetcher = FixedFetcher(body);

        let urls = discover_product_urls(&fetcher, SEED, 3).await.unwrap();

        assert_eq!(urls.len(), 3);
        assert_eq!(urls[0], "https://shop.example.com/products/item-0");
    }

    #[tokio::test]
    async fn rejects_relative_seed() {
        let fetcher = FixedFetcher(String::new());
        let result = discover_product_urls(&fetcher, "/collections/all", 10).await;
        assert!(result.is_err());
    }
}
