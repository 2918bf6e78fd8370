//! Live adapter for the `PageFetcher` port using `reqwest`.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::Client;
use tracing::debug;

use crate::ports::fetch::{FetchError, FetchFuture, FetchedPage, PageFetcher};

// Some storefront CDNs reject non-browser user agents outright.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Live page fetcher with browser-like request headers.
///
/// Redirects are followed automatically; the final status code is reported
/// on the returned page. The fetcher applies no time budget of its own;
/// the scheduler's shared deadline governs every in-flight request.
pub struct LiveFetcher {
    client: Client,
}

impl LiveFetcher {
    /// Creates a new live fetcher.
    #[must_use]
    pub fn new() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = Client::builder().default_headers(headers).build().unwrap_or_default();
        Self { client }
    }
}

impl Default for LiveFetcher {
    fn default() -> Self {
        Self::new()
    }
}

fn classify(err: &reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else if err.is_connect() {
        FetchError::Connect(err.to_string())
    } else {
        FetchError::Request(err.to_string())
    }
}

impl PageFetcher for LiveFetcher {
    fn fetch(&self, url: &str) -> FetchFuture<'_> {
        let url = url.to_string();
        let client = self.client.clone();

        Box::pin(async move {
            let response = client.get(&url).send().await.map_err(|e| classify(&e))?;
            let status = response.status().as_u16();
            let body = response.text().await.map_err(|e| classify(&e))?;
            debug!(url = %url, status, bytes = body.len(), "fetched target page");
            Ok(FetchedPage { status, body })
        })
    }
}
