//! Page fetcher port for retrieving target content.
//!
//! Fetch failures are classified at this boundary so the verifier can turn
//! them into stable, machine-readable failure codes without inspecting
//! transport-specific error types.

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

/// Boxed future type alias used by [`PageFetcher`] to keep the trait dyn-compatible.
pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<FetchedPage, FetchError>> + Send + 'a>>;

/// The decoded body and final status of a fetched page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// HTTP status code after redirects have been followed.
    pub status: u16,
    /// Response body decoded as text.
    pub body: String,
}

/// A classified fetch failure.
///
/// Each variant maps to one `FETCH_ERROR:<kind>` verdict failure code.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// The request exceeded its time budget.
    #[error("request timed out")]
    Timeout,
    /// A connection to the host could not be established.
    #[error("connection failed: {0}")]
    Connect(String),
    /// Any other transport failure (DNS, TLS, malformed response, ...).
    #[error("request failed: {0}")]
    Request(String),
}

impl FetchError {
    /// The short class name embedded in verdict failure codes.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout => "Timeout",
            Self::Connect(_) => "Connect",
            Self::Request(_) => "Request",
        }
    }
}

/// Fetches target page content for verification.
pub trait PageFetcher: Send + Sync {
    /// Fetches the given URL once, following redirects, and returns the
    /// decoded body with its final status. No retries at this layer.
    fn fetch(&self, url: &str) -> FetchFuture<'_>;
}
