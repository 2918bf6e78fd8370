//! Service context bundling all port trait objects.

use std::sync::Arc;

use crate::adapters::live::clock::LiveClock;
use crate::adapters::live::fetch::LiveFetcher;
use crate::adapters::live::llm::LiveLlmClient;
use crate::adapters::live::notify::WebhookNotifier;
use crate::ports::clock::Clock;
use crate::ports::fetch::PageFetcher;
use crate::ports::llm::LlmClient;
use crate::ports::notify::Notifier;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. The fetcher is
/// shared (`Arc`) because the scheduler hands it to every worker.
pub struct ServiceContext {
    /// Clock for timestamping run reports.
    pub clock: Box<dyn Clock>,
    /// Fetcher for target page content.
    pub fetcher: Arc<dyn PageFetcher>,
    /// LLM client for spec compilation and diagnosis.
    pub llm: Box<dyn LlmClient>,
    /// Notification transports for dispatch.
    pub notifier: Box<dyn Notifier>,
}

impl ServiceContext {
    /// Creates a live context with real adapters for every port.
    #[must_use]
    pub fn live() -> Self {
        Self {
            clock: Box::new(LiveClock),
            fetcher: Arc::new(LiveFetcher::new()),
            llm: Box::new(LiveLlmClient::new()),
            notifier: Box::new(WebhookNotifier::from_env()),
        }
    }
}
