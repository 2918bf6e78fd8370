//! Notification transport port.
//!
//! One method per action variant: the dispatch layer maps each selected
//! action to exactly one transport call. Credentials and endpoint URLs that
//! are environment-scoped (chat webhook, mail gateway) live inside the
//! adapter, never in the spec.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

/// Boxed future type alias used by [`Notifier`] to keep the trait dyn-compatible.
pub type NotifyFuture<'a> =
    Pin<Box<dyn Future<Output = Result<(), Box<dyn Error + Send + Sync>>> + Send + 'a>>;

/// Delivers notifications to external channels.
pub trait Notifier: Send + Sync {
    /// Posts a text message to the chat channel's configured webhook.
    ///
    /// # Errors
    ///
    /// Returns an error if no chat webhook is configured or delivery fails.
    fn post_chat(&self, channel: &str, text: &str) -> NotifyFuture<'_>;

    /// Triggers an external automation webhook with a JSON payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the webhook rejects the payload.
    fn trigger_webhook(&self, url: &str, payload: &serde_json::Value) -> NotifyFuture<'_>;

    /// Sends a plain-text message through the configured mail gateway.
    ///
    /// # Errors
    ///
    /// Returns an error if no gateway is configured or delivery fails.
    fn send_email(&self, to: &str, subject: &str, text: &str) -> NotifyFuture<'_>;
}
