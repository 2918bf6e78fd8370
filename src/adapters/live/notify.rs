//! Live adapter for the `Notifier` port.
//!
//! All three transports are webhook-shaped. Endpoint URLs come from the
//! environment at construction time:
//!
//! - `SLACK_WEBHOOK_URL`: incoming webhook for chat notifications;
//! - `MAIL_GATEWAY_URL`: JSON endpoint of an operator-run mail bridge.
//!
//! Automation webhooks carry their URL in the action itself.

use std::env;

use reqwest::Client;
use serde_json::json;
use tracing::debug;

use crate::ports::notify::{Notifier, NotifyFuture};

/// Webhook-backed notifier for chat, automation, and mail channels.
pub struct WebhookNotifier {
    client: Client,
    chat_webhook: Option<String>,
    mail_gateway: Option<String>,
}

impl WebhookNotifier {
    /// Creates a notifier reading endpoint URLs from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            client: Client::new(),
            chat_webhook: env::var("SLACK_WEBHOOK_URL").ok().filter(|v| !v.trim().is_empty()),
            mail_gateway: env::var("MAIL_GATEWAY_URL").ok().filter(|v| !v.trim().is_empty()),
        }
    }
}

impl Notifier for WebhookNotifier {
    fn post_chat(&self, channel: &str, text: &str) -> NotifyFuture<'_> {
        let channel = channel.to_string();
        let text = text.to_string();

        Box::pin(async move {
            let url = self.chat_webhook.as_deref().ok_or_else(|| {
                Box::<dyn std::error::Error + Send + Sync>::from(
                    "SLACK_WEBHOOK_URL environment variable not set",
                )
            })?;

            // The incoming-webhook endpoint already targets one channel; the
            // channel name from the action is informational only.
            debug!(channel = %channel, "posting chat notification");

            let response = self
                .client
                .post(url)
                .json(&json!({ "text": text }))
                .send()
                .await
                .map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("chat webhook request failed: {e}").into()
                })?;

            if response.status().is_success() {
                return Ok(());
            }

            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();

            // Older webhook endpoints reject JSON bodies; they expect a
            // form-encoded `payload=` field instead.
            if body.contains("invalid_payload") {
                let form = [("payload", json!({ "text": text }).to_string())];
                let retry = self.client.post(url).form(&form).send().await.map_err(
                    |e| -> Box<dyn std::error::Error + Send + Sync> {
                        format!("chat webhook form retry failed: {e}").into()
                    },
                )?;
                if retry.status().is_success() {
                    return Ok(());
                }
                let retry_status = retry.status().as_u16();
                let retry_body = retry.text().await.unwrap_or_default();
                return Err(
                    format!("chat form-encoded delivery failed: {retry_status} {retry_body}")
                        .into(),
                );
            }

            Err(format!("chat delivery failed: {status} {body}").into())
        })
    }

    fn trigger_webhook(&self, url: &str, payload: &serde_json::Value) -> NotifyFuture<'_> {
        let url = url.to_string();
        let payload = payload.clone();

        Box::pin(async move {
            let post = |target: String| {
                let client = self.client.clone();
                let payload = payload.clone();
                async move { client.post(&target).json(&payload).send().await }
            };

            let mut response =
                post(url.clone()).await.map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("webhook request failed: {e}").into()
                })?;

            // Automation hosts serve unactivated workflows on a test path;
            // retry there when the production path is not registered.
            if response.status().as_u16() == 404 && url.contains("/webhook/") {
                let test_url = url.replace("/webhook/", "/webhook-test/");
                debug!(url = %test_url, "production webhook missing, retrying test path");
                response = post(test_url).await.map_err(
                    |e| -> Box<dyn std::error::Error + Send + Sync> {
                        format!("webhook test-path retry failed: {e}").into()
                    },
                )?;
            }

            if response.status().is_success() {
                Ok(())
            } else {
                let status = response.status().as_u16();
                let body = response.text().await.unwrap_or_default();
                Err(format!("webhook delivery failed: {status} {body}").into())
            }
        })
    }

    fn send_email(&self, to: &str, subject: &str, text: &str) -> NotifyFuture<'_> {
        let to = to.to_string();
        let subject = subject.to_string();
        let text = text.to_string();

        Box::pin(async move {
            let url = self.mail_gateway.as_deref().ok_or_else(|| {
                Box::<dyn std::error::Error + Send + Sync>::from(
                    "MAIL_GATEWAY_URL environment variable not set",
                )
            })?;

            let response = self
                .client
                .post(url)
                .json(&json!({ "to": to, "subject": subject, "text": text }))
                .send()
                .await
                .map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("mail gateway request failed: {e}").into()
                })?;

            if response.status().is_success() {
                Ok(())
            } else {
                let status = response.status().as_u16();
                let body = response.text().await.unwrap_or_default();
                Err(format!("mail delivery failed: {status} {body}").into())
            }
        })
    }
}
