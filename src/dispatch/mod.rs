//! Action dispatch: rendering the alert payload and delivering it.
//!
//! The engine's obligation ends at producing the ordered action list and the
//! rendered summary; transport mechanics live behind the [`Notifier`] port.
//! Delivery is best-effort per channel: one failing channel never blocks
//! the others, and the run counts as delivered if any channel succeeded.

use serde_json::json;
use tracing::{debug, warn};

use crate::ports::notify::Notifier;
use crate::spec::Action;
use crate::verify::{Summary, Verdict};

/// The sentinel line used when no target failed.
pub const ALL_PASSED_LINE: &str = "All checks passed ✅";

/// Per-action delivery outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryOutcome {
    /// Label identifying the action and channel.
    pub action: String,
    /// Whether delivery succeeded.
    pub ok: bool,
    /// Transport detail: `"delivered"` or the error text.
    pub detail: String,
}

/// Renders the alert text: a title line, a blank line, then one bullet per
/// failed target, or the all-passed sentinel when nothing failed.
#[must_use]
pub fn render_alert_text(title: &str, verdicts: &[Verdict]) -> String {
    let failed: Vec<&Verdict> = verdicts.iter().filter(|v| !v.passed).collect();
    let lines: Vec<String> = if failed.is_empty() {
        vec![ALL_PASSED_LINE.to_string()]
    } else {
        failed.iter().map(|v| format!("• {} — {}", v.url, v.failures.join(", "))).collect()
    };
    format!("{title}\n\n{}", lines.join("\n"))
}

/// Builds the JSON payload posted to automation webhooks.
#[must_use]
pub fn build_payload(title: &str, verdicts: &[Verdict], summary: &Summary) -> serde_json::Value {
    json!({ "title": title, "report": verdicts, "summary": summary })
}

/// Dispatches the selected actions in order, best-effort.
///
/// Each action variant maps to exactly one transport call. Chat and email
/// actions carry their own title (template/subject); the default title
/// applies to the webhook payload.
pub async fn dispatch_actions(
    notifier: &dyn Notifier,
    actions: &[Action],
    title: &str,
    verdicts: &[Verdict],
    summary: &Summary,
) -> Vec<DeliveryOutcome> {
    let mut outcomes = Vec::with_capacity(actions.len());

    for action in actions {
        let result = match action {
            Action::Chat { channel, template } => {
                let text = render_alert_text(template, verdicts);
                notifier.post_chat(channel, &text).await
            }
            Action::Webhook { url } => {
                let payload = build_payload(title, verdicts, summary);
                notifier.trigger_webhook(url, &payload).await
            }
            Action::Email { to, subject } => {
                let text = render_alert_text(subject, verdicts);
                notifier.send_email(to, subject, &text).await
            }
        };

        let outcome = match result {
            Ok(()) => {
                debug!(action = %action.label(), "delivered");
                DeliveryOutcome { action: action.label(), ok: true, detail: "delivered".into() }
            }
            Err(err) => {
                warn!(action = %action.label(), error = %err, "delivery failed");
                DeliveryOutcome { action: action.label(), ok: false, detail: err.to_string() }
            }
        };
        outcomes.push(outcome);
    }

    outcomes
}

/// True when at least one channel delivered.
#[must_use]
pub fn any_delivered(outcomes: &[DeliveryOutcome]) -> bool {
    outcomes.iter().any(|o| o.ok)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::notify::NotifyFuture;
    use std::sync::Mutex;

    /// Notifier double recording calls; chat fails, others succeed.
    struct FlakyNotifier {
        calls: Mutex<Vec<String>>,
        chat_fails: bool,
    }

    impl FlakyNotifier {
        fn new(chat_fails: bool) -> Self {
            Self { calls: Mutex::new(Vec::new()), chat_fails }
        }
    }

    impl Notifier for FlakyNotifier {
        fn post_chat(&self, channel: &str, _text: &str) -> NotifyFuture<'_> {
            self.calls.lock().unwrap().push(format!("chat:{channel}"));
            let fails = self.chat_fails;
            Box::pin(async move {
                if fails {
                    Err("chat delivery failed: 500".into())
                } else {
                    Ok(())
                }
            })
        }

        fn trigger_webhook(&self, url: &str, _payload: &serde_json::Value) -> NotifyFuture<'_> {
            self.calls.lock().unwrap().push(format!("webhook:{url}"));
            Box::pin(async move { Ok(()) })
        }

        fn send_email(&self, to: &str, _subject: &str, _text: &str) -> NotifyFuture<'_> {
            self.calls.lock().unwrap().push(format!("email:{to}"));
            Box::pin(async move { Ok(()) })
        }
    }

    fn failing_verdict(url: &str) -> Verdict {
        Verdict::from_failures(url, vec!["MISSING:Price".into(), "MISSING:AddToCart".into()], 7, None)
    }

    fn passing_verdict(url: &str) -> Verdict {
        Verdict::from_failures(url, vec![], 5, None)
    }

    #[test]
    fn renders_a_bullet_per_failed_target() {
        let verdicts = vec![
            passing_verdict("https://shop.example.com/products/a"),
            failing_verdict("https://shop.example.com/products/b"),
        ];

        let text = render_alert_text("PDP Guard results", &verdicts);

        assert!(text.starts_with("PDP Guard results\n\n"));
        assert!(text.contains(
            "• https://shop.example.com/products/b — MISSING:Price, MISSING:AddToCart"
        ));
        assert!(!text.contains("products/a —"));
    }

    #[test]
    fn renders_sentinel_when_all_passed() {
        let verdicts = vec![passing_verdict("https://shop.example.com/products/a")];
        let text = render_alert_text("PDP Guard results", &verdicts);
        assert_eq!(text, format!("PDP Guard results\n\n{ALL_PASSED_LINE}"));
    }

    #[tokio::test]
    async fn dispatches_every_action_in_order() {
        let notifier = FlakyNotifier::new(false);
        let actions = vec![
            Action::Chat { channel: "#ops".into(), template: "results".into() },
            Action::Webhook { url: "https://hooks.example.com/run".into() },
            Action::Email { to: "oncall@example.com".into(), subject: "PDP".into() },
        ];
        let verdicts = vec![failing_verdict("https://shop.example.com/products/a")];
        let summary = Summary::from_verdicts(&verdicts);

        let outcomes =
            dispatch_actions(&notifier, &actions, "PDP Guard", &verdicts, &summary).await;

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes.iter().all(|o| o.ok));
        assert_eq!(
            *notifier.calls.lock().unwrap(),
            vec!["chat:#ops", "webhook:https://hooks.example.com/run", "email:oncall@example.com"]
        );
    }

    #[tokio::test]
    async fn one_failed_channel_does_not_block_the_rest() {
        let notifier = FlakyNotifier::new(true);
        let actions = vec![
            Action::Chat { channel: "#ops".into(), template: "results".into() },
            Action::Webhook { url: "https://hooks.example.com/run".into() },
        ];
        let verdicts = vec![passing_verdict("https://shop.example.com/products/a")];
        let summary = Summary::from_verdicts(&verdicts);

        let outcomes =
            dispatch_actions(&notifier, &actions, "PDP Guard", &verdicts, &summary).await;

        assert!(!outcomes[0].ok);
        assert!(outcomes[1].ok);
        assert!(any_delivered(&outcomes));
    }

    #[test]
    fn no_successful_channel_means_not_delivered() {
        let outcomes = vec![DeliveryOutcome {
            action: "chat:#ops".into(),
            ok: false,
            detail: "500".into(),
        }];
        assert!(!any_delivered(&outcomes));
    }
}
