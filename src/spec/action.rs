//! Notification action variants.

use serde::{Deserialize, Serialize};

/// A notification action selected by the branch selector.
///
/// A closed set: each variant maps to exactly one transport call in the
/// dispatch layer. Variants carry channel data only; credentials and
/// endpoint secrets are environment-scoped inside the live adapters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Post a message to the configured chat webhook.
    #[serde(alias = "slack")]
    Chat {
        /// Channel name, informational (the webhook targets one channel).
        channel: String,
        /// Title line rendered above the per-target result bullets.
        template: String,
    },
    /// Trigger an external automation webhook with the run payload.
    Webhook {
        /// The webhook endpoint URL.
        url: String,
    },
    /// Send the rendered summary through the configured mail gateway.
    Email {
        /// Recipient address.
        to: String,
        /// Subject line, also used as the summary title.
        subject: String,
    },
}

impl Action {
    /// Short human-readable label used in delivery outcome rows.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Chat { channel, .. } => format!("chat:{channel}"),
            Self::Webhook { url } => format!("webhook:{url}"),
            Self::Email { to, .. } => format!("email:{to}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Action;

    #[test]
    fn serializes_with_type_tag() {
        let action = Action::Chat { channel: "#ops".into(), template: "results".into() };
        let json = serde_json::to_string(&action).unwrap();
        assert!(json.contains(r#""type":"chat""#));
    }

    #[test]
    fn accepts_legacy_slack_tag() {
        let action: Action =
            serde_json::from_str(r##"{"type":"slack","channel":"#ops","template":"t"}"##).unwrap();
        assert!(matches!(action, Action::Chat { .. }));
    }

    #[test]
    fn labels_identify_the_channel() {
        let action = Action::Email { to: "oncall@example.com".into(), subject: "s".into() };
        assert_eq!(action.label(), "email:oncall@example.com");
    }
}
