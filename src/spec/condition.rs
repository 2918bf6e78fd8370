//! Conditional branching rules.

use serde::{Deserialize, Serialize};

use super::action::Action;

/// The verification outcome a condition fires on.
///
/// The trigger is the condition's discriminant: at most one condition per
/// trigger value is meaningful on a check, and the two are mutually
/// exclusive by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Trigger {
    /// Fires when every target passed.
    OnPass,
    /// Fires when at least one target failed.
    OnFail,
}

/// A declarative rule mapping a pass/fail trigger to an action list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// The outcome this condition fires on.
    pub trigger: Trigger,
    /// Actions to dispatch when the condition is chosen. Never empty in a
    /// valid spec.
    pub actions: Vec<Action>,
}
