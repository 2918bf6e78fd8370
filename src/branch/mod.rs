//! Branch selection: which actions fire for a verification outcome.

use tracing::debug;

use crate::spec::{Action, Trigger, WorkflowSpec};
use crate::verify::Summary;

/// The chosen branch: the trigger that fired and the actions to dispatch.
///
/// A derived, read-only view; selecting a branch never mutates the spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Which trigger the outcome matched. Reported even when no explicit
    /// condition existed and the default actions were chosen.
    pub trigger: Trigger,
    /// The actions to dispatch. Non-empty whenever the spec validated.
    pub actions: Vec<Action>,
}

/// Picks the action set for a verification summary.
///
/// A failing summary selects the primary check's `OnFail` condition if one
/// exists; a fully-passing summary selects its `OnPass` condition. With no
/// matching condition the spec's default actions apply, with the trigger
/// still reported from the outcome for observability. Total: always returns
/// a selection.
#[must_use]
pub fn select(spec: &WorkflowSpec, summary: &Summary) -> Selection {
    let trigger = if summary.any_failed() { Trigger::OnFail } else { Trigger::OnPass };

    if let Some(check) = spec.checks.first() {
        if let Some(condition) = check.conditions.iter().find(|c| c.trigger == trigger) {
            debug!(?trigger, actions = condition.actions.len(), "explicit condition matched");
            return Selection { trigger, actions: condition.actions.clone() };
        }
    }

    debug!(?trigger, actions = spec.actions.len(), "no condition matched, using defaults");
    Selection { trigger, actions: spec.actions.clone() }
}
