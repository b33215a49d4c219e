//! Step graph for the order form wizard.
//!
//! Derives per-step state (has data, completed, accessible) from a
//! [`FormDraft`] and an ordered step list. Every function takes the step
//! list as a parameter so filtered views (see [`visible_steps`]) go through
//! the same rules as the full catalog.

use serde::Serialize;

use crate::catalog::UNIT_ORDER_PACKAGE;
use crate::error::CoreError;
use crate::form::FormDraft;

// ---------------------------------------------------------------------------
// Step catalog
// ---------------------------------------------------------------------------

pub const STEP_LEAD: &str = "lead";
pub const STEP_COMMUNICATION: &str = "communication";
pub const STEP_PACKAGE: &str = "package";
pub const STEP_BY_DOZEN: &str = "by-dozen";
pub const STEP_DESIGN: &str = "design";
pub const STEP_PICKUP: &str = "pickup";
pub const STEP_REFERRAL: &str = "referral";
pub const STEP_REVIEW: &str = "review";

/// One page of the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepDefinition {
    pub id: &'static str,
    pub title: &'static str,
}

/// The full, ordered step catalog.
pub const STEPS: &[StepDefinition] = &[
    StepDefinition {
        id: STEP_LEAD,
        title: "Your Info",
    },
    StepDefinition {
        id: STEP_COMMUNICATION,
        title: "Contact Preference",
    },
    StepDefinition {
        id: STEP_PACKAGE,
        title: "Choose a Package",
    },
    StepDefinition {
        id: STEP_BY_DOZEN,
        title: "Order by the Dozen",
    },
    StepDefinition {
        id: STEP_DESIGN,
        title: "Design Details",
    },
    StepDefinition {
        id: STEP_PICKUP,
        title: "Pickup",
    },
    StepDefinition {
        id: STEP_REFERRAL,
        title: "How Did You Hear About Us",
    },
    StepDefinition {
        id: STEP_REVIEW,
        title: "Review & Submit",
    },
];

/// Check whether `step_id` names a step in `steps`.
pub fn is_known_step(step_id: &str, steps: &[StepDefinition]) -> bool {
    steps.iter().any(|s| s.id == step_id)
}

/// Validate a step id against `steps`.
pub fn validate_step_id(step_id: &str, steps: &[StepDefinition]) -> Result<(), CoreError> {
    if is_known_step(step_id, steps) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!("Unknown form step '{step_id}'")))
    }
}

/// Steps shown in navigation for `form`.
///
/// The `by-dozen` step only applies when the unit-order package is selected.
pub fn visible_steps(steps: &[StepDefinition], form: &FormDraft) -> Vec<StepDefinition> {
    steps
        .iter()
        .filter(|s| s.id != STEP_BY_DOZEN || form.package_type == UNIT_ORDER_PACKAGE)
        .copied()
        .collect()
}

// ---------------------------------------------------------------------------
// Per-step predicates
// ---------------------------------------------------------------------------

fn filled(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Whether the fields owned by `step_id` hold meaningful data.
///
/// Unknown step ids never have data.
pub fn has_step_data(step_id: &str, form: &FormDraft) -> bool {
    match step_id {
        STEP_LEAD => filled(&form.first_name) && filled(&form.last_name) && filled(&form.email),
        STEP_COMMUNICATION => filled(&form.communication_method),
        STEP_PACKAGE => filled(&form.package_type),
        STEP_BY_DOZEN => {
            form.package_type == UNIT_ORDER_PACKAGE && !form.quantities.is_empty()
        }
        STEP_DESIGN => {
            filled(&form.color_scheme)
                || filled(&form.event_type)
                || filled(&form.theme)
                || filled(&form.additional_designs)
                || !form.selected_designs.is_empty()
        }
        STEP_PICKUP => filled(&form.pickup_date) && filled(&form.pickup_time),
        STEP_REFERRAL => filled(&form.referral_source),
        STEP_REVIEW => form.terms_accepted,
        _ => false,
    }
}

/// A step is completed once it has data or the user has visited it.
///
/// Visiting counts because several steps are optional and have no data
/// until the user chooses to enter some.
pub fn is_step_completed(step_id: &str, form: &FormDraft) -> bool {
    has_step_data(step_id, form) || form.visited_steps.contains(step_id)
}

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

/// Position of a step relative to the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Completed,
    Current,
    Pending,
}

/// Navigation status of the step at `index`. Independent of form data.
pub fn step_status(index: usize, current_index: usize) -> StepStatus {
    match index.cmp(&current_index) {
        std::cmp::Ordering::Less => StepStatus::Completed,
        std::cmp::Ordering::Equal => StepStatus::Current,
        std::cmp::Ordering::Greater => StepStatus::Pending,
    }
}

/// Whether the user may jump to the step at `index`.
///
/// Going back is always allowed. Going forward requires every step from
/// `current_index` up to (not including) `index` to be completed; one gap
/// blocks everything after it.
pub fn is_step_accessible(
    index: usize,
    steps: &[StepDefinition],
    current_index: usize,
    form: &FormDraft,
) -> bool {
    if index <= current_index {
        return true;
    }
    if index >= steps.len() {
        return false;
    }
    steps[current_index..index]
        .iter()
        .all(|s| is_step_completed(s.id, form))
}

/// Number of completed steps, for progress display only.
pub fn completed_steps_count(steps: &[StepDefinition], form: &FormDraft) -> usize {
    steps
        .iter()
        .filter(|s| is_step_completed(s.id, form))
        .count()
}

/// Map an index in `visible` to the same step's index in `all`.
///
/// Returns `visible_index` unchanged when it cannot be mapped.
pub fn full_step_index(
    visible_index: usize,
    visible: &[StepDefinition],
    all: &[StepDefinition],
) -> usize {
    visible
        .get(visible_index)
        .and_then(|step| all.iter().position(|s| s.id == step.id))
        .unwrap_or(visible_index)
}

/// Map an index in `all` to the same step's index in `visible`.
///
/// Returns `full_index` unchanged when it cannot be mapped.
pub fn visible_step_index(
    full_index: usize,
    all: &[StepDefinition],
    visible: &[StepDefinition],
) -> usize {
    all.get(full_index)
        .and_then(|step| visible.iter().position(|s| s.id == step.id))
        .unwrap_or(full_index)
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Derived state of one step, as shown by the wizard's progress bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepState {
    pub id: &'static str,
    pub title: &'static str,
    pub status: StepStatus,
    pub has_data: bool,
    pub completed: bool,
    pub accessible: bool,
}

/// Derive the state of every step in `steps`.
pub fn step_states(
    steps: &[StepDefinition],
    current_index: usize,
    form: &FormDraft,
) -> Vec<StepState> {
    steps
        .iter()
        .enumerate()
        .map(|(i, s)| StepState {
            id: s.id,
            title: s.title,
            status: step_status(i, current_index),
            has_data: has_step_data(s.id, form),
            completed: is_step_completed(s.id, form),
            accessible: is_step_accessible(i, steps, current_index, form),
        })
        .collect()
}
