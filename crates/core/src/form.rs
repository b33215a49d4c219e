//! In-memory representation of a customer's in-progress order form.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{FormId, Timestamp};

// ---------------------------------------------------------------------------
// Form status
// ---------------------------------------------------------------------------

/// Lifecycle status of an order form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormStatus {
    Draft,
    Submitted,
}

impl FormStatus {
    /// Parse a status string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "draft" => Ok(Self::Draft),
            "submitted" => Ok(Self::Submitted),
            _ => Err(CoreError::Validation(format!(
                "Invalid form status '{s}'. Must be one of: draft, submitted"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
        }
    }
}

// ---------------------------------------------------------------------------
// Treat quantities
// ---------------------------------------------------------------------------

/// Dozens ordered per treat on the `by-dozen` step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreatQuantities {
    pub cake_pops: u32,
    pub cupcakes: u32,
    pub cookies: u32,
    pub pretzel_rods: u32,
}

/// Largest count a single treat may hold. Counts are stored as `INTEGER`.
pub const MAX_TREAT_QUANTITY: u32 = i32::MAX as u32;

impl TreatQuantities {
    fn counts(&self) -> [u32; 4] {
        [self.cake_pops, self.cupcakes, self.cookies, self.pretzel_rods]
    }

    /// Total dozens across all treats, saturating at `u32::MAX`.
    pub fn total(&self) -> u32 {
        self.counts()
            .iter()
            .fold(0u32, |acc, &q| acc.saturating_add(q))
    }

    pub fn is_empty(&self) -> bool {
        self.counts().iter().all(|&q| q == 0)
    }

    /// Reject counts that cannot be stored.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.counts().iter().any(|&q| q > MAX_TREAT_QUANTITY) {
            return Err(CoreError::Validation(format!(
                "Treat quantities must not exceed {MAX_TREAT_QUANTITY}"
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Form draft
// ---------------------------------------------------------------------------

/// A customer's order form.
///
/// String fields use the empty string for "not chosen yet" and are never
/// null in memory. `visited_steps` is a set; it keeps insertion order so
/// its serialized form is stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDraft {
    pub id: FormId,

    // Contact
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub communication_method: String,

    // Order
    pub package_type: String,
    pub quantities: TreatQuantities,

    // Design
    pub color_scheme: String,
    pub event_type: String,
    pub theme: String,
    pub additional_designs: String,
    pub selected_designs: Vec<String>,

    // Pickup
    pub pickup_date: String,
    pub pickup_time: String,
    pub rush_order: bool,

    pub referral_source: String,
    pub terms_accepted: bool,

    pub visited_steps: IndexSet<String>,

    pub current_step: u32,
    pub order_number: Option<String>,
    pub status: Option<FormStatus>,
    pub submitted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl FormDraft {
    /// Start a new, empty draft with a freshly generated id.
    pub fn new(now: Timestamp) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            communication_method: String::new(),
            package_type: String::new(),
            quantities: TreatQuantities::default(),
            color_scheme: String::new(),
            event_type: String::new(),
            theme: String::new(),
            additional_designs: String::new(),
            selected_designs: Vec::new(),
            pickup_date: String::new(),
            pickup_time: String::new(),
            rush_order: false,
            referral_source: String::new(),
            terms_accepted: false,
            visited_steps: IndexSet::new(),
            current_step: 0,
            order_number: None,
            status: Some(FormStatus::Draft),
            submitted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record that the user navigated to `step_id`. Returns `true` if newly added.
    pub fn visit_step(&mut self, step_id: &str) -> bool {
        self.visited_steps.insert(step_id.to_string())
    }
}
