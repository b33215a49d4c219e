//! Conversion between [`FormDraft`] and its `order_forms` row.
//!
//! Frequently queried fields are columns; the rest go into the `details`
//! JSONB blob together with the visited-step list. Unset string choices are
//! stored as NULL and come back as empty strings. A malformed blob never
//! fails a read: the bad field is logged and replaced with its default.

use indexmap::IndexSet;
use serde_json::{json, Map, Value};
use sugarloaf_core::form::{FormDraft, FormStatus, TreatQuantities};
use sugarloaf_core::order_number::DATE_FORMAT;
use sugarloaf_core::types::DbId;

use crate::models::order_form::OrderFormRow;

pub const DETAILS_COLOR_SCHEME: &str = "color_scheme";
pub const DETAILS_EVENT_TYPE: &str = "event_type";
pub const DETAILS_THEME: &str = "theme";
pub const DETAILS_ADDITIONAL_DESIGNS: &str = "additional_designs";
pub const DETAILS_TERMS_ACCEPTED: &str = "terms_accepted";
pub const DETAILS_VISITED_STEPS: &str = "visited_steps";

// ---------------------------------------------------------------------------
// FormDraft -> row
// ---------------------------------------------------------------------------

fn unset_to_null(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Counts above `i32::MAX` are rejected by `TreatQuantities::validate` before
/// they reach here; anything that slips through is clamped.
fn to_column_count(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Build the `details` blob for `form`.
pub fn details_blob(form: &FormDraft) -> Value {
    let visited: Vec<&str> = form.visited_steps.iter().map(String::as_str).collect();
    json!({
        DETAILS_COLOR_SCHEME: form.color_scheme,
        DETAILS_EVENT_TYPE: form.event_type,
        DETAILS_THEME: form.theme,
        DETAILS_ADDITIONAL_DESIGNS: form.additional_designs,
        DETAILS_TERMS_ACCEPTED: form.terms_accepted,
        DETAILS_VISITED_STEPS: visited,
    })
}

/// Convert a form into its storage row.
pub fn to_storage(form: &FormDraft, customer_id: Option<DbId>) -> OrderFormRow {
    let pickup_date = if form.pickup_date.is_empty() {
        None
    } else {
        match chrono::NaiveDate::parse_from_str(&form.pickup_date, DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(e) => {
                tracing::warn!(
                    form_id = %form.id,
                    pickup_date = %form.pickup_date,
                    error = %e,
                    "Unparseable pickup date stored as unset"
                );
                None
            }
        }
    };

    OrderFormRow {
        id: form.id.clone(),
        customer_id,
        first_name: form.first_name.clone(),
        last_name: form.last_name.clone(),
        email: form.email.clone(),
        phone: form.phone.clone(),
        communication_method: unset_to_null(&form.communication_method),
        package_type: unset_to_null(&form.package_type),
        cake_pops: to_column_count(form.quantities.cake_pops),
        cupcakes: to_column_count(form.quantities.cupcakes),
        cookies: to_column_count(form.quantities.cookies),
        pretzel_rods: to_column_count(form.quantities.pretzel_rods),
        selected_designs: form.selected_designs.clone(),
        pickup_date,
        pickup_time: unset_to_null(&form.pickup_time),
        rush_order: form.rush_order,
        referral_source: unset_to_null(&form.referral_source),
        details: details_blob(form),
        current_step: to_column_count(form.current_step),
        status: form.status.unwrap_or(FormStatus::Draft).as_str().to_string(),
        order_number: form.order_number.clone(),
        submitted_at: form.submitted_at,
        created_at: form.created_at,
        updated_at: form.updated_at,
    }
}

// ---------------------------------------------------------------------------
// row -> FormDraft
// ---------------------------------------------------------------------------

fn null_to_unset(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn from_column_count(value: i32) -> u32 {
    u32::try_from(value).unwrap_or(0)
}

fn blob_string(details: &Map<String, Value>, key: &str, form_id: &str) -> String {
    match details.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => {
            tracing::warn!(form_id, key, value = %other, "Malformed details field, using empty string");
            String::new()
        }
    }
}

fn blob_bool(details: &Map<String, Value>, key: &str, form_id: &str) -> bool {
    match details.get(key) {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(other) => {
            tracing::warn!(form_id, key, value = %other, "Malformed details field, using false");
            false
        }
    }
}

/// Read the visited-step list from a `details` blob into a set.
///
/// Missing or non-list values yield an empty set; non-string entries are
/// skipped. Duplicates collapse.
pub fn visited_steps_from_blob(details: &Value, form_id: &str) -> IndexSet<String> {
    let Some(raw) = details.get(DETAILS_VISITED_STEPS) else {
        return IndexSet::new();
    };
    match raw {
        Value::Null => IndexSet::new(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                other => {
                    tracing::warn!(form_id, value = %other, "Skipping non-string visited step");
                    None
                }
            })
            .collect(),
        other => {
            tracing::warn!(
                form_id,
                value = %other,
                "Malformed visited_steps in form details, treating as empty"
            );
            IndexSet::new()
        }
    }
}

/// Convert a storage row back into a form.
pub fn from_storage(row: &OrderFormRow) -> FormDraft {
    let empty = Map::new();
    let details = match &row.details {
        Value::Object(map) => map,
        Value::Null => &empty,
        other => {
            tracing::warn!(form_id = %row.id, value = %other, "Form details is not an object, using defaults");
            &empty
        }
    };

    let status = match FormStatus::from_str_db(&row.status) {
        Ok(status) => Some(status),
        Err(e) => {
            tracing::warn!(form_id = %row.id, error = %e, "Unknown form status");
            None
        }
    };

    FormDraft {
        id: row.id.clone(),
        first_name: row.first_name.clone(),
        last_name: row.last_name.clone(),
        email: row.email.clone(),
        phone: row.phone.clone(),
        communication_method: null_to_unset(&row.communication_method),
        package_type: null_to_unset(&row.package_type),
        quantities: TreatQuantities {
            cake_pops: from_column_count(row.cake_pops),
            cupcakes: from_column_count(row.cupcakes),
            cookies: from_column_count(row.cookies),
            pretzel_rods: from_column_count(row.pretzel_rods),
        },
        color_scheme: blob_string(details, DETAILS_COLOR_SCHEME, &row.id),
        event_type: blob_string(details, DETAILS_EVENT_TYPE, &row.id),
        theme: blob_string(details, DETAILS_THEME, &row.id),
        additional_designs: blob_string(details, DETAILS_ADDITIONAL_DESIGNS, &row.id),
        selected_designs: row.selected_designs.clone(),
        pickup_date: row
            .pickup_date
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default(),
        pickup_time: null_to_unset(&row.pickup_time),
        rush_order: row.rush_order,
        referral_source: null_to_unset(&row.referral_source),
        terms_accepted: blob_bool(details, DETAILS_TERMS_ACCEPTED, &row.id),
        visited_steps: visited_steps_from_blob(&row.details, &row.id),
        current_step: from_column_count(row.current_step),
        order_number: row.order_number.clone(),
        status,
        submitted_at: row.submitted_at,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}
