//! Order form entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sugarloaf_core::catalog;
use sugarloaf_core::error::CoreError;
use sugarloaf_core::form::{FormDraft, TreatQuantities};
use sugarloaf_core::form_steps::{validate_step_id, StepDefinition};
use sugarloaf_core::types::{DbId, FormId, Timestamp};

/// A row from the `order_forms` table.
///
/// Unset choices are `None` here; see [`crate::codec`] for the mapping to
/// and from [`FormDraft`].
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct OrderFormRow {
    pub id: FormId,
    pub customer_id: Option<DbId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub communication_method: Option<String>,
    pub package_type: Option<String>,
    pub cake_pops: i32,
    pub cupcakes: i32,
    pub cookies: i32,
    pub pretzel_rods: i32,
    pub selected_designs: Vec<String>,
    pub pickup_date: Option<chrono::NaiveDate>,
    pub pickup_time: Option<String>,
    pub rush_order: bool,
    pub referral_source: Option<String>,
    pub details: serde_json::Value,
    pub current_step: i32,
    pub status: String,
    pub order_number: Option<String>,
    pub submitted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for a partial update of an order form. `None` leaves a field as is;
/// an empty string clears it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOrderForm {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub communication_method: Option<String>,
    pub package_type: Option<String>,
    pub quantities: Option<TreatQuantities>,
    pub color_scheme: Option<String>,
    pub event_type: Option<String>,
    pub theme: Option<String>,
    pub additional_designs: Option<String>,
    pub selected_designs: Option<Vec<String>>,
    pub pickup_date: Option<String>,
    pub pickup_time: Option<String>,
    pub rush_order: Option<bool>,
    pub referral_source: Option<String>,
    pub terms_accepted: Option<bool>,
    pub current_step: Option<u32>,
    /// Mark this step as visited.
    pub visit_step: Option<String>,
}

impl UpdateOrderForm {
    /// Reject values outside the catalog or the step list.
    pub fn validate(&self, steps: &[StepDefinition]) -> Result<(), CoreError> {
        if let Some(package) = &self.package_type {
            catalog::validate_package_type(package)?;
        }
        if let Some(date) = &self.pickup_date {
            catalog::validate_pickup_date(date)?;
        }
        if let Some(time) = &self.pickup_time {
            catalog::validate_pickup_time(time)?;
        }
        if let Some(quantities) = &self.quantities {
            quantities.validate()?;
        }
        if let Some(step) = self.current_step {
            if step as usize >= steps.len() {
                return Err(CoreError::Validation(format!(
                    "Invalid step index {step}. Must be below {}",
                    steps.len()
                )));
            }
        }
        if let Some(step_id) = &self.visit_step {
            validate_step_id(step_id, steps)?;
        }
        Ok(())
    }

    /// Copy every provided field onto `form`.
    pub fn apply_to(&self, form: &mut FormDraft) {
        fn set(target: &mut String, value: &Option<String>) {
            if let Some(v) = value {
                target.clone_from(v);
            }
        }

        set(&mut form.first_name, &self.first_name);
        set(&mut form.last_name, &self.last_name);
        set(&mut form.email, &self.email);
        set(&mut form.phone, &self.phone);
        set(&mut form.communication_method, &self.communication_method);
        set(&mut form.package_type, &self.package_type);
        set(&mut form.color_scheme, &self.color_scheme);
        set(&mut form.event_type, &self.event_type);
        set(&mut form.theme, &self.theme);
        set(&mut form.additional_designs, &self.additional_designs);
        set(&mut form.pickup_date, &self.pickup_date);
        set(&mut form.pickup_time, &self.pickup_time);
        set(&mut form.referral_source, &self.referral_source);

        if let Some(q) = self.quantities {
            form.quantities = q;
        }
        if let Some(designs) = &self.selected_designs {
            form.selected_designs.clone_from(designs);
        }
        if let Some(rush) = self.rush_order {
            form.rush_order = rush;
        }
        if let Some(accepted) = self.terms_accepted {
            form.terms_accepted = accepted;
        }
        if let Some(step) = self.current_step {
            form.current_step = step;
        }
        if let Some(step_id) = &self.visit_step {
            form.visit_step(step_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use sugarloaf_core::form_steps::STEPS;

    use super::*;

    #[test]
    fn apply_only_touches_provided_fields() {
        let mut form = FormDraft::new(chrono::Utc::now());
        form.first_name = "Grace".into();
        form.theme = "nautical".into();

        let update = UpdateOrderForm {
            theme: Some(String::new()),
            package_type: Some("small".into()),
            visit_step: Some("package".into()),
            ..Default::default()
        };
        update.apply_to(&mut form);

        assert_eq!(form.first_name, "Grace");
        assert_eq!(form.theme, "");
        assert_eq!(form.package_type, "small");
        assert!(form.visited_steps.contains("package"));
    }

    #[test]
    fn validate_rejects_unknown_values() {
        let bad_package = UpdateOrderForm {
            package_type: Some("gigantic".into()),
            ..Default::default()
        };
        assert!(bad_package.validate(STEPS).is_err());

        let bad_step = UpdateOrderForm {
            visit_step: Some("payment".into()),
            ..Default::default()
        };
        assert!(bad_step.validate(STEPS).is_err());

        let bad_index = UpdateOrderForm {
            current_step: Some(STEPS.len() as u32),
            ..Default::default()
        };
        assert!(bad_index.validate(STEPS).is_err());
    }

    #[test]
    fn validate_rejects_unstorable_quantities() {
        let update = UpdateOrderForm {
            quantities: Some(TreatQuantities {
                cupcakes: 3_000_000_000,
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(matches!(update.validate(STEPS), Err(CoreError::Validation(_))));
    }

    #[test]
    fn validate_accepts_clearing_values() {
        let clear = UpdateOrderForm {
            package_type: Some(String::new()),
            pickup_date: Some(String::new()),
            pickup_time: Some(String::new()),
            ..Default::default()
        };
        assert!(clear.validate(STEPS).is_ok());
    }
}
