//! Partial updates of draft order forms.
//!
//! The row is locked for the whole read-modify-write, so concurrent updates
//! of one form apply one after the other instead of overwriting each other.

use sqlx::{PgConnection, PgPool};
use sugarloaf_core::error::CoreError;
use sugarloaf_core::form::{FormDraft, FormStatus};
use sugarloaf_core::form_steps::{has_step_data, STEPS, STEP_LEAD};
use sugarloaf_core::submission::{check_editable, READ_ONLY_MSG};
use sugarloaf_core::types::DbId;

use crate::codec::{from_storage, to_storage};
use crate::error::DbError;
use crate::models::customer::UpsertCustomer;
use crate::models::order_form::{OrderFormRow, UpdateOrderForm};
use crate::repositories::{CustomerRepo, OrderFormRepo};

/// Apply `update` to the draft `form_id` and return the stored row.
///
/// Fails with `NotFound` for an unknown form, `Conflict` once the form is
/// submitted and `Validation` for values outside the catalog or step list.
pub async fn update_form(
    pool: &PgPool,
    form_id: &str,
    update: &UpdateOrderForm,
) -> Result<OrderFormRow, DbError> {
    let mut tx = pool.begin().await?;

    let row = OrderFormRepo::find_by_id_for_update(&mut *tx, form_id)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "OrderForm",
            id: form_id.to_string(),
        })?;
    let mut form = from_storage(&row);

    check_editable(form.status)?;
    update.validate(STEPS)?;
    update.apply_to(&mut form);

    let customer_id = resolve_customer(&mut *tx, &form, row.customer_id).await?;

    let updated = OrderFormRepo::update_draft(&mut *tx, &to_storage(&form, customer_id))
        .await?
        .ok_or_else(|| CoreError::Conflict(READ_ONLY_MSG.to_string()))?;

    tx.commit().await?;

    tracing::info!(
        form_id,
        current_step = form.current_step,
        visited = form.visited_steps.len(),
        "Order form updated"
    );
    Ok(updated)
}

/// Delete the draft `form_id`. Submitted forms are kept as the record
/// behind their order.
pub async fn delete_form(pool: &PgPool, form_id: &str) -> Result<(), DbError> {
    let mut tx = pool.begin().await?;

    let row = OrderFormRepo::find_by_id_for_update(&mut *tx, form_id)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "OrderForm",
            id: form_id.to_string(),
        })?;
    check_editable(FormStatus::from_str_db(&row.status).ok())?;

    if !OrderFormRepo::delete_draft(&mut *tx, form_id).await? {
        return Err(CoreError::Conflict(READ_ONLY_MSG.to_string()).into());
    }
    tx.commit().await?;

    tracing::info!(form_id, "Order form deleted");
    Ok(())
}

/// Link the lead step's contact details to a customer record.
///
/// Returns the existing link unchanged until the lead step has data.
async fn resolve_customer(
    conn: &mut PgConnection,
    form: &FormDraft,
    current: Option<DbId>,
) -> Result<Option<DbId>, DbError> {
    if !has_step_data(STEP_LEAD, form) {
        return Ok(current);
    }
    let customer = CustomerRepo::upsert_by_email(
        conn,
        &UpsertCustomer {
            first_name: form.first_name.trim().to_string(),
            last_name: form.last_name.trim().to_string(),
            email: form.email.trim().to_lowercase(),
            phone: form.phone.trim().to_string(),
        },
    )
    .await?;

    if current != Some(customer.id) {
        tracing::info!(form_id = %form.id, customer_id = customer.id, "Customer linked to order form");
    }
    Ok(Some(customer.id))
}
