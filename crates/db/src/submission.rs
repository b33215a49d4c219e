//! Draft-to-order submission.
//!
//! One transaction locks the form row, checks it can be submitted, takes the
//! next order number for the day, inserts the order and flips the form to
//! `submitted`. Either both writes commit or neither does.

use chrono::NaiveDate;
use sqlx::PgPool;
use sugarloaf_core::error::CoreError;
use sugarloaf_core::form::FormStatus;
use sugarloaf_core::order_number::OrderSequencer;
use sugarloaf_core::submission::{check_submittable, SubmissionReceipt, ALREADY_SUBMITTED_MSG};

use crate::error::DbError;
use crate::repositories::{OrderFormRepo, OrderRepo, PgOrderCounter};

/// Submit the form `form_id`, numbering the order within `order_date`.
///
/// Fails with `NotFound` if the form does not exist, `Conflict` if it was
/// already submitted, and `Validation` if no customer is attached.
pub async fn submit_form(
    pool: &PgPool,
    form_id: &str,
    order_date: NaiveDate,
) -> Result<SubmissionReceipt, DbError> {
    let mut tx = pool.begin().await?;

    let form = OrderFormRepo::find_by_id_for_update(&mut *tx, form_id)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "OrderForm",
            id: form_id.to_string(),
        })?;

    // Rows with an unreadable status are treated like drafts.
    let status = FormStatus::from_str_db(&form.status).ok();
    check_submittable(status, form.customer_id)?;

    let order_number = OrderSequencer::new(PgOrderCounter::new(&mut *tx))
        .generate(Some(order_date))
        .await?;

    let order = OrderRepo::create(&mut *tx, &order_number, form_id).await?;

    let updated = OrderFormRepo::mark_submitted(&mut *tx, form_id, &order.order_number)
        .await?
        .ok_or_else(|| CoreError::Conflict(ALREADY_SUBMITTED_MSG.to_string()))?;

    tx.commit().await?;

    let submitted_at = updated.submitted_at.unwrap_or(order.created_at);

    tracing::info!(
        form_id,
        order_number = %order.order_number,
        customer_id = ?form.customer_id,
        "Order form submitted"
    );

    Ok(SubmissionReceipt {
        order_number: order.order_number,
        submitted_at,
    })
}
