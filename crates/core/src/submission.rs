//! Submission rules for order forms.
//!
//! A form moves `draft -> submitted` exactly once. The checks here run in
//! order and the first failure wins; the database layer runs them inside
//! the submission transaction.

use serde::Serialize;

use crate::error::CoreError;
use crate::form::FormStatus;
use crate::types::{DbId, Timestamp};

pub const ALREADY_SUBMITTED_MSG: &str = "This order has already been submitted";

pub const MISSING_CUSTOMER_MSG: &str = "Cannot submit without customer information";

pub const READ_ONLY_MSG: &str = "Submitted orders can no longer be changed";

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionReceipt {
    pub order_number: String,
    pub submitted_at: Timestamp,
}

/// Check that a form in `status` with `customer_id` may be submitted.
///
/// A missing status is treated as `draft`.
pub fn check_submittable(
    status: Option<FormStatus>,
    customer_id: Option<DbId>,
) -> Result<(), CoreError> {
    if status == Some(FormStatus::Submitted) {
        return Err(CoreError::Conflict(ALREADY_SUBMITTED_MSG.to_string()));
    }
    if customer_id.is_none() {
        return Err(CoreError::Validation(MISSING_CUSTOMER_MSG.to_string()));
    }
    Ok(())
}

/// Check that a form may still be edited or deleted.
pub fn check_editable(status: Option<FormStatus>) -> Result<(), CoreError> {
    if status == Some(FormStatus::Submitted) {
        return Err(CoreError::Conflict(READ_ONLY_MSG.to_string()));
    }
    Ok(())
}
