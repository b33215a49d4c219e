//! Order entity model.

use serde::Serialize;
use sqlx::FromRow;
use sugarloaf_core::types::{DbId, FormId, Timestamp};

/// A row from the `orders` table. Never updated after insert.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Order {
    pub id: DbId,
    pub order_number: String,
    pub form_id: FormId,
    pub created_at: Timestamp,
}
