//! Customer entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sugarloaf_core::types::{DbId, Timestamp};

/// A row from the `customers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Customer {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for looking up or creating a customer by email.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}
