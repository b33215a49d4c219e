//! Repository for the `customers` table.

use sqlx::PgExecutor;

use crate::models::customer::{Customer, UpsertCustomer};

/// Column list for `customers` queries.
const COLUMNS: &str = "id, first_name, last_name, email, phone, created_at, updated_at";

/// Provides lookup-or-create operations for customers.
pub struct CustomerRepo;

impl CustomerRepo {
    /// Find the customer with this email or create one. Existing customers
    /// get their name and phone refreshed.
    ///
    /// Uses `ON CONFLICT (email) DO UPDATE` to guarantee one row per email.
    pub async fn upsert_by_email<'e, E>(
        executor: E,
        input: &UpsertCustomer,
    ) -> Result<Customer, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO customers (first_name, last_name, email, phone) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (email) DO UPDATE \
             SET first_name = EXCLUDED.first_name, \
                 last_name = EXCLUDED.last_name, \
                 phone = EXCLUDED.phone \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.phone)
            .fetch_one(executor)
            .await
    }
}
