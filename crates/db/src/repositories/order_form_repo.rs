//! Repository for the `order_forms` table.

use sqlx::{PgExecutor, PgPool};

use crate::models::order_form::OrderFormRow;

/// Column list for `order_forms` queries.
const COLUMNS: &str = "id, customer_id, first_name, last_name, email, phone, \
     communication_method, package_type, cake_pops, cupcakes, cookies, pretzel_rods, \
     selected_designs, pickup_date, pickup_time, rush_order, referral_source, details, \
     current_step, status, order_number, submitted_at, created_at, updated_at";

/// Provides CRUD operations for order forms.
pub struct OrderFormRepo;

impl OrderFormRepo {
    /// Insert a new order form row.
    pub async fn create(pool: &PgPool, row: &OrderFormRow) -> Result<OrderFormRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO order_forms ( \
                 id, customer_id, first_name, last_name, email, phone, \
                 communication_method, package_type, cake_pops, cupcakes, cookies, pretzel_rods, \
                 selected_designs, pickup_date, pickup_time, rush_order, referral_source, details, \
                 current_step, status, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, \
                     $13, $14, $15, $16, $17, $18, $19, $20, $21, $22) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OrderFormRow>(&query)
            .bind(&row.id)
            .bind(row.customer_id)
            .bind(&row.first_name)
            .bind(&row.last_name)
            .bind(&row.email)
            .bind(&row.phone)
            .bind(&row.communication_method)
            .bind(&row.package_type)
            .bind(row.cake_pops)
            .bind(row.cupcakes)
            .bind(row.cookies)
            .bind(row.pretzel_rods)
            .bind(&row.selected_designs)
            .bind(row.pickup_date)
            .bind(&row.pickup_time)
            .bind(row.rush_order)
            .bind(&row.referral_source)
            .bind(&row.details)
            .bind(row.current_step)
            .bind(&row.status)
            .bind(row.created_at)
            .bind(row.updated_at)
            .fetch_one(pool)
            .await
    }

    /// Find an order form by ID.
    pub async fn find_by_id<'e, E>(executor: E, id: &str) -> Result<Option<OrderFormRow>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM order_forms WHERE id = $1");
        sqlx::query_as::<_, OrderFormRow>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find an order form by ID and lock the row until the transaction ends.
    pub async fn find_by_id_for_update<'e, E>(
        executor: E,
        id: &str,
    ) -> Result<Option<OrderFormRow>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM order_forms WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, OrderFormRow>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Overwrite the editable columns of a draft.
    ///
    /// Returns `None` if the form does not exist or is no longer a draft.
    pub async fn update_draft<'e, E>(
        executor: E,
        row: &OrderFormRow,
    ) -> Result<Option<OrderFormRow>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE order_forms SET \
                 customer_id = $2, first_name = $3, last_name = $4, email = $5, phone = $6, \
                 communication_method = $7, package_type = $8, \
                 cake_pops = $9, cupcakes = $10, cookies = $11, pretzel_rods = $12, \
                 selected_designs = $13, pickup_date = $14, pickup_time = $15, \
                 rush_order = $16, referral_source = $17, details = $18, current_step = $19 \
             WHERE id = $1 AND status = 'draft' \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OrderFormRow>(&query)
            .bind(&row.id)
            .bind(row.customer_id)
            .bind(&row.first_name)
            .bind(&row.last_name)
            .bind(&row.email)
            .bind(&row.phone)
            .bind(&row.communication_method)
            .bind(&row.package_type)
            .bind(row.cake_pops)
            .bind(row.cupcakes)
            .bind(row.cookies)
            .bind(row.pretzel_rods)
            .bind(&row.selected_designs)
            .bind(row.pickup_date)
            .bind(&row.pickup_time)
            .bind(row.rush_order)
            .bind(&row.referral_source)
            .bind(&row.details)
            .bind(row.current_step)
            .fetch_optional(executor)
            .await
    }

    /// Flip a draft to `submitted`, stamping the order number and time.
    ///
    /// The `status = 'draft'` guard makes this a no-op (returns `None`) if
    /// another submission got there first.
    pub async fn mark_submitted<'e, E>(
        executor: E,
        id: &str,
        order_number: &str,
    ) -> Result<Option<OrderFormRow>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE order_forms SET \
                 status = 'submitted', order_number = $2, submitted_at = NOW() \
             WHERE id = $1 AND status = 'draft' \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OrderFormRow>(&query)
            .bind(id)
            .bind(order_number)
            .fetch_optional(executor)
            .await
    }

    /// Delete a draft. Returns `true` if a row was removed.
    pub async fn delete_draft<'e, E>(executor: E, id: &str) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM order_forms WHERE id = $1 AND status = 'draft'")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List forms, most recently updated first, optionally filtered by status.
    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<OrderFormRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM order_forms \
             WHERE ($1::TEXT IS NULL OR status = $1) \
             ORDER BY updated_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, OrderFormRow>(&query)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
