//! Repository for the `orders` table.

use sqlx::{PgExecutor, PgPool};

use crate::models::order::Order;

/// Column list for `orders` queries.
const COLUMNS: &str = "id, order_number, form_id, created_at";

/// Provides insert and lookup operations for orders. Orders are never updated.
pub struct OrderRepo;

impl OrderRepo {
    /// Insert the order for a submitted form.
    pub async fn create<'e, E>(
        executor: E,
        order_number: &str,
        form_id: &str,
    ) -> Result<Order, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO orders (order_number, form_id) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(order_number)
            .bind(form_id)
            .fetch_one(executor)
            .await
    }

    /// Find an order by its order number.
    pub async fn find_by_number(
        pool: &PgPool,
        order_number: &str,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE order_number = $1");
        sqlx::query_as::<_, Order>(&query)
            .bind(order_number)
            .fetch_optional(pool)
            .await
    }
}
