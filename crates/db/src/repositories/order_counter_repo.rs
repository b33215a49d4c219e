//! Repository for the `order_counters` table and the durable order counter.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgConnection, PgExecutor};
use sugarloaf_core::error::CoreError;
use sugarloaf_core::order_number::OrderCounter;

/// Provides the per-date order sequence.
pub struct OrderCounterRepo;

impl OrderCounterRepo {
    /// Atomically bump the counter for `date` and return the new value.
    ///
    /// The first call for a date inserts 1. Concurrent callers serialize on
    /// the counter row, so no two callers see the same value.
    pub async fn increment<'e, E>(executor: E, date: NaiveDate) -> Result<i64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let row: (i64,) = sqlx::query_as(
            "INSERT INTO order_counters (order_date, last_value) \
             VALUES ($1, 1) \
             ON CONFLICT (order_date) DO UPDATE \
             SET last_value = order_counters.last_value + 1, \
                 updated_at = NOW() \
             RETURNING last_value",
        )
        .bind(date)
        .fetch_one(executor)
        .await?;
        Ok(row.0)
    }
}

/// [`OrderCounter`] backed by the `order_counters` table.
///
/// Borrows a connection, usually an open transaction, so the increment
/// commits or rolls back with the rest of that transaction.
pub struct PgOrderCounter<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> PgOrderCounter<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<'c> OrderCounter for PgOrderCounter<'c> {
    async fn increment(&mut self, date: NaiveDate) -> Result<i64, CoreError> {
        OrderCounterRepo::increment(&mut *self.conn, date)
            .await
            .map_err(|e| {
                tracing::error!(%date, error = %e, "Order counter increment failed");
                CoreError::Internal(format!("order counter increment failed: {e}"))
            })
    }
}
