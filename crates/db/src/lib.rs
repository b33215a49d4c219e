//! Postgres persistence for order forms, customers and orders.
//!
//! Repositories are zero-sized structs with async methods taking a pool or
//! executor. [`codec`] converts between the in-memory [`FormDraft`] and the
//! `order_forms` row, [`form_update`] applies locked partial updates and
//! [`submission`] runs the draft-to-order transaction.
//!
//! [`FormDraft`]: sugarloaf_core::form::FormDraft

pub mod codec;
pub mod error;
pub mod form_update;
pub mod models;
pub mod repositories;
pub mod submission;

use sqlx::postgres::PgPoolOptions;

pub use error::DbError;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Run a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
