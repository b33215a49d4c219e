use sugarloaf_core::error::CoreError;

/// Error returned by multi-step database operations.
///
/// Keeps domain failures (not found, conflict, validation) distinct from
/// storage failures so callers can map them separately.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
