/// Customer and order primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Form ids are opaque strings generated at creation.
pub type FormId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
