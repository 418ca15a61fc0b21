/// All database primary keys are PostgreSQL `BIGINT` identity columns.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
