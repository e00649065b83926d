/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Client-supplied national identification number (CPF-style, up to 11 digits).
pub type NationalId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
