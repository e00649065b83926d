use roster_core::types::NationalId;

/// Name of the schema constraint guarding national id uniqueness.
pub const NATIONAL_ID_CONSTRAINT: &str = "uq_characters_national_id";

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The write would give two records the same national id.
    #[error("national id {0} is already registered")]
    DuplicateNationalId(NationalId),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Classify a failed write, turning violations of
    /// [`NATIONAL_ID_CONSTRAINT`] into [`StoreError::DuplicateNationalId`].
    pub fn from_write(err: sqlx::Error, national_id: NationalId) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505")
                && db_err.constraint() == Some(NATIONAL_ID_CONSTRAINT)
            {
                tracing::debug!(national_id, "Write rejected by national id constraint");
                return Self::DuplicateNationalId(national_id);
            }
        }
        Self::Database(err)
    }
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;
