//! Character entity model.

use chrono::NaiveDate;
use roster_core::types::{DbId, NationalId, Timestamp};
use sqlx::FromRow;

/// A row from the `characters` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Character {
    pub id: DbId,
    pub national_id: NationalId,
    pub name: String,
    pub birth_date: NaiveDate,
    pub series: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Client-controlled fields, written in full on both insert and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterData {
    pub national_id: NationalId,
    pub name: String,
    pub birth_date: NaiveDate,
    pub series: String,
}
