//! Repository for the `characters` table.

use chrono::NaiveDate;
use roster_core::types::{DbId, NationalId};
use sqlx::PgPool;

use crate::models::character::{Character, CharacterData};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, national_id, name, birth_date, series, created_at, updated_at";

/// Provides CRUD operations and lookups for characters.
pub struct CharacterRepo;

impl CharacterRepo {
    /// Insert a new character, returning the created row.
    ///
    /// A national id collision fails with a unique violation on
    /// `uq_characters_national_id`; callers classify it.
    pub async fn create(pool: &PgPool, input: &CharacterData) -> Result<Character, sqlx::Error> {
        let query = format!(
            "INSERT INTO characters (national_id, name, birth_date, series)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(input.national_id)
            .bind(&input.name)
            .bind(input.birth_date)
            .bind(&input.series)
            .fetch_one(pool)
            .await
    }

    /// List every character, ordered by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<Character>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM characters ORDER BY id ASC");
        sqlx::query_as::<_, Character>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find a character by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Character>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM characters WHERE id = $1");
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a character by its national id.
    pub async fn find_by_national_id(
        pool: &PgPool,
        national_id: NationalId,
    ) -> Result<Option<Character>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM characters WHERE national_id = $1");
        sqlx::query_as::<_, Character>(&query)
            .bind(national_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists_by_national_id(
        pool: &PgPool,
        national_id: NationalId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM characters WHERE national_id = $1)",
        )
        .bind(national_id)
        .fetch_one(pool)
        .await
    }

    /// Overwrite every client-controlled column of a character.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CharacterData,
    ) -> Result<Option<Character>, sqlx::Error> {
        let query = format!(
            "UPDATE characters SET
                national_id = $2,
                name = $3,
                birth_date = $4,
                series = $5,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .bind(input.national_id)
            .bind(&input.name)
            .bind(input.birth_date)
            .bind(&input.series)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a character by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM characters WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Characters born strictly after `date`, oldest first.
    pub async fn list_born_after(
        pool: &PgPool,
        date: NaiveDate,
    ) -> Result<Vec<Character>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM characters
             WHERE birth_date > $1
             ORDER BY birth_date ASC, id ASC"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(date)
            .fetch_all(pool)
            .await
    }

    /// Characters whose name matches a `LIKE` pattern (e.g. `%Kirk%`).
    ///
    /// Matching is case-sensitive; `\` escapes literal `%` and `_`.
    pub async fn list_by_name_like(
        pool: &PgPool,
        pattern: &str,
    ) -> Result<Vec<Character>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM characters
             WHERE name LIKE $1
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(pattern)
            .fetch_all(pool)
            .await
    }
}
