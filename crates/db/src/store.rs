//! The storage seam used by the service layer.

use async_trait::async_trait;
use chrono::NaiveDate;
use roster_core::types::{DbId, NationalId};

use crate::error::{Result, StoreError};
use crate::models::character::{Character, CharacterData};
use crate::repositories::CharacterRepo;
use crate::DbPool;

/// Data access for character records.
#[async_trait]
pub trait CharacterStore: Send + Sync {
    /// All records, ordered by id. Empty when none exist.
    async fn find_all(&self) -> Result<Vec<Character>>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Character>>;

    async fn find_by_national_id(&self, national_id: NationalId) -> Result<Option<Character>>;

    async fn exists_by_national_id(&self, national_id: NationalId) -> Result<bool>;

    /// Insert a record and assign its id.
    ///
    /// Fails with [`StoreError::DuplicateNationalId`] if the national id is
    /// taken; the check and the write are one atomic step.
    async fn insert(&self, data: &CharacterData) -> Result<Character>;

    /// Overwrite the record with `id`. `None` if no such record exists.
    async fn update(&self, id: DbId, data: &CharacterData) -> Result<Option<Character>>;

    /// Insert when `id` is `None`, otherwise update the matching record.
    async fn save(&self, id: Option<DbId>, data: &CharacterData) -> Result<Option<Character>> {
        match id {
            None => self.insert(data).await.map(Some),
            Some(id) => self.update(id, data).await,
        }
    }

    /// Remove the record with `id`. Returns `false` (and does nothing) if absent.
    async fn delete_by_id(&self, id: DbId) -> Result<bool>;

    /// Records with a birth date strictly after `date`.
    async fn find_born_after(&self, date: NaiveDate) -> Result<Vec<Character>>;

    /// Records whose name matches a case-sensitive `LIKE` pattern.
    async fn find_by_name_like(&self, pattern: &str) -> Result<Vec<Character>>;

    /// Liveness probe for the health endpoint.
    async fn ping(&self) -> Result<()>;
}

/// [`CharacterStore`] over a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgCharacterStore {
    pool: DbPool,
}

impl PgCharacterStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CharacterStore for PgCharacterStore {
    async fn find_all(&self) -> Result<Vec<Character>> {
        Ok(CharacterRepo::list(&self.pool).await?)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Character>> {
        Ok(CharacterRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_by_national_id(&self, national_id: NationalId) -> Result<Option<Character>> {
        Ok(CharacterRepo::find_by_national_id(&self.pool, national_id).await?)
    }

    async fn exists_by_national_id(&self, national_id: NationalId) -> Result<bool> {
        Ok(CharacterRepo::exists_by_national_id(&self.pool, national_id).await?)
    }

    async fn insert(&self, data: &CharacterData) -> Result<Character> {
        CharacterRepo::create(&self.pool, data)
            .await
            .map_err(|e| StoreError::from_write(e, data.national_id))
    }

    async fn update(&self, id: DbId, data: &CharacterData) -> Result<Option<Character>> {
        CharacterRepo::update(&self.pool, id, data)
            .await
            .map_err(|e| StoreError::from_write(e, data.national_id))
    }

    async fn delete_by_id(&self, id: DbId) -> Result<bool> {
        Ok(CharacterRepo::delete(&self.pool, id).await?)
    }

    async fn find_born_after(&self, date: NaiveDate) -> Result<Vec<Character>> {
        Ok(CharacterRepo::list_born_after(&self.pool, date).await?)
    }

    async fn find_by_name_like(&self, pattern: &str) -> Result<Vec<Character>> {
        Ok(CharacterRepo::list_by_name_like(&self.pool, pattern).await?)
    }

    async fn ping(&self) -> Result<()> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
