//! In-process [`CharacterStore`].

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use roster_core::pattern::like_matches;
use roster_core::types::{DbId, NationalId};
use tokio::sync::RwLock;

use crate::error::{Result, StoreError};
use crate::models::character::{Character, CharacterData};
use crate::store::CharacterStore;

/// In-memory storage backend for tests and local runs.
///
/// Mirrors the Postgres schema: ids come from a monotonically increasing
/// sequence and national id uniqueness is checked under the write lock.
/// Data is lost when the last clone is dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryCharacterStore {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    rows: BTreeMap<DbId, Character>,
    last_id: DbId,
}

impl Inner {
    fn national_id_owner(&self, national_id: NationalId) -> Option<DbId> {
        self.rows
            .values()
            .find(|c| c.national_id == national_id)
            .map(|c| c.id)
    }
}

impl MemoryCharacterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CharacterStore for MemoryCharacterStore {
    async fn find_all(&self) -> Result<Vec<Character>> {
        let inner = self.inner.read().await;
        Ok(inner.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Character>> {
        let inner = self.inner.read().await;
        Ok(inner.rows.get(&id).cloned())
    }

    async fn find_by_national_id(&self, national_id: NationalId) -> Result<Option<Character>> {
        let inner = self.inner.read().await;
        Ok(inner
            .rows
            .values()
            .find(|c| c.national_id == national_id)
            .cloned())
    }

    async fn exists_by_national_id(&self, national_id: NationalId) -> Result<bool> {
        let inner = self.inner.read().await;
        Ok(inner.national_id_owner(national_id).is_some())
    }

    async fn insert(&self, data: &CharacterData) -> Result<Character> {
        let mut inner = self.inner.write().await;
        if inner.national_id_owner(data.national_id).is_some() {
            return Err(StoreError::DuplicateNationalId(data.national_id));
        }

        inner.last_id += 1;
        let now = Utc::now();
        let character = Character {
            id: inner.last_id,
            national_id: data.national_id,
            name: data.name.clone(),
            birth_date: data.birth_date,
            series: data.series.clone(),
            created_at: now,
            updated_at: now,
        };
        inner.rows.insert(character.id, character.clone());
        Ok(character)
    }

    async fn update(&self, id: DbId, data: &CharacterData) -> Result<Option<Character>> {
        let mut inner = self.inner.write().await;
        if !inner.rows.contains_key(&id) {
            return Ok(None);
        }
        if matches!(inner.national_id_owner(data.national_id), Some(owner) if owner != id) {
            return Err(StoreError::DuplicateNationalId(data.national_id));
        }

        let Some(row) = inner.rows.get_mut(&id) else {
            return Ok(None);
        };
        row.national_id = data.national_id;
        row.name.clone_from(&data.name);
        row.birth_date = data.birth_date;
        row.series.clone_from(&data.series);
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete_by_id(&self, id: DbId) -> Result<bool> {
        let mut inner = self.inner.write().await;
        Ok(inner.rows.remove(&id).is_some())
    }

    async fn find_born_after(&self, date: NaiveDate) -> Result<Vec<Character>> {
        let inner = self.inner.read().await;
        let mut found: Vec<Character> = inner
            .rows
            .values()
            .filter(|c| c.birth_date > date)
            .cloned()
            .collect();
        found.sort_by_key(|c| (c.birth_date, c.id));
        Ok(found)
    }

    async fn find_by_name_like(&self, pattern: &str) -> Result<Vec<Character>> {
        let inner = self.inner.read().await;
        Ok(inner
            .rows
            .values()
            .filter(|c| like_matches(pattern, &c.name))
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
