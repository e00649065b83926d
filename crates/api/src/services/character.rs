//! Character registry rules: national id uniqueness, existence checks and
//! the derived age.

use std::sync::Arc;

use chrono::NaiveDate;
use roster_core::character::{
    age_on, duplicate_national_id_message, validate_birth_date, ENTITY, NATIONAL_ID_FIELD,
};
use roster_core::error::CoreError;
use roster_core::pattern::contains_pattern;
use roster_core::types::{DbId, NationalId};
use roster_db::models::character::{Character, CharacterData};
use roster_db::{CharacterStore, StoreError};

use crate::error::{AppError, AppResult};

/// Source of "today" for age and birth-date checks.
pub type Clock = fn() -> NaiveDate;

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Service over a [`CharacterStore`].
///
/// Cheap to clone; all clones share the same store.
#[derive(Clone)]
pub struct CharacterService {
    store: Arc<dyn CharacterStore>,
    clock: Clock,
}

impl CharacterService {
    pub fn new(store: Arc<dyn CharacterStore>) -> Self {
        Self {
            store,
            clock: local_today,
        }
    }

    /// Replace the clock, e.g. to pin the current date in tests.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    /// Register a new character and return it with its assigned id.
    ///
    /// The existence check answers early; the store's own uniqueness
    /// guarantee catches a concurrent insert of the same national id.
    pub async fn insert(&self, data: &CharacterData) -> AppResult<Character> {
        validate_birth_date(data.birth_date, self.today())?;

        if self.store.exists_by_national_id(data.national_id).await? {
            return Err(duplicate(data.national_id));
        }

        let created = self.store.insert(data).await.map_err(conflict_or_store)?;
        tracing::info!(id = created.id, national_id = created.national_id, "Character created");
        Ok(created)
    }

    pub async fn list_all(&self) -> AppResult<Vec<Character>> {
        let characters = self.store.find_all().await?;
        tracing::debug!(count = characters.len(), "Listed characters");
        Ok(characters)
    }

    /// Characters born strictly after `date`.
    pub async fn list_born_after(&self, date: NaiveDate) -> AppResult<Vec<Character>> {
        let characters = self.store.find_born_after(date).await?;
        tracing::debug!(%date, count = characters.len(), "Listed characters born after date");
        Ok(characters)
    }

    /// Characters whose name contains `fragment` (case-sensitive).
    pub async fn search_by_name(&self, fragment: &str) -> AppResult<Vec<Character>> {
        let pattern = contains_pattern(fragment);
        let characters = self.store.find_by_name_like(&pattern).await?;
        tracing::debug!(%pattern, count = characters.len(), "Searched characters by name");
        Ok(characters)
    }

    pub async fn get_by_id(&self, id: DbId) -> AppResult<Character> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))
    }

    pub async fn get_by_national_id(&self, national_id: NationalId) -> AppResult<Character> {
        self.store
            .find_by_national_id(national_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFoundBy {
                entity: ENTITY,
                field: NATIONAL_ID_FIELD,
                value: national_id,
            }))
    }

    /// Overwrite the character with `id`.
    ///
    /// National id uniqueness is not pre-checked here; a collision with
    /// another record is reported by the store and surfaces as a conflict.
    pub async fn update(&self, id: DbId, data: &CharacterData) -> AppResult<Character> {
        validate_birth_date(data.birth_date, self.today())?;

        let updated = self
            .store
            .save(Some(id), data)
            .await
            .map_err(conflict_or_store)?
            .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
        tracing::info!(id, national_id = updated.national_id, "Character updated");
        Ok(updated)
    }

    /// Remove the character with `id`, failing if it does not exist.
    pub async fn delete(&self, id: DbId) -> AppResult<()> {
        self.get_by_id(id).await?;
        self.store.delete_by_id(id).await?;
        tracing::info!(id, "Character deleted");
        Ok(())
    }

    /// Age in whole calendar years (`current year - birth year`).
    pub async fn get_age(&self, id: DbId) -> AppResult<i32> {
        let character = self.get_by_id(id).await?;
        Ok(age_on(character.birth_date, self.today()))
    }

    pub async fn get_name(&self, id: DbId) -> AppResult<String> {
        Ok(self.get_by_id(id).await?.name)
    }

    /// Whether the backing store answers.
    pub async fn storage_healthy(&self) -> bool {
        match self.store.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Storage health check failed");
                false
            }
        }
    }
}

fn duplicate(national_id: NationalId) -> AppError {
    AppError::Core(CoreError::Conflict(duplicate_national_id_message(
        national_id,
    )))
}

fn conflict_or_store(err: StoreError) -> AppError {
    match err {
        StoreError::DuplicateNationalId(national_id) => duplicate(national_id),
        other => AppError::Store(other),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use roster_db::MemoryCharacterStore;

    use super::*;

    fn pinned_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 6, 15).unwrap()
    }

    fn service_with(store: MemoryCharacterStore) -> CharacterService {
        CharacterService::new(Arc::new(store)).with_clock(pinned_today)
    }

    fn service() -> CharacterService {
        service_with(MemoryCharacterStore::new())
    }

    fn kirk() -> CharacterData {
        CharacterData {
            national_id: 11111111111,
            name: "James Kirk".into(),
            birth_date: NaiveDate::from_ymd_opt(1925, 1, 1).unwrap(),
            series: "Star Trek".into(),
        }
    }

    fn spock() -> CharacterData {
        CharacterData {
            national_id: 33333333333,
            name: "Spock".into(),
            birth_date: NaiveDate::from_ymd_opt(1900, 2, 2).unwrap(),
            series: "Star Trek".into(),
        }
    }

    #[tokio::test]
    async fn list_all_on_empty_store_is_empty() {
        let list = service().list_all().await.unwrap();
        assert!(list.is_empty());
    }

    #[tokio::test]
    async fn insert_assigns_id_and_is_readable() {
        let svc = service();
        let created = svc.insert(&kirk()).await.unwrap();
        assert!(created.id > 0);
        assert_eq!(created.name, "James Kirk");

        let fetched = svc.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched, created);

        let listed = svc.list_all().await.unwrap();
        assert_eq!(listed, vec![created]);
    }

    #[tokio::test]
    async fn insert_duplicate_national_id_conflicts() {
        let svc = service();
        svc.insert(&kirk()).await.unwrap();

        let mut other = spock();
        other.national_id = kirk().national_id;
        let err = svc.insert(&other).await.unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::Conflict(_)));
        assert_eq!(svc.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn insert_future_birth_date_is_rejected() {
        let mut data = kirk();
        data.birth_date = NaiveDate::from_ymd_opt(2023, 6, 16).unwrap();
        let err = service().insert(&data).await.unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::Validation(ref f)) if f.get("birthDate").is_some());
    }

    #[tokio::test]
    async fn insert_checks_birth_date_before_national_id() {
        let svc = service();
        svc.insert(&kirk()).await.unwrap();

        let mut data = kirk();
        data.birth_date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let err = svc.insert(&data).await.unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn lookups_of_missing_records_fail() {
        let svc = service();
        assert_matches!(
            svc.get_by_id(42).await,
            Err(AppError::Core(CoreError::NotFound { id: 42, .. }))
        );
        assert_matches!(
            svc.get_by_national_id(123).await,
            Err(AppError::Core(CoreError::NotFoundBy { value: 123, .. }))
        );
    }

    #[tokio::test]
    async fn get_by_national_id_finds_record() {
        let svc = service();
        let created = svc.insert(&spock()).await.unwrap();
        let found = svc.get_by_national_id(33333333333).await.unwrap();
        assert_eq!(found.id, created.id);
    }

    #[tokio::test]
    async fn update_overwrites_and_keeps_id() {
        let svc = service();
        let created = svc.insert(&kirk()).await.unwrap();

        let mut changed = kirk();
        changed.name = "James T. Kirk".into();
        let updated = svc.update(created.id, &changed).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(svc.get_name(created.id).await.unwrap(), "James T. Kirk");
    }

    #[tokio::test]
    async fn update_missing_id_is_not_found() {
        let err = service().update(7, &kirk()).await.unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::NotFound { id: 7, .. }));
    }

    #[tokio::test]
    async fn update_into_taken_national_id_conflicts() {
        let svc = service();
        let first = svc.insert(&kirk()).await.unwrap();
        svc.insert(&spock()).await.unwrap();

        let mut stolen = kirk();
        stolen.national_id = spock().national_id;
        let err = svc.update(first.id, &stolen).await.unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn delete_removes_record() {
        let svc = service();
        let created = svc.insert(&kirk()).await.unwrap();
        svc.delete(created.id).await.unwrap();
        assert_matches!(
            svc.get_by_id(created.id).await,
            Err(AppError::Core(CoreError::NotFound { .. }))
        );
    }

    #[tokio::test]
    async fn delete_missing_fails_without_touching_storage() {
        let store = MemoryCharacterStore::new();
        let svc = service_with(store.clone());
        svc.insert(&kirk()).await.unwrap();

        let err = svc.delete(999).await.unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::NotFound { id: 999, .. }));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn age_is_year_difference() {
        let svc = service();
        let created = svc.insert(&kirk()).await.unwrap();
        assert_eq!(svc.get_age(created.id).await.unwrap(), 98);

        let late = svc
            .insert(&CharacterData {
                national_id: 5,
                name: "December".into(),
                birth_date: NaiveDate::from_ymd_opt(1925, 12, 31).unwrap(),
                series: "Star Trek".into(),
            })
            .await
            .unwrap();
        assert_eq!(svc.get_age(late.id).await.unwrap(), 98);
    }

    #[tokio::test]
    async fn age_of_missing_record_is_not_found() {
        assert_matches!(
            service().get_age(1).await,
            Err(AppError::Core(CoreError::NotFound { .. }))
        );
    }

    #[tokio::test]
    async fn filtered_listings() {
        let svc = service();
        svc.insert(&kirk()).await.unwrap();
        svc.insert(&spock()).await.unwrap();

        let born = svc
            .list_born_after(NaiveDate::from_ymd_opt(1910, 1, 1).unwrap())
            .await
            .unwrap();
        assert_eq!(born.len(), 1);
        assert_eq!(born[0].name, "James Kirk");

        let named = svc.search_by_name("Spo").await.unwrap();
        assert_eq!(named.len(), 1);
        assert_eq!(named[0].name, "Spock");

        // Wildcards in the fragment are literal.
        assert!(svc.search_by_name("%").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn memory_storage_is_healthy() {
        assert!(service().storage_healthy().await);
    }
}
