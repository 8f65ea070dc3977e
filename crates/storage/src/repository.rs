use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quiz_core::model::QuestionSet;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// A question set as it was last fetched, with its fetch time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedQuestionSet {
    pub key: String,
    pub set: QuestionSet,
    pub fetched_at: DateTime<Utc>,
}

/// Write-through cache for fetched question documents.
///
/// There is no invalidation policy: a newer store for the same key simply
/// replaces the older one.
#[async_trait]
pub trait QuestionCacheRepository: Send + Sync {
    /// Persist or replace the set stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the set cannot be stored.
    async fn store_set(
        &self,
        key: &str,
        set: &QuestionSet,
        fetched_at: DateTime<Utc>,
    ) -> Result<(), StorageError>;

    /// Fetch the set stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on connection failures or undecodable rows.
    async fn load_set(&self, key: &str) -> Result<Option<CachedQuestionSet>, StorageError>;

    /// Drop the set stored under `key`. Returns whether anything was removed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on connection failures.
    async fn clear(&self, key: &str) -> Result<bool, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    sets: Arc<Mutex<HashMap<String, CachedQuestionSet>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuestionCacheRepository for InMemoryRepository {
    async fn store_set(
        &self,
        key: &str,
        set: &QuestionSet,
        fetched_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let mut guard = self
            .sets
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(
            key.to_owned(),
            CachedQuestionSet {
                key: key.to_owned(),
                set: set.clone(),
                fetched_at,
            },
        );
        Ok(())
    }

    async fn load_set(&self, key: &str) -> Result<Option<CachedQuestionSet>, StorageError> {
        let guard = self
            .sets
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn clear(&self, key: &str) -> Result<bool, StorageError> {
        let mut guard = self
            .sets
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.remove(key).is_some())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub question_cache: Arc<dyn QuestionCacheRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo: Arc<dyn QuestionCacheRepository> = Arc::new(InMemoryRepository::new());
        Self {
            question_cache: repo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::Question;
    use quiz_core::time::fixed_now;

    fn build_set(prompt: &str) -> QuestionSet {
        QuestionSet::new(vec![
            Question::new(
                prompt,
                vec!["いぬ".into(), "ねこ".into()],
                "いぬ",
                "Animales",
            )
            .unwrap(),
        ])
    }

    #[tokio::test]
    async fn store_replaces_previous_set() {
        let repo = InMemoryRepository::new();
        repo.store_set("feed", &build_set("perro"), fixed_now())
            .await
            .unwrap();
        repo.store_set("feed", &build_set("perro grande"), fixed_now())
            .await
            .unwrap();

        let cached = repo.load_set("feed").await.unwrap().unwrap();
        assert_eq!(cached.set.questions()[0].question(), "perro grande");
        assert_eq!(cached.fetched_at, fixed_now());
    }

    #[tokio::test]
    async fn clear_removes_only_the_given_key() {
        let storage = Storage::in_memory();
        let cache = storage.question_cache;
        cache
            .store_set("a", &build_set("perro"), fixed_now())
            .await
            .unwrap();
        cache
            .store_set("b", &build_set("perro"), fixed_now())
            .await
            .unwrap();

        assert!(cache.clear("a").await.unwrap());
        assert!(!cache.clear("a").await.unwrap());
        assert!(cache.load_set("a").await.unwrap().is_none());
        assert!(cache.load_set("b").await.unwrap().is_some());
    }
}
