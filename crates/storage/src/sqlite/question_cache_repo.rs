use chrono::{DateTime, Utc};
use quiz_core::model::QuestionSet;
use sqlx::Row;

use super::SqliteRepository;
use crate::repository::{CachedQuestionSet, QuestionCacheRepository, StorageError};

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn conn(e: sqlx::Error) -> StorageError {
    StorageError::Connection(e.to_string())
}

fn map_cache_row(row: &sqlx::sqlite::SqliteRow) -> Result<CachedQuestionSet, StorageError> {
    let key: String = row.try_get("cache_key").map_err(ser)?;
    let payload: String = row.try_get("payload").map_err(ser)?;
    let fetched_at: DateTime<Utc> = row.try_get("fetched_at").map_err(ser)?;
    let set = QuestionSet::from_json(&payload).map_err(ser)?;
    Ok(CachedQuestionSet {
        key,
        set,
        fetched_at,
    })
}

#[async_trait::async_trait]
impl QuestionCacheRepository for SqliteRepository {
    async fn store_set(
        &self,
        key: &str,
        set: &QuestionSet,
        fetched_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let payload = set.to_json().map_err(ser)?;
        let count = i64::try_from(set.len())
            .map_err(|_| StorageError::Serialization("question_count overflow".into()))?;

        sqlx::query(
            r"
                INSERT INTO question_cache (cache_key, payload, question_count, fetched_at)
                VALUES (?1, ?2, ?3, ?4)
                ON CONFLICT(cache_key) DO UPDATE SET
                    payload = excluded.payload,
                    question_count = excluded.question_count,
                    fetched_at = excluded.fetched_at
            ",
        )
        .bind(key)
        .bind(payload)
        .bind(count)
        .bind(fetched_at)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        tracing::debug!(key, questions = set.len(), "cached question set");
        Ok(())
    }

    async fn load_set(&self, key: &str) -> Result<Option<CachedQuestionSet>, StorageError> {
        let row = sqlx::query(
            r"
                SELECT cache_key, payload, fetched_at
                FROM question_cache
                WHERE cache_key = ?1
            ",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_cache_row).transpose()
    }

    async fn clear(&self, key: &str) -> Result<bool, StorageError> {
        let res = sqlx::query("DELETE FROM question_cache WHERE cache_key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(conn)?;
        Ok(res.rows_affected() > 0)
    }
}
