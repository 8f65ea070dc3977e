use std::sync::Arc;

use quiz_core::Clock;
use quiz_core::model::{Question, QuestionSet};
use storage::repository::QuestionCacheRepository;

use super::QuestionSource;
use crate::error::QuestionSourceError;

/// Cache slot holding the most recently fetched or imported document.
pub const CACHE_KEY: &str = "questions";

/// Where a loaded question list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionOrigin {
    Remote,
    Cache,
    Bundled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedQuestions {
    pub questions: Vec<Question>,
    pub origin: QuestionOrigin,
}

/// Resolves the question document: remote feed first (written through to the
/// cache), then the cached copy, then the bundled set.
#[derive(Clone)]
pub struct QuestionLoader {
    clock: Clock,
    remote: Option<Arc<dyn QuestionSource>>,
    cache: Arc<dyn QuestionCacheRepository>,
    bundled: Arc<dyn QuestionSource>,
}

impl QuestionLoader {
    #[must_use]
    pub fn new(
        clock: Clock,
        cache: Arc<dyn QuestionCacheRepository>,
        bundled: Arc<dyn QuestionSource>,
    ) -> Self {
        Self {
            clock,
            remote: None,
            cache,
            bundled,
        }
    }

    #[must_use]
    pub fn with_remote(mut self, remote: Arc<dyn QuestionSource>) -> Self {
        self.remote = Some(remote);
        self
    }

    /// Load questions, optionally restricted to one category.
    ///
    /// # Errors
    ///
    /// Returns `QuestionSourceError` only when the bundled fallback itself fails;
    /// remote and cache failures are logged and skipped.
    pub async fn load(&self, category: Option<&str>) -> Result<LoadedQuestions, QuestionSourceError> {
        let (set, origin) = self.resolve().await?;
        let questions = match category {
            Some(category) => set.filter_category(category),
            None => set.into_questions(),
        };
        tracing::debug!(?origin, ?category, count = questions.len(), "loaded questions");
        Ok(LoadedQuestions { questions, origin })
    }

    /// Validate a JSON document and store it as the cached set.
    ///
    /// # Errors
    ///
    /// Returns `QuestionSourceError::Question` for invalid documents and
    /// `QuestionSourceError::Storage` if the cache write fails.
    pub async fn import_json(&self, raw: &str) -> Result<usize, QuestionSourceError> {
        let set = QuestionSet::from_json(raw)?;
        self.cache.store_set(CACHE_KEY, &set, self.clock.now()).await?;
        Ok(set.len())
    }

    async fn resolve(&self) -> Result<(QuestionSet, QuestionOrigin), QuestionSourceError> {
        if let Some(remote) = &self.remote {
            match remote.fetch().await {
                Ok(set) => {
                    if let Err(err) = self.cache.store_set(CACHE_KEY, &set, self.clock.now()).await {
                        tracing::warn!(error = %err, "could not cache fetched questions");
                    }
                    return Ok((set, QuestionOrigin::Remote));
                }
                Err(err) => {
                    tracing::warn!(source = %remote.describe(), error = %err, "question fetch failed, trying cache");
                }
            }
        }

        match self.cache.load_set(CACHE_KEY).await {
            Ok(Some(cached)) => {
                let age = self.clock.age_of(cached.fetched_at);
                tracing::debug!(age_minutes = age.num_minutes(), "using cached questions");
                return Ok((cached.set, QuestionOrigin::Cache));
            }
            Ok(None) => {}
            Err(err) => tracing::warn!(error = %err, "question cache unreadable, using bundled set"),
        }

        let set = self.bundled.fetch().await?;
        Ok((set, QuestionOrigin::Bundled))
    }
}
