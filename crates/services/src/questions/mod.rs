mod bundled;
mod loader;
mod remote;

use async_trait::async_trait;
use quiz_core::model::QuestionSet;

use crate::error::QuestionSourceError;

// Public API of the question subsystem.
pub use bundled::BundledQuestions;
pub use loader::{CACHE_KEY, LoadedQuestions, QuestionLoader, QuestionOrigin};
pub use remote::{RemoteQuestions, RemoteQuestionsConfig};

/// Anything that can hand out a validated question document.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Short label used in logs.
    fn describe(&self) -> String;

    /// Produce the full question set.
    ///
    /// # Errors
    ///
    /// Returns `QuestionSourceError` when the set cannot be obtained or fails validation.
    async fn fetch(&self) -> Result<QuestionSet, QuestionSourceError>;
}
