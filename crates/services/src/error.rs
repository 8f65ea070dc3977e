//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{QuestionError, SettingsError};
use quiz_core::quiz::QuizError;
use storage::repository::StorageError;

/// Errors emitted by question sources and the question loader.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionSourceError {
    #[error("question feed returned status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    #[error(transparent)]
    Source(#[from] QuestionSourceError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
}
