#![forbid(unsafe_code)]

pub mod error;
pub mod playback;
pub mod questions;
pub mod quiz_service;

pub use quiz_core::Clock;

pub use error::{QuestionSourceError, QuizServiceError};
pub use playback::{FeedbackAudio, LoggingPlayback, Playback, Pronouncer};
pub use questions::{
    BundledQuestions, LoadedQuestions, QuestionLoader, QuestionOrigin, QuestionSource,
    RemoteQuestions, RemoteQuestionsConfig,
};
pub use quiz_service::{QuizService, StartedQuiz};
