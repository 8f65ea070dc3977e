use std::sync::Arc;

use rand::rng;
use rand::seq::SliceRandom;

use quiz_core::model::{Category, QuizSettings};
use quiz_core::quiz::{Effect, Intent, QuizError, QuizSession};
use quiz_core::script::JAPANESE_LOCALE;

use crate::error::QuizServiceError;
use crate::playback::Playback;
use crate::questions::{QuestionLoader, QuestionOrigin};

/// A freshly started quiz and where its questions came from.
#[derive(Debug, Clone)]
pub struct StartedQuiz {
    pub session: QuizSession,
    pub origin: QuestionOrigin,
}

/// Starts quiz sessions from the question loader and forwards engine effects
/// to playback.
///
/// Sessions are returned to the caller and owned by it; the service keeps no
/// per-session state.
#[derive(Clone)]
pub struct QuizService {
    loader: Arc<QuestionLoader>,
    playback: Playback,
    settings: QuizSettings,
}

impl QuizService {
    #[must_use]
    pub fn new(loader: Arc<QuestionLoader>, playback: Playback) -> Self {
        Self {
            loader,
            playback,
            settings: QuizSettings::default(),
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: QuizSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Start a session for a built-in category, or for every question when `None`.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Source` if no question source can be read.
    pub async fn start(&self, category: Option<Category>) -> Result<StartedQuiz, QuizServiceError> {
        let loaded = self.loader.load(category.map(|c| c.name())).await?;
        let mut questions = loaded.questions;
        if self.settings.shuffle_questions() {
            questions.as_mut_slice().shuffle(&mut rng());
        }

        tracing::info!(
            category = category.map_or("all", |c| c.name()),
            questions = questions.len(),
            origin = ?loaded.origin,
            "starting quiz"
        );
        Ok(StartedQuiz {
            session: QuizSession::new(questions, self.settings.starting_lives()),
            origin: loaded.origin,
        })
    }

    /// Start a session from a category given by id or name.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::UnknownCategory` if the name matches no
    /// built-in category.
    pub async fn start_named(&self, raw: &str) -> Result<StartedQuiz, QuizServiceError> {
        let category =
            Category::lookup(raw).ok_or_else(|| QuizServiceError::UnknownCategory(raw.to_string()))?;
        self.start(Some(category)).await
    }

    /// Apply an intent and hand its effects to playback.
    ///
    /// Effects are also returned so the presentation layer can reflect them.
    ///
    /// # Errors
    ///
    /// Returns the engine's `QuizError`; the session is left untouched.
    pub fn dispatch(
        &self,
        session: &mut QuizSession,
        intent: Intent,
    ) -> Result<Vec<Effect>, QuizError> {
        tracing::debug!(?intent, index = session.current_index(), "dispatch");
        let effects = session.dispatch(intent)?;
        self.playback.apply(&effects);
        Ok(effects)
    }

    /// Pronounce a single character or word, e.g. from the syllabary browser.
    pub fn pronounce(&self, text: &str) {
        self.playback.speak(text, JAPANESE_LOCALE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::BundledQuestions;
    use quiz_core::model::{Question, QuestionSet};
    use quiz_core::quiz::{Cue, Outcome};
    use quiz_core::time::fixed_clock;
    use storage::repository::InMemoryRepository;

    fn service(settings: QuizSettings) -> QuizService {
        let set = QuestionSet::new(
            (1..=5)
                .map(|n| {
                    Question::new(
                        format!("{n}?"),
                        vec![format!("{n}"), "x".into()],
                        format!("{n}"),
                        "Numeros",
                    )
                    .unwrap()
                })
                .collect(),
        );
        let loader = QuestionLoader::new(
            fixed_clock(),
            Arc::new(InMemoryRepository::new()),
            Arc::new(BundledQuestions::from_set(set)),
        );
        QuizService::new(Arc::new(loader), Playback::logging()).with_settings(settings)
    }

    #[tokio::test]
    async fn start_uses_configured_lives_and_category() {
        let svc = service(QuizSettings::new(5, false).unwrap());
        let started = svc.start_named("numeros").await.unwrap();
        assert_eq!(started.origin, QuestionOrigin::Bundled);
        assert_eq!(started.session.lives_remaining(), 5);
        assert_eq!(started.session.questions().len(), 5);
        assert_eq!(started.session.current_question().unwrap().question(), "1?");
    }

    #[tokio::test]
    async fn category_without_questions_completes_immediately() {
        let svc = service(QuizSettings::default());
        let started = svc.start_named("Verbos").await.unwrap();
        assert_eq!(started.session.outcome(), Outcome::Completed);
    }

    #[tokio::test]
    async fn accented_feed_tags_match_the_catalog() {
        let set = QuestionSet::new(vec![
            Question::new("三", vec!["tres".into(), "dos".into()], "tres", "Números").unwrap(),
        ]);
        let loader = QuestionLoader::new(
            fixed_clock(),
            Arc::new(InMemoryRepository::new()),
            Arc::new(BundledQuestions::from_set(set)),
        );
        let svc = QuizService::new(Arc::new(loader), Playback::logging());

        let started = svc.start_named("Numeros").await.unwrap();
        assert_eq!(started.session.questions().len(), 1);
        assert_eq!(started.session.outcome(), Outcome::Active);
    }

    #[tokio::test]
    async fn unknown_category_is_rejected() {
        let svc = service(QuizSettings::default());
        let err = svc.start_named("Plantas").await.unwrap_err();
        assert!(matches!(err, QuizServiceError::UnknownCategory(name) if name == "Plantas"));
    }

    #[tokio::test]
    async fn shuffle_keeps_the_same_questions() {
        let svc = service(QuizSettings::new(3, true).unwrap());
        let started = svc.start(None).await.unwrap();
        let mut prompts: Vec<_> = started
            .session
            .questions()
            .iter()
            .map(|q| q.question().to_string())
            .collect();
        prompts.sort();
        assert_eq!(prompts, vec!["1?", "2?", "3?", "4?", "5?"]);
    }

    #[tokio::test]
    async fn dispatch_returns_engine_effects() {
        let svc = service(QuizSettings::default());
        let mut session = svc.start(None).await.unwrap().session;

        svc.dispatch(&mut session, Intent::Select("x".into())).unwrap();
        let effects = svc.dispatch(&mut session, Intent::Submit).unwrap();
        assert_eq!(effects, vec![Effect::Cue(Cue::Incorrect)]);
        assert_eq!(
            svc.dispatch(&mut session, Intent::Submit).unwrap_err(),
            QuizError::NoAnswerSelected
        );
    }
}
