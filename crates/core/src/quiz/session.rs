use std::fmt;

use thiserror::Error;

use super::intent::{Cue, Effect, Intent};
use super::progress::{QuizProgress, QuizSummary};
use crate::model::Question;
use crate::script::{JAPANESE_LOCALE, needs_pronunciation};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Out-of-protocol calls rejected by the engine. None of these are fatal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no answer selected")]
    NoAnswerSelected,

    #[error("answer has not been submitted yet")]
    NotYetSubmitted,

    #[error("quiz session is already {0}")]
    InvalidSessionState(Outcome),

    #[error("{answer:?} is not an answer to the current question")]
    InvalidAnswer { answer: String },
}

//
// ─── OUTCOME ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Active,
    /// Every question was answered.
    Completed,
    /// Lives ran out.
    Lost,
}

impl Outcome {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::Active)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Active => f.write_str("active"),
            Outcome::Completed => f.write_str("completed"),
            Outcome::Lost => f.write_str("lost"),
        }
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One run through an ordered list of questions.
///
/// Each question goes through `select -> submit -> advance`; submission never
/// moves the cursor so feedback can be shown first. The session ends `Lost` when
/// lives reach zero and `Completed` when the cursor passes the last question.
/// Lives are checked first, so a wrong final answer on the last life is a loss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    questions: Vec<Question>,
    current: usize,
    lives_remaining: u32,
    correct_count: u32,
    selected: Option<String>,
    submitted: bool,
    outcome: Outcome,
}

impl QuizSession {
    /// Start a session. An empty question list is immediately `Completed`.
    #[must_use]
    pub fn new(questions: Vec<Question>, starting_lives: u32) -> Self {
        let outcome = if questions.is_empty() {
            Outcome::Completed
        } else {
            Outcome::Active
        };
        Self {
            questions,
            current: 0,
            lives_remaining: starting_lives,
            correct_count: 0,
            selected: None,
            submitted: false,
            outcome,
        }
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn lives_remaining(&self) -> u32 {
        self.lives_remaining
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    #[must_use]
    pub fn selected_answer(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// The question under the cursor while the session is active.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.outcome != Outcome::Active {
            return None;
        }
        self.questions.get(self.current)
    }

    /// Whether the submitted answer was right. `None` until submission.
    #[must_use]
    pub fn last_answer_correct(&self) -> Option<bool> {
        if !self.submitted {
            return None;
        }
        let question = self.questions.get(self.current)?;
        self.selected.as_deref().map(|a| question.is_correct(a))
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            total: self.questions.len(),
            answered: self.current + usize::from(self.submitted),
            remaining: self.questions.len().saturating_sub(self.current),
            correct: self.correct_count,
            lives_remaining: self.lives_remaining,
            outcome: self.outcome,
        }
    }

    #[must_use]
    pub fn summary(&self) -> QuizSummary {
        QuizSummary {
            total: self.questions.len(),
            correct: self.correct_count,
            lives_remaining: self.lives_remaining,
            outcome: self.outcome,
        }
    }

    /// Route an intent to the matching transition.
    ///
    /// # Errors
    ///
    /// Propagates the error of the underlying transition.
    pub fn dispatch(&mut self, intent: Intent) -> Result<Vec<Effect>, QuizError> {
        match intent {
            Intent::Select(answer) => self.select_answer(answer),
            Intent::Submit => self.submit_answer(),
            Intent::Advance => self.advance(),
        }
    }

    /// Pick an answer for the current question. Ignored once submitted.
    ///
    /// Emits a pronunciation request when the answer is written in Japanese.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidSessionState` on a finished session and
    /// `QuizError::InvalidAnswer` if the text is not one of the listed answers.
    pub fn select_answer(&mut self, answer: impl Into<String>) -> Result<Vec<Effect>, QuizError> {
        self.ensure_active()?;
        if self.submitted {
            return Ok(Vec::new());
        }

        let answer = answer.into();
        let question = self.question_at_cursor()?;
        if !question.has_answer(&answer) {
            return Err(QuizError::InvalidAnswer { answer });
        }

        let mut effects = Vec::new();
        if needs_pronunciation(&answer) {
            effects.push(Effect::Speak {
                text: answer.clone(),
                locale: JAPANESE_LOCALE,
            });
        }
        self.selected = Some(answer);
        Ok(effects)
    }

    /// Check the selected answer against the current question.
    ///
    /// A correct answer raises the score, a wrong one costs a life.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidSessionState` on a finished session and
    /// `QuizError::NoAnswerSelected` when nothing is selected or the answer was
    /// already submitted.
    pub fn submit_answer(&mut self) -> Result<Vec<Effect>, QuizError> {
        self.ensure_active()?;
        if self.submitted {
            return Err(QuizError::NoAnswerSelected);
        }
        let Some(selected) = self.selected.as_deref() else {
            return Err(QuizError::NoAnswerSelected);
        };

        let correct = self.question_at_cursor()?.is_correct(selected);
        self.submitted = true;
        let cue = if correct {
            self.correct_count = self.correct_count.saturating_add(1);
            Cue::Correct
        } else {
            self.lives_remaining = self.lives_remaining.saturating_sub(1);
            Cue::Incorrect
        };
        Ok(vec![Effect::Cue(cue)])
    }

    /// Move past a submitted question and evaluate termination.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidSessionState` on a finished session and
    /// `QuizError::NotYetSubmitted` if the current answer was not submitted.
    pub fn advance(&mut self) -> Result<Vec<Effect>, QuizError> {
        self.ensure_active()?;
        if !self.submitted {
            return Err(QuizError::NotYetSubmitted);
        }

        self.current += 1;
        self.selected = None;
        self.submitted = false;

        if self.lives_remaining == 0 {
            self.outcome = Outcome::Lost;
        } else if self.current >= self.questions.len() {
            self.outcome = Outcome::Completed;
        }

        if self.outcome.is_terminal() {
            Ok(vec![Effect::Cue(Cue::SessionEnd)])
        } else {
            Ok(Vec::new())
        }
    }

    fn ensure_active(&self) -> Result<(), QuizError> {
        if self.outcome.is_terminal() {
            return Err(QuizError::InvalidSessionState(self.outcome));
        }
        Ok(())
    }

    // An active session always has a question under the cursor.
    fn question_at_cursor(&self) -> Result<&Question, QuizError> {
        self.questions
            .get(self.current)
            .ok_or(QuizError::InvalidSessionState(self.outcome))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
