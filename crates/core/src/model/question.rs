use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::category::fold;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyPrompt,

    #[error("a question needs at least 2 answers, got {len}")]
    TooFewAnswers { len: usize },

    #[error("answer {index} is empty")]
    EmptyAnswer { index: usize },

    #[error("correct answer {answer:?} is not one of the listed answers")]
    CorrectAnswerMissing { answer: String },

    #[error("question {index} is invalid: {source}")]
    InvalidEntry {
        index: usize,
        #[source]
        source: Box<QuestionError>,
    },

    #[error("malformed question document: {0}")]
    Malformed(String),
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single multiple-choice question.
///
/// Serialized with the field names used by the question feed:
/// `{ "question", "answers", "correctAnswer", "category" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    question: String,
    answers: Vec<String>,
    correct_answer: String,
    #[serde(default)]
    category: String,
}

impl Question {
    /// Build a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt is blank, fewer than two answers are
    /// given, an answer is blank, or the correct answer is not listed.
    pub fn new(
        question: impl Into<String>,
        answers: Vec<String>,
        correct_answer: impl Into<String>,
        category: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let built = Self {
            question: question.into(),
            answers,
            correct_answer: correct_answer.into(),
            category: category.into(),
        };
        built.validate()?;
        Ok(built)
    }

    /// Check the structural rules a deserialized question must satisfy.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Question::new`].
    pub fn validate(&self) -> Result<(), QuestionError> {
        if self.question.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if self.answers.len() < 2 {
            return Err(QuestionError::TooFewAnswers {
                len: self.answers.len(),
            });
        }
        if let Some(index) = self.answers.iter().position(|a| a.trim().is_empty()) {
            return Err(QuestionError::EmptyAnswer { index });
        }
        if !self.has_answer(&self.correct_answer) {
            return Err(QuestionError::CorrectAnswerMissing {
                answer: self.correct_answer.clone(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Exact text comparison against the listed answers.
    #[must_use]
    pub fn has_answer(&self, answer: &str) -> bool {
        self.answers.iter().any(|a| a == answer)
    }

    #[must_use]
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }
}

//
// ─── QUESTION SET ──────────────────────────────────────────────────────────────
//

/// The `{ "questions": [...] }` document served by bundled assets, the cache and
/// the remote feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    /// Build a set from already validated questions.
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// Parse and validate a JSON question document.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::Malformed` for invalid JSON, or
    /// `QuestionError::InvalidEntry` for the first question that fails validation.
    pub fn from_json(raw: &str) -> Result<Self, QuestionError> {
        let set: Self =
            serde_json::from_str(raw).map_err(|e| QuestionError::Malformed(e.to_string()))?;
        set.validate()?;
        Ok(set)
    }

    /// Serialize the set back into its JSON document form.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::Malformed` if serialization fails.
    pub fn to_json(&self) -> Result<String, QuestionError> {
        serde_json::to_string(self).map_err(|e| QuestionError::Malformed(e.to_string()))
    }

    /// Validate every question, reporting the index of the first failure.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::InvalidEntry` wrapping the underlying cause.
    pub fn validate(&self) -> Result<(), QuestionError> {
        for (index, question) in self.questions.iter().enumerate() {
            question
                .validate()
                .map_err(|source| QuestionError::InvalidEntry {
                    index,
                    source: Box::new(source),
                })?;
        }
        Ok(())
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn into_questions(self) -> Vec<Question> {
        self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Questions whose category matches `category`, ignoring case and accents.
    /// Order is kept.
    #[must_use]
    pub fn filter_category(&self, category: &str) -> Vec<Question> {
        let wanted = fold(category.trim());
        self.questions
            .iter()
            .filter(|q| fold(q.category.trim()) == wanted)
            .cloned()
            .collect()
    }

    /// Distinct category names in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for q in &self.questions {
            if !seen.contains(&q.category.as_str()) {
                seen.push(&q.category);
            }
        }
        seen
    }
}
