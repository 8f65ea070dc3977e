use async_trait::async_trait;
use quiz_core::model::QuestionSet;

use super::QuestionSource;
use crate::error::QuestionSourceError;

const EMBEDDED: &str = include_str!("../../assets/questions.json");

/// Question set shipped inside the binary; the last fallback of the loader.
#[derive(Debug, Clone)]
pub struct BundledQuestions {
    inner: Inner,
}

#[derive(Debug, Clone)]
enum Inner {
    Embedded,
    Set(QuestionSet),
}

impl BundledQuestions {
    /// The question document compiled into the crate.
    #[must_use]
    pub fn embedded() -> Self {
        Self {
            inner: Inner::Embedded,
        }
    }

    /// Serve an in-memory set instead of the embedded document.
    #[must_use]
    pub fn from_set(set: QuestionSet) -> Self {
        Self {
            inner: Inner::Set(set),
        }
    }
}

#[async_trait]
impl QuestionSource for BundledQuestions {
    fn describe(&self) -> String {
        match self.inner {
            Inner::Embedded => "bundled questions".to_string(),
            Inner::Set(_) => "in-memory questions".to_string(),
        }
    }

    async fn fetch(&self) -> Result<QuestionSet, QuestionSourceError> {
        match &self.inner {
            Inner::Embedded => Ok(QuestionSet::from_json(EMBEDDED)?),
            Inner::Set(set) => Ok(set.clone()),
        }
    }
}
