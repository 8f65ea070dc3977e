use std::time::Duration;

use async_trait::async_trait;
use quiz_core::model::QuestionSet;
use reqwest::Client;

use super::QuestionSource;
use crate::error::QuestionSourceError;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug)]
pub struct RemoteQuestionsConfig {
    pub url: String,
    pub timeout: Duration,
}

impl RemoteQuestionsConfig {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Fetches the `{ "questions": [...] }` document over HTTP.
///
/// A single GET per fetch; retries and backoff are left to the caller.
#[derive(Clone)]
pub struct RemoteQuestions {
    client: Client,
    config: RemoteQuestionsConfig,
}

impl RemoteQuestions {
    #[must_use]
    pub fn new(config: RemoteQuestionsConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl QuestionSource for RemoteQuestions {
    fn describe(&self) -> String {
        format!("remote feed {}", self.config.url)
    }

    async fn fetch(&self) -> Result<QuestionSet, QuestionSourceError> {
        let response = self
            .client
            .get(&self.config.url)
            .timeout(self.config.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(QuestionSourceError::HttpStatus(response.status()));
        }

        let body = response.text().await?;
        let set = QuestionSet::from_json(&body)?;
        tracing::debug!(url = %self.config.url, questions = set.len(), "fetched question feed");
        Ok(set)
    }
}
