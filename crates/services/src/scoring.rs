use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use listen_core::model::{AnswerMap, LessonId, ScoringResult};

use crate::config::ApiConfig;
use crate::error::{ConfigError, ScoringError, TransportError};
use crate::http::read_json;

/// Evaluates a set of answers for one lesson.
#[async_trait]
pub trait ScoringService: Send + Sync {
    /// Submit `answers` for `lesson_id` and return the score.
    ///
    /// # Errors
    ///
    /// Returns `ScoringError::Unavailable` on transport failure, a non-2xx
    /// status, or a response that does not decode into a valid result.
    async fn submit_answers(
        &self,
        lesson_id: &LessonId,
        answers: &AnswerMap,
    ) -> Result<ScoringResult, ScoringError>;
}

/// `ScoringService` backed by the HTTP JSON API.
#[derive(Clone, Debug)]
pub struct HttpScoringService {
    client: Client,
    config: ApiConfig,
}

impl HttpScoringService {
    #[must_use]
    pub fn new(client: Client, config: ApiConfig) -> Self {
        Self { client, config }
    }

    /// # Errors
    ///
    /// Returns `ConfigError::Client` if the HTTP client cannot be built.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.http_client()?, config.clone()))
    }
}

#[async_trait]
impl ScoringService for HttpScoringService {
    async fn submit_answers(
        &self,
        lesson_id: &LessonId,
        answers: &AnswerMap,
    ) -> Result<ScoringResult, ScoringError> {
        let url = self
            .config
            .endpoint(&["api", "lessons", lesson_id.as_str(), "submit"]);
        let response = self
            .client
            .post(url)
            .json(&SubmitRequest { answers })
            .send()
            .await
            .map_err(TransportError::from)?;
        Ok(read_json(response).await?)
    }
}

#[derive(Debug, Serialize)]
struct SubmitRequest<'a> {
    answers: &'a AnswerMap,
}
