//! Shared error types for the services crate.

use thiserror::Error;

use listen_core::model::{LessonId, QuestionId};

/// Transport-level failure talking to the lesson API.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportError {
    #[error("request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid payload: {0}")]
    InvalidPayload(#[from] listen_core::Error),
    #[error("service unreachable: {0}")]
    Unreachable(String),
}

/// Errors emitted by `LessonCatalog` implementations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("lesson {0} was not found")]
    LessonNotFound(LessonId),
    #[error("lesson catalog unavailable: {0}")]
    Unavailable(#[from] TransportError),
}

/// Errors emitted by `ScoringService` implementations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScoringError {
    #[error("scoring service unavailable: {0}")]
    Unavailable(#[from] TransportError),
}

/// Errors emitted while building API configuration or HTTP clients.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid API base URL {raw:?}: {source}")]
    InvalidBaseUrl {
        raw: String,
        #[source]
        source: url::ParseError,
    },
    #[error("API base URL must be http or https, got {0:?}")]
    UnsupportedScheme(String),
    #[error("invalid timeout {raw:?}: expected a positive number of seconds")]
    InvalidTimeout { raw: String },
    #[error(transparent)]
    Client(#[from] reqwest::Error),
}

/// Intents rejected by the session state machine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransitionError {
    #[error("session already started")]
    AlreadyStarted,
    #[error("lesson {0} is not in the lesson list")]
    UnknownLesson(LessonId),
    #[error("question {0} is not part of the current lesson")]
    UnknownQuestion(QuestionId),
    #[error("no lesson is loaded")]
    NoLesson,
    #[error("nothing to retry")]
    NothingToRetry,
}
