#![forbid(unsafe_code)]

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
mod http;
pub mod in_memory;
pub mod scoring;
pub mod sessions;

pub use api::LessonApi;
pub use catalog::{HttpLessonCatalog, LessonCatalog};
pub use config::ApiConfig;
pub use error::{CatalogError, ConfigError, ScoringError, TransitionError, TransportError};
pub use in_memory::{InMemoryLessonApi, RecordedSubmission};
pub use scoring::{HttpScoringService, ScoringService};

pub use sessions::{
    Completion, FailedOperation, SessionCommand, SessionDriver, SessionFailure, SessionIntent,
    SessionPhase, SessionState, Ticket,
};
