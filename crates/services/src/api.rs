use std::sync::Arc;

use crate::catalog::{HttpLessonCatalog, LessonCatalog};
use crate::config::ApiConfig;
use crate::error::ConfigError;
use crate::in_memory::InMemoryLessonApi;
use crate::scoring::{HttpScoringService, ScoringService};

/// Catalog and scorer behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct LessonApi {
    pub catalog: Arc<dyn LessonCatalog>,
    pub scoring: Arc<dyn ScoringService>,
}

impl LessonApi {
    /// Both services over HTTP, sharing one client.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Client` if the HTTP client cannot be built.
    pub fn http(config: &ApiConfig) -> Result<Self, ConfigError> {
        let client = config.http_client()?;
        let catalog: Arc<dyn LessonCatalog> =
            Arc::new(HttpLessonCatalog::new(client.clone(), config.clone()));
        let scoring: Arc<dyn ScoringService> =
            Arc::new(HttpScoringService::new(client, config.clone()));
        Ok(Self { catalog, scoring })
    }

    #[must_use]
    pub fn in_memory(api: InMemoryLessonApi) -> Self {
        let catalog: Arc<dyn LessonCatalog> = Arc::new(api.clone());
        let scoring: Arc<dyn ScoringService> = Arc::new(api);
        Self { catalog, scoring }
    }
}
