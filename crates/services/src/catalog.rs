use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use listen_core::model::{LessonDetail, LessonId, LessonSummary};

use crate::config::ApiConfig;
use crate::error::{CatalogError, ConfigError, TransportError};
use crate::http::read_json;

/// Source of lesson summaries and full lesson records.
#[async_trait]
pub trait LessonCatalog: Send + Sync {
    /// List every lesson in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Unavailable` on transport or decode failure.
    async fn list_lessons(&self) -> Result<Vec<LessonSummary>, CatalogError>;

    /// Fetch one full lesson.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::LessonNotFound` for an unknown id, or
    /// `CatalogError::Unavailable` on transport or decode failure.
    async fn get_lesson(&self, id: &LessonId) -> Result<LessonDetail, CatalogError>;
}

/// `LessonCatalog` backed by the HTTP JSON API.
#[derive(Clone, Debug)]
pub struct HttpLessonCatalog {
    client: Client,
    config: ApiConfig,
}

impl HttpLessonCatalog {
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
impl LessonCatalog for HttpLessonCatalog {
    async fn list_lessons(&self) -> Result<Vec<LessonSummary>, CatalogError> {
        let url = self.config.endpoint(&["api", "lessons"]);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(TransportError::from)?;
        Ok(read_json(response).await?)
    }

    async fn get_lesson(&self, id: &LessonId) -> Result<LessonDetail, CatalogError> {
        let url = self.config.endpoint(&["api", "lessons", id.as_str()]);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(TransportError::from)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(CatalogError::LessonNotFound(id.clone()));
        }
        Ok(read_json(response).await?)
    }
}
