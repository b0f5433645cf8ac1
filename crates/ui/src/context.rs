use services::LessonApi;

/// Services handed to the UI by the composition root (`crates/app`).
#[derive(Clone)]
pub struct AppContext {
    api: LessonApi,
}

impl AppContext {
    #[must_use]
    pub fn new(api: LessonApi) -> Self {
        Self { api }
    }

    #[must_use]
    pub fn api(&self) -> LessonApi {
        self.api.clone()
    }
}
