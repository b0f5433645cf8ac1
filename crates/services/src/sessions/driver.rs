use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::api::LessonApi;
use crate::catalog::LessonCatalog;
use crate::error::{TransitionError, TransportError};
use crate::scoring::ScoringService;
use super::machine::{Completion, SessionCommand, SessionIntent};
use super::state::SessionState;

/// Runs a `SessionState` against live services.
///
/// Each command becomes a tokio task that reports back through a channel;
/// the driver applies completions one at a time, so state is only ever
/// touched by its owner. Must be used inside a tokio runtime.
pub struct SessionDriver {
    state: SessionState,
    catalog: Arc<dyn LessonCatalog>,
    scoring: Arc<dyn ScoringService>,
    sender: mpsc::UnboundedSender<Completion>,
    receiver: mpsc::UnboundedReceiver<Completion>,
    in_flight: usize,
}

impl SessionDriver {
    #[must_use]
    pub fn new(api: LessonApi) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            state: SessionState::new(),
            catalog: api.catalog,
            scoring: api.scoring,
            sender,
            receiver,
            in_flight: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Requests issued but not yet applied.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Apply an intent and start whatever I/O it needs.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError` if the intent is invalid right now.
    pub fn dispatch(&mut self, intent: SessionIntent) -> Result<(), TransitionError> {
        let commands = self.state.apply_intent(intent)?;
        self.spawn_all(commands);
        Ok(())
    }

    /// Wait for the next response and apply it.
    ///
    /// Returns `false` immediately when nothing is in flight.
    pub async fn next_completion(&mut self) -> bool {
        if self.in_flight == 0 {
            return false;
        }
        let Some(completion) = self.receiver.recv().await else {
            return false;
        };
        self.in_flight -= 1;
        let commands = self.state.apply_completion(completion);
        self.spawn_all(commands);
        true
    }

    /// Apply responses until no request is outstanding.
    pub async fn settle(&mut self) {
        while self.next_completion().await {}
    }

    fn spawn_all(&mut self, commands: Vec<SessionCommand>) {
        for command in commands {
            self.spawn(command);
        }
    }

    fn spawn(&mut self, command: SessionCommand) {
        self.in_flight += 1;
        let sender = self.sender.clone();

        match command {
            SessionCommand::FetchCatalog => {
                let catalog = Arc::clone(&self.catalog);
                let request = tokio::spawn(async move { catalog.list_lessons().await });
                tokio::spawn(async move {
                    let result = joined(request).await;
                    if let Err(err) = &result {
                        warn!(error = %err, "failed to load lessons");
                    }
                    let _ = sender.send(Completion::CatalogLoaded(result));
                });
            }
            SessionCommand::FetchLesson { ticket, lesson_id } => {
                let catalog = Arc::clone(&self.catalog);
                let id = lesson_id.clone();
                let request = tokio::spawn(async move { catalog.get_lesson(&id).await });
                tokio::spawn(async move {
                    let result = joined(request).await;
                    if let Err(err) = &result {
                        warn!(lesson = %lesson_id, error = %err, "failed to load lesson");
                    }
                    let _ = sender.send(Completion::LessonLoaded { ticket, result });
                });
            }
            SessionCommand::SubmitAnswers {
                ticket,
                lesson_id,
                answers,
            } => {
                let scoring = Arc::clone(&self.scoring);
                let id = lesson_id.clone();
                let request =
                    tokio::spawn(async move { scoring.submit_answers(&id, &answers).await });
                tokio::spawn(async move {
                    let result = joined(request).await;
                    if let Err(err) = &result {
                        warn!(lesson = %lesson_id, error = %err, "failed to submit answers");
                    }
                    let _ = sender.send(Completion::Scored { ticket, result });
                });
            }
        }
    }
}

/// Await a request task. A panicked or cancelled task still yields an error,
/// so every command produces exactly one completion.
async fn joined<T, E>(request: JoinHandle<Result<T, E>>) -> Result<T, E>
where
    E: From<TransportError>,
{
    match request.await {
        Ok(result) => result,
        Err(err) => Err(TransportError::Unreachable(format!("request task failed: {err}")).into()),
    }
}
