use std::fmt;

use listen_core::model::{
    AnswerMap, LessonDetail, LessonId, LessonSummary, QuestionId, ScoringResult,
};
use tracing::{debug, info, warn};

use crate::error::{CatalogError, ScoringError, TransitionError};
use super::state::{FailedOperation, SessionFailure, SessionPhase, SessionState, Ticket};

//
// ─── INPUTS & OUTPUTS ──────────────────────────────────────────────────────────
//

/// Something the learner asked for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionIntent {
    Start,
    Select(LessonId),
    Answer { question: QuestionId, text: String },
    Submit,
    ToggleTranscript,
    Retry,
}

/// Result of a request issued by a `SessionCommand`.
#[derive(Debug)]
pub enum Completion {
    CatalogLoaded(Result<Vec<LessonSummary>, CatalogError>),
    LessonLoaded {
        ticket: Ticket,
        result: Result<LessonDetail, CatalogError>,
    },
    Scored {
        ticket: Ticket,
        result: Result<ScoringResult, ScoringError>,
    },
}

/// I/O the caller must perform; each one answers with exactly one `Completion`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    FetchCatalog,
    FetchLesson {
        ticket: Ticket,
        lesson_id: LessonId,
    },
    SubmitAnswers {
        ticket: Ticket,
        lesson_id: LessonId,
        answers: AnswerMap,
    },
}

//
// ─── REDUCER ───────────────────────────────────────────────────────────────────
//

impl SessionState {
    /// Apply a learner intent.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError` when the intent is not valid in the current
    /// state; the state is left unchanged in that case.
    pub fn apply_intent(
        &mut self,
        intent: SessionIntent,
    ) -> Result<Vec<SessionCommand>, TransitionError> {
        match intent {
            SessionIntent::Start => self.start(),
            SessionIntent::Select(id) => self.select(id),
            SessionIntent::Answer { question, text } => {
                self.answer(question, text)?;
                Ok(Vec::new())
            }
            SessionIntent::Submit => Ok(vec![self.submit()?]),
            SessionIntent::ToggleTranscript => {
                self.loaded_lesson()?;
                self.show_transcript = !self.show_transcript;
                Ok(Vec::new())
            }
            SessionIntent::Retry => self.retry(),
        }
    }

    /// Apply the outcome of an earlier command. Responses carrying a superseded
    /// ticket are dropped without touching state.
    pub fn apply_completion(&mut self, completion: Completion) -> Vec<SessionCommand> {
        match completion {
            Completion::CatalogLoaded(result) => self.on_catalog(result),
            Completion::LessonLoaded { ticket, result } => {
                self.on_lesson(ticket, result);
                Vec::new()
            }
            Completion::Scored { ticket, result } => {
                self.on_scored(ticket, result);
                Vec::new()
            }
        }
    }

    fn start(&mut self) -> Result<Vec<SessionCommand>, TransitionError> {
        if self.phase != SessionPhase::Idle {
            return Err(TransitionError::AlreadyStarted);
        }
        Ok(vec![self.begin_catalog_load()])
    }

    fn select(&mut self, id: LessonId) -> Result<Vec<SessionCommand>, TransitionError> {
        if !self.lessons.iter().any(|lesson| lesson.id == id) {
            return Err(TransitionError::UnknownLesson(id));
        }

        let already_current = self.selected.as_ref() == Some(&id)
            && matches!(
                self.phase,
                SessionPhase::LessonLoading | SessionPhase::LessonReady | SessionPhase::Submitting
            );
        if already_current {
            return Ok(Vec::new());
        }

        Ok(vec![self.begin_lesson_load(id)])
    }

    fn answer(&mut self, question: QuestionId, text: String) -> Result<(), TransitionError> {
        if !self.loaded_lesson()?.has_question(&question) {
            return Err(TransitionError::UnknownQuestion(question));
        }
        self.answers.set(question, text);
        Ok(())
    }

    fn submit(&mut self) -> Result<SessionCommand, TransitionError> {
        let lesson = self.loaded_lesson()?;
        let lesson_id = lesson.id().clone();
        let answers = self.answers.completed_for(lesson.questions());

        self.result = None;
        self.last_failure = None;
        let ticket = self.issue_ticket();
        self.pending_submission = Some(ticket);
        self.phase = SessionPhase::Submitting;
        debug!(lesson = %lesson_id, ticket = ticket.value(), "submitting answers");

        Ok(SessionCommand::SubmitAnswers {
            ticket,
            lesson_id,
            answers,
        })
    }

    fn retry(&mut self) -> Result<Vec<SessionCommand>, TransitionError> {
        let operation = self
            .last_failure
            .as_ref()
            .map(|failure| failure.operation)
            .ok_or(TransitionError::NothingToRetry)?;

        match operation {
            FailedOperation::ListLessons if self.phase == SessionPhase::Idle => {
                Ok(vec![self.begin_catalog_load()])
            }
            FailedOperation::LoadLesson
                if self.lesson.is_none() && self.pending_lesson.is_none() =>
            {
                let id = self.selected.clone().ok_or(TransitionError::NothingToRetry)?;
                Ok(vec![self.begin_lesson_load(id)])
            }
            FailedOperation::Submit => Ok(vec![self.submit()?]),
            _ => Err(TransitionError::NothingToRetry),
        }
    }

    fn loaded_lesson(&self) -> Result<&LessonDetail, TransitionError> {
        match (self.phase, self.lesson.as_ref()) {
            (SessionPhase::LessonReady | SessionPhase::Submitting, Some(lesson)) => Ok(lesson),
            _ => Err(TransitionError::NoLesson),
        }
    }

    fn begin_catalog_load(&mut self) -> SessionCommand {
        self.phase = SessionPhase::CatalogLoading;
        self.last_failure = None;
        SessionCommand::FetchCatalog
    }

    /// Drop everything scoped to the previous lesson, then request `id`.
    fn begin_lesson_load(&mut self, id: LessonId) -> SessionCommand {
        self.lesson = None;
        self.answers.clear();
        self.result = None;
        self.show_transcript = false;
        self.pending_submission = None;
        self.last_failure = None;

        let ticket = self.issue_ticket();
        self.pending_lesson = Some(ticket);
        self.selected = Some(id.clone());
        self.phase = SessionPhase::LessonLoading;
        debug!(lesson = %id, ticket = ticket.value(), "loading lesson");

        SessionCommand::FetchLesson {
            ticket,
            lesson_id: id,
        }
    }

    fn on_catalog(
        &mut self,
        result: Result<Vec<LessonSummary>, CatalogError>,
    ) -> Vec<SessionCommand> {
        if self.phase != SessionPhase::CatalogLoading {
            debug!("ignoring lesson list outside of catalog loading");
            return Vec::new();
        }

        match result {
            Ok(lessons) => {
                info!("loaded {} lessons", lessons.len());
                self.lessons = lessons;
                match self.lessons.first().map(|lesson| lesson.id.clone()) {
                    Some(first) => vec![self.begin_lesson_load(first)],
                    None => {
                        self.phase = SessionPhase::CatalogLoaded;
                        Vec::new()
                    }
                }
            }
            Err(err) => {
                self.phase = SessionPhase::Idle;
                self.record_failure(FailedOperation::ListLessons, &err);
                Vec::new()
            }
        }
    }

    fn on_lesson(&mut self, ticket: Ticket, result: Result<LessonDetail, CatalogError>) {
        if self.pending_lesson != Some(ticket) {
            debug!(ticket = ticket.value(), "discarding stale lesson response");
            return;
        }
        self.pending_lesson = None;

        match result {
            Ok(detail) => {
                self.lesson = Some(detail);
                self.answers.clear();
                self.result = None;
                self.show_transcript = false;
                self.phase = SessionPhase::LessonReady;
            }
            Err(err) => {
                self.phase = SessionPhase::CatalogLoaded;
                self.record_failure(FailedOperation::LoadLesson, &err);
            }
        }
    }

    fn on_scored(&mut self, ticket: Ticket, result: Result<ScoringResult, ScoringError>) {
        if self.pending_submission != Some(ticket) {
            debug!(ticket = ticket.value(), "discarding stale scoring response");
            return;
        }
        self.pending_submission = None;
        self.phase = SessionPhase::LessonReady;

        match result {
            Ok(scored) => {
                let expected = self.lesson.as_ref().map(|lesson| lesson.questions().len());
                if expected != usize::try_from(scored.total()).ok() {
                    warn!(
                        total = scored.total(),
                        questions = ?expected,
                        "scoring total does not match question count"
                    );
                }
                self.result = Some(scored);
            }
            Err(err) => {
                self.result = None;
                self.record_failure(FailedOperation::Submit, &err);
            }
        }
    }

    fn record_failure(&mut self, operation: FailedOperation, error: &impl fmt::Display) {
        self.last_failure = Some(SessionFailure {
            operation,
            message: error.to_string(),
        });
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
