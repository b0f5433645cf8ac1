use std::fmt;

use listen_core::compute_progress;
use listen_core::model::{AnswerMap, LessonDetail, LessonId, LessonSummary, ScoringResult};

//
// ─── PHASE ─────────────────────────────────────────────────────────────────────
//

/// Where the session is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    CatalogLoading,
    CatalogLoaded,
    LessonLoading,
    LessonReady,
    Submitting,
}

impl SessionPhase {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SessionPhase::Idle => "Idle",
            SessionPhase::CatalogLoading => "Loading lessons",
            SessionPhase::CatalogLoaded => "Lessons loaded",
            SessionPhase::LessonLoading => "Loading lesson",
            SessionPhase::LessonReady => "Ready",
            SessionPhase::Submitting => "Submitting",
        }
    }
}

//
// ─── TICKETS ───────────────────────────────────────────────────────────────────
//

/// Tag attached to an in-flight request. Only the latest ticket of each kind
/// may change state when its response arrives.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ticket({})", self.0)
    }
}

//
// ─── FAILURES ──────────────────────────────────────────────────────────────────
//

/// Which background operation failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailedOperation {
    ListLessons,
    LoadLesson,
    Submit,
}

/// The most recent failure, kept so callers can show it and offer a retry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionFailure {
    pub operation: FailedOperation,
    pub message: String,
}

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Client-side session: lesson list, selection, answers and last score.
///
/// Answers and result always belong to the selected lesson. Mutation happens
/// only through `apply_intent` and `apply_completion`.
#[derive(Clone)]
pub struct SessionState {
    pub(super) phase: SessionPhase,
    pub(super) lessons: Vec<LessonSummary>,
    pub(super) selected: Option<LessonId>,
    pub(super) lesson: Option<LessonDetail>,
    pub(super) answers: AnswerMap,
    pub(super) result: Option<ScoringResult>,
    pub(super) show_transcript: bool,
    pub(super) pending_lesson: Option<Ticket>,
    pub(super) pending_submission: Option<Ticket>,
    pub(super) last_failure: Option<SessionFailure>,
    next_ticket: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::Idle,
            lessons: Vec::new(),
            selected: None,
            lesson: None,
            answers: AnswerMap::new(),
            result: None,
            show_transcript: false,
            pending_lesson: None,
            pending_submission: None,
            last_failure: None,
            next_ticket: 1,
        }
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn lessons(&self) -> &[LessonSummary] {
        &self.lessons
    }

    #[must_use]
    pub fn selected_id(&self) -> Option<&LessonId> {
        self.selected.as_ref()
    }

    /// The loaded detail for the selected lesson, if it has arrived.
    #[must_use]
    pub fn lesson(&self) -> Option<&LessonDetail> {
        self.lesson.as_ref()
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    #[must_use]
    pub fn result(&self) -> Option<&ScoringResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn transcript_visible(&self) -> bool {
        self.show_transcript
    }

    #[must_use]
    pub fn last_failure(&self) -> Option<&SessionFailure> {
        self.last_failure.as_ref()
    }

    /// Percent of the loaded lesson's questions with a non-empty answer.
    #[must_use]
    pub fn progress(&self) -> u8 {
        self.lesson
            .as_ref()
            .map_or(0, |lesson| compute_progress(lesson.questions(), &self.answers))
    }

    #[must_use]
    pub fn is_lesson_loaded(&self) -> bool {
        matches!(
            self.phase,
            SessionPhase::LessonReady | SessionPhase::Submitting
        ) && self.lesson.is_some()
    }

    pub(super) fn issue_ticket(&mut self) -> Ticket {
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        ticket
    }
}

impl fmt::Debug for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionState")
            .field("phase", &self.phase)
            .field("lessons_len", &self.lessons.len())
            .field("selected", &self.selected)
            .field("lesson_loaded", &self.lesson.is_some())
            .field("answers_len", &self.answers.len())
            .field("has_result", &self.result.is_some())
            .field("pending_lesson", &self.pending_lesson)
            .field("pending_submission", &self.pending_submission)
            .field("last_failure", &self.last_failure)
            .finish_non_exhaustive()
    }
}
