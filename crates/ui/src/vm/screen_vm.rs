use services::{FailedOperation, SessionFailure, SessionPhase, SessionState};

use crate::vm::labels::format_progress;
use crate::vm::lesson_vm::{
    LessonHeaderVm, LessonListItemVm, QuestionVm, map_lesson_list, map_questions,
};
use crate::vm::result_vm::ResultVm;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorBannerVm {
    pub message: &'static str,
    pub detail: String,
}

impl From<&SessionFailure> for ErrorBannerVm {
    fn from(failure: &SessionFailure) -> Self {
        let message = match failure.operation {
            FailedOperation::ListLessons => "Could not load lessons.",
            FailedOperation::LoadLesson => "Could not load this lesson.",
            FailedOperation::Submit => "Could not submit answers.",
        };
        Self {
            message,
            detail: failure.message.clone(),
        }
    }
}

/// Everything the session screen shows, derived from `SessionState` alone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionScreenVm {
    pub lessons: Vec<LessonListItemVm>,
    pub lesson: Option<LessonHeaderVm>,
    pub questions: Vec<QuestionVm>,
    pub progress: u8,
    pub progress_label: String,
    pub result: Option<ResultVm>,
    pub status_label: &'static str,
    /// Nothing to show yet: the first lesson list is still on its way.
    pub is_initial_loading: bool,
    pub is_busy: bool,
    pub can_submit: bool,
    pub error: Option<ErrorBannerVm>,
}

#[must_use]
pub fn map_session_screen(state: &SessionState) -> SessionScreenVm {
    let phase = state.phase();
    let lesson = state.lesson();
    let progress = state.progress();

    SessionScreenVm {
        lessons: map_lesson_list(state.lessons(), state.selected_id()),
        lesson: lesson.map(|lesson| LessonHeaderVm::new(lesson, state.transcript_visible())),
        questions: lesson
            .map(|lesson| map_questions(lesson, state.answers(), state.result()))
            .unwrap_or_default(),
        progress,
        progress_label: format_progress(progress),
        result: state.result().map(ResultVm::from),
        status_label: phase.label(),
        is_initial_loading: phase == SessionPhase::CatalogLoading && state.lessons().is_empty(),
        is_busy: matches!(
            phase,
            SessionPhase::CatalogLoading | SessionPhase::LessonLoading | SessionPhase::Submitting
        ),
        can_submit: state.is_lesson_loaded(),
        error: state.last_failure().map(ErrorBannerVm::from),
    }
}
