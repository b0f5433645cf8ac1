use listen_core::model::{AnswerMap, LessonDetail, LessonId, LessonSummary, QuestionId, ScoringResult};

use crate::vm::labels::{format_duration, format_lesson_meta};

/// Entry in the lesson list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonListItemVm {
    pub id: LessonId,
    pub title: String,
    pub description: String,
    pub meta_label: String,
    pub is_active: bool,
}

impl LessonListItemVm {
    #[must_use]
    pub fn new(summary: &LessonSummary, selected: Option<&LessonId>) -> Self {
        Self {
            id: summary.id.clone(),
            title: summary.title.clone(),
            description: summary.description.clone(),
            meta_label: format_lesson_meta(&summary.level, summary.duration_minutes),
            is_active: selected == Some(&summary.id),
        }
    }
}

#[must_use]
pub fn map_lesson_list(
    lessons: &[LessonSummary],
    selected: Option<&LessonId>,
) -> Vec<LessonListItemVm> {
    lessons
        .iter()
        .map(|summary| LessonListItemVm::new(summary, selected))
        .collect()
}

/// Title block, audio and (optionally) transcript of the open lesson.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonHeaderVm {
    pub title: String,
    pub description: String,
    pub level_label: String,
    pub duration_label: String,
    pub audio_url: String,
    pub transcript: Option<String>,
}

impl LessonHeaderVm {
    #[must_use]
    pub fn new(lesson: &LessonDetail, show_transcript: bool) -> Self {
        let summary = lesson.summary();
        Self {
            title: summary.title.clone(),
            description: summary.description.clone(),
            level_label: format!("Level: {}", summary.level),
            duration_label: format!("Duration: {}", format_duration(summary.duration_minutes)),
            audio_url: lesson.audio_url().to_string(),
            transcript: show_transcript.then(|| lesson.transcript().to_string()),
        }
    }
}

/// One question row: prompt, current input and feedback from the last score.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub id: QuestionId,
    pub prompt: String,
    pub answer: String,
    pub feedback: Option<String>,
}

/// Questions in display order. Feedback for ids not in the lesson is never shown.
#[must_use]
pub fn map_questions(
    lesson: &LessonDetail,
    answers: &AnswerMap,
    result: Option<&ScoringResult>,
) -> Vec<QuestionVm> {
    lesson
        .questions()
        .iter()
        .map(|question| QuestionVm {
            id: question.id.clone(),
            prompt: question.prompt.clone(),
            answer: answers.get(&question.id).unwrap_or_default().to_string(),
            feedback: result
                .and_then(|result| result.feedback_for(&question.id))
                .filter(|text| !text.is_empty())
                .map(str::to_string),
        })
        .collect()
}
