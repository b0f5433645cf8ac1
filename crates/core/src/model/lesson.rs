use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{LessonId, QuestionId};

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Errors raised while building a lesson from catalog data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonError {
    #[error("question id {0} appears more than once")]
    DuplicateQuestion(QuestionId),
}

//
// ─── SUMMARY ──────────────────────────────────────────────────────────────────
//

/// Catalog entry for a lesson, as shown in the lesson list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonSummary {
    pub id: LessonId,
    pub title: String,
    pub level: String,
    pub duration_minutes: u32,
    pub description: String,
}

/// A comprehension question. Order within a lesson is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub prompt: String,
}

impl Question {
    #[must_use]
    pub fn new(id: impl Into<QuestionId>, prompt: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
        }
    }
}

//
// ─── DETAIL ───────────────────────────────────────────────────────────────────
//

/// Full lesson record: summary fields plus audio, transcript and questions.
///
/// On the wire the summary fields sit at the top level next to the detail
/// fields. Question ids are unique within a lesson; payloads that repeat an id
/// fail to deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLessonDetail")]
pub struct LessonDetail {
    #[serde(flatten)]
    summary: LessonSummary,
    audio_url: String,
    transcript: String,
    questions: Vec<Question>,
}

impl LessonDetail {
    /// Build a lesson detail.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::DuplicateQuestion` if two questions share an id.
    pub fn new(
        summary: LessonSummary,
        audio_url: impl Into<String>,
        transcript: impl Into<String>,
        questions: Vec<Question>,
    ) -> Result<Self, LessonError> {
        let mut seen = HashSet::with_capacity(questions.len());
        for question in &questions {
            if !seen.insert(&question.id) {
                return Err(LessonError::DuplicateQuestion(question.id.clone()));
            }
        }

        Ok(Self {
            summary,
            audio_url: audio_url.into(),
            transcript: transcript.into(),
            questions,
        })
    }

    #[must_use]
    pub fn id(&self) -> &LessonId {
        &self.summary.id
    }

    #[must_use]
    pub fn summary(&self) -> &LessonSummary {
        &self.summary
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.summary.title
    }

    #[must_use]
    pub fn audio_url(&self) -> &str {
        &self.audio_url
    }

    #[must_use]
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// Questions in display order.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn has_question(&self, id: &QuestionId) -> bool {
        self.questions.iter().any(|question| &question.id == id)
    }
}

#[derive(Deserialize)]
struct RawLessonDetail {
    #[serde(flatten)]
    summary: LessonSummary,
    audio_url: String,
    transcript: String,
    questions: Vec<Question>,
}

impl TryFrom<RawLessonDetail> for LessonDetail {
    type Error = LessonError;

    fn try_from(raw: RawLessonDetail) -> Result<Self, Self::Error> {
        Self::new(raw.summary, raw.audio_url, raw.transcript, raw.questions)
    }
}
