use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;

use listen_core::model::{
    AnswerMap, LessonDetail, LessonId, LessonSummary, Question, QuestionId, ScoringResult,
};

use crate::catalog::LessonCatalog;
use crate::error::{CatalogError, ScoringError, TransportError};
use crate::scoring::ScoringService;

/// A submission as received by `InMemoryLessonApi`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedSubmission {
    pub lesson_id: LessonId,
    pub answers: AnswerMap,
}

#[derive(Debug, Clone)]
struct StoredLesson {
    detail: LessonDetail,
    answer_key: BTreeMap<QuestionId, String>,
}

/// In-process lesson catalog and scorer.
///
/// Grades the way the lesson API does: case-insensitive, whitespace-trimmed,
/// and an answer is correct when it contains the expected text.
#[derive(Clone, Default)]
pub struct InMemoryLessonApi {
    lessons: Arc<Mutex<Vec<StoredLesson>>>,
    submissions: Arc<Mutex<Vec<RecordedSubmission>>>,
    offline: Arc<AtomicBool>,
}

impl InMemoryLessonApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with the two stock lessons.
    ///
    /// # Errors
    ///
    /// Returns `listen_core::Error` if a seeded lesson fails validation.
    pub fn with_sample_lessons() -> Result<Self, listen_core::Error> {
        let api = Self::new();
        for (detail, answer_key) in sample_lessons()? {
            api.add_lesson(detail, answer_key);
        }
        Ok(api)
    }

    /// Append a lesson with its expected answers. Replaces a lesson with the same id.
    pub fn add_lesson<I, K, V>(&self, detail: LessonDetail, answer_key: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<QuestionId>,
        V: Into<String>,
    {
        let stored = StoredLesson {
            answer_key: answer_key
                .into_iter()
                .map(|(id, answer)| (id.into(), answer.into()))
                .collect(),
            detail,
        };
        if let Ok(mut guard) = self.lessons.lock() {
            match guard
                .iter_mut()
                .find(|existing| existing.detail.id() == stored.detail.id())
            {
                Some(existing) => *existing = stored,
                None => guard.push(stored),
            }
        }
    }

    /// While offline every call fails as unavailable.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Submissions received so far, oldest first.
    #[must_use]
    pub fn submissions(&self) -> Vec<RecordedSubmission> {
        self.submissions
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    fn ensure_online(&self) -> Result<(), TransportError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(TransportError::Unreachable("in-memory api is offline".into()));
        }
        Ok(())
    }

    fn find(&self, id: &LessonId) -> Result<Option<StoredLesson>, TransportError> {
        let guard = self
            .lessons
            .lock()
            .map_err(|e| TransportError::Unreachable(e.to_string()))?;
        Ok(guard
            .iter()
            .find(|stored| stored.detail.id() == id)
            .cloned())
    }
}

#[async_trait]
impl LessonCatalog for InMemoryLessonApi {
    async fn list_lessons(&self) -> Result<Vec<LessonSummary>, CatalogError> {
        self.ensure_online()?;
        let guard = self
            .lessons
            .lock()
            .map_err(|e| TransportError::Unreachable(e.to_string()))?;
        Ok(guard
            .iter()
            .map(|stored| stored.detail.summary().clone())
            .collect())
    }

    async fn get_lesson(&self, id: &LessonId) -> Result<LessonDetail, CatalogError> {
        self.ensure_online()?;
        self.find(id)?
            .map(|stored| stored.detail)
            .ok_or_else(|| CatalogError::LessonNotFound(id.clone()))
    }
}

#[async_trait]
impl ScoringService for InMemoryLessonApi {
    async fn submit_answers(
        &self,
        lesson_id: &LessonId,
        answers: &AnswerMap,
    ) -> Result<ScoringResult, ScoringError> {
        self.ensure_online()?;
        if let Ok(mut guard) = self.submissions.lock() {
            guard.push(RecordedSubmission {
                lesson_id: lesson_id.clone(),
                answers: answers.clone(),
            });
        }

        let stored = self
            .find(lesson_id)?
            .ok_or(TransportError::HttpStatus(StatusCode::NOT_FOUND))?;
        Ok(grade(&stored, answers)?)
    }
}

fn grade(stored: &StoredLesson, answers: &AnswerMap) -> Result<ScoringResult, TransportError> {
    let mut feedback = BTreeMap::new();
    let mut score = 0u32;

    for question in stored.detail.questions() {
        let given = answers
            .get(&question.id)
            .unwrap_or_default()
            .trim()
            .to_lowercase();
        let expected = stored
            .answer_key
            .get(&question.id)
            .map(String::as_str)
            .unwrap_or_default();

        if !given.is_empty() && given.contains(&expected.trim().to_lowercase()) {
            score += 1;
            feedback.insert(question.id.clone(), "Correct".to_string());
        } else {
            feedback.insert(question.id.clone(), format!("Expected: {expected}"));
        }
    }

    let total = u32::try_from(stored.detail.questions().len()).unwrap_or(u32::MAX);
    ScoringResult::new(score, total, feedback).map_err(|e| listen_core::Error::from(e).into())
}

type SampleLesson = (LessonDetail, Vec<(&'static str, &'static str)>);

fn sample_lessons() -> Result<Vec<SampleLesson>, listen_core::Error> {
    let morning = LessonDetail::new(
        LessonSummary {
            id: LessonId::new("lesson-1"),
            title: "Morning Routine in English".into(),
            level: "A2".into(),
            duration_minutes: 6,
            description: "Practice listening to daily routine vocabulary.".into(),
        },
        "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-2.mp3",
        "Every morning, I wake up at seven. I make a cup of coffee and check my \
         schedule. On weekdays, I take the bus to the office. I like to arrive early \
         so I can review my notes before the first meeting.",
        vec![
            Question::new("q1", "What time does the speaker wake up?"),
            Question::new("q2", "How does the speaker go to the office?"),
        ],
    )?;

    let travel = LessonDetail::new(
        LessonSummary {
            id: LessonId::new("lesson-2"),
            title: "Travel Planning".into(),
            level: "B1".into(),
            duration_minutes: 8,
            description: "Listen for details about planning a trip.".into(),
        },
        "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-3.mp3",
        "We decided to visit Kyoto in October because the weather is mild. First, \
         we compared flight prices and booked a small hotel near the train station. \
         We also wrote a list of temples we want to see and reserved tickets for a \
         tea ceremony.",
        vec![
            Question::new("q1", "Why did they choose October?"),
            Question::new("q2", "Where is the hotel located?"),
        ],
    )?;

    Ok(vec![
        (morning, vec![("q1", "seven"), ("q2", "bus")]),
        (
            travel,
            vec![("q1", "mild weather"), ("q2", "near the train station")],
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lists_sample_lessons_in_order() {
        let api = InMemoryLessonApi::with_sample_lessons().unwrap();
        let lessons = api.list_lessons().await.unwrap();
        let ids: Vec<_> = lessons.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["lesson-1", "lesson-2"]);
    }

    #[tokio::test]
    async fn unknown_lesson_is_not_found() {
        let api = InMemoryLessonApi::with_sample_lessons().unwrap();
        let err = api.get_lesson(&LessonId::new("nope")).await.unwrap_err();
        assert!(matches!(err, CatalogError::LessonNotFound(id) if id.as_str() == "nope"));
    }

    #[tokio::test]
    async fn grades_by_containment_ignoring_case() {
        let api = InMemoryLessonApi::with_sample_lessons().unwrap();
        let answers: AnswerMap = [("q1", "  At SEVEN o'clock "), ("q2", "")]
            .into_iter()
            .collect();

        let result = api
            .submit_answers(&LessonId::new("lesson-1"), &answers)
            .await
            .unwrap();

        assert_eq!((result.score(), result.total()), (1, 2));
        assert_eq!(result.feedback_for(&QuestionId::new("q1")), Some("Correct"));
        assert_eq!(
            result.feedback_for(&QuestionId::new("q2")),
            Some("Expected: bus")
        );
        assert_eq!(api.submissions().len(), 1);
    }

    #[tokio::test]
    async fn offline_fails_every_call() {
        let api = InMemoryLessonApi::with_sample_lessons().unwrap();
        api.set_offline(true);
        assert!(matches!(
            api.list_lessons().await,
            Err(CatalogError::Unavailable(_))
        ));
        assert!(matches!(
            api.submit_answers(&LessonId::new("lesson-1"), &AnswerMap::new())
                .await,
            Err(ScoringError::Unavailable(_))
        ));
    }
}
