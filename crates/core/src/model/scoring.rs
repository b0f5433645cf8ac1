use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::QuestionId;

/// Errors raised when a scoring payload is internally inconsistent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoreError {
    #[error("score {score} exceeds total {total}")]
    ScoreExceedsTotal { score: u32, total: u32 },
}

/// Outcome of scoring one submission.
///
/// `score <= total` always holds for a constructed value. Feedback entries are
/// optional per question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawScoringResult")]
pub struct ScoringResult {
    score: u32,
    total: u32,
    feedback: BTreeMap<QuestionId, String>,
}

impl ScoringResult {
    /// # Errors
    ///
    /// Returns `ScoreError::ScoreExceedsTotal` when `score > total`.
    pub fn new(
        score: u32,
        total: u32,
        feedback: BTreeMap<QuestionId, String>,
    ) -> Result<Self, ScoreError> {
        if score > total {
            return Err(ScoreError::ScoreExceedsTotal { score, total });
        }
        Ok(Self {
            score,
            total,
            feedback,
        })
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn feedback(&self) -> &BTreeMap<QuestionId, String> {
        &self.feedback
    }

    #[must_use]
    pub fn feedback_for(&self, id: &QuestionId) -> Option<&str> {
        self.feedback.get(id).map(String::as_str)
    }
}

impl fmt::Display for ScoringResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.score, self.total)
    }
}

#[derive(Deserialize)]
struct RawScoringResult {
    score: u32,
    total: u32,
    #[serde(default)]
    feedback: BTreeMap<QuestionId, String>,
}

impl TryFrom<RawScoringResult> for ScoringResult {
    type Error = ScoreError;

    fn try_from(raw: RawScoringResult) -> Result<Self, Self::Error> {
        Self::new(raw.score, raw.total, raw.feedback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_score_over_total() {
        let result = ScoringResult::new(1, 2, BTreeMap::new()).unwrap();
        assert_eq!(result.to_string(), "1 / 2");
    }

    #[test]
    fn rejects_score_above_total() {
        assert_eq!(
            ScoringResult::new(3, 2, BTreeMap::new()),
            Err(ScoreError::ScoreExceedsTotal { score: 3, total: 2 })
        );
        assert!(serde_json::from_str::<ScoringResult>(r#"{"score":3,"total":2,"feedback":{}}"#).is_err());
    }

    #[test]
    fn rejects_negative_numbers() {
        assert!(serde_json::from_str::<ScoringResult>(r#"{"score":-1,"total":2,"feedback":{}}"#).is_err());
    }

    #[test]
    fn decodes_feedback_by_question() {
        let result: ScoringResult =
            serde_json::from_str(r#"{"score":1,"total":1,"feedback":{"q1":"Correct"}}"#).unwrap();
        assert_eq!(result.feedback_for(&QuestionId::new("q1")), Some("Correct"));
        assert_eq!(result.feedback_for(&QuestionId::new("q2")), None);
    }
}
