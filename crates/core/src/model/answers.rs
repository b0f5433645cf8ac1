use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::ids::QuestionId;
use crate::model::lesson::Question;

/// The learner's current free-text input, keyed by question.
///
/// Missing entries and empty strings both mean "unanswered".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerMap(BTreeMap<QuestionId, String>);

impl AnswerMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace or insert the answer for `id`. Other entries are untouched.
    pub fn set(&mut self, id: QuestionId, value: impl Into<String>) {
        self.0.insert(id, value.into());
    }

    #[must_use]
    pub fn get(&self, id: &QuestionId) -> Option<&str> {
        self.0.get(id).map(String::as_str)
    }

    /// True when the entry exists and is non-empty.
    #[must_use]
    pub fn is_answered(&self, id: &QuestionId) -> bool {
        self.get(id).is_some_and(|value| !value.is_empty())
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &str)> {
        self.0.iter().map(|(id, value)| (id, value.as_str()))
    }

    /// Copy of this map with an entry for every question, `""` where unanswered.
    ///
    /// Entries for ids outside `questions` are kept as-is.
    #[must_use]
    pub fn completed_for(&self, questions: &[Question]) -> Self {
        let mut completed = self.clone();
        for question in questions {
            completed.0.entry(question.id.clone()).or_default();
        }
        completed
    }
}

impl<K: Into<QuestionId>, V: Into<String>> FromIterator<(K, V)> for AnswerMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(id, value)| (id.into(), value.into()))
                .collect(),
        )
    }
}
