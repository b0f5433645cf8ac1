use crate::model::{AnswerMap, Question};

/// Number of questions with a non-empty answer.
#[must_use]
pub fn answered_count(questions: &[Question], answers: &AnswerMap) -> usize {
    questions
        .iter()
        .filter(|question| answers.is_answered(&question.id))
        .count()
}

/// Percentage of questions answered, rounded half-up. Zero questions yield `0`.
#[must_use]
pub fn compute_progress(questions: &[Question], answers: &AnswerMap) -> u8 {
    let total = questions.len();
    if total == 0 {
        return 0;
    }
    let answered = answered_count(questions, answers);
    // floor(100k/n + 1/2) without leaving integers.
    let percent = (200 * answered + total) / (2 * total);
    u8::try_from(percent).unwrap_or(100)
}
