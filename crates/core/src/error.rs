use thiserror::Error;

use crate::model::{LessonError, ScoreError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Lesson(#[from] LessonError),
    #[error(transparent)]
    Score(#[from] ScoreError),
}
