mod answers;
mod ids;
mod lesson;
mod scoring;

pub use ids::{LessonId, ParseIdError, QuestionId};

pub use answers::AnswerMap;
pub use lesson::{LessonDetail, LessonError, LessonSummary, Question};
pub use scoring::{ScoreError, ScoringResult};
