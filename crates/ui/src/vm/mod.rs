mod labels;
mod lesson_vm;
mod result_vm;
mod screen_vm;

pub use labels::{format_duration, format_lesson_meta, format_progress};
pub use lesson_vm::{
    LessonHeaderVm, LessonListItemVm, QuestionVm, map_lesson_list, map_questions,
};
pub use result_vm::ResultVm;
pub use screen_vm::{ErrorBannerVm, SessionScreenVm, map_session_screen};
