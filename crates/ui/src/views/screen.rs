use dioxus::prelude::*;

use services::SessionIntent;

use crate::vm::{
    ErrorBannerVm, LessonHeaderVm, LessonListItemVm, QuestionVm, ResultVm, SessionScreenVm,
};

/// The whole practice screen. Stateless: everything comes from `screen`, and
/// every interaction is reported through `on_intent`.
#[component]
pub fn SessionScreen(
    screen: SessionScreenVm,
    notice: Option<String>,
    on_intent: EventHandler<SessionIntent>,
) -> Element {
    if screen.is_initial_loading {
        return rsx! {
            div { class: "page",
                h2 { "ListenLearn" }
                p { class: "loading", "Loading lessons..." }
            }
        };
    }

    rsx! {
        div { class: "page session",
            header { class: "session-header",
                h2 { "ListenLearn" }
                ProgressMeter { percent: screen.progress, label: screen.progress_label.clone() }
            }

            if let Some(error) = screen.error.clone() {
                ErrorBanner { error, on_intent }
            }
            if let Some(notice) = notice {
                p { class: "session-notice", "{notice}" }
            }

            div { class: "session-body",
                LessonList { items: screen.lessons.clone(), on_intent }

                main { class: "lesson-pane",
                    match screen.lesson.clone() {
                        Some(header) => rsx! {
                            LessonPanel {
                                header,
                                questions: screen.questions.clone(),
                                can_submit: screen.can_submit && !screen.is_busy,
                                on_intent,
                            }
                        },
                        None if screen.is_busy => rsx! {
                            p { class: "loading", "{screen.status_label}..." }
                        },
                        None => rsx! {},
                    }
                    if screen.lesson.is_some() && screen.is_busy {
                        p { class: "loading", "{screen.status_label}..." }
                    }
                    if let Some(result) = screen.result.clone() {
                        ResultPanel { result }
                    }
                }
            }
        }
    }
}

#[component]
fn ProgressMeter(percent: u8, label: String) -> Element {
    rsx! {
        div { class: "progress",
            progress { max: "100", value: "{percent}" }
            span { class: "progress-label", "{label}" }
        }
    }
}

#[component]
fn ErrorBanner(error: ErrorBannerVm, on_intent: EventHandler<SessionIntent>) -> Element {
    rsx! {
        div { class: "error-banner", role: "alert",
            strong { "{error.message}" }
            span { class: "error-detail", "{error.detail}" }
            button {
                class: "btn btn-secondary",
                r#type: "button",
                onclick: move |_| on_intent.call(SessionIntent::Retry),
                "Retry"
            }
        }
    }
}

#[component]
fn LessonList(items: Vec<LessonListItemVm>, on_intent: EventHandler<SessionIntent>) -> Element {
    rsx! {
        nav { class: "lesson-list",
            h3 { "Lessons" }
            if items.is_empty() {
                p { class: "lesson-list-empty", "No lessons available." }
            } else {
                ul {
                    for item in items {
                        LessonListEntry { key: "{item.id}", item, on_intent }
                    }
                }
            }
        }
    }
}

#[component]
fn LessonListEntry(item: LessonListItemVm, on_intent: EventHandler<SessionIntent>) -> Element {
    let class = if item.is_active {
        "lesson-item lesson-item--active"
    } else {
        "lesson-item"
    };
    let id = item.id.clone();

    rsx! {
        li { class: "{class}",
            button {
                r#type: "button",
                onclick: move |_| on_intent.call(SessionIntent::Select(id.clone())),
                span { class: "lesson-title", "{item.title}" }
                span { class: "lesson-meta", "{item.meta_label}" }
            }
            if !item.description.is_empty() {
                p { class: "lesson-description", "{item.description}" }
            }
        }
    }
}

#[component]
fn LessonPanel(
    header: LessonHeaderVm,
    questions: Vec<QuestionVm>,
    can_submit: bool,
    on_intent: EventHandler<SessionIntent>,
) -> Element {
    let transcript_label = if header.transcript.is_some() {
        "Hide transcript"
    } else {
        "Show transcript"
    };

    rsx! {
        section { class: "lesson",
            h3 { "{header.title}" }
            if !header.description.is_empty() {
                p { class: "lesson-description", "{header.description}" }
            }
            p { class: "lesson-meta",
                span { "{header.level_label}" }
                span { "{header.duration_label}" }
            }
            audio { controls: true, src: "{header.audio_url}" }

            button {
                class: "btn btn-ghost",
                r#type: "button",
                onclick: move |_| on_intent.call(SessionIntent::ToggleTranscript),
                "{transcript_label}"
            }
            if let Some(transcript) = header.transcript.clone() {
                blockquote { class: "transcript", "{transcript}" }
            }

            ol { class: "questions",
                for question in questions {
                    QuestionRow { key: "{question.id}", question, on_intent }
                }
            }

            button {
                class: "btn btn-primary",
                r#type: "button",
                disabled: !can_submit,
                onclick: move |_| on_intent.call(SessionIntent::Submit),
                "Submit answers"
            }
        }
    }
}

#[component]
fn QuestionRow(question: QuestionVm, on_intent: EventHandler<SessionIntent>) -> Element {
    let id = question.id.clone();

    rsx! {
        li { class: "question",
            label { r#for: "answer-{question.id}", "{question.prompt}" }
            input {
                id: "answer-{question.id}",
                r#type: "text",
                value: "{question.answer}",
                oninput: move |evt| {
                    on_intent.call(SessionIntent::Answer {
                        question: id.clone(),
                        text: evt.value(),
                    });
                },
            }
            if let Some(feedback) = question.feedback.clone() {
                p { class: "feedback", "{feedback}" }
            }
        }
    }
}

#[component]
fn ResultPanel(result: ResultVm) -> Element {
    rsx! {
        section { class: "result",
            h3 { "Result" }
            p { class: "score", "{result.score_label}" }
            p { "{result.summary}" }
        }
    }
}
