use std::collections::BTreeMap;

use listen_core::model::{LessonDetail, LessonId, LessonSummary, Question, QuestionId, ScoringResult};
use services::{
    Completion, InMemoryLessonApi, LessonApi, SessionCommand, SessionDriver, SessionIntent,
    SessionState,
};

use super::test_harness::{ViewHarness, render_screen};
use crate::vm::map_session_screen;

fn cafe_talk_summary() -> LessonSummary {
    LessonSummary {
        id: LessonId::new("l1"),
        title: "Cafe Talk".into(),
        level: "A2".into(),
        duration_minutes: 3,
        description: "Ordering at a cafe.".into(),
    }
}

fn cafe_talk_api() -> InMemoryLessonApi {
    let api = InMemoryLessonApi::new();
    let detail = LessonDetail::new(
        cafe_talk_summary(),
        "https://example.test/cafe.mp3",
        "A coffee, please.",
        vec![Question::new("q1", "What did she order?")],
    )
    .unwrap();
    api.add_lesson(detail, [("q1", "coffee")]);
    api
}

async fn started(api: InMemoryLessonApi) -> SessionDriver {
    let mut driver = SessionDriver::new(LessonApi::in_memory(api));
    driver.dispatch(SessionIntent::Start).unwrap();
    driver.settle().await;
    driver
}

fn render_state(state: &SessionState) -> String {
    render_screen(map_session_screen(state), None)
}

#[tokio::test(flavor = "current_thread")]
async fn session_screen_smoke_renders_score_and_feedback() {
    let mut driver = started(cafe_talk_api()).await;
    driver
        .dispatch(SessionIntent::Answer {
            question: QuestionId::new("q1"),
            text: "coffee".into(),
        })
        .unwrap();

    let html = render_state(driver.state());
    assert!(html.contains("100% answered"), "missing progress in {html}");
    assert!(!html.contains("You got"), "result shown too early in {html}");

    driver.dispatch(SessionIntent::Submit).unwrap();
    driver.settle().await;

    let html = render_state(driver.state());
    assert!(html.contains("1 / 1"), "missing score in {html}");
    assert!(html.contains("You got 1 / 1 correct."), "missing summary in {html}");
    assert!(html.contains("Correct"), "missing feedback in {html}");
    assert!(html.contains("coffee"), "missing answer in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn session_screen_smoke_marks_active_lesson() {
    let driver = started(InMemoryLessonApi::with_sample_lessons().unwrap()).await;
    let html = render_state(driver.state());

    assert!(html.contains("Morning Routine in English"), "missing title in {html}");
    assert!(html.contains("Travel Planning"), "missing title in {html}");
    assert!(html.contains("A2 · 6 min"), "missing meta in {html}");
    assert_eq!(html.matches("lesson-item--active").count(), 1, "{html}");
    assert!(html.contains("Level: A2"), "missing level in {html}");
    assert!(html.contains("Duration: 6 min"), "missing duration in {html}");
    assert!(html.contains("Show transcript"), "missing toggle in {html}");
    assert!(!html.contains("class=\"transcript\""), "transcript visible in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn session_screen_smoke_shows_transcript_after_toggle() {
    let mut driver = started(cafe_talk_api()).await;
    driver.dispatch(SessionIntent::ToggleTranscript).unwrap();

    let html = render_state(driver.state());
    assert!(html.contains("A coffee, please."), "missing transcript in {html}");
    assert!(html.contains("Hide transcript"), "missing toggle in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn session_screen_smoke_initial_load_shows_only_loading() {
    let mut driver = SessionDriver::new(LessonApi::in_memory(cafe_talk_api()));
    driver.dispatch(SessionIntent::Start).unwrap();

    let html = render_state(driver.state());
    assert!(html.contains("Loading lessons..."), "missing loading in {html}");
    assert!(!html.contains("lesson-list"), "list rendered early in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn session_screen_smoke_empty_catalog_has_no_error() {
    let driver = started(InMemoryLessonApi::new()).await;
    let html = render_state(driver.state());

    assert!(html.contains("No lessons available."), "missing empty text in {html}");
    assert!(!html.contains("error-banner"), "unexpected error in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn session_screen_smoke_failed_catalog_offers_retry() {
    let api = InMemoryLessonApi::with_sample_lessons().unwrap();
    api.set_offline(true);
    let driver = started(api).await;

    let html = render_state(driver.state());
    assert!(html.contains("Could not load lessons."), "missing banner in {html}");
    assert!(html.contains("offline"), "missing detail in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[test]
fn session_screen_smoke_renders_notice() {
    let html = render_screen(
        map_session_screen(&SessionState::new()),
        Some("no lesson is loaded".into()),
    );
    assert!(html.contains("no lesson is loaded"), "missing notice in {html}");
}

#[test]
fn session_screen_smoke_ignores_feedback_for_unrendered_questions() {
    let mut state = SessionState::new();
    state.apply_intent(SessionIntent::Start).unwrap();
    let commands = state.apply_completion(Completion::CatalogLoaded(Ok(vec![cafe_talk_summary()])));
    let [SessionCommand::FetchLesson { ticket, .. }] = commands.as_slice() else {
        panic!("expected lesson fetch, got {commands:?}");
    };
    let detail = LessonDetail::new(
        cafe_talk_summary(),
        "",
        "",
        vec![Question::new("q1", "What did she order?")],
    )
    .unwrap();
    state.apply_completion(Completion::LessonLoaded {
        ticket: *ticket,
        result: Ok(detail),
    });

    let commands = state.apply_intent(SessionIntent::Submit).unwrap();
    let [SessionCommand::SubmitAnswers { ticket, .. }] = commands.as_slice() else {
        panic!("expected submission, got {commands:?}");
    };
    let feedback = BTreeMap::from([
        (QuestionId::new("q1"), "Expected: coffee".to_string()),
        (QuestionId::new("q9"), "stray".to_string()),
    ]);
    state.apply_completion(Completion::Scored {
        ticket: *ticket,
        result: Ok(ScoringResult::new(0, 1, feedback).unwrap()),
    });

    let html = render_state(&state);
    assert!(html.contains("Expected: coffee"), "missing feedback in {html}");
    assert!(!html.contains("stray"), "unrendered feedback shown in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn session_view_smoke_loads_first_lesson() {
    let mut harness = ViewHarness::new(LessonApi::in_memory(cafe_talk_api()));
    let html = harness
        .render_until(|html| html.contains("What did she order?"))
        .await;

    assert!(html.contains("What did she order?"), "missing question in {html}");
    assert!(html.contains("Cafe Talk"), "missing lesson in {html}");
    assert!(html.contains("0% answered"), "missing progress in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn session_view_smoke_renders_error_state() {
    let api = cafe_talk_api();
    api.set_offline(true);
    let mut harness = ViewHarness::new(LessonApi::in_memory(api));
    let html = harness
        .render_until(|html| html.contains("Could not load lessons."))
        .await;

    assert!(html.contains("Could not load lessons."), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}
