use std::sync::Arc;

use dioxus::prelude::ReadableExt;
use exam_core::model::{LoadError, SetId};
use exam_core::time::fixed_clock;
use services::ExamController;
use storage::repository::{InMemoryRepository, SlotRepository, Storage};

use super::test_harness::{
    ViewKind, loaded_controller, setup_view_harness, setup_view_harness_with_recent,
    setup_view_harness_with_slots,
};
use crate::context::RecentAttempts;

#[tokio::test(flavor = "current_thread")]
async fn home_view_lists_sets_newest_first() {
    let mut harness = setup_view_harness(ViewKind::Home, loaded_controller());
    harness.rebuild();
    let html = harness.render();

    let day2 = html.find("Day 2").expect("day 2 listed");
    let day1 = html.find("Day 1").expect("day 1 listed");
    assert!(day2 < day1, "newest set should come first in {html}");
    assert!(html.contains("Latest"), "missing badge in {html}");
    assert!(html.contains("Set #1"), "missing numbered badge in {html}");
    assert!(html.contains("2 questions"), "missing count in {html}");
    assert!(html.contains("Start test"), "missing start button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_reports_bank_failure() {
    let mut controller = ExamController::new(fixed_clock());
    controller.on_bank_loaded(Err(LoadError::Unreadable("missing".into())));
    let mut harness = setup_view_harness(ViewKind::Home, controller);
    harness.rebuild();
    let html = harness.render();
    assert!(
        html.contains("Failed to load sets. Please check questions.json."),
        "missing failure notice in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_renders_current_question() {
    let mut controller = loaded_controller();
    controller.select_set(SetId::new("day-2"));
    controller.start("Ada", Some("A1")).unwrap();
    controller.on_select_option(0).unwrap();

    let mut harness = setup_view_harness(ViewKind::Quiz, controller);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Question 1 of 2"), "missing counter in {html}");
    assert!(html.contains("Capital of France?"), "missing question in {html}");
    assert!(html.contains("Candidate: Ada (A1) • Test: Day 2"), "missing header in {html}");
    assert!(html.contains("Answered: 1/2"), "missing progress in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_without_session_points_home() {
    let mut harness = setup_view_harness(ViewKind::Quiz, loaded_controller());
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("No test in progress."), "missing empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_submit_records_attempt_before_leaving() {
    let mut controller = loaded_controller();
    controller.select_set(SetId::new("day-2"));
    controller.start("Ada", Some("A1")).unwrap();
    controller.on_select_option(0).unwrap();

    let mut harness = setup_view_harness(ViewKind::Quiz, controller);
    harness.rebuild();
    let handles = harness.quiz_handles.clone().expect("quiz handles");

    handles.submit().call(());
    for _ in 0..4 {
        harness.drive_async().await;
    }

    let history = harness.history.read_all().await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].candidate_name(), "Ada");
    assert_eq!(history[0].correct(), 1);

    assert!(handles.exam().peek().result().is_some());
    assert_eq!(handles.recent().peek().0, history);
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_submit_twice_records_once() {
    let mut controller = loaded_controller();
    controller.select_set(SetId::new("day-1"));
    controller.start("Grace", None).unwrap();

    let mut harness = setup_view_harness(ViewKind::Quiz, controller);
    harness.rebuild();
    let handles = harness.quiz_handles.clone().expect("quiz handles");

    handles.submit().call(());
    handles.submit().call(());
    for _ in 0..4 {
        harness.drive_async().await;
    }

    assert_eq!(harness.history.read_all().await.len(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn result_view_renders_score_and_feedback() {
    let mut controller = loaded_controller();
    controller.select_set(SetId::new("day-2"));
    controller.start("Ada", None).unwrap();
    controller.on_select_option(0).unwrap();
    controller.on_submit().unwrap();

    let mut harness = setup_view_harness(ViewKind::Result, controller);
    harness.rebuild();
    let html = harness.render();
    assert!(
        html.contains("Attempted: 1/2 • Correct: 1 (100%)"),
        "missing score line in {html}"
    );
    assert!(html.contains("Your answer: Paris"), "missing feedback in {html}");
    assert!(html.contains("Your answer: Not answered"), "missing unanswered in {html}");
    assert!(html.contains("Correct answer: 4"), "missing correct answer in {html}");
    assert!(!html.contains("Saved to history"), "unexpected saved note in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn result_view_confirms_saved_history() {
    let mut controller = loaded_controller();
    controller.select_set(SetId::new("day-1"));
    controller.start("Grace", None).unwrap();
    let result = controller.on_submit().unwrap();

    let mut harness = setup_view_harness_with_recent(
        ViewKind::Result,
        controller,
        Arc::clone(&Storage::in_memory().slots),
        RecentAttempts(vec![result]),
    );
    harness.rebuild();
    let html = harness.render();
    assert!(
        html.contains("Saved to history. 1 attempt on record."),
        "missing saved note in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn history_view_renders_logged_attempts() {
    let mut controller = loaded_controller();
    controller.select_set(SetId::new("day-1"));
    controller.start("Grace", None).unwrap();
    controller.on_select_option(1).unwrap();
    let result = controller.on_submit().unwrap();

    let mut harness = setup_view_harness(ViewKind::History, loaded_controller());
    harness.history.append(&result).await;
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Grace"), "missing row in {html}");
    assert!(html.contains("100%"), "missing percentage in {html}");
    assert!(html.contains("Clear history"), "missing clear action in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn history_view_survives_corrupt_log() {
    let slots: Arc<dyn SlotRepository> =
        Arc::new(InMemoryRepository::new().with_slot("examResults", "{oops"));
    let mut harness = setup_view_harness_with_slots(ViewKind::History, loaded_controller(), slots);
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("No attempts recorded yet."), "missing empty state in {html}");
}
