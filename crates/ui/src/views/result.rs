use std::time::Duration;

use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use services::{ExamController, ExamPhase};

use super::scripts::copy_to_clipboard;
use crate::context::RecentAttempts;
use crate::routes::Route;
use crate::vm::{FeedbackVm, ResultVm, saved_line};

#[component]
pub fn ResultView() -> Element {
    let mut exam = use_context::<Signal<ExamController>>();
    let recent = use_context::<Signal<RecentAttempts>>();
    let navigator = use_navigator();
    let mut copied = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);

    let vm = match exam.read().phase() {
        ExamPhase::Submitted { session, result } => Some(ResultVm::new(result, Some(session.set()))),
        ExamPhase::Setup | ExamPhase::InProgress(_) => None,
    };
    let Some(vm) = vm else {
        return rsx! {
            div { class: "page result",
                p { class: "muted", "No result to show yet." }
                Link { to: Route::Home {}, "Choose a test set" }
            }
        };
    };

    let saved = saved_line(recent.read().len());
    let share_text = vm.share_text.clone();
    let on_copy = move |_| {
        copy_to_clipboard(&share_text);
        copied.set(true);
        spawn(async move {
            tokio::time::sleep(Duration::from_secs(2)).await;
            copied.set(false);
        });
    };

    let on_retry = move |_| {
        let retried = exam.write().on_retry().map(|_| ());
        match retried {
            Ok(()) => {
                navigator.push(Route::Quiz {});
            }
            Err(err) => error.set(Some(err.to_string())),
        }
    };

    let on_home = move |_| {
        exam.write().reset();
        navigator.push(Route::Home {});
    };

    rsx! {
        div { class: "page result",
            h2 { "Result" }
            p { class: "score-summary", "{vm.score_line}" }
            p { class: "candidate-line", "{vm.candidate_line}" }
            p { class: "muted small", "{vm.time_line}" }
            if let Some(saved) = saved {
                p { class: "saved-note muted small", "{saved}" }
            }

            div { class: "result-actions",
                button { id: "result-retry", class: "primary", onclick: on_retry, "Retry this test" }
                button { id: "result-copy", onclick: on_copy,
                    if copied() { "Copied" } else { "Copy summary" }
                }
                button { id: "result-home", onclick: on_home, "Choose another test" }
            }

            if let Some(message) = error() {
                p { class: "error", role: "alert", "{message}" }
            }

            div { class: "feedback",
                for (position, item) in vm.feedback.iter().cloned().enumerate() {
                    FeedbackItem { key: "{position}", item }
                }
            }
        }
    }
}

#[component]
fn FeedbackItem(item: FeedbackVm) -> Element {
    let class = if item.correct { "feedback-item correct" } else { "feedback-item incorrect" };

    rsx! {
        div { class: "{class}",
            h3 { "{item.title}" }
            p { "Your answer: {item.your_answer}" }
            p { "Correct answer: {item.correct_answer}" }
        }
    }
}
