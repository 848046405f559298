use std::path::PathBuf;
use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use exam_core::model::QuestionBank;
use exam_core::time::fixed_now;
use services::{Clock, ExamController, ExamWorkflow, HistoryService};
use storage::repository::{SlotRepository, Storage};

use super::quiz::QuizTestHandles;
use crate::context::{RecentAttempts, UiApp, build_app_context};
use crate::views::{HistoryView, HomeView, QuizView, ResultView};

pub const BANK: &str = r#"{"sets": [
    {"id": "day-1", "title": "Day 1", "questions": [
        {"id": 1, "question": "Port for SSH?", "options": ["21", "22", "80"], "answerIndex": 1}
    ]},
    {"id": "day-2", "title": "Day 2", "questions": [
        {"id": 1, "question": "Capital of France?", "options": ["Paris", "Rome"], "answerIndex": 0},
        {"id": 2, "question": "2 + 2?", "options": ["3", "4"], "answerIndex": 1}
    ]}
]}"#;

#[derive(Clone)]
struct TestApp {
    history: Arc<HistoryService>,
    workflow: Arc<ExamWorkflow>,
}

impl UiApp for TestApp {
    fn clock(&self) -> Clock {
        Clock::fixed(fixed_now())
    }

    fn bank_path(&self) -> PathBuf {
        PathBuf::from("questions.json")
    }

    fn history(&self) -> Arc<HistoryService> {
        Arc::clone(&self.history)
    }

    fn workflow(&self) -> Arc<ExamWorkflow> {
        Arc::clone(&self.workflow)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Quiz,
    Result,
    History,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    controller: ExamController,
    recent: RecentAttempts,
    quiz_handles: Option<QuizTestHandles>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    let controller = props.controller.clone();
    use_context_provider(|| Signal::new(controller));
    let recent = props.recent.clone();
    use_context_provider(|| Signal::new(recent));
    if let Some(handles) = props.quiz_handles.clone() {
        use_context_provider(|| handles);
    }
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
    #[route("/summary")]
    SubmittedResult {},
}

#[component]
fn SubmittedResult() -> Element {
    rsx! { ResultView {} }
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Quiz => rsx! { QuizView {} },
        ViewKind::Result => rsx! { ResultView {} },
        ViewKind::History => rsx! { HistoryView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub history: Arc<HistoryService>,
    pub quiz_handles: Option<QuizTestHandles>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// A controller with the test bank already loaded.
pub fn loaded_controller() -> ExamController {
    ExamController::with_bank(
        Clock::fixed(fixed_now()),
        QuestionBank::from_json(BANK).expect("test bank"),
    )
}

pub fn setup_view_harness(view: ViewKind, controller: ExamController) -> ViewHarness {
    setup_view_harness_with_slots(view, controller, Arc::clone(&Storage::in_memory().slots))
}

pub fn setup_view_harness_with_slots(
    view: ViewKind,
    controller: ExamController,
    slots: Arc<dyn SlotRepository>,
) -> ViewHarness {
    setup_view_harness_with_recent(view, controller, slots, RecentAttempts::default())
}

pub fn setup_view_harness_with_recent(
    view: ViewKind,
    controller: ExamController,
    slots: Arc<dyn SlotRepository>,
    recent: RecentAttempts,
) -> ViewHarness {
    let history = Arc::new(HistoryService::new(slots));
    let workflow = Arc::new(ExamWorkflow::new(Arc::clone(&history)));
    let app = Arc::new(TestApp {
        history: Arc::clone(&history),
        workflow,
    });

    let quiz_handles = match view {
        ViewKind::Quiz => Some(QuizTestHandles::default()),
        ViewKind::Home | ViewKind::Result | ViewKind::History => None,
    };

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            controller,
            recent,
            quiz_handles: quiz_handles.clone(),
        },
    );

    ViewHarness {
        dom,
        history,
        quiz_handles,
    }
}
