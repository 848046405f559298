use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use services::{ExamController, ExamError};

use crate::context::{AppContext, RecentAttempts};
use crate::routes::Route;
use crate::vm::{OptionVm, QuestionVm};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

fn report(mut error: Signal<Option<String>>, outcome: Result<(), ExamError>) {
    error.set(outcome.err().map(|err| err.to_string()));
}

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut exam = use_context::<Signal<ExamController>>();
    let mut recent = use_context::<Signal<RecentAttempts>>();
    let navigator = use_navigator();
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    // Scores on a copy of the controller, waits for the history write, then leaves the page.
    let submit = use_callback(move |()| {
        if submitting() {
            return;
        }
        submitting.set(true);
        let workflow = ctx.workflow();
        spawn(async move {
            let mut controller = exam.peek().clone();
            let submitted = workflow.submit(&mut controller).await;
            exam.set(controller);
            submitting.set(false);
            match submitted {
                Ok(submission) => {
                    tracing::debug!(
                        entries = submission.history.len(),
                        "history refreshed after submit"
                    );
                    recent.set(RecentAttempts(submission.history));
                    error.set(None);
                    navigator.push(Route::Summary {}.to_string());
                }
                Err(err) => error.set(Some(err.to_string())),
            }
        });
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(submit, exam, recent);
            }
        }
    }

    let vm = exam.read().session().map(QuestionVm::from_session);
    let Some(vm) = vm else {
        return rsx! {
            div { class: "page quiz",
                p { class: "muted", "No test in progress." }
                Link { to: Route::Home {}, "Choose a test set" }
            }
        };
    };

    rsx! {
        div { class: "page quiz", id: "quiz-root",
            p { class: "candidate-line muted", "{vm.header}" }

            div { class: "question-head",
                span { class: "counter", "{vm.counter}" }
                span { class: "answered muted", "{vm.answered}" }
            }

            h3 { class: "question-text", "{vm.text}" }

            div { class: "options", role: "radiogroup",
                for option in vm.options.clone() {
                    OptionRow {
                        key: "{option.index}",
                        option: option.clone(),
                        on_pick: move |index| {
                            report(error, exam.write().on_select_option(index).map(|_| ()));
                        },
                    }
                }
            }

            nav { class: "palette",
                for item in vm.palette.clone() {
                    button {
                        key: "{item.index}",
                        class: item.class(),
                        onclick: move |_| {
                            report(error, exam.write().on_jump(item.index).map(|_| ()));
                        },
                        "{item.number}"
                    }
                }
            }

            if let Some(message) = error() {
                p { class: "error", role: "alert", "{message}" }
            }

            div { class: "quiz-actions",
                button {
                    id: "quiz-prev",
                    disabled: !vm.can_prev,
                    onclick: move |_| report(error, exam.write().on_prev().map(|_| ())),
                    "Previous"
                }
                button {
                    id: "quiz-next",
                    disabled: !vm.can_next,
                    onclick: move |_| report(error, exam.write().on_next().map(|_| ())),
                    "Next"
                }
                button {
                    id: "quiz-submit",
                    class: "primary",
                    disabled: submitting(),
                    onclick: move |_| submit.call(()),
                    "Submit"
                }
            }
        }
    }
}

#[component]
fn OptionRow(option: OptionVm, on_pick: EventHandler<usize>) -> Element {
    let class = if option.selected { "option selected" } else { "option" };
    let index = option.index;

    rsx! {
        label { class: "{class}",
            input {
                r#type: "radio",
                name: "option",
                value: "{index}",
                checked: option.selected,
                onchange: move |_| on_pick.call(index),
            }
            span { class: "option-label", "{option.label}" }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    submit: Rc<RefCell<Option<Callback<()>>>>,
    exam: Rc<RefCell<Option<Signal<ExamController>>>>,
    recent: Rc<RefCell<Option<Signal<RecentAttempts>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(
        &self,
        submit: Callback<()>,
        exam: Signal<ExamController>,
        recent: Signal<RecentAttempts>,
    ) {
        *self.submit.borrow_mut() = Some(submit);
        *self.exam.borrow_mut() = Some(exam);
        *self.recent.borrow_mut() = Some(recent);
    }

    pub(crate) fn submit(&self) -> Callback<()> {
        (*self.submit.borrow()).expect("quiz submit registered")
    }

    pub(crate) fn exam(&self) -> Signal<ExamController> {
        (*self.exam.borrow()).expect("quiz controller registered")
    }

    pub(crate) fn recent(&self) -> Signal<RecentAttempts> {
        (*self.recent.borrow()).expect("recent attempts registered")
    }
}
