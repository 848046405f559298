use dioxus::prelude::*;
use dioxus_router::use_navigator;
use exam_core::model::SetId;
use services::ExamController;

use crate::routes::Route;
use crate::vm::{SetCardVm, bank_notice, map_set_cards};

#[component]
pub fn HomeView() -> Element {
    let mut exam = use_context::<Signal<ExamController>>();
    let navigator = use_navigator();
    let mut name = use_signal(String::new);
    let mut candidate_id = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);

    let (cards, notice, can_start) = {
        let controller = exam.read();
        (
            map_set_cards(&controller.catalog(), controller.selected_set()),
            bank_notice(controller.bank_state()),
            controller.can_start(name.read().as_str()),
        )
    };

    let on_start = move |_| {
        let name_value = name.read().clone();
        let id_value = candidate_id.read().clone();
        let started = exam
            .write()
            .start(&name_value, Some(&id_value))
            .map(|_| ());
        match started {
            Ok(()) => {
                error.set(None);
                navigator.push(Route::Quiz {});
            }
            Err(err) => error.set(Some(err.to_string())),
        }
    };

    rsx! {
        div { class: "page home",
            h2 { "Start a practice test" }

            section { class: "candidate",
                label { r#for: "candidate-name", "Name" }
                input {
                    id: "candidate-name",
                    r#type: "text",
                    placeholder: "Your name",
                    value: "{name}",
                    oninput: move |evt| name.set(evt.value()),
                }
                label { r#for: "candidate-id", "ID (optional)" }
                input {
                    id: "candidate-id",
                    r#type: "text",
                    value: "{candidate_id}",
                    oninput: move |evt| candidate_id.set(evt.value()),
                }
            }

            section { class: "sets",
                h3 { "Test sets" }
                if let Some(notice) = notice {
                    p { class: "muted", "{notice}" }
                } else {
                    ul { class: "set-list",
                        for card in cards {
                            SetCard {
                                key: "{card.id}",
                                card: card.clone(),
                                on_select: move |id| {
                                    error.set(None);
                                    exam.write().select_set(id);
                                },
                            }
                        }
                    }
                }
            }

            if let Some(message) = error() {
                p { class: "error", role: "alert", "{message}" }
            }

            button {
                id: "start-test",
                class: "primary",
                disabled: !can_start,
                onclick: on_start,
                "Start test"
            }
        }
    }
}

#[component]
fn SetCard(card: SetCardVm, on_select: EventHandler<SetId>) -> Element {
    let class = if card.selected { "set-card selected" } else { "set-card" };
    let id = card.id.clone();

    rsx! {
        li {
            button {
                class: "{class}",
                "aria-pressed": card.selected,
                onclick: move |_| on_select.call(id.clone()),
                span { class: "set-badge", "{card.badge}" }
                span { class: "set-title", "{card.title}" }
                span { class: "set-count muted", "{card.question_count}" }
            }
        }
    }
}
