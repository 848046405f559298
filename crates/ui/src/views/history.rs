use dioxus::prelude::*;

use super::scripts::copy_to_clipboard;
use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{HistoryRowVm, map_history_rows};

#[derive(Clone, Debug, PartialEq)]
struct HistoryData {
    rows: Vec<HistoryRowVm>,
    json: String,
}

#[component]
pub fn HistoryView() -> Element {
    let ctx = use_context::<AppContext>();
    let history = ctx.history();

    let resource = {
        let history = history.clone();
        use_resource(move || {
            let history = history.clone();
            async move {
                let results = history.read_all().await;
                let json = history.export_json().await.map_err(|_| ViewError::Unknown)?;
                Ok::<_, ViewError>(HistoryData {
                    rows: map_history_rows(&results),
                    json,
                })
            }
        })
    };

    let state = view_state_from_resource(&resource);

    let on_clear = move |_| {
        let history = history.clone();
        let mut resource = resource;
        spawn(async move {
            history.clear().await;
            resource.restart();
        });
    };

    rsx! {
        div { class: "page history",
            h2 { "Attempt history" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    if data.rows.is_empty() {
                        p { class: "muted", "No attempts recorded yet." }
                    } else {
                        div { class: "history-actions",
                            button {
                                id: "history-export",
                                onclick: move |_| copy_to_clipboard(&data.json),
                                "Copy JSON"
                            }
                            button { id: "history-clear", onclick: on_clear, "Clear history" }
                        }
                        HistoryTable { rows: data.rows.clone() }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn HistoryTable(rows: Vec<HistoryRowVm>) -> Element {
    rsx! {
        table { class: "history-table",
            thead {
                tr {
                    th { "#" }
                    th { "Started At" }
                    th { "Date & Time" }
                    th { "Name" }
                    th { "ID" }
                    th { "Test Set" }
                    th { "Score" }
                    th { "%" }
                    th { "Attempted" }
                    th { "Questions" }
                }
            }
            tbody {
                for row in rows {
                    tr { key: "{row.number}",
                        td { "{row.number}" }
                        td { "{row.started_at}" }
                        td { "{row.submitted_at}" }
                        td { "{row.name}" }
                        td { "{row.candidate_id}" }
                        td { "{row.set_title}" }
                        td { "{row.score}" }
                        td { "{row.percentage}" }
                        td { "{row.attempted}" }
                        td { "{row.questions}" }
                    }
                }
            }
        }
    }
}
