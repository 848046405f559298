use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};
use services::ExamController;

use crate::context::{AppContext, RecentAttempts};
use crate::views::{HistoryView, HomeView, QuizView, ResultView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/quiz", QuizView)] Quiz {},
        #[route("/summary", ResultView)] Summary {},
        #[route("/history", HistoryView)] History {},
}

/// Owns the exam controller and the recent history for every route, and kicks off the
/// one-shot bank load.
#[component]
fn Layout() -> Element {
    let ctx = use_context::<AppContext>();
    let initial = ctx.new_controller();
    let mut exam = use_context_provider(|| Signal::new(initial));
    use_context_provider(|| Signal::new(RecentAttempts::default()));

    use_future(move || {
        let ctx = ctx.clone();
        async move {
            let loaded = ctx.load_bank().await;
            exam.write().on_bank_loaded(loaded);
        }
    });

    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    let exam = use_context::<Signal<ExamController>>();
    let in_progress = exam.read().session().is_some();

    rsx! {
        nav { class: "sidebar",
            h1 { "Practice Exam" }
            ul {
                li { Link { to: Route::Home {}, "Test sets" } }
                if in_progress {
                    li { Link { to: Route::Quiz {}, "Current test" } }
                }
                li { Link { to: Route::History {}, "History" } }
            }
        }
    }
}
