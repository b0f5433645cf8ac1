use dioxus::prelude::*;

use crate::views::SessionView;

#[component]
pub fn App() -> Element {
    rsx! {
        document::Title { "ListenLearn" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                SessionView {}
            }
        }
    }
}
