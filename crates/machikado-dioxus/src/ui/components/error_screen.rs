use dioxus::prelude::*;

/// Full-page error shown when the site cannot be served at all
#[component]
pub fn ErrorScreen(title: String, message: String, details: Option<String>) -> Element {
    rsx! {
        div {
            class: "error-screen",
            h1 { class: "error-title", "{title}" }
            p { class: "error-message", "{message}" }
            if let Some(ref detail_text) = details {
                pre { class: "error-details", "{detail_text}" }
            }
        }
    }
}
