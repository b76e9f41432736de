use super::{Header, NavLink};
use crate::ui::context::use_site_title;
use dioxus::prelude::*;
use machikado_engine::Route;

#[component]
pub fn NotFoundPage(path: String) -> Element {
    let title = use_site_title();
    log::info!("no page at {path}");

    rsx! {
        NotFoundView { title, path }
    }
}

#[component]
pub fn NotFoundView(title: String, path: String) -> Element {
    rsx! {
        Header { title }
        div {
            class: "page not-found",
            h1 { class: "page-title", "ページが見つかりませんでした" }
            p { class: "empty-message", "{path}" }
            NavLink { to: Route::Home, class: "back-link", "← ホームに戻る" }
        }
    }
}
