use super::{Header, NavLink};
use crate::ui::context::{use_content, use_site_title};
use dioxus::prelude::*;
use machikado_engine::Route;

#[component]
pub fn HomePage() -> Element {
    let title = use_site_title();
    let areas = use_content(|store| store.list_areas()).unwrap_or_default();

    rsx! {
        HomeView { title, areas }
    }
}

/// Landing page: one card per area
#[component]
pub fn HomeView(title: String, areas: Vec<String>) -> Element {
    rsx! {
        Header { title: title.clone() }
        div {
            class: "page home-page",
            section {
                class: "hero",
                h1 { class: "hero-title", "{title}" }
                p { class: "hero-subtitle", "街ごとのお店やレストランなどの管理しています" }
            }
            h2 { class: "section-heading", "エリアを選択してください" }
            if areas.is_empty() {
                p { class: "empty-message", "まだエリアが登録されていません。" }
            } else {
                div {
                    class: "card-grid",
                    for area in areas {
                        NavLink {
                            key: "{area}",
                            to: Route::Area(area.clone()),
                            class: "card area-card",
                            h3 { class: "card-title", "{area}" }
                            p { class: "card-text", "{area}エリアの街角メモを見る" }
                        }
                    }
                }
            }
        }
    }
}
