use super::NavLink;
use dioxus::prelude::*;
use machikado_engine::Route;

/// One breadcrumb step; the last one is usually plain text
#[derive(Debug, Clone, PartialEq)]
pub struct Crumb {
    pub label: String,
    pub to: Option<Route>,
}

impl Crumb {
    pub fn link(label: impl Into<String>, to: Route) -> Self {
        Self {
            label: label.into(),
            to: Some(to),
        }
    }

    pub fn text(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            to: None,
        }
    }
}

fn crumb_view(crumb: Crumb) -> Element {
    let label = crumb.label;
    match crumb.to {
        Some(to) => rsx! {
            NavLink { to, class: "breadcrumb-link", "{label}" }
        },
        None => rsx! {
            span { class: "breadcrumb-current", "{label}" }
        },
    }
}

/// Page header with site links and a breadcrumb trail
#[component]
pub fn Header(title: String, #[props(default)] trail: Vec<Crumb>) -> Element {
    rsx! {
        header {
            class: "site-header",
            div {
                class: "header-bar",
                NavLink { to: Route::Home, class: "site-title", "{title}" }
                nav {
                    class: "header-links",
                    NavLink { to: Route::Home, class: "header-link", "ホーム" }
                    NavLink { to: Route::Blog, class: "header-link", "ブログ" }
                }
            }
            if !trail.is_empty() {
                nav {
                    class: "breadcrumbs",
                    for (i, crumb) in trail.iter().enumerate() {
                        if i > 0 {
                            span { class: "breadcrumb-separator", "/" }
                        }
                        {crumb_view(crumb.clone())}
                    }
                }
            }
        }
    }
}
