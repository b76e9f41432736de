use super::NavLink;
use dioxus::prelude::*;
use machikado_engine::Route;

fn item_class(area: &str, active: Option<&str>) -> &'static str {
    if active == Some(area) {
        "sidebar-link active"
    } else {
        "sidebar-link"
    }
}

/// Area navigation for wide screens
#[component]
pub fn PcSidebar(title: String, areas: Vec<String>, active: Option<String>) -> Element {
    rsx! {
        div {
            class: "sidebar-inner",
            NavLink { to: Route::Home, class: "sidebar-title", "{title}" }
            nav {
                class: "sidebar-nav",
                h2 { class: "sidebar-heading", "エリア" }
                ul {
                    class: "sidebar-list",
                    for area in areas {
                        li {
                            key: "{area}",
                            NavLink {
                                to: Route::Area(area.clone()),
                                class: item_class(&area, active.as_deref()).to_string(),
                                "{area}"
                            }
                        }
                    }
                }
                h2 { class: "sidebar-heading", "その他" }
                ul {
                    class: "sidebar-list",
                    li {
                        NavLink { to: Route::Blog, class: "sidebar-link", "ブログ" }
                    }
                }
            }
        }
    }
}

/// Hamburger menu for narrow screens. Navigating closes it.
#[component]
pub fn MobileSidebar(title: String, areas: Vec<String>, active: Option<String>) -> Element {
    let mut open = use_signal(|| false);
    let close = move |_: ()| open.set(false);

    rsx! {
        div {
            class: "mobile-header",
            button {
                class: "hamburger",
                "aria-label": "メニュー",
                onclick: move |_| open.toggle(),
                if open() { "✕" } else { "☰" }
            }
            NavLink { to: Route::Home, class: "mobile-title", "{title}" }
        }
        if open() {
            div {
                class: "mobile-overlay",
                onclick: move |_| open.set(false),
            }
            aside {
                class: "mobile-sidebar",
                nav {
                    class: "sidebar-nav",
                    h2 { class: "sidebar-heading", "エリア" }
                    ul {
                        class: "sidebar-list",
                        for area in areas {
                            li {
                                key: "{area}",
                                NavLink {
                                    to: Route::Area(area.clone()),
                                    class: item_class(&area, active.as_deref()).to_string(),
                                    on_navigate: close,
                                    "{area}"
                                }
                            }
                        }
                    }
                    h2 { class: "sidebar-heading", "その他" }
                    ul {
                        class: "sidebar-list",
                        li {
                            NavLink {
                                to: Route::Blog,
                                class: "sidebar-link",
                                on_navigate: close,
                                "ブログ"
                            }
                        }
                    }
                }
            }
        }
    }
}
