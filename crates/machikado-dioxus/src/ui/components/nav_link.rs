use dioxus::prelude::*;
use machikado_engine::Route;

/// In-app link. Clicking sets the route signal instead of following `href`.
#[component]
pub fn NavLink(
    to: Route,
    #[props(default)] class: String,
    on_navigate: Option<EventHandler<()>>,
    children: Element,
) -> Element {
    let route = try_use_context::<Signal<Route>>();
    let href = to.path();

    rsx! {
        a {
            class: "{class}",
            href: "{href}",
            onclick: move |evt| {
                if let Some(mut route) = route {
                    evt.prevent_default();
                    route.set(to.clone());
                }
                if let Some(handler) = on_navigate {
                    handler.call(());
                }
            },
            {children}
        }
    }
}
