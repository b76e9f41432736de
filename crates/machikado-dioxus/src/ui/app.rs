use super::components::{
    AreaPage, BlogPage, ErrorScreen, HomePage, MobileSidebar, NotFoundPage, PcSidebar, PostPage,
    ShopPage,
};
use super::context::{GeocoderHandle, SiteContext};
use dioxus::prelude::*;
use machikado_config::{Config, GeocoderConfig};
use machikado_engine::{ContentStore, NominatimGeocoder, Route};
use std::sync::Arc;

const SITE_CSS: &str = include_str!("../assets/site.css");

#[component]
pub fn App(config: Config) -> Element {
    let route = use_signal(Route::default);
    use_context_provider(|| route);

    use_hook(|| install_geocoder(&config.geocoder));

    let site = use_hook(|| {
        match ContentStore::open(&config.content.root, config.content.cache) {
            Ok(store) => {
                let site = SiteContext {
                    store: Arc::new(store),
                    title: config.site.title.clone(),
                };
                provide_context(site.clone());
                Ok(site)
            }
            Err(e) => {
                log::error!("cannot open content: {e}");
                Err(e.to_string())
            }
        }
    });

    let site = match site {
        Ok(site) => site,
        Err(message) => {
            return rsx! {
                style { {SITE_CSS} }
                ErrorScreen {
                    title: "コンテンツを開けません".to_string(),
                    message: "コンテンツフォルダを確認してください".to_string(),
                    details: Some(message),
                }
            };
        }
    };

    let areas = site.store.list_areas().unwrap_or_else(|e| {
        log::warn!("cannot list areas: {e}");
        Vec::new()
    });
    let current = route();
    let active = current.area().map(str::to_string);

    rsx! {
        style { {SITE_CSS} }
        div {
            class: "app-container",
            aside {
                class: "pc-sidebar",
                PcSidebar {
                    title: site.title.clone(),
                    areas: areas.clone(),
                    active: active.clone(),
                }
            }
            MobileSidebar {
                title: site.title.clone(),
                areas,
                active,
            }
            main {
                class: "main-content",
                PageView { route: current }
            }
        }
    }
}

/// Page for the current route; keyed so a new address remounts the page
#[component]
fn PageView(route: Route) -> Element {
    let key = route.path();
    match route {
        Route::Home => rsx! { HomePage { key: "{key}" } },
        Route::Area(area) => rsx! { AreaPage { key: "{key}", area } },
        Route::Shop { area, slug } => rsx! { ShopPage { key: "{key}", area, slug } },
        Route::Blog => rsx! { BlogPage { key: "{key}" } },
        Route::Post(slug) => rsx! { PostPage { key: "{key}", slug } },
        Route::NotFound(path) => rsx! { NotFoundPage { key: "{key}", path } },
    }
}

fn install_geocoder(settings: &GeocoderConfig) {
    match NominatimGeocoder::new(
        settings.endpoint.clone(),
        settings.country_hint.clone(),
        settings.timeout(),
    ) {
        Ok(geocoder) => {
            provide_context(GeocoderHandle(Arc::new(geocoder)));
        }
        Err(e) => log::error!("geocoder unavailable, panoramas disabled: {e}"),
    }
}
