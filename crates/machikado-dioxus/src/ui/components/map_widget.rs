//! Embedded map and street-level panorama for one map directive.
//!
//! The map frame needs nothing but the address. The panorama waits on a
//! geocoding lookup run as a resource; dropping the widget drops the lookup.
//! Whenever a panorama is wanted but unavailable, or its frame fails to load,
//! a link card to the external maps site takes its place.

use crate::ui::context::GeocoderHandle;
use dioxus::prelude::*;
use machikado_engine::maps::{map_embed_url, maps_place_url, maps_search_url};
use machikado_engine::{MapDirective, MapMode, MapResolution, MapState, resolve_map};

#[component]
pub fn MapWidget(directive: MapDirective) -> Element {
    let geocoder = try_use_context::<GeocoderHandle>();
    let mode = MapMode::from(directive.kind);
    let address = directive.address.clone();

    let lookup = use_resource(move || {
        let geocoder = geocoder.clone();
        let address = address.clone();
        async move {
            if !mode.shows_panorama() {
                return map_only(&address);
            }
            let state = match geocoder {
                Some(GeocoderHandle(geocoder)) => {
                    MapState::from(resolve_map(&address, geocoder.as_ref()).await)
                }
                None => MapState::Failed {
                    map_url: map_embed_url(&address),
                    reason: "geocoder unavailable".to_string(),
                },
            };
            if let MapState::Failed { reason, .. } = &state {
                log::warn!("no panorama for {address}: {reason}");
            }
            state
        }
    });

    // The map frame needs no coordinates, so map-only widgets never wait.
    let state = if mode.shows_panorama() {
        lookup.cloned().unwrap_or_default()
    } else {
        map_only(&directive.address)
    };

    rsx! {
        MapBody { address: directive.address, mode, state }
    }
}

fn map_only(address: &str) -> MapState {
    MapState::Ready(MapResolution {
        map_url: map_embed_url(address),
        panorama_url: None,
    })
}

/// Widget contents for a given lookup state
#[component]
pub fn MapBody(address: String, mode: MapMode, state: MapState) -> Element {
    let mut panorama_failed = use_signal(|| false);

    if state == MapState::Loading {
        return rsx! {
            div {
                class: "map-widget",
                MapLoadingCard {}
            }
        };
    }

    let map_url = state
        .map_url()
        .map(str::to_string)
        .unwrap_or_else(|| map_embed_url(&address));
    let panorama_url = state
        .panorama_url()
        .filter(|_| !panorama_failed())
        .map(str::to_string);
    let layout = if mode == MapMode::Both {
        "map-widget map-widget-both"
    } else {
        "map-widget"
    };

    rsx! {
        div {
            class: layout,
            if mode.shows_map() {
                MapFrame { address: address.clone(), map_url }
            }
            if mode.shows_panorama() {
                {match panorama_url {
                    Some(url) => rsx! {
                        PanoramaFrame {
                            url,
                            on_error: move |_| {
                                log::warn!("panorama frame failed to load");
                                panorama_failed.set(true);
                            },
                        }
                    },
                    None => rsx! {
                        PanoramaLinkCard { address: address.clone() }
                    },
                }}
            }
        }
    }
}

#[component]
fn MapLoadingCard() -> Element {
    rsx! {
        div {
            class: "map-card map-loading",
            div { class: "spinner" }
            p { "地図を読み込み中..." }
        }
    }
}

#[component]
fn MapFrame(address: String, map_url: String) -> Element {
    let search_url = maps_search_url(&address);

    rsx! {
        div {
            class: "map-card",
            div { class: "map-card-title", "店舗位置" }
            iframe {
                class: "map-frame",
                src: "{map_url}",
                title: "{address}",
                "loading": "lazy",
                "referrerpolicy": "no-referrer-when-downgrade",
            }
            a {
                class: "map-open-link",
                href: "{search_url}",
                target: "_blank",
                rel: "noopener noreferrer",
                "📍 Mapsで開く"
            }
        }
    }
}

#[component]
fn PanoramaFrame(url: String, on_error: EventHandler<()>) -> Element {
    rsx! {
        div {
            class: "map-card",
            div { class: "map-card-title", "👁️ ストリートビュー" }
            iframe {
                class: "panorama-frame",
                src: "{url}",
                "loading": "lazy",
                allowfullscreen: true,
                onerror: move |_| on_error.call(()),
            }
        }
    }
}

#[component]
fn PanoramaLinkCard(address: String) -> Element {
    let place_url = maps_place_url(&address);

    rsx! {
        div {
            class: "map-card panorama-fallback",
            div { class: "map-card-title", "👁️ ストリートビュー" }
            p { "この場所のストリートビューは埋め込めませんでした。" }
            a {
                class: "panorama-link",
                href: "{place_url}",
                target: "_blank",
                rel: "noopener noreferrer",
                "Street Viewで見る"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dioxus::dioxus_core::VirtualDom;
    use dioxus_ssr::render;
    use machikado_engine::maps::panorama_embed_url;
    use machikado_engine::{Coordinate, DirectiveKind};

    const ADDRESS: &str = "東京都台東区浅草2-3-1";

    fn render_body(mode: MapMode, state: MapState) -> String {
        let mut dom = VirtualDom::new_with_props(
            MapBody,
            MapBodyProps {
                address: ADDRESS.to_string(),
                mode,
                state,
            },
        );
        dom.rebuild_in_place();
        render(&dom)
    }

    fn ready(panorama: bool) -> MapState {
        MapState::Ready(MapResolution {
            map_url: map_embed_url(ADDRESS),
            panorama_url: panorama.then(|| {
                panorama_embed_url(Coordinate {
                    lat: 35.7148,
                    lon: 139.7967,
                })
            }),
        })
    }

    #[test]
    fn test_loading_shows_spinner_card() {
        let html = render_body(MapMode::Both, MapState::Loading);

        assert!(html.contains("地図を読み込み中..."));
        assert!(!html.contains("<iframe"));
    }

    #[test]
    fn test_ready_with_panorama_shows_both_frames() {
        let html = render_body(MapMode::Both, ready(true));

        assert!(html.contains("map-frame"));
        assert!(html.contains("panorama-frame"));
        assert!(html.contains("📍 Mapsで開く"));
        assert!(!html.contains("Street Viewで見る"));
    }

    #[test]
    fn test_ready_without_panorama_falls_back_to_link() {
        let html = render_body(MapMode::Both, ready(false));

        assert!(html.contains("map-frame"));
        assert!(!html.contains("panorama-frame"));
        assert!(html.contains("Street Viewで見る"));
        assert!(html.contains("https://www.google.com/maps/place/"));
    }

    #[test]
    fn test_failed_lookup_keeps_map_and_hides_reason() {
        let html = render_body(
            MapMode::Both,
            MapState::Failed {
                map_url: map_embed_url(ADDRESS),
                reason: "geocoder returned status 503".to_string(),
            },
        );

        assert!(html.contains("map-frame"));
        assert!(html.contains("Street Viewで見る"));
        assert!(!html.contains("geocoder returned status 503"));
    }

    #[test]
    fn test_map_only_mode_never_shows_panorama() {
        let html = render_body(MapMode::Map, ready(true));

        assert!(html.contains("map-frame"));
        assert!(!html.contains("panorama-frame"));
        assert!(!html.contains("Street Viewで見る"));
    }

    #[test]
    fn test_panorama_only_mode_skips_map_frame() {
        let html = render_body(MapMode::Panorama, ready(true));

        assert!(!html.contains("map-frame"));
        assert!(html.contains("panorama-frame"));
    }

    #[test]
    fn test_map_only_widget_renders_without_lookup() {
        let mut dom = VirtualDom::new_with_props(
            MapWidget,
            MapWidgetProps {
                directive: MapDirective {
                    kind: DirectiveKind::GoogleMap,
                    address: ADDRESS.to_string(),
                    span: 0..34,
                    index: 0,
                },
            },
        );
        dom.rebuild_in_place();
        let html = render(&dom);

        assert!(html.contains("map-frame"));
        assert!(!html.contains("地図を読み込み中..."));
        assert!(!html.contains("Street Viewで見る"));
    }
}
