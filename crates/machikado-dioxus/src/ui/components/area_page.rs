use super::{Crumb, Header, NavLink, TagDisplay};
use crate::ui::context::{use_content, use_site_title};
use dioxus::prelude::*;
use machikado_engine::{Route, Shop};

#[component]
pub fn AreaPage(area: String) -> Element {
    let title = use_site_title();
    let shops = {
        let area = area.clone();
        use_content(move |store| store.list_shops(&area)).unwrap_or_default()
    };

    rsx! {
        AreaView { title, area, shops }
    }
}

/// Shop cards for one area
#[component]
pub fn AreaView(title: String, area: String, shops: Vec<Shop>) -> Element {
    rsx! {
        Header {
            title,
            trail: vec![Crumb::link("ホーム", Route::Home), Crumb::text(area.clone())],
        }
        div {
            class: "page area-page",
            h1 { class: "page-title", "{area}の街かどメモ" }
            if shops.is_empty() {
                p { class: "empty-message", "この街のメモはまだありません。" }
            } else {
                div {
                    class: "card-grid",
                    for shop in shops {
                        ShopCard { key: "{shop.slug}", shop: shop.clone() }
                    }
                }
            }
        }
    }
}

#[component]
fn ShopCard(shop: Shop) -> Element {
    let Shop {
        name,
        address,
        image,
        description,
        tags,
        price_tags,
        scene_tags,
        access_tags,
        business_tags,
        ..
    } = shop.clone();

    rsx! {
        NavLink {
            to: shop.route(),
            class: "card shop-card",
            if !image.is_empty() {
                div {
                    class: "card-image",
                    img { src: "{image}", alt: "{name}", "loading": "lazy" }
                }
            }
            div {
                class: "card-body",
                h2 { class: "card-title", "{name}" }
                if !description.is_empty() {
                    p { class: "card-text", "{description}" }
                }
                if !address.is_empty() {
                    p { class: "card-address", "📍 {address}" }
                }
                TagDisplay { tags, price_tags, scene_tags, access_tags, business_tags }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dioxus::dioxus_core::VirtualDom;
    use dioxus_ssr::render;

    fn render_area(shops: Vec<Shop>) -> String {
        let mut dom = VirtualDom::new_with_props(
            AreaView,
            AreaViewProps {
                title: "街かどメモ".to_string(),
                area: "浅草".to_string(),
                shops,
            },
        );
        dom.rebuild_in_place();
        render(&dom)
    }

    #[test]
    fn test_area_lists_shop_cards() {
        let shop = Shop {
            area: "浅草".to_string(),
            slug: "kissa".to_string(),
            name: "喫茶 ひかり".to_string(),
            address: "東京都台東区浅草1-1-1".to_string(),
            description: "昔ながらの喫茶店".to_string(),
            price_tags: vec!["¥500〜".to_string()],
            ..Default::default()
        };
        let html = render_area(vec![shop]);

        assert!(html.contains("浅草の街かどメモ"));
        assert!(html.contains("喫茶 ひかり"));
        assert!(html.contains("東京都台東区浅草1-1-1"));
        assert!(html.contains("tag-price"));
        assert!(html.contains("/kissa\""));
        assert!(!html.contains("card-image"));
    }

    #[test]
    fn test_area_without_shops() {
        let html = render_area(Vec::new());

        assert!(html.contains("この街のメモはまだありません。"));
    }
}
