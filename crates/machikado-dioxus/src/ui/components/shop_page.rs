use super::{Crumb, Header, MarkdownView, NavLink, TagDisplay};
use crate::ui::context::{use_content, use_site_title};
use dioxus::prelude::*;
use machikado_engine::{Route, Shop, render_markdown};

#[component]
pub fn ShopPage(area: String, slug: String) -> Element {
    let title = use_site_title();
    let shop = {
        let (area, slug) = (area.clone(), slug.clone());
        use_content(move |store| store.get_shop(&area, &slug))
    };

    match shop {
        Ok(Some(shop)) => rsx! { ShopView { title, shop } },
        Ok(None) => rsx! {
            ShopMissing { title, area, message: "お店が見つかりませんでした。".to_string() }
        },
        Err(reason) => rsx! {
            ShopMissing { title, area, message: format!("お店を読み込めませんでした: {reason}") }
        },
    }
}

/// Detail page for one shop
#[component]
pub fn ShopView(title: String, shop: Shop) -> Element {
    let document = render_markdown(&shop.content);
    let area_route = Route::Area(shop.area.clone());
    let Shop {
        area,
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
    } = shop;

    rsx! {
        Header {
            title,
            trail: vec![
                Crumb::link("ホーム", Route::Home),
                Crumb::link(area.clone(), area_route.clone()),
                Crumb::text(name.clone()),
            ],
        }
        article {
            class: "page shop-page",
            NavLink { to: area_route, class: "back-link", "← {area}のお店一覧に戻る" }
            if !image.is_empty() {
                div {
                    class: "shop-hero",
                    img { src: "{image}", alt: "{name}" }
                }
            }
            h1 { class: "page-title", "{name}" }
            if !address.is_empty() {
                p { class: "shop-address", "📍 {address}" }
            }
            if !description.is_empty() {
                p { class: "shop-description", "{description}" }
            }
            TagDisplay { tags, price_tags, scene_tags, access_tags, business_tags }
            MarkdownView { document }
        }
    }
}

#[component]
fn ShopMissing(title: String, area: String, message: String) -> Element {
    rsx! {
        Header { title, trail: vec![Crumb::link("ホーム", Route::Home)] }
        div {
            class: "page not-found",
            p { class: "empty-message", "{message}" }
            NavLink { to: Route::Area(area.clone()), class: "back-link", "← {area}のお店一覧に戻る" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::context::SiteContext;
    use dioxus::dioxus_core::VirtualDom;
    use dioxus_ssr::render;
    use machikado_engine::ContentStore;
    use std::fs;
    use std::sync::Arc;

    fn render_shop(shop: Shop) -> String {
        let mut dom = VirtualDom::new_with_props(
            ShopView,
            ShopViewProps {
                title: "街かどメモ".to_string(),
                shop,
            },
        );
        dom.rebuild_in_place();
        render(&dom)
    }

    #[test]
    fn test_shop_detail_renders_front_matter_and_body() {
        let shop = Shop {
            area: "浅草".to_string(),
            slug: "kissa".to_string(),
            name: "喫茶 ひかり".to_string(),
            address: "東京都台東区浅草1-1-1".to_string(),
            image: "/images/hikari.jpg".to_string(),
            scene_tags: vec!["デート".to_string()],
            content: "## おすすめ\n\nプリンが名物。".to_string(),
            ..Default::default()
        };
        let html = render_shop(shop);

        assert!(html.contains("浅草のお店一覧に戻る"));
        assert!(html.contains("shop-hero"));
        assert!(html.contains("/images/hikari.jpg"));
        assert!(html.contains("喫茶 ひかり"));
        assert!(html.contains("tag-scene"));
        assert!(html.contains("プリンが名物。"));
    }

    #[test]
    fn test_shop_with_map_directive_mounts_widget() {
        let shop = Shop {
            area: "浅草".to_string(),
            slug: "kissa".to_string(),
            name: "喫茶".to_string(),
            content: "{{maps:東京都台東区浅草1-1-1}}".to_string(),
            ..Default::default()
        };
        let html = render_shop(shop);

        assert!(html.contains("map-widget"));
        assert!(!html.contains("{{maps:"));
    }

    #[test]
    fn test_missing_shop_shows_message() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("shops").join("浅草")).unwrap();
        let site = SiteContext {
            store: Arc::new(ContentStore::open(dir.path(), false).unwrap()),
            title: "街かどメモ".to_string(),
        };

        fn app() -> Element {
            rsx! {
                ShopPage { area: "浅草".to_string(), slug: "nothing".to_string() }
            }
        }

        let mut dom = VirtualDom::new(app).with_root_context(site);
        dom.rebuild_in_place();
        let html = render(&dom);

        assert!(html.contains("お店が見つかりませんでした。"));
    }
}
