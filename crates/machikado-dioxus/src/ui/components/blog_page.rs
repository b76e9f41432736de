use super::{Crumb, Header, NavLink, PostMeta, TagList};
use crate::ui::context::{use_content, use_site_title};
use dioxus::prelude::*;
use machikado_engine::{BlogPost, Route};

#[component]
pub fn BlogPage() -> Element {
    let title = use_site_title();
    let posts = use_content(|store| store.list_posts()).unwrap_or_default();

    rsx! {
        BlogView { title, posts }
    }
}

/// Post cards, newest first
#[component]
pub fn BlogView(title: String, posts: Vec<BlogPost>) -> Element {
    rsx! {
        Header {
            title,
            trail: vec![Crumb::link("ホーム", Route::Home), Crumb::text("ブログ")],
        }
        div {
            class: "page blog-page",
            h1 { class: "page-title", "ブログ" }
            p { class: "page-subtitle", "技術記事やチュートリアルを共有しています" }
            if posts.is_empty() {
                p { class: "empty-message", "まだ記事がありません。" }
            } else {
                div {
                    class: "post-list",
                    for post in posts {
                        PostCard { key: "{post.slug}", post: post.clone() }
                    }
                }
            }
        }
    }
}

#[component]
fn PostCard(post: BlogPost) -> Element {
    let route = post.route();
    let BlogPost {
        title,
        date,
        excerpt,
        author,
        tags,
        ..
    } = post;

    rsx! {
        article {
            class: "card post-card",
            TagList { tags }
            h2 {
                class: "card-title",
                NavLink { to: route, class: "post-title-link", "{title}" }
            }
            if !excerpt.is_empty() {
                p { class: "card-text", "{excerpt}" }
            }
            PostMeta { date, author }
        }
    }
}
