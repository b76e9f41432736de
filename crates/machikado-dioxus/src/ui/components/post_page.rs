use super::{Crumb, Header, MarkdownView, NavLink, NotFoundView, PostMeta, TagList};
use crate::ui::context::{use_content, use_site_title};
use dioxus::prelude::*;
use machikado_engine::{BlogPost, Route, render_markdown};

#[component]
pub fn PostPage(slug: String) -> Element {
    let title = use_site_title();
    let post = {
        let slug = slug.clone();
        use_content(move |store| store.get_post(&slug))
    };

    match post {
        Ok(Some(post)) => rsx! { PostView { title, post } },
        Ok(None) => rsx! { NotFoundView { title, path: Route::Post(slug).path() } },
        Err(reason) => rsx! {
            Header { title }
            div {
                class: "page not-found",
                p { class: "empty-message", "記事を読み込めませんでした: {reason}" }
                NavLink { to: Route::Blog, class: "back-link", "← ブログ一覧に戻る" }
            }
        },
    }
}

/// A single blog post
#[component]
pub fn PostView(title: String, post: BlogPost) -> Element {
    let document = render_markdown(&post.content);
    let BlogPost {
        title: heading,
        date,
        author,
        tags,
        ..
    } = post;

    rsx! {
        Header {
            title,
            trail: vec![
                Crumb::link("ホーム", Route::Home),
                Crumb::link("ブログ", Route::Blog),
                Crumb::text(heading.clone()),
            ],
        }
        article {
            class: "page post-page",
            NavLink { to: Route::Blog, class: "back-link", "← ブログ一覧に戻る" }
            TagList { tags }
            h1 { class: "page-title", "{heading}" }
            PostMeta { date, author }
            MarkdownView { document }
        }
    }
}
