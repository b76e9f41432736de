use dioxus::prelude::*;

/// The five shop tag groups, each in its own colour.
///
/// Generic, price and scene tags share the first row; access and business
/// hours go on the second. Rows with no tags are left out.
#[component]
pub fn TagDisplay(
    #[props(default)] tags: Vec<String>,
    #[props(default)] price_tags: Vec<String>,
    #[props(default)] scene_tags: Vec<String>,
    #[props(default)] access_tags: Vec<String>,
    #[props(default)] business_tags: Vec<String>,
) -> Element {
    let first: Vec<(&'static str, String)> = tagged("tag-generic", &tags)
        .chain(tagged("tag-price", &price_tags))
        .chain(tagged("tag-scene", &scene_tags))
        .collect();
    let second: Vec<(&'static str, String)> = tagged("tag-access", &access_tags)
        .chain(tagged("tag-business", &business_tags))
        .collect();

    if first.is_empty() && second.is_empty() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "tag-display",
            if !first.is_empty() {
                TagRow { tags: first }
            }
            if !second.is_empty() {
                TagRow { tags: second }
            }
        }
    }
}

fn tagged<'a>(
    class: &'static str,
    tags: &'a [String],
) -> impl Iterator<Item = (&'static str, String)> + 'a {
    tags.iter().map(move |tag| (class, tag.clone()))
}

#[component]
fn TagRow(tags: Vec<(&'static str, String)>) -> Element {
    rsx! {
        div {
            class: "tag-row",
            for (class, tag) in tags {
                span { class: "tag {class}", "{tag}" }
            }
        }
    }
}

/// Plain tag chips for blog posts
#[component]
pub fn TagList(tags: Vec<String>) -> Element {
    if tags.is_empty() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "tag-list",
            for tag in tags {
                span { class: "tag tag-generic", "{tag}" }
            }
        }
    }
}
