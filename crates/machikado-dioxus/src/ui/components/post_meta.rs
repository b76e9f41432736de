use dioxus::prelude::*;

/// `2024-03-07` becomes `2024/3/7`; anything else is shown as written
pub fn format_date(date: &str) -> String {
    let parts: Vec<&str> = date.trim().split('-').collect();
    match parts.as_slice() {
        [year, month, day] if year.len() == 4 => {
            match (month.parse::<u32>(), day.parse::<u32>()) {
                (Ok(month), Ok(day)) => format!("{year}/{month}/{day}"),
                _ => date.to_string(),
            }
        }
        _ => date.to_string(),
    }
}

/// Date and author line under a post title
#[component]
pub fn PostMeta(date: String, author: String) -> Element {
    let date = format_date(&date);

    rsx! {
        div {
            class: "post-meta",
            if !date.is_empty() {
                time { class: "post-date", "{date}" }
            }
            if !author.is_empty() {
                span { class: "post-author", "by {author}" }
            }
        }
    }
}
