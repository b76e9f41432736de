use std::cmp::Ordering;

/// A blog post loaded from `posts/<slug>.md`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlogPost {
    pub slug: String,
    pub title: String,
    /// Kept as written; ordering compares the raw strings
    pub date: String,
    pub excerpt: String,
    pub author: String,
    pub tags: Vec<String>,
    pub content: String,
}

impl BlogPost {
    /// Newest first. Equal dates compare equal so a stable sort keeps input order.
    pub fn newest_first(a: &BlogPost, b: &BlogPost) -> Ordering {
        b.date.cmp(&a.date)
    }

    pub fn route(&self) -> crate::route::Route {
        crate::route::Route::Post(self.slug.clone())
    }
}
