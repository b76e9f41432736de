//! URL-style page addresses.
//!
//! Paths look like `/`, `/{area}`, `/{area}/{shop}`, `/blog` and
//! `/blog/{slug}`. Segments are percent-decoded on the way in and
//! percent-encoded on the way out, so Japanese area names survive a
//! round trip through an address bar.

use std::borrow::Cow;

/// Segment reserved for the blog; an area with this name is unreachable
pub const BLOG_SEGMENT: &str = "blog";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Area(String),
    Shop {
        area: String,
        slug: String,
    },
    Blog,
    Post(String),
    NotFound(String),
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let trimmed = path.split(['?', '#']).next().unwrap_or_default();
        let raw: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        let mut segments = Vec::with_capacity(raw.len());
        for segment in &raw {
            match urlencoding::decode(segment) {
                Ok(decoded) => segments.push(decoded.into_owned()),
                Err(_) => return Route::NotFound(path.to_string()),
            }
        }

        match segments.as_slice() {
            [] => Route::Home,
            [blog] if blog == BLOG_SEGMENT => Route::Blog,
            [blog, slug] if blog == BLOG_SEGMENT => Route::Post(slug.clone()),
            [area] => Route::Area(area.clone()),
            [area, slug] => Route::Shop {
                area: area.clone(),
                slug: slug.clone(),
            },
            _ => Route::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Area(area) => format!("/{}", encode(area)),
            Route::Shop { area, slug } => format!("/{}/{}", encode(area), encode(slug)),
            Route::Blog => format!("/{BLOG_SEGMENT}"),
            Route::Post(slug) => format!("/{BLOG_SEGMENT}/{}", encode(slug)),
            Route::NotFound(path) => path.clone(),
        }
    }

    /// Area the page belongs to, used to highlight the sidebar entry
    pub fn area(&self) -> Option<&str> {
        match self {
            Route::Area(area) | Route::Shop { area, .. } => Some(area),
            _ => None,
        }
    }
}

fn encode(segment: &str) -> Cow<'_, str> {
    urlencoding::encode(segment)
}
