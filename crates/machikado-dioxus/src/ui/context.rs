//! Values shared through the Dioxus context.

use dioxus::prelude::*;
use machikado_engine::{ContentError, ContentStore, Geocoder};
use std::sync::Arc;

pub const DEFAULT_TITLE: &str = "街かどメモ";

/// Content store and site settings
#[derive(Clone)]
pub struct SiteContext {
    pub store: Arc<ContentStore>,
    pub title: String,
}

/// Geocoder used by map widgets; absent when it could not be built
#[derive(Clone)]
pub struct GeocoderHandle(pub Arc<dyn Geocoder>);

/// Site title from context, or the default outside the app shell
pub fn use_site_title() -> String {
    try_use_context::<SiteContext>()
        .map(|site| site.title)
        .unwrap_or_else(|| DEFAULT_TITLE.to_string())
}

/// Run a store query once per mount. Errors are logged and turned into a
/// message for the page.
pub fn use_content<T, F>(query: F) -> Result<T, String>
where
    T: Clone + 'static,
    F: FnOnce(&ContentStore) -> Result<T, ContentError>,
{
    use_hook(|| match try_use_context::<SiteContext>() {
        Some(site) => query(&site.store).map_err(|e| {
            log::warn!("content query failed: {e}");
            e.to_string()
        }),
        None => Err("content store unavailable".to_string()),
    })
}
