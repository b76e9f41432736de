//! Map embeds for `{{kind:address}}` directives.
//!
//! The map frame URL is a pure template over the address and is always
//! available. The street-level panorama needs coordinates, so it depends on
//! a best-effort geocoding lookup; when that yields nothing the UI falls back
//! to an external "open in maps" link.

pub mod geocoder;

pub use geocoder::{Coordinate, GeocodeError, Geocoder, NominatimGeocoder};

use crate::models::DirectiveKind;
use thiserror::Error;

/// Which frames a map widget shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapMode {
    Map,
    Panorama,
    Both,
}

impl MapMode {
    pub fn shows_map(self) -> bool {
        matches!(self, MapMode::Map | MapMode::Both)
    }

    pub fn shows_panorama(self) -> bool {
        matches!(self, MapMode::Panorama | MapMode::Both)
    }
}

impl From<DirectiveKind> for MapMode {
    fn from(kind: DirectiveKind) -> Self {
        match kind {
            DirectiveKind::GoogleMap => MapMode::Map,
            DirectiveKind::StreetView => MapMode::Panorama,
            DirectiveKind::Maps => MapMode::Both,
        }
    }
}

/// Embeddable URLs for one address
#[derive(Debug, Clone, PartialEq)]
pub struct MapResolution {
    pub map_url: String,
    pub panorama_url: Option<String>,
}

#[derive(Error, Debug)]
#[error("map lookup failed: {source}")]
pub struct MapLookupError {
    /// Still usable; only the panorama is lost
    pub map_url: String,
    #[source]
    pub source: GeocodeError,
}

/// Render state of a map widget
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MapState {
    #[default]
    Loading,
    Ready(MapResolution),
    Failed { map_url: String, reason: String },
}

impl MapState {
    pub fn map_url(&self) -> Option<&str> {
        match self {
            MapState::Loading => None,
            MapState::Ready(resolution) => Some(&resolution.map_url),
            MapState::Failed { map_url, .. } => Some(map_url),
        }
    }

    pub fn panorama_url(&self) -> Option<&str> {
        match self {
            MapState::Ready(resolution) => resolution.panorama_url.as_deref(),
            _ => None,
        }
    }
}

impl From<Result<MapResolution, MapLookupError>> for MapState {
    fn from(result: Result<MapResolution, MapLookupError>) -> Self {
        match result {
            Ok(resolution) => MapState::Ready(resolution),
            Err(e) => MapState::Failed {
                reason: e.source.to_string(),
                map_url: e.map_url,
            },
        }
    }
}

pub fn map_embed_url(address: &str) -> String {
    format!(
        "https://maps.google.com/maps?q={}&t=&z=16&ie=UTF8&iwloc=&output=embed",
        urlencoding::encode(address)
    )
}

pub fn maps_search_url(address: &str) -> String {
    format!(
        "https://www.google.com/maps/search/?api=1&query={}",
        urlencoding::encode(address)
    )
}

pub fn maps_place_url(address: &str) -> String {
    format!(
        "https://www.google.com/maps/place/{}",
        urlencoding::encode(address)
    )
}

/// Street-level panorama embed centred on `at`
pub fn panorama_embed_url(at: Coordinate) -> String {
    format!(
        "https://www.google.com/maps/embed?pb=!4v0!6m8!1m7!1s!2m2!1d{}!2d{}!3f0!4f0!5f0.7820865974627469",
        at.lat, at.lon
    )
}

/// Work out the embed URLs for `address`.
///
/// Zero geocoding results is a successful resolution without a panorama.
/// A failed lookup is an error that still carries the map URL. A blank
/// address never reaches the geocoder.
pub async fn resolve_map(
    address: &str,
    geocoder: &dyn Geocoder,
) -> Result<MapResolution, MapLookupError> {
    let map_url = map_embed_url(address);

    if address.trim().is_empty() {
        return Ok(MapResolution {
            map_url,
            panorama_url: None,
        });
    }

    match geocoder.lookup(address).await {
        Ok(found) => {
            let panorama_url = found.first().copied().map(panorama_embed_url);
            if panorama_url.is_none() {
                log::info!("no coordinates found for {address:?}");
            }
            Ok(MapResolution {
                map_url,
                panorama_url,
            })
        }
        Err(source) => {
            log::warn!("geocoding {address:?} failed: {source}");
            Err(MapLookupError { map_url, source })
        }
    }
}
