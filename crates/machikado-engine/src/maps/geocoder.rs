//! Address geocoding.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_COUNTRY_HINT: &str = "Japan";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const USER_AGENT: &str = concat!("machikado/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("geocoding request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("geocoding service answered {0}")]
    Status(StatusCode),

    #[error("geocoding service returned an invalid coordinate: {0}")]
    InvalidCoordinate(String),
}

/// Resolves a free-text address to coordinates, best match first
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn lookup(&self, address: &str) -> Result<Vec<Coordinate>, GeocodeError>;
}

/// Geocoder backed by a Nominatim-compatible `search` endpoint
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: Client,
    endpoint: String,
    country_hint: String,
}

/// One search hit; Nominatim sends coordinates as strings
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

impl NominatimGeocoder {
    pub fn new(
        endpoint: impl Into<String>,
        country_hint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            country_hint: country_hint.into(),
        })
    }

    fn query(&self, address: &str) -> String {
        let hint = self.country_hint.trim();
        if hint.is_empty() {
            address.to_string()
        } else {
            format!("{address} {hint}")
        }
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn lookup(&self, address: &str) -> Result<Vec<Coordinate>, GeocodeError> {
        let query = self.query(address);
        log::debug!("geocoding {query:?} via {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("format", "json"), ("q", query.as_str()), ("limit", "1")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Status(status));
        }

        let places: Vec<Place> = response.json().await?;
        places.into_iter().map(parse_place).collect()
    }
}

fn parse_place(place: Place) -> Result<Coordinate, GeocodeError> {
    let parse = |value: &str| {
        value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| GeocodeError::InvalidCoordinate(value.to_string()))
    };

    Ok(Coordinate {
        lat: parse(&place.lat)?,
        lon: parse(&place.lon)?,
    })
}
