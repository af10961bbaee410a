// src/geocoding/mod.rs
use serde::Deserialize;
use thiserror::Error;

use crate::domain::Geometry;

mod mapbox;

pub use mapbox::MapboxGeocoder;

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("API error: {status} - {body}")]
    Api { status: u16, body: String },

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("no features found for {0:?}")]
    NoFeatures(String),
}

/// One GeoJSON feature from a forward-geocoding response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub place_name: Option<String>,
    pub geometry: Geometry,
}

/// Resolves free-text locations to coordinates.
pub trait Geocoder: Send + Sync {
    fn forward_geocode(&self, query: &str, limit: usize) -> Result<Vec<Feature>, GeocodeError>;
}
