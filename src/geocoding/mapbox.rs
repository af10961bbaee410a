// src/geocoding/mapbox.rs
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use crate::geocoding::{Feature, GeocodeError, Geocoder};

pub const DEFAULT_BASE_URL: &str = "https://api.mapbox.com";

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

/// Mapbox "places" forward geocoder.
pub struct MapboxGeocoder {
    access_token: String,
    base_url: String,
    client: Client,
}

impl MapboxGeocoder {
    pub fn new(access_token: String, timeout: Duration) -> Result<Self, GeocodeError> {
        Self::with_base_url(access_token, DEFAULT_BASE_URL.to_string(), timeout)
    }

    pub fn with_base_url(
        access_token: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GeocodeError::Request(e.to_string()))?;

        Ok(Self {
            access_token,
            base_url,
            client,
        })
    }

    fn request_url(&self, query: &str, limit: usize) -> Result<Url, GeocodeError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| GeocodeError::Request(e.to_string()))?;
        let resource = format!("{query}.json");

        url.path_segments_mut()
            .map_err(|_| GeocodeError::Request(format!("bad base url: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["geocoding", "v5", "mapbox.places", resource.as_str()]);

        url.query_pairs_mut()
            .append_pair("access_token", &self.access_token)
            .append_pair("limit", &limit.to_string());

        Ok(url)
    }
}

fn decode_features(body: &str) -> Result<Vec<Feature>, GeocodeError> {
    serde_json::from_str::<FeatureCollection>(body)
        .map(|fc| fc.features)
        .map_err(|e| GeocodeError::Decode(e.to_string()))
}

impl Geocoder for MapboxGeocoder {
    fn forward_geocode(&self, query: &str, limit: usize) -> Result<Vec<Feature>, GeocodeError> {
        let url = self.request_url(query, limit)?;

        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| GeocodeError::Request(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .map_err(|e| GeocodeError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let features = decode_features(&body)?;
        tracing::debug!(query, count = features.len(), "geocoded location");
        Ok(features)
    }
}
