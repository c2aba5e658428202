//! Address lookup behind a trait so tests and offline deployments can swap
//! the Nominatim client out.

use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use invitr_types::api::VenueSuggestion;

pub trait Geocoder: Send + Sync {
    /// Up to `limit` places matching `query`, restricted to `country` codes.
    fn autocomplete(&self, query: &str, country: &str, limit: usize) -> Result<Vec<VenueSuggestion>>;

    /// The best match for a free-form address.
    fn geocode(&self, address: &str) -> Result<Option<VenueSuggestion>>;
}

const USER_AGENT: &str = concat!("invitr/", env!("CARGO_PKG_VERSION"));
const TIMEOUT: Duration = Duration::from_secs(10);

/// OpenStreetMap Nominatim search API.
pub struct NominatimGeocoder {
    base_url: String,
    // A blocking client must not be built on an async worker, so it is
    // created by the first lookup, which runs under `spawn_blocking`.
    client: OnceLock<reqwest::blocking::Client>,
}

impl NominatimGeocoder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: OnceLock::new(),
        }
    }

    fn client(&self) -> Result<&reqwest::blocking::Client> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(TIMEOUT)
            .build()?;
        Ok(self.client.get_or_init(|| client))
    }

    fn search(&self, params: &[(&str, &str)]) -> Result<Vec<VenueSuggestion>> {
        let url = format!("{}/search", self.base_url);
        let places: Vec<Place> = self
            .client()?
            .get(&url)
            .query(&[("format", "json"), ("addressdetails", "1")])
            .query(params)
            .send()
            .with_context(|| format!("request to {url} failed"))?
            .error_for_status()?
            .json()
            .context("unexpected geocoder response")?;

        debug!("Geocoder returned {} places", places.len());
        Ok(places.into_iter().filter_map(Place::into_suggestion).collect())
    }
}

impl Geocoder for NominatimGeocoder {
    fn autocomplete(&self, query: &str, country: &str, limit: usize) -> Result<Vec<VenueSuggestion>> {
        let limit = limit.to_string();
        self.search(&[("q", query), ("countrycodes", country), ("limit", &limit)])
    }

    fn geocode(&self, address: &str) -> Result<Option<VenueSuggestion>> {
        let mut places = self.search(&[("q", address), ("limit", "1")])?;
        Ok(if places.is_empty() { None } else { Some(places.swap_remove(0)) })
    }
}

#[derive(Deserialize)]
struct Place {
    #[serde(default)]
    place_id: Option<serde_json::Value>,
    #[serde(default)]
    name: Option<String>,
    display_name: String,
    lat: String,
    lon: String,
    #[serde(default, rename = "type")]
    kind: Option<String>,
}

impl Place {
    /// Places whose coordinates do not parse are dropped.
    fn into_suggestion(self) -> Option<VenueSuggestion> {
        let latitude = self.lat.parse().ok()?;
        let longitude = self.lon.parse().ok()?;
        let place_id = self.place_id.map(|id| match id {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        });

        Some(VenueSuggestion {
            place_id,
            name: self.name.filter(|n| !n.is_empty()),
            address: self.display_name,
            latitude,
            longitude,
            venue_type: self.kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nominatim_place_maps_to_suggestion() {
        let places: Vec<Place> = serde_json::from_str(
            r#"[{"place_id": 42, "name": "Taj Palace", "display_name": "Taj Palace, New Delhi",
                 "lat": "28.5961", "lon": "77.1716", "type": "hotel"},
                {"display_name": "Nowhere", "lat": "n/a", "lon": "0"}]"#,
        )
        .unwrap();

        let suggestions: Vec<_> = places.into_iter().filter_map(Place::into_suggestion).collect();
        assert_eq!(suggestions.len(), 1);

        let taj = &suggestions[0];
        assert_eq!(taj.place_id.as_deref(), Some("42"));
        assert_eq!(taj.name.as_deref(), Some("Taj Palace"));
        assert_eq!(taj.venue_type.as_deref(), Some("hotel"));
        assert!((taj.latitude - 28.5961).abs() < 1e-9);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let geocoder = NominatimGeocoder::new("https://geo.example/");
        assert_eq!(geocoder.base_url, "https://geo.example");
    }

    #[test]
    fn http_client_is_built_once() {
        let geocoder = NominatimGeocoder::new("https://geo.example");
        assert!(geocoder.client.get().is_none());

        let first = geocoder.client().unwrap();
        let second = geocoder.client().unwrap();
        assert!(std::ptr::eq(first, second));
    }
}
