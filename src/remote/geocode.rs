//! remote::geocode
//!
//! Reverse geocoding: from a position to the place a new city record needs.
//!
//! # Design
//!
//! One `GET <geocode_url>?latitude=<lat>&longitude=<lng>` per lookup. The
//! response names the city (or, failing that, the locality), the country,
//! and its ISO 3166 alpha-2 code. A response without a usable country code
//! means the position is not in a city (open sea, say), and the lookup
//! returns `None`.
//!
//! Failures map onto [`RemoteError`] the same way the city collection's do.

use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::Client;
use serde::Deserialize;

use super::http::{is_http_url, HttpCityCollection, DEFAULT_USER_AGENT};
use super::traits::RemoteError;
use crate::core::flag::flag_emoji;
use crate::core::types::Position;

/// Reverse geocoding endpoint used when nothing is configured.
pub const DEFAULT_GEOCODE_URL: &str = "https://api.bigdatacloud.net/data/reverse-geocode-client";

/// What a position resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Place {
    /// City or locality name; may be empty for rural positions
    pub city_name: String,
    /// Country display name
    pub country: String,
    /// Flag emoji derived from the country code
    pub emoji: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeocodeResponse {
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    locality: Option<String>,
    #[serde(default)]
    country_name: Option<String>,
    #[serde(default)]
    country_code: Option<String>,
}

impl GeocodeResponse {
    fn into_place(self) -> Option<Place> {
        let emoji = flag_emoji(self.country_code.as_deref()?)?;
        let city_name = [self.city, self.locality]
            .into_iter()
            .flatten()
            .find(|name| !name.trim().is_empty())
            .unwrap_or_default();

        Some(Place {
            city_name,
            country: self.country_name.unwrap_or_default(),
            emoji,
        })
    }
}

/// Client for a reverse geocoding endpoint.
#[derive(Debug, Clone)]
pub struct ReverseGeocoder {
    client: Client,
    url: String,
}

impl ReverseGeocoder {
    /// Create a geocoder for the given endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBaseUrl` if `url` is not an absolute http(s) URL.
    pub fn new(url: &str) -> Result<Self, RemoteError> {
        Self::with_user_agent(url, DEFAULT_USER_AGENT)
    }

    /// Create a geocoder that identifies itself with a custom User-Agent.
    pub fn with_user_agent(url: &str, user_agent: &str) -> Result<Self, RemoteError> {
        let url = url.trim();
        if !is_http_url(url) {
            return Err(RemoteError::InvalidBaseUrl(url.to_string()));
        }

        let client = Client::builder()
            .user_agent(user_agent.to_string())
            .build()
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    /// Endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Resolve a position to a place.
    ///
    /// Returns `Ok(None)` when the position does not fall in a country.
    pub async fn lookup(&self, position: Position) -> Result<Option<Place>, RemoteError> {
        log::debug!("GET {} ({}, {})", self.url, position.lat, position.lng);

        let response = self
            .client
            .get(&self.url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .query(&[("latitude", position.lat), ("longitude", position.lng)])
            .send()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(
                HttpCityCollection::error_for_status(response, status, "reverse geocode").await,
            );
        }

        let body: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| RemoteError::Decode(format!("reverse geocode: {}", e)))?;

        Ok(body.into_place())
    }
}
