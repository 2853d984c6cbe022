//! core::types
//!
//! Strong types for the visited-cities domain.
//!
//! # Types
//!
//! - [`CityId`] - Identifier assigned by the remote collection
//! - [`Position`] - Geographic coordinates of a visit
//! - [`City`] - A persisted visit record
//! - [`NewCity`] - A draft record, sent to the collection on create
//! - [`Country`] - A country summary derived from the city list
//!
//! # Wire Format
//!
//! Records use the collection's camelCase field names (`cityName`). Ids may
//! arrive as JSON numbers or numeric strings; both decode to the same
//! [`CityId`], and ids always serialize as numbers.
//!
//! # Examples
//!
//! ```
//! use worldwise::core::types::{City, CityId};
//!
//! let json = r#"{
//!     "id": "7",
//!     "cityName": "Lisbon",
//!     "country": "Portugal",
//!     "emoji": "🇵🇹",
//!     "date": "2027-10-31T15:59:59.138Z",
//!     "notes": "My favorite city so far!",
//!     "position": { "lat": 38.727881642324164, "lng": -9.140900099907554 }
//! }"#;
//!
//! let city: City = serde_json::from_str(json).unwrap();
//! assert_eq!(city.id, CityId::new(7));
//! assert!(city.id.matches("07"));
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid city id: {0}")]
    InvalidCityId(String),

    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),
}

/// Identifier of a city record.
///
/// Ids are assigned by the remote collection and never by the client.
/// Comparison is numeric, so `"7"`, `"07"` and `7` all name the same city.
///
/// Only non-negative integers fit, sent as JSON numbers or numeric strings.
/// A collection that hands out other ids (json-server 1.x assigns short hex
/// strings such as `"a1b2"`) is not supported: its records fail to decode
/// and the operation is rejected with a `Decode` error.
///
/// # Example
///
/// ```
/// use worldwise::core::types::CityId;
///
/// let id: CityId = "42".parse().unwrap();
/// assert_eq!(id.get(), 42);
/// assert!("forty-two".parse::<CityId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawId", into = "u64")]
pub struct CityId(u64);

impl CityId {
    /// Wrap a numeric id.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The numeric value.
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Check whether a textual id names this city.
    ///
    /// Text that is not a number never matches.
    pub fn matches(&self, other: &str) -> bool {
        other.parse::<CityId>().map(|id| id == *self).unwrap_or(false)
    }
}

impl FromStr for CityId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(CityId)
            .map_err(|_| TypeError::InvalidCityId(s.to_string()))
    }
}

impl From<u64> for CityId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<CityId> for u64 {
    fn from(id: CityId) -> Self {
        id.0
    }
}

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Either JSON representation the collection may use for an id.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

impl TryFrom<RawId> for CityId {
    type Error = TypeError;

    fn try_from(raw: RawId) -> Result<Self, Self::Error> {
        match raw {
            RawId::Number(n) => Ok(CityId(n)),
            RawId::Text(s) => s.parse(),
        }
    }
}

/// Geographic position of a visit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Latitude in degrees
    #[serde(deserialize_with = "coordinate")]
    pub lat: f64,
    /// Longitude in degrees
    #[serde(deserialize_with = "coordinate")]
    pub lng: f64,
}

impl Position {
    /// Create a position from latitude and longitude.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Accept coordinates as numbers or numeric strings.
///
/// Drafts built from URL query parameters carry coordinates as strings.
fn coordinate<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawCoordinate {
        Number(f64),
        Text(String),
    }

    match RawCoordinate::deserialize(deserializer)? {
        RawCoordinate::Number(n) => Ok(n),
        RawCoordinate::Text(s) => s.trim().parse::<f64>().map_err(|_| {
            serde::de::Error::custom(TypeError::InvalidCoordinate(s.clone()))
        }),
    }
}

/// A visited city, as stored by the remote collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    /// Identifier assigned by the collection
    pub id: CityId,
    /// City display name
    pub city_name: String,
    /// Country display name
    pub country: String,
    /// Flag emoji of the country
    #[serde(default)]
    pub emoji: String,
    /// When the visit happened
    pub date: DateTime<Utc>,
    /// Free-form notes about the visit
    #[serde(default)]
    pub notes: String,
    /// Where the city is
    pub position: Position,
}

impl City {
    /// Attach a server-assigned id to a draft.
    pub fn from_draft(id: CityId, draft: NewCity) -> Self {
        Self {
            id,
            city_name: draft.city_name,
            country: draft.country,
            emoji: draft.emoji,
            date: draft.date,
            notes: draft.notes,
            position: draft.position,
        }
    }
}

/// A city record that has not been stored yet.
///
/// This is the request body of a create call; it never carries an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCity {
    /// City display name
    pub city_name: String,
    /// Country display name
    pub country: String,
    /// Flag emoji of the country
    pub emoji: String,
    /// When the visit happened
    pub date: DateTime<Utc>,
    /// Free-form notes about the visit
    pub notes: String,
    /// Where the city is
    pub position: Position,
}

/// A country the user has visited, derived from the city list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Country {
    /// Country display name
    pub country: String,
    /// Flag emoji of the country
    pub emoji: String,
}

/// Collect the distinct countries of a city list.
///
/// Countries are keyed by name and keep first-seen order.
pub fn countries_of(cities: &[City]) -> Vec<Country> {
    let mut seen: Vec<Country> = Vec::new();
    for city in cities {
        if !seen.iter().any(|c| c.country == city.country) {
            seen.push(Country {
                country: city.country.clone(),
                emoji: city.emoji.clone(),
            });
        }
    }
    seen
}
