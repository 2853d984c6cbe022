//! remote::traits
//!
//! Trait definition for the remote city collection.
//!
//! # Design
//!
//! The `CityCollection` trait is async because every call crosses the
//! network. All methods return `Result` so callers decide how failures are
//! surfaced; the store turns every error into its `rejected` transition.
//!
//! # Example
//!
//! ```ignore
//! use worldwise::remote::{CityCollection, RemoteError};
//! use worldwise::core::types::CityId;
//!
//! async fn show(collection: &dyn CityCollection) -> Result<(), RemoteError> {
//!     let city = collection.get_city(CityId::new(1)).await?;
//!     println!("{} ({})", city.city_name, city.country);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use thiserror::Error;

use crate::core::types::{City, CityId, NewCity};

/// Errors from remote collection calls.
///
/// Transport failures and malformed responses are both recoverable: the
/// store reports them to the user and keeps its last good data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The requested record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The collection answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// The response body was not the expected JSON.
    #[error("malformed response: {0}")]
    Decode(String),

    /// The configured base URL cannot address the collection.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

/// A remote collection of city records.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so one collection can serve every
/// in-flight store operation.
#[async_trait]
pub trait CityCollection: Send + Sync {
    /// Short name of the backend (e.g., "http", "mock").
    fn name(&self) -> &'static str;

    /// List every stored city.
    ///
    /// Maps to `GET /cities`.
    async fn list_cities(&self) -> Result<Vec<City>, RemoteError>;

    /// Fetch one city by id.
    ///
    /// Maps to `GET /cities/{id}`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no record has this id
    async fn get_city(&self, id: CityId) -> Result<City, RemoteError>;

    /// Store a new city and return it with its assigned id.
    ///
    /// Maps to `POST /cities`.
    async fn create_city(&self, draft: NewCity) -> Result<City, RemoteError>;

    /// Delete a city by id.
    ///
    /// Maps to `DELETE /cities/{id}`. Any success status counts; the body is
    /// ignored. A record that is already gone is not an error.
    async fn delete_city(&self, id: CityId) -> Result<(), RemoteError>;
}
