//! remote::factory
//!
//! Collection and geocoder creation from configuration.
//!
//! Commands call [`create_collection`] instead of constructing a specific
//! backend, so the store only ever sees `dyn CityCollection`.

use std::sync::Arc;

use super::geocode::ReverseGeocoder;
use super::http::HttpCityCollection;
use super::traits::{CityCollection, RemoteError};
use crate::core::config::Config;

/// Create the collection described by the configuration.
///
/// # Errors
///
/// Returns `InvalidBaseUrl` if the configured API base is unusable.
///
/// # Example
///
/// ```
/// use worldwise::core::config::Config;
/// use worldwise::remote::create_collection;
///
/// let collection = create_collection(&Config::default()).unwrap();
/// assert_eq!(collection.name(), "http");
/// ```
pub fn create_collection(config: &Config) -> Result<Arc<dyn CityCollection>, RemoteError> {
    let collection = HttpCityCollection::with_user_agent(config.api_base(), config.user_agent())?;
    log::debug!("using city collection at {}", collection.endpoint());
    Ok(Arc::new(collection))
}

/// Create the reverse geocoder described by the configuration.
pub fn create_geocoder(config: &Config) -> Result<ReverseGeocoder, RemoteError> {
    let geocoder = ReverseGeocoder::with_user_agent(config.geocode_url(), config.user_agent())?;
    log::debug!("using reverse geocoder at {}", geocoder.url());
    Ok(geocoder)
}
