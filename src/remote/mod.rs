//! remote
//!
//! Abstraction for the remote city collection.
//!
//! # Architecture
//!
//! The `CityCollection` trait defines the four calls the store makes against
//! the REST resource. Commands use the [`create_collection`] factory function
//! rather than importing a specific implementation.
//!
//! A collection is an unreliable dependency: any call may fail, and failures
//! never compromise the store's last good data.
//!
//! # Modules
//!
//! - `traits`: Core `CityCollection` trait and `RemoteError`
//! - [`http`]: REST implementation using reqwest
//! - [`mock`]: In-memory implementation for deterministic testing
//! - [`geocode`]: Reverse geocoding for new city records
//! - `factory`: Collection and geocoder creation from configuration

mod factory;
pub mod geocode;
pub mod http;
pub mod mock;
mod traits;

pub use factory::{create_collection, create_geocoder};
pub use traits::*;
