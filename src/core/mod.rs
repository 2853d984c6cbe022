//! core
//!
//! Core domain types and configuration for WorldWise.
//!
//! # Modules
//!
//! - [`types`] - Strong types: CityId, City, NewCity, Position, Country
//! - [`flag`] - Country code and flag emoji conversions
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Wire formats are decoded into strong types at the boundary
//! - Ids are compared numerically, whatever their JSON representation

pub mod config;
pub mod flag;
pub mod types;
