//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--api-base <url>`: Use this API instead of the configured one
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//! - `--json`: Print the resulting state as JSON

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};

use crate::core::types::CityId;

/// WorldWise - keep track of the cities you have visited
#[derive(Parser, Debug)]
#[command(name = "worldwise")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the city API (overrides the config file)
    #[arg(long, global = true, value_name = "URL")]
    pub api_base: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print the resulting state as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every visited city
    #[command(name = "list", visible_alias = "ls")]
    List,

    /// List the countries of visited cities
    Countries,

    /// Show one city in detail
    Show {
        /// City id
        id: CityId,
    },

    /// Record a newly visited city
    #[command(name = "create", visible_alias = "add")]
    Create(CreateArgs),

    /// Delete a city
    #[command(name = "delete", visible_alias = "rm")]
    Delete {
        /// City id
        id: CityId,
    },

    /// Print the effective configuration, or change it
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Set a configuration value in the config file
    Set {
        /// Configuration key (api_base, ordering, user_agent, geocode_url)
        key: String,
        /// Value to set
        value: String,
    },
}

/// Arguments of the create command.
///
/// Name, country and flag may be left out; they are then looked up from the
/// position with the reverse geocoder.
#[derive(Args, Debug, Clone)]
#[command(group(
    clap::ArgGroup::new("flag")
        .args(["emoji", "country_code"])
))]
pub struct CreateArgs {
    /// City name
    #[arg(long)]
    pub name: Option<String>,

    /// Country name
    #[arg(long)]
    pub country: Option<String>,

    /// Flag emoji of the country
    #[arg(long)]
    pub emoji: Option<String>,

    /// Two-letter country code, converted to a flag emoji
    #[arg(long, value_name = "CC")]
    pub country_code: Option<String>,

    /// Latitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Longitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lng: f64,

    /// Date of the visit (RFC 3339); defaults to now
    #[arg(long)]
    pub date: Option<DateTime<Utc>>,

    /// Notes about the trip
    #[arg(long, default_value = "")]
    pub notes: String,
}
