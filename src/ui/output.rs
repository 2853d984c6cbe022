//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Output is formatted consistently and respects the quiet flag.
//! When `--json` is enabled, commands print the store snapshot as JSON
//! instead of these text lines.

use std::fmt::Display;

use chrono::{DateTime, Utc};

use crate::core::flag::flag_image_url;
use crate::core::types::{City, Country};

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }

    /// Default log filter for this verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Debug => "debug",
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Format a visit date as `Monday, January 1, 2024`.
pub fn format_visit_date(date: &DateTime<Utc>) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// One-line summary of a city for list views.
pub fn format_city_line(city: &City) -> String {
    format!(
        "{:>4}  {} {} ({})",
        city.id,
        city.emoji,
        city.city_name,
        format_visit_date(&city.date)
    )
}

/// One-line summary of a country for list views.
pub fn format_country_line(country: &Country) -> String {
    format!("{} {}", country.emoji, country.country)
}

/// Multi-line detail view of a city.
pub fn format_city_detail(city: &City) -> String {
    let mut lines = vec![
        format!("City name     {} {}", city.emoji, city.city_name),
        format!("Country       {}", city.country),
        format!("You went on   {}", format_visit_date(&city.date)),
        format!("Position      {}, {}", city.position.lat, city.position.lng),
    ];
    if !city.notes.is_empty() {
        lines.push(format!("Your notes    {}", city.notes));
    }
    if let Some(url) = flag_image_url(&city.emoji) {
        lines.push(format!("Flag          {}", url));
    }
    lines.push(format!(
        "Learn more    https://en.wikipedia.org/wiki/{}",
        city.city_name.replace(' ', "_")
    ));
    lines.join("\n")
}
