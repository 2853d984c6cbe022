//! create command - Record a newly visited city
//!
//! The flag emoji comes from `--emoji` or is derived from `--country-code`.
//! Whatever is left out of name, country and flag is filled in by reverse
//! geocoding the position. On success the stored city (with its assigned
//! id) is printed.

use anyhow::{bail, Context as _, Result};
use chrono::Utc;

use super::{ensure_no_error, open_store, print_json};
use crate::cli::args::CreateArgs;
use crate::cli::Context;
use crate::core::flag::flag_emoji;
use crate::core::types::{NewCity, Position};
use crate::remote::create_geocoder;
use crate::remote::geocode::Place;
use crate::ui::output::{self, format_city_line};

/// Message shown when the position is not in any country.
pub const NOT_A_CITY: &str = "That doesn't seem to be a city. Try somewhere else";

/// Record a newly visited city.
pub async fn create(ctx: &Context, args: CreateArgs) -> Result<()> {
    let place = if needs_place(&args) {
        Some(look_up_place(ctx, Position::new(args.lat, args.lng)).await?)
    } else {
        None
    };
    let draft = draft_from_args(args, place)?;

    let store = open_store(ctx).await?;
    store.create_city(draft).await;

    let state = store.snapshot();
    ensure_no_error(&state)?;

    let city = state
        .current_city
        .as_ref()
        .context("the created city was not returned")?;

    if ctx.json {
        return print_json(city);
    }

    output::print(format!("Added {}", format_city_line(city).trim_start()), ctx.verbosity);
    Ok(())
}

/// Whether any field has to come from the reverse geocoder.
fn needs_place(args: &CreateArgs) -> bool {
    args.name.is_none()
        || args.country.is_none()
        || (args.emoji.is_none() && args.country_code.is_none())
}

async fn look_up_place(ctx: &Context, position: Position) -> Result<Place> {
    let geocoder =
        create_geocoder(&ctx.config).context("failed to set up the reverse geocoder")?;

    match geocoder.lookup(position).await {
        Ok(Some(place)) => Ok(place),
        Ok(None) => bail!(NOT_A_CITY),
        Err(e) => Err(e).context("failed to look up the position"),
    }
}

/// Build the request body from command-line arguments and a looked-up place.
fn draft_from_args(args: CreateArgs, place: Option<Place>) -> Result<NewCity> {
    let (place_name, place_country, place_emoji) = match place {
        Some(place) => (Some(place.city_name), Some(place.country), Some(place.emoji)),
        None => (None, None, None),
    };

    let emoji = match (args.emoji, args.country_code) {
        (Some(emoji), _) => emoji,
        (None, Some(code)) => match flag_emoji(&code) {
            Some(emoji) => emoji,
            None => bail!("'{}' is not a two-letter country code", code),
        },
        (None, None) => match place_emoji {
            Some(emoji) => emoji,
            None => bail!("either --emoji or --country-code is required"),
        },
    };

    let city_name = args.name.or(place_name).unwrap_or_default();
    if city_name.trim().is_empty() {
        bail!("city name cannot be empty; pass --name");
    }

    Ok(NewCity {
        city_name,
        country: args.country.or(place_country).unwrap_or_default(),
        emoji,
        date: args.date.unwrap_or_else(Utc::now),
        notes: args.notes,
        position: Position::new(args.lat, args.lng),
    })
}
