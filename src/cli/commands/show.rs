//! show command - Show one city in detail
//!
//! The initial load runs first, as it does for every command; a failure there
//! does not stop the city fetch, and a successful fetch clears the error.

use anyhow::{Context as _, Result};

use super::{ensure_no_error, open_store, print_json};
use crate::cli::Context;
use crate::core::types::CityId;
use crate::ui::output::{self, format_city_detail};

/// Show one city in detail.
pub async fn show(ctx: &Context, id: CityId) -> Result<()> {
    let store = open_store(ctx).await?;
    store.get_city(id).await;

    let state = store.snapshot();
    ensure_no_error(&state)?;

    let city = state
        .current_city
        .as_ref()
        .context("no city was loaded")?;

    if ctx.json {
        return print_json(city);
    }

    output::print(format_city_detail(city), ctx.verbosity);
    Ok(())
}
