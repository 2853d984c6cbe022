//! list command - List every visited city

use anyhow::Result;

use super::{ensure_no_error, open_store, print_json};
use crate::cli::Context;
use crate::ui::output::{self, format_city_line};

/// Message shown when there is nothing to list.
pub(crate) const EMPTY_LIST_HINT: &str =
    "Add your first city by clicking on a city on the map";

/// List every visited city.
pub async fn list(ctx: &Context) -> Result<()> {
    let store = open_store(ctx).await?;
    let state = store.snapshot();
    ensure_no_error(&state)?;

    if ctx.json {
        return print_json(&state.cities);
    }

    if state.cities.is_empty() {
        output::print(EMPTY_LIST_HINT, ctx.verbosity);
        return Ok(());
    }

    for city in &state.cities {
        output::print(format_city_line(city), ctx.verbosity);
    }
    Ok(())
}
