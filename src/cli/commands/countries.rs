//! countries command - List the countries of visited cities

use anyhow::Result;

use super::list::EMPTY_LIST_HINT;
use super::{ensure_no_error, open_store, print_json};
use crate::cli::Context;
use crate::ui::output::{self, format_country_line};

/// List the distinct countries of visited cities.
pub async fn countries(ctx: &Context) -> Result<()> {
    let store = open_store(ctx).await?;
    let state = store.snapshot();
    ensure_no_error(&state)?;

    let countries = state.countries();

    if ctx.json {
        return print_json(&countries);
    }

    if countries.is_empty() {
        output::print(EMPTY_LIST_HINT, ctx.verbosity);
        return Ok(());
    }

    for country in &countries {
        output::print(format_country_line(country), ctx.verbosity);
    }
    Ok(())
}
