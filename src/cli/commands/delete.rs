//! delete command - Delete a city
//!
//! Deleting an id the collection no longer has is not an error as long as
//! the collection answers with a success status.

use anyhow::Result;

use super::{ensure_no_error, open_store, print_json};
use crate::cli::Context;
use crate::core::types::CityId;
use crate::ui::output;

/// Delete a city.
pub async fn delete(ctx: &Context, id: CityId) -> Result<()> {
    let store = open_store(ctx).await?;
    store.delete_city(id).await;

    let state = store.snapshot();
    ensure_no_error(&state)?;

    if ctx.json {
        return print_json(&state.cities);
    }

    output::print(
        format!("Deleted city {} ({} left)", id, state.cities.len()),
        ctx.verbosity,
    );
    Ok(())
}
