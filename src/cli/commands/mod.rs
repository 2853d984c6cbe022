//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Opens a store (which runs the initial load)
//! 2. Invokes at most one store operation
//! 3. Formats and displays the resulting snapshot
//!
//! Handlers never change city state themselves.
//!
//! # Async Commands
//!
//! Store operations are async because they involve network I/O. Dispatch
//! starts a tokio runtime for those handlers and blocks on them. `config`
//! runs without one.

mod config_cmd;
mod countries;
mod create;
mod delete;
mod list;
mod show;

pub use config_cmd::config;
pub use countries::countries;
pub use create::create;
pub use delete::delete;
pub use list::list;
pub use show::show;

use std::future::Future;

use anyhow::{bail, Context as _, Result};
use serde::Serialize;

use crate::cli::args::Command;
use crate::cli::Context;
use crate::remote::create_collection;
use crate::store::{CitiesState, CitiesStore, StoreHandle};

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::List => block_on(list(ctx)),
        Command::Countries => block_on(countries(ctx)),
        Command::Show { id } => block_on(show(ctx, id)),
        Command::Create(args) => block_on(create(ctx, args)),
        Command::Delete { id } => block_on(delete(ctx, id)),
        Command::Config { action } => config(ctx, action),
    }
}

/// Run an async handler to completion on a fresh runtime.
fn block_on<F: Future<Output = Result<()>>>(handler: F) -> Result<()> {
    let rt = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    rt.block_on(handler)
}

/// Build the store for this invocation and run its initial load.
pub(crate) async fn open_store(ctx: &Context) -> Result<StoreHandle> {
    let collection =
        create_collection(&ctx.config).context("failed to set up the city collection")?;
    Ok(CitiesStore::open(collection, ctx.config.ordering()).await)
}

/// Fail the command if the store is showing an error.
pub(crate) fn ensure_no_error(state: &CitiesState) -> Result<()> {
    if state.has_error() {
        bail!("{}", state.error);
    }
    Ok(())
}

/// Print a value as pretty JSON.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to encode JSON")?;
    println!("{}", json);
    Ok(())
}
