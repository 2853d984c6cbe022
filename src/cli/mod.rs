//! cli
//!
//! Command-line interface layer for WorldWise.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Install logging and load configuration
//! - Delegate to command handlers
//! - Does NOT touch city state directly
//!
//! # Architecture
//!
//! The CLI layer is thin. Every command builds one store, lets it run its
//! initial load, invokes at most one store operation, and renders the
//! resulting snapshot.

pub mod args;
pub mod commands;

pub use args::Cli;

use anyhow::{Context as _, Result};

use crate::core::config::Config;
use crate::ui::output::Verbosity;

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    /// Effective configuration (file plus CLI overrides)
    pub config: Config,
    /// Output verbosity
    pub verbosity: Verbosity,
    /// Print JSON instead of text
    pub json: bool,
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);
    init_logging(verbosity);

    let mut config = Config::load().context("failed to load configuration")?;
    if let Some(ref api_base) = cli.api_base {
        config
            .override_api_base(api_base)
            .context("invalid --api-base")?;
    }

    let ctx = Context {
        config,
        verbosity,
        json: cli.json,
    };

    commands::dispatch(cli.command, &ctx)
}

/// Install the process-wide logger.
///
/// `RUST_LOG` wins over the verbosity-derived default.
pub fn init_logging(verbosity: Verbosity) {
    let env = env_logger::Env::default().default_filter_or(verbosity.log_filter());
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
