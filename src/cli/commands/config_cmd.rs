//! config command - Print the effective configuration, or set a value

use anyhow::{Context as _, Result};
use serde_json::json;

use super::print_json;
use crate::cli::args::ConfigAction;
use crate::cli::Context;
use crate::core::config::{Config, GlobalConfig};
use crate::ui::output;

/// Run the config command.
pub fn config(ctx: &Context, action: Option<ConfigAction>) -> Result<()> {
    match action {
        None => show(ctx),
        Some(ConfigAction::Set { key, value }) => set(ctx, &key, &value),
    }
}

/// Print the effective configuration.
fn show(ctx: &Context) -> Result<()> {
    let config = &ctx.config;
    let source = config
        .path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(defaults)".to_string());

    if ctx.json {
        return print_json(&json!({
            "api_base": config.api_base(),
            "ordering": config.ordering().name(),
            "user_agent": config.user_agent(),
            "geocode_url": config.geocode_url(),
            "source": source,
        }));
    }

    output::print(format!("api_base     {}", config.api_base()), ctx.verbosity);
    output::print(format!("ordering     {}", config.ordering()), ctx.verbosity);
    output::print(format!("user_agent   {}", config.user_agent()), ctx.verbosity);
    output::print(format!("geocode_url  {}", config.geocode_url()), ctx.verbosity);
    output::print(format!("source       {}", source), ctx.verbosity);
    Ok(())
}

/// Set a configuration value.
///
/// Writes to the loaded config file, or to `~/.worldwise/config.toml` when
/// none was loaded. The file is re-read so that `--api-base` is not saved.
fn set(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let mut global = match ctx.config.path() {
        Some(path) => Config::load_from(path).context("failed to load config")?.global,
        None => GlobalConfig::default(),
    };

    global.set(key, value).context("failed to set config value")?;

    let path = match ctx.config.path() {
        Some(path) => {
            Config::write_config_atomic(path, &global).context("failed to write config")?;
            path.to_path_buf()
        }
        None => Config::write_global(&global).context("failed to write config")?,
    };
    log::debug!("wrote config to {}", path.display());

    output::print(format!("Set {} = {}", key, value.trim()), ctx.verbosity);
    Ok(())
}
