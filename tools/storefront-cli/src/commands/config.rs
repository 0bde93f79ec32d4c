//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use dialoguer::Confirm;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, StorefrontConfig};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let config = &ctx.config;

    ctx.output.info("");
    ctx.output.info("[catalog]");
    ctx.output.kv("remote_url", &config.catalog.remote_url);
    ctx.output.kv("fallback", &config.catalog.fallback);
    match config.catalog.timeout_ms {
        Some(ms) => ctx.output.kv("timeout_ms", &ms.to_string()),
        None => ctx.output.kv("timeout_ms", "none"),
    }

    ctx.output.info("");
    ctx.output.info("[storage]");
    ctx.output
        .kv("path", &ctx.storage_path().display().to_string());

    ctx.output.info("");
    ctx.output.info("[filters]");
    ctx.output.kv(
        "default_max_price",
        &config.filters.default_max_price.to_string(),
    );
    ctx.output.kv("persist", &config.filters.persist.to_string());

    ctx.output.info("");
    ctx.output.info("[ui]");
    ctx.output.kv(
        "search_debounce_ms",
        &config.ui.search_debounce_ms.to_string(),
    );

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("storefront.toml");

    if config_path.exists() && !force {
        let overwrite = console::user_attended()
            && Confirm::new()
                .with_prompt(format!("{} exists. Overwrite?", config_path.display()))
                .default(false)
                .interact()?;

        if !overwrite {
            bail!(
                "Config file already exists: {}. Use --force to overwrite.",
                config_path.display()
            );
        }
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    // Re-read from disk so edits made since startup are checked.
    let config = match &ctx.config_path {
        Some(path) => StorefrontConfig::load(path)?,
        None => {
            ctx.output
                .info("No config file found, checking defaults");
            ctx.config.clone()
        }
    };

    let (errors, warnings) = config.validate();

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}
