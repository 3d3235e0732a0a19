//! Configuration management commands.

use std::fs;

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use serde_json::json;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, API_URL_ENV};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let source = ctx
        .config_path
        .as_ref()
        .filter(|p| p.exists())
        .map(|p| p.display().to_string());

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "source": source,
            "favorites_file": ctx.favorites_path,
            "config": ctx.config,
        }));
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    ctx.output
        .kv("source", source.as_deref().unwrap_or("(defaults)"));

    let config = &ctx.config;

    // API section
    ctx.output.info("");
    ctx.output.info("[api]");
    ctx.output.kv("base_url", &config.api.base_url);
    ctx.output.kv("timeout_ms", &config.api.timeout_ms.to_string());
    ctx.output.kv("max_retries", &config.api.max_retries.to_string());
    if std::env::var_os(API_URL_ENV).is_some() {
        ctx.output.debug(&format!("base_url overridden by {}", API_URL_ENV));
    }

    // Storage section
    ctx.output.info("");
    ctx.output.info("[storage]");
    ctx.output
        .kv("favorites_path", &ctx.favorites_path.display().to_string());

    // Search section
    ctx.output.info("");
    ctx.output.info("[search]");
    ctx.output.kv("debounce_ms", &config.search.debounce_ms.to_string());

    // Display section
    ctx.output.info("");
    ctx.output.info("[display]");
    ctx.output.kv("currency", config.currency().code());
    ctx.output
        .kv("description_width", &config.display.description_width.to_string());

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx
        .config_path
        .clone()
        .unwrap_or_else(|| ctx.cwd.join("turbo.toml"));

    if config_path.exists() && !force {
        if !console::user_attended() {
            bail!(
                "Config file already exists: {}. Use --force to overwrite.",
                config_path.display()
            );
        }
        let confirmed = Confirm::new()
            .with_prompt(format!("Overwrite {}?", config_path.display()))
            .default(false)
            .interact()?;
        if !confirmed {
            ctx.output.warn("Init cancelled");
            return Ok(());
        }
    }

    let path = config_path.to_string_lossy();
    if path.ends_with(".json") {
        CliConfig::default().save(&path)?;
    } else {
        fs::write(&config_path, generate_default_config())
            .with_context(|| format!("Failed to write config file: {}", path))?;
    }

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}
