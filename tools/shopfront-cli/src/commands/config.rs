//! Configuration management commands.

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{CliConfig, CONFIG_FILE_NAMES};
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

    let store = &ctx.config.store;
    ctx.output.kv("currency", store.currency.code());

    ctx.output.info("[pricing]");
    ctx.output.kv(
        "free_shipping_threshold",
        &store.pricing.free_shipping_threshold.to_string(),
    );
    ctx.output
        .kv("flat_shipping_fee", &store.pricing.flat_shipping_fee.to_string());
    ctx.output.kv("tax_rate", &store.pricing.tax_rate.to_string());

    ctx.output.info("[checkout]");
    ctx.output.kv("delay_ms", &store.checkout.delay_ms.to_string());
    ctx.output.kv("timeout_ms", &store.checkout.timeout_ms.to_string());

    ctx.output.info("[log]");
    ctx.output.kv("level", &ctx.config.log.level);
    ctx.output.kv("json", &ctx.config.log.json.to_string());

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    CliConfig::default().save(&config_path)?;
    ctx.output
        .success(&format!("Wrote {}", config_path.display()));
    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    // Loading already validated the file.
    match &ctx.config_path {
        Some(path) => ctx
            .output
            .success(&format!("{} is valid", path.display())),
        None => ctx.output.info("No config file found; using defaults."),
    }
    Ok(())
}
