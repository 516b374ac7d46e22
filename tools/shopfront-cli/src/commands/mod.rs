//! CLI command implementations.

pub mod config;
pub mod demo;
pub mod quote;

use clap::{Args, Subcommand};

/// Arguments for the quote command.
#[derive(Args)]
pub struct QuoteArgs {
    /// JSON file with a list of cart operations.
    pub script: String,

    /// Skip failing operations instead of stopping at the first one.
    #[arg(long)]
    pub keep_going: bool,
}

/// Arguments for the demo command.
#[derive(Args)]
pub struct DemoArgs {
    /// Make the simulated processor decline the order.
    #[arg(long)]
    pub decline: bool,

    /// Override the simulated processing delay (milliseconds).
    #[arg(long)]
    pub delay_ms: Option<u64>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Write a config file with the default settings.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
