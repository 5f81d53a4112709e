//! Storefront CLI - price carts and browse the catalog from the terminal.
//!
//! Commands:
//! - `storefront quote` - Price a cart for a shipping method
//! - `storefront browse` - Filter and sort the catalog
//! - `storefront shipping` - Quote every shipping method for a destination
//! - `storefront config` - Manage configuration

mod commands;
mod config;
mod context;
mod data;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::{BrowseArgs, ConfigArgs, QuoteArgs, ShippingArgs};

/// Storefront CLI - Cart pricing and catalog browsing
#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a cart
    Quote(QuoteArgs),

    /// Filter and sort the catalog
    Browse(BrowseArgs),

    /// Quote shipping rates for a destination
    Shipping(ShippingArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Quote(args) => ctx
            .config
            .validate()
            .and_then(|_| commands::quote::run(args, &ctx)),
        Commands::Browse(args) => commands::browse::run(args, &ctx),
        Commands::Shipping(args) => ctx
            .config
            .validate()
            .and_then(|_| commands::shipping::run(args, &ctx)),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` or the verbosity flag.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_category_flag_does_not_shadow_config() {
        let cli = Cli::try_parse_from([
            "storefront",
            "-c",
            "shop.toml",
            "browse",
            "--category",
            "Electronics",
        ])
        .unwrap();
        assert_eq!(cli.config.as_deref(), Some("shop.toml"));
    }
}
