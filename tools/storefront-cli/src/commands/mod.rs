//! CLI command implementations.

pub mod browse;
pub mod config;
pub mod quote;
pub mod shipping;

use clap::{Args, Subcommand};

/// Arguments for the quote command.
#[derive(Args)]
pub struct QuoteArgs {
    /// Cart JSON file (default: the demo cart).
    #[arg(long)]
    pub cart: Option<String>,

    /// Shipping method ID.
    #[arg(short, long, default_value = "standard")]
    pub shipping: String,

    /// Also show the price of each line.
    #[arg(short, long)]
    pub lines: bool,
}

/// Arguments for the browse command.
#[derive(Args)]
pub struct BrowseArgs {
    /// Catalog JSON file (default: configured catalog, then the demo catalog).
    #[arg(long)]
    pub catalog: Option<String>,

    /// Fulfillment tab: all, affiliate or dropshipping.
    #[arg(short = 't', long = "type", default_value = "all")]
    pub type_filter: String,

    /// Case-insensitive name search.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Minimum list price.
    #[arg(long)]
    pub min: Option<f64>,

    /// Maximum list price.
    #[arg(long)]
    pub max: Option<f64>,

    /// Category to include (repeatable).
    #[arg(long = "category")]
    pub categories: Vec<String>,

    /// Hide out-of-stock products.
    #[arg(long)]
    pub in_stock: bool,

    /// Sort order: featured, price-low, price-high or discount.
    #[arg(long, default_value = "featured")]
    pub sort: String,
}

/// Arguments for the shipping command.
#[derive(Args)]
pub struct ShippingArgs {
    /// Cart subtotal to quote for.
    #[arg(long, default_value_t = 0.0)]
    pub subtotal: f64,

    /// Destination country code.
    #[arg(short, long, default_value = "BR")]
    pub destination: String,
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
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
