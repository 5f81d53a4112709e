//! CLI configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_commerce::PricingConfig;

/// Config file names searched for, in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Cart pricing rules.
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Catalog source.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        Self::parse(path, &content)
    }

    /// Parse config content, picking the format from the file extension.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Check the pricing rules before they are used.
    pub fn validate(&self) -> Result<()> {
        self.pricing
            .validate()
            .context("Invalid [pricing] configuration")
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }
}

/// Where products come from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog JSON file; the built-in demo catalog when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Generate a default storefront.toml config file.
pub fn generate_default_config() -> String {
    r#"# Storefront pricing configuration
# Shipping prices without an explicit currency use pricing.currency.

[pricing]
currency = "USD"
tax_rate = 0.08

[pricing.shipping]
free_threshold = 100.0
free_method = "standard"
default_multiplier = 2.0

[pricing.shipping.destination_multipliers]
BR = 1.0
US = 1.5

[[pricing.shipping_methods]]
id = "standard"
name = "Standard Shipping"
price = 5.99
estimated_days = "5-7"

[[pricing.shipping_methods]]
id = "express"
name = "Express Shipping"
price = 12.99
estimated_days = "2-3"

[[pricing.shipping_methods]]
id = "overnight"
name = "Overnight Shipping"
price = 24.99
estimated_days = "1"

[catalog]
# path = "catalog.json"
"#
    .to_string()
}
