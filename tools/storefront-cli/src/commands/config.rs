//! Configuration management commands.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use storefront_commerce::{Currency, ShippingMethodId};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, CONFIG_FILE_NAMES};
use crate::context::{find_config_file, Context};

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx),
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
    match ctx.config_path {
        Some(ref path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(none, using defaults)"),
    }

    let pricing = &ctx.config.pricing;

    ctx.output.info("");
    ctx.output.info("[pricing]");
    ctx.output.kv("currency", pricing.currency.code());
    ctx.output.kv("tax_rate", &pricing.tax_rate.to_string());

    ctx.output.info("");
    ctx.output.info("[pricing.shipping]");
    ctx.output
        .kv("free_threshold", &pricing.shipping.free_threshold.to_string());
    ctx.output
        .kv("free_method", pricing.shipping.free_method.as_str());
    ctx.output.kv(
        "default_multiplier",
        &pricing.shipping.default_multiplier.to_string(),
    );
    for (destination, multiplier) in &pricing.shipping.destination_multipliers {
        ctx.output.kv(
            &format!("destination_multipliers.{}", destination),
            &multiplier.to_string(),
        );
    }

    ctx.output.info("");
    ctx.output.info("Shipping methods:");
    for method in &pricing.shipping_methods {
        ctx.output.list_item(&format!(
            "{} - {} {} ({})",
            method.id,
            method.name,
            method.price.display(),
            method.delivery_estimate()
        ));
    }

    ctx.output.info("");
    ctx.output.info("[catalog]");
    ctx.output.kv(
        "path",
        ctx.config.catalog.path.as_deref().unwrap_or("(demo catalog)"),
    );

    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        let value: serde_json::Value = serde_json::from_str(&value)?;
        ctx.output.json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let config_path = match ctx.config_path {
        Some(ref path) => path.to_string_lossy().to_string(),
        None => match find_config_file(&ctx.cwd) {
            Some(path) => path.to_string_lossy().to_string(),
            None => bail!("No config file found. Run `storefront config init` to create one."),
        },
    };

    // Load current config
    let mut config = CliConfig::load(&config_path)?;

    // Set the value
    set_config_value(&mut config, key, value)?;
    config
        .validate()
        .with_context(|| format!("Refusing to set {} = {}", key, value))?;

    // Save config
    config.save(&config_path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path: PathBuf = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("{} already exists. Overwrite?", config_path.display()))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Config init cancelled");
            return Ok(());
        }
    }

    fs::write(&config_path, generate_default_config())
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    if let Err(e) = ctx.config.validate() {
        errors.push(format!("{:#}", e));
    }

    // Check catalog file
    if let Some(ref path) = ctx.config.catalog.path {
        let resolved = ctx.resolve_path(path);
        if !resolved.exists() {
            errors.push(format!("catalog.path '{}' does not exist", path));
        } else if let Err(e) = crate::data::load_catalog(&resolved) {
            errors.push(format!("{:#}", e));
        }
    }

    let pricing = &ctx.config.pricing;
    if pricing.tax_rate == 0.0 {
        warnings.push("pricing.tax_rate is 0, orders will not be taxed".to_string());
    }
    if !pricing
        .shipping_methods
        .iter()
        .any(|m| m.id == pricing.shipping.free_method)
    {
        warnings.push(format!(
            "pricing.shipping.free_method '{}' is not an offered method",
            pricing.shipping.free_method
        ));
    }

    // Print results
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

fn get_config_value(config: &CliConfig, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();
    let shipping = &config.pricing.shipping;

    match parts.as_slice() {
        ["pricing", "currency"] => Ok(format!("\"{}\"", config.pricing.currency.code())),
        ["pricing", "tax_rate"] => Ok(config.pricing.tax_rate.to_string()),
        ["pricing", "shipping", "free_threshold"] => Ok(shipping.free_threshold.to_string()),
        ["pricing", "shipping", "free_method"] => Ok(format!("\"{}\"", shipping.free_method)),
        ["pricing", "shipping", "default_multiplier"] => {
            Ok(shipping.default_multiplier.to_string())
        }
        ["pricing", "shipping", "destination_multipliers", destination] => Ok(shipping
            .destination_multipliers
            .get(&destination.to_uppercase())
            .map(|m| m.to_string())
            .unwrap_or_else(|| "null".to_string())),
        ["catalog", "path"] => Ok(config
            .catalog
            .path
            .as_ref()
            .map(|p| format!("\"{}\"", p))
            .unwrap_or_else(|| "null".to_string())),
        _ => bail!("Unknown config key: {}", key),
    }
}

fn set_config_value(config: &mut CliConfig, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["pricing", "currency"] => {
            let Some(currency) = Currency::from_code(value) else {
                bail!("Unknown currency: {}", value);
            };
            let pricing = std::mem::take(&mut config.pricing);
            config.pricing = pricing.with_currency(currency);
        }
        ["pricing", "tax_rate"] => config.pricing.tax_rate = value.parse()?,
        ["pricing", "shipping", "free_threshold"] => {
            config.pricing.shipping.free_threshold = value.parse()?
        }
        ["pricing", "shipping", "free_method"] => {
            config.pricing.shipping.free_method = ShippingMethodId::new(value)
        }
        ["pricing", "shipping", "default_multiplier"] => {
            config.pricing.shipping.default_multiplier = value.parse()?
        }
        ["pricing", "shipping", "destination_multipliers", destination] => {
            config
                .pricing
                .shipping
                .destination_multipliers
                .insert(destination.to_uppercase(), value.parse()?);
        }
        ["catalog", "path"] => config.catalog.path = Some(value.to_string()),
        _ => bail!("Unknown or read-only config key: {}", key),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_known_keys() {
        let config = CliConfig::default();
        assert_eq!(get_config_value(&config, "pricing.tax_rate").unwrap(), "0.08");
        assert_eq!(
            get_config_value(&config, "pricing.currency").unwrap(),
            "\"USD\""
        );
        assert_eq!(
            get_config_value(&config, "pricing.shipping.free_threshold").unwrap(),
            "100"
        );
        assert_eq!(
            get_config_value(&config, "pricing.shipping.destination_multipliers.us").unwrap(),
            "1.5"
        );
        assert_eq!(get_config_value(&config, "catalog.path").unwrap(), "null");
    }

    #[test]
    fn test_get_unknown_key() {
        let config = CliConfig::default();
        assert!(get_config_value(&config, "pricing.discount").is_err());
    }

    #[test]
    fn test_set_values() {
        let mut config = CliConfig::default();
        set_config_value(&mut config, "pricing.tax_rate", "0.1").unwrap();
        set_config_value(&mut config, "pricing.shipping.free_threshold", "250").unwrap();
        set_config_value(
            &mut config,
            "pricing.shipping.destination_multipliers.mx",
            "1.75",
        )
        .unwrap();
        set_config_value(&mut config, "catalog.path", "products.json").unwrap();

        assert_eq!(config.pricing.tax_rate, 0.1);
        assert_eq!(config.pricing.shipping.free_threshold, 250.0);
        assert_eq!(config.pricing.shipping.multiplier_for("MX"), 1.75);
        assert_eq!(config.catalog.path.as_deref(), Some("products.json"));
        assert!(config.pricing.validate().is_ok());
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = CliConfig::default();
        assert!(set_config_value(&mut config, "pricing.tax_rate", "lots").is_err());
        assert!(set_config_value(&mut config, "pricing.currency", "XYZ").is_err());
        assert!(set_config_value(&mut config, "build.target", "wasm").is_err());
    }

    #[test]
    fn test_set_currency_reprices_methods() {
        let mut config = CliConfig::default();
        set_config_value(&mut config, "pricing.currency", "BRL").unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.pricing.currency, Currency::BRL);
        assert!(config
            .pricing
            .shipping_methods
            .iter()
            .all(|m| m.price.currency == Currency::BRL));
    }

    #[test]
    fn test_set_currency_on_generated_config() {
        let mut config =
            CliConfig::parse("storefront.toml", &generate_default_config()).unwrap();
        set_config_value(&mut config, "pricing.currency", "BRL").unwrap();
        assert!(config.validate().is_ok());

        let saved = toml::to_string_pretty(&config).unwrap();
        let reloaded = CliConfig::parse("storefront.toml", &saved).unwrap();
        assert!(reloaded.validate().is_ok());
        assert_eq!(reloaded.pricing.currency, Currency::BRL);
    }

    #[test]
    fn test_set_then_validate_catches_out_of_range() {
        let mut config = CliConfig::default();
        set_config_value(&mut config, "pricing.tax_rate", "2").unwrap();
        assert!(config.pricing.validate().is_err());
    }
}
