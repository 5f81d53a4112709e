//! Output formatting for the CLI.

use console::{style, StyledObject};
use storefront_commerce::catalog::PurchaseAction;
use storefront_commerce::Money;

/// Output handler for CLI messages.
///
/// Human-readable lines are suppressed in JSON mode so stdout stays
/// machine-parseable; only [`Output::json`] and errors are printed then.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    fn line(&self, icon: StyledObject<&str>, msg: &str) {
        if !self.json {
            println!("{} {}", icon, msg);
        }
    }

    pub fn info(&self, msg: &str) {
        self.line(style("ℹ").blue(), msg);
    }

    pub fn success(&self, msg: &str) {
        self.line(style("✓").green(), msg);
    }

    /// Print a warning to stderr.
    pub fn warn(&self, msg: &str) {
        if !self.json {
            eprintln!("{} {}", style("⚠").yellow(), msg);
        }
    }

    /// Print an error to stderr, as `{"error": ...}` in JSON mode.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            eprintln!("{} {}", style("✗").red(), style(msg).red());
        }
    }

    /// Print a message only with `--verbose`.
    pub fn debug(&self, msg: &str) {
        if self.verbose && !self.json {
            eprintln!("{} {}", style("→").dim(), style(msg).dim());
        }
    }

    pub fn header(&self, msg: &str) {
        if !self.json {
            println!("\n{}", style(msg).bold().underlined());
        }
    }

    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        if !self.json {
            println!("  {}: {}", style(key).dim(), value);
        }
    }

    pub fn list_item(&self, item: &str) {
        if !self.json {
            println!("  {} {}", style("•").dim(), item);
        }
    }

    /// Print columns padded to `widths`.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let padded: Vec<String> = cols
            .iter()
            .zip(widths)
            .map(|(col, width)| pad(col, *width))
            .collect();
        println!("  {}", padded.join("  "));
    }

    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Left-align `value` in `width` columns, ignoring ANSI styling.
fn pad(value: &str, width: usize) -> String {
    let visible = console::measure_text_width(value);
    format!("{}{}", value, " ".repeat(width.saturating_sub(visible)))
}

/// Badge for what a product card's buy button does.
pub fn action_badge(action: &PurchaseAction) -> String {
    match action {
        PurchaseAction::AddToCart => style("add to cart").green().to_string(),
        PurchaseAction::Redirect(_) => style("partner link").cyan().to_string(),
        PurchaseAction::Unavailable => style("unavailable").dim().to_string(),
    }
}

/// Format a price, with the list price and percent off for discounted items.
pub fn format_price(list: Money, effective: Money, discount_percent: f64) -> String {
    if discount_percent > 0.0 {
        format!(
            "{} {}",
            effective.display(),
            style(format!("({} -{}%)", list.display(), discount_percent)).dim()
        )
    } else {
        list.display()
    }
}

/// Truncate a column value to a width, adding an ellipsis.
pub fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let kept: String = value.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Chair", 10), "Chair");
        assert_eq!(truncate("Ergonomic Office Chair", 10), "Ergonomic…");
    }

    #[test]
    fn test_pad_ignores_styling() {
        let styled = style("Free").green().force_styling(true).to_string();
        assert_eq!(console::measure_text_width(&pad(&styled, 6)), 6);
        assert_eq!(pad("$5.99", 7), "$5.99  ");
    }

    #[test]
    fn test_format_price_without_discount() {
        assert_eq!(
            format_price(Money::usd(34.99), Money::usd(34.99), 0.0),
            "$34.99"
        );
    }
}
