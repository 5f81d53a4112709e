//! Filter and sort the catalog.

use anyhow::{bail, Result};
use storefront_commerce::prelude::*;

use super::BrowseArgs;
use crate::context::Context;
use crate::data;
use crate::output::{action_badge, format_price, truncate};

/// Run the browse command.
pub fn run(args: BrowseArgs, ctx: &Context) -> Result<()> {
    let catalog_path = args.catalog.as_ref().or(ctx.config.catalog.path.as_ref());
    let products = match catalog_path {
        Some(path) => data::load_catalog(&ctx.resolve_path(path))?,
        None => {
            ctx.output.debug("No catalog configured, using the demo catalog");
            data::demo_catalog()
        }
    };

    if SortKey::from_str(&args.sort).is_none() {
        ctx.output
            .warn(&format!("Unknown sort '{}', using featured", args.sort));
    }
    let query = build_query(&args)?;
    let results = query.browse(&products);

    if ctx.output.is_json() {
        ctx.output.json(&results);
        return Ok(());
    }

    ctx.output.header(&format!(
        "{} of {} Products ({})",
        results.len(),
        results.catalog_size,
        query.sort.display_name()
    ));

    if results.is_empty() {
        ctx.output.info("No products match the current filters");
    } else {
        let widths = [4, 30, 12, 14, 28, 12];
        ctx.output.table_row(
            &["ID", "NAME", "TYPE", "CATEGORY", "PRICE", "ACTION"],
            &widths,
        );
        for product in &results.items {
            let effective = product.effective_price()?;
            let price = format_price(product.price, effective, product.discount_percent);
            let action = action_badge(&product.purchase_action());
            ctx.output.table_row(
                &[
                    product.id.as_str(),
                    truncate(&product.name, 30).as_str(),
                    product.fulfillment.as_str(),
                    truncate(&product.category, 14).as_str(),
                    price.as_str(),
                    action.as_str(),
                ],
                &widths,
            );
        }
    }

    println!();
    ctx.output.info("Categories:");
    for facet in &results.categories {
        let marker = if facet.selected { "[x]" } else { "[ ]" };
        ctx.output
            .list_item(&format!("{} {} ({})", marker, facet.value, facet.count));
    }

    Ok(())
}

/// Turn the command-line flags into a catalog query.
///
/// An unknown sort falls back to featured, as the storefront's select does.
fn build_query(args: &BrowseArgs) -> Result<CatalogQuery> {
    let Some(type_filter) = TypeFilter::from_str(&args.type_filter) else {
        bail!(
            "Unknown product type '{}'. Expected all, affiliate or dropshipping.",
            args.type_filter
        );
    };

    let mut query = CatalogQuery::new()
        .with_type(type_filter)
        .with_sort(SortKey::from_select(&args.sort));

    if let Some(ref search) = args.search {
        query = query.with_search(search.as_str());
    }
    if args.min.is_some() || args.max.is_some() {
        query = query.with_price_range(
            args.min.unwrap_or(0.0),
            args.max.unwrap_or(f64::INFINITY),
        )?;
    }
    for category in &args.categories {
        query = query.with_category(category.as_str());
    }
    if args.in_stock {
        query = query.in_stock_only();
    }

    Ok(query)
}
