//! Browse command.

use anyhow::{bail, Result};
use serde::Serialize;
use storefront_catalog::catalog::{Badge, CatalogOrigin, Product, ProductId, Rating};
use storefront_catalog::search::{FilterCriteria, FilterUpdate, PriceInput, SortKey};
use storefront_catalog::view_model::{CatalogSnapshot, LoadState};

use super::BrowseArgs;
use crate::context::Context;
use crate::output::{badge_label, stars, truncate};

const WIDTHS: [usize; 5] = [5, 44, 12, 22, 8];

/// A product as listed, with the price withheld from signed-out users.
#[derive(Serialize)]
pub struct ProductRow {
    pub id: ProductId,
    pub title: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub price_label: String,
    pub rating: Rating,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
}

impl ProductRow {
    pub fn new(product: &Product, signed_in: bool) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            category: product.category.clone(),
            price: signed_in.then_some(product.price),
            price_label: product.price_label(signed_in),
            rating: product.rating,
            badge: product.badge,
        }
    }
}

#[derive(Serialize)]
struct BrowseReport<'a> {
    summary: String,
    origin: Option<CatalogOrigin>,
    filters: &'a FilterCriteria,
    sort: SortKey,
    active_filters: usize,
    products: Vec<ProductRow>,
}

/// Run the browse command.
pub async fn run(args: BrowseArgs, ctx: &Context) -> Result<()> {
    let session = ctx.session(args.user.as_deref()).await?;
    let vm = ctx.view_model()?;

    if args.reset {
        vm.clear_filters();
    }
    let update = filter_update(&args, ctx.config.filters.default_max_price);
    if !update.is_empty() {
        vm.update_filters(update);
    }
    if let Some(sort) = args.sort {
        vm.set_sort(sort);
    }

    let snapshot = ctx.load_catalog(&vm).await;
    if snapshot.state == LoadState::Error && snapshot.all_products.is_empty() {
        bail!(
            "{}",
            snapshot
                .error
                .as_deref()
                .unwrap_or("Failed to load product data")
        );
    }

    let signed_in = session.is_signed_in();
    let shown = args.limit.unwrap_or(usize::MAX);

    if ctx.output.is_json() {
        ctx.output.json(&BrowseReport {
            summary: snapshot.summary(),
            origin: snapshot.origin,
            filters: &snapshot.filters,
            sort: snapshot.sort_by,
            active_filters: snapshot.active_filter_count,
            products: snapshot
                .products
                .iter()
                .take(shown)
                .map(|p| ProductRow::new(p, signed_in))
                .collect(),
        });
        return Ok(());
    }

    print_listing(ctx, &snapshot, signed_in, shown);
    Ok(())
}

/// Translate command-line filter flags into a filter update.
fn filter_update(args: &BrowseArgs, default_max: f64) -> FilterUpdate {
    let mut update = FilterUpdate::new();
    if !args.category.is_empty() {
        update = update.category(args.category.iter().cloned());
    }
    if args.min_price.is_some() || args.max_price.is_some() {
        update = update.price_range(PriceInput::parse(
            args.min_price.as_deref().unwrap_or(""),
            args.max_price.as_deref().unwrap_or(""),
            default_max,
        ));
    }
    if let Some(rating) = args.min_rating {
        update = update.min_rating(rating);
    }
    if let Some(search) = &args.search {
        update = update.search(search.clone());
    }
    update
}

/// Print the projected products as a table.
pub fn print_listing(ctx: &Context, snapshot: &CatalogSnapshot, signed_in: bool, limit: usize) {
    ctx.output.header(&format!(
        "Products ({})",
        snapshot.sort_by.label()
    ));
    if snapshot.active_filter_count > 0 {
        ctx.output.kv(
            "Active filters",
            &snapshot.active_filter_count.to_string(),
        );
    }
    if let Some(error) = &snapshot.error {
        ctx.output.warn(error);
    }

    if snapshot.products.is_empty() {
        ctx.output.info("No products match the current filters.");
        return;
    }

    ctx.output
        .table_row(&["ID", "TITLE", "PRICE", "RATING", "BADGE"], &WIDTHS);
    for product in snapshot.products.iter().take(limit) {
        let id = product.id.to_string();
        let title = truncate(&product.title, WIDTHS[1]);
        let price = if signed_in {
            product.formatted_price()
        } else {
            "-".to_string()
        };
        let rating = stars(&product.rating);
        let badge = badge_label(product.badge);
        ctx.output
            .table_row(&[&id, &title, &price, &rating, &badge], &WIDTHS);
    }

    ctx.output.info("");
    ctx.output.info(&snapshot.summary());
    if !signed_in {
        ctx.output
            .info("Sign in or Create an account to see pricing (use --user)");
    }
}
