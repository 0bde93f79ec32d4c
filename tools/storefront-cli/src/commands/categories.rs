//! Categories command.

use anyhow::{bail, Result};
use serde::Serialize;

use crate::context::Context;

#[derive(Serialize)]
struct CategoryInfo<'a> {
    name: &'a str,
    products: usize,
}

/// Run the categories command.
pub async fn run(ctx: &Context) -> Result<()> {
    let vm = ctx.view_model()?;
    let snapshot = ctx.load_catalog(&vm).await;

    if snapshot.all_products.is_empty() {
        if let Some(error) = &snapshot.error {
            bail!("{}", error);
        }
    }

    let categories: Vec<CategoryInfo> = snapshot
        .categories
        .iter()
        .map(|name| CategoryInfo {
            name,
            products: snapshot
                .all_products
                .iter()
                .filter(|p| p.category == *name)
                .count(),
        })
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&categories);
        return Ok(());
    }

    ctx.output.header("Categories");
    for category in &categories {
        ctx.output
            .list_item(&format!("{} ({})", category.name, category.products));
    }

    Ok(())
}
