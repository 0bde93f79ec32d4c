//! Product quick view.

use anyhow::{anyhow, bail, Result};
use serde::Serialize;
use storefront_catalog::catalog::ProductId;

use super::browse::ProductRow;
use super::ShowArgs;
use crate::context::Context;
use crate::output::{badge_label, stars};

#[derive(Serialize)]
struct ProductDetail<'a> {
    #[serde(flatten)]
    row: ProductRow,
    description: &'a str,
    image: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    in_wishlist: Option<bool>,
}

/// Run the show command.
pub async fn run(args: ShowArgs, ctx: &Context) -> Result<()> {
    let session = ctx.session(args.user.as_deref()).await?;
    let vm = ctx.view_model()?;
    let snapshot = ctx.load_catalog(&vm).await;

    if snapshot.all_products.is_empty() {
        if let Some(error) = &snapshot.error {
            bail!("{}", error);
        }
    }

    let id = ProductId::new(args.id);
    let product = vm
        .product(id)
        .ok_or_else(|| anyhow!("Product {} not found", id))?;

    let in_wishlist = match session.user_id() {
        Some(uid) => Some(ctx.wishlist()?.contains(id, Some(&uid))),
        None => None,
    };
    let signed_in = session.is_signed_in();

    if ctx.output.is_json() {
        ctx.output.json(&ProductDetail {
            row: ProductRow::new(&product, signed_in),
            description: &product.description,
            image: &product.image,
            in_wishlist,
        });
        return Ok(());
    }

    ctx.output.header(&product.title);
    ctx.output.kv("ID", &product.id.to_string());
    ctx.output.kv("Category", &product.category);
    ctx.output.kv("Price", &product.price_label(signed_in));
    ctx.output.kv("Rating", &stars(&product.rating));
    if product.badge.is_some() {
        ctx.output.kv("Badge", &badge_label(product.badge));
    }
    if !product.image.is_empty() {
        ctx.output.kv("Image", &product.image);
    }
    if let Some(saved) = in_wishlist {
        ctx.output
            .kv("Wishlist", if saved { "saved" } else { "not saved" });
    }
    if !product.description.is_empty() {
        ctx.output.info("");
        ctx.output.info(&product.description);
    }

    Ok(())
}
