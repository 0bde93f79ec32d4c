//! Wishlist commands.

use anyhow::{anyhow, Result};
use serde::Serialize;
use storefront_auth::UserId;
use storefront_catalog::catalog::ProductId;

use super::browse::ProductRow;
use super::{WishlistArgs, WishlistCommand};
use crate::context::Context;
use crate::output::truncate;

#[derive(Serialize)]
struct WishlistEntry {
    id: ProductId,
    #[serde(skip_serializing_if = "Option::is_none")]
    product: Option<ProductRow>,
}

/// Run the wishlist command.
pub async fn run(args: WishlistArgs, ctx: &Context) -> Result<()> {
    let uid = args.user.as_deref().map(UserId::new);

    match args.command {
        Some(WishlistCommand::List) | None => list(uid.as_ref(), ctx).await,
        Some(WishlistCommand::Add { id }) => {
            ctx.wishlist()?.add(ProductId::new(id), uid.as_ref());
            ctx.output
                .success(&format!("Added product {} to {}", id, bucket(uid.as_ref())));
            Ok(())
        }
        Some(WishlistCommand::Remove { id }) => {
            ctx.wishlist()?.remove(ProductId::new(id), uid.as_ref());
            ctx.output.success(&format!(
                "Removed product {} from {}",
                id,
                bucket(uid.as_ref())
            ));
            Ok(())
        }
        Some(WishlistCommand::Toggle { id }) => toggle(id, args.user.as_deref(), ctx).await,
    }
}

async fn list(uid: Option<&UserId>, ctx: &Context) -> Result<()> {
    let ids = ctx.wishlist()?.load(uid);

    if ids.is_empty() {
        if ctx.output.is_json() {
            ctx.output.json(&Vec::<WishlistEntry>::new());
        } else {
            ctx.output
                .info(&format!("No products in {}", bucket(uid)));
        }
        return Ok(());
    }

    let vm = ctx.view_model()?;
    ctx.load_catalog(&vm).await;
    let signed_in = uid.is_some();

    let entries: Vec<WishlistEntry> = ids
        .into_iter()
        .map(|id| WishlistEntry {
            id,
            product: vm.product(id).map(|p| ProductRow::new(&p, signed_in)),
        })
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&entries);
        return Ok(());
    }

    ctx.output.header(&format!("Wishlist ({})", bucket(uid)));
    for entry in &entries {
        match &entry.product {
            Some(row) => ctx.output.list_item(&format!(
                "{}  {}  {}",
                entry.id,
                truncate(&row.title, 50),
                row.price_label
            )),
            None => ctx
                .output
                .list_item(&format!("{}  (no longer in the catalog)", entry.id)),
        }
    }
    ctx.output.info("");
    ctx.output.info(&format!("{} product(s)", entries.len()));

    Ok(())
}

async fn toggle(id: u64, user: Option<&str>, ctx: &Context) -> Result<()> {
    let session = ctx.session(user).await?;
    let added = ctx
        .wishlist()?
        .toggle_for_session(ProductId::new(id), &session)
        .map_err(|e| anyhow!(e.user_message()))?;

    if ctx.output.is_json() {
        ctx.output
            .json(&serde_json::json!({ "id": id, "in_wishlist": added }));
    } else if added {
        ctx.output.success(&format!("Added product {} to wishlist", id));
    } else {
        ctx.output
            .success(&format!("Removed product {} from wishlist", id));
    }

    Ok(())
}

fn bucket(uid: Option<&UserId>) -> String {
    match uid {
        Some(uid) => format!("{}'s wishlist", uid),
        None => "the anonymous wishlist".to_string(),
    }
}
