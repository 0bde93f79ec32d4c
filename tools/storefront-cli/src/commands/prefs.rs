//! Saved preference commands.

use anyhow::Result;
use serde::Serialize;
use storefront_catalog::search::{FilterCriteria, SortKey};

use super::{PrefsArgs, PrefsCommand};
use crate::context::Context;

#[derive(Serialize)]
struct SavedPreferences {
    persist: bool,
    filters: FilterCriteria,
    sort: SortKey,
    active_filters: usize,
}

/// Run the prefs command.
pub async fn run(args: PrefsArgs, ctx: &Context) -> Result<()> {
    match args.command {
        Some(PrefsCommand::Show) | None => show(ctx),
        Some(PrefsCommand::Clear) => clear(ctx),
    }
}

fn show(ctx: &Context) -> Result<()> {
    let prefs = ctx.preferences()?;
    let defaults = ctx.default_filters();
    let filters = prefs.load_filters(&defaults);
    let saved = SavedPreferences {
        persist: ctx.config.filters.persist,
        active_filters: filters.active_count(&defaults),
        sort: prefs.load_sort(SortKey::Default),
        filters,
    };

    if ctx.output.is_json() {
        ctx.output.json(&saved);
        return Ok(());
    }

    ctx.output.header("Saved preferences");
    if !saved.persist {
        ctx.output
            .warn("filters.persist is off; browse will not update these");
    }

    let filters = &saved.filters;
    let categories = if filters.category.is_empty() {
        "all".to_string()
    } else {
        filters.category.join(", ")
    };
    ctx.output.kv("Categories", &categories);
    ctx.output.kv(
        "Price",
        &format!("{:.0} - {:.0}", filters.min_price, filters.max_price),
    );
    ctx.output.kv("Min rating", &format!("{:.1}", filters.min_rating));
    if !filters.search.is_empty() {
        ctx.output.kv("Search", &filters.search);
    }
    ctx.output.kv("Sort", saved.sort.label());
    ctx.output
        .kv("Active filters", &saved.active_filters.to_string());
    ctx.output
        .kv("Storage", &ctx.storage_path().display().to_string());

    Ok(())
}

fn clear(ctx: &Context) -> Result<()> {
    ctx.preferences()?.clear();
    ctx.output.success("Cleared saved filters and sort");
    Ok(())
}
