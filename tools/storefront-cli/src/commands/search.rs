//! Live search command.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context as _, Result};
use storefront_catalog::debounce::Debouncer;
use storefront_catalog::search::FilterUpdate;
use storefront_catalog::view_model::{CatalogSnapshot, CatalogViewModel, LoadState};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use super::browse::{print_listing, ProductRow};
use super::SearchArgs;
use crate::context::Context;

/// Run the search command.
///
/// Reads one search term per line from stdin. Terms are applied once input
/// has been idle for the configured debounce delay, so only the last of a
/// quick burst of lines triggers a refresh.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let session = ctx.session(args.user.as_deref()).await?;
    let signed_in = session.is_signed_in();

    let vm = Arc::new(ctx.view_model()?);
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

    ctx.output
        .info("Type a search term and press Enter. An empty line clears the search, Ctrl-D exits.");

    let mut debounce = Debouncer::new(Duration::from_millis(ctx.config.ui.search_debounce_ms));
    let stdin = BufReader::new(tokio::io::stdin());
    search_loop(&vm, stdin, &mut debounce, |snapshot| {
        render(ctx, snapshot, signed_in, args.limit)
    })
    .await
}

/// Apply each input line as the search term through `debounce`, calling
/// `render` whenever the view model publishes a new snapshot.
///
/// At end of input the pending term is applied rather than dropped.
async fn search_loop<R, F>(
    vm: &Arc<CatalogViewModel>,
    input: R,
    debounce: &mut Debouncer,
    mut render: F,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    F: FnMut(&CatalogSnapshot),
{
    let mut updates = vm.subscribe();
    let mut lines = input.lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(term) = line.context("Failed to read from stdin")? else {
                    if debounce.flush().await {
                        let snapshot = updates.borrow_and_update().clone();
                        render(&snapshot);
                    }
                    break;
                };
                let vm = Arc::clone(vm);
                debounce.call(move || vm.update_filters(FilterUpdate::new().search(term)));
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                render(&snapshot);
            }
        }
    }

    Ok(())
}

fn render(ctx: &Context, snapshot: &CatalogSnapshot, signed_in: bool, limit: usize) {
    if ctx.output.is_json() {
        let rows: Vec<ProductRow> = snapshot
            .products
            .iter()
            .take(limit)
            .map(|p| ProductRow::new(p, signed_in))
            .collect();
        ctx.output.json(&rows);
    } else {
        print_listing(ctx, snapshot, signed_in, limit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_catalog::prelude::{
        CatalogLoader, Product, StaticSource, ViewModelOptions,
    };

    fn catalog() -> Vec<Product> {
        serde_json::from_str(
            r#"[
                {"id": 1, "title": "Gold Ring", "price": 168, "category": "jewelery"},
                {"id": 2, "title": "Silver Ring", "price": 10.99, "category": "jewelery"},
                {"id": 3, "title": "Hard Drive", "price": 64, "category": "electronics"}
            ]"#,
        )
        .unwrap()
    }

    async fn loaded_view_model() -> Arc<CatalogViewModel> {
        let loader = CatalogLoader::new(
            Arc::new(StaticSource::new(catalog())),
            Arc::new(StaticSource::default()),
        );
        let vm = Arc::new(CatalogViewModel::new(loader, ViewModelOptions::default()));
        vm.activate().await;
        vm
    }

    #[tokio::test]
    async fn test_last_term_applied_at_end_of_input() {
        let vm = loaded_view_model().await;
        let mut debounce = Debouncer::new(Duration::from_millis(20));
        let mut rendered = Vec::new();

        search_loop(&vm, &b"drive\nring\n"[..], &mut debounce, |snapshot| {
            rendered.push((snapshot.filters.search.clone(), snapshot.products.len()));
        })
        .await
        .unwrap();

        assert_eq!(rendered.last(), Some(&("ring".to_string(), 2)));
        assert_eq!(vm.snapshot().filters.search, "ring");
        assert!(!debounce.is_pending());
    }

    #[tokio::test]
    async fn test_empty_input_renders_nothing() {
        let vm = loaded_view_model().await;
        let mut debounce = Debouncer::new(Duration::from_millis(20));
        let mut renders = 0;

        search_loop(&vm, &b""[..], &mut debounce, |_| renders += 1)
            .await
            .unwrap();

        assert_eq!(renders, 0);
        assert_eq!(vm.snapshot().products.len(), 3);
    }
}
