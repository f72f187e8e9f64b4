//! Browse the demo catalog from the command line.

use std::collections::BTreeSet;

use tracing::info;

use crescent_core::Price;
use crescent_storefront::catalog::{CatalogQuery, SortKey};
use crescent_storefront::config::StorefrontConfig;
use crescent_storefront::state::AppState;
use crescent_storefront::store::MemoryStore;

use crate::fixtures;

/// Filter and sort arguments as collected from the command line.
pub struct BrowseArgs {
    pub search: String,
    pub categories: Vec<String>,
    pub colors: Vec<String>,
    pub min_ratings: Vec<u8>,
    pub price_min: Option<String>,
    pub price_max: Option<String>,
    pub sort: String,
    pub page: usize,
}

/// Seed the demo catalog and print one page of results.
///
/// # Errors
///
/// Returns an error if seeding or the catalog read fails.
pub async fn browse(args: BrowseArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = MemoryStore::new();
    fixtures::seed_catalog(&store).await?;

    let state = AppState::new(StorefrontConfig::from_env()?, store);
    let catalog = state.load_catalog().await?;

    let mut query = CatalogQuery {
        search: args.search,
        categories: args.categories.into_iter().collect(),
        colors: args.colors.into_iter().collect(),
        ratings_min: args.min_ratings.into_iter().collect::<BTreeSet<u8>>(),
        sort: args.sort.parse().unwrap_or(SortKey::TitleAsc),
        page: args.page,
        page_size: state.config().page_size,
        ..CatalogQuery::default()
    };
    query.set_price_bounds_raw(
        args.price_min.as_deref().unwrap_or(""),
        args.price_max.as_deref().unwrap_or(""),
    );

    let page = catalog.page(&query);
    info!(
        "showing {}-{} of {} products (page {} of {})",
        page.showing.0, page.showing.1, page.total_matches, page.page, page.total_pages
    );
    for product in &page.items {
        let badge = if product.sale_percent > 0 {
            format!(" [-{}%]", product.sale_percent)
        } else if product.is_new {
            " [new]".to_owned()
        } else {
            String::new()
        };
        let price = Price::new(product.price, state.config().currency);
        info!(
            "  #{:<3} {:<30} {:<10} {:<7} {}★ ({} reviews)  {price}{badge}",
            product.id, product.title, product.category, product.color, product.rating,
            product.reviews,
        );
    }
    Ok(())
}
