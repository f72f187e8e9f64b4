//! Run a scripted end-to-end checkout against the in-memory store.

use tracing::info;

use crescent_core::{Price, ProductId, UserId};
use crescent_storefront::checkout::{BillingForm, CheckoutRequest};
use crescent_storefront::config::StorefrontConfig;
use crescent_storefront::state::AppState;
use crescent_storefront::store::MemoryStore;
use crescent_storefront::tracking::tracking_view;

use crate::fixtures;

/// Seed the catalog, fill a cart, place an order and show its tracking
/// state.
///
/// # Errors
///
/// Returns an error if seeding, a cart write or the order placement fails.
pub async fn run(user_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = MemoryStore::new();
    fixtures::seed_catalog(&store).await?;

    let state = AppState::new(StorefrontConfig::from_env()?, store);
    let catalog = state.load_catalog().await?;
    let user = UserId::new(user_id);

    let mut cart = state.cart_for(user.clone()).await?;
    for (id, qty) in [("1", 1), ("2", 2)] {
        let product = catalog
            .find(&ProductId::new(id))
            .ok_or_else(|| format!("fixture product {id} missing"))?;
        cart.add_or_merge(product, qty, Some(&product.color)).await?;
        info!(product = %product.title, qty, "added to cart");
    }
    let currency = state.config().currency;
    let totals = cart.totals();
    info!(
        subtotal = %Price::new(totals.subtotal, currency),
        total = %Price::new(totals.total, currency),
        "cart ready"
    );

    let request = CheckoutRequest {
        billing: BillingForm {
            first_name: "John".to_owned(),
            last_name: "Doe".to_owned(),
            company: String::new(),
            country: "India".to_owned(),
            street1: "42 Market Road".to_owned(),
            street2: String::new(),
            town: "Chennai".to_owned(),
            zip: "600001".to_owned(),
            phone: "+91 98765 43210".to_owned(),
            email: "john@example.com".to_owned(),
            note: String::new(),
        },
        save_billing_details: true,
    };

    let receipt = state.orders().place_order(&user, &mut cart, request).await?;
    info!(
        order_id = %receipt.order_id,
        total = %Price::new(receipt.total, currency),
        "order placed"
    );
    info!(cart_empty = cart.is_empty(), "cart state after checkout");

    let record = state.tracker().find_order(&receipt.order_id).await?;
    let view = tracking_view(&record.order);
    info!(progress = view.progress_percent, "tracking");
    for step in &view.steps {
        let marker = if step.current {
            ">"
        } else if step.completed {
            "x"
        } else {
            " "
        };
        info!("  [{marker}] {} - {}", step.label, step.description);
    }
    Ok(())
}
