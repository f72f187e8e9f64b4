//! Print the admin dashboard for the demo data set.

use std::sync::Arc;

use tracing::info;

use crescent_admin::dashboard::Dashboard;
use crescent_admin::orders::AdminOrders;
use crescent_storefront::store::MemoryStore;

use crate::fixtures;

/// Seed demo orders and subscriptions, then print the aggregates.
///
/// # Errors
///
/// Returns an error if seeding or a collection read fails.
pub async fn show() -> Result<(), Box<dyn std::error::Error>> {
    let store = Arc::new(MemoryStore::new());
    fixtures::seed_history(store.as_ref()).await?;

    let snapshot = Dashboard::new(Arc::clone(&store)).snapshot().await?;
    info!(
        orders = snapshot.total_orders,
        pending = snapshot.pending_orders,
        customers = snapshot.total_customers,
        total_sales = %snapshot.total_sales,
        "overview"
    );

    info!("daily sales:");
    for day in &snapshot.daily_sales {
        info!("  {}: {}", day.date, day.sales);
    }

    info!("subscriptions by plan:");
    for plan in &snapshot.plan_breakdown {
        info!(
            "  {}: {} active, revenue {}",
            plan.plan, plan.subscriptions, plan.revenue
        );
    }

    info!("customers:");
    for customer in &snapshot.customers {
        info!(
            "  {} <{}> ({} orders)",
            customer.name, customer.email, customer.order_count
        );
    }

    info!("recent orders:");
    for record in AdminOrders::new(store).list_orders().await? {
        info!(
            "  {}  {}  {}  {}",
            record.id,
            record.order.created_at.format("%Y-%m-%d"),
            record.order.status,
            record.order.total
        );
    }
    Ok(())
}
