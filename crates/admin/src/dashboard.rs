//! Dashboard aggregation.
//!
//! The dashboard is a pure read: it pulls the order, user, billing and
//! subscription collections wholesale and reduces them to the headline
//! numbers and chart series the overview page shows.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crescent_core::{
    BillingDetails, DocumentStore, OrderId, OrderRecord, OrderStatus, Subscription, UserId,
    collections, decode,
};

use crate::error::Result;

/// A stored user profile document. Shapes in the `users` collection vary,
/// so every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserProfile {
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

/// One customer row on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerSummary {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub order_count: usize,
}

/// Sales summed per calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailySales {
    pub date: NaiveDate,
    pub sales: Decimal,
}

/// Subscription volume and revenue per plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanBreakdown {
    pub plan: String,
    pub subscriptions: usize,
    pub revenue: Decimal,
}

/// Everything the dashboard overview shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSnapshot {
    pub total_orders: usize,
    pub total_sales: Decimal,
    pub pending_orders: usize,
    pub total_customers: usize,
    /// Ascending by date.
    pub daily_sales: Vec<DailySales>,
    pub plan_breakdown: Vec<PlanBreakdown>,
    pub customers: Vec<CustomerSummary>,
}

/// Builds dashboard snapshots.
pub struct Dashboard<S> {
    store: Arc<S>,
}

impl<S: DocumentStore> Dashboard<S> {
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Aggregate the current state of the store into a snapshot.
    ///
    /// # Errors
    ///
    /// Returns a store error if a collection cannot be read or an order
    /// document is corrupt. (User profiles and billing snapshots that fail
    /// to decode are skipped rather than failing the whole dashboard.)
    #[instrument(skip(self))]
    pub async fn snapshot(&self) -> Result<DashboardSnapshot> {
        let orders = self.load_orders().await?;
        let subscriptions = self.load_subscriptions().await?;
        let customers = self.customer_roster(&orders).await?;

        let total_sales: Decimal = orders.iter().map(|r| r.order.total).sum();
        let pending_orders = orders
            .iter()
            .filter(|r| r.order.status == OrderStatus::Pending)
            .count();

        Ok(DashboardSnapshot {
            total_orders: orders.len(),
            total_sales,
            pending_orders,
            total_customers: customers.len(),
            daily_sales: daily_sales(&orders),
            plan_breakdown: plan_breakdown(&subscriptions),
            customers,
        })
    }

    async fn load_orders(&self) -> Result<Vec<OrderRecord>> {
        let documents = self.store.list(collections::ORDERS).await?;
        let mut records = Vec::with_capacity(documents.len());
        for (key, doc) in documents {
            records.push(OrderRecord {
                id: OrderId::new(key),
                order: decode(doc)?,
            });
        }
        Ok(records)
    }

    async fn load_subscriptions(&self) -> Result<Vec<Subscription>> {
        let documents = self.store.list(collections::SERVICE_SUBSCRIPTIONS).await?;
        let mut subscriptions = Vec::with_capacity(documents.len());
        for (_, doc) in documents {
            subscriptions.push(decode(doc)?);
        }
        Ok(subscriptions)
    }

    /// Customer rows from the `users` collection where available, falling
    /// back to the distinct user ids seen on orders with names and emails
    /// pulled from order billing snapshots, enriched by saved billing
    /// details.
    async fn customer_roster(&self, orders: &[OrderRecord]) -> Result<Vec<CustomerSummary>> {
        let mut order_counts: BTreeMap<&str, usize> = BTreeMap::new();
        for record in orders {
            *order_counts.entry(record.order.user_id.as_str()).or_insert(0) += 1;
        }

        let saved_billing = self.saved_billing().await?;
        let profiles = self.store.list(collections::USERS).await?;

        let mut roster = Vec::new();
        if profiles.is_empty() {
            // No profile collection: derive rows from whoever has ordered.
            for (user_id, count) in &order_counts {
                let billing = saved_billing.get(*user_id).or_else(|| {
                    orders
                        .iter()
                        .find(|r| r.order.user_id.as_str() == *user_id)
                        .map(|r| &r.order.billing_details)
                });
                let (name, email) = billing.map_or_else(
                    || ("N/A".to_owned(), "N/A".to_owned()),
                    |b| (b.display_name(), b.email.to_string()),
                );
                roster.push(CustomerSummary {
                    id: UserId::new(*user_id),
                    name,
                    email,
                    order_count: *count,
                });
            }
        } else {
            for (key, doc) in profiles {
                let profile: UserProfile = decode(doc).unwrap_or_default();
                let billing = saved_billing.get(key.as_str());
                let name = profile
                    .display_name
                    .or(profile.name)
                    .or_else(|| billing.map(|b| b.display_name()))
                    .unwrap_or_else(|| "N/A".to_owned());
                let email = profile
                    .email
                    .or_else(|| billing.map(|b| b.email.to_string()))
                    .unwrap_or_else(|| "N/A".to_owned());
                roster.push(CustomerSummary {
                    id: UserId::new(key.as_str()),
                    name,
                    email,
                    order_count: order_counts.get(key.as_str()).copied().unwrap_or(0),
                });
            }
        }
        Ok(roster)
    }

    async fn saved_billing(&self) -> Result<BTreeMap<String, BillingDetails>> {
        let documents = self.store.list(collections::BILLING_DETAILS).await?;
        let mut by_user = BTreeMap::new();
        for (key, doc) in documents {
            if let Ok(billing) = decode::<BillingDetails>(doc) {
                by_user.insert(key, billing);
            }
        }
        Ok(by_user)
    }
}

fn daily_sales(orders: &[OrderRecord]) -> Vec<DailySales> {
    let mut by_date: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for record in orders {
        let date = record.order.created_at.date_naive();
        *by_date.entry(date).or_insert(Decimal::ZERO) += record.order.total;
    }
    by_date
        .into_iter()
        .map(|(date, sales)| DailySales { date, sales })
        .collect()
}

fn plan_breakdown(subscriptions: &[Subscription]) -> Vec<PlanBreakdown> {
    let mut by_plan: BTreeMap<&str, (usize, Decimal)> = BTreeMap::new();
    for subscription in subscriptions {
        let entry = by_plan
            .entry(subscription.plan_name.as_str())
            .or_insert((0, subscription.plan_price));
        entry.0 += 1;
    }
    by_plan
        .into_iter()
        .map(|(plan, (count, price))| PlanBreakdown {
            plan: plan.to_owned(),
            subscriptions: count,
            revenue: price * Decimal::from(count),
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use crescent_core::{Email, Order, Phone, PlanId, SubscriptionStatus, encode};
    use crescent_storefront::store::MemoryStore;

    fn billing(first: &str, last: &str, email: &str) -> BillingDetails {
        BillingDetails {
            first_name: first.to_owned(),
            last_name: last.to_owned(),
            company: None,
            country: "India".to_owned(),
            street1: "1 Main St".to_owned(),
            street2: None,
            town: "Mumbai".to_owned(),
            zip: "400001".to_owned(),
            phone: Phone::parse("1234567890").unwrap(),
            email: Email::parse(email).unwrap(),
            note: None,
        }
    }

    fn order(user: &str, total: i64, status: OrderStatus, day: u32) -> Order {
        Order {
            user_id: UserId::new(user),
            items: Vec::new(),
            billing_details: billing("John", "Doe", "john@example.com"),
            total: Decimal::from(total),
            status,
            created_at: Utc.with_ymd_and_hms(2026, 8, day, 12, 0, 0).unwrap(),
        }
    }

    fn subscription(plan: &str, price: i64) -> Subscription {
        let now = Utc::now();
        Subscription {
            plan_id: PlanId::new(plan.to_lowercase()),
            plan_name: plan.to_owned(),
            plan_price: Decimal::from(price),
            billing_details: billing("Jane", "Smith", "jane@example.com"),
            assets: Vec::new(),
            status: SubscriptionStatus::Active,
            user_id: UserId::new("user-002"),
            created_at: now,
            start_date: now,
            end_date: now,
        }
    }

    async fn seeded_store() -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        for order in [
            order("user-001", 150, OrderStatus::Pending, 1),
            order("user-001", 50, OrderStatus::Shipped, 1),
            order("user-002", 350, OrderStatus::Pending, 2),
        ] {
            store
                .append(collections::ORDERS, encode(&order).unwrap())
                .await
                .unwrap();
        }
        for sub in [
            subscription("Basic", 1500),
            subscription("Basic", 1500),
            subscription("Enterprise", 3500),
        ] {
            store
                .append(collections::SERVICE_SUBSCRIPTIONS, encode(&sub).unwrap())
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_snapshot_headline_numbers() {
        let store = seeded_store().await;
        let snapshot = Dashboard::new(store).snapshot().await.unwrap();

        assert_eq!(snapshot.total_orders, 3);
        assert_eq!(snapshot.total_sales, Decimal::from(550));
        assert_eq!(snapshot.pending_orders, 2);
        assert_eq!(snapshot.total_customers, 2);
    }

    #[tokio::test]
    async fn test_daily_sales_grouped_and_sorted() {
        let store = seeded_store().await;
        let snapshot = Dashboard::new(store).snapshot().await.unwrap();

        let series: Vec<(NaiveDate, Decimal)> = snapshot
            .daily_sales
            .iter()
            .map(|d| (d.date, d.sales))
            .collect();
        assert_eq!(
            series,
            vec![
                (
                    NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
                    Decimal::from(200)
                ),
                (
                    NaiveDate::from_ymd_opt(2026, 8, 2).unwrap(),
                    Decimal::from(350)
                ),
            ]
        );
    }

    #[tokio::test]
    async fn test_plan_breakdown_counts_and_revenue() {
        let store = seeded_store().await;
        let snapshot = Dashboard::new(store).snapshot().await.unwrap();

        let basic = snapshot
            .plan_breakdown
            .iter()
            .find(|p| p.plan == "Basic")
            .unwrap();
        assert_eq!(basic.subscriptions, 2);
        assert_eq!(basic.revenue, Decimal::from(3000));

        let enterprise = snapshot
            .plan_breakdown
            .iter()
            .find(|p| p.plan == "Enterprise")
            .unwrap();
        assert_eq!(enterprise.subscriptions, 1);
        assert_eq!(enterprise.revenue, Decimal::from(3500));
    }

    #[tokio::test]
    async fn test_customer_roster_falls_back_to_order_billing() {
        let store = seeded_store().await;
        let snapshot = Dashboard::new(store).snapshot().await.unwrap();

        let customer = snapshot
            .customers
            .iter()
            .find(|c| c.id.as_str() == "user-001")
            .unwrap();
        assert_eq!(customer.name, "John Doe");
        assert_eq!(customer.email, "john@example.com");
        assert_eq!(customer.order_count, 2);
    }

    #[tokio::test]
    async fn test_customer_roster_prefers_user_profiles() {
        let store = seeded_store().await;
        store
            .put(
                collections::USERS,
                "user-001",
                serde_json::json!({"displayName": "Johnny", "email": "johnny@example.com"}),
            )
            .await
            .unwrap();

        let snapshot = Dashboard::new(store).snapshot().await.unwrap();
        assert_eq!(snapshot.total_customers, 1);
        let customer = snapshot.customers.first().unwrap();
        assert_eq!(customer.name, "Johnny");
        assert_eq!(customer.order_count, 2);
    }

    #[tokio::test]
    async fn test_empty_store_snapshot() {
        let store = Arc::new(MemoryStore::new());
        let snapshot = Dashboard::new(store).snapshot().await.unwrap();
        assert_eq!(snapshot.total_orders, 0);
        assert_eq!(snapshot.total_sales, Decimal::ZERO);
        assert!(snapshot.daily_sales.is_empty());
        assert!(snapshot.plan_breakdown.is_empty());
        assert!(snapshot.customers.is_empty());
    }
}
