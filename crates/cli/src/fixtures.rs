//! Sample data for the demo commands.
//!
//! The catalog mirrors the electronics department a small PC-parts shop
//! would stock; orders and subscriptions give the dashboard something to
//! aggregate. Everything is seeded into an in-memory store, nothing is
//! persisted between runs.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;

use crescent_core::{
    BillingDetails, CartItem, DocumentStore, Email, Order, OrderStatus, Phone, Product, ProductId,
    StoreError, Subscription, SubscriptionStatus, UserId, collections, encode,
};
use crescent_storefront::subscription::find_plan;

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    title: &str,
    category: &str,
    color: &str,
    rating: u8,
    reviews: u32,
    price_cents: i64,
    image: &str,
    sale_percent: u8,
    is_new: bool,
    compare_at_cents: Option<i64>,
) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_owned(),
        tag: "Electronics".to_owned(),
        category: category.to_owned(),
        color: color.to_owned(),
        rating,
        reviews,
        price: Decimal::new(price_cents, 2),
        compare_at: compare_at_cents.map(|c| Decimal::new(c, 2)),
        image: image.to_owned(),
        sale_percent,
        is_new,
        sku: None,
    }
}

/// The demo catalog.
pub fn products() -> Vec<Product> {
    vec![
        product(
            "1",
            "Wireless Optical Mouse",
            "Mouse",
            "Black",
            4,
            150,
            20_99,
            "assets/img/shop/wireless gaming mouse rgb.jfif",
            10,
            true,
            Some(23_32),
        ),
        product(
            "2",
            "Gaming Mechanical Keyboard",
            "Keyboard",
            "Black",
            5,
            203,
            90_99,
            "assets/img/shop/gaming mechanical keyboard.jpg",
            0,
            true,
            None,
        ),
        product(
            "3",
            "Wireless Bluetooth Keyboard",
            "Keyboard",
            "White",
            4,
            89,
            55_99,
            "assets/img/shop/wireless keyboard-mouse.jpg",
            15,
            false,
            Some(65_79),
        ),
        product(
            "4",
            "8GB DDR4 Laptop RAM",
            "RAM",
            "Green",
            4,
            67,
            34_99,
            "assets/img/shop/laptop ram.jpg",
            0,
            false,
            None,
        ),
        product(
            "5",
            "16GB DDR4 Desktop RAM",
            "RAM",
            "Blue",
            5,
            112,
            62_99,
            "assets/img/shop/desktop ram.jpg",
            10,
            true,
            Some(69_99),
        ),
        product(
            "6",
            "256GB NVMe SSD for Laptop",
            "SSD",
            "Silver",
            5,
            178,
            48_99,
            "assets/img/shop/256gb nvme ssd for laptop.jfif",
            0,
            true,
            None,
        ),
        product(
            "7",
            "512GB SATA SSD for Desktop",
            "SSD",
            "Black",
            4,
            92,
            55_99,
            "assets/img/shop/512gb sata ssd for desktop.jpg",
            0,
            false,
            None,
        ),
        product(
            "8",
            "1TB HDD",
            "HDD",
            "Gray",
            4,
            78,
            41_99,
            "assets/img/shop/1TB hdd.jfif",
            0,
            false,
            None,
        ),
        product(
            "9",
            "4TB HDD",
            "HDD",
            "Black",
            5,
            145,
            69_99,
            "assets/img/shop/4TB hdd.jfif",
            20,
            true,
            Some(87_49),
        ),
        product(
            "10",
            "500W SMPS Power Supply",
            "SMPS",
            "Black",
            4,
            56,
            34_99,
            "assets/img/shop/smps power supply.jpg",
            0,
            false,
            None,
        ),
        product(
            "11",
            "650W SMPS Power Supply",
            "SMPS",
            "Black",
            5,
            134,
            48_99,
            "assets/img/shop/smps power supply.jpg",
            10,
            false,
            Some(54_44),
        ),
        product(
            "12",
            "CPU Cooler Fan",
            "CPU Fan",
            "Black",
            4,
            67,
            27_99,
            "assets/img/shop/cpu cooler fan.jfif",
            0,
            false,
            None,
        ),
        product(
            "13",
            "RGB CPU Fan",
            "CPU Fan",
            "Blue",
            5,
            203,
            41_99,
            "assets/img/shop/cpu cooler fan.jfif",
            0,
            true,
            None,
        ),
        product(
            "14",
            "Ergonomic Wireless Mouse",
            "Mouse",
            "Gray",
            4,
            89,
            27_99,
            "assets/img/shop/Ergonomic wireless mouse.jpg",
            0,
            false,
            None,
        ),
        product(
            "15",
            "Compact Wired Keyboard",
            "Keyboard",
            "White",
            4,
            45,
            34_99,
            "assets/img/shop/wired keyboard-mouse.jpg",
            0,
            false,
            None,
        ),
        product(
            "16",
            "32GB DDR4 Desktop RAM",
            "RAM",
            "Red",
            5,
            124,
            104_99,
            "assets/img/shop/desktop ram.jpg",
            15,
            true,
            Some(123_53),
        ),
        product(
            "17",
            "1TB NVMe SSD",
            "SSD",
            "Black",
            5,
            156,
            90_99,
            "assets/img/shop/1TB nvme ssd.jpg",
            0,
            true,
            None,
        ),
        product(
            "18",
            "4TB HDD",
            "HDD",
            "Gray",
            4,
            78,
            104_99,
            "assets/img/shop/4TB hdd.jfif",
            0,
            false,
            None,
        ),
        product(
            "19",
            "256GB NVMe SSD for Laptop",
            "SSD",
            "Silver",
            5,
            145,
            42_99,
            "assets/img/shop/256gb nvme ssd for laptop.jfif",
            0,
            true,
            None,
        ),
    ]
}

/// A plausible demo billing snapshot. Fixture contacts are static and
/// known to parse.
#[allow(clippy::unwrap_used)]
fn billing(first: &str, last: &str, email: &str, phone: &str) -> BillingDetails {
    BillingDetails {
        first_name: first.to_owned(),
        last_name: last.to_owned(),
        company: None,
        country: "India".to_owned(),
        street1: "42 Market Road".to_owned(),
        street2: None,
        town: "Chennai".to_owned(),
        zip: "600001".to_owned(),
        phone: Phone::parse(phone).unwrap(),
        email: Email::parse(email).unwrap(),
        note: None,
    }
}

#[allow(clippy::unwrap_used)]
fn demo_orders() -> Vec<Order> {
    let catalog = products();
    let line = |id: &str, qty: u32| {
        let p = catalog.iter().find(|p| p.id.as_str() == id).unwrap();
        CartItem {
            id: p.id.clone(),
            title: p.title.clone(),
            price: p.price,
            qty,
            image: p.image.clone(),
            sku: p.sku.clone(),
            color: Some(p.color.clone()),
        }
    };

    let now = Utc::now();
    vec![
        Order {
            user_id: UserId::new("user-001"),
            items: vec![line("1", 1), line("2", 1)],
            billing_details: billing("John", "Doe", "john@example.com", "1234567890"),
            total: Decimal::new(111_98, 2),
            status: OrderStatus::Pending,
            created_at: now,
        },
        Order {
            user_id: UserId::new("user-002"),
            items: vec![line("9", 1)],
            billing_details: billing("Jane", "Smith", "jane@example.com", "9876543210"),
            total: Decimal::new(69_99, 2),
            status: OrderStatus::Shipped,
            created_at: now - Duration::days(1),
        },
        Order {
            user_id: UserId::new("user-001"),
            items: vec![line("17", 2)],
            billing_details: billing("John", "Doe", "john@example.com", "1234567890"),
            total: Decimal::new(181_98, 2),
            status: OrderStatus::Delivered,
            created_at: now - Duration::days(3),
        },
    ]
}

fn demo_subscriptions() -> Vec<Subscription> {
    let now = Utc::now();
    ["basic", "basic", "enterprise"]
        .iter()
        .filter_map(|id| find_plan(&crescent_core::PlanId::new(*id)))
        .map(|plan| Subscription {
            plan_id: plan.id.clone(),
            plan_name: plan.name.clone(),
            plan_price: plan.price,
            billing_details: billing("Priya", "Nair", "priya@example.com", "9123456780"),
            assets: Vec::new(),
            status: SubscriptionStatus::Active,
            user_id: UserId::new("user-003"),
            created_at: now,
            start_date: now,
            end_date: now,
        })
        .collect()
}

/// Seed the demo catalog into the store.
pub async fn seed_catalog<S: DocumentStore>(store: &S) -> Result<(), StoreError> {
    for product in products() {
        let key = product.id.as_str().to_owned();
        store
            .put(collections::PRODUCTS, &key, encode(&product)?)
            .await?;
    }
    Ok(())
}

/// Seed demo orders and subscriptions for the dashboard.
pub async fn seed_history<S: DocumentStore>(store: &S) -> Result<(), StoreError> {
    for order in demo_orders() {
        store.append(collections::ORDERS, encode(&order)?).await?;
    }
    for subscription in demo_subscriptions() {
        store
            .append(collections::SERVICE_SUBSCRIPTIONS, encode(&subscription)?)
            .await?;
    }
    Ok(())
}
