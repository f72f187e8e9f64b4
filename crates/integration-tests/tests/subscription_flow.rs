//! End-to-end subscription flow: plan, assets, subscribe.

#![allow(clippy::unwrap_used)]

use chrono::Months;
use rust_decimal::Decimal;

use crescent_core::{
    DocumentStore, PlanId, SubscriptionRecord, SubscriptionStatus, UserId, collections, decode,
};
use crescent_integration_tests::{TestContext, valid_billing_form};
use crescent_storefront::subscription::{AssetForm, find_plan};

fn asset_form(pc_name: &str, serial: &str) -> AssetForm {
    AssetForm {
        pc_name: pc_name.to_owned(),
        device_type: "Laptop".to_owned(),
        serial_number: serial.to_owned(),
        ram: "16GB".to_owned(),
        processor: "Ryzen 7".to_owned(),
        hdd: String::new(),
        ssd: "512GB".to_owned(),
        model: "ThinkPad T14".to_owned(),
    }
}

#[tokio::test]
async fn test_subscribe_with_registered_assets() {
    let ctx = TestContext::new().await;
    let user = UserId::new("user-010");
    let service = ctx.state.subscriptions();

    let plan = find_plan(&PlanId::new("classic")).unwrap();
    assert_eq!(plan.price, Decimal::from(2500));

    // First register for this user starts at CT-01.
    let mut register = service.start_register(&user).await.unwrap();
    let first = register.add(&asset_form("Front Desk PC", "SN-1001")).unwrap();
    let second = register.add(&asset_form("Backoffice PC", "SN-1002")).unwrap();
    assert_eq!(first.as_str(), "CT-01");
    assert_eq!(second.as_str(), "CT-02");

    let id = service
        .subscribe(&user, &plan, &valid_billing_form(), register)
        .await
        .unwrap();

    // The stored record carries the plan snapshot and a one-month term.
    let store = ctx.store();
    let doc = store
        .get(collections::SERVICE_SUBSCRIPTIONS, id.as_str())
        .await
        .unwrap()
        .unwrap();
    let record = SubscriptionRecord {
        id: id.clone(),
        subscription: decode(doc).unwrap(),
    };
    assert_eq!(record.subscription.plan_name, "Classic");
    assert_eq!(record.subscription.plan_price, Decimal::from(2500));
    assert_eq!(record.subscription.status, SubscriptionStatus::Active);
    assert_eq!(record.subscription.assets.len(), 2);
    assert_eq!(
        record.subscription.end_date,
        record
            .subscription
            .start_date
            .checked_add_months(Months::new(1))
            .unwrap()
    );
}

#[tokio::test]
async fn test_duplicate_serial_is_rejected() {
    let ctx = TestContext::new().await;
    let user = UserId::new("user-011");

    let mut register = ctx.state.subscriptions().start_register(&user).await.unwrap();
    register.add(&asset_form("Main PC", "SN-2001")).unwrap();

    let err = register.add(&asset_form("Other PC", "sn-2001")).unwrap_err();
    assert!(err.to_string().contains("already been added"));
    assert_eq!(register.assets().len(), 1);
}

#[tokio::test]
async fn test_asset_numbering_continues_after_existing_assets() {
    let ctx = TestContext::new().await;
    let user = UserId::new("user-012");
    let service = ctx.state.subscriptions();

    // First subscription registers two devices.
    let mut register = service.start_register(&user).await.unwrap();
    register.add(&asset_form("PC One", "SN-3001")).unwrap();
    register.add(&asset_form("PC Two", "SN-3002")).unwrap();
    let plan = find_plan(&PlanId::new("classic")).unwrap();
    service
        .subscribe(&user, &plan, &valid_billing_form(), register)
        .await
        .unwrap();

    // A later register picks up numbering after the stored assets.
    let mut next = service.start_register(&user).await.unwrap();
    let tag = next.add(&asset_form("PC Three", "SN-3003")).unwrap();
    assert_eq!(tag.as_str(), "CT-03");
}

#[tokio::test]
async fn test_basic_plan_needs_five_assets() {
    let ctx = TestContext::new().await;
    let user = UserId::new("user-013");
    let service = ctx.state.subscriptions();

    let plan = find_plan(&PlanId::new("basic")).unwrap();
    let mut register = service.start_register(&user).await.unwrap();
    register.add(&asset_form("Only PC", "SN-4001")).unwrap();

    let err = service
        .subscribe(&user, &plan, &valid_billing_form(), register)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("at least 5 asset(s)"));
    assert!(
        ctx.store()
            .is_empty(collections::SERVICE_SUBSCRIPTIONS)
            .await
    );
}
