//! Service plans, registered assets, and subscription records.
//!
//! The service-package flow runs structurally parallel to the product
//! checkout: pick a plan, register the covered assets, submit billing
//! details, and a subscription document is appended.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{AssetId, PlanId, SubscriptionId, UserId};
use super::order::BillingDetails;
use super::status::SubscriptionStatus;

/// A purchasable service package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicePlan {
    pub id: PlanId,
    pub name: String,
    /// Monthly price.
    pub price: Decimal,
    /// What the package covers, for display.
    pub services: Vec<String>,
    /// Fewest assets a subscription on this plan must cover.
    pub min_assets: usize,
}

/// A device covered by a subscription.
///
/// Serial numbers are unique (case-insensitive) within one
/// subscription-in-progress; asset ids are sequential `CT-NN` tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub asset_id: AssetId,
    pub pc_name: String,
    pub device_type: String,
    pub serial_number: String,
    pub ram: String,
    pub processor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hdd: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssd: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// The stored subscription document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub plan_id: PlanId,
    pub plan_name: String,
    pub plan_price: Decimal,
    pub billing_details: BillingDetails,
    pub assets: Vec<Asset>,
    pub status: SubscriptionStatus,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub start_date: DateTime<Utc>,
    /// Exactly one calendar month after `start_date`.
    pub end_date: DateTime<Utc>,
}

/// A subscription together with its store-generated key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionRecord {
    pub id: SubscriptionId,
    #[serde(flatten)]
    pub subscription: Subscription,
}
