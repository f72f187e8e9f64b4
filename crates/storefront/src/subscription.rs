//! The service-package subscription flow.
//!
//! Structurally parallel to the product checkout: pick a plan, register the
//! devices it will cover, submit billing details, and a subscription
//! document is appended. Asset serial numbers are unique within one
//! subscription-in-progress; a duplicate is rejected locally with no write.

use std::sync::Arc;

use chrono::{Months, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::instrument;

use crescent_core::{
    Asset, AssetId, DocumentStore, PlanId, ServicePlan, Subscription, SubscriptionId,
    SubscriptionStatus, UserId, collections, encode,
};

use crate::checkout::{BillingForm, ValidationError, validate_billing};
use crate::error::{Result, StorefrontError};

/// The built-in service packages.
#[must_use]
pub fn builtin_plans() -> Vec<ServicePlan> {
    let plan = |id: &str, name: &str, price: i64, min_assets: usize, services: &[&str]| {
        ServicePlan {
            id: PlanId::new(id),
            name: name.to_owned(),
            price: Decimal::from(price),
            services: services.iter().map(|s| (*s).to_owned()).collect(),
            min_assets,
        }
    };

    vec![
        plan(
            "basic",
            "Basic",
            1500,
            5,
            &[
                "Network Security Assessment",
                "Basic Firewall Configuration",
                "Email Security Setup",
                "24/7 Monitoring (Basic)",
                "Monthly Reports",
            ],
        ),
        plan(
            "classic",
            "Classic",
            2500,
            1,
            &[
                "All Basic Services",
                "Advanced Threat Detection",
                "Endpoint Protection",
                "Data Backup & Recovery",
                "Compliance Monitoring",
                "Priority Support",
            ],
        ),
        plan(
            "enterprise",
            "Enterprise",
            3500,
            1,
            &[
                "All Classic Services",
                "Custom Security Solutions",
                "24/7 On-site Support",
                "Advanced Analytics",
                "Incident Response",
                "Dedicated Security Team",
                "Quarterly Audits",
            ],
        ),
    ]
}

/// Look up a built-in plan by id.
#[must_use]
pub fn find_plan(id: &PlanId) -> Option<ServicePlan> {
    builtin_plans().into_iter().find(|p| &p.id == id)
}

/// End of the billing period that starts at `start`: one calendar month
/// later, clamped to the last day of the shorter month (Jan 31 -> Feb 28).
#[must_use]
pub fn subscription_end(start: chrono::DateTime<Utc>) -> chrono::DateTime<Utc> {
    start.checked_add_months(Months::new(1)).unwrap_or(start)
}

/// Raw asset form input for one device.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetForm {
    pub pc_name: String,
    pub device_type: String,
    pub serial_number: String,
    pub ram: String,
    pub processor: String,
    pub hdd: String,
    pub ssd: String,
    pub model: String,
}

/// The asset list being assembled for one subscription.
///
/// Ids are sequential `CT-NN` tags; the starting index is seeded from the
/// count of the user's previously registered assets.
#[derive(Debug, Clone, Default)]
pub struct AssetRegister {
    assets: Vec<Asset>,
    next_index: u32,
}

impl AssetRegister {
    /// Start a register whose first asset id is `CT-{start_index}`.
    #[must_use]
    pub const fn with_starting_index(start_index: u32) -> Self {
        Self {
            assets: Vec::new(),
            next_index: start_index,
        }
    }

    /// Assets registered so far.
    #[must_use]
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// Register a device.
    ///
    /// # Errors
    ///
    /// `Validation` if a required field (PC name, device type, serial
    /// number, RAM, processor) is blank; `Duplicate` if the serial number
    /// is already registered (case-insensitive). Nothing is written in
    /// either case.
    pub fn add(&mut self, form: &AssetForm) -> Result<AssetId> {
        let required: [(&str, &'static str); 5] = [
            (&form.pc_name, "PC Name"),
            (&form.device_type, "Device Type"),
            (&form.serial_number, "Serial Number"),
            (&form.ram, "RAM"),
            (&form.processor, "Processor"),
        ];
        let missing: Vec<&'static str> = required
            .iter()
            .filter(|(value, _)| value.trim().is_empty())
            .map(|(_, name)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing).into());
        }

        let serial = form.serial_number.trim();
        if self
            .assets
            .iter()
            .any(|a| a.serial_number.eq_ignore_ascii_case(serial))
        {
            return Err(StorefrontError::Duplicate(format!(
                "serial number {serial} has already been added"
            )));
        }

        let optional = |s: &str| {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        };

        let asset_id = AssetId::new(format!("CT-{:02}", self.next_index));
        let asset = Asset {
            asset_id: asset_id.clone(),
            pc_name: form.pc_name.trim().to_owned(),
            device_type: form.device_type.trim().to_owned(),
            serial_number: serial.to_owned(),
            ram: form.ram.trim().to_owned(),
            processor: form.processor.trim().to_owned(),
            hdd: optional(&form.hdd),
            ssd: optional(&form.ssd),
            model: optional(&form.model),
            created_at: Utc::now(),
        };
        self.next_index += 1;
        self.assets.push(asset);
        Ok(asset_id)
    }

    /// Drop a registered asset by id.
    pub fn remove(&mut self, asset_id: &AssetId) {
        self.assets.retain(|a| &a.asset_id != asset_id);
    }
}

/// Creates service subscriptions.
pub struct SubscriptionService<S> {
    store: Arc<S>,
}

impl<S: DocumentStore> SubscriptionService<S> {
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Start an asset register for a user, numbering on from their
    /// previously registered assets.
    ///
    /// # Errors
    ///
    /// Returns a store error if the asset count cannot be read.
    #[instrument(skip(self))]
    pub async fn start_register(&self, user: &UserId) -> Result<AssetRegister> {
        let existing = self
            .store
            .query(collections::USER_ASSETS, "userId", &json!(user.as_str()))
            .await?;
        let start = u32::try_from(existing.len()).unwrap_or(u32::MAX - 1) + 1;
        Ok(AssetRegister::with_starting_index(start))
    }

    /// Create a subscription for a plan and its registered assets.
    ///
    /// Billing is validated the same way as product checkout and the plan's
    /// minimum asset count must be met. The registered assets are saved to
    /// the user's inventory (which seeds future `CT-NN` numbering), then
    /// the subscription document is appended. It runs from now until
    /// exactly one calendar month later and starts `active`.
    ///
    /// # Errors
    ///
    /// `Validation` for bad billing input or too few assets, or a store
    /// error if a write fails.
    #[instrument(skip(self, billing, register), fields(plan = %plan.id))]
    pub async fn subscribe(
        &self,
        user: &UserId,
        plan: &ServicePlan,
        billing: &BillingForm,
        register: AssetRegister,
    ) -> Result<SubscriptionId> {
        let billing_details = validate_billing(billing)?;
        if register.assets.len() < plan.min_assets {
            return Err(ValidationError::TooFewAssets {
                plan: plan.name.clone(),
                minimum: plan.min_assets,
            }
            .into());
        }

        for asset in &register.assets {
            let mut doc = encode(asset)?;
            if let Some(fields) = doc.as_object_mut() {
                fields.insert("userId".to_owned(), json!(user.as_str()));
                fields.insert("planId".to_owned(), json!(plan.id.as_str()));
            }
            self.store.append(collections::USER_ASSETS, doc).await?;
        }

        let start_date = Utc::now();
        let end_date = subscription_end(start_date);

        let subscription = Subscription {
            plan_id: plan.id.clone(),
            plan_name: plan.name.clone(),
            plan_price: plan.price,
            billing_details,
            assets: register.assets,
            status: SubscriptionStatus::Active,
            user_id: user.clone(),
            created_at: start_date,
            start_date,
            end_date,
        };

        let key = self
            .store
            .append(collections::SERVICE_SUBSCRIPTIONS, encode(&subscription)?)
            .await?;
        tracing::info!(subscription_id = %key, plan = %plan.id, "subscription created");
        Ok(SubscriptionId::new(key))
    }
}
