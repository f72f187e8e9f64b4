//! Checkout: billing validation and the cart-to-order handoff.
//!
//! `place_order` converts a non-empty cart plus validated billing details
//! into an immutable order, exactly once per checkout action. All
//! validation happens before any write; the commit sequence is
//! order-append, optional billing save, cart clear, with a compensating
//! delete of the order if a later step fails.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crescent_core::{
    BillingDetails, DocumentStore, Email, Order, OrderId, OrderStatus, Phone, UserId, collections,
    encode,
};

use crate::cart::CartLedger;
use crate::error::{Result, StorefrontError};

/// Raw billing form input, exactly as the checkout page collects it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BillingForm {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub country: String,
    pub street1: String,
    pub street2: String,
    pub town: String,
    pub zip: String,
    pub phone: String,
    pub email: String,
    pub note: String,
}

/// A billing-input failure. One is surfaced per attempt; the user corrects
/// and resubmits.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ValidationError {
    #[error("please fill in all required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("please enter a valid email address")]
    InvalidEmail,
    #[error("please enter a valid phone number")]
    InvalidPhone,
    #[error("your cart is empty; add items before checkout")]
    EmptyCart,
    #[error("you must add at least {minimum} asset(s) for the {plan} plan")]
    TooFewAssets { plan: String, minimum: usize },
}

/// Validate a billing form and produce the typed snapshot.
///
/// Checks run in order: required fields present and non-blank, then email
/// shape, then phone shape (after stripping spaces, hyphens and
/// parentheses). The first failure wins.
///
/// # Errors
///
/// Returns the corresponding [`ValidationError`].
pub fn validate_billing(form: &BillingForm) -> std::result::Result<BillingDetails, ValidationError> {
    let required: [(&str, &'static str); 7] = [
        (&form.first_name, "First Name"),
        (&form.last_name, "Last Name"),
        (&form.street1, "Street Address"),
        (&form.town, "Town/City"),
        (&form.zip, "ZIP Code"),
        (&form.phone, "Phone"),
        (&form.email, "Email Address"),
    ];
    let missing: Vec<&'static str> = required
        .iter()
        .filter(|(value, _)| value.trim().is_empty())
        .map(|(_, name)| *name)
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    let email = Email::parse(form.email.trim()).map_err(|_| ValidationError::InvalidEmail)?;
    let phone = Phone::parse(form.phone.trim()).map_err(|_| ValidationError::InvalidPhone)?;

    let optional = |s: &str| {
        let trimmed = s.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_owned())
    };

    Ok(BillingDetails {
        first_name: form.first_name.trim().to_owned(),
        last_name: form.last_name.trim().to_owned(),
        company: optional(&form.company),
        country: form.country.trim().to_owned(),
        street1: form.street1.trim().to_owned(),
        street2: optional(&form.street2),
        town: form.town.trim().to_owned(),
        zip: form.zip.trim().to_owned(),
        phone,
        email,
        note: optional(&form.note),
    })
}

/// Outcome of entering a coupon code.
///
/// Display-only: any non-blank code is accepted cosmetically, nothing is
/// checked against a discount table and totals are never adjusted. Kept as
/// a visible stub rather than silently fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CouponOutcome {
    /// Shown as applied in the order summary; has no effect on the total.
    Accepted { code: String },
    /// Blank input; nothing to show.
    Ignored,
}

/// Evaluate a coupon code for display.
#[must_use]
pub fn apply_coupon(code: &str) -> CouponOutcome {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        CouponOutcome::Ignored
    } else {
        CouponOutcome::Accepted {
            code: trimmed.to_owned(),
        }
    }
}

/// What the caller asked for at checkout.
#[derive(Debug, Clone, Default)]
pub struct CheckoutRequest {
    pub billing: BillingForm,
    /// Persist the billing snapshot under the user's key for next time.
    pub save_billing_details: bool,
}

/// A successfully placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderReceipt {
    pub order_id: OrderId,
    pub total: rust_decimal::Decimal,
}

/// Converts carts into orders.
pub struct OrderProcessor<S> {
    store: Arc<S>,
}

impl<S: DocumentStore> OrderProcessor<S> {
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Place an order from the user's cart.
    ///
    /// Validation (billing fields, email, phone, non-empty cart) happens
    /// before any write. The commit sequence is:
    ///
    /// 1. append the order document (items and billing are snapshots)
    /// 2. if requested, save the billing snapshot keyed by user id
    /// 3. clear the cart
    ///
    /// If step 2 or 3 fails, the just-created order is deleted so the
    /// sequence appears atomic to the caller; if that rollback also fails
    /// the orphaned order id is logged and the original error is surfaced.
    ///
    /// # Errors
    ///
    /// [`StorefrontError::Validation`] for bad input, or a store error if
    /// any write fails.
    #[instrument(skip(self, cart, request), fields(user = %user))]
    pub async fn place_order(
        &self,
        user: &UserId,
        cart: &mut CartLedger<S>,
        request: CheckoutRequest,
    ) -> Result<OrderReceipt> {
        let billing = validate_billing(&request.billing)?;
        if cart.is_empty() {
            return Err(ValidationError::EmptyCart.into());
        }

        let totals = cart.totals();
        let order = Order {
            user_id: user.clone(),
            items: cart.items().to_vec(),
            billing_details: billing.clone(),
            total: totals.total,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        };

        let key = self
            .store
            .append(collections::ORDERS, encode(&order)?)
            .await?;
        let order_id = OrderId::new(key);
        tracing::info!(%order_id, total = %totals.total, "order created");

        if request.save_billing_details
            && let Err(err) = self.save_billing(user, &billing).await
        {
            return Err(self.roll_back(&order_id, err).await);
        }

        if let Err(err) = cart.clear().await {
            return Err(self.roll_back(&order_id, err).await);
        }

        Ok(OrderReceipt {
            order_id,
            total: totals.total,
        })
    }

    async fn save_billing(&self, user: &UserId, billing: &BillingDetails) -> Result<()> {
        self.store
            .put(collections::BILLING_DETAILS, user.as_str(), encode(billing)?)
            .await?;
        Ok(())
    }

    /// Compensate for a failure after the order append: delete the order
    /// so no half-committed checkout remains, then surface the original
    /// error.
    async fn roll_back(&self, order_id: &OrderId, cause: StorefrontError) -> StorefrontError {
        if let Err(rollback_err) = self
            .store
            .delete(collections::ORDERS, order_id.as_str())
            .await
        {
            tracing::error!(
                %order_id,
                error = %rollback_err,
                "rollback failed; order may persist without a cleared cart"
            );
        } else {
            tracing::warn!(%order_id, "checkout rolled back");
        }
        cause
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_form() -> BillingForm {
        BillingForm {
            first_name: "John".to_owned(),
            last_name: "Doe".to_owned(),
            company: String::new(),
            country: "India".to_owned(),
            street1: "1 Main St".to_owned(),
            street2: String::new(),
            town: "Mumbai".to_owned(),
            zip: "400001".to_owned(),
            phone: "+91 (22) 1234-5678".to_owned(),
            email: "john@example.com".to_owned(),
            note: String::new(),
        }
    }

    #[test]
    fn test_validate_accepts_well_formed_input() {
        let billing = validate_billing(&valid_form()).unwrap();
        assert_eq!(billing.display_name(), "John Doe");
        assert_eq!(billing.phone.as_str(), "+912212345678");
        assert!(billing.company.is_none());
    }

    #[test]
    fn test_validate_lists_missing_fields() {
        let form = BillingForm {
            first_name: "  ".to_owned(),
            zip: String::new(),
            ..valid_form()
        };
        let err = validate_billing(&form).unwrap_err();
        match err {
            ValidationError::MissingFields(fields) => {
                assert_eq!(fields, vec!["First Name", "ZIP Code"]);
            }
            other => panic!("expected MissingFields, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_malformed_email() {
        let form = BillingForm {
            email: "not-an-email".to_owned(),
            ..valid_form()
        };
        assert!(matches!(
            validate_billing(&form),
            Err(ValidationError::InvalidEmail)
        ));
    }

    #[test]
    fn test_validate_rejects_malformed_phone() {
        let form = BillingForm {
            phone: "abc".to_owned(),
            ..valid_form()
        };
        assert!(matches!(
            validate_billing(&form),
            Err(ValidationError::InvalidPhone)
        ));
    }

    #[test]
    fn test_field_checks_run_before_shape_checks() {
        let form = BillingForm {
            first_name: String::new(),
            email: "not-an-email".to_owned(),
            ..valid_form()
        };
        assert!(matches!(
            validate_billing(&form),
            Err(ValidationError::MissingFields(_))
        ));
    }

    #[test]
    fn test_coupon_is_a_visible_noop() {
        assert_eq!(
            apply_coupon("  SAVE10 "),
            CouponOutcome::Accepted {
                code: "SAVE10".to_owned()
            }
        );
        assert_eq!(apply_coupon("   "), CouponOutcome::Ignored);
    }
}
