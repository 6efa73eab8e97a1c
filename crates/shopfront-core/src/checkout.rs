//! # Checkout
//!
//! Turns the session's cart into a placed order.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Step 1: Shipping form ──► validate_shipping() ──► all missing fields   │
//! │                                  │                                      │
//! │  Step 2: Payment form ───► validate_payment()  ──► card fields only for │
//! │                                  │                 PaymentMethod::Card  │
//! │                                  ▼                                      │
//! │  place_order()                                                          │
//! │    1. cart empty?        → CoreError::EmptyCart                         │
//! │    2. forms invalid?     → CoreError::InvalidCheckout                   │
//! │    3. freeze lines + OrderSummary (subtotal, free shipping, tax)        │
//! │    4. session.clear_cart()                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing is mutated unless every check passes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationErrors};
use crate::money::Money;
use crate::session::{CartLine, SessionStore};
use crate::types::{PaymentMethod, TaxRate};
use crate::validation::{validate_email, validate_required};

// =============================================================================
// Form Input
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct ShippingInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    /// State / province. Optional.
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub notes: Option<String>,
}

impl ShippingInfo {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct CardDetails {
    pub number: String,
    pub name: String,
    pub expiry: String,
    pub cvc: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutRequest {
    pub shipping: ShippingInfo,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub card: Option<CardDetails>,
}

// =============================================================================
// Validation
// =============================================================================

/// Checks the shipping form, collecting every failing field.
///
/// `state`, `country` and `notes` are optional.
pub fn validate_shipping(info: &ShippingInfo) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    errors.check(validate_required("first_name", &info.first_name));
    errors.check(validate_required("last_name", &info.last_name));
    errors.check(validate_email("email", &info.email));
    errors.check(validate_required("phone", &info.phone));
    errors.check(validate_required("address", &info.address));
    errors.check(validate_required("city", &info.city));
    errors.check(validate_required("zip_code", &info.zip_code));

    errors.into_result()
}

/// Checks the payment form. Only cards carry details to check.
pub fn validate_payment(
    method: PaymentMethod,
    card: Option<&CardDetails>,
) -> Result<(), ValidationErrors> {
    if method != PaymentMethod::Card {
        return Ok(());
    }

    let blank = CardDetails::default();
    let card = card.unwrap_or(&blank);
    let mut errors = ValidationErrors::new();

    errors.check(validate_required("card_number", &card.number));
    errors.check(validate_required("card_name", &card.name));
    errors.check(validate_required("card_expiry", &card.expiry));
    errors.check(validate_required("card_cvc", &card.cvc));

    errors.into_result()
}

// =============================================================================
// Order Summary
// =============================================================================

/// One frozen line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderLine {
    pub product_id: String,
    pub name: String,
    pub image: String,
    pub unit_price: Money,
    pub quantity: i64,
    pub line_total: Money,
}

impl From<&CartLine> for OrderLine {
    fn from(line: &CartLine) -> Self {
        OrderLine {
            product_id: line.product.id.clone(),
            name: line.product.name.clone(),
            image: line.product.image.clone(),
            unit_price: line.unit_price(),
            quantity: line.quantity,
            line_total: line.line_total(),
        }
    }
}

/// The checkout page's right-hand column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderSummary {
    pub lines: Vec<OrderLine>,
    /// Equals the session's cart total.
    pub subtotal: Money,
    /// Always free.
    pub shipping: Money,
    pub tax_rate: TaxRate,
    pub tax: Money,
    pub total: Money,
}

impl OrderSummary {
    /// ```rust
    /// use shopfront_core::checkout::OrderSummary;
    /// use shopfront_core::types::TaxRate;
    ///
    /// let empty = OrderSummary::from_cart(&[], TaxRate::default());
    /// assert!(empty.total.is_zero());
    /// ```
    pub fn from_cart(lines: &[CartLine], tax_rate: TaxRate) -> Self {
        let lines: Vec<OrderLine> = lines.iter().map(OrderLine::from).collect();
        let subtotal: Money = lines.iter().map(|l| l.line_total).sum();
        let shipping = Money::zero();
        let tax = subtotal.calculate_tax(tax_rate);

        OrderSummary {
            lines,
            subtotal,
            shipping,
            tax_rate,
            tax,
            total: subtotal + shipping + tax,
        }
    }

    pub fn item_count(&self) -> i64 {
        self.lines
            .iter()
            .fold(0i64, |count, l| count.saturating_add(l.quantity))
    }
}

// =============================================================================
// Placing the Order
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PlacedOrder {
    pub order_number: String,
    pub customer: String,
    /// Where the confirmation goes; also the tracking key.
    pub email: String,
    pub payment_method: PaymentMethod,
    pub summary: OrderSummary,
    #[ts(as = "String")]
    pub placed_at: DateTime<Utc>,
}

/// Validates the request, snapshots the cart, then clears it.
///
/// The caller supplies `order_number` so this stays deterministic.
///
/// ## Errors
/// - [`CoreError::EmptyCart`] when there is nothing to buy
/// - [`CoreError::InvalidCheckout`] with every failing shipping field, or
///   failing card fields once shipping is valid
///
/// On error the session is left exactly as it was.
pub fn place_order(
    session: &mut SessionStore,
    request: &CheckoutRequest,
    tax_rate: TaxRate,
    order_number: impl Into<String>,
) -> CoreResult<PlacedOrder> {
    if session.cart().is_empty() {
        return Err(CoreError::EmptyCart);
    }

    validate_shipping(&request.shipping)?;
    validate_payment(request.payment_method, request.card.as_ref())?;

    let summary = OrderSummary::from_cart(session.cart(), tax_rate);
    let order = PlacedOrder {
        order_number: order_number.into(),
        customer: request.shipping.full_name(),
        email: request.shipping.email.trim().to_string(),
        payment_method: request.payment_method,
        summary,
        placed_at: Utc::now(),
    };

    session.clear_cart();
    Ok(order)
}
