//! # Checkout Commands
//!
//! Order summary and order placement.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Flow                                        │
//! │                                                                         │
//! │  checkout {"shipping": {...}, "paymentMethod": "card", "card": {...}}   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌──────────────────────────────────────────────┐                       │
//! │  │  session lock held:                          │                       │
//! │  │  1. cart empty?          ──► CART_ERROR      │                       │
//! │  │  2. shipping fields      ──► VALIDATION_ERROR│                       │
//! │  │  3. card fields (card)   ──► VALIDATION_ERROR│                       │
//! │  │  4. freeze summary, clear cart               │                       │
//! │  └──────────────────────────────────────────────┘                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  order book write lock: record as "processing"                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CheckoutResponse { order, notice: "Order placed successfully!" }       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::{ConfigState, OrderBookState, SessionState};
use shopfront_core::checkout::place_order;
use shopfront_core::{CheckoutRequest, Notice, OrderSummary, PlacedOrder};

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutResponse {
    pub order: PlacedOrder,
    pub notice: Notice,
}

/// Generates an order number like `ORD-3F2A9C01`.
pub fn generate_order_number() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("ORD-{}", id[..8].to_uppercase())
}

/// Order summary for the checkout page; the cart is not modified.
pub fn get_order_summary(session: &SessionState, config: &ConfigState) -> OrderSummary {
    debug!("get_order_summary command");
    session.with_session(|s| OrderSummary::from_cart(s.cart(), config.tax_rate()))
}

/// Places the order for everything in the cart.
///
/// On success the cart is empty and the order can be tracked with its
/// number and email. On failure nothing changes.
pub fn checkout(
    session: &SessionState,
    orders: &OrderBookState,
    config: &ConfigState,
    request: &CheckoutRequest,
) -> Result<CheckoutResponse, ApiError> {
    debug!(payment_method = ?request.payment_method, "checkout command");

    let order_number = generate_order_number();
    let order = session
        .with_session_mut(|s| place_order(s, request, config.tax_rate(), order_number))?;

    orders.with_orders_mut(|book| {
        book.record(&order);
    });

    info!(
        order_number = %order.order_number,
        items = order.summary.item_count(),
        total = %config.format_currency(order.summary.total),
        "Order placed"
    );

    Ok(CheckoutResponse {
        order,
        notice: Notice::order_placed(),
    })
}
