//! # Tracking Commands
//!
//! Order lookup for the tracking page and the account order list.
//!
//! The tracking page shows a short "searching" state before it answers;
//! `track_order` reproduces it with a configurable non-blocking delay, so it
//! is the one async handler.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::{ConfigState, OrderBookState};
use shopfront_core::{Notice, TrackedOrder};

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TrackResponse {
    pub order: TrackedOrder,
    pub notice: Notice,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrdersResponse {
    pub email: String,
    pub orders: Vec<TrackedOrder>,
}

/// Looks up an order by number and the email it was placed with.
///
/// ## Errors
/// - `VALIDATION_ERROR` when either input is blank
/// - `NOT_FOUND` for an unknown order number
/// - `BUSINESS_LOGIC` when the email does not match
pub async fn track_order(
    orders: &OrderBookState,
    config: &ConfigState,
    order_number: &str,
    email: &str,
) -> Result<TrackResponse, ApiError> {
    debug!(order_number = %order_number, "track_order command");

    tokio::time::sleep(config.tracking_delay()).await;

    let order = orders.with_orders(|book| book.lookup(order_number, email).cloned())?;
    info!(order_number = %order.id, status = ?order.status, "Order found");

    Ok(TrackResponse {
        order,
        notice: Notice::order_found(),
    })
}

/// Every order placed with `email`.
pub fn list_orders(orders: &OrderBookState, email: &str) -> OrdersResponse {
    debug!("list_orders command");

    OrdersResponse {
        email: email.trim().to_string(),
        orders: orders.with_orders(|book| book.orders_for(email).into_iter().cloned().collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use shopfront_core::OrderStatus;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_track_waits_then_answers() {
        let orders = OrderBookState::demo();
        let config = ConfigState::default();

        let start = tokio::time::Instant::now();
        let response = track_order(&orders, &config, "ORD-002", "john@example.com")
            .await
            .unwrap();

        assert!(start.elapsed() >= Duration::from_millis(1000));
        assert_eq!(response.order.status, OrderStatus::Shipped);
        assert_eq!(response.notice.message, "Order found!");
    }

    #[tokio::test]
    async fn test_track_errors() {
        let orders = OrderBookState::demo();
        let config = ConfigState {
            tracking_delay_ms: 0,
            ..ConfigState::default()
        };

        let mismatch = track_order(&orders, &config, "ORD-001", "jane@example.com")
            .await
            .unwrap_err();
        assert_eq!(mismatch.code, ErrorCode::BusinessLogic);

        let missing = track_order(&orders, &config, "ORD-404", "john@example.com")
            .await
            .unwrap_err();
        assert_eq!(missing.code, ErrorCode::NotFound);

        let blank = track_order(&orders, &config, "", "john@example.com")
            .await
            .unwrap_err();
        assert_eq!(blank.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_list_orders() {
        let orders = OrderBookState::demo();
        let response = list_orders(&orders, " John@Example.com ");
        assert_eq!(response.email, "John@Example.com");
        assert_eq!(response.orders.len(), 3);
        assert!(list_orders(&orders, "nobody@example.com").orders.is_empty());
    }
}
