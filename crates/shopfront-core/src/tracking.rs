//! # Order Tracking
//!
//! The lookup table behind the "Track your order" page and the account
//! order list.
//!
//! A lookup needs both the order number and the email it was placed with;
//! the email comparison ignores case. Any delay the page shows while
//! "searching" belongs to the caller.

use chrono::{DateTime, Utc};

use crate::checkout::PlacedOrder;
use crate::error::{CoreError, CoreResult, ValidationErrors};
use crate::money::Money;
use crate::types::{OrderStatus, TrackedOrder, TrackingEvent};
use crate::validation::validate_required;

#[derive(Debug, Clone, Default)]
pub struct OrderBook {
    orders: Vec<TrackedOrder>,
}

impl OrderBook {
    pub fn new(orders: Vec<TrackedOrder>) -> Self {
        OrderBook { orders }
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Finds `order_number` and checks it belongs to `email`.
    ///
    /// ## Errors
    /// - [`CoreError::Validation`] when either input is blank
    /// - [`CoreError::OrderNotFound`] for an unknown number
    /// - [`CoreError::EmailMismatch`] when the order belongs to someone else
    ///
    /// ```rust
    /// use shopfront_core::tracking::OrderBook;
    /// use shopfront_core::types::OrderStatus;
    ///
    /// let book = OrderBook::demo();
    /// let order = book.lookup("ORD-002", "John@Example.com").unwrap();
    /// assert_eq!(order.status, OrderStatus::Shipped);
    /// ```
    pub fn lookup(&self, order_number: &str, email: &str) -> CoreResult<&TrackedOrder> {
        let mut errors = ValidationErrors::new();
        errors.check(validate_required("order_number", order_number));
        errors.check(validate_required("email", email));
        if let Some(first) = errors.iter().next() {
            return Err(CoreError::Validation(first.clone()));
        }

        let order_number = order_number.trim();
        let order = self
            .orders
            .iter()
            .find(|o| o.id.eq_ignore_ascii_case(order_number))
            .ok_or_else(|| CoreError::OrderNotFound(order_number.to_string()))?;

        if !order.email.eq_ignore_ascii_case(email.trim()) {
            return Err(CoreError::EmailMismatch {
                order_number: order.id.clone(),
            });
        }

        Ok(order)
    }

    /// Every order placed with `email`, newest first as listed.
    pub fn orders_for(&self, email: &str) -> Vec<&TrackedOrder> {
        let email = email.trim();
        self.orders
            .iter()
            .filter(|o| o.email.eq_ignore_ascii_case(email))
            .collect()
    }

    /// Makes a freshly placed order trackable.
    ///
    /// Newest orders go first, matching the account page.
    pub fn record(&mut self, order: &PlacedOrder) -> &TrackedOrder {
        let tracked = TrackedOrder {
            id: order.order_number.clone(),
            customer: order.customer.clone(),
            email: order.email.clone(),
            date: order.placed_at.format("%Y-%m-%d").to_string(),
            total: order.summary.total,
            status: OrderStatus::Processing,
            items: order.summary.lines.iter().map(|l| l.name.clone()).collect(),
            estimated_delivery: None,
            tracking_history: vec![event("Order Placed", order.placed_at, "Online")],
        };

        self.orders.insert(0, tracked);
        &self.orders[0]
    }

    /// The storefront's demo orders: `ORD-001` delivered, `ORD-002` shipped,
    /// `ORD-003` still processing.
    pub fn demo() -> Self {
        let placed = demo_event("Order Placed", "2023-05-10 09:15", "Online");
        let processing = demo_event("Processing", "2023-05-11 11:30", "Warehouse");

        OrderBook::new(vec![
            demo_order(
                "ORD-001",
                "2023-05-15",
                12_599,
                OrderStatus::Delivered,
                &["Cotton T-shirt", "Denim Jeans"],
                "2023-05-20",
                vec![
                    placed.clone(),
                    processing.clone(),
                    demo_event("Shipped", "2023-05-12 14:45", "Distribution Center"),
                    demo_event("In Transit", "2023-05-13 08:20", "Shipping Carrier"),
                    demo_event("Delivered", "2023-05-15 14:30", "Customer Address"),
                ],
            ),
            demo_order(
                "ORD-002",
                "2023-05-10",
                7_850,
                OrderStatus::Shipped,
                &["Wireless Earbuds", "Phone Case"],
                "2023-05-18",
                vec![
                    demo_event("Order Placed", "2023-05-05 14:22", "Online"),
                    demo_event("Processing", "2023-05-06 09:45", "Warehouse"),
                    demo_event("Shipped", "2023-05-07 16:30", "Distribution Center"),
                    demo_event("In Transit", "2023-05-09 10:15", "Shipping Carrier"),
                ],
            ),
            demo_order(
                "ORD-003",
                "2023-05-15",
                12_599,
                OrderStatus::Processing,
                &["Cotton T-shirt", "Denim Jeans"],
                "2023-05-20",
                vec![
                    placed,
                    processing,
                    demo_event("Processing", "2023-05-12 14:45", "Distribution Center"),
                ],
            ),
        ])
    }
}

fn event(status: &str, at: DateTime<Utc>, location: &str) -> TrackingEvent {
    TrackingEvent {
        status: status.to_string(),
        at: at.format("%Y-%m-%d %H:%M").to_string(),
        location: Some(location.to_string()),
    }
}

fn demo_event(status: &str, at: &str, location: &str) -> TrackingEvent {
    TrackingEvent {
        status: status.to_string(),
        at: at.to_string(),
        location: Some(location.to_string()),
    }
}

fn demo_order(
    id: &str,
    date: &str,
    total_cents: i64,
    status: OrderStatus,
    items: &[&str],
    estimated_delivery: &str,
    tracking_history: Vec<TrackingEvent>,
) -> TrackedOrder {
    TrackedOrder {
        id: id.to_string(),
        customer: "John Doe".to_string(),
        email: "john@example.com".to_string(),
        date: date.to_string(),
        total: Money::from_cents(total_cents),
        status,
        items: items.iter().map(|s| s.to_string()).collect(),
        estimated_delivery: Some(estimated_delivery.to_string()),
        tracking_history,
    }
}
