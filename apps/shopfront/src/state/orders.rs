//! # Order Book State
//!
//! Tracking lookups far outnumber newly placed orders, so the book sits
//! behind an `RwLock`: lookups share the read side, checkout takes the
//! write side just long enough to record the order.

use std::sync::{Arc, PoisonError, RwLock};

use shopfront_core::OrderBook;

#[derive(Debug, Clone)]
pub struct OrderBookState {
    orders: Arc<RwLock<OrderBook>>,
}

impl OrderBookState {
    pub fn new(book: OrderBook) -> Self {
        OrderBookState {
            orders: Arc::new(RwLock::new(book)),
        }
    }

    /// Starts from the demo orders (`ORD-001` to `ORD-003`).
    pub fn demo() -> Self {
        OrderBookState::new(OrderBook::demo())
    }

    pub fn with_orders<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&OrderBook) -> R,
    {
        let orders = self.orders.read().unwrap_or_else(PoisonError::into_inner);
        f(&orders)
    }

    pub fn with_orders_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut OrderBook) -> R,
    {
        let mut orders = self.orders.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut orders)
    }
}

impl Default for OrderBookState {
    fn default() -> Self {
        Self::demo()
    }
}
