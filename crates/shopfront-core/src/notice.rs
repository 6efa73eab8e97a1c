//! # Notices
//!
//! Toast messages for store and checkout outcomes.
//!
//! The session store stays silent; callers that want feedback turn the
//! outcome they got back into a [`Notice`] here. Absent-id no-ops have no
//! notice.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::session::{CartAdd, CartLine, WishlistAdd, WishlistEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn cart_add(product_name: &str, outcome: CartAdd) -> Self {
        match outcome {
            CartAdd::Added => Notice::success(format!("{} added to your cart", product_name)),
            CartAdd::Incremented { .. } => {
                Notice::success(format!("Added another {} to your cart", product_name))
            }
        }
    }

    /// Product page: several units added in one go.
    pub fn cart_add_many(product_name: &str, quantity: i64) -> Self {
        Notice::success(format!("{} {} added to cart", quantity, product_name))
    }

    pub fn cart_remove(line: &CartLine) -> Self {
        Notice::info(format!("{} removed from your cart", line.product.name))
    }

    pub fn cart_cleared() -> Self {
        Notice::info("Cart cleared")
    }

    pub fn wishlist_add(product_name: &str, outcome: WishlistAdd) -> Self {
        match outcome {
            WishlistAdd::Added => {
                Notice::success(format!("{} added to your wishlist", product_name))
            }
            WishlistAdd::AlreadyPresent => {
                Notice::info(format!("{} is already in your wishlist", product_name))
            }
        }
    }

    pub fn wishlist_remove(entry: &WishlistEntry) -> Self {
        Notice::info(format!("{} removed from your wishlist", entry.product.name))
    }

    pub fn order_placed() -> Self {
        Notice::success("Order placed successfully!")
    }

    pub fn order_found() -> Self {
        Notice::success("Order found!")
    }
}
