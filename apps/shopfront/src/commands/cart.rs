//! # Cart Commands
//!
//! Handlers for cart manipulation and the cart drawer.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Placed  │       │
//! │  │  Cart    │     │ (drawer  │     │   Form   │     │  Order   │       │
//! │  └──────────┘     │  opens)  │     └──────────┘     └──────────┘       │
//! │                   └──────────┘           │                              │
//! │                        │            place_order                        │
//! │                   add_to_cart       (checkout.rs)                      │
//! │                   update_cart_item        │                             │
//! │                   remove_from_cart        ▼                             │
//! │                        │             clear_cart ───► (back to empty)   │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────►                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::{CatalogState, SessionState};
use shopfront_core::{CartLine, CartTotals, Notice, QuantityUpdate, SessionStore, MAX_LINE_QUANTITY};

/// Cart response including lines, totals and the drawer flag.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartResponse {
    pub items: Vec<CartLine>,
    pub totals: CartTotals,
    pub is_open: bool,
    /// Toast to show for the command that produced this response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

impl From<&SessionStore> for CartResponse {
    fn from(session: &SessionStore) -> Self {
        CartResponse {
            items: session.cart().to_vec(),
            totals: session.totals(),
            is_open: session.is_cart_open(),
            notice: None,
        }
    }
}

/// Rejects requested quantities above [`MAX_LINE_QUANTITY`].
fn check_quantity_cap(quantity: i64) -> Result<(), ApiError> {
    if quantity > MAX_LINE_QUANTITY {
        return Err(ApiError::validation(format!(
            "Quantity must be at most {}",
            MAX_LINE_QUANTITY
        )));
    }
    Ok(())
}

impl CartResponse {
    fn with_notice(mut self, notice: Option<Notice>) -> Self {
        self.notice = notice;
        self
    }
}

/// Gets the current cart contents.
pub fn get_cart(session: &SessionState) -> CartResponse {
    debug!("get_cart command");
    session.with_session(|s| CartResponse::from(s))
}

/// Adds a catalog product to the cart.
///
/// ## Behavior
/// - Already in cart: quantity goes up by one per unit added
/// - Not in cart: appended with quantity 1, then incremented
/// - Price is frozen when the line is first created
/// - The cart drawer opens
///
/// ## Arguments
/// * `product_id` - Catalog id to add
/// * `quantity` - Units to add (default: 1, at most `MAX_LINE_QUANTITY`);
///   the product page sends more
pub fn add_to_cart(
    catalog: &CatalogState,
    session: &SessionState,
    product_id: &str,
    quantity: Option<i64>,
) -> Result<CartResponse, ApiError> {
    let quantity = quantity.unwrap_or(1);
    debug!(product_id = %product_id, quantity = %quantity, "add_to_cart command");

    if quantity < 1 {
        return Err(ApiError::validation("Quantity must be at least 1"));
    }
    check_quantity_cap(quantity)?;

    let product = catalog.catalog().require(product_id)?;

    Ok(session.with_session_mut(|s| {
        let notice = if quantity == 1 {
            Notice::cart_add(&product.name, s.add_to_cart(product))
        } else {
            s.add_many_to_cart(product, quantity);
            Notice::cart_add_many(&product.name, quantity)
        };
        CartResponse::from(&*s).with_notice(Some(notice))
    }))
}

/// Sets the quantity of a line.
///
/// ## Behavior
/// - Quantity <= 0: removes the line
/// - Quantity above `MAX_LINE_QUANTITY`: rejected, nothing changes
/// - Unknown id: nothing changes
pub fn update_cart_item(
    session: &SessionState,
    product_id: &str,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, quantity = %quantity, "update_cart_item command");

    check_quantity_cap(quantity)?;

    Ok(session.with_session_mut(|s| {
        let notice = match s.update_quantity(product_id, quantity) {
            QuantityUpdate::Removed(line) => Some(Notice::cart_remove(&line)),
            QuantityUpdate::Updated { .. } => None,
            QuantityUpdate::NotInCart => {
                debug!(product_id = %product_id, "update for product not in cart ignored");
                None
            }
        };
        CartResponse::from(&*s).with_notice(notice)
    }))
}

/// Removes a line from the cart. Unknown ids are a no-op.
pub fn remove_from_cart(session: &SessionState, product_id: &str) -> CartResponse {
    debug!(product_id = %product_id, "remove_from_cart command");

    session.with_session_mut(|s| {
        let notice = s.remove_from_cart(product_id).map(|line| Notice::cart_remove(&line));
        CartResponse::from(&*s).with_notice(notice)
    })
}

/// Empties the cart. The wishlist and drawer flag are untouched.
///
/// The "Cart cleared" notice is shown even when the cart was already empty.
pub fn clear_cart(session: &SessionState) -> CartResponse {
    debug!("clear_cart command");

    session.with_session_mut(|s| {
        let removed = s.clear_cart();
        debug!(removed, "cart cleared");
        CartResponse::from(&*s).with_notice(Some(Notice::cart_cleared()))
    })
}

/// Opens or closes the cart drawer.
pub fn toggle_cart(session: &SessionState) -> CartResponse {
    session.with_session_mut(|s| {
        let open = s.toggle_cart();
        debug!(open, "toggle_cart command");
        CartResponse::from(&*s)
    })
}
