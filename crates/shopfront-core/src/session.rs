//! # Session Store
//!
//! The shopper's cart, wishlist and cart-panel visibility for one running
//! client.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Shopper Action           Store Operation           State Change        │
//! │  ──────────────           ───────────────           ────────────        │
//! │                                                                         │
//! │  "Add to cart" ─────────► add_to_cart() ──────────► qty += 1 or push,   │
//! │                                                     cart_open = true    │
//! │  +/- in cart drawer ────► update_quantity() ──────► qty = n (n<=0: drop)│
//! │  Trash icon ────────────► remove_from_cart() ─────► line dropped        │
//! │  Order placed ──────────► clear_cart() ───────────► cart emptied        │
//! │  Cart icon / close ─────► toggle_cart() ──────────► cart_open flipped   │
//! │  Heart icon ────────────► add_to_wishlist() ──────► push if absent      │
//! │  Remove from wishlist ──► remove_from_wishlist() ─► entry dropped       │
//! │                                                                         │
//! │  Aggregates (cart_total, cart_item_count, wishlist_count) are computed  │
//! │  from the current lines on every call; nothing is cached.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one cart line and one wishlist entry per product id
//! - Every stored quantity is > 0
//! - Lines hold a copy of the product taken when it was first added, so
//!   totals use the add-time price even if the catalog changes later
//! - Lines and entries keep insertion order
//!
//! ## Example
//! ```rust
//! use shopfront_core::session::{CartAdd, SessionStore};
//! # use shopfront_core::Product;
//! # let product = Product {
//! #     id: "1".into(), name: "Wireless Headphones".into(), description: String::new(),
//! #     price_cents: 1000, old_price_cents: None, image: String::new(),
//! #     category: "electronics".into(), featured: false, is_new: false, sale: false,
//! #     rating: None, review_count: None,
//! # };
//!
//! let mut session = SessionStore::new();
//! assert_eq!(session.add_to_cart(&product), CartAdd::Added);
//! assert_eq!(session.add_to_cart(&product), CartAdd::Incremented { quantity: 2 });
//! assert!(session.is_cart_open());
//! assert_eq!(session.cart_total().cents(), 2000);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::Product;

// =============================================================================
// Cart Line
// =============================================================================

/// One product in the cart with its quantity.
///
/// Serializes as the product's fields plus `quantity` and `addedAt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    /// Product as it was when first added (frozen).
    #[serde(flatten)]
    pub product: Product,

    /// Always > 0 while the line is in the cart.
    pub quantity: i64,

    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    fn new(product: &Product, quantity: i64) -> Self {
        CartLine {
            product: product.clone(),
            quantity,
            added_at: Utc::now(),
        }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.product.id
    }

    /// Frozen unit price.
    #[inline]
    pub fn unit_price(&self) -> Money {
        self.product.price()
    }

    /// Unit price × quantity (saturating).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Wishlist Entry
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct WishlistEntry {
    #[serde(flatten)]
    pub product: Product,

    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl WishlistEntry {
    #[inline]
    pub fn id(&self) -> &str {
        &self.product.id
    }
}

// =============================================================================
// Operation Outcomes
// =============================================================================

/// What [`SessionStore::add_to_cart`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CartAdd {
    /// A new line with quantity 1 was appended.
    Added,
    /// The existing line's quantity went up by one.
    Incremented { quantity: i64 },
}

/// What [`SessionStore::update_quantity`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum QuantityUpdate {
    /// The line now holds exactly `quantity`.
    Updated { quantity: i64 },
    /// The requested quantity was <= 0, so the line was dropped.
    Removed(CartLine),
    /// No line for that id; nothing changed.
    NotInCart,
}

/// What [`SessionStore::add_to_wishlist`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WishlistAdd {
    Added,
    /// An entry with the same id exists; nothing changed.
    AlreadyPresent,
}

impl WishlistAdd {
    #[inline]
    pub fn is_added(&self) -> bool {
        matches!(self, WishlistAdd::Added)
    }
}

// =============================================================================
// Session Store
// =============================================================================

/// Cart, wishlist and cart-panel state.
///
/// Construct one per client (or per test); nothing in the crate keeps a
/// global instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStore {
    cart: Vec<CartLine>,
    wishlist: Vec<WishlistEntry>,
    cart_open: bool,
}

impl SessionStore {
    /// An empty cart and wishlist with the cart panel closed.
    pub fn new() -> Self {
        SessionStore::default()
    }

    // -------------------------------------------------------------------------
    // Read access
    // -------------------------------------------------------------------------

    /// Cart lines in insertion order.
    pub fn cart(&self) -> &[CartLine] {
        &self.cart
    }

    /// Wishlist entries in insertion order.
    pub fn wishlist(&self) -> &[WishlistEntry] {
        &self.wishlist
    }

    pub fn is_cart_open(&self) -> bool {
        self.cart_open
    }

    pub fn cart_line(&self, id: &str) -> Option<&CartLine> {
        self.cart.iter().find(|line| line.id() == id)
    }

    pub fn is_in_wishlist(&self, id: &str) -> bool {
        self.wishlist.iter().any(|entry| entry.id() == id)
    }

    // -------------------------------------------------------------------------
    // Cart
    // -------------------------------------------------------------------------

    /// Adds one unit of `product`.
    ///
    /// ## Behavior
    /// - Product already in cart: its quantity goes up by one (saturating);
    ///   the stored snapshot is kept, not refreshed
    /// - Otherwise: a new line with quantity 1 is appended
    ///
    /// ## Post-condition
    /// The cart panel is open afterwards, whichever branch ran.
    pub fn add_to_cart(&mut self, product: &Product) -> CartAdd {
        self.add_units(product, 1)
    }

    /// Adds `quantity` units in one step, as the product page's quantity
    /// picker does. Same result as calling [`add_to_cart`](Self::add_to_cart)
    /// `quantity` times. Returns `None` when `quantity < 1` (nothing added,
    /// cart panel untouched).
    pub fn add_many_to_cart(&mut self, product: &Product, quantity: i64) -> Option<CartAdd> {
        if quantity < 1 {
            return None;
        }
        Some(self.add_units(product, quantity))
    }

    fn add_units(&mut self, product: &Product, quantity: i64) -> CartAdd {
        let outcome = match self.cart.iter_mut().find(|line| line.id() == product.id) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(quantity);
                CartAdd::Incremented {
                    quantity: line.quantity,
                }
            }
            None => {
                self.cart.push(CartLine::new(product, quantity));
                if quantity == 1 {
                    CartAdd::Added
                } else {
                    CartAdd::Incremented { quantity }
                }
            }
        };

        self.cart_open = true;
        outcome
    }

    /// Drops the line for `id`. Absent ids are a no-op.
    pub fn remove_from_cart(&mut self, id: &str) -> Option<CartLine> {
        let index = self.cart.iter().position(|line| line.id() == id)?;
        Some(self.cart.remove(index))
    }

    /// Replaces the quantity of the line for `id`.
    ///
    /// `quantity <= 0` behaves exactly like [`remove_from_cart`](Self::remove_from_cart).
    pub fn update_quantity(&mut self, id: &str, quantity: i64) -> QuantityUpdate {
        if quantity <= 0 {
            return match self.remove_from_cart(id) {
                Some(line) => QuantityUpdate::Removed(line),
                None => QuantityUpdate::NotInCart,
            };
        }

        match self.cart.iter_mut().find(|line| line.id() == id) {
            Some(line) => {
                line.quantity = quantity;
                QuantityUpdate::Updated { quantity }
            }
            None => QuantityUpdate::NotInCart,
        }
    }

    /// Empties the cart. Returns how many lines were dropped.
    pub fn clear_cart(&mut self) -> usize {
        let dropped = self.cart.len();
        self.cart.clear();
        dropped
    }

    /// Flips the cart panel and returns the new state. Contents are untouched.
    pub fn toggle_cart(&mut self) -> bool {
        self.cart_open = !self.cart_open;
        self.cart_open
    }

    // -------------------------------------------------------------------------
    // Wishlist
    // -------------------------------------------------------------------------

    /// Appends `product` unless an entry with its id already exists.
    pub fn add_to_wishlist(&mut self, product: &Product) -> WishlistAdd {
        if self.is_in_wishlist(&product.id) {
            return WishlistAdd::AlreadyPresent;
        }

        self.wishlist.push(WishlistEntry {
            product: product.clone(),
            added_at: Utc::now(),
        });
        WishlistAdd::Added
    }

    /// Drops the entry for `id`. Absent ids are a no-op.
    pub fn remove_from_wishlist(&mut self, id: &str) -> Option<WishlistEntry> {
        let index = self.wishlist.iter().position(|entry| entry.id() == id)?;
        Some(self.wishlist.remove(index))
    }

    // -------------------------------------------------------------------------
    // Aggregates
    // -------------------------------------------------------------------------

    /// Σ frozen price × quantity, saturating at `Money`'s bounds.
    pub fn cart_total(&self) -> Money {
        self.cart.iter().map(CartLine::line_total).sum()
    }

    /// Σ quantities (not the number of lines), saturating.
    pub fn cart_item_count(&self) -> i64 {
        self.cart
            .iter()
            .fold(0i64, |count, line| count.saturating_add(line.quantity))
    }

    pub fn wishlist_count(&self) -> usize {
        self.wishlist.len()
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }
}

/// Cart summary for the header badge and the drawer footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    /// Distinct products.
    pub line_count: usize,
    /// Units across all lines.
    pub item_count: i64,
    pub total: Money,
}

impl From<&SessionStore> for CartTotals {
    fn from(session: &SessionStore) -> Self {
        CartTotals {
            line_count: session.cart.len(),
            item_count: session.cart_item_count(),
            total: session.cart_total(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(id: &str, price_cents: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            description: String::new(),
            price_cents,
            old_price_cents: None,
            image: format!("https://images.example.com/{}.jpg", id),
            category: "electronics".to_string(),
            featured: false,
            is_new: false,
            sale: false,
            rating: None,
            review_count: None,
        }
    }

    #[test]
    fn test_new_session_is_empty_and_closed() {
        let session = SessionStore::new();
        assert!(session.cart().is_empty());
        assert!(session.wishlist().is_empty());
        assert!(!session.is_cart_open());
        assert_eq!(session.totals(), CartTotals {
            line_count: 0,
            item_count: 0,
            total: Money::zero(),
        });
    }

    #[test]
    fn test_add_same_product_twice_increments_single_line() {
        let mut session = SessionStore::new();
        let product = test_product("1", 999);

        assert_eq!(session.add_to_cart(&product), CartAdd::Added);
        assert_eq!(
            session.add_to_cart(&product),
            CartAdd::Incremented { quantity: 2 }
        );

        assert_eq!(session.cart().len(), 1);
        assert_eq!(session.cart()[0].quantity, 2);
    }

    #[test]
    fn test_add_opens_cart_even_after_toggle_closed_it() {
        let mut session = SessionStore::new();
        let product = test_product("1", 999);

        session.add_to_cart(&product);
        assert!(session.is_cart_open());
        assert!(!session.toggle_cart());

        session.add_to_cart(&product);
        assert!(session.is_cart_open());
    }

    #[test]
    fn test_toggle_never_changes_contents() {
        let mut session = SessionStore::new();
        session.add_to_cart(&test_product("1", 999));
        session.add_to_wishlist(&test_product("2", 500));
        let before = (session.cart().to_vec(), session.wishlist().to_vec());

        assert!(!session.toggle_cart());
        assert!(session.toggle_cart());

        assert_eq!(session.cart(), before.0.as_slice());
        assert_eq!(session.wishlist(), before.1.as_slice());
    }

    #[test]
    fn test_update_quantity_replaces_value() {
        let mut session = SessionStore::new();
        session.add_to_cart(&test_product("1", 1000));
        session.add_to_cart(&test_product("1", 1000));

        assert_eq!(
            session.update_quantity("1", 5),
            QuantityUpdate::Updated { quantity: 5 }
        );
        assert_eq!(session.cart_line("1").map(|l| l.quantity), Some(5));
    }

    #[test]
    fn test_update_quantity_zero_or_negative_removes_line() {
        for quantity in [0, -5] {
            let mut session = SessionStore::new();
            session.add_to_cart(&test_product("1", 1000));
            session.add_to_cart(&test_product("2", 1000));

            let outcome = session.update_quantity("1", quantity);
            assert!(matches!(outcome, QuantityUpdate::Removed(ref line) if line.id() == "1"));
            assert!(session.cart_line("1").is_none());
            assert_eq!(session.cart().len(), 1);
        }
    }

    #[test]
    fn test_update_quantity_matches_remove_from_cart() {
        let mut by_update = SessionStore::new();
        let mut by_remove = SessionStore::new();
        for session in [&mut by_update, &mut by_remove] {
            session.add_to_cart(&test_product("1", 1000));
            session.add_to_cart(&test_product("2", 2500));
        }

        by_update.update_quantity("1", 0);
        by_remove.remove_from_cart("1");

        let ids = |s: &SessionStore| s.cart().iter().map(|l| l.id().to_string()).collect::<Vec<_>>();
        assert_eq!(ids(&by_update), ids(&by_remove));
        assert_eq!(by_update.cart_total(), by_remove.cart_total());
    }

    #[test]
    fn test_missing_ids_are_noops() {
        let mut session = SessionStore::new();
        session.add_to_cart(&test_product("1", 1000));

        assert!(session.remove_from_cart("nope").is_none());
        assert_eq!(session.update_quantity("nope", 3), QuantityUpdate::NotInCart);
        assert_eq!(session.update_quantity("nope", 0), QuantityUpdate::NotInCart);
        assert!(session.remove_from_wishlist("nope").is_none());
        assert_eq!(session.cart_item_count(), 1);
    }

    #[test]
    fn test_item_count_sums_quantities() {
        let mut session = SessionStore::new();
        let a = test_product("a", 100);
        let b = test_product("b", 200);

        session.add_to_cart(&a);
        for _ in 0..3 {
            session.add_to_cart(&b);
        }

        assert_eq!(session.cart_item_count(), 4);
        assert_eq!(session.cart().len(), 2);
        assert_eq!(session.totals().line_count, 2);
    }

    #[test]
    fn test_total_uses_price_at_time_of_add() {
        let mut session = SessionStore::new();
        let mut product = test_product("1", 1000);

        session.add_to_cart(&product);
        session.add_to_cart(&product);

        // The catalog reprices the product after it was added.
        product.price_cents = 9999;
        product.name = "Renamed".to_string();
        session.add_to_cart(&product);

        assert_eq!(session.cart_total().cents(), 3000);
        assert_eq!(session.cart()[0].product.name, "Product 1");
    }

    #[test]
    fn test_clear_cart_resets_aggregates() {
        let mut session = SessionStore::new();
        session.add_to_cart(&test_product("1", 1000));
        session.add_to_cart(&test_product("2", 1500));
        session.add_to_wishlist(&test_product("3", 700));

        assert_eq!(session.clear_cart(), 2);
        assert_eq!(session.cart_item_count(), 0);
        assert!(session.cart_total().is_zero());
        // Wishlist is a separate collection.
        assert_eq!(session.wishlist_count(), 1);
        assert_eq!(session.clear_cart(), 0);
    }

    #[test]
    fn test_cart_keeps_insertion_order() {
        let mut session = SessionStore::new();
        for id in ["c", "a", "b"] {
            session.add_to_cart(&test_product(id, 100));
        }
        session.add_to_cart(&test_product("a", 100));

        let ids: Vec<&str> = session.cart().iter().map(CartLine::id).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_wishlist_has_set_semantics() {
        let mut session = SessionStore::new();
        let product = test_product("1", 1000);

        assert_eq!(session.add_to_wishlist(&product), WishlistAdd::Added);
        assert_eq!(session.add_to_wishlist(&product), WishlistAdd::AlreadyPresent);
        assert_eq!(session.wishlist_count(), 1);
        assert!(session.is_in_wishlist("1"));

        let removed = session.remove_from_wishlist("1");
        assert_eq!(removed.map(|e| e.product.id), Some("1".to_string()));
        assert_eq!(session.wishlist_count(), 0);
        assert!(!session.is_cart_open());
    }

    #[test]
    fn test_add_many_to_cart() {
        let mut session = SessionStore::new();
        let product = test_product("1", 250);

        assert_eq!(session.add_many_to_cart(&product, 0), None);
        assert!(!session.is_cart_open());
        assert!(session.cart().is_empty());

        assert_eq!(
            session.add_many_to_cart(&product, 3),
            Some(CartAdd::Incremented { quantity: 3 })
        );
        assert_eq!(session.cart_item_count(), 3);
        assert_eq!(session.cart_total().cents(), 750);
    }

    #[test]
    fn test_add_many_matches_repeated_adds() {
        let product = test_product("1", 250);
        let mut at_once = SessionStore::new();
        let mut one_by_one = SessionStore::new();

        at_once.add_to_cart(&product);
        at_once.add_many_to_cart(&product, 4);
        for _ in 0..5 {
            one_by_one.add_to_cart(&product);
        }

        assert_eq!(at_once.cart_item_count(), one_by_one.cart_item_count());
        assert_eq!(at_once.cart_total(), one_by_one.cart_total());
        assert_eq!(at_once.cart().len(), 1);
        assert!(at_once.is_cart_open());
    }

    #[test]
    fn test_add_many_with_huge_quantity_is_single_step() {
        let mut session = SessionStore::new();
        let product = test_product("1", 999);

        assert_eq!(
            session.add_many_to_cart(&product, i64::MAX),
            Some(CartAdd::Incremented { quantity: i64::MAX })
        );
        assert_eq!(
            session.add_many_to_cart(&product, i64::MAX),
            Some(CartAdd::Incremented { quantity: i64::MAX })
        );
        assert_eq!(session.cart().len(), 1);
    }

    #[test]
    fn test_extreme_quantities_saturate() {
        let mut session = SessionStore::new();
        let product = test_product("1", 999);
        session.add_to_cart(&product);

        session.update_quantity("1", i64::MAX / 100);
        assert_eq!(session.cart_total().cents(), i64::MAX);

        session.update_quantity("1", i64::MAX);
        assert_eq!(
            session.add_to_cart(&product),
            CartAdd::Incremented { quantity: i64::MAX }
        );

        session.add_to_cart(&test_product("2", 500));
        assert_eq!(session.cart_item_count(), i64::MAX);
        assert_eq!(session.cart_total().cents(), i64::MAX);
        assert_eq!(session.totals().item_count, i64::MAX);
    }

    #[test]
    fn test_worked_example_scenario() {
        let mut session = SessionStore::new();
        let product = test_product("1", 1000);

        session.add_to_cart(&product);
        assert_eq!(session.cart_item_count(), 1);
        assert_eq!(session.cart_total().cents(), 1000);
        assert!(session.is_cart_open());

        session.add_to_cart(&product);
        assert_eq!(session.cart()[0].quantity, 2);
        assert_eq!(session.cart_total().cents(), 2000);

        session.update_quantity("1", 5);
        assert_eq!(session.cart_total().cents(), 5000);

        session.remove_from_cart("1");
        assert!(session.cart().is_empty());
        assert!(session.cart_total().is_zero());
    }

    #[test]
    fn test_cart_line_serializes_flat() {
        let mut session = SessionStore::new();
        session.add_to_cart(&test_product("1", 1000));

        let json = serde_json::to_value(&session.cart()[0]).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["priceCents"], 1000);
        assert_eq!(json["quantity"], 1);
        assert!(json.get("addedAt").is_some());
        assert!(json.get("product").is_none());
    }
}
