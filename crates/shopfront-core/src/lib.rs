//! # shopfront-core: Storefront Session Logic
//!
//! Everything the storefront knows about a shopper's session lives here:
//! cart, wishlist, the cart drawer flag, the product catalog, checkout
//! and order tracking. No I/O happens in this crate.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shopfront Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    shopfront shell (apps/shopfront)             │   │
//! │  │   stdin line ──► Command ──► handler ──► JSON response          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ with_session / with_session_mut        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shopfront-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  session  │  │  catalog  │  │ checkout  │  │ tracking  │  │   │
//! │  │   │   cart    │  │  search   │  │  summary  │  │ OrderBook │  │   │
//! │  │   │ wishlist  │  │   sort    │  │  place    │  │  lookup   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   types   │  │validation │  │  notice   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK WAITS • NO GLOBAL STATE                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`session`] - The session store: cart lines, wishlist, cart-open flag
//! - [`catalog`] - Product lookup, search and category browsing
//! - [`checkout`] - Shipping/payment validation and order placement
//! - [`tracking`] - Order lookup by number and email
//! - [`notice`] - Toast messages for store outcomes
//! - [`money`] - Money type with integer arithmetic
//! - [`types`] - Product, Category, TaxRate and order types
//! - [`error`] - Domain error types
//! - [`validation`] - Input checks
//!
//! ## Example Usage
//!
//! ```rust
//! use shopfront_core::catalog::Catalog;
//! use shopfront_core::session::SessionStore;
//!
//! let catalog = Catalog::demo();
//! let mut session = SessionStore::new();
//!
//! let lights = catalog.require("4").unwrap();
//! session.add_to_cart(lights);
//! session.add_to_cart(lights);
//!
//! assert_eq!(session.cart_item_count(), 2);
//! assert_eq!(session.cart_total().cents(), 3998);
//! assert!(session.is_cart_open());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod checkout;
pub mod error;
pub mod money;
pub mod notice;
pub mod session;
pub mod tracking;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{Catalog, SortOrder};
pub use checkout::{CheckoutRequest, OrderSummary, PlacedOrder};
pub use error::{CoreError, CoreResult, ValidationError, ValidationErrors};
pub use money::Money;
pub use notice::{Notice, NoticeLevel};
pub use session::{CartAdd, CartLine, CartTotals, QuantityUpdate, SessionStore, WishlistAdd, WishlistEntry};
pub use tracking::OrderBook;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Tax applied to the order summary: 10%.
pub const DEFAULT_TAX_RATE_BPS: u32 = 1000;

/// Most units of one product a single cart command may request.
pub const MAX_LINE_QUANTITY: i64 = 999;

/// Longest search query accepted, in characters.
pub const MAX_SEARCH_QUERY_LEN: usize = 100;

/// How many "you may also like" products a product page shows.
pub const RELATED_PRODUCTS_LIMIT: usize = 4;
