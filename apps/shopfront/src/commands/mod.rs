//! # Command Handlers
//!
//! One function per storefront action. The shell parses a line, picks the
//! handler and serializes whatever it returns.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── catalog.rs   ◄─── Home, shop listing, search, product page
//! ├── cart.rs      ◄─── Cart manipulation and drawer toggle
//! ├── wishlist.rs  ◄─── Wishlist add/remove
//! ├── checkout.rs  ◄─── Order summary and placement
//! ├── tracking.rs  ◄─── Order lookup
//! └── config.rs    ◄─── Configuration retrieval
//! ```
//!
//! ## State Injection
//! Each handler declares only the state it needs:
//! ```rust,ignore
//! // Only needs the catalog
//! fn search_products(catalog: &CatalogState, query: &str)
//!
//! // Only needs the session
//! fn get_cart(session: &SessionState)
//!
//! // Needs both
//! fn add_to_cart(catalog: &CatalogState, session: &SessionState, ...)
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod tracking;
pub mod wishlist;
