//! # Application State
//!
//! State types shared by the shell's command handlers.
//!
//! ## Multiple Focused State Types
//! Each concern gets its own type so a handler takes only what it needs:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      Shell                                      │   │
//! │  │  owns one of each, hands out references per command             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │       ┌───────────────┬──────┴────────┬─────────────────┐              │
//! │       ▼               ▼               ▼                 ▼              │
//! │  ┌────────────┐ ┌────────────┐ ┌──────────────┐ ┌──────────────┐       │
//! │  │SessionState│ │CatalogState│ │OrderBookState│ │ ConfigState  │       │
//! │  │            │ │            │ │              │ │              │       │
//! │  │ Arc<Mutex< │ │  Arc<      │ │  Arc<RwLock< │ │ store_name   │       │
//! │  │  Session   │ │   Catalog> │ │   OrderBook  │ │ tax_rate     │       │
//! │  │  Store>>   │ │            │ │  >>          │ │ delay        │       │
//! │  └────────────┘ └────────────┘ └──────────────┘ └──────────────┘       │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • SessionState: Arc<Mutex<T>>, every command mutates or reads fast    │
//! │  • CatalogState: read-only after start-up                              │
//! │  • OrderBookState: many lookups, rare inserts                          │
//! │  • ConfigState: read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod catalog;
mod config;
mod orders;
mod session;

pub use catalog::CatalogState;
pub use config::ConfigState;
pub use orders::OrderBookState;
pub use session::SessionState;
