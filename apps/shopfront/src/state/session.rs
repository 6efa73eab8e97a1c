//! # Session State
//!
//! Shares the shopper's [`SessionStore`] between command handlers.
//!
//! ## Thread Safety
//! The store is wrapped in `Arc<Mutex<T>>` because:
//! 1. Most commands modify the cart or wishlist
//! 2. Only one command should modify the session at a time
//! 3. Aggregates must be read against the same snapshot they summarize
//!
//! ## Session Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session State Operations                             │
//! │                                                                         │
//! │  Shell Line               Handler                 Store Change          │
//! │  ──────────               ───────                 ────────────          │
//! │                                                                         │
//! │  add 4 ──────────────────► add_to_cart() ───────► line qty +1, open    │
//! │                                                                         │
//! │  qty 4 3 ────────────────► update_quantity() ───► line qty = 3         │
//! │                                                                         │
//! │  remove 4 ───────────────► remove_from_cart() ──► line dropped         │
//! │                                                                         │
//! │  wish 4 ─────────────────► add_to_wishlist() ───► entry (set)          │
//! │                                                                         │
//! │  cart ───────────────────► get_cart() ──────────► (read only)          │
//! │                                                                         │
//! │  NOTE: Reads and writes both take the lock; none of them hold it        │
//! │        across an await point.                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use shopfront_core::SessionStore;
use tracing::warn;

/// Shell-managed session state.
///
/// ## Poisoning
/// A handler that panicked while holding the lock leaves the store in
/// whatever state its last completed operation produced. Every store
/// operation keeps the invariants on its own, so the guard is recovered
/// instead of taking the shell down.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    session: Arc<Mutex<SessionStore>>,
}

impl SessionState {
    /// Creates a new empty session.
    pub fn new() -> Self {
        SessionState::default()
    }

    /// Wraps an existing store, e.g. one restored by a test.
    pub fn from_store(store: SessionStore) -> Self {
        SessionState {
            session: Arc::new(Mutex::new(store)),
        }
    }

    /// Executes a function with read access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = session_state.with_session(|s| s.totals());
    /// ```
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&SessionStore) -> R,
    {
        let session = self.lock();
        f(&session)
    }

    /// Executes a function with write access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// session_state.with_session_mut(|s| s.add_to_cart(&product));
    /// ```
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut SessionStore) -> R,
    {
        let mut session = self.lock();
        f(&mut session)
    }

    fn lock(&self) -> MutexGuard<'_, SessionStore> {
        self.session.lock().unwrap_or_else(|poisoned| {
            warn!("session lock poisoned, recovering");
            PoisonError::into_inner(poisoned)
        })
    }
}
