//! # Wishlist Commands
//!
//! The wishlist is a set keyed by product id: adding a saved product again
//! only produces an informational notice.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::{CatalogState, SessionState};
use shopfront_core::{Notice, SessionStore, WishlistEntry};

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct WishlistResponse {
    pub items: Vec<WishlistEntry>,
    pub count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

impl From<&SessionStore> for WishlistResponse {
    fn from(session: &SessionStore) -> Self {
        WishlistResponse {
            items: session.wishlist().to_vec(),
            count: session.wishlist_count(),
            notice: None,
        }
    }
}

pub fn get_wishlist(session: &SessionState) -> WishlistResponse {
    debug!("get_wishlist command");
    session.with_session(|s| WishlistResponse::from(s))
}

/// Saves a catalog product for later.
pub fn add_to_wishlist(
    catalog: &CatalogState,
    session: &SessionState,
    product_id: &str,
) -> Result<WishlistResponse, ApiError> {
    debug!(product_id = %product_id, "add_to_wishlist command");

    let product = catalog.catalog().require(product_id)?;

    Ok(session.with_session_mut(|s| {
        let outcome = s.add_to_wishlist(product);
        let mut response = WishlistResponse::from(&*s);
        response.notice = Some(Notice::wishlist_add(&product.name, outcome));
        response
    }))
}

/// Drops a saved product. Unknown ids are a no-op.
pub fn remove_from_wishlist(session: &SessionState, product_id: &str) -> WishlistResponse {
    debug!(product_id = %product_id, "remove_from_wishlist command");

    session.with_session_mut(|s| {
        let removed = s.remove_from_wishlist(product_id);
        let mut response = WishlistResponse::from(&*s);
        response.notice = removed.map(|entry| Notice::wishlist_remove(&entry));
        response
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_core::NoticeLevel;

    #[test]
    fn test_add_is_idempotent() {
        let catalog = CatalogState::demo();
        let session = SessionState::new();

        let first = add_to_wishlist(&catalog, &session, "5").unwrap();
        assert_eq!(first.count, 1);
        assert_eq!(first.notice.map(|n| n.level), Some(NoticeLevel::Success));

        let second = add_to_wishlist(&catalog, &session, "5").unwrap();
        assert_eq!(second.count, 1);
        assert_eq!(
            second.notice.map(|n| n.message),
            Some("Handcrafted Wooden Box is already in your wishlist".to_string())
        );
    }

    #[test]
    fn test_wishlist_does_not_touch_cart() {
        let catalog = CatalogState::demo();
        let session = SessionState::new();

        add_to_wishlist(&catalog, &session, "3").unwrap();
        session.with_session(|s| {
            assert!(s.cart().is_empty());
            assert!(!s.is_cart_open());
        });
    }

    #[test]
    fn test_remove() {
        let catalog = CatalogState::demo();
        let session = SessionState::new();
        add_to_wishlist(&catalog, &session, "3").unwrap();
        add_to_wishlist(&catalog, &session, "6").unwrap();

        let missing = remove_from_wishlist(&session, "1");
        assert_eq!(missing.count, 2);
        assert!(missing.notice.is_none());

        let removed = remove_from_wishlist(&session, "3");
        assert_eq!(removed.count, 1);
        assert_eq!(removed.items[0].id(), "6");
        assert!(removed.notice.is_some());

        assert_eq!(get_wishlist(&session).count, 1);
    }

    #[test]
    fn test_unknown_product() {
        let catalog = CatalogState::demo();
        let session = SessionState::new();
        assert!(add_to_wishlist(&catalog, &session, "nope").is_err());
        assert_eq!(get_wishlist(&session).count, 0);
    }
}
