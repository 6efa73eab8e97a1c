//! # Catalog State
//!
//! The product catalog is loaded once at start-up and never changes, so
//! handlers share it through a plain `Arc` with no lock.

use std::sync::Arc;

use shopfront_core::Catalog;

#[derive(Debug, Clone)]
pub struct CatalogState {
    catalog: Arc<Catalog>,
}

impl CatalogState {
    pub fn new(catalog: Catalog) -> Self {
        CatalogState {
            catalog: Arc::new(catalog),
        }
    }

    /// The built-in demo catalog.
    pub fn demo() -> Self {
        CatalogState::new(Catalog::demo())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::demo()
    }
}
