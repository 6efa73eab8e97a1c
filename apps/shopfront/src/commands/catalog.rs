//! # Catalog Commands
//!
//! Handlers for the home, shop, search and product pages.
//!
//! ## Search Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product Search Flow                                  │
//! │                                                                         │
//! │  search led lights                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_search_query: trim, max 100 chars                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  lowercase substring over name / description / category                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SearchResponse { query, count, results }                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::{CatalogState, SessionState};
use shopfront_core::{Category, Product, SortOrder, RELATED_PRODUCTS_LIMIT};

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SearchResponse {
    pub query: String,
    pub count: usize,
    pub results: Vec<Product>,
}

/// Everything the product page needs in one round trip.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductDetailResponse {
    pub product: Product,
    /// Whole percent saved against the old price, if any.
    pub discount_percent: Option<u32>,
    /// Units of this product already in the cart.
    pub in_cart: i64,
    pub in_wishlist: bool,
    pub related: Vec<Product>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct HomeResponse {
    pub featured: Vec<Product>,
    pub new_arrivals: Vec<Product>,
    pub on_sale: Vec<Product>,
    pub categories: Vec<Category>,
}

fn owned(products: Vec<&Product>) -> Vec<Product> {
    products.into_iter().cloned().collect()
}

/// Shop page listing.
///
/// ## Arguments
/// * `category` - Exact category id; `None` lists everything
/// * `sort` - `default`, `price-low`, `price-high` or `name`
pub fn list_products(
    catalog: &CatalogState,
    category: Option<&str>,
    sort: Option<&str>,
) -> Result<Vec<Product>, ApiError> {
    debug!(category = ?category, sort = ?sort, "list_products command");

    let sort = match sort {
        Some(raw) => SortOrder::parse(raw)
            .ok_or_else(|| ApiError::validation(format!("Unknown sort order: {}", raw)))?,
        None => SortOrder::Default,
    };

    Ok(owned(catalog.catalog().browse(category, sort)))
}

pub fn search_products(catalog: &CatalogState, query: &str) -> Result<SearchResponse, ApiError> {
    let start = Instant::now();
    debug!(query = %query, "search_products command");

    let results = owned(catalog.catalog().search(query)?);

    info!(
        query = %query,
        results = results.len(),
        elapsed_us = start.elapsed().as_micros() as u64,
        "Product search completed"
    );

    Ok(SearchResponse {
        query: query.trim().to_string(),
        count: results.len(),
        results,
    })
}

/// Product page: the product, its discount, session flags and up to four
/// related products.
pub fn get_product(
    catalog: &CatalogState,
    session: &SessionState,
    product_id: &str,
) -> Result<ProductDetailResponse, ApiError> {
    debug!(product_id = %product_id, "get_product command");

    let catalog = catalog.catalog();
    let product = catalog.require(product_id)?;
    let (in_cart, in_wishlist) = session.with_session(|s| {
        (
            s.cart_line(product_id).map_or(0, |line| line.quantity),
            s.is_in_wishlist(product_id),
        )
    });

    Ok(ProductDetailResponse {
        product: product.clone(),
        discount_percent: product.discount_percent(),
        in_cart,
        in_wishlist,
        related: owned(catalog.related(product_id, RELATED_PRODUCTS_LIMIT)),
    })
}

pub fn get_categories(catalog: &CatalogState) -> Vec<Category> {
    debug!("get_categories command");
    catalog.catalog().categories().to_vec()
}

pub fn get_home(catalog: &CatalogState) -> HomeResponse {
    debug!("get_home command");
    let catalog = catalog.catalog();

    HomeResponse {
        featured: owned(catalog.featured()),
        new_arrivals: owned(catalog.new_arrivals()),
        on_sale: owned(catalog.on_sale()),
        categories: catalog.categories().to_vec(),
    }
}
