//! # Catalog
//!
//! Read-only product and category data plus the shop page queries.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Page                Query                     Rule                     │
//! │  ────                ─────                     ────                     │
//! │  Search results  ──► search("led")        ──► name/description/category │
//! │                                                contains, ignoring case  │
//! │  Shop            ──► browse(cat, sort)    ──► exact category, then sort │
//! │  Home / featured ──► featured(), new_arrivals(), on_sale()              │
//! │  Product page    ──► product(id), related(id, 4)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Search is a linear scan; the catalog is a few dozen records.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::{Category, Product};
use crate::validation::{validate_product, validate_search_query};

/// Sort options of the shop page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SortOrder {
    /// Catalog order.
    #[default]
    Default,
    PriceLow,
    PriceHigh,
    Name,
}

impl SortOrder {
    /// Parses the shop page's `sort` parameter (`price-low`, `price_low`, ...).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "" | "default" | "featured" => Some(SortOrder::Default),
            "price_low" => Some(SortOrder::PriceLow),
            "price_high" => Some(SortOrder::PriceHigh),
            "name" => Some(SortOrder::Name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<Category>,
}

impl Catalog {
    /// Builds a catalog, rejecting invalid records and duplicate ids.
    pub fn new(products: Vec<Product>, categories: Vec<Category>) -> CoreResult<Self> {
        let mut seen = HashSet::new();
        for product in &products {
            validate_product(product)?;
            if !seen.insert(product.id.as_str()) {
                return Err(CoreError::DuplicateProduct(product.id.clone()));
            }
        }

        Ok(Catalog {
            products,
            categories,
        })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Like [`product`](Self::product) but with a typed error.
    pub fn require(&self, id: &str) -> CoreResult<&Product> {
        self.product(id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }

    /// Case-insensitive substring match on name, description or category.
    ///
    /// An empty (or blank) query matches everything.
    ///
    /// ```rust
    /// use shopfront_core::catalog::Catalog;
    ///
    /// let catalog = Catalog::demo();
    /// let hits = catalog.search("LIGHTS").unwrap();
    /// assert!(hits.iter().any(|p| p.name == "LED String Lights"));
    /// ```
    pub fn search(&self, query: &str) -> CoreResult<Vec<&Product>> {
        let needle = validate_search_query(query)?.to_lowercase();

        Ok(self
            .products
            .iter()
            .filter(|p| {
                needle.is_empty()
                    || p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
                    || p.category.to_lowercase().contains(&needle)
            })
            .collect())
    }

    /// Shop page listing: optional exact category filter, then sort.
    pub fn browse(&self, category: Option<&str>, sort: SortOrder) -> Vec<&Product> {
        let mut listed: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| category.map_or(true, |c| p.category == c))
            .collect();

        // Stable sorts: ties keep catalog order.
        match sort {
            SortOrder::Default => {}
            SortOrder::PriceLow => listed.sort_by_key(|p| p.price_cents),
            SortOrder::PriceHigh => listed.sort_by(|a, b| b.price_cents.cmp(&a.price_cents)),
            SortOrder::Name => listed.sort_by_key(|p| p.name.to_lowercase()),
        }

        listed
    }

    pub fn featured(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.featured).collect()
    }

    pub fn new_arrivals(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_new).collect()
    }

    pub fn on_sale(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.sale).collect()
    }

    /// Other products in the same category, catalog order, at most `limit`.
    pub fn related(&self, id: &str, limit: usize) -> Vec<&Product> {
        let Some(product) = self.product(id) else {
            return Vec::new();
        };

        self.products
            .iter()
            .filter(|p| p.category == product.category && p.id != product.id)
            .take(limit)
            .collect()
    }

    /// The storefront's built-in demo catalog.
    pub fn demo() -> Self {
        Catalog {
            products: demo_products(),
            categories: demo_categories(),
        }
    }
}

// =============================================================================
// Demo Data
// =============================================================================

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    description: &str,
    price_cents: i64,
    old_price_cents: Option<i64>,
    image: &str,
    category: &str,
    rating: f32,
    review_count: u32,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price_cents,
        old_price_cents,
        image: image.to_string(),
        category: category.to_string(),
        featured: false,
        is_new: false,
        sale: false,
        rating: Some(rating),
        review_count: Some(review_count),
    }
}

fn demo_products() -> Vec<Product> {
    vec![
        Product {
            featured: true,
            is_new: true,
            ..product(
                "1",
                "Wireless Headphones",
                "High-quality wireless headphones with noise cancellation",
                12_999,
                Some(15_999),
                "https://images.unsplash.com/photo-1572569511254-d8f925fe2cbb",
                "electronics",
                4.5,
                120,
            )
        },
        Product {
            sale: true,
            ..product(
                "2",
                "Smartphone Stand",
                "Adjustable smartphone stand for desk or bedside",
                2_499,
                None,
                "https://images.unsplash.com/photo-1526374965328-7f61d4dc18c5",
                "electronics",
                4.2,
                85,
            )
        },
        Product {
            featured: true,
            ..product(
                "3",
                "Digital Drawing Tablet",
                "Professional grade drawing tablet for digital artists",
                19_999,
                Some(24_999),
                "https://images.unsplash.com/photo-1579586337278-3befd40fd17a",
                "digital",
                4.8,
                210,
            )
        },
        product(
            "4",
            "LED String Lights",
            "Decorative LED string lights for home decor",
            1_999,
            None,
            "https://images.unsplash.com/photo-1558002038-1055e2e095a1",
            "lights",
            4.7,
            95,
        ),
        Product {
            featured: true,
            ..product(
                "5",
                "Handcrafted Wooden Box",
                "Beautifully crafted wooden storage box with intricate designs",
                4_999,
                None,
                "https://images.unsplash.com/photo-1602143407151-7111542de6e8",
                "handmade",
                4.9,
                42,
            )
        },
        product(
            "6",
            "Classic Novel Collection",
            "Set of 5 classic novels in hardcover edition",
            7_999,
            None,
            "https://images.unsplash.com/photo-1544947950-fa07a98d237f",
            "books",
            4.6,
            78,
        ),
        Product {
            is_new: true,
            ..product(
                "7",
                "Smart Health Monitor",
                "Track your vital health metrics with this smart device",
                12_999,
                Some(14_999),
                "https://images.unsplash.com/photo-1576678927484-cc907957088c",
                "health",
                4.3,
                64,
            )
        },
        Product {
            sale: true,
            ..product(
                "8",
                "Bluetooth Speaker",
                "Portable bluetooth speaker with 24 hour battery life",
                5_999,
                None,
                "https://images.unsplash.com/photo-1608043152269-423dbba4e7e1",
                "electronics",
                4.4,
                112,
            )
        },
    ]
}

fn demo_categories() -> Vec<Category> {
    [
        ("books", "Books", "https://images.unsplash.com/photo-1544947950-fa07a98d237f", 120),
        ("digital", "Digital Products", "https://images.unsplash.com/photo-1565849904461-04a58ad377e0", 85),
        ("lights", "Decor LED Lights", "https://images.unsplash.com/photo-1558002038-1055e2e095a1", 95),
        ("handmade", "Handmade", "https://images.unsplash.com/photo-1602143407151-7111542de6e8", 70),
        ("electronics", "Electronic Devices", "https://images.unsplash.com/photo-1581091226825-a6a2a5aee158", 150),
        ("health", "Medicine & Health", "https://images.unsplash.com/photo-1576678927484-cc907957088c", 110),
    ]
    .into_iter()
    .map(|(id, name, image, product_count)| Category {
        id: id.to_string(),
        name: name.to_string(),
        image: image.to_string(),
        product_count,
    })
    .collect()
}
