//! # Domain Types
//!
//! Catalog and order types shared by every part of the storefront.
//!
//! ```text
//! ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐
//! │    Product      │   │    Category     │   │  TrackedOrder   │
//! │  ─────────────  │   │  ─────────────  │   │  ─────────────  │
//! │  id             │   │  id             │   │  id (ORD-001)   │
//! │  name           │   │  name           │   │  status         │
//! │  price_cents    │   │  product_count  │   │  tracking_hist. │
//! │  category       │   └─────────────────┘   └─────────────────┘
//! │  featured/new/  │
//! │  sale flags     │   TaxRate (bps)  PaymentMethod  OrderStatus
//! └─────────────────┘
//! ```
//!
//! Products are read-only for everything downstream of the catalog: the
//! session store clones them on add rather than referencing them.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate in basis points (1000 = 10%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a rate from a percentage such as `10.0` or `8.25`.
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round().max(0.0) as u32)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// The rate as a percentage, for display only.
    #[inline]
    pub fn percentage(&self) -> f64 {
        f64::from(self.0) / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    /// The storefront charges a flat 10% at checkout.
    fn default() -> Self {
        TaxRate::from_bps(crate::DEFAULT_TAX_RATE_BPS)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product as supplied by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique identifier.
    pub id: String,

    pub name: String,

    pub description: String,

    /// Current price in cents.
    pub price_cents: i64,

    /// Price before a markdown, shown struck through.
    #[serde(default)]
    pub old_price_cents: Option<i64>,

    /// Image URL.
    pub image: String,

    /// Category id. Not checked against the category list.
    pub category: String,

    #[serde(default)]
    pub featured: bool,

    /// "New arrival" badge.
    #[serde(default, rename = "new")]
    pub is_new: bool,

    #[serde(default)]
    pub sale: bool,

    /// Average rating, 0 to 5.
    #[serde(default)]
    pub rating: Option<f32>,

    #[serde(default)]
    pub review_count: Option<u32>,
}

impl Product {
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    #[inline]
    pub fn old_price(&self) -> Option<Money> {
        self.old_price_cents.map(Money::from_cents)
    }

    /// Percent off the old price, as shown on the product page ("19% OFF").
    pub fn discount_percent(&self) -> Option<u32> {
        self.old_price()
            .and_then(|old| self.price().discount_percent_from(old))
    }
}

// =============================================================================
// Category
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub image: String,
    /// Advertised product count shown on the category tile.
    pub product_count: u32,
}

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PaymentMethod {
    /// Credit or debit card; the only method that needs card details.
    #[default]
    Card,
    Paypal,
    CashOnDelivery,
}

// =============================================================================
// Order Tracking
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum OrderStatus {
    Processing,
    Shipped,
    Delivered,
}

/// One step in an order's tracking history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TrackingEvent {
    /// Human-readable step ("Order Placed", "In Transit", ...).
    pub status: String,
    /// Local timestamp, `YYYY-MM-DD HH:MM`.
    pub at: String,
    pub location: Option<String>,
}

/// An order as shown on the tracking page and the account order list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TrackedOrder {
    /// Order number, e.g. `ORD-001`.
    pub id: String,
    pub customer: String,
    pub email: String,
    /// Order date, `YYYY-MM-DD`.
    pub date: String,
    pub total: Money,
    pub status: OrderStatus,
    /// Item names only; tracking never needs prices.
    pub items: Vec<String>,
    pub estimated_delivery: Option<String>,
    pub tracking_history: Vec<TrackingEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headphones() -> Product {
        Product {
            id: "1".to_string(),
            name: "Wireless Headphones".to_string(),
            description: "Noise cancelling".to_string(),
            price_cents: 12_999,
            old_price_cents: Some(15_999),
            image: "https://example.com/h.jpg".to_string(),
            category: "electronics".to_string(),
            featured: true,
            is_new: true,
            sale: false,
            rating: Some(4.5),
            review_count: Some(120),
        }
    }

    #[test]
    fn test_tax_rate_from_percentage() {
        assert_eq!(TaxRate::from_percentage(10.0).bps(), 1000);
        assert_eq!(TaxRate::from_percentage(8.25).bps(), 825);
        assert_eq!(TaxRate::from_percentage(-3.0).bps(), 0);
        assert_eq!(TaxRate::default().bps(), 1000);
    }

    #[test]
    fn test_product_discount() {
        let product = headphones();
        assert_eq!(product.discount_percent(), Some(19));

        let full_price = Product {
            old_price_cents: None,
            ..headphones()
        };
        assert_eq!(full_price.discount_percent(), None);
    }

    #[test]
    fn test_product_json_uses_storefront_field_names() {
        let json = serde_json::to_value(headphones()).unwrap();
        assert_eq!(json["priceCents"], 12_999);
        assert_eq!(json["oldPriceCents"], 15_999);
        assert_eq!(json["new"], true);
        assert_eq!(json["reviewCount"], 120);
    }

    #[test]
    fn test_product_optional_flags_default_to_false() {
        let json = r#"{
            "id": "4",
            "name": "LED String Lights",
            "description": "Decorative LED string lights",
            "priceCents": 1999,
            "image": "https://example.com/l.jpg",
            "category": "lights"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(!product.featured && !product.is_new && !product.sale);
        assert_eq!(product.old_price_cents, None);
        assert_eq!(product.rating, None);
    }

    #[test]
    fn test_payment_method_serialization() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::CashOnDelivery).unwrap(),
            "\"cash_on_delivery\""
        );
        assert_eq!(PaymentMethod::default(), PaymentMethod::Card);
    }
}
