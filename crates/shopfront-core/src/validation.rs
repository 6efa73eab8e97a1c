//! # Validation Module
//!
//! Field validators for catalog records, search input and checkout forms.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Layer 1: Rendering surface   - required markers, input types          │
//! │  Layer 2: THIS MODULE         - the rules every caller gets            │
//! │  Layer 3: (none)              - all business rules are client-trusted  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ```rust
//! use shopfront_core::validation::{validate_email, validate_required};
//!
//! assert!(validate_required("city", "Dhaka").is_ok());
//! assert!(validate_required("city", "   ").is_err());
//! assert!(validate_email("email", "john@example.com").is_ok());
//! ```

use crate::error::ValidationError;
use crate::types::Product;
use crate::MAX_SEARCH_QUERY_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Fails when `value` is empty after trimming.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Required, plus the shape a browser `type="email"` input enforces:
/// one `@` with a non-empty local part and a dotted domain.
pub fn validate_email(field: &str, value: &str) -> ValidationResult<()> {
    validate_required(field, value)?;

    let value = value.trim();
    let invalid = || ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a valid email address".to_string(),
    };

    let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
    let domain_ok = domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains('@');
    if local.is_empty() || !domain_ok || value.contains(char::is_whitespace) {
        return Err(invalid());
    }

    Ok(())
}

/// Trims a search query; empty is allowed and means "everything".
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Catalog Validators
// =============================================================================

/// Checks a catalog record before it is served to the store.
///
/// ## Rules
/// - `id` and `name` are required
/// - prices are non-negative
/// - `rating`, when present, lies within 0–5
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_required("id", &product.id)?;
    validate_required("name", &product.name)?;

    if product.price_cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    if matches!(product.old_price_cents, Some(old) if old < 0) {
        return Err(ValidationError::OutOfRange {
            field: "old_price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    if let Some(rating) = product.rating {
        if !(0.0..=5.0).contains(&rating) {
            return Err(ValidationError::OutOfRange {
                field: "rating".to_string(),
                min: 0,
                max: 5,
            });
        }
    }

    Ok(())
}
