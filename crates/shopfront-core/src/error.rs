//! # Error Types
//!
//! Domain errors for shopfront-core.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  shopfront-core (this file)                                             │
//! │  ├── CoreError         - catalog / checkout / tracking failures         │
//! │  ├── ValidationError   - one field that failed a rule                   │
//! │  └── ValidationErrors  - every failing field of one form                │
//! │                                                                         │
//! │  shopfront app                                                          │
//! │  └── ApiError          - what the rendering surface sees (serialized)   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → shell output            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The session store has no error type: all of its operations are total.

use std::fmt;

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Two catalog records share an id.
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(String),

    /// Checkout was attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// The order exists but belongs to a different email address.
    #[error("The email address does not match our records for order {order_number}")]
    EmailMismatch { order_number: String },

    /// Shipping or payment form failed validation.
    #[error("Checkout information is incomplete: {0}")]
    InvalidCheckout(ValidationErrors),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Name of the field this error refers to.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

/// All failures of a single form, in field order.
///
/// The checkout page highlights every bad field at once, so validators
/// collect instead of stopping at the first failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        ValidationErrors(Vec::new())
    }

    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    /// Records the error of a failed check; passing checks are ignored.
    pub fn check(&mut self, result: Result<(), ValidationError>) {
        if let Err(e) = result {
            self.0.push(e);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Names of the failing fields.
    pub fn fields(&self) -> Vec<&str> {
        self.0.iter().map(ValidationError::field).collect()
    }

    /// `Ok(())` when nothing failed.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", e)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationErrors> for CoreError {
    fn from(errors: ValidationErrors) -> Self {
        CoreError::InvalidCheckout(errors)
    }
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn required(field: &str) -> ValidationError {
        ValidationError::Required {
            field: field.to_string(),
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CoreError::ProductNotFound("42".to_string()).to_string(),
            "Product not found: 42"
        );
        assert_eq!(
            CoreError::EmailMismatch {
                order_number: "ORD-001".to_string()
            }
            .to_string(),
            "The email address does not match our records for order ORD-001"
        );
        assert_eq!(required("city").to_string(), "city is required");
    }

    #[test]
    fn test_validation_errors_collects_failures() {
        let mut errors = ValidationErrors::new();
        errors.check(Ok(()));
        errors.check(Err(required("first_name")));
        errors.push(required("zip_code"));

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.fields(), vec!["first_name", "zip_code"]);
        assert_eq!(
            errors.to_string(),
            "first_name is required; zip_code is required"
        );
        assert!(errors.into_result().is_err());
        assert!(ValidationErrors::new().into_result().is_ok());
    }

    #[test]
    fn test_conversions_into_core_error() {
        let core: CoreError = required("email").into();
        assert!(matches!(core, CoreError::Validation(_)));

        let mut errors = ValidationErrors::new();
        errors.push(required("email"));
        let core: CoreError = errors.into();
        assert!(matches!(core, CoreError::InvalidCheckout(ref e) if e.len() == 1));
    }
}
