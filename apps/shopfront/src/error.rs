//! # API Error Type
//!
//! Unified error type for shell commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Shopfront                              │
//! │                                                                         │
//! │  stdin                       Rust Backend                               │
//! │  ─────                       ────────────                               │
//! │                                                                         │
//! │  track ORD-009 a@b.com                                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Handler                                                 │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Parse Error? ──── ParseError::UnknownCommand ─────┐             │  │
//! │  │         │                                          │             │  │
//! │  │         ▼                                          ▼             │  │
//! │  │  Domain Error? ─── CoreError::OrderNotFound ───── ApiError ─────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ───────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  stdout: {"ok":false,"error":{"code":"NOT_FOUND",                       │
//! │           "message":"Order not found: ORD-009"}}                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use shopfront_core::CoreError;
use ts_rs::TS;

/// API error returned from shell commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "Checkout information is incomplete: email is required",
///   "fields": ["email"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Form fields that failed validation, in form order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ErrorCode {
    /// Product or order not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Cart operation not possible (e.g. checkout of an empty cart)
    CartError,

    /// Business rule rejected the request (422)
    BusinessLogic,

    /// Internal error (500)
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Creates a cart error.
    pub fn cart(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::CartError, message)
    }

    fn with_fields(mut self, fields: Vec<String>) -> Self {
        self.fields = fields;
        self
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::OrderNotFound(id) => ApiError::not_found("Order", &id),
            CoreError::EmailMismatch { .. } => ApiError::new(
                ErrorCode::BusinessLogic,
                "The email address does not match our records for this order.",
            ),
            CoreError::EmptyCart => ApiError::cart("Your cart is empty"),
            CoreError::DuplicateProduct(id) => {
                tracing::error!(product_id = %id, "catalog contains a duplicate product");
                ApiError::internal("Catalog is inconsistent")
            }
            CoreError::InvalidCheckout(errors) => {
                let fields = errors.fields().into_iter().map(str::to_string).collect();
                ApiError::validation(format!("Checkout information is incomplete: {}", errors))
                    .with_fields(fields)
            }
            CoreError::Validation(e) => {
                let field = e.field().to_string();
                ApiError::validation(e.to_string()).with_fields(vec![field])
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
