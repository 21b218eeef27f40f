//! # Error Types
//!
//! Domain-specific error types for cafemat-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cafemat-core errors (this file)                                       │
//! │  ├── OrderError       - Business rule failures (recovered into result) │
//! │  ├── ValidationError  - Structural input failures                      │
//! │  └── ErrorCode        - Machine-readable code for every failure        │
//! │                                                                         │
//! │  cafemat-store errors                                                  │
//! │  └── StoreError       - Backing store faults                           │
//! │                                                                         │
//! │  cafemat-engine errors                                                 │
//! │  └── EngineError      - Unexpected faults (never business rules)       │
//! │                                                                         │
//! │  Flow: OrderError → OrderResult{success:false}                         │
//! │        EngineError → logged, sanitized → InternalFailure               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Error Code
// =============================================================================

/// Machine-readable code attached to every failed order result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ErrorCode {
    EmptyOrder,
    UnknownItem,
    InvalidQuantity,
    InsufficientStock,
    PriceUnavailable,
    InsufficientPayment,
    NegativeAmount,
    InsufficientChange,
    /// Unexpected fault while processing; the message is always generic.
    InternalFailure,
    /// Request rejected at the boundary before the core ran.
    InvalidRequest,
}

// =============================================================================
// Order Error
// =============================================================================

/// Business rule failures of the order pipeline.
///
/// None of these are faults: each one is turned into an
/// `OrderResult { success: false, message }` and handed back to the caller.
/// The `Display` text is the message the customer sees.
///
/// ## Where Each Variant Comes From
/// ```text
/// Validating          → EmptyOrder, UnknownItem, InvalidQuantity, InsufficientStock
/// Pricing             → PriceUnavailable
/// PaymentCheck        → InsufficientPayment
/// ChangeCalculation   → NegativeAmount, InsufficientChange
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// The basket has no lines.
    #[error("Order is empty")]
    EmptyOrder,

    /// A basket line names an item the machine does not stock.
    #[error("Coffee type '{item}' not found")]
    UnknownItem { item: String },

    /// A basket line asks for zero or a negative quantity.
    #[error("Invalid quantity for {item}")]
    InvalidQuantity { item: String, requested: i64 },

    /// A basket line asks for more than is in stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Basket: Latte × 12
    ///      │
    ///      ▼
    /// Stock check: available = 10
    ///      │
    ///      ▼
    /// "Insufficient stock for Latte. Available: 10, Requested: 12"
    /// ```
    #[error("Insufficient stock for {item}. Available: {available}, Requested: {requested}")]
    InsufficientStock {
        item: String,
        available: i64,
        requested: i64,
    },

    /// A stocked item has no price, or a zero price. Catalogue integrity
    /// problem, distinct from stock errors.
    #[error("Price information not available")]
    PriceUnavailable { items: Vec<String> },

    /// Tendered amount is below the total cost.
    #[error(
        "Insufficient payment. Required: {}, Provided: {}",
        .required.amount(),
        .provided.amount()
    )]
    InsufficientPayment { required: Money, provided: Money },

    /// Change was requested for a negative amount.
    #[error("Change amount cannot be negative")]
    NegativeAmount { amount: Money },

    /// The coin reserve cannot pay out this amount exactly.
    #[error(
        "Unable to provide exact change of {}. Insufficient coins in machine.",
        .amount.amount()
    )]
    InsufficientChange { amount: Money },
}

impl OrderError {
    /// Returns the machine-readable code for this failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            OrderError::EmptyOrder => ErrorCode::EmptyOrder,
            OrderError::UnknownItem { .. } => ErrorCode::UnknownItem,
            OrderError::InvalidQuantity { .. } => ErrorCode::InvalidQuantity,
            OrderError::InsufficientStock { .. } => ErrorCode::InsufficientStock,
            OrderError::PriceUnavailable { .. } => ErrorCode::PriceUnavailable,
            OrderError::InsufficientPayment { .. } => ErrorCode::InsufficientPayment,
            OrderError::NegativeAmount { .. } => ErrorCode::NegativeAmount,
            OrderError::InsufficientChange { .. } => ErrorCode::InsufficientChange,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for structural checks: request shape at the boundary and seed data
/// when the machine is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Duplicate value (e.g., the same denomination seeded twice).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Unit Tests
// =============================================================================
