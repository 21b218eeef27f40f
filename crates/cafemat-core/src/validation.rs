//! # Validation Module
//!
//! Structural input checks for Cafemat.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Command boundary (apps/cafemat)                              │
//! │  ├── Request shape: basket present, payment present                    │
//! │  └── THIS MODULE: payment amount must be positive                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Seed loading (cafemat-store)                                 │
//! │  └── THIS MODULE: names, prices, stock levels, denominations           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Order pipeline (cafemat-engine)                              │
//! │  └── Business rules → OrderError, not ValidationError                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cafemat_core::validation::{validate_item_name, validate_payment_amount};
//! use cafemat_core::Money;
//!
//! validate_item_name("Latte").unwrap();
//! assert!(validate_payment_amount(Money::new(0)).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Denomination;
use crate::MAX_ITEM_NAME_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an item name for the catalogue.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most `MAX_ITEM_NAME_LEN` characters
///
/// ## Example
/// ```rust
/// use cafemat_core::validation::validate_item_name;
///
/// assert!(validate_item_name("Cappuccino").is_ok());
/// assert!(validate_item_name("   ").is_err());
/// ```
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "item name".to_string(),
        });
    }

    if name.chars().count() > MAX_ITEM_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "item name".to_string(),
            max: MAX_ITEM_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a tendered amount at the boundary.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_payment_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "payment amount".to_string(),
        });
    }

    Ok(())
}

/// Validates a catalogue price.
///
/// Zero is accepted here; the pipeline treats a zero price as missing price
/// information when an order asks for the item.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a stock level. Must be non-negative.
pub fn validate_stock_level(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a coin denomination. A zero-value coin can never make change.
pub fn validate_denomination(denomination: Denomination) -> ValidationResult<()> {
    if denomination == 0 {
        return Err(ValidationError::MustBePositive {
            field: "denomination".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
