//! # Engine Error Types
//!
//! Faults raised while running an order. Business rule failures are not
//! here: they are `OrderError`s and end up in the `OrderResult`.

use cafemat_core::Denomination;
use cafemat_store::StoreError;
use thiserror::Error;

/// Unexpected engine faults.
///
/// Callers log the detail and show a generic message; nothing in here is
/// meant for a customer.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The machine store failed (poisoned lock, write to an unknown item).
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Checked arithmetic overflowed.
    #[error("Arithmetic overflow while {context}")]
    Overflow { context: &'static str },

    /// A breakdown asked for more coins than the reserve holds.
    #[error("Coin reserve underflow for denomination {denomination}")]
    ReserveUnderflow { denomination: Denomination },
}

impl EngineError {
    pub(crate) fn overflow(context: &'static str) -> Self {
        EngineError::Overflow { context }
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
