//! # Store Error Types
//!
//! Error types for machine state operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Poisoned lock / bad write / bad seed                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module)                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  EngineError::Store (cafemat-engine)                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError INTERNAL_FAILURE (apps/cafemat), details only in the log     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use cafemat_core::ValidationError;
use thiserror::Error;

/// Machine state errors.
///
/// None of these are business outcomes. A customer asking for an unknown
/// item gets an `OrderError`; a `StoreError` means the engine or the seed
/// did something the store does not allow.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not present in the store.
    ///
    /// ## When This Occurs
    /// - Setting the stock of an item that was never seeded
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A thread panicked while holding the machine lock.
    #[error("Machine state lock poisoned during {operation}")]
    LockPoisoned { operation: &'static str },

    /// Seed data failed validation.
    #[error("Invalid seed data: {0}")]
    InvalidSeed(#[from] ValidationError),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
