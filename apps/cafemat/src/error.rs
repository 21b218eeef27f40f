//! # API Error Type
//!
//! Unified error type for the command layer.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Cafemat                                │
//! │                                                                         │
//! │  Malformed request ─────────────► ApiError INVALID_REQUEST             │
//! │                                   "Invalid request data"               │
//! │                                                                         │
//! │  OrderError (business rule) ────► OrderResult { success: false }       │
//! │                                   (never an ApiError)                  │
//! │                                                                         │
//! │  EngineError / StoreError ──────► tracing::error! with full detail     │
//! │                                   ApiError INTERNAL_FAILURE            │
//! │                                   "An error occurred while processing  │
//! │                                    your order"                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use cafemat_core::{ErrorCode, OrderResult};
use cafemat_engine::EngineError;
use serde::Serialize;
use thiserror::Error;

/// Message for requests rejected before the engine runs.
pub const INVALID_REQUEST_MESSAGE: &str = "Invalid request data";

/// Message for every internal fault.
pub const INTERNAL_FAILURE_MESSAGE: &str = "An error occurred while processing your order";

/// Error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INTERNAL_FAILURE",
///   "message": "An error occurred while processing your order"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Request failed structural validation.
    pub fn invalid_request() -> Self {
        ApiError::new(ErrorCode::InvalidRequest, INVALID_REQUEST_MESSAGE)
    }

    /// Unexpected fault; details belong in the log only.
    pub fn internal() -> Self {
        ApiError::new(ErrorCode::InternalFailure, INTERNAL_FAILURE_MESSAGE)
    }
}

/// Converts engine faults to API errors.
impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        // Log the actual error but return a generic message
        tracing::error!(error = %err, "Error processing order");
        ApiError::internal()
    }
}

impl From<ApiError> for OrderResult {
    fn from(err: ApiError) -> Self {
        OrderResult::failure(err.code, err.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cafemat_store::StoreError;

    #[test]
    fn test_engine_errors_are_sanitized() {
        let err: ApiError = EngineError::Store(StoreError::LockPoisoned { operation: "write" }).into();
        assert_eq!(err.code, ErrorCode::InternalFailure);
        assert_eq!(err.message, INTERNAL_FAILURE_MESSAGE);
        assert!(!err.message.contains("poisoned"));
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_value(ApiError::invalid_request()).unwrap();
        assert_eq!(json["code"], "INVALID_REQUEST");
        assert_eq!(json["message"], "Invalid request data");
    }

    #[test]
    fn test_into_order_result() {
        let result: OrderResult = ApiError::internal().into();
        assert!(!result.success);
        assert_eq!(result.error_code, Some(ErrorCode::InternalFailure));
        assert!(result.total_cost.is_zero());
    }
}
