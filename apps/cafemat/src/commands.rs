//! # Commands
//!
//! The four machine operations as the outside world calls them.
//!
//! ## Commands
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  get_inventory         → { coffeeInventory: { name: qty } }            │
//! │  get_prices            → { coffeePrices: { name: price } }             │
//! │  get_available_change  → { availableChange: { denom: count } }         │
//! │  place_order(request)  → OrderResult (success message decorated)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use cafemat_core::validation::validate_payment_amount;
use cafemat_core::{
    ChangeBreakdown, CoinReserve, ItemCatalog, ItemStock, Money, OrderBasket, OrderResult, Payment,
};
use cafemat_engine::VendingMachine;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::ApiError;

// =============================================================================
// DTOs
// =============================================================================

/// Incoming order.
///
/// ```json
/// { "order": { "Latte": 2 }, "payment": { "totalAmount": 3000, "coins": [], "bills": [2000, 1000] } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequestDto {
    #[serde(default)]
    pub order: Option<OrderBasket>,

    #[serde(default)]
    pub payment: Option<Payment>,
}

impl OrderRequestDto {
    /// Structural checks: both parts present, positive tendered amount.
    ///
    /// An empty basket passes here; the engine reports it as `EMPTY_ORDER`.
    pub fn validate(&self) -> Result<(&OrderBasket, &Payment), ApiError> {
        let order = self.order.as_ref().ok_or_else(ApiError::invalid_request)?;
        let payment = self.payment.as_ref().ok_or_else(ApiError::invalid_request)?;
        validate_payment_amount(payment.total_amount).map_err(|err| {
            debug!(%err, "Payment amount rejected");
            ApiError::invalid_request()
        })?;
        Ok((order, payment))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryResponse {
    pub coffee_inventory: ItemStock,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceListResponse {
    pub coffee_prices: ItemCatalog,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeResponse {
    pub available_change: CoinReserve,
}

// =============================================================================
// Success Message
// =============================================================================

/// Customer-facing text for a committed order.
///
/// ```text
/// change > 0: "Order successful! Your change is 130 colones. Breakdown: 1 coin(s) of 100, 1 coin(s) of 25, 1 coin(s) of 5"
/// change = 0: "Order successful! Exact payment received."
/// ```
pub fn success_message(change: Money, breakdown: Option<&ChangeBreakdown>, currency: &str) -> String {
    match breakdown {
        Some(breakdown) if change.is_positive() => {
            let details = breakdown
                .iter_descending()
                .map(|(denomination, count)| format!("{} coin(s) of {}", count, denomination))
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                "Order successful! Your change is {} {}. Breakdown: {}",
                change.amount(),
                currency,
                details
            )
        }
        _ => "Order successful! Exact payment received.".to_string(),
    }
}

// =============================================================================
// Command Handlers
// =============================================================================

/// Command layer bound to one machine.
#[derive(Debug, Clone)]
pub struct Commands {
    machine: VendingMachine,
    currency: String,
}

impl Commands {
    pub fn new(machine: VendingMachine, currency: impl Into<String>) -> Self {
        Commands {
            machine,
            currency: currency.into(),
        }
    }

    pub fn get_inventory(&self) -> Result<InventoryResponse, ApiError> {
        info!("Getting coffee inventory");
        Ok(InventoryResponse {
            coffee_inventory: self.machine.inventory()?,
        })
    }

    pub fn get_prices(&self) -> Result<PriceListResponse, ApiError> {
        info!("Getting coffee prices");
        Ok(PriceListResponse {
            coffee_prices: self.machine.prices()?,
        })
    }

    pub fn get_available_change(&self) -> Result<ChangeResponse, ApiError> {
        info!("Getting available change");
        Ok(ChangeResponse {
            available_change: self.machine.available_change()?,
        })
    }

    /// Validates, runs and decorates one order. Always yields a result.
    pub fn place_order(&self, request: &OrderRequestDto) -> OrderResult {
        info!("Received order request");

        let (order, payment) = match request.validate() {
            Ok(parts) => parts,
            Err(err) => {
                warn!("Invalid order request");
                return err.into();
            }
        };

        match self.machine.place_order(order, payment) {
            Ok(mut result) => {
                if result.success {
                    result.message = success_message(
                        result.change_amount,
                        result.change_breakdown.as_ref(),
                        &self.currency,
                    );
                }
                result
            }
            Err(fault) => ApiError::from(fault).into(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
