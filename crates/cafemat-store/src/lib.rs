//! # cafemat-store: Machine State for Cafemat
//!
//! This crate holds the three pieces of process-wide machine state and the
//! primitives the engine uses to read and mutate them.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cafemat Data Flow                                │
//! │                                                                         │
//! │  VendingMachine::place_order (cafemat-engine)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   cafemat-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────────┐   ┌───────────┐  │   │
//! │  │   │ MachineStore  │    │ MachineRepository  │   │ SeedData  │  │   │
//! │  │   │ (store.rs)    │    │ (repository.rs)    │   │ (seed.rs) │  │   │
//! │  │   │               │    │                    │   │           │  │   │
//! │  │   │ Arc<RwLock<   │───►│ item_stock()       │◄──│ defaults  │  │   │
//! │  │   │  MachineData>>│    │ set_item_stock()   │   │ validate  │  │   │
//! │  │   │               │    │ replace_coin_...() │   │           │  │   │
//! │  │   └───────────────┘    └────────────────────┘   └───────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - `MachineData` and the lock-guarded `MachineStore`
//! - [`repository`] - The `MachineRepository` trait used by the engine
//! - [`seed`] - Startup catalogue, stock and coin reserve
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust
//! use cafemat_store::{MachineStore, SeedData};
//!
//! let store = MachineStore::new(SeedData::default().into_machine_data().unwrap());
//! let stock = store.inventory().unwrap();
//! assert_eq!(stock["Latte"], 10);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod repository;
pub mod seed;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use repository::MachineRepository;
pub use seed::{SeedCoin, SeedData, SeedItem};
pub use store::{MachineData, MachineStore};
