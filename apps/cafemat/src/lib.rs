//! # Cafemat
//!
//! Command-line front end for the coffee machine order engine.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cafemat Binary                                   │
//! │                                                                         │
//! │  cli ──► config (TOML + env) ──► logging (tracing-subscriber)          │
//! │   │                                                                     │
//! │   └────► commands ──► VendingMachine (cafemat-engine)                  │
//! │              │                                                          │
//! │              └── error: ApiError, sanitized internal faults            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
