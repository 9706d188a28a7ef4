//! Common types module for the transaction observer.
//!
//! This module defines the core data types shared by the observer crates.
//! It provides a centralized location for transaction identifiers, status
//! snapshots, the outcome taxonomy, and timing configuration to ensure
//! consistency across all observer components.

/// Outcome taxonomy for classified transaction failures.
pub mod error;
/// Network configuration types keyed by chain ID.
pub mod networks;
/// Status snapshot types delivered by the indexing and proxy endpoints.
pub mod status;
/// Timing budgets applied by the waiters.
pub mod timings;
/// Transaction identifiers and receipts.
pub mod transaction;
/// Utility functions for formatting and display.
pub mod utils;

// Re-export all types for convenient access
pub use error::*;
pub use networks::{NetworkConfig, NetworksConfig};
pub use status::*;
pub use timings::*;
pub use transaction::*;
pub use utils::{truncate_id, with_0x_prefix, without_0x_prefix};
