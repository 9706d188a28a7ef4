//! Classified failure taxonomy for waiter outcomes.
//!
//! This module defines the closed set of failure reasons a waiter can
//! resolve with. These are expected, recoverable outcomes carried in the
//! failure branch of an [`Outcome`] and are never raised as Rust errors past
//! the waiter boundary; transport-level failures use the per-crate error
//! enums instead and propagate unconverted.

use std::fmt;
use thiserror::Error;

/// Reason a tracked transaction failed or timed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionErrorReason {
	/// The transaction was not mined within the configured budget.
	MiningTimeout,
	/// The transaction was not indexed within the configured budget.
	IndexingTimeout,
	/// The transaction reverted on-chain, as reported by the indexer.
	Reverted,
	/// The failure reason could not be determined.
	Unknown,
}

impl fmt::Display for TransactionErrorReason {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let reason = match self {
			TransactionErrorReason::MiningTimeout => "MINING_TIMEOUT",
			TransactionErrorReason::IndexingTimeout => "INDEXING_TIMEOUT",
			TransactionErrorReason::Reverted => "REVERTED",
			TransactionErrorReason::Unknown => "UNKNOWN",
		};
		f.write_str(reason)
	}
}

/// Classified transaction failure.
///
/// Carried in the failure branch of an [`Outcome`]; constructing one never
/// fails and the reason set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("transaction failed: {reason}")]
pub struct TransactionError {
	/// Why the transaction failed.
	pub reason: TransactionErrorReason,
}

impl TransactionError {
	pub fn new(reason: TransactionErrorReason) -> Self {
		Self { reason }
	}
}

/// Result of a waiter invocation: a success payload or a classified failure.
///
/// Distinct from a propagated transport error, which means the question
/// could not even be asked.
pub type Outcome<T> = Result<T, TransactionError>;
