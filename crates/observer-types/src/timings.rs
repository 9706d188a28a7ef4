//! Timing budgets for observer operations.

use std::time::Duration;

/// Wall-clock budgets applied by the waiters.
///
/// Supplied once per observer instance and immutable for its lifetime. Each
/// budget is measured from the invoking waiter's own start time, not from
/// transaction broadcast, and budgets are not shared across waiters: time
/// spent waiting for mining is not subtracted from the indexing budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObserverTimings {
	/// Maximum time to wait for a transaction to be mined and confirmed.
	pub max_mining_wait: Duration,
	/// Maximum time to wait for a transaction to be indexed, shared by the
	/// indexing and proxy status waiters.
	pub max_indexing_wait: Duration,
}
