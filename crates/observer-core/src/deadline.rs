//! Deadline guard for waiter operations.

use observer_types::{TransactionError, TransactionErrorReason};
use std::future::Future;
use std::time::Duration;

/// Races a unit of work against a hard wall-clock deadline.
///
/// If the work completes first its output is returned; if the deadline
/// elapses first the work is dropped, discarding whatever it would have
/// produced, and a classified failure with the given reason is returned.
/// The select is biased toward the work so a result that is ready in the
/// same tick the deadline expires still wins.
pub async fn guard<T>(
	limit: Duration,
	reason: TransactionErrorReason,
	work: impl Future<Output = T>,
) -> Result<T, TransactionError> {
	tokio::select! {
		biased;

		output = work => Ok(output),
		_ = tokio::time::sleep(limit) => Err(TransactionError::new(reason)),
	}
}
