//! Indexing waiter for submitted transactions.
//!
//! Consumes the indexer poll stream and resolves on the first terminal
//! snapshot: the transaction indexed, its hash rotated, the indexer
//! reporting a failure, or the indexing budget elapsing.

use crate::ObserverError;
use observer_status::{StatusError, StatusService};
use observer_types::{
	IndexingEvent, IndexingSnapshot, Outcome, TransactionError, TransactionErrorReason,
	TransactionHash,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

/// Waiter tracking a submission through off-chain indexing.
pub struct IndexingWaiter {
	status: Arc<StatusService>,
	max_indexing_wait: Duration,
}

impl IndexingWaiter {
	pub fn new(status: Arc<StatusService>, max_indexing_wait: Duration) -> Self {
		Self {
			status,
			max_indexing_wait,
		}
	}

	/// Waits for the next indexing event of the given submission.
	///
	/// The first snapshot records the hash the submission is tracked
	/// under; any later snapshot carrying a different hash means the
	/// transaction was superseded (e.g. a fee bump) and resolves the wait
	/// so the caller can re-query under the new hash. The deadline is
	/// evaluated only after the terminal checks, so a result arriving in
	/// the tick the budget expires still resolves as success. The polling
	/// subscription is torn down on every exit path.
	#[instrument(skip_all, fields(indexing_id = %indexing_id))]
	pub async fn wait_for_next_indexing_event(
		&self,
		indexing_id: &str,
	) -> Result<Outcome<IndexingEvent>, ObserverError> {
		let started = tokio::time::Instant::now();
		let mut stream = self.status.poll_indexing(indexing_id);
		let mut previous_tx_hash: Option<TransactionHash> = None;

		while let Some(item) = stream.next().await {
			match item? {
				IndexingSnapshot::Result { tx_hash, indexed } => {
					let previous = previous_tx_hash.get_or_insert_with(|| tx_hash.clone());

					if *previous != tx_hash || indexed {
						tracing::info!(indexed = indexed, "Indexing event");
						return Ok(Ok(IndexingEvent { indexed, tx_hash }));
					}
				}
				IndexingSnapshot::Error { reason } => {
					tracing::warn!(reason = ?reason, "Indexer reported failure");
					return Ok(Err(TransactionError::new(reason.into())));
				}
			}

			// Deadline last, so a terminal snapshot at the boundary wins
			if started.elapsed() > self.max_indexing_wait {
				tracing::warn!(
					elapsed_secs = started.elapsed().as_secs(),
					"Indexing wait timed out"
				);
				return Ok(Err(TransactionError::new(
					TransactionErrorReason::IndexingTimeout,
				)));
			}
		}

		Err(StatusError::StreamClosed.into())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::waiters::testing::ScriptedStatus;
	use observer_types::IndexingErrorReason;

	const POLL_INTERVAL: Duration = Duration::from_secs(3);
	const MAX_WAIT: Duration = Duration::from_secs(120);

	fn waiter_with(
		source: &ScriptedStatus,
		interval: Duration,
		max_wait: Duration,
	) -> IndexingWaiter {
		IndexingWaiter::new(
			Arc::new(StatusService::new(Arc::new(source.clone()), interval)),
			max_wait,
		)
	}

	fn snapshot(hash: &str, indexed: bool) -> Result<IndexingSnapshot, ()> {
		Ok(IndexingSnapshot::Result {
			tx_hash: hash.parse().unwrap(),
			indexed,
		})
	}

	fn error(reason: IndexingErrorReason) -> Result<IndexingSnapshot, ()> {
		Ok(IndexingSnapshot::Error { reason })
	}

	#[tokio::test(start_paused = true)]
	async fn test_resolves_when_indexed() {
		let source = ScriptedStatus::indexing(vec![
			snapshot("0x0a", false),
			snapshot("0x0a", false),
			snapshot("0x0a", true),
		]);
		let waiter = waiter_with(&source, POLL_INTERVAL, MAX_WAIT);

		let outcome = waiter.wait_for_next_indexing_event("ix-1").await.unwrap();

		assert_eq!(
			outcome,
			Ok(IndexingEvent {
				indexed: true,
				tx_hash: "0x0a".parse().unwrap(),
			})
		);
	}

	#[tokio::test(start_paused = true)]
	async fn test_first_snapshot_already_indexed() {
		let source = ScriptedStatus::indexing(vec![snapshot("0x0a", true)]);
		let waiter = waiter_with(&source, POLL_INTERVAL, MAX_WAIT);

		let outcome = waiter.wait_for_next_indexing_event("ix-1").await.unwrap();

		assert_eq!(
			outcome,
			Ok(IndexingEvent {
				indexed: true,
				tx_hash: "0x0a".parse().unwrap(),
			})
		);
		assert_eq!(source.indexing_calls(), 1);
	}

	#[tokio::test(start_paused = true)]
	async fn test_hash_rotation_is_terminal() {
		// The rotated hash resolves the wait even though nothing is indexed
		let source =
			ScriptedStatus::indexing(vec![snapshot("0x0a", false), snapshot("0x0b", false)]);
		let waiter = waiter_with(&source, POLL_INTERVAL, MAX_WAIT);

		let outcome = waiter.wait_for_next_indexing_event("ix-1").await.unwrap();

		assert_eq!(
			outcome,
			Ok(IndexingEvent {
				indexed: false,
				tx_hash: "0x0b".parse().unwrap(),
			})
		);
	}

	#[tokio::test(start_paused = true)]
	async fn test_reverted_error_snapshot() {
		let source = ScriptedStatus::indexing(vec![error(IndexingErrorReason::Reverted)]);
		let waiter = waiter_with(&source, POLL_INTERVAL, MAX_WAIT);

		let outcome = waiter.wait_for_next_indexing_event("ix-1").await.unwrap();

		assert_eq!(
			outcome,
			Err(TransactionError::new(TransactionErrorReason::Reverted))
		);
	}

	#[tokio::test(start_paused = true)]
	async fn test_unrecognized_error_snapshot() {
		let source = ScriptedStatus::indexing(vec![error(IndexingErrorReason::Unknown)]);
		let waiter = waiter_with(&source, POLL_INTERVAL, MAX_WAIT);

		let outcome = waiter.wait_for_next_indexing_event("ix-1").await.unwrap();

		assert_eq!(
			outcome,
			Err(TransactionError::new(TransactionErrorReason::Unknown))
		);
	}

	#[tokio::test(start_paused = true)]
	async fn test_times_out_without_terminal_snapshot() {
		let source = ScriptedStatus::indexing(vec![snapshot("0x0a", false)]);
		let waiter = waiter_with(&source, POLL_INTERVAL, Duration::from_secs(30));
		let started = tokio::time::Instant::now();

		let outcome = waiter.wait_for_next_indexing_event("ix-1").await.unwrap();

		assert_eq!(
			outcome,
			Err(TransactionError::new(
				TransactionErrorReason::IndexingTimeout
			))
		);
		assert!(started.elapsed() >= Duration::from_secs(30));
	}

	#[tokio::test(start_paused = true)]
	async fn test_terminal_snapshot_beats_expired_deadline() {
		// Second poll lands after the budget has expired; it is terminal,
		// so it must resolve as success, not timeout.
		let source = ScriptedStatus::indexing(vec![snapshot("0x0a", false), snapshot("0x0a", true)]);
		let waiter = waiter_with(&source, Duration::from_secs(10), Duration::from_secs(5));

		let outcome = waiter.wait_for_next_indexing_event("ix-1").await.unwrap();

		assert_eq!(
			outcome,
			Ok(IndexingEvent {
				indexed: true,
				tx_hash: "0x0a".parse().unwrap(),
			})
		);
	}

	#[tokio::test(start_paused = true)]
	async fn test_subscription_torn_down_after_resolution() {
		let source = ScriptedStatus::indexing(vec![snapshot("0x0a", true)]);
		let waiter = waiter_with(&source, POLL_INTERVAL, MAX_WAIT);

		let _ = waiter.wait_for_next_indexing_event("ix-1").await.unwrap();

		let after_resolution = source.indexing_calls();
		tokio::time::sleep(Duration::from_secs(60)).await;
		assert_eq!(source.indexing_calls(), after_resolution);
	}

	#[tokio::test(start_paused = true)]
	async fn test_transport_error_propagates_unconverted() {
		let source = ScriptedStatus::indexing(vec![snapshot("0x0a", false), Err(())]);
		let waiter = waiter_with(&source, POLL_INTERVAL, MAX_WAIT);

		let result = waiter.wait_for_next_indexing_event("ix-1").await;

		assert!(matches!(
			result,
			Err(ObserverError::Status(StatusError::Query(_)))
		));
	}
}
