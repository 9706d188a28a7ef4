//! Proxy status waiter for relayed transactions.
//!
//! Same state machine as the indexing waiter with a different terminal
//! predicate: the relayed transaction completing, or its hash rotating.

use crate::ObserverError;
use observer_status::{StatusError, StatusService};
use observer_types::{
	Outcome, ProxySnapshot, ProxyStatus, ProxyStatusEvent, TransactionError,
	TransactionErrorReason, TransactionHash,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

/// Waiter tracking a relayed (meta-)transaction through the proxy service.
pub struct ProxyStatusWaiter {
	status: Arc<StatusService>,
	max_indexing_wait: Duration,
}

impl ProxyStatusWaiter {
	pub fn new(status: Arc<StatusService>, max_indexing_wait: Duration) -> Self {
		Self {
			status,
			max_indexing_wait,
		}
	}

	/// Waits until the relayed transaction completes or is superseded.
	///
	/// Non-terminal statuses (pending, minting, transferring) pass through;
	/// only `Complete` or a rotated hash resolve the wait, and the resolved
	/// event always reports `Complete` — a rotation means the tracked
	/// submission was superseded and its successor is what completes. The
	/// relay's error channel carries no reason, so an error snapshot maps
	/// to `UNKNOWN`. Deadline ordering and teardown match the indexing
	/// waiter.
	#[instrument(skip_all, fields(proxy_id = %proxy_id))]
	pub async fn wait_for_proxy_transaction_status(
		&self,
		proxy_id: &str,
	) -> Result<Outcome<ProxyStatusEvent>, ObserverError> {
		let started = tokio::time::Instant::now();
		let mut stream = self.status.poll_proxy(proxy_id);
		let mut previous_tx_hash: Option<TransactionHash> = None;

		while let Some(item) = stream.next().await {
			match item? {
				ProxySnapshot::Result { tx_hash, status } => {
					let previous = previous_tx_hash.get_or_insert_with(|| tx_hash.clone());

					if *previous != tx_hash || status == ProxyStatus::Complete {
						tracing::info!(status = ?status, "Proxy transaction resolved");
						return Ok(Ok(ProxyStatusEvent {
							tx_hash,
							status: ProxyStatus::Complete,
						}));
					}
				}
				ProxySnapshot::Error => {
					tracing::warn!("Proxy relay reported failure");
					return Ok(Err(TransactionError::new(TransactionErrorReason::Unknown)));
				}
			}

			// Deadline last, so a terminal snapshot at the boundary wins
			if started.elapsed() > self.max_indexing_wait {
				tracing::warn!(
					elapsed_secs = started.elapsed().as_secs(),
					"Proxy status wait timed out"
				);
				return Ok(Err(TransactionError::new(
					TransactionErrorReason::IndexingTimeout,
				)));
			}
		}

		Err(StatusError::StreamClosed.into())
	}
}
