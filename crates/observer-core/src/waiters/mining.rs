//! Mining waiter for broadcast transactions.
//!
//! Polls the chain node until the transaction becomes visible, then races
//! the confirmation wait against the mining budget.

use crate::deadline;
use crate::ObserverError;
use observer_chain::ChainService;
use observer_types::{
	truncate_id, Outcome, TransactionError, TransactionErrorReason, TransactionHash,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

/// Interval between visibility polls while the node has not yet seen the
/// transaction.
const VISIBILITY_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Confirmations required to consider a transaction executed.
const REQUIRED_CONFIRMATIONS: u64 = 1;

/// Waiter tracking a transaction from broadcast to first confirmation.
pub struct MiningWaiter {
	chains: Arc<ChainService>,
	max_mining_wait: Duration,
}

impl MiningWaiter {
	pub fn new(chains: Arc<ChainService>, max_mining_wait: Duration) -> Self {
		Self {
			chains,
			max_mining_wait,
		}
	}

	/// Waits until the transaction is mined with one confirmation.
	///
	/// The transaction may take a moment to become visible on the queried
	/// node after broadcast; until it is, the node is re-polled on a fixed
	/// tick. Once visible, the confirmation wait is raced against the
	/// mining budget. An on-chain revert or any other chain rejection is
	/// not folded into the outcome taxonomy; it aborts the waiter
	/// unconverted.
	#[instrument(skip_all, fields(chain_id = chain_id, tx_hash = %truncate_id(&tx_hash.to_hex())))]
	pub async fn wait_for_executed(
		&self,
		chain_id: u64,
		tx_hash: &TransactionHash,
	) -> Result<Outcome<()>, ObserverError> {
		let started = tokio::time::Instant::now();

		while started.elapsed() <= self.max_mining_wait {
			let pending = self.chains.find_transaction(chain_id, tx_hash).await?;

			if pending.is_none() {
				// Broadcast-to-node-visibility lag
				tokio::time::sleep(VISIBILITY_POLL_INTERVAL).await;
				continue;
			}

			let confirmation = deadline::guard(
				self.max_mining_wait,
				TransactionErrorReason::MiningTimeout,
				self.chains
					.wait_for_confirmation(chain_id, tx_hash, REQUIRED_CONFIRMATIONS),
			)
			.await;

			return match confirmation {
				Ok(Ok(receipt)) => {
					tracing::info!(block_number = receipt.block_number, "Transaction executed");
					Ok(Ok(()))
				}
				Ok(Err(chain_error)) => Err(chain_error.into()),
				Err(timeout) => {
					tracing::warn!(
						elapsed_secs = started.elapsed().as_secs(),
						"Mining wait timed out"
					);
					Ok(Err(timeout))
				}
			};
		}

		tracing::warn!(
			elapsed_secs = started.elapsed().as_secs(),
			"Transaction never became visible"
		);
		Ok(Err(TransactionError::new(
			TransactionErrorReason::MiningTimeout,
		)))
	}
}
