//! Core waiter logic for the transaction observer.
//!
//! This module converts the noisy, eventually-consistent views of a
//! submitted transaction (chain node, indexer, proxy relay) into a single
//! terminal outcome per operation. It provides the deadline guard, the three
//! waiters, and the [`TransactionObserver`] facade tying them to the chain
//! and status services.

use observer_chain::{ChainError, ChainService};
use observer_status::{StatusError, StatusService};
use observer_types::{
	IndexingEvent, ObserverTimings, Outcome, ProxyStatusEvent, TransactionHash,
};
use std::sync::Arc;
use thiserror::Error;

pub mod deadline;
pub mod waiters;

use waiters::{IndexingWaiter, MiningWaiter, ProxyStatusWaiter};

/// Errors that abort a waiter without producing a classified outcome.
///
/// These mean the question could not even be asked: a transport failure or
/// an unexpected chain rejection. They propagate unconverted to the caller,
/// unlike the expected failures carried in an [`Outcome`].
#[derive(Debug, Error)]
pub enum ObserverError {
	/// Error from the chain data source.
	#[error("Chain error: {0}")]
	Chain(#[from] ChainError),
	/// Error from the status polling transport.
	#[error("Status error: {0}")]
	Status(#[from] StatusError),
}

/// Observer exposing the three blocking-with-timeout wait operations.
///
/// Each operation runs independently: waiters share no state, and multiple
/// waiters for different (or identical) transactions may run concurrently.
/// Timings are fixed at construction for the observer's lifetime.
pub struct TransactionObserver {
	mining: MiningWaiter,
	indexing: IndexingWaiter,
	proxy: ProxyStatusWaiter,
}

impl TransactionObserver {
	/// Creates a new observer over the given chain and status services.
	pub fn new(
		chains: Arc<ChainService>,
		status: Arc<StatusService>,
		timings: ObserverTimings,
	) -> Self {
		Self {
			mining: MiningWaiter::new(chains, timings.max_mining_wait),
			indexing: IndexingWaiter::new(status.clone(), timings.max_indexing_wait),
			proxy: ProxyStatusWaiter::new(status, timings.max_indexing_wait),
		}
	}

	/// Waits until the transaction is mined with one confirmation, or the
	/// mining budget elapses.
	pub async fn wait_for_executed(
		&self,
		chain_id: u64,
		tx_hash: &TransactionHash,
	) -> Result<Outcome<()>, ObserverError> {
		self.mining.wait_for_executed(chain_id, tx_hash).await
	}

	/// Waits for the next indexing event of the given submission: indexed,
	/// superseded by a new hash, failed, or timed out.
	pub async fn wait_for_next_indexing_event(
		&self,
		indexing_id: &str,
	) -> Result<Outcome<IndexingEvent>, ObserverError> {
		self.indexing.wait_for_next_indexing_event(indexing_id).await
	}

	/// Waits until the relayed transaction completes, is superseded by a
	/// new hash, fails, or times out.
	pub async fn wait_for_proxy_transaction_status(
		&self,
		proxy_id: &str,
	) -> Result<Outcome<ProxyStatusEvent>, ObserverError> {
		self.proxy.wait_for_proxy_transaction_status(proxy_id).await
	}
}
