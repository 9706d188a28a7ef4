//! Mock chain and status sources shared by the waiter tests.

use async_trait::async_trait;
use observer_chain::{ChainError, ChainInterface};
use observer_status::{StatusError, StatusInterface};
use observer_types::{
	IndexingSnapshot, PendingTransaction, ProxySnapshot, TransactionHash, TransactionReceipt,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// How the mock chain behaves once the transaction is visible.
pub(crate) enum Confirmation {
	/// Confirms on the first wait.
	Immediate,
	/// Never confirms; the wait stalls forever.
	Never,
	/// The confirmation wait rejects with an on-chain revert.
	Reverted,
}

struct MockChainState {
	not_found_polls: usize,
	confirmation: Confirmation,
	find_calls: AtomicUsize,
}

/// Chain source returning `None` for a configured number of visibility
/// polls, then a pending transaction with the scripted confirmation
/// behavior.
#[derive(Clone)]
pub(crate) struct MockChain(Arc<MockChainState>);

impl MockChain {
	pub fn new(not_found_polls: usize, confirmation: Confirmation) -> Self {
		Self(Arc::new(MockChainState {
			not_found_polls,
			confirmation,
			find_calls: AtomicUsize::new(0),
		}))
	}

	pub fn find_calls(&self) -> usize {
		self.0.find_calls.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl ChainInterface for MockChain {
	async fn find_transaction(
		&self,
		hash: &TransactionHash,
	) -> Result<Option<PendingTransaction>, ChainError> {
		let calls = self.0.find_calls.fetch_add(1, Ordering::SeqCst);
		if calls < self.0.not_found_polls {
			return Ok(None);
		}
		Ok(Some(PendingTransaction {
			hash: hash.clone(),
			block_number: None,
		}))
	}

	async fn wait_for_confirmation(
		&self,
		hash: &TransactionHash,
		_confirmations: u64,
	) -> Result<TransactionReceipt, ChainError> {
		match self.0.confirmation {
			Confirmation::Immediate => Ok(TransactionReceipt {
				hash: hash.clone(),
				block_number: 1,
				success: true,
			}),
			Confirmation::Never => std::future::pending().await,
			Confirmation::Reverted => Err(ChainError::TransactionReverted(hash.clone())),
		}
	}

	async fn get_receipt(&self, _hash: &TransactionHash) -> Result<TransactionReceipt, ChainError> {
		Err(ChainError::NotFound)
	}
}

struct ScriptedStatusState {
	indexing: Vec<Result<IndexingSnapshot, ()>>,
	proxy: Vec<Result<ProxySnapshot, ()>>,
	indexing_calls: AtomicUsize,
	proxy_calls: AtomicUsize,
}

/// Status source serving fixed snapshot sequences, repeating the last entry
/// forever. A scripted `Err` is reported as a transport failure.
#[derive(Clone)]
pub(crate) struct ScriptedStatus(Arc<ScriptedStatusState>);

impl ScriptedStatus {
	pub fn indexing(snapshots: Vec<Result<IndexingSnapshot, ()>>) -> Self {
		Self(Arc::new(ScriptedStatusState {
			indexing: snapshots,
			proxy: Vec::new(),
			indexing_calls: AtomicUsize::new(0),
			proxy_calls: AtomicUsize::new(0),
		}))
	}

	pub fn proxy(snapshots: Vec<Result<ProxySnapshot, ()>>) -> Self {
		Self(Arc::new(ScriptedStatusState {
			indexing: Vec::new(),
			proxy: snapshots,
			indexing_calls: AtomicUsize::new(0),
			proxy_calls: AtomicUsize::new(0),
		}))
	}

	pub fn indexing_calls(&self) -> usize {
		self.0.indexing_calls.load(Ordering::SeqCst)
	}

	pub fn proxy_calls(&self) -> usize {
		self.0.proxy_calls.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl StatusInterface for ScriptedStatus {
	async fn indexing_status(&self, _indexing_id: &str) -> Result<IndexingSnapshot, StatusError> {
		let tick = self.0.indexing_calls.fetch_add(1, Ordering::SeqCst);
		let index = tick.min(self.0.indexing.len() - 1);
		self.0.indexing[index]
			.clone()
			.map_err(|_| StatusError::Query("scripted failure".to_string()))
	}

	async fn proxy_status(&self, _proxy_id: &str) -> Result<ProxySnapshot, StatusError> {
		let tick = self.0.proxy_calls.fetch_add(1, Ordering::SeqCst);
		let index = tick.min(self.0.proxy.len() - 1);
		self.0.proxy[index]
			.clone()
			.map_err(|_| StatusError::Query("scripted failure".to_string()))
	}
}
