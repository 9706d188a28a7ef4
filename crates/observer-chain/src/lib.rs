//! Chain data source module for the transaction observer.
//!
//! This module provides the abstraction over chain nodes used to observe the
//! mining of broadcast transactions. It exposes lookups for pending
//! transactions and confirmation waits across multiple networks, routed by
//! chain ID.

use async_trait::async_trait;
use observer_types::{PendingTransaction, TransactionHash, TransactionReceipt};
use std::collections::HashMap;
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod evm {
		pub mod alloy;
	}
}

/// Errors that can occur while querying a chain node.
#[derive(Debug, Error)]
pub enum ChainError {
	/// Error that occurs during network communication with the node.
	#[error("Network error: {0}")]
	Network(String),
	/// Error that occurs when a transaction reverts on-chain.
	#[error("Transaction reverted: {0}")]
	TransactionReverted(TransactionHash),
	/// Error that occurs when a transaction receipt is not available.
	#[error("Transaction not found")]
	NotFound,
	/// Error that occurs when no provider is configured for the chain.
	#[error("No provider available")]
	NoProviderAvailable,
}

/// Trait defining the interface for chain data providers.
///
/// This trait must be implemented by any chain backend that wants to serve
/// the mining waiter. It provides visibility into broadcast transactions and
/// a confirmation wait that fails on revert.
#[async_trait]
pub trait ChainInterface: Send + Sync {
	/// Looks up a transaction by hash.
	///
	/// Returns `None` while the node has not yet seen the transaction, which
	/// is expected during broadcast-to-node-visibility lag.
	async fn find_transaction(
		&self,
		hash: &TransactionHash,
	) -> Result<Option<PendingTransaction>, ChainError>;

	/// Waits until the transaction has the requested number of confirmations.
	///
	/// Blocks until confirmed, without an internal deadline; the caller owns
	/// the timeout. Fails with [`ChainError::TransactionReverted`] if the
	/// transaction executed unsuccessfully.
	async fn wait_for_confirmation(
		&self,
		hash: &TransactionHash,
		confirmations: u64,
	) -> Result<TransactionReceipt, ChainError>;

	/// Retrieves the receipt for a transaction if available.
	///
	/// Returns immediately with the current transaction receipt, or
	/// [`ChainError::NotFound`] if the transaction is not yet mined.
	async fn get_receipt(&self, hash: &TransactionHash) -> Result<TransactionReceipt, ChainError>;
}

/// Service that routes chain queries to the provider for each network.
///
/// The ChainService holds one provider per configured chain ID and forwards
/// each operation to the matching provider. Unknown chain IDs fail with
/// [`ChainError::NoProviderAvailable`].
pub struct ChainService {
	/// Map of chain IDs to their corresponding providers.
	providers: HashMap<u64, Box<dyn ChainInterface>>,
}

impl ChainService {
	/// Creates a new ChainService with the specified providers.
	pub fn new(providers: HashMap<u64, Box<dyn ChainInterface>>) -> Self {
		Self { providers }
	}

	fn provider(&self, chain_id: u64) -> Result<&dyn ChainInterface, ChainError> {
		self.providers
			.get(&chain_id)
			.map(|p| p.as_ref())
			.ok_or(ChainError::NoProviderAvailable)
	}

	/// Looks up a transaction by hash on the given chain.
	pub async fn find_transaction(
		&self,
		chain_id: u64,
		hash: &TransactionHash,
	) -> Result<Option<PendingTransaction>, ChainError> {
		self.provider(chain_id)?.find_transaction(hash).await
	}

	/// Waits for a transaction to be confirmed on the given chain.
	pub async fn wait_for_confirmation(
		&self,
		chain_id: u64,
		hash: &TransactionHash,
		confirmations: u64,
	) -> Result<TransactionReceipt, ChainError> {
		self.provider(chain_id)?
			.wait_for_confirmation(hash, confirmations)
			.await
	}

	/// Retrieves the current receipt for a transaction on the given chain.
	pub async fn get_receipt(
		&self,
		chain_id: u64,
		hash: &TransactionHash,
	) -> Result<TransactionReceipt, ChainError> {
		self.provider(chain_id)?.get_receipt(hash).await
	}
}
