//! Chain data source implementation for EVM networks.
//!
//! This module provides a concrete implementation of the ChainInterface
//! trait over HTTP JSON-RPC using the Alloy library. The observer only reads
//! chain state; no signing or submission happens here.

use crate::{ChainError, ChainInterface};
use alloy_primitives::FixedBytes;
use alloy_provider::{Provider, RootProvider};
use alloy_transport_http::Http;
use async_trait::async_trait;
use observer_types::{
	truncate_id, NetworksConfig, PendingTransaction, TransactionHash, TransactionReceipt,
};
use std::collections::HashMap;
use std::time::Duration;

/// Interval between receipt polls while waiting for confirmations.
const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Alloy-based EVM chain data source.
///
/// One instance serves a single network; the ChainService routes between
/// instances by chain ID.
pub struct AlloyChain {
	/// The Alloy provider for node interaction.
	provider: RootProvider<Http<reqwest::Client>>,
	/// The chain ID this provider serves.
	chain_id: u64,
}

impl AlloyChain {
	/// Creates a new AlloyChain instance for one network.
	pub fn new(rpc_url: &str, chain_id: u64) -> Result<Self, ChainError> {
		let provider = RootProvider::new_http(
			rpc_url
				.parse()
				.map_err(|e| ChainError::Network(format!("Invalid RPC URL: {}", e)))?,
		);

		Ok(Self { provider, chain_id })
	}

	fn fixed_hash(hash: &TransactionHash) -> Result<FixedBytes<32>, ChainError> {
		if hash.0.len() != 32 {
			return Err(ChainError::Network(format!(
				"Invalid transaction hash length: {}",
				hash.0.len()
			)));
		}
		Ok(FixedBytes::<32>::from_slice(&hash.0))
	}
}

#[async_trait]
impl ChainInterface for AlloyChain {
	async fn find_transaction(
		&self,
		hash: &TransactionHash,
	) -> Result<Option<PendingTransaction>, ChainError> {
		let tx_hash = Self::fixed_hash(hash)?;

		let tx = self
			.provider
			.get_transaction_by_hash(tx_hash)
			.await
			.map_err(|e| ChainError::Network(format!("Failed to get transaction: {}", e)))?;

		Ok(tx.map(|tx| PendingTransaction {
			hash: hash.clone(),
			block_number: tx.block_number,
		}))
	}

	async fn wait_for_confirmation(
		&self,
		hash: &TransactionHash,
		confirmations: u64,
	) -> Result<TransactionReceipt, ChainError> {
		let tx_hash = Self::fixed_hash(hash)?;

		tracing::debug!(
			tx_hash = %truncate_id(&hash.to_hex()),
			chain_id = self.chain_id,
			"Waiting for {} confirmations",
			confirmations
		);

		loop {
			// Get transaction receipt
			let receipt = match self.provider.get_transaction_receipt(tx_hash).await {
				Ok(Some(receipt)) => receipt,
				Ok(None) => {
					// Transaction not yet mined, wait and retry
					tokio::time::sleep(RECEIPT_POLL_INTERVAL).await;
					continue;
				}
				Err(e) => {
					return Err(ChainError::Network(format!("Failed to get receipt: {}", e)));
				}
			};

			// A mined-but-reverted transaction fails the wait outright
			if !receipt.status() {
				return Err(ChainError::TransactionReverted(hash.clone()));
			}

			// Get current block number
			let current_block = self.provider.get_block_number().await.map_err(|e| {
				ChainError::Network(format!("Failed to get block number: {}", e))
			})?;

			let tx_block = receipt.block_number.unwrap_or(0);
			let current_confirmations = current_block.saturating_sub(tx_block) + 1;

			// Check if we have enough confirmations
			if current_confirmations >= confirmations {
				return Ok(TransactionReceipt {
					hash: TransactionHash(receipt.transaction_hash.0.to_vec()),
					block_number: tx_block,
					success: true,
				});
			}

			tracing::debug!(
				"Waiting for {} more confirmations...",
				confirmations.saturating_sub(current_confirmations)
			);

			// Not enough confirmations yet, wait and retry
			tokio::time::sleep(RECEIPT_POLL_INTERVAL).await;
		}
	}

	async fn get_receipt(&self, hash: &TransactionHash) -> Result<TransactionReceipt, ChainError> {
		let tx_hash = Self::fixed_hash(hash)?;

		match self.provider.get_transaction_receipt(tx_hash).await {
			Ok(Some(receipt)) => Ok(TransactionReceipt {
				hash: TransactionHash(receipt.transaction_hash.0.to_vec()),
				block_number: receipt.block_number.unwrap_or(0),
				success: receipt.status(),
			}),
			Ok(None) => Err(ChainError::NotFound),
			Err(e) => Err(ChainError::Network(format!(
				"Failed to get receipt on chain {}: {}",
				self.chain_id, e
			))),
		}
	}
}

/// Builds one provider per configured network, keyed by chain ID.
///
/// This is the provider map the ChainService routes over.
pub fn create_providers(
	networks: &NetworksConfig,
) -> Result<HashMap<u64, Box<dyn ChainInterface>>, ChainError> {
	if networks.is_empty() {
		return Err(ChainError::Network(
			"At least one network must be configured".to_string(),
		));
	}

	let mut providers: HashMap<u64, Box<dyn ChainInterface>> = HashMap::new();
	for (chain_id, network) in networks {
		providers.insert(
			*chain_id,
			Box::new(AlloyChain::new(&network.rpc_url, *chain_id)?),
		);
	}

	Ok(providers)
}
