//! Transaction identifier and receipt types.
//!
//! This module defines the types describing a broadcast transaction as seen
//! by a chain node: its hash, its pre-inclusion pending form, and the receipt
//! available once it has been mined.

use crate::utils::{with_0x_prefix, without_0x_prefix};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Blockchain transaction hash representation.
///
/// Stores transaction hashes as raw bytes to support different blockchain
/// formats. On the wire (status endpoints, CLI) hashes travel as
/// "0x"-prefixed hex strings; equality on the raw bytes is what drives
/// hash-rotation detection in the waiters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TransactionHash(pub Vec<u8>);

/// Error produced when a hex string cannot be parsed into a hash.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid transaction hash: {0}")]
pub struct ParseHashError(String);

impl TransactionHash {
	/// Returns the "0x"-prefixed hex rendering of this hash.
	pub fn to_hex(&self) -> String {
		with_0x_prefix(&hex::encode(&self.0))
	}
}

impl fmt::Display for TransactionHash {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_hex())
	}
}

impl FromStr for TransactionHash {
	type Err = ParseHashError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let bytes = hex::decode(without_0x_prefix(s))
			.map_err(|e| ParseHashError(format!("{}: {}", s, e)))?;
		Ok(TransactionHash(bytes))
	}
}

impl TryFrom<String> for TransactionHash {
	type Error = ParseHashError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

impl From<TransactionHash> for String {
	fn from(hash: TransactionHash) -> Self {
		hash.to_hex()
	}
}

/// A transaction as reported by a node before or after inclusion.
///
/// Returned by the chain source when the transaction is visible in the
/// node's mempool or chain; a `None` block number means not yet mined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTransaction {
	/// The hash of the transaction.
	pub hash: TransactionHash,
	/// The block the transaction was included in, if mined.
	pub block_number: Option<u64>,
}

/// Transaction receipt containing execution details.
///
/// Provides information about a transaction after it has been included in a
/// block, including its success status and block number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionReceipt {
	/// The hash of the transaction.
	pub hash: TransactionHash,
	/// The block number where the transaction was included.
	pub block_number: u64,
	/// Whether the transaction executed successfully.
	pub success: bool,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_hash_hex_round_trip() {
		let hash: TransactionHash = "0xdeadbeef".parse().unwrap();
		assert_eq!(hash.0, vec![0xde, 0xad, 0xbe, 0xef]);
		assert_eq!(hash.to_hex(), "0xdeadbeef");

		// Prefix is optional on input
		let bare: TransactionHash = "deadbeef".parse().unwrap();
		assert_eq!(bare, hash);
	}

	#[test]
	fn test_hash_rejects_invalid_hex() {
		assert!("0xzz".parse::<TransactionHash>().is_err());
		assert!("0xabc".parse::<TransactionHash>().is_err()); // odd length
	}

	#[test]
	fn test_hash_serde_as_string() {
		let hash: TransactionHash = "0x0102".parse().unwrap();
		let json = serde_json::to_string(&hash).unwrap();
		assert_eq!(json, "\"0x0102\"");

		let back: TransactionHash = serde_json::from_str(&json).unwrap();
		assert_eq!(back, hash);
	}
}
