//! Status snapshot types for the indexing and proxy endpoints.
//!
//! Both endpoints deliver tagged snapshots: a result carrying the current
//! view of the tracked transaction, or an error reported by the service.
//! The discriminant travels as the `__kind` field on the wire. Reason and
//! status strings the observer does not recognize are collapsed to their
//! conservative defaults rather than failing deserialization.

use crate::error::TransactionErrorReason;
use crate::transaction::TransactionHash;
use serde::{Deserialize, Serialize};

/// Indexer's view of a tracked submission at one poll tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "__kind")]
pub enum IndexingSnapshot {
	/// The submission is known to the indexer.
	Result {
		#[serde(rename = "txHash")]
		tx_hash: TransactionHash,
		indexed: bool,
	},
	/// The indexer reports the submission failed.
	Error { reason: IndexingErrorReason },
}

/// Failure reason reported by the indexer.
///
/// The only reason the observer distinguishes is an on-chain revert; every
/// other value the service may report collapses to [`Unknown`].
///
/// [`Unknown`]: IndexingErrorReason::Unknown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IndexingErrorReason {
	Reverted,
	Unknown,
}

impl From<String> for IndexingErrorReason {
	fn from(value: String) -> Self {
		match value.as_str() {
			"REVERTED" => IndexingErrorReason::Reverted,
			_ => IndexingErrorReason::Unknown,
		}
	}
}

impl From<IndexingErrorReason> for TransactionErrorReason {
	fn from(reason: IndexingErrorReason) -> Self {
		match reason {
			IndexingErrorReason::Reverted => TransactionErrorReason::Reverted,
			IndexingErrorReason::Unknown => TransactionErrorReason::Unknown,
		}
	}
}

/// Relay service's view of a tracked proxy transaction at one poll tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "__kind")]
pub enum ProxySnapshot {
	/// The proxy transaction is known to the relay.
	Result {
		#[serde(rename = "txHash")]
		tx_hash: TransactionHash,
		status: ProxyStatus,
	},
	/// The relay reports the proxy transaction failed. No reason is carried
	/// on this channel.
	Error,
}

/// Processing status of a relayed transaction.
///
/// `Complete` is the only terminal success value; every other status passes
/// through as non-terminal, and unrecognized strings collapse to `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProxyStatus {
	Pending,
	Minting,
	Transferring,
	Complete,
}

impl From<String> for ProxyStatus {
	fn from(value: String) -> Self {
		match value.as_str() {
			"MINTING" => ProxyStatus::Minting,
			"TRANSFERRING" => ProxyStatus::Transferring,
			"COMPLETE" => ProxyStatus::Complete,
			_ => ProxyStatus::Pending,
		}
	}
}

impl std::fmt::Display for ProxyStatus {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let status = match self {
			ProxyStatus::Pending => "PENDING",
			ProxyStatus::Minting => "MINTING",
			ProxyStatus::Transferring => "TRANSFERRING",
			ProxyStatus::Complete => "COMPLETE",
		};
		f.write_str(status)
	}
}

/// Terminal payload of the indexing waiter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexingEvent {
	/// Whether the transaction has been indexed. False when the waiter
	/// resolved on hash rotation alone.
	pub indexed: bool,
	/// The hash the submission is currently tracked under.
	pub tx_hash: TransactionHash,
}

/// Terminal payload of the proxy status waiter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyStatusEvent {
	/// The hash the relayed transaction is currently tracked under.
	pub tx_hash: TransactionHash,
	/// Terminal status of the relayed transaction.
	pub status: ProxyStatus,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_indexing_snapshot_result() {
		let json = r#"{"__kind":"Result","txHash":"0x0a0b","indexed":false}"#;
		let snapshot: IndexingSnapshot = serde_json::from_str(json).unwrap();
		assert_eq!(
			snapshot,
			IndexingSnapshot::Result {
				tx_hash: "0x0a0b".parse().unwrap(),
				indexed: false,
			}
		);
	}

	#[test]
	fn test_indexing_snapshot_error_reasons() {
		let json = r#"{"__kind":"Error","reason":"REVERTED"}"#;
		let snapshot: IndexingSnapshot = serde_json::from_str(json).unwrap();
		assert_eq!(
			snapshot,
			IndexingSnapshot::Error {
				reason: IndexingErrorReason::Reverted
			}
		);

		// Unrecognized reasons collapse instead of failing
		let json = r#"{"__kind":"Error","reason":"EXPIRED"}"#;
		let snapshot: IndexingSnapshot = serde_json::from_str(json).unwrap();
		assert_eq!(
			snapshot,
			IndexingSnapshot::Error {
				reason: IndexingErrorReason::Unknown
			}
		);
	}

	#[test]
	fn test_proxy_snapshot() {
		let json = r#"{"__kind":"Result","txHash":"0x01","status":"COMPLETE"}"#;
		let snapshot: ProxySnapshot = serde_json::from_str(json).unwrap();
		assert_eq!(
			snapshot,
			ProxySnapshot::Result {
				tx_hash: "0x01".parse().unwrap(),
				status: ProxyStatus::Complete,
			}
		);

		let json = r#"{"__kind":"Error"}"#;
		let snapshot: ProxySnapshot = serde_json::from_str(json).unwrap();
		assert_eq!(snapshot, ProxySnapshot::Error);
	}

	#[test]
	fn test_unknown_proxy_status_is_non_terminal() {
		let json = r#"{"__kind":"Result","txHash":"0x01","status":"QUEUED"}"#;
		let snapshot: ProxySnapshot = serde_json::from_str(json).unwrap();
		assert_eq!(
			snapshot,
			ProxySnapshot::Result {
				tx_hash: "0x01".parse().unwrap(),
				status: ProxyStatus::Pending,
			}
		);
	}
}
