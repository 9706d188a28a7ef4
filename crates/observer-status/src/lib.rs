//! Status polling module for the transaction observer.
//!
//! This module handles the repeated querying of the remote status service
//! for indexing and proxy-relay snapshots. It provides the polling
//! discipline shared by both waiters: a spawned task queries the source on a
//! fixed interval and forwards every snapshot to the subscriber, until the
//! subscriber drops its stream handle or the source fails.

use async_trait::async_trait;
use observer_types::{IndexingSnapshot, ProxySnapshot};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Re-export implementations
pub mod implementations {
	pub mod http;
}

/// Snapshot buffer between the polling task and the subscriber.
const CHANNEL_CAPACITY: usize = 16;

/// Errors that can occur while querying the status service.
///
/// These are transport-level failures, distinct from the error snapshots the
/// service itself reports; the waiters propagate them unconverted.
#[derive(Debug, Error)]
pub enum StatusError {
	/// Error that occurs when connecting to the status service fails.
	#[error("Connection error: {0}")]
	Connection(String),
	/// Error that occurs when a status query fails or returns an
	/// unreadable response.
	#[error("Query error: {0}")]
	Query(String),
	/// Error that occurs when the poll stream ends without a terminal
	/// snapshot.
	#[error("Status stream closed")]
	StreamClosed,
}

/// Trait defining the interface for status sources.
///
/// This trait must be implemented by any status backend serving the
/// indexing and proxy status waiters. Each call fetches one snapshot; the
/// polling cadence is owned by the [`StatusService`].
#[async_trait]
pub trait StatusInterface: Send + Sync {
	/// Fetches the indexer's current view of a submission.
	async fn indexing_status(&self, indexing_id: &str) -> Result<IndexingSnapshot, StatusError>;

	/// Fetches the relay's current view of a proxy transaction.
	async fn proxy_status(&self, proxy_id: &str) -> Result<ProxySnapshot, StatusError>;
}

/// Subscriber handle for one polling subscription.
///
/// Receives the snapshots produced by the polling task in arrival order.
/// Dropping the stream aborts the task, so every exit path of a waiter
/// tears the subscription down without an explicit unsubscribe call.
pub struct StatusStream<S> {
	receiver: mpsc::Receiver<Result<S, StatusError>>,
	task: JoinHandle<()>,
}

impl<S> StatusStream<S> {
	/// Waits for the next snapshot.
	///
	/// Returns `None` once the polling task has stopped and all buffered
	/// snapshots were consumed.
	pub async fn next(&mut self) -> Option<Result<S, StatusError>> {
		self.receiver.recv().await
	}
}

impl<S> Drop for StatusStream<S> {
	fn drop(&mut self) {
		self.task.abort();
	}
}

/// Service producing polling subscriptions against one status source.
///
/// The polling interval is explicit injected configuration, shared by all
/// subscriptions this service creates.
pub struct StatusService {
	/// The status backend queried on every tick.
	source: Arc<dyn StatusInterface>,
	/// Interval between polls.
	polling_interval: Duration,
}

impl StatusService {
	/// Creates a new StatusService over the given source.
	pub fn new(source: Arc<dyn StatusInterface>, polling_interval: Duration) -> Self {
		Self {
			source,
			polling_interval,
		}
	}

	/// Starts polling the indexer for the given indexing ID.
	pub fn poll_indexing(&self, indexing_id: &str) -> StatusStream<IndexingSnapshot> {
		let source = self.source.clone();
		let id = indexing_id.to_string();
		spawn_poll(self.polling_interval, move || {
			let source = source.clone();
			let id = id.clone();
			async move { source.indexing_status(&id).await }
		})
	}

	/// Starts polling the relay for the given proxy ID.
	pub fn poll_proxy(&self, proxy_id: &str) -> StatusStream<ProxySnapshot> {
		let source = self.source.clone();
		let id = proxy_id.to_string();
		spawn_poll(self.polling_interval, move || {
			let source = source.clone();
			let id = id.clone();
			async move { source.proxy_status(&id).await }
		})
	}
}

/// Spawns the polling task for one subscription.
///
/// The first query fires immediately, then once per interval; missed ticks
/// are skipped instead of bursting. The task stops when the subscriber
/// drops its stream or after forwarding the first transport error.
fn spawn_poll<S, F, Fut>(interval: Duration, query: F) -> StatusStream<S>
where
	S: Send + 'static,
	F: Fn() -> Fut + Send + 'static,
	Fut: Future<Output = Result<S, StatusError>> + Send,
{
	let (sender, receiver) = mpsc::channel(CHANNEL_CAPACITY);

	let task = tokio::spawn(async move {
		let mut ticker = tokio::time::interval(interval);
		ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

		loop {
			ticker.tick().await;

			let item = query().await;
			let failed = item.is_err();

			if sender.send(item).await.is_err() {
				// Subscriber dropped the stream
				break;
			}
			if failed {
				tracing::debug!("Status query failed, ending subscription");
				break;
			}
		}
	});

	StatusStream { receiver, task }
}
