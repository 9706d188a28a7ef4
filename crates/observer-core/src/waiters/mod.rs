//! Waiters converting polled status into terminal outcomes.
//!
//! Each waiter consumes one source (chain node, indexer, or proxy relay),
//! applies its terminal predicate and deadline, and resolves exactly once,
//! tearing down its subscription on every exit path.

pub mod indexing;
pub mod mining;
pub mod proxy;

pub use indexing::IndexingWaiter;
pub use mining::MiningWaiter;
pub use proxy::ProxyStatusWaiter;

#[cfg(test)]
pub(crate) mod testing;
