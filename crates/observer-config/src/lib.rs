//! Configuration module for the transaction observer.
//!
//! This module provides structures and utilities for managing observer
//! configuration. It supports loading configuration from TOML files and
//! provides validation to ensure all required configuration values are
//! properly set before any endpoint is contacted.

use observer_types::networks::deserialize_networks;
use observer_types::NetworksConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the huge input dump
		let message = err.message().to_string();
		ConfigError::Parse(message)
	}
}

/// Main configuration structure for the transaction observer.
///
/// Contains the observer timing budgets, the chain networks whose nodes can
/// be queried for mining status, and the status endpoint polled for indexing
/// and proxy snapshots.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// Configuration specific to the observer instance.
	pub observer: ObserverConfig,
	/// Network configurations keyed by chain ID.
	#[serde(deserialize_with = "deserialize_networks")]
	pub networks: NetworksConfig,
	/// Configuration for the status polling endpoint.
	pub status: StatusConfig,
}

/// Configuration specific to the observer instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObserverConfig {
	/// Unique identifier for this observer instance.
	pub id: String,
	/// Maximum time in seconds to wait for a transaction to be mined.
	/// Defaults to 60 seconds if not specified.
	#[serde(default = "default_max_mining_wait_secs")]
	pub max_mining_wait_secs: u64,
	/// Maximum time in seconds to wait for a transaction to be indexed.
	/// Defaults to 120 seconds if not specified.
	#[serde(default = "default_max_indexing_wait_secs")]
	pub max_indexing_wait_secs: u64,
}

/// Returns the default mining wait budget in seconds.
fn default_max_mining_wait_secs() -> u64 {
	60
}

/// Returns the default indexing wait budget in seconds.
fn default_max_indexing_wait_secs() -> u64 {
	120
}

/// Configuration for the status polling endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StatusConfig {
	/// Base URL of the indexing/proxy status service.
	pub endpoint: String,
	/// Interval in seconds between status polls.
	/// Defaults to 3 seconds if not specified.
	#[serde(default = "default_polling_interval_secs")]
	pub polling_interval_secs: u64,
}

/// Returns the default polling interval in seconds.
fn default_polling_interval_secs() -> u64 {
	3
}

impl Config {
	/// Loads and validates configuration from a TOML file.
	pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let content = tokio::fs::read_to_string(path).await?;
		content.parse()
	}

	/// Maximum mining wait budget as a [`Duration`].
	pub fn max_mining_wait(&self) -> Duration {
		Duration::from_secs(self.observer.max_mining_wait_secs)
	}

	/// Maximum indexing wait budget as a [`Duration`].
	pub fn max_indexing_wait(&self) -> Duration {
		Duration::from_secs(self.observer.max_indexing_wait_secs)
	}

	/// Status polling interval as a [`Duration`].
	pub fn polling_interval(&self) -> Duration {
		Duration::from_secs(self.status.polling_interval_secs)
	}

	/// Validates the configuration values.
	///
	/// Checks that at least one network is configured, that every endpoint
	/// is an HTTP(S) URL, and that all timing budgets are non-zero.
	fn validate(&self) -> Result<(), ConfigError> {
		if self.observer.id.is_empty() {
			return Err(ConfigError::Validation(
				"observer.id cannot be empty".to_string(),
			));
		}
		if self.observer.max_mining_wait_secs == 0 {
			return Err(ConfigError::Validation(
				"observer.max_mining_wait_secs must be greater than zero".to_string(),
			));
		}
		if self.observer.max_indexing_wait_secs == 0 {
			return Err(ConfigError::Validation(
				"observer.max_indexing_wait_secs must be greater than zero".to_string(),
			));
		}
		if self.networks.is_empty() {
			return Err(ConfigError::Validation(
				"at least one network must be configured".to_string(),
			));
		}
		for (chain_id, network) in &self.networks {
			if !is_http_url(&network.rpc_url) {
				return Err(ConfigError::Validation(format!(
					"rpc_url for network {} must start with http:// or https://",
					chain_id
				)));
			}
		}
		if !is_http_url(&self.status.endpoint) {
			return Err(ConfigError::Validation(
				"status.endpoint must start with http:// or https://".to_string(),
			));
		}
		if self.status.polling_interval_secs == 0 {
			return Err(ConfigError::Validation(
				"status.polling_interval_secs must be greater than zero".to_string(),
			));
		}
		Ok(())
	}
}

fn is_http_url(url: &str) -> bool {
	url.starts_with("http://") || url.starts_with("https://")
}

impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let config: Config = toml::from_str(s)?;
		config.validate()?;
		Ok(config)
	}
}
