//! HTTP status source implementation.
//!
//! Queries the remote status service over HTTP, posting one JSON request
//! per poll tick and deserializing the tagged snapshot it returns.

use crate::{StatusError, StatusInterface};
use async_trait::async_trait;
use observer_types::{IndexingSnapshot, ProxySnapshot};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// HTTP-backed status source.
///
/// One instance serves both the indexing and the proxy status queries
/// against a single service endpoint.
pub struct HttpStatus {
	/// HTTP client shared across queries.
	client: reqwest::Client,
	/// Base URL of the status service.
	endpoint: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IndexingRequest<'a> {
	tx_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProxyRequest<'a> {
	proxy_action_id: &'a str,
}

impl HttpStatus {
	/// Creates a new HttpStatus client for the given service endpoint.
	pub fn new(endpoint: &str) -> Self {
		Self {
			client: reqwest::Client::new(),
			endpoint: endpoint.trim_end_matches('/').to_string(),
		}
	}

	async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, StatusError>
	where
		B: Serialize + Sync,
		R: DeserializeOwned,
	{
		let url = format!("{}/{}", self.endpoint, path);

		let response = self
			.client
			.post(&url)
			.json(body)
			.send()
			.await
			.map_err(|e| StatusError::Connection(format!("Failed to reach {}: {}", url, e)))?;

		let response = response
			.error_for_status()
			.map_err(|e| StatusError::Query(format!("Status request failed: {}", e)))?;

		response
			.json::<R>()
			.await
			.map_err(|e| StatusError::Query(format!("Invalid status response: {}", e)))
	}
}

#[async_trait]
impl StatusInterface for HttpStatus {
	async fn indexing_status(&self, indexing_id: &str) -> Result<IndexingSnapshot, StatusError> {
		self.post("indexing", &IndexingRequest { tx_id: indexing_id })
			.await
	}

	async fn proxy_status(&self, proxy_id: &str) -> Result<ProxySnapshot, StatusError> {
		self.post(
			"proxy",
			&ProxyRequest {
				proxy_action_id: proxy_id,
			},
		)
		.await
	}
}
