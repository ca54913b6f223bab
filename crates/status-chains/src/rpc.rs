//! JSON-RPC client with automatic retries.

use backoff::{backoff::Backoff, ExponentialBackoff};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use status_types::StatusError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum RpcError {
	/// The node could not be reached or answered with a non-success status.
	#[error("RPC transport error: {0}")]
	Transport(String),

	/// The node answered with a JSON-RPC error object.
	#[error("RPC error {code}: {message}")]
	Rpc { code: i64, message: String },

	#[error("RPC decode error: {0}")]
	Decode(String),
}

impl RpcError {
	fn is_retryable(&self) -> bool {
		matches!(self, RpcError::Transport(_))
	}
}

impl From<RpcError> for StatusError {
	fn from(e: RpcError) -> Self {
		StatusError::Rpc(e.to_string())
	}
}

#[derive(Serialize)]
struct JsonRpcRequest<'a, P> {
	jsonrpc: &'static str,
	id: u64,
	method: &'a str,
	params: P,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
	#[serde(default)]
	result: Option<Value>,
	#[serde(default)]
	error: Option<JsonRpcErrorObject>,
}

#[derive(Deserialize)]
struct JsonRpcErrorObject {
	code: i64,
	message: String,
}

/// JSON-RPC 2.0 client over HTTP.
///
/// Transport failures are retried with exponential backoff, up to
/// `max_retries` times and within 30 seconds in total. JSON-RPC error objects
/// are returned immediately.
#[derive(Debug)]
pub struct RpcClient {
	http: reqwest::Client,
	backoff: ExponentialBackoff,
	max_retries: u32,
	next_id: AtomicU64,
}

impl RpcClient {
	pub fn new(request_timeout: Duration) -> Result<Self, RpcError> {
		let http = reqwest::Client::builder()
			.timeout(request_timeout)
			.build()
			.map_err(|e| RpcError::Transport(format!("Failed to create HTTP client: {}", e)))?;

		let backoff = ExponentialBackoff {
			max_elapsed_time: Some(Duration::from_secs(30)),
			..Default::default()
		};

		Ok(Self {
			http,
			backoff,
			max_retries: 3,
			next_id: AtomicU64::new(1),
		})
	}

	/// Sets the maximum number of retry attempts.
	pub fn with_max_retries(mut self, max_retries: u32) -> Self {
		self.max_retries = max_retries;
		self
	}

	/// Sets the first retry delay.
	pub fn with_initial_interval(mut self, interval: Duration) -> Self {
		self.backoff.initial_interval = interval;
		self.backoff.current_interval = interval;
		self
	}

	/// Calls `method` on the node at `url` and decodes the `result` field.
	/// A `null` result decodes into `R` as JSON `null`.
	pub async fn request<P, R>(&self, url: &str, method: &str, params: P) -> Result<R, RpcError>
	where
		P: Serialize + Send + Sync,
		R: DeserializeOwned,
	{
		let mut backoff = self.backoff.clone();
		backoff.reset();
		let mut attempts = 0;

		loop {
			match self.send(url, method, &params).await {
				Ok(result) => {
					return serde_json::from_value(result)
						.map_err(|e| RpcError::Decode(format!("{}: {}", method, e)));
				}
				Err(e) if e.is_retryable() => {
					attempts += 1;

					if attempts > self.max_retries {
						warn!(
							"RPC request {} failed after {} attempts, giving up: {}",
							method, self.max_retries, e
						);
						return Err(e);
					}

					match backoff.next_backoff() {
						Some(delay) => {
							warn!(
								"RPC request {} failed, attempt {}/{}, retrying in {:?}: {}",
								method, attempts, self.max_retries, delay, e
							);
							tokio::time::sleep(delay).await;
						}
						None => {
							warn!(
								"RPC request {} failed, backoff exhausted after {} attempts: {}",
								method, attempts, e
							);
							return Err(e);
						}
					}
				}
				Err(e) => return Err(e),
			}
		}
	}

	async fn send<P: Serialize>(&self, url: &str, method: &str, params: &P) -> Result<Value, RpcError> {
		let id = self.next_id.fetch_add(1, Ordering::Relaxed);
		let body = JsonRpcRequest {
			jsonrpc: "2.0",
			id,
			method,
			params,
		};

		debug!("RPC {} #{} -> {}", method, id, url);

		let response = self
			.http
			.post(url)
			.json(&body)
			.send()
			.await
			.map_err(|e| RpcError::Transport(e.to_string()))?;

		if !response.status().is_success() {
			return Err(RpcError::Transport(format!(
				"HTTP request failed with status: {}",
				response.status()
			)));
		}

		let response: JsonRpcResponse = response
			.json()
			.await
			.map_err(|e| RpcError::Decode(e.to_string()))?;

		if let Some(error) = response.error {
			return Err(RpcError::Rpc {
				code: error.code,
				message: error.message,
			});
		}

		Ok(response.result.unwrap_or(Value::Null))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;
	use wiremock::matchers::{body_partial_json, method};
	use wiremock::{Mock, MockServer, ResponseTemplate};

	fn client() -> RpcClient {
		RpcClient::new(Duration::from_secs(5))
			.unwrap()
			.with_initial_interval(Duration::from_millis(10))
	}

	#[tokio::test]
	async fn test_request_result() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.and(body_partial_json(json!({ "jsonrpc": "2.0", "method": "eth_blockNumber" })))
			.respond_with(
				ResponseTemplate::new(200).set_body_json(json!({ "jsonrpc": "2.0", "id": 1, "result": "0x10" })),
			)
			.mount(&server)
			.await;

		let result: String = client()
			.request(&server.uri(), "eth_blockNumber", json!([]))
			.await
			.unwrap();
		assert_eq!(result, "0x10");
	}

	#[tokio::test]
	async fn test_rpc_error_is_not_retried() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({
				"jsonrpc": "2.0",
				"id": 1,
				"error": { "code": -32602, "message": "invalid params" }
			})))
			.expect(1)
			.mount(&server)
			.await;

		let err = client()
			.request::<_, Value>(&server.uri(), "eth_call", json!([]))
			.await
			.unwrap_err();
		assert!(matches!(err, RpcError::Rpc { code: -32602, .. }));
	}

	#[tokio::test]
	async fn test_transport_error_is_retried() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.respond_with(ResponseTemplate::new(503))
			.expect(3)
			.mount(&server)
			.await;

		let err = client()
			.with_max_retries(2)
			.request::<_, Value>(&server.uri(), "eth_blockNumber", json!([]))
			.await
			.unwrap_err();
		assert!(matches!(err, RpcError::Transport(_)));
	}

	#[test]
	fn test_retry_client_configuration() {
		let client = RpcClient::new(Duration::from_secs(1)).unwrap();
		assert_eq!(client.max_retries, 3);
		assert_eq!(
			client.backoff.max_elapsed_time,
			Some(Duration::from_secs(30))
		);
	}
}
