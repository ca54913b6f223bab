//! Solver API client.

use async_trait::async_trait;
use serde::Serialize;
use status_types::{IntentStatus, Result, SolverApi, StatusError};
use std::time::Duration;
use tracing::{debug, instrument};

#[derive(Serialize)]
struct StatusQuery<'a> {
	intent_tx_hash: &'a str,
}

/// Client for the solver's `/status` endpoint.
#[derive(Debug, Clone)]
pub struct HttpSolverClient {
	http: reqwest::Client,
	base_url: String,
}

impl HttpSolverClient {
	pub fn new(base_url: impl Into<String>, request_timeout: Duration) -> Result<Self> {
		Ok(Self {
			http: crate::http_client(request_timeout)?,
			base_url: base_url.into(),
		})
	}

	fn status_url(&self) -> String {
		format!("{}/status", self.base_url.trim_end_matches('/'))
	}
}

#[async_trait]
impl SolverApi for HttpSolverClient {
	#[instrument(skip(self))]
	async fn get_status(&self, intent_tx_hash: &str) -> Result<IntentStatus> {
		let response = self
			.http
			.post(self.status_url())
			.json(&StatusQuery { intent_tx_hash })
			.send()
			.await
			.map_err(|e| StatusError::Network(format!("Solver request failed: {}", e)))?;

		let status = response.status();
		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();
			return Err(StatusError::Relay(format!(
				"Solver status request failed with status {}: {}",
				status, body
			)));
		}

		let intent_status: IntentStatus = response
			.json()
			.await
			.map_err(|e| StatusError::InvalidResponse(format!("Solver status: {}", e)))?;

		debug!("Intent {} has status {}", intent_tx_hash, intent_status.code());
		Ok(intent_status)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;
	use status_types::IntentStatusCode;
	use wiremock::matchers::{body_json, method, path};
	use wiremock::{Mock, MockServer, ResponseTemplate};

	#[tokio::test]
	async fn test_get_status() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.and(path("/status"))
			.and(body_json(json!({ "intent_tx_hash": "0x222" })))
			.respond_with(
				ResponseTemplate::new(200).set_body_json(json!({ "status": 3, "fill_tx_hash": "0xfill" })),
			)
			.expect(1)
			.mount(&server)
			.await;

		let client = HttpSolverClient::new(format!("{}/", server.uri()), Duration::from_secs(5)).unwrap();
		let status = client.get_status("0x222").await.unwrap();

		assert_eq!(status.code(), IntentStatusCode::Solved);
		assert_eq!(status.fill_hash(), Some("0xfill"));
	}

	#[tokio::test]
	async fn test_get_status_error_response() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.and(path("/status"))
			.respond_with(ResponseTemplate::new(400).set_body_json(json!({
				"detail": { "code": "IntentNotFound", "message": "unknown intent" }
			})))
			.mount(&server)
			.await;

		let client = HttpSolverClient::new(server.uri(), Duration::from_secs(5)).unwrap();
		let err = client.get_status("0x222").await.unwrap_err();
		assert!(matches!(err, StatusError::Relay(ref msg) if msg.contains("400")));
	}

	#[tokio::test]
	async fn test_get_status_malformed_body() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.and(path("/status"))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({ "state": "done" })))
			.mount(&server)
			.await;

		let client = HttpSolverClient::new(server.uri(), Duration::from_secs(5)).unwrap();
		let err = client.get_status("0x222").await.unwrap_err();
		assert!(matches!(err, StatusError::InvalidResponse(_)));
	}
}
