//! Intent relay API client.

use async_trait::async_trait;
use serde_json::Value;
use status_types::{PacketsResponse, RelayApi, RelayPacket, RelayRequest, Result, StatusError};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Client for the relay API endpoint.
#[derive(Debug, Clone)]
pub struct HttpRelayClient {
	http: reqwest::Client,
	api_url: String,
	poll_interval: Duration,
}

impl HttpRelayClient {
	pub fn new(api_url: impl Into<String>, request_timeout: Duration) -> Result<Self> {
		Ok(Self {
			http: crate::http_client(request_timeout)?,
			api_url: api_url.into(),
			poll_interval: Duration::from_secs(1),
		})
	}

	/// Sets the delay between polls while waiting for execution.
	pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
		self.poll_interval = poll_interval;
		self
	}

	pub fn api_url(&self) -> &str {
		&self.api_url
	}

	async fn send_packets_request(&self, relay_chain_id: &str, tx_hash: &str) -> Result<reqwest::Response> {
		let body = RelayRequest::transaction_packets(relay_chain_id, tx_hash);

		self.http
			.post(&self.api_url)
			.json(&body)
			.send()
			.await
			.map_err(|e| StatusError::Network(format!("Relay request failed: {}", e)))
	}

	/// Any JSON body is returned as is, error answers from the relay included.
	async fn fetch_packets(&self, relay_chain_id: &str, tx_hash: &str) -> Result<Value> {
		let response = self.send_packets_request(relay_chain_id, tx_hash).await?;
		let status = response.status();

		if !status.is_success() {
			debug!("Relay answered {} for packets of {}", status, tx_hash);
		}

		response
			.json::<Value>()
			.await
			.map_err(|e| StatusError::InvalidResponse(format!("Relay response ({}): {}", status, e)))
	}

	async fn executed_packet(&self, relay_chain_id: &str, tx_hash: &str) -> Result<Option<RelayPacket>> {
		let response = self.send_packets_request(relay_chain_id, tx_hash).await?;

		if !response.status().is_success() {
			return Err(StatusError::Relay(format!(
				"Relay request failed with status: {}",
				response.status()
			)));
		}

		let packets: PacketsResponse = response
			.json()
			.await
			.map_err(|e| StatusError::InvalidResponse(format!("Relay packets: {}", e)))?;

		debug!(
			"Relay returned {} packet(s) for {} on chain {}",
			packets.data.len(),
			tx_hash,
			relay_chain_id
		);

		Ok(packets.executed_from(relay_chain_id).cloned())
	}
}

#[async_trait]
impl RelayApi for HttpRelayClient {
	async fn get_transaction_packets(&self, relay_chain_id: &str, tx_hash: &str) -> Result<Value> {
		self.fetch_packets(relay_chain_id, tx_hash).await
	}

	#[instrument(skip(self))]
	async fn wait_until_intent_executed(
		&self,
		relay_chain_id: &str,
		spoke_tx_hash: &str,
		timeout: Duration,
	) -> Result<RelayPacket> {
		let deadline = Instant::now() + timeout;
		let mut attempts = 0u32;

		loop {
			attempts += 1;

			match tokio::time::timeout_at(deadline, self.executed_packet(relay_chain_id, spoke_tx_hash)).await {
				Ok(Ok(Some(packet))) => {
					info!(
						"Packet for {} executed after {} attempt(s), destination tx {:?}",
						spoke_tx_hash, attempts, packet.dst_tx_hash
					);
					return Ok(packet);
				}
				Ok(Ok(None)) => debug!("Packet for {} not executed yet (attempt {})", spoke_tx_hash, attempts),
				Ok(Err(e)) => warn!("Polling relay for {} failed (attempt {}): {}", spoke_tx_hash, attempts, e),
				Err(_) => {
					debug!("Relay poll for {} still in flight at the deadline", spoke_tx_hash);
					return Err(StatusError::Timeout(timeout.as_millis() as u64));
				}
			}

			let now = Instant::now();
			if now >= deadline {
				return Err(StatusError::Timeout(timeout.as_millis() as u64));
			}

			tokio::time::sleep(self.poll_interval.min(deadline - now)).await;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;
	use wiremock::matchers::{body_json, method};
	use wiremock::{Mock, MockServer, ResponseTemplate};

	fn client(server: &MockServer) -> HttpRelayClient {
		HttpRelayClient::new(server.uri(), Duration::from_secs(5))
			.unwrap()
			.with_poll_interval(Duration::from_millis(20))
	}

	fn packets_request(chain_id: &str, tx_hash: &str) -> Value {
		json!({
			"action": "get_transaction_packets",
			"params": { "chain_id": chain_id, "tx_hash": tx_hash }
		})
	}

	#[tokio::test]
	async fn test_get_transaction_packets_passes_raw_json() {
		let server = MockServer::start().await;
		let body = json!({
			"success": true,
			"data": [{ "status": "executed", "src_tx_hash": "0x111", "dst_chain_id": "0x1.eth" }]
		});
		Mock::given(method("POST"))
			.and(body_json(packets_request("146", "0x111")))
			.respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
			.expect(1)
			.mount(&server)
			.await;

		let packets = client(&server)
			.get_transaction_packets("146", "0x111")
			.await
			.unwrap();
		assert_eq!(packets, body);
	}

	#[tokio::test]
	async fn test_get_transaction_packets_passes_error_body() {
		let server = MockServer::start().await;
		let body = json!({ "success": false, "message": "packet not found" });
		Mock::given(method("POST"))
			.respond_with(ResponseTemplate::new(404).set_body_json(body.clone()))
			.mount(&server)
			.await;

		let packets = client(&server)
			.get_transaction_packets("146", "0x111")
			.await
			.unwrap();
		assert_eq!(packets, body);
	}

	#[tokio::test]
	async fn test_get_transaction_packets_unparseable_body() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
			.mount(&server)
			.await;

		let err = client(&server)
			.get_transaction_packets("146", "0x111")
			.await
			.unwrap_err();
		assert!(matches!(err, StatusError::InvalidResponse(ref msg) if msg.contains("502")));
	}

	#[tokio::test]
	async fn test_wait_returns_executed_packet() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.and(body_json(packets_request("23", "0xspoke")))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({
				"success": true,
				"data": [{
					"src_chain_id": 23,
					"src_tx_hash": "0xspoke",
					"status": "executed",
					"dst_chain_id": 146,
					"dst_tx_hash": "0xabc"
				}]
			})))
			.mount(&server)
			.await;

		let packet = client(&server)
			.wait_until_intent_executed("23", "0xspoke", Duration::from_secs(2))
			.await
			.unwrap();
		assert_eq!(packet.dst_tx_hash.as_deref(), Some("0xabc"));
		assert_eq!(packet.dst_chain_id.as_deref(), Some("146"));
	}

	#[tokio::test]
	async fn test_wait_keeps_polling_until_executed() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({
				"success": true,
				"data": [{ "src_chain_id": 23, "status": "executing" }]
			})))
			.up_to_n_times(2)
			.mount(&server)
			.await;
		Mock::given(method("POST"))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({
				"success": true,
				"data": [{ "src_chain_id": 23, "status": "executed", "dst_tx_hash": "0xdone" }]
			})))
			.mount(&server)
			.await;

		let packet = client(&server)
			.wait_until_intent_executed("23", "0xspoke", Duration::from_secs(2))
			.await
			.unwrap();
		assert_eq!(packet.dst_tx_hash.as_deref(), Some("0xdone"));
	}

	#[tokio::test]
	async fn test_wait_times_out() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": [] })))
			.mount(&server)
			.await;

		let started = std::time::Instant::now();
		let err = client(&server)
			.wait_until_intent_executed("23", "0xspoke", Duration::from_millis(150))
			.await
			.unwrap_err();

		assert!(matches!(err, StatusError::Timeout(150)));
		assert!(started.elapsed() >= Duration::from_millis(150));
	}

	#[tokio::test]
	async fn test_wait_tolerates_polling_errors() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.respond_with(ResponseTemplate::new(500))
			.up_to_n_times(1)
			.mount(&server)
			.await;
		Mock::given(method("POST"))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({
				"data": [{ "src_chain_id": "23", "status": "executed", "dst_tx_hash": "0xok" }]
			})))
			.mount(&server)
			.await;

		let packet = client(&server)
			.wait_until_intent_executed("23", "0xspoke", Duration::from_secs(2))
			.await
			.unwrap();
		assert_eq!(packet.dst_tx_hash.as_deref(), Some("0xok"));
	}

	#[tokio::test]
	async fn test_wait_cuts_off_slow_poll_at_deadline() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.respond_with(
				ResponseTemplate::new(200)
					.set_body_json(json!({
						"data": [{ "src_chain_id": "23", "status": "executed", "dst_tx_hash": "0xlate" }]
					}))
					.set_delay(Duration::from_millis(1500)),
			)
			.mount(&server)
			.await;

		let started = std::time::Instant::now();
		let err = client(&server)
			.wait_until_intent_executed("23", "0xspoke", Duration::from_millis(200))
			.await
			.unwrap_err();

		assert!(matches!(err, StatusError::Timeout(200)));
		assert!(started.elapsed() < Duration::from_millis(1000));
	}
}
