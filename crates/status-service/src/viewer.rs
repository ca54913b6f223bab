//! Command-line status viewer.
//!
//! Posts a single status request to a running service and renders the
//! outcome for a terminal.

use anyhow::Context;
use serde_json::Value;
use status_types::{ChainInfo, ErrorResponse, IntentStatusCode, StatusRequest, StatusResponse};
use std::fmt::Write;
use std::time::Duration;

/// Covers both relay waits of a request plus the downstream calls.
pub const DEFAULT_VIEWER_TIMEOUT: Duration = Duration::from_secs(90);

/// Outcome of a status request as shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
	Success(StatusResponse),
	Error(String),
}

pub struct StatusViewer {
	http: reqwest::Client,
	endpoint: String,
}

impl StatusViewer {
	pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
		let http = reqwest::Client::builder()
			.timeout(timeout)
			.build()
			.context("Failed to create HTTP client")?;

		Ok(Self {
			http,
			endpoint: format!("{}/api/sodax-status", base_url.trim_end_matches('/')),
		})
	}

	/// Sends the request. Only transport failures are returned as errors;
	/// every answer from the service becomes a `ViewState`.
	pub async fn fetch(&self, request: &StatusRequest) -> anyhow::Result<ViewState> {
		let response = self
			.http
			.post(&self.endpoint)
			.json(request)
			.send()
			.await
			.with_context(|| format!("Failed to reach {}", self.endpoint))?;

		let status = response.status();
		let body = response
			.text()
			.await
			.context("Failed to read response body")?;

		if status.is_success() {
			let result: StatusResponse =
				serde_json::from_str(&body).context("Unexpected status response")?;
			return Ok(ViewState::Success(result));
		}

		let message = serde_json::from_str::<ErrorResponse>(&body)
			.map(|e| e.error)
			.unwrap_or_else(|_| format!("Request failed with status {}", status));

		Ok(ViewState::Error(message))
	}
}

pub fn render(state: &ViewState) -> String {
	let mut out = String::new();

	match state {
		ViewState::Error(message) => {
			let _ = writeln!(out, "Error: {}", message);
		}
		ViewState::Success(result) => {
			let status = &result.intent_status;
			let code = status.code();
			let _ = writeln!(out, "Status: {}", code.label());
			let _ = writeln!(out, "{}", banner(code));

			if let Some(fill) = status.fill_hash() {
				let _ = writeln!(out, "Fill Transaction: {}", fill);
			}
			if let Some(out_hash) = &result.transaction_out_hash {
				let _ = writeln!(out, "Destination Transaction: {}", out_hash);
			}

			render_packets(&mut out, &result.packets_data);

			let _ = writeln!(out, "\nIntent Status:\n{}", pretty(status));
			let _ = writeln!(out, "\nPackets Data:\n{}", pretty(&result.packets_data));
		}
	}

	out
}

fn banner(code: IntentStatusCode) -> &'static str {
	match code {
		IntentStatusCode::Solved => "Completed successfully across chains",
		IntentStatusCode::Failed => "Transaction failed, it could not be completed",
		IntentStatusCode::NotFound => "Not found in the Sodax network",
		IntentStatusCode::Queued => "Queued, it will be processed shortly",
		IntentStatusCode::Processing => "Currently being processed",
		IntentStatusCode::Unknown(_) => "In progress",
	}
}

/// One entry per packet in `data`, when the relay returned any.
fn render_packets(out: &mut String, packets_data: &Value) {
	let Some(packets) = packets_data
		.get("data")
		.and_then(Value::as_array)
		.filter(|packets| !packets.is_empty())
	else {
		return;
	};

	let _ = writeln!(out, "\nTransaction Details:");
	for (index, packet) in packets.iter().enumerate() {
		let _ = writeln!(out, "  Packet {}", index + 1);
		if let Some(status) = packet_field(packet, "status") {
			let _ = writeln!(out, "    Packet Status: {}", status);
		}
		if let Some(dst_chain_id) = packet_field(packet, "dst_chain_id") {
			let _ = writeln!(out, "    Destination Chain ID: {}", dst_chain_id);
		}
		if let Some(src_tx_hash) = packet_field(packet, "src_tx_hash") {
			let _ = writeln!(out, "    Source Transaction: {}", src_tx_hash);
		}
		for line in pretty(packet).lines() {
			let _ = writeln!(out, "    {}", line);
		}
	}
}

fn packet_field(packet: &Value, key: &str) -> Option<String> {
	match packet.get(key)? {
		Value::String(s) if !s.is_empty() => Some(s.clone()),
		Value::Number(n) => Some(n.to_string()),
		_ => None,
	}
}

pub fn render_chains(chains: &[ChainInfo]) -> String {
	let mut out = String::new();
	for chain in chains {
		let _ = writeln!(out, "{:<18} {:<20} {}", chain.id, chain.name, chain.kind);
	}
	out
}

fn pretty<T: serde::Serialize>(value: &T) -> String {
	serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("<unprintable: {}>", e))
}
