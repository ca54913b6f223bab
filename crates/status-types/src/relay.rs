//! Relay API packet types and client trait.

use crate::errors::Result;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Action name of the relay API call that lists packets of a transaction.
pub const GET_TRANSACTION_PACKETS: &str = "get_transaction_packets";

/// Request body sent to the relay API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayRequest<P> {
	pub action: String,
	pub params: P,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionPacketsParams {
	pub chain_id: String,
	pub tx_hash: String,
}

impl RelayRequest<TransactionPacketsParams> {
	pub fn transaction_packets(chain_id: impl Into<String>, tx_hash: impl Into<String>) -> Self {
		Self {
			action: GET_TRANSACTION_PACKETS.to_string(),
			params: TransactionPacketsParams {
				chain_id: chain_id.into(),
				tx_hash: tx_hash.into(),
			},
		}
	}
}

/// Delivery state of a relay packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PacketStatus {
	Pending,
	Validating,
	Executing,
	Executed,
	#[serde(other)]
	Unknown,
}

/// One leg of a cross-chain message as tracked by the relay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayPacket {
	#[serde(default, deserialize_with = "deserialize_chain_id")]
	pub src_chain_id: Option<String>,
	#[serde(default)]
	pub src_tx_hash: Option<String>,
	#[serde(default)]
	pub src_address: Option<String>,
	#[serde(default)]
	pub status: Option<PacketStatus>,
	#[serde(default, deserialize_with = "deserialize_chain_id")]
	pub dst_chain_id: Option<String>,
	#[serde(default)]
	pub conn_sn: Option<Value>,
	#[serde(default)]
	pub dst_address: Option<String>,
	#[serde(default)]
	pub dst_tx_hash: Option<String>,
	#[serde(default)]
	pub signatures: Option<Vec<String>>,
	#[serde(default)]
	pub payload: Option<String>,
}

impl RelayPacket {
	pub fn is_executed(&self) -> bool {
		self.status == Some(PacketStatus::Executed)
	}
}

/// Typed view of a `get_transaction_packets` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PacketsResponse {
	#[serde(default)]
	pub success: Option<bool>,
	#[serde(default)]
	pub data: Vec<RelayPacket>,
}

impl PacketsResponse {
	/// The executed packet that originated on `relay_chain_id`, if any.
	pub fn executed_from(&self, relay_chain_id: &str) -> Option<&RelayPacket> {
		if self.success == Some(false) {
			return None;
		}
		self.data.iter().find(|packet| {
			packet.src_chain_id.as_deref() == Some(relay_chain_id) && packet.is_executed()
		})
	}
}

/// Destination chain of the first packet in a raw packets response. Empty
/// strings and zero are treated as absent.
pub fn first_destination_chain(packets: &Value) -> Option<String> {
	chain_id_string(packets.get("data")?.get(0)?.get("dst_chain_id")?)
}

fn chain_id_string(value: &Value) -> Option<String> {
	match value {
		Value::String(s) if !s.is_empty() => Some(s.clone()),
		Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
		_ => None,
	}
}

/// Relay chain ids arrive as numbers or strings depending on the endpoint.
fn deserialize_chain_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Option::<Value>::deserialize(deserializer)?;
	Ok(value.as_ref().and_then(chain_id_string))
}

/// Client for the intent relay API.
#[async_trait]
pub trait RelayApi: Send + Sync {
	/// Raw `get_transaction_packets` response for a transaction.
	async fn get_transaction_packets(&self, relay_chain_id: &str, tx_hash: &str) -> Result<Value>;

	/// Polls the relay until the packet sent by `spoke_tx_hash` from
	/// `relay_chain_id` is executed, or `timeout` elapses.
	async fn wait_until_intent_executed(
		&self,
		relay_chain_id: &str,
		spoke_tx_hash: &str,
		timeout: Duration,
	) -> Result<RelayPacket>;
}
