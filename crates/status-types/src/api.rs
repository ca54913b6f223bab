//! HTTP API request and response types.

use crate::{
	chains::{SpokeChainConfig, SpokeChainId, SpokeChainKind},
	errors::{Result, StatusError},
	intent::IntentStatus,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Body of `POST /api/sodax-status`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRequest {
	#[serde(default)]
	pub tx_hash: Option<String>,
	#[serde(default)]
	pub chain_id: Option<String>,
}

impl StatusRequest {
	pub fn new(tx_hash: impl Into<String>, chain_id: impl Into<String>) -> Self {
		Self {
			tx_hash: Some(tx_hash.into()),
			chain_id: Some(chain_id.into()),
		}
	}

	/// Returns `(tx_hash, chain_id)`; missing and empty values are rejected,
	/// the transaction hash first.
	pub fn validate(&self) -> Result<(&str, &str)> {
		let tx_hash = non_empty(&self.tx_hash).ok_or(StatusError::MissingTxHash)?;
		let chain_id = non_empty(&self.chain_id).ok_or(StatusError::MissingChainId)?;
		Ok((tx_hash, chain_id))
	}
}

fn non_empty(value: &Option<String>) -> Option<&str> {
	value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Outcome of the submission step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResult {
	/// Hash of the intent transaction on the hub chain
	pub dst_intent_tx_hash: String,
	/// Relay chain id of the source chain
	pub intent_relay_chain_id: String,
}

/// Successful response of `POST /api/sodax-status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
	pub intent_status: IntentStatus,
	pub packets_data: Value,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub transaction_out_hash: Option<String>,
}

/// Error body returned for every non-200 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
	pub error: String,
}

impl ErrorResponse {
	pub fn new(error: impl Into<String>) -> Self {
		Self {
			error: error.into(),
		}
	}
}

/// Entry of `GET /api/chains`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainInfo {
	pub id: String,
	pub name: String,
	pub kind: SpokeChainKind,
}

impl ChainInfo {
	/// Lists a chain table sorted by chain id.
	pub fn list(chains: &HashMap<SpokeChainId, SpokeChainConfig>) -> Vec<Self> {
		let mut infos: Vec<Self> = chains
			.iter()
			.map(|(id, config)| Self {
				id: id.to_string(),
				name: config.name.clone(),
				kind: SpokeChainKind::for_chain(id.as_str()),
			})
			.collect();
		infos.sort_by(|a, b| a.id.cmp(&b.id));
		infos
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_validate_request() {
		let request = StatusRequest::new("0x111", "sonic");
		assert_eq!(request.validate().unwrap(), ("0x111", "sonic"));
	}

	#[test]
	fn test_missing_fields() {
		let request: StatusRequest = serde_json::from_value(json!({ "chainId": "sonic" })).unwrap();
		assert!(matches!(request.validate(), Err(StatusError::MissingTxHash)));

		let request: StatusRequest = serde_json::from_value(json!({ "txHash": "0x1" })).unwrap();
		assert!(matches!(request.validate(), Err(StatusError::MissingChainId)));

		let request: StatusRequest =
			serde_json::from_value(json!({ "txHash": "", "chainId": null })).unwrap();
		assert!(matches!(request.validate(), Err(StatusError::MissingTxHash)));

		let request: StatusRequest = serde_json::from_value(json!({})).unwrap();
		assert!(matches!(request.validate(), Err(StatusError::MissingTxHash)));
	}

	#[test]
	fn test_response_omits_missing_out_hash() {
		let response = StatusResponse {
			intent_status: IntentStatus::new(2),
			packets_data: json!({ "data": [] }),
			transaction_out_hash: None,
		};

		assert_eq!(
			serde_json::to_value(&response).unwrap(),
			json!({ "intentStatus": { "status": 2 }, "packetsData": { "data": [] } })
		);
	}

	#[test]
	fn test_chain_info_list_is_sorted() {
		let chains = HashMap::from([
			(
				SpokeChainId::from("sui"),
				SpokeChainConfig {
					name: "Sui".to_string(),
					rpc_url: "https://sui.example".to_string(),
					relay_chain_id: 21,
				},
			),
			(
				SpokeChainId::from("0x2105.base"),
				SpokeChainConfig {
					name: "Base".to_string(),
					rpc_url: "https://base.example".to_string(),
					relay_chain_id: 30,
				},
			),
		]);

		let infos = ChainInfo::list(&chains);
		assert_eq!(infos[0].id, "0x2105.base");
		assert_eq!(infos[0].kind, SpokeChainKind::Evm);
		assert_eq!(infos[1].kind, SpokeChainKind::Sui);
		assert_eq!(
			serde_json::to_value(&infos[1]).unwrap(),
			json!({ "id": "sui", "name": "Sui", "kind": "sui" })
		);
	}
}
