//! Solana, via signature statuses.

use crate::rpc::{RpcClient, RpcError};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct SignatureStatuses {
	value: Vec<Option<SignatureStatus>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignatureStatus {
	#[serde(default)]
	err: Option<Value>,
	#[serde(default)]
	confirmation_status: Option<String>,
}

/// Checks that the signature is at least confirmed and carries no error.
pub async fn verify_signature(rpc: &RpcClient, url: &str, signature: &str) -> Result<bool, RpcError> {
	let statuses: SignatureStatuses = rpc
		.request(
			url,
			"getSignatureStatuses",
			json!([[signature], { "searchTransactionHistory": true }]),
		)
		.await?;

	let Some(Some(status)) = statuses.value.into_iter().next() else {
		debug!("Signature {} not found", signature);
		return Ok(false);
	};

	debug!(
		"Signature {} has confirmation status {:?}",
		signature, status.confirmation_status
	);

	let confirmed = matches!(
		status.confirmation_status.as_deref(),
		Some("confirmed") | Some("finalized")
	);
	let succeeded = matches!(status.err, None | Some(Value::Null));

	Ok(confirmed && succeeded)
}
