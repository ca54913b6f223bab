//! Sui, via transaction block effects.

use crate::rpc::{RpcClient, RpcError};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct TransactionBlock {
	#[serde(default)]
	effects: Option<Effects>,
}

#[derive(Debug, Deserialize)]
struct Effects {
	status: ExecutionStatus,
}

#[derive(Debug, Deserialize)]
struct ExecutionStatus {
	status: String,
	#[serde(default)]
	error: Option<String>,
}

/// Checks that the transaction block executed successfully. Sui answers
/// unknown digests with a JSON-RPC error, which counts as not found.
pub async fn verify_transaction_block(rpc: &RpcClient, url: &str, digest: &str) -> Result<bool, RpcError> {
	let block: TransactionBlock = match rpc
		.request(
			url,
			"sui_getTransactionBlock",
			json!([digest, { "showEffects": true }]),
		)
		.await
	{
		Ok(block) => block,
		Err(RpcError::Rpc { code, message }) => {
			debug!("Transaction block {} not available ({}): {}", digest, code, message);
			return Ok(false);
		}
		Err(e) => return Err(e),
	};

	match block.effects {
		Some(effects) => {
			if let Some(error) = &effects.status.error {
				debug!("Transaction block {} failed: {}", digest, error);
			}
			Ok(effects.status.status == "success")
		}
		None => Ok(false),
	}
}
