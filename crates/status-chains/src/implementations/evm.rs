//! EVM-compatible chains, Sonic included.

use crate::rpc::{RpcClient, RpcError};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

/// Receipt status of a successful transaction.
const STATUS_SUCCESS: &str = "0x1";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReceiptStatus {
	#[serde(default)]
	status: Option<String>,
	#[serde(default)]
	block_number: Option<String>,
}

/// Checks the receipt of `tx_hash`. A missing receipt means the transaction
/// is unknown or not mined yet.
pub async fn verify_receipt(rpc: &RpcClient, url: &str, tx_hash: &str) -> Result<bool, RpcError> {
	let receipt: Option<ReceiptStatus> = rpc
		.request(url, "eth_getTransactionReceipt", json!([tx_hash]))
		.await?;

	match receipt {
		Some(receipt) => {
			debug!(
				"Receipt for {} in block {:?} with status {:?}",
				tx_hash, receipt.block_number, receipt.status
			);
			Ok(receipt.status.as_deref() == Some(STATUS_SUCCESS))
		}
		None => {
			debug!("No receipt for {} yet", tx_hash);
			Ok(false)
		}
	}
}
