//! `SpokeVerifier` backed by the spoke chains' JSON-RPC nodes.

use crate::implementations::{evm, solana, sui};
use crate::rpc::RpcClient;
use async_trait::async_trait;
use status_types::{Result, SpokeProvider, SpokeVerifier};
use tracing::{info, instrument};

/// Verifies spoke transactions against the RPC endpoint configured for
/// each chain.
#[derive(Debug)]
pub struct RpcSpokeVerifier {
	rpc: RpcClient,
}

impl RpcSpokeVerifier {
	pub fn new(rpc: RpcClient) -> Self {
		Self { rpc }
	}
}

#[async_trait]
impl SpokeVerifier for RpcSpokeVerifier {
	#[instrument(skip(self, provider), fields(chain = %provider.chain_id(), kind = %provider.kind()))]
	async fn verify_tx_hash(&self, tx_hash: &str, provider: &SpokeProvider) -> Result<bool> {
		let url = provider.rpc_url();

		let verified = match provider {
			SpokeProvider::Evm(_) | SpokeProvider::Sonic(_) => {
				evm::verify_receipt(&self.rpc, url, tx_hash).await?
			}
			SpokeProvider::Solana(_) => solana::verify_signature(&self.rpc, url, tx_hash).await?,
			SpokeProvider::Sui(_) => sui::verify_transaction_block(&self.rpc, url, tx_hash).await?,
		};

		info!("Transaction {} verified: {}", tx_hash, verified);
		Ok(verified)
	}
}
