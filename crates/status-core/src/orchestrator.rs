//! The verify → wait → status → packets → destination sequence.

use status_types::{
	first_destination_chain, ChainInfo, RelayApi, Result, SolverApi, SpokeChainConfig,
	SpokeChainId, SpokeProvider, SpokeVerifier, StatusError, StatusRequest,
	StatusResponse, SubmitResult,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, field, info, instrument, warn};

/// Resolves the cross-chain status of a spoke transaction.
///
/// Holds only immutable configuration and shared clients, so one instance
/// serves any number of concurrent requests.
pub struct StatusOrchestrator {
	pub(crate) chains: HashMap<SpokeChainId, SpokeChainConfig>,
	pub(crate) hub_chain: SpokeChainId,
	pub(crate) execution_timeout: Duration,
	pub(crate) verifier: Arc<dyn SpokeVerifier>,
	pub(crate) relay: Arc<dyn RelayApi>,
	pub(crate) solver: Arc<dyn SolverApi>,
}

impl StatusOrchestrator {
	/// Runs the full status check for one request.
	///
	/// Fails with a validation error for missing input, `ConfigNotFound` for
	/// an unknown chain, a pending error (`VerificationPending` or `Timeout`)
	/// when the intent has not been relayed yet, and `StatusUnavailable` when
	/// the status or packet lookup fails.
	#[instrument(skip_all, fields(tx_hash = field::Empty, chain_id = field::Empty))]
	pub async fn check_status(&self, request: &StatusRequest) -> Result<StatusResponse> {
		let (tx_hash, chain_id) = request.validate()?;
		tracing::Span::current()
			.record("tx_hash", tx_hash)
			.record("chain_id", chain_id);

		let provider = SpokeProvider::for_chain(chain_id, &self.chains)?;
		let submit = self.submit_intent(tx_hash, &provider).await?;

		self.status_and_packets(&submit, tx_hash).await
	}

	/// Verifies the spoke transaction and resolves the hash of the intent
	/// transaction on the hub chain.
	pub async fn submit_intent(&self, tx_hash: &str, provider: &SpokeProvider) -> Result<SubmitResult> {
		let verified = self
			.verifier
			.verify_tx_hash(tx_hash, provider)
			.await
			.unwrap_or_else(|e| {
				warn!("Verification of {} failed: {}", tx_hash, e);
				false
			});

		if !verified {
			info!("Transaction {} not verified on {}", tx_hash, provider.chain_id());
			return Err(StatusError::VerificationPending);
		}

		let intent_relay_chain_id = provider.intent_relay_chain_id();

		let dst_intent_tx_hash = if provider.chain_id() == &self.hub_chain {
			debug!("Transaction {} is on the hub chain, no relay wait needed", tx_hash);
			tx_hash.to_string()
		} else {
			let packet = self
				.relay
				.wait_until_intent_executed(&intent_relay_chain_id, tx_hash, self.execution_timeout)
				.await
				.map_err(|e| {
					info!("Intent execution for {} not available: {}", tx_hash, e);
					match e {
						StatusError::Timeout(ms) => StatusError::Timeout(ms),
						_ => StatusError::VerificationPending,
					}
				})?;

			packet.dst_tx_hash.filter(|h| !h.is_empty()).ok_or_else(|| {
				warn!("Executed packet for {} carries no destination hash", tx_hash);
				StatusError::VerificationPending
			})?
		};

		info!(
			"Intent for {} relayed as {} (relay chain {})",
			tx_hash, dst_intent_tx_hash, intent_relay_chain_id
		);

		Ok(SubmitResult {
			dst_intent_tx_hash,
			intent_relay_chain_id,
		})
	}

	/// Fetches the intent status and the source packets, then tries to
	/// resolve the final destination transaction.
	pub async fn status_and_packets(
		&self,
		submit: &SubmitResult,
		source_tx_hash: &str,
	) -> Result<StatusResponse> {
		let intent_status = self
			.solver
			.get_status(&submit.dst_intent_tx_hash)
			.await
			.map_err(|e| {
				error!("Failed to get status of {}: {}", submit.dst_intent_tx_hash, e);
				StatusError::StatusUnavailable
			})?;

		let packets_data = self
			.relay
			.get_transaction_packets(&submit.intent_relay_chain_id, source_tx_hash)
			.await
			.map_err(|e| {
				error!("Failed to get packets of {}: {}", source_tx_hash, e);
				StatusError::StatusUnavailable
			})?;

		let transaction_out_hash = match (
			first_destination_chain(&packets_data),
			intent_status.fill_hash(),
		) {
			(Some(dst_chain_id), Some(fill_tx_hash)) => {
				self.resolve_destination(&dst_chain_id, fill_tx_hash).await
			}
			_ => None,
		};

		Ok(StatusResponse {
			intent_status,
			packets_data,
			transaction_out_hash,
		})
	}

	/// Best-effort wait for the fill transaction to reach its destination.
	/// Every failure, transport errors included, yields `None`.
	async fn resolve_destination(&self, dst_chain_id: &str, fill_tx_hash: &str) -> Option<String> {
		match self
			.relay
			.wait_until_intent_executed(dst_chain_id, fill_tx_hash, self.execution_timeout)
			.await
		{
			Ok(packet) => packet.dst_tx_hash.filter(|h| !h.is_empty()),
			Err(e) => {
				debug!(
					"Destination of fill {} on {} not resolved: {}",
					fill_tx_hash, dst_chain_id, e
				);
				None
			}
		}
	}

	/// Configured source chains, sorted by id.
	pub fn chains(&self) -> Vec<ChainInfo> {
		ChainInfo::list(&self.chains)
	}

	pub fn hub_chain(&self) -> &SpokeChainId {
		&self.hub_chain
	}
}
