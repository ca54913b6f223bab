//! Cross-chain status orchestration.
//!
//! `StatusOrchestrator` ties a spoke transaction to its intent on the hub
//! chain, the intent's solver status, and the final destination transaction.
//! The verifier, relay and solver clients are injected through
//! `StatusOrchestratorBuilder`.

use status_config::StatusConfig;
use status_types::{RelayApi, SolverApi, SpokeChainConfig, SpokeChainId, SpokeVerifier, StatusError};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

pub mod orchestrator;

pub use orchestrator::StatusOrchestrator;

pub struct StatusOrchestratorBuilder {
	chains: HashMap<SpokeChainId, SpokeChainConfig>,
	hub_chain: SpokeChainId,
	execution_timeout: Duration,
	verifier: Option<Arc<dyn SpokeVerifier>>,
	relay: Option<Arc<dyn RelayApi>>,
	solver: Option<Arc<dyn SolverApi>>,
}

impl StatusOrchestratorBuilder {
	pub fn new(config: &StatusConfig) -> Self {
		Self {
			chains: config.chains.clone(),
			hub_chain: config.sodax.hub_chain.clone(),
			execution_timeout: config.sodax.intent_execution_timeout(),
			verifier: None,
			relay: None,
			solver: None,
		}
	}

	pub fn with_verifier(mut self, verifier: Arc<dyn SpokeVerifier>) -> Self {
		self.verifier = Some(verifier);
		self
	}

	pub fn with_relay(mut self, relay: Arc<dyn RelayApi>) -> Self {
		self.relay = Some(relay);
		self
	}

	pub fn with_solver(mut self, solver: Arc<dyn SolverApi>) -> Self {
		self.solver = Some(solver);
		self
	}

	/// Overrides the configured wait for intent execution.
	pub fn with_execution_timeout(mut self, timeout: Duration) -> Self {
		self.execution_timeout = timeout;
		self
	}

	pub fn build(self) -> Result<StatusOrchestrator, StatusError> {
		let verifier = self
			.verifier
			.ok_or_else(|| missing_component("spoke verifier"))?;
		let relay = self.relay.ok_or_else(|| missing_component("relay client"))?;
		let solver = self.solver.ok_or_else(|| missing_component("solver client"))?;

		Ok(StatusOrchestrator {
			chains: self.chains,
			hub_chain: self.hub_chain,
			execution_timeout: self.execution_timeout,
			verifier,
			relay,
			solver,
		})
	}
}

fn missing_component(name: &str) -> StatusError {
	StatusError::Other(anyhow::anyhow!("No {} configured", name))
}
