//! Configuration types for the status service.

use serde::{Deserialize, Serialize};
use status_types::{SpokeChainConfig, SpokeChainId};
use std::collections::HashMap;
use std::time::Duration;

/// Complete service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StatusConfig {
	/// HTTP server and logging settings
	#[serde(default)]
	pub server: ServerSettings,
	/// Sodax network endpoints and timeouts
	#[serde(default)]
	pub sodax: SodaxSettings,
	/// Spoke chain table, keyed by Sodax chain id
	#[serde(default = "default_chains")]
	pub chains: HashMap<SpokeChainId, SpokeChainConfig>,
}

/// HTTP server settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerSettings {
	pub host: String,
	pub port: u16,
	pub log_level: String,
	pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	#[default]
	Pretty,
	Json,
}

/// Sodax network settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SodaxSettings {
	/// Chain where intents settle
	pub hub_chain: SpokeChainId,
	/// Intent relay API endpoint
	pub relayer_api_endpoint: String,
	/// Solver API base URL
	pub solver_api_endpoint: String,
	/// Bound on each wait for intent execution
	pub intent_execution_timeout_ms: u64,
	/// Delay between relay polls while waiting
	pub poll_interval_ms: u64,
	/// Timeout of a single outgoing HTTP request
	pub request_timeout_ms: u64,
	/// Retries of a failed spoke RPC call
	pub rpc_max_retries: u32,
}

impl SodaxSettings {
	pub fn intent_execution_timeout(&self) -> Duration {
		Duration::from_millis(self.intent_execution_timeout_ms)
	}

	pub fn poll_interval(&self) -> Duration {
		Duration::from_millis(self.poll_interval_ms)
	}

	pub fn request_timeout(&self) -> Duration {
		Duration::from_millis(self.request_timeout_ms)
	}
}

impl Default for ServerSettings {
	fn default() -> Self {
		Self {
			host: "0.0.0.0".to_string(),
			port: 3000,
			log_level: "info".to_string(),
			log_format: LogFormat::Pretty,
		}
	}
}

impl Default for SodaxSettings {
	fn default() -> Self {
		Self {
			hub_chain: SpokeChainId::from(SpokeChainId::SONIC),
			relayer_api_endpoint: "https://xcall-relay.nw.iconblockchain.xyz".to_string(),
			solver_api_endpoint: "https://sodax-solver.iconblockchain.xyz".to_string(),
			intent_execution_timeout_ms: 30_000,
			poll_interval_ms: 1_000,
			request_timeout_ms: 10_000,
			rpc_max_retries: 3,
		}
	}
}

impl Default for StatusConfig {
	fn default() -> Self {
		Self {
			server: ServerSettings::default(),
			sodax: SodaxSettings::default(),
			chains: default_chains(),
		}
	}
}

/// Mainnet spoke chains supported by the Sodax network.
pub fn default_chains() -> HashMap<SpokeChainId, SpokeChainConfig> {
	let table: [(&str, &str, &str, u64); 11] = [
		("ethereum", "Ethereum Mainnet", "https://ethereum-rpc.publicnode.com", 2),
		("0xa86a.avax", "Avalanche Mainnet", "https://api.avax.network/ext/bc/C/rpc", 6),
		("0xa4b1.arbitrum", "Arbitrum Mainnet", "https://arb1.arbitrum.io/rpc", 23),
		("0x2105.base", "Base Mainnet", "https://mainnet.base.org", 30),
		("0x38.bsc", "BSC Mainnet", "https://bsc-dataseed.bnbchain.org", 4),
		("sonic", "Sonic Mainnet", "https://rpc.soniclabs.com", 146),
		("sui", "Sui Mainnet", "https://fullnode.mainnet.sui.io:443", 21),
		("0xa.optimism", "Optimism Mainnet", "https://mainnet.optimism.io", 24),
		("0x89.polygon", "Polygon Mainnet", "https://polygon-rpc.com", 5),
		("solana", "Solana Mainnet", "https://api.mainnet-beta.solana.com", 1),
		("hyper", "HyperEVM Mainnet", "https://rpc.hyperliquid.xyz/evm", 26745),
	];

	table
		.into_iter()
		.map(|(id, name, rpc_url, relay_chain_id)| {
			(
				SpokeChainId::from(id),
				SpokeChainConfig {
					name: name.to_string(),
					rpc_url: rpc_url.to_string(),
					relay_chain_id,
				},
			)
		})
		.collect()
}
