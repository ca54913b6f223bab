//! Spoke chain descriptors and the verification trait.

use crate::errors::{Result, StatusError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Key of a spoke chain as used by the Sodax network (`"sonic"`,
/// `"0xa4b1.arbitrum"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpokeChainId(String);

impl SpokeChainId {
	pub const SONIC: &'static str = "sonic";
	pub const SOLANA: &'static str = "solana";
	pub const SUI: &'static str = "sui";

	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for SpokeChainId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for SpokeChainId {
	fn from(s: &str) -> Self {
		Self(s.to_string())
	}
}

/// Configuration of one spoke chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpokeChainConfig {
	/// Human-readable chain name
	pub name: String,
	/// JSON-RPC endpoint used for transaction verification
	pub rpc_url: String,
	/// Chain id the intent relay uses for this chain
	pub relay_chain_id: u64,
}

/// Provider family of a spoke chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpokeChainKind {
	Evm,
	Sonic,
	Solana,
	Sui,
}

impl fmt::Display for SpokeChainKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			SpokeChainKind::Evm => "evm",
			SpokeChainKind::Sonic => "sonic",
			SpokeChainKind::Solana => "solana",
			SpokeChainKind::Sui => "sui",
		};
		f.write_str(name)
	}
}

impl SpokeChainKind {
	/// Provider family for a chain key. Every key without a dedicated
	/// provider is treated as an EVM chain.
	pub fn for_chain(chain_id: &str) -> Self {
		match chain_id {
			SpokeChainId::SONIC => SpokeChainKind::Sonic,
			SpokeChainId::SOLANA => SpokeChainKind::Solana,
			SpokeChainId::SUI => SpokeChainKind::Sui,
			_ => SpokeChainKind::Evm,
		}
	}
}

/// A configured spoke chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpokeChain {
	pub id: SpokeChainId,
	pub config: SpokeChainConfig,
}

/// Read-only provider for a spoke chain, one variant per provider family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpokeProvider {
	Evm(SpokeChain),
	Sonic(SpokeChain),
	Solana(SpokeChain),
	Sui(SpokeChain),
}

impl SpokeProvider {
	/// Builds the provider for `chain_id` from the configured chain table.
	pub fn for_chain(
		chain_id: &str,
		chains: &HashMap<SpokeChainId, SpokeChainConfig>,
	) -> Result<Self> {
		let config = chains
			.get(&SpokeChainId::from(chain_id))
			.cloned()
			.ok_or_else(|| StatusError::ConfigNotFound(chain_id.to_string()))?;

		let chain = SpokeChain {
			id: SpokeChainId::from(chain_id),
			config,
		};

		Ok(match SpokeChainKind::for_chain(chain_id) {
			SpokeChainKind::Sonic => SpokeProvider::Sonic(chain),
			SpokeChainKind::Solana => SpokeProvider::Solana(chain),
			SpokeChainKind::Sui => SpokeProvider::Sui(chain),
			SpokeChainKind::Evm => SpokeProvider::Evm(chain),
		})
	}

	pub fn kind(&self) -> SpokeChainKind {
		match self {
			SpokeProvider::Evm(_) => SpokeChainKind::Evm,
			SpokeProvider::Sonic(_) => SpokeChainKind::Sonic,
			SpokeProvider::Solana(_) => SpokeChainKind::Solana,
			SpokeProvider::Sui(_) => SpokeChainKind::Sui,
		}
	}

	pub fn chain(&self) -> &SpokeChain {
		match self {
			SpokeProvider::Evm(chain)
			| SpokeProvider::Sonic(chain)
			| SpokeProvider::Solana(chain)
			| SpokeProvider::Sui(chain) => chain,
		}
	}

	pub fn chain_id(&self) -> &SpokeChainId {
		&self.chain().id
	}

	pub fn rpc_url(&self) -> &str {
		&self.chain().config.rpc_url
	}

	/// Chain id under which the intent relay tracks packets of this chain.
	pub fn intent_relay_chain_id(&self) -> String {
		self.chain().config.relay_chain_id.to_string()
	}
}

/// Verifies that a transaction landed successfully on its spoke chain.
#[async_trait]
pub trait SpokeVerifier: Send + Sync {
	/// Returns `Ok(false)` when the transaction is unknown, pending or
	/// reverted; `Err` only for transport and decoding failures.
	async fn verify_tx_hash(&self, tx_hash: &str, provider: &SpokeProvider) -> Result<bool>;
}
