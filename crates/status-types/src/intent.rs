//! Intent status as reported by the solver API.

use crate::errors::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Status code of an intent. The codes are owned by the solver service;
/// anything outside the known set is kept as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntentStatusCode {
	NotFound,
	Queued,
	Processing,
	Solved,
	Failed,
	Unknown(i64),
}

impl IntentStatusCode {
	pub fn code(&self) -> i64 {
		match self {
			IntentStatusCode::NotFound => -1,
			IntentStatusCode::Queued => 1,
			IntentStatusCode::Processing => 2,
			IntentStatusCode::Solved => 3,
			IntentStatusCode::Failed => 4,
			IntentStatusCode::Unknown(code) => *code,
		}
	}

	pub fn label(&self) -> String {
		match self {
			IntentStatusCode::NotFound => "NOT_FOUND".to_string(),
			IntentStatusCode::Queued => "QUEUED".to_string(),
			IntentStatusCode::Processing => "PROCESSING".to_string(),
			IntentStatusCode::Solved => "SOLVED".to_string(),
			IntentStatusCode::Failed => "FAILED".to_string(),
			IntentStatusCode::Unknown(code) => format!("UNKNOWN ({})", code),
		}
	}

	/// Whether the intent reached a final state.
	pub fn is_terminal(&self) -> bool {
		matches!(self, IntentStatusCode::Solved | IntentStatusCode::Failed)
	}
}

impl From<i64> for IntentStatusCode {
	fn from(code: i64) -> Self {
		match code {
			-1 => IntentStatusCode::NotFound,
			1 => IntentStatusCode::Queued,
			2 => IntentStatusCode::Processing,
			3 => IntentStatusCode::Solved,
			4 => IntentStatusCode::Failed,
			other => IntentStatusCode::Unknown(other),
		}
	}
}

impl fmt::Display for IntentStatusCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.label())
	}
}

/// Status object returned by the solver API. Fields this service does not
/// interpret are preserved in `extra` and passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentStatus {
	pub status: i64,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub fill_tx_hash: Option<String>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl IntentStatus {
	pub fn new(status: i64) -> Self {
		Self {
			status,
			fill_tx_hash: None,
			extra: Map::new(),
		}
	}

	pub fn with_fill_tx_hash(mut self, hash: impl Into<String>) -> Self {
		self.fill_tx_hash = Some(hash.into());
		self
	}

	pub fn code(&self) -> IntentStatusCode {
		IntentStatusCode::from(self.status)
	}

	/// Fill transaction hash, ignoring empty strings.
	pub fn fill_hash(&self) -> Option<&str> {
		self.fill_tx_hash.as_deref().filter(|h| !h.is_empty())
	}
}

/// Client for the solver status API.
#[async_trait]
pub trait SolverApi: Send + Sync {
	/// Fetches the status of the intent created by `intent_tx_hash` on the
	/// hub chain.
	async fn get_status(&self, intent_tx_hash: &str) -> Result<IntentStatus>;
}
