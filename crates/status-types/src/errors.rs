//! Error types for the status service.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StatusError>;

#[derive(Error, Debug)]
pub enum StatusError {
	#[error("Transaction hash is required")]
	MissingTxHash,

	#[error("Chain ID is required")]
	MissingChainId,

	#[error("Sodax config not found for chain: {0}")]
	ConfigNotFound(String),

	#[error("Transaction verification failed or still pending")]
	VerificationPending,

	#[error("Failed to fetch status data")]
	StatusUnavailable,

	#[error("Intent execution timeout after {0}ms")]
	Timeout(u64),

	#[error("RPC error: {0}")]
	Rpc(String),

	#[error("Relay error: {0}")]
	Relay(String),

	#[error("Network error: {0}")]
	Network(String),

	#[error("Invalid response: {0}")]
	InvalidResponse(String),

	#[error(transparent)]
	Other(#[from] anyhow::Error),
}

/// How a failure is surfaced to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
	/// Missing or malformed input.
	Validation,
	/// Not yet available; the caller may retry later.
	Pending,
	/// Downstream or unexpected failure.
	Downstream,
}

impl StatusError {
	pub fn class(&self) -> ErrorClass {
		match self {
			StatusError::MissingTxHash | StatusError::MissingChainId => ErrorClass::Validation,
			StatusError::VerificationPending | StatusError::Timeout(_) => ErrorClass::Pending,
			_ => ErrorClass::Downstream,
		}
	}
}
