//! HTTP clients for the Sodax relay and solver services.
//!
//! - `relay`: `get_transaction_packets` calls against the intent relay API and
//!   the bounded polling used to wait for a packet to be executed
//! - `solver`: intent status lookups against the solver API

pub mod relay;
pub mod solver;

pub use relay::HttpRelayClient;
pub use solver::HttpSolverClient;

use status_types::StatusError;
use std::time::Duration;

pub(crate) fn http_client(request_timeout: Duration) -> Result<reqwest::Client, StatusError> {
	reqwest::Client::builder()
		.timeout(request_timeout)
		.build()
		.map_err(|e| StatusError::Network(format!("Failed to create HTTP client: {}", e)))
}
