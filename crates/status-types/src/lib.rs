//! Shared types for the intent status service.
//!
//! Holds the request and response shapes of the HTTP API, the data returned by
//! the relay and solver services, the spoke chain descriptors, and the client
//! traits that the orchestrator is built against.

pub mod api;
pub mod chains;
pub mod errors;
pub mod intent;
pub mod relay;

pub use api::*;
pub use chains::*;
pub use errors::*;
pub use intent::*;
pub use relay::*;
