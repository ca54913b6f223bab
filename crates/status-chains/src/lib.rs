//! Spoke chain transaction verification.
//!
//! Every spoke chain exposes a JSON-RPC node. This crate provides a small
//! JSON-RPC client with retry/backoff and the per-family checks that decide
//! whether a transaction landed successfully:
//!
//! - `implementations::evm`: EVM chains and Sonic, via transaction receipts
//! - `implementations::solana`: signature statuses
//! - `implementations::sui`: transaction block effects
//!
//! `RpcSpokeVerifier` dispatches over `SpokeProvider` and implements the
//! `SpokeVerifier` trait the orchestrator depends on.

pub mod implementations;
pub mod rpc;
pub mod verifier;

pub use rpc::{RpcClient, RpcError};
pub use verifier::RpcSpokeVerifier;
