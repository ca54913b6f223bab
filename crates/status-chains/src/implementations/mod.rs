//! Transaction checks per spoke chain family.
//!
//! Each module answers one question for its family: did the transaction with
//! this hash land and succeed? `Ok(false)` covers unknown, pending and failed
//! transactions; `Err` is reserved for transport and decoding failures.

pub mod evm;
pub mod solana;
pub mod sui;
