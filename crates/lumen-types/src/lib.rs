//! # lumen-types
//!
//! Core ledger types for Lumen.
//!
//! This crate provides:
//! - [`Bytes32`] and the 32-byte newtypes built on it ([`Address`], [`Color`], [`ContractId`])
//! - [`Transaction`](transaction::Transaction) - Script and create transactions
//! - [`Receipt`](receipt::Receipt) - Execution receipts reported by the node
//! - [`codec`] - The canonical binary encoding shared with the node

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
mod primitives;
pub mod receipt;
pub mod transaction;

pub use codec::{Decode, DecodeError, Encode};
pub use primitives::{Address, Bytes32, Color, ContractId, PrimitiveError, Salt};
pub use receipt::Receipt;
pub use transaction::{Input, Output, Transaction, UtxoId, Witness};

/// Block height type
pub type BlockHeight = u64;

/// Machine word; every integer on the wire is one
pub type Word = u64;
