//! # lumen-sdk
//!
//! Rust client for Lumen ledger nodes over their GraphQL API.
//!
//! ## Features
//!
//! - **NodeClient**: typed access to blocks, transactions, coins, execution and sessions
//! - **TxBuilder**: Fluent API for building transactions
//! - **Transport**: pluggable request layer, with HTTP and in-memory mock implementations
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lumen_sdk::{NodeClient, TxBuilder};
//! use lumen_sdk::types::PaginationArgs;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = NodeClient::new("http://127.0.0.1:4000/graphql");
//!
//!     println!("Node version: {}", client.get_version().await?);
//!
//!     // Latest blocks
//!     for block in client.get_blocks(&PaginationArgs::last(5)).await? {
//!         println!("#{} {}", block.height, block.id);
//!     }
//!
//!     // Simulate a script without committing it
//!     let request = TxBuilder::script(vec![0x24, 0x04, 0x00, 0x00])
//!         .gas_limit(100_000)
//!         .into_request();
//!     let result = client.call(&request).await?;
//!     println!("{} receipts", result.receipts.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Sessions
//!
//! ```rust,no_run
//! use lumen_sdk::NodeClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = NodeClient::new_mock();
//!
//!     let session = client.start_session().await?;
//!     client.execute(&session, "ADDI r1 r0 1").await?;
//!     client.reset(&session).await?;
//!     client.end_session(&session).await?;
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod client;
mod error;
pub mod payload;
pub mod queries;
mod transport;
mod tx_builder;
pub mod types;

// Re-export main types
pub use client::NodeClient;
pub use error::SdkError;
pub use transport::{deserialize_response, query_body, MockTransport, RecordedRequest};

/// Re-export Transport trait for custom implementations
pub use transport::Transport;
pub use tx_builder::{build_transaction, TxBuilder, DEFAULT_GAS_LIMIT};

#[cfg(feature = "http")]
pub use transport::HttpTransport;

// Re-export ledger types for convenience
pub use lumen_types::{
    Address, BlockHeight, Bytes32, Color, ContractId, Input, Output, Receipt, Salt, Transaction,
    UtxoId, Witness,
};
