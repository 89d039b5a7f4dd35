//! SDK types

use bytes::Bytes;
use lumen_types::{
    Address, BlockHeight, Bytes32, Color, ContractId, Input, Output, Receipt, Salt, Transaction,
    Witness,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::payload;
use crate::SdkError;

/// Cursor pagination arguments for list queries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PaginationArgs {
    /// Return items after this cursor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    /// Return items before this cursor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    /// Return at most this many items from the start
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<i32>,
    /// Return at most this many items from the end
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<i32>,
}

impl PaginationArgs {
    /// First `n` items
    pub fn first(n: i32) -> Self {
        Self {
            first: Some(n),
            ..Default::default()
        }
    }

    /// Last `n` items
    pub fn last(n: i32) -> Self {
        Self {
            last: Some(n),
            ..Default::default()
        }
    }

    /// Start after the given cursor
    pub fn after(mut self, cursor: impl Into<String>) -> Self {
        self.after = Some(cursor.into());
        self
    }

    /// Stop before the given cursor
    pub fn before(mut self, cursor: impl Into<String>) -> Self {
        self.before = Some(cursor.into());
        self
    }
}

/// Transaction stub embedded in a block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockTransaction {
    /// Transaction id
    pub id: Bytes32,
    /// Hex-encoded canonical transaction
    pub raw_payload: String,
}

impl BlockTransaction {
    /// Decode the raw payload into a transaction
    pub fn decode(&self) -> Result<Transaction, SdkError> {
        payload::decode_transaction(&self.raw_payload)
    }
}

/// Block as reported by the node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Block id
    pub id: Bytes32,
    /// Block height
    #[serde(with = "u64_scalar")]
    pub height: BlockHeight,
    /// Block producer
    pub producer: Address,
    /// Transactions in execution order
    pub transactions: Vec<BlockTransaction>,
    /// Production time (RFC 3339)
    pub time: String,
}

/// Coin spend status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CoinStatus {
    /// Available to spend
    Unspent,
    /// Already consumed
    Spent,
}

/// Coin as reported by the node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coin {
    /// Coin id
    pub id: Bytes32,
    /// Owner
    pub owner: Address,
    /// Amount
    #[serde(with = "u64_scalar")]
    pub amount: u64,
    /// Asset color
    pub color: Color,
    /// Height before which the coin cannot be spent
    #[serde(with = "u64_scalar")]
    pub maturity: u64,
    /// Spend status
    pub status: CoinStatus,
    /// Height of the block that created the coin
    #[serde(with = "u64_scalar")]
    pub block_created: BlockHeight,
}

/// Opaque identifier of a remote execution session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Wrap a node-issued identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identifier string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Result of a simulated call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallResult {
    /// Receipts in execution order
    pub receipts: Vec<Receipt>,
}

/// Kind-specific part of a transaction request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionKind {
    /// Script transaction
    Script {
        /// Script bytecode
        script: Bytes,
        /// Data passed to the script
        script_data: Bytes,
    },
    /// Contract deployment
    Create {
        /// Index of the witness holding the bytecode
        bytecode_witness_index: u8,
        /// Salt for the contract id
        salt: Salt,
        /// Contracts the new contract may call
        static_contracts: Vec<ContractId>,
    },
}

impl Default for TransactionKind {
    fn default() -> Self {
        TransactionKind::Script {
            script: Bytes::new(),
            script_data: Bytes::new(),
        }
    }
}

/// Transaction request for building transactions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionRequest {
    /// Script or create
    pub kind: TransactionKind,
    /// Gas price (defaults to 0)
    pub gas_price: Option<u64>,
    /// Gas limit (defaults to [`crate::DEFAULT_GAS_LIMIT`])
    pub gas_limit: Option<u64>,
    /// Maturity height (defaults to 0)
    pub maturity: Option<u64>,
    /// Inputs
    pub inputs: Vec<Input>,
    /// Outputs
    pub outputs: Vec<Output>,
    /// Witnesses
    pub witnesses: Vec<Witness>,
}

/// `U64` scalar: decimal string on the wire, plain numbers accepted on input
pub(crate) mod u64_scalar {
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Number(u64),
    }

    pub fn serialize<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Repr::deserialize(deserializer)? {
            Repr::Text(s) => s.parse().map_err(de::Error::custom),
            Repr::Number(n) => Ok(n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pagination_skips_unset_fields() {
        let json = serde_json::to_value(PaginationArgs::first(5)).unwrap();
        assert_eq!(json, json!({ "first": 5 }));
    }

    #[test]
    fn test_pagination_counts_fit_graphql_int() {
        let json = serde_json::to_value(PaginationArgs::last(i32::MAX)).unwrap();
        assert_eq!(json, json!({ "last": 2_147_483_647 }));
    }

    #[test]
    fn test_pagination_default_is_empty() {
        let json = serde_json::to_value(PaginationArgs::default()).unwrap();
        assert_eq!(json, json!({}));
    }

    #[test]
    fn test_pagination_cursors() {
        let args = PaginationArgs::last(2).before("abc").after("xyz");
        let json = serde_json::to_value(args).unwrap();
        assert_eq!(json, json!({ "last": 2, "before": "abc", "after": "xyz" }));
    }

    #[test]
    fn test_coin_deserialize() {
        let coin: Coin = serde_json::from_value(json!({
            "id": format!("0x{}", "11".repeat(32)),
            "owner": format!("0x{}", "22".repeat(32)),
            "amount": "500",
            "color": format!("0x{}", "00".repeat(32)),
            "maturity": 0,
            "status": "UNSPENT",
            "blockCreated": "12",
        }))
        .unwrap();
        assert_eq!(coin.amount, 500);
        assert_eq!(coin.maturity, 0);
        assert_eq!(coin.block_created, 12);
        assert_eq!(coin.status, CoinStatus::Unspent);
    }

    #[test]
    fn test_u64_scalar_rejects_garbage() {
        let result: Result<Coin, _> = serde_json::from_value(json!({
            "id": format!("0x{}", "11".repeat(32)),
            "owner": format!("0x{}", "22".repeat(32)),
            "amount": "lots",
            "color": format!("0x{}", "00".repeat(32)),
            "maturity": "0",
            "status": "SPENT",
            "blockCreated": "1",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_block_serializes_height_as_string() {
        let block = Block {
            id: Bytes32::ZERO,
            height: 7,
            producer: Address::ZERO,
            transactions: vec![],
            time: "2021-01-01T00:00:00Z".to_string(),
        };
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["height"], json!("7"));
    }

    #[test]
    fn test_session_id_is_transparent() {
        let id: SessionId = serde_json::from_value(json!("abc-123")).unwrap();
        assert_eq!(id.as_str(), "abc-123");
        assert_eq!(id.to_string(), "abc-123");
        assert_eq!(serde_json::to_value(&id).unwrap(), json!("abc-123"));
    }

    #[test]
    fn test_default_request_is_empty_script() {
        let request = TransactionRequest::default();
        assert!(matches!(request.kind, TransactionKind::Script { .. }));
        assert!(request.gas_limit.is_none());
    }
}
