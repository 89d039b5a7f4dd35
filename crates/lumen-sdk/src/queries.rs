//! GraphQL documents for every node operation.
//!
//! Each operation is a marker type implementing [`GraphQLQuery`] with a
//! module of the same name holding its document, variables and response
//! shape.

use graphql_client::{GraphQLQuery, QueryBody};
use serde::Deserialize;

use crate::types::{Block, Coin};

/// List container returned by paginated queries
#[derive(Debug, Deserialize)]
pub struct Connection<T> {
    /// Wrapped items; absent only when the node breaks the schema
    pub edges: Option<Vec<Edge<T>>>,
}

/// One wrapped item of a [`Connection`]
#[derive(Debug, Deserialize)]
pub struct Edge<T> {
    /// The item
    pub node: T,
}

/// Raw binary payload of a transaction or receipt
#[derive(Debug, Clone, Deserialize)]
pub struct RawPayload {
    /// Hex-encoded canonical bytes
    #[serde(rename = "rawPayload")]
    pub raw_payload: String,
}

macro_rules! graphql_operation {
    ($marker:ident, $module:ident) => {
        #[doc = concat!("Marker for the `", stringify!($module), "` operation")]
        pub struct $marker;

        impl GraphQLQuery for $marker {
            type Variables = $module::Variables;
            type ResponseData = $module::ResponseData;

            fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
                QueryBody {
                    variables,
                    query: $module::QUERY,
                    operation_name: $module::OPERATION_NAME,
                }
            }
        }
    };
}

// ==================== Read path ====================

graphql_operation!(GetVersion, get_version);
/// `getVersion`
pub mod get_version {
    use serde::{Deserialize, Serialize};

    /// Operation name
    pub const OPERATION_NAME: &str = "getVersion";
    /// Document
    pub const QUERY: &str = "query getVersion { version }";

    /// No variables
    #[derive(Debug, Serialize)]
    pub struct Variables {}

    /// Response data
    #[derive(Debug, Deserialize)]
    pub struct ResponseData {
        /// Node version string
        pub version: String,
    }
}

graphql_operation!(GetTransaction, get_transaction);
/// `getTransaction`
pub mod get_transaction {
    use lumen_types::Bytes32;
    use serde::{Deserialize, Serialize};

    use super::RawPayload;

    /// Operation name
    pub const OPERATION_NAME: &str = "getTransaction";
    /// Document
    pub const QUERY: &str = "query getTransaction($transactionId: HexString256!) {\n  transaction(id: $transactionId) {\n    id\n    rawPayload\n  }\n}\n";

    /// Variables
    #[derive(Debug, Serialize)]
    pub struct Variables {
        /// Transaction id
        #[serde(rename = "transactionId")]
        pub transaction_id: Bytes32,
    }

    /// Response data
    #[derive(Debug, Deserialize)]
    pub struct ResponseData {
        /// `null` when the node does not know the id
        pub transaction: Option<RawPayload>,
    }
}

graphql_operation!(GetTransactions, get_transactions);
/// `getTransactions`
pub mod get_transactions {
    use serde::Deserialize;

    use super::{Connection, RawPayload};

    /// Operation name
    pub const OPERATION_NAME: &str = "getTransactions";
    /// Document
    pub const QUERY: &str = "query getTransactions($after: String, $before: String, $first: Int, $last: Int) {\n  transactions(after: $after, before: $before, first: $first, last: $last) {\n    edges {\n      node {\n        id\n        rawPayload\n      }\n    }\n  }\n}\n";

    /// Variables
    pub type Variables = crate::types::PaginationArgs;

    /// Response data
    #[derive(Debug, Deserialize)]
    pub struct ResponseData {
        /// Transaction connection
        #[serde(default)]
        pub transactions: Option<Connection<RawPayload>>,
    }
}

graphql_operation!(GetBlock, get_block);
/// `getBlock`
pub mod get_block {
    use lumen_types::Bytes32;
    use serde::{Deserialize, Serialize};

    use super::Block;

    /// Operation name
    pub const OPERATION_NAME: &str = "getBlock";
    /// Document
    pub const QUERY: &str = "query getBlock($blockId: HexString256!) {\n  block(id: $blockId) {\n    id\n    height\n    producer\n    transactions {\n      id\n      rawPayload\n    }\n    time\n  }\n}\n";

    /// Variables
    #[derive(Debug, Serialize)]
    pub struct Variables {
        /// Block id
        #[serde(rename = "blockId")]
        pub block_id: Bytes32,
    }

    /// Response data
    #[derive(Debug, Deserialize)]
    pub struct ResponseData {
        /// `null` when the node does not know the id
        pub block: Option<Block>,
    }
}

graphql_operation!(GetBlocks, get_blocks);
/// `getBlocks`
pub mod get_blocks {
    use serde::Deserialize;

    use super::{Block, Connection};

    /// Operation name
    pub const OPERATION_NAME: &str = "getBlocks";
    /// Document
    pub const QUERY: &str = "query getBlocks($after: String, $before: String, $first: Int, $last: Int) {\n  blocks(after: $after, before: $before, first: $first, last: $last) {\n    edges {\n      node {\n        id\n        height\n        producer\n        transactions {\n          id\n          rawPayload\n        }\n        time\n      }\n    }\n  }\n}\n";

    /// Variables
    pub type Variables = crate::types::PaginationArgs;

    /// Response data
    #[derive(Debug, Deserialize)]
    pub struct ResponseData {
        /// Block connection
        #[serde(default)]
        pub blocks: Option<Connection<Block>>,
    }
}

graphql_operation!(GetCoin, get_coin);
/// `getCoin`
pub mod get_coin {
    use lumen_types::Bytes32;
    use serde::{Deserialize, Serialize};

    use super::Coin;

    /// Operation name
    pub const OPERATION_NAME: &str = "getCoin";
    /// Document
    pub const QUERY: &str = "query getCoin($coinId: HexString256!) {\n  coin(id: $coinId) {\n    id\n    owner\n    amount\n    color\n    maturity\n    status\n    blockCreated\n  }\n}\n";

    /// Variables
    #[derive(Debug, Serialize)]
    pub struct Variables {
        /// Coin id
        #[serde(rename = "coinId")]
        pub coin_id: Bytes32,
    }

    /// Response data
    #[derive(Debug, Deserialize)]
    pub struct ResponseData {
        /// `null` when the node does not know the id
        pub coin: Option<Coin>,
    }
}

// ==================== Write / simulate path ====================

graphql_operation!(DryRun, dry_run);
/// `dryRun`
pub mod dry_run {
    use serde::{Deserialize, Serialize};

    use super::RawPayload;

    /// Operation name
    pub const OPERATION_NAME: &str = "dryRun";
    /// Document
    pub const QUERY: &str = "mutation dryRun($encodedTransaction: HexString!) {\n  dryRun(tx: $encodedTransaction) {\n    rawPayload\n  }\n}\n";

    /// Variables
    #[derive(Debug, Serialize)]
    pub struct Variables {
        /// Hex-encoded transaction
        #[serde(rename = "encodedTransaction")]
        pub encoded_transaction: String,
    }

    /// Response data
    #[derive(Debug, Deserialize)]
    pub struct ResponseData {
        /// Receipts in execution order
        #[serde(rename = "dryRun")]
        pub dry_run: Vec<RawPayload>,
    }
}

graphql_operation!(Submit, submit);
/// `submit`
pub mod submit {
    use lumen_types::Bytes32;
    use serde::{Deserialize, Serialize};

    /// Operation name
    pub const OPERATION_NAME: &str = "submit";
    /// Document
    pub const QUERY: &str =
        "mutation submit($encodedTransaction: HexString!) {\n  submit(tx: $encodedTransaction)\n}\n";

    /// Variables
    #[derive(Debug, Serialize)]
    pub struct Variables {
        /// Hex-encoded transaction
        #[serde(rename = "encodedTransaction")]
        pub encoded_transaction: String,
    }

    /// Response data
    #[derive(Debug, Deserialize)]
    pub struct ResponseData {
        /// Node-assigned transaction id
        pub submit: Bytes32,
    }
}

// ==================== Sessions ====================

graphql_operation!(StartSession, start_session);
/// `startSession`
pub mod start_session {
    use serde::{Deserialize, Serialize};

    use crate::types::SessionId;

    /// Operation name
    pub const OPERATION_NAME: &str = "startSession";
    /// Document
    pub const QUERY: &str = "mutation startSession {\n  startSession\n}\n";

    /// No variables
    #[derive(Debug, Serialize)]
    pub struct Variables {}

    /// Response data
    #[derive(Debug, Deserialize)]
    pub struct ResponseData {
        /// New session id
        #[serde(rename = "startSession")]
        pub start_session: SessionId,
    }
}

graphql_operation!(EndSession, end_session);
/// `endSession`
pub mod end_session {
    use serde::{Deserialize, Serialize};

    use crate::types::SessionId;

    /// Operation name
    pub const OPERATION_NAME: &str = "endSession";
    /// Document
    pub const QUERY: &str = "mutation endSession($sessionId: ID!) {\n  endSession(id: $sessionId)\n}\n";

    /// Variables
    #[derive(Debug, Serialize)]
    pub struct Variables {
        /// Session to end
        #[serde(rename = "sessionId")]
        pub session_id: SessionId,
    }

    /// Response data
    #[derive(Debug, Deserialize)]
    pub struct ResponseData {
        /// Success flag
        #[serde(rename = "endSession")]
        pub end_session: bool,
    }
}

graphql_operation!(Execute, execute);
/// `execute`
pub mod execute {
    use serde::{Deserialize, Serialize};

    use crate::types::SessionId;

    /// Operation name
    pub const OPERATION_NAME: &str = "execute";
    /// Document
    pub const QUERY: &str =
        "mutation execute($sessionId: ID!, $op: String!) {\n  execute(id: $sessionId, op: $op)\n}\n";

    /// Variables
    #[derive(Debug, Serialize)]
    pub struct Variables {
        /// Target session
        #[serde(rename = "sessionId")]
        pub session_id: SessionId,
        /// Operation to run
        pub op: String,
    }

    /// Response data
    #[derive(Debug, Deserialize)]
    pub struct ResponseData {
        /// Success flag
        pub execute: bool,
    }
}

graphql_operation!(Reset, reset);
/// `reset`
pub mod reset {
    use serde::{Deserialize, Serialize};

    use crate::types::SessionId;

    /// Operation name
    pub const OPERATION_NAME: &str = "reset";
    /// Document
    pub const QUERY: &str = "mutation reset($sessionId: ID!) {\n  reset(id: $sessionId)\n}\n";

    /// Variables
    #[derive(Debug, Serialize)]
    pub struct Variables {
        /// Session to reset
        #[serde(rename = "sessionId")]
        pub session_id: SessionId,
    }

    /// Response data
    #[derive(Debug, Deserialize)]
    pub struct ResponseData {
        /// Success flag
        pub reset: bool,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_query_carries_operation_name() {
        let body = GetVersion::build_query(get_version::Variables {});
        assert_eq!(body.operation_name, "getVersion");
        assert!(body.query.starts_with("query getVersion"));
    }

    #[test]
    fn test_mutations_are_mutations() {
        for query in [
            dry_run::QUERY,
            submit::QUERY,
            start_session::QUERY,
            end_session::QUERY,
            execute::QUERY,
            reset::QUERY,
        ] {
            assert!(query.starts_with("mutation "), "{query}");
        }
    }

    #[test]
    fn test_document_names_match_operation_names() {
        let pairs = [
            (get_transaction::QUERY, get_transaction::OPERATION_NAME),
            (get_transactions::QUERY, get_transactions::OPERATION_NAME),
            (get_block::QUERY, get_block::OPERATION_NAME),
            (get_blocks::QUERY, get_blocks::OPERATION_NAME),
            (get_coin::QUERY, get_coin::OPERATION_NAME),
            (dry_run::QUERY, dry_run::OPERATION_NAME),
            (submit::QUERY, submit::OPERATION_NAME),
        ];
        for (query, name) in pairs {
            let header = query.split(['(', ' ', '{']).nth(1).unwrap();
            assert_eq!(header, name);
        }
    }

    #[test]
    fn test_empty_variables_serialize_as_object() {
        let json = serde_json::to_value(get_version::Variables {}).unwrap();
        assert_eq!(json, serde_json::json!({}));
        let json = serde_json::to_value(start_session::Variables {}).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }

    #[test]
    fn test_transaction_connection_without_edges() {
        let data: get_transactions::ResponseData =
            serde_json::from_value(serde_json::json!({ "transactions": {} })).unwrap();
        assert!(data.transactions.unwrap().edges.is_none());

        let data: get_transactions::ResponseData =
            serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(data.transactions.is_none());
    }

    #[test]
    fn test_connection_without_edges() {
        let data: get_blocks::ResponseData =
            serde_json::from_value(serde_json::json!({ "blocks": {} })).unwrap();
        assert!(data.blocks.unwrap().edges.is_none());
    }
}
