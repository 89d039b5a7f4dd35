//! NodeClient - main GraphQL client

use graphql_client::{GraphQLQuery, QueryBody};
use lumen_types::{Bytes32, Receipt, Transaction};
use tracing::{debug, warn};

use crate::payload;
use crate::queries::{self, Connection};
use crate::transport::{deserialize_response, MockTransport, Transport};
use crate::tx_builder::build_transaction;
use crate::types::{Block, CallResult, Coin, PaginationArgs, SessionId, TransactionRequest};
use crate::SdkError;

#[cfg(feature = "http")]
use crate::transport::HttpTransport;

/// Lumen client for a single node endpoint.
///
/// Holds no state besides its transport, so a shared reference can be used
/// from many tasks at once. Session ids are passed through untouched; the
/// node, not the client, decides whether a session is still alive.
pub struct NodeClient {
    transport: Box<dyn Transport>,
}

impl NodeClient {
    /// Create a new client with HTTP transport
    #[cfg(feature = "http")]
    pub fn new(url: &str) -> Self {
        Self {
            transport: Box::new(HttpTransport::new(url)),
        }
    }

    /// Create a new client with mock transport (for testing)
    pub fn new_mock() -> Self {
        Self::with_transport(MockTransport::new())
    }

    /// Create a client with a custom transport
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
        }
    }

    /// Helper method to run one operation and deserialize its data
    async fn request<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, SdkError> {
        let body = Q::build_query(variables);
        let body = QueryBody {
            variables: serde_json::to_value(&body.variables)?,
            query: body.query,
            operation_name: body.operation_name,
        };
        debug!(operation = body.operation_name, "sending request");
        let data = self.transport.execute(body).await?;
        deserialize_response(data)
    }

    // ==================== Node Info ====================

    /// Get the node version
    pub async fn get_version(&self) -> Result<String, SdkError> {
        let data = self
            .request::<queries::GetVersion>(queries::get_version::Variables {})
            .await?;
        Ok(data.version)
    }

    // ==================== Transaction Queries ====================

    /// Get a transaction by id; `None` if the node does not know it
    pub async fn get_transaction(&self, id: &Bytes32) -> Result<Option<Transaction>, SdkError> {
        let data = self
            .request::<queries::GetTransaction>(queries::get_transaction::Variables {
                transaction_id: *id,
            })
            .await?;

        data.transaction
            .map(|tx| payload::decode_transaction(&tx.raw_payload))
            .transpose()
    }

    /// Get a page of transactions in node order
    pub async fn get_transactions(
        &self,
        args: &PaginationArgs,
    ) -> Result<Vec<Transaction>, SdkError> {
        let data = self
            .request::<queries::GetTransactions>(args.clone())
            .await?;

        unwrap_edges(data.transactions, "transactions")?
            .iter()
            .map(|tx| payload::decode_transaction(&tx.raw_payload))
            .collect()
    }

    // ==================== Block Queries ====================

    /// Get a block by id; `None` if the node does not know it
    pub async fn get_block(&self, id: &Bytes32) -> Result<Option<Block>, SdkError> {
        let data = self
            .request::<queries::GetBlock>(queries::get_block::Variables { block_id: *id })
            .await?;
        Ok(data.block)
    }

    /// Get a page of blocks in node order
    pub async fn get_blocks(&self, args: &PaginationArgs) -> Result<Vec<Block>, SdkError> {
        let data = self.request::<queries::GetBlocks>(args.clone()).await?;
        unwrap_edges(data.blocks, "blocks")
    }

    // ==================== Coin Queries ====================

    /// Get a coin by id; `None` if the node does not know it
    pub async fn get_coin(&self, id: &Bytes32) -> Result<Option<Coin>, SdkError> {
        let data = self
            .request::<queries::GetCoin>(queries::get_coin::Variables { coin_id: *id })
            .await?;
        Ok(data.coin)
    }

    // ==================== Execution ====================

    /// Execute a transaction without persisting its effects
    pub async fn dry_run(&self, tx: &Transaction) -> Result<Vec<Receipt>, SdkError> {
        let data = self
            .request::<queries::DryRun>(queries::dry_run::Variables {
                encoded_transaction: payload::encode_transaction(tx),
            })
            .await?;

        debug!(receipts = data.dry_run.len(), "dry run completed");
        data.dry_run
            .iter()
            .map(|receipt| payload::decode_receipt(&receipt.raw_payload))
            .collect()
    }

    /// Submit a transaction; returns the node-assigned id.
    ///
    /// Not idempotent: submitting the same transaction twice is two submissions.
    pub async fn submit(&self, tx: &Transaction) -> Result<Bytes32, SdkError> {
        let data = self
            .request::<queries::Submit>(queries::submit::Variables {
                encoded_transaction: payload::encode_transaction(tx),
            })
            .await?;
        debug!(id = %data.submit, "transaction submitted");
        Ok(data.submit)
    }

    /// Build a transaction from a request and dry-run it
    pub async fn call(&self, request: &TransactionRequest) -> Result<CallResult, SdkError> {
        let tx = build_transaction(request)?;
        let receipts = self.dry_run(&tx).await?;
        Ok(CallResult { receipts })
    }

    /// Build, submit, and fetch back the stored transaction.
    ///
    /// Fails with [`SdkError::TransactionNotFound`] if the node accepts the
    /// submission but does not report the transaction on the immediate
    /// follow-up lookup. There is exactly one lookup.
    pub async fn send_transaction(
        &self,
        request: &TransactionRequest,
    ) -> Result<Transaction, SdkError> {
        let tx = build_transaction(request)?;
        let id = self.submit(&tx).await?;

        match self.get_transaction(&id).await? {
            Some(stored) => Ok(stored),
            None => {
                warn!(id = %id, "submitted transaction not reported by node");
                Err(SdkError::TransactionNotFound(id))
            }
        }
    }

    // ==================== Sessions ====================

    /// Open an interactive execution session on the node
    pub async fn start_session(&self) -> Result<SessionId, SdkError> {
        let data = self
            .request::<queries::StartSession>(queries::start_session::Variables {})
            .await?;
        debug!(session = %data.start_session, "session started");
        Ok(data.start_session)
    }

    /// Run one operation inside a session
    pub async fn execute(&self, session: &SessionId, op: &str) -> Result<bool, SdkError> {
        let data = self
            .request::<queries::Execute>(queries::execute::Variables {
                session_id: session.clone(),
                op: op.to_string(),
            })
            .await?;
        Ok(data.execute)
    }

    /// Reset a session's execution state without ending it
    pub async fn reset(&self, session: &SessionId) -> Result<bool, SdkError> {
        let data = self
            .request::<queries::Reset>(queries::reset::Variables {
                session_id: session.clone(),
            })
            .await?;
        Ok(data.reset)
    }

    /// End a session; the id must not be used afterwards
    pub async fn end_session(&self, session: &SessionId) -> Result<bool, SdkError> {
        let data = self
            .request::<queries::EndSession>(queries::end_session::Variables {
                session_id: session.clone(),
            })
            .await?;
        debug!(session = %session, ended = data.end_session, "session end requested");
        Ok(data.end_session)
    }
}

// ==================== Helper Functions ====================

/// Flatten a connection into its nodes, in order
fn unwrap_edges<T>(connection: Option<Connection<T>>, field: &str) -> Result<Vec<T>, SdkError> {
    let edges = connection
        .and_then(|c| c.edges)
        .ok_or_else(|| SdkError::Transport(format!("response is missing `{}.edges`", field)))?;
    Ok(edges.into_iter().map(|edge| edge.node).collect())
}
