//! Transport layer for GraphQL communication

use async_trait::async_trait;
use graphql_client::QueryBody;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::SdkError;

/// Transport trait for GraphQL communication (object-safe)
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute a document and return the response's `data` object
    async fn execute(&self, body: QueryBody<Value>) -> Result<Value, SdkError>;
}

/// Build a request body from raw parts
pub fn query_body(
    operation_name: &'static str,
    query: &'static str,
    variables: Value,
) -> QueryBody<Value> {
    QueryBody {
        variables,
        query,
        operation_name,
    }
}

/// Helper to deserialize response data into an operation's declared shape
pub fn deserialize_response<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, SdkError> {
    serde_json::from_value(value).map_err(|e| SdkError::Serialization(e.to_string()))
}

/// A request seen by [`MockTransport`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    /// Operation name
    pub operation_name: String,
    /// Variables as sent
    pub variables: Value,
}

/// Mock transport for testing.
///
/// Responses are keyed by operation name. A response may be queued for a
/// single use with [`MockTransport::push_response`]; queued responses are
/// consumed before the persistent one set by [`MockTransport::set_response`].
#[derive(Clone)]
pub struct MockTransport {
    responses: Arc<Mutex<HashMap<String, Value>>>,
    queued: Arc<Mutex<HashMap<String, Vec<Value>>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockTransport {
    /// Create a new mock transport with default responses
    pub fn new() -> Self {
        let mut defaults = HashMap::new();

        defaults.insert(
            "getVersion".to_string(),
            serde_json::json!({ "version": "0.1.0" }),
        );
        defaults.insert(
            "getTransaction".to_string(),
            serde_json::json!({ "transaction": null }),
        );
        defaults.insert(
            "getTransactions".to_string(),
            serde_json::json!({ "transactions": { "edges": [] } }),
        );
        defaults.insert("getBlock".to_string(), serde_json::json!({ "block": null }));
        defaults.insert(
            "getBlocks".to_string(),
            serde_json::json!({ "blocks": { "edges": [] } }),
        );
        defaults.insert("getCoin".to_string(), serde_json::json!({ "coin": null }));
        defaults.insert("dryRun".to_string(), serde_json::json!({ "dryRun": [] }));
        defaults.insert(
            "startSession".to_string(),
            serde_json::json!({ "startSession": "mock-session" }),
        );
        defaults.insert("execute".to_string(), serde_json::json!({ "execute": true }));
        defaults.insert("reset".to_string(), serde_json::json!({ "reset": true }));
        defaults.insert(
            "endSession".to_string(),
            serde_json::json!({ "endSession": true }),
        );

        Self {
            responses: Arc::new(Mutex::new(defaults)),
            queued: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the response data for an operation
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned (only possible if another thread panicked while holding the lock).
    pub fn set_response(&self, operation_name: &str, data: Value) {
        self.responses
            .lock()
            .expect("MockTransport mutex poisoned")
            .insert(operation_name.to_string(), data);
    }

    /// Queue a one-shot response for an operation
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn push_response(&self, operation_name: &str, data: Value) {
        self.queued
            .lock()
            .expect("MockTransport mutex poisoned")
            .entry(operation_name.to_string())
            .or_default()
            .push(data);
    }

    /// Remove the response for an operation so calls to it fail
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn remove_response(&self, operation_name: &str) {
        self.responses
            .lock()
            .expect("MockTransport mutex poisoned")
            .remove(operation_name);
    }

    /// Requests received so far, oldest first
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .expect("MockTransport mutex poisoned")
            .clone()
    }

    /// The most recent request
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests().pop()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, body: QueryBody<Value>) -> Result<Value, SdkError> {
        let operation_name = body.operation_name;
        self.requests
            .lock()
            .map_err(|_| SdkError::Transport("MockTransport mutex poisoned".to_string()))?
            .push(RecordedRequest {
                operation_name: operation_name.to_string(),
                variables: body.variables,
            });

        let queued = self
            .queued
            .lock()
            .map_err(|_| SdkError::Transport("MockTransport mutex poisoned".to_string()))?
            .get_mut(operation_name)
            .filter(|queue| !queue.is_empty())
            .map(|queue| queue.remove(0));

        if let Some(data) = queued {
            return Ok(data);
        }

        let response = self
            .responses
            .lock()
            .map_err(|_| SdkError::Transport("MockTransport mutex poisoned".to_string()))?
            .get(operation_name)
            .cloned();

        response.ok_or_else(|| {
            SdkError::GraphQl(vec![format!("Unknown operation: {}", operation_name)])
        })
    }
}

/// HTTP transport posting GraphQL documents to a node endpoint
#[cfg(feature = "http")]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
}

#[cfg(feature = "http")]
impl HttpTransport {
    /// Create a new HTTP transport
    pub fn new(url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.to_string(),
        }
    }

    /// Endpoint URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, body: QueryBody<Value>) -> Result<Value, SdkError> {
        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| SdkError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SdkError::Transport(format!(
                "{} returned HTTP {}",
                body.operation_name, status
            )));
        }

        let response: graphql_client::Response<Value> = response
            .json()
            .await
            .map_err(|e| SdkError::Transport(e.to_string()))?;

        into_data(response)
    }
}

/// Split a GraphQL response into its data or its errors
#[cfg_attr(not(feature = "http"), allow(dead_code))]
fn into_data(response: graphql_client::Response<Value>) -> Result<Value, SdkError> {
    if let Some(errors) = response.errors.filter(|errors| !errors.is_empty()) {
        return Err(SdkError::GraphQl(
            errors.into_iter().map(|e| e.message).collect(),
        ));
    }

    response
        .data
        .ok_or_else(|| SdkError::Transport("No data in response".to_string()))
}
