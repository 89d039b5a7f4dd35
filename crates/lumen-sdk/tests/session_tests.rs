//! Session integration tests for lumen-sdk
//!
//! The client passes session ids and results straight through; the node
//! owns the session lifecycle.

use lumen_sdk::types::SessionId;
use lumen_sdk::{MockTransport, NodeClient, SdkError};
use serde_json::json;

#[tokio::test]
async fn test_session_lifecycle() {
    let transport = MockTransport::new();
    transport.set_response("startSession", json!({ "startSession": "S" }));
    let client = NodeClient::with_transport(transport.clone());

    let session = client.start_session().await.unwrap();
    assert_eq!(session.as_str(), "S");
    assert!(client.execute(&session, "op1").await.unwrap());
    assert!(client.reset(&session).await.unwrap());
    assert!(client.end_session(&session).await.unwrap());

    let requests = transport.requests();
    let names: Vec<&str> = requests
        .iter()
        .map(|r| r.operation_name.as_str())
        .collect();
    assert_eq!(names, vec!["startSession", "execute", "reset", "endSession"]);

    assert_eq!(requests[0].variables, json!({}));
    assert_eq!(requests[1].variables, json!({ "sessionId": "S", "op": "op1" }));
    assert_eq!(requests[2].variables, json!({ "sessionId": "S" }));
    assert_eq!(requests[3].variables, json!({ "sessionId": "S" }));
}

#[tokio::test]
async fn test_results_pass_through_unmodified() {
    let transport = MockTransport::new();
    transport.push_response("execute", json!({ "execute": false }));
    transport.push_response("reset", json!({ "reset": false }));
    transport.push_response("endSession", json!({ "endSession": false }));
    let client = NodeClient::with_transport(transport);

    let session = SessionId::new("S");
    assert!(!client.execute(&session, "op1").await.unwrap());
    assert!(!client.reset(&session).await.unwrap());
    assert!(!client.end_session(&session).await.unwrap());

    // Queued responses are spent; defaults take over
    assert!(client.execute(&session, "op2").await.unwrap());
}

#[tokio::test]
async fn test_no_local_session_validation() {
    let transport = MockTransport::new();
    let client = NodeClient::with_transport(transport.clone());

    // Never started, already ended: the client still forwards every call
    let session = SessionId::new("unknown");
    client.end_session(&session).await.unwrap();
    client.execute(&session, "op").await.unwrap();
    client.reset(&session).await.unwrap();

    assert_eq!(transport.requests().len(), 3);
}

#[tokio::test]
async fn test_node_rejection_is_an_error() {
    let transport = MockTransport::new();
    transport.remove_response("execute");
    let client = NodeClient::with_transport(transport);

    let result = client.execute(&SessionId::new("gone"), "op").await;
    assert!(matches!(result, Err(SdkError::GraphQl(_))));
}

#[tokio::test]
async fn test_each_start_returns_node_id() {
    let transport = MockTransport::new();
    transport.push_response("startSession", json!({ "startSession": "first" }));
    transport.push_response("startSession", json!({ "startSession": "second" }));
    let client = NodeClient::with_transport(transport);

    let a = client.start_session().await.unwrap();
    let b = client.start_session().await.unwrap();
    assert_eq!(a, SessionId::from("first"));
    assert_eq!(b, SessionId::from("second"));
}

#[tokio::test]
async fn test_concurrent_sessions() {
    let client = std::sync::Arc::new(NodeClient::new_mock());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let client = client.clone();
            tokio::spawn(async move {
                let session = client.start_session().await?;
                client.execute(&session, &format!("op{}", i)).await?;
                let ended = client.end_session(&session).await?;
                Ok::<bool, SdkError>(ended)
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().unwrap());
    }
}
