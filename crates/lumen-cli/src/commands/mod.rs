//! Subcommands and shared helpers

pub mod query;
pub mod session;
pub mod tx;

use lumen_sdk::payload::to_hex;
use lumen_sdk::{Bytes32, NodeClient, Receipt, Transaction};
use lumen_types::Encode;
use serde_json::{json, Value};

use crate::{config::Config, CliError};

/// Client for the configured node
pub fn client(config: &Config) -> NodeClient {
    tracing::debug!(url = %config.node_url, "connecting");
    NodeClient::new(&config.node_url)
}

/// Parse a 32-byte id given on the command line
pub fn parse_id(s: &str) -> Result<Bytes32, CliError> {
    Bytes32::from_hex(s).map_err(|e| CliError::InvalidHex(e.to_string()))
}

/// Parse hex bytes given on the command line
pub fn parse_bytes(s: &str) -> Result<Vec<u8>, CliError> {
    lumen_sdk::payload::from_hex(s).map_err(|e| CliError::InvalidHex(e.to_string()))
}

pub fn transaction_json(tx: &Transaction) -> Value {
    json!({
        "id": tx.id().to_hex(),
        "kind": if tx.is_script() { "script" } else { "create" },
        "gas_price": tx.gas_price(),
        "gas_limit": tx.gas_limit(),
        "maturity": tx.maturity(),
        "inputs": tx.inputs().len(),
        "outputs": tx.outputs().len(),
        "witnesses": tx.witnesses().len(),
        "raw": to_hex(&tx.encode()),
    })
}

pub fn transaction_summary(tx: &Transaction) -> String {
    format!(
        "Transaction {}\n  kind: {}\n  gas: {} @ {}\n  maturity: {}\n  inputs: {}, outputs: {}, witnesses: {}",
        tx.id(),
        if tx.is_script() { "script" } else { "create" },
        tx.gas_limit(),
        tx.gas_price(),
        tx.maturity(),
        tx.inputs().len(),
        tx.outputs().len(),
        tx.witnesses().len(),
    )
}

pub fn receipt_json(receipt: &Receipt) -> Value {
    json!({
        "kind": receipt.kind(),
        "failure": receipt.is_failure(),
        "raw": to_hex(&receipt.encode()),
    })
}

pub fn receipts_summary(receipts: &[Receipt]) -> String {
    let mut lines = vec![format!("{} receipt(s)", receipts.len())];
    for (i, receipt) in receipts.iter().enumerate() {
        let status = if receipt.is_failure() { " (failed)" } else { "" };
        lines.push(format!("  [{}] {}{}", i, receipt.kind(), status));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_sdk::{ContractId, TxBuilder};

    #[test]
    fn test_parse_id() {
        let id = parse_id(&format!("0x{}", "11".repeat(32))).unwrap();
        assert_eq!(id, Bytes32::from_bytes([0x11; 32]));
        assert!(matches!(parse_id("0x1234"), Err(CliError::InvalidHex(_))));
    }

    #[test]
    fn test_transaction_json() {
        let tx = TxBuilder::script(vec![0x24]).gas_limit(10).build().unwrap();
        let value = transaction_json(&tx);
        assert_eq!(value["kind"], "script");
        assert_eq!(value["gas_limit"], 10);
        assert_eq!(value["id"], tx.id().to_hex());
    }

    #[test]
    fn test_receipts_summary_marks_failures() {
        let receipts = vec![
            Receipt::Panic {
                id: ContractId::ZERO,
                reason: 1,
                pc: 0,
                is: 0,
            },
            Receipt::ScriptResult {
                result: 0,
                gas_used: 5,
            },
        ];
        let summary = receipts_summary(&receipts);
        assert!(summary.contains("[0] Panic (failed)"));
        assert!(summary.contains("[1] ScriptResult"));
    }
}
