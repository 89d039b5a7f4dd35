//! Transaction commands

use clap::{Args, Subcommand};
use lumen_sdk::payload::decode_transaction;
use lumen_sdk::types::TransactionRequest;
use lumen_sdk::TxBuilder;
use serde_json::Value;

use super::{
    client, parse_bytes, receipt_json, receipts_summary, transaction_json, transaction_summary,
};
use crate::{config::Config, output::Output, CliError};

/// Script flags for commands that build a transaction
#[derive(Debug, Args)]
pub struct ScriptArgs {
    /// Script bytecode (hex)
    #[arg(long)]
    script: String,
    /// Script data (hex)
    #[arg(long)]
    data: Option<String>,
    /// Gas limit (defaults to config)
    #[arg(long)]
    gas_limit: Option<u64>,
    /// Gas price (defaults to config)
    #[arg(long)]
    gas_price: Option<u64>,
    /// Maturity height
    #[arg(long, default_value_t = 0)]
    maturity: u64,
}

impl ScriptArgs {
    fn into_request(self, config: &Config) -> Result<TransactionRequest, CliError> {
        let mut builder = TxBuilder::script(parse_bytes(&self.script)?)
            .gas_limit(self.gas_limit.unwrap_or(config.gas_limit))
            .gas_price(self.gas_price.unwrap_or(config.gas_price))
            .maturity(self.maturity);

        if let Some(data) = self.data {
            builder = builder.script_data(parse_bytes(&data)?);
        }

        Ok(builder.into_request())
    }
}

/// Transaction subcommands
#[derive(Debug, Subcommand)]
pub enum TxCommand {
    /// Simulate an encoded transaction
    DryRun {
        /// Encoded transaction (hex)
        tx: String,
    },
    /// Submit an encoded transaction
    Submit {
        /// Encoded transaction (hex)
        tx: String,
    },
    /// Build a script transaction and simulate it
    Call(ScriptArgs),
    /// Build a script transaction, submit it and fetch it back
    Send(ScriptArgs),
}

impl TxCommand {
    pub async fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        match self {
            TxCommand::DryRun { tx } => dry_run(config, &tx, json).await,
            TxCommand::Submit { tx } => submit(config, &tx, json).await,
            TxCommand::Call(args) => call(config, args.into_request(config)?, json).await,
            TxCommand::Send(args) => send(config, args.into_request(config)?, json).await,
        }
    }
}

async fn dry_run(config: &Config, raw: &str, json: bool) -> Result<(), CliError> {
    let tx = decode_transaction(raw)?;
    let receipts = client(config).dry_run(&tx).await?;

    Output::new(json)
        .field_value(
            "receipts",
            Value::Array(receipts.iter().map(receipt_json).collect()),
        )
        .message(&receipts_summary(&receipts))
        .print();

    Ok(())
}

async fn submit(config: &Config, raw: &str, json: bool) -> Result<(), CliError> {
    let tx = decode_transaction(raw)?;
    let id = client(config).submit(&tx).await?;

    Output::new(json)
        .field("id", &id.to_hex())
        .message(&format!("Submitted: {}", id))
        .print();

    Ok(())
}

async fn call(config: &Config, request: TransactionRequest, json: bool) -> Result<(), CliError> {
    let result = client(config).call(&request).await?;

    Output::new(json)
        .field_value(
            "receipts",
            Value::Array(result.receipts.iter().map(receipt_json).collect()),
        )
        .message(&receipts_summary(&result.receipts))
        .print();

    Ok(())
}

async fn send(config: &Config, request: TransactionRequest, json: bool) -> Result<(), CliError> {
    let tx = client(config).send_transaction(&request).await?;

    Output::new(json)
        .field_value("transaction", transaction_json(&tx))
        .message(&transaction_summary(&tx))
        .print();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_sdk::types::TransactionKind;

    fn args(script: &str) -> ScriptArgs {
        ScriptArgs {
            script: script.to_string(),
            data: Some("0x0102".to_string()),
            gas_limit: None,
            gas_price: Some(3),
            maturity: 0,
        }
    }

    #[test]
    fn test_script_args_use_config_defaults() {
        let config = Config {
            gas_limit: 77,
            ..Config::default()
        };
        let request = args("0x24040000").into_request(&config).unwrap();
        assert_eq!(request.gas_limit, Some(77));
        assert_eq!(request.gas_price, Some(3));
        match request.kind {
            TransactionKind::Script {
                script,
                script_data,
            } => {
                assert_eq!(script.as_ref(), &[0x24, 0x04, 0x00, 0x00]);
                assert_eq!(script_data.as_ref(), &[0x01, 0x02]);
            }
            other => panic!("unexpected kind: {:?}", other),
        }
    }

    #[test]
    fn test_script_args_reject_bad_hex() {
        let result = args("0xzz").into_request(&Config::default());
        assert!(matches!(result, Err(CliError::InvalidHex(_))));
    }
}
