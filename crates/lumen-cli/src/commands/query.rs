//! Query commands

use clap::{Args, Subcommand};
use lumen_sdk::types::PaginationArgs;
use serde_json::Value;

use super::{client, parse_id, transaction_json, transaction_summary};
use crate::{config::Config, output::Output, CliError};

/// Cursor pagination flags shared by list queries
#[derive(Debug, Args)]
pub struct PageArgs {
    /// Return the first N items
    #[arg(long)]
    first: Option<i32>,
    /// Return the last N items
    #[arg(long)]
    last: Option<i32>,
    /// Start after this cursor
    #[arg(long)]
    after: Option<String>,
    /// End before this cursor
    #[arg(long)]
    before: Option<String>,
}

impl From<PageArgs> for PaginationArgs {
    fn from(args: PageArgs) -> Self {
        PaginationArgs {
            after: args.after,
            before: args.before,
            first: args.first,
            last: args.last,
        }
    }
}

/// Query subcommands
#[derive(Debug, Subcommand)]
pub enum QueryCommand {
    /// Query a transaction by id
    Tx {
        /// Transaction id
        id: String,
    },
    /// List transactions
    Txs {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Query a block by id
    Block {
        /// Block id
        id: String,
    },
    /// List blocks
    Blocks {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Query a coin by id
    Coin {
        /// Coin id
        id: String,
    },
}

impl QueryCommand {
    pub async fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        match self {
            QueryCommand::Tx { id } => query_tx(config, &id, json).await,
            QueryCommand::Txs { page } => query_txs(config, page.into(), json).await,
            QueryCommand::Block { id } => query_block(config, &id, json).await,
            QueryCommand::Blocks { page } => query_blocks(config, page.into(), json).await,
            QueryCommand::Coin { id } => query_coin(config, &id, json).await,
        }
    }
}

pub async fn query_version(config: &Config, json: bool) -> Result<(), CliError> {
    let version = client(config).get_version().await?;

    Output::new(json)
        .field("version", &version)
        .message(&format!("Node version: {}", version))
        .print();

    Ok(())
}

async fn query_tx(config: &Config, id: &str, json: bool) -> Result<(), CliError> {
    let id = parse_id(id)?;
    let tx = client(config)
        .get_transaction(&id)
        .await?
        .ok_or_else(|| CliError::NotFound(format!("transaction {}", id)))?;

    Output::new(json)
        .field_value("transaction", transaction_json(&tx))
        .message(&transaction_summary(&tx))
        .print();

    Ok(())
}

async fn query_txs(config: &Config, args: PaginationArgs, json: bool) -> Result<(), CliError> {
    let txs = client(config).get_transactions(&args).await?;

    let lines: Vec<String> = txs
        .iter()
        .map(|tx| {
            format!(
                "{}  {}",
                tx.id(),
                if tx.is_script() { "script" } else { "create" }
            )
        })
        .collect();

    Output::new(json)
        .field_u64("count", txs.len() as u64)
        .field_value(
            "transactions",
            Value::Array(txs.iter().map(transaction_json).collect()),
        )
        .message(&format!("{} transaction(s)\n{}", txs.len(), lines.join("\n")))
        .print();

    Ok(())
}

async fn query_block(config: &Config, id: &str, json: bool) -> Result<(), CliError> {
    let id = parse_id(id)?;
    let block = client(config)
        .get_block(&id)
        .await?
        .ok_or_else(|| CliError::NotFound(format!("block {}", id)))?;

    Output::new(json)
        .field_value("block", serde_json::to_value(&block)?)
        .message(&format!(
            "Block #{} {}\n  producer: {}\n  time: {}\n  transactions: {}",
            block.height,
            block.id,
            block.producer,
            block.time,
            block.transactions.len()
        ))
        .print();

    Ok(())
}

async fn query_blocks(config: &Config, args: PaginationArgs, json: bool) -> Result<(), CliError> {
    let blocks = client(config).get_blocks(&args).await?;

    let lines: Vec<String> = blocks
        .iter()
        .map(|b| format!("#{}  {}  {} tx", b.height, b.id, b.transactions.len()))
        .collect();

    Output::new(json)
        .field_u64("count", blocks.len() as u64)
        .field_value("blocks", serde_json::to_value(&blocks)?)
        .message(&format!("{} block(s)\n{}", blocks.len(), lines.join("\n")))
        .print();

    Ok(())
}

async fn query_coin(config: &Config, id: &str, json: bool) -> Result<(), CliError> {
    let id = parse_id(id)?;
    let coin = client(config)
        .get_coin(&id)
        .await?
        .ok_or_else(|| CliError::NotFound(format!("coin {}", id)))?;

    Output::new(json)
        .field_value("coin", serde_json::to_value(&coin)?)
        .message(&format!(
            "Coin {}\n  owner: {}\n  amount: {}\n  color: {}\n  status: {:?}\n  created at: {}",
            coin.id, coin.owner, coin.amount, coin.color, coin.status, coin.block_created
        ))
        .print();

    Ok(())
}
