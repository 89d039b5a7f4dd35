//! # lumen-cli
//!
//! Command-line interface for Lumen nodes.
//!
//! ## Usage
//!
//! ```bash
//! # Node and ledger queries
//! lumen version
//! lumen query block 0x...
//! lumen query blocks --last 10
//! lumen query tx 0x...
//! lumen query coin 0x...
//!
//! # Execution
//! lumen tx dry-run 0x...
//! lumen tx submit 0x...
//! lumen tx call --script 0x24040000
//!
//! # Interactive sessions
//! lumen session start
//! lumen session exec <SESSION> "ADDI r1 r0 1"
//! lumen session end <SESSION>
//! ```

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

pub use config::Config;
pub use error::CliError;
pub use output::Output;

/// Lumen CLI
#[derive(Parser, Debug)]
#[command(name = "lumen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// GraphQL endpoint URL
    #[arg(long, global = true)]
    node_url: Option<String>,

    /// Log requests to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// CLI commands
#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the node version
    Version,
    /// Query ledger state
    #[command(subcommand)]
    Query(commands::query::QueryCommand),
    /// Transaction operations
    #[command(subcommand)]
    Tx(commands::tx::TxCommand),
    /// Interactive execution sessions
    #[command(subcommand)]
    Session(commands::session::SessionCommand),
    /// Show or edit configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
        /// Set node URL
        #[arg(long)]
        set_url: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Load config
    let mut config = Config::load();

    // Override node URL if provided
    if let Some(node_url) = cli.node_url {
        config.node_url = node_url;
    }

    let result = match cli.command {
        Commands::Version => commands::query::query_version(&config, cli.json).await,
        Commands::Query(cmd) => cmd.execute(&config, cli.json).await,
        Commands::Tx(cmd) => cmd.execute(&config, cli.json).await,
        Commands::Session(cmd) => cmd.execute(&config, cli.json).await,
        Commands::Config { show, set_url } => handle_config(&mut config, show, set_url, cli.json),
    };

    if let Err(e) = result {
        if cli.json {
            println!(
                "{}",
                serde_json::json!({
                    "error": e.to_string(),
                    "success": false
                })
            );
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn handle_config(
    config: &mut Config,
    show: bool,
    set_url: Option<String>,
    json: bool,
) -> Result<(), CliError> {
    if let Some(url) = set_url {
        config.node_url = url;
        config.save()?;
        Output::new(json)
            .field("status", "saved")
            .message("Configuration saved")
            .print();
    } else if show {
        Output::new(json)
            .field("node_url", &config.node_url)
            .field_u64("gas_price", config.gas_price)
            .field_u64("gas_limit", config.gas_limit)
            .message(&format!(
                "Node URL: {}\nGas Price: {}\nGas Limit: {}",
                config.node_url, config.gas_price, config.gas_limit
            ))
            .print();
    } else {
        Output::new(json)
            .message("Use --show to display config, or --set-url to modify")
            .print();
    }

    Ok(())
}
