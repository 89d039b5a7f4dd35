//! Session commands
//!
//! Each invocation is one request; the session id printed by `start` must be
//! passed back explicitly.

use clap::Subcommand;
use lumen_sdk::types::SessionId;

use super::client;
use crate::{config::Config, output::Output, CliError};

/// Session subcommands
#[derive(Debug, Subcommand)]
pub enum SessionCommand {
    /// Open a new session
    Start,
    /// Run an operation inside a session
    Exec {
        /// Session id
        session: String,
        /// Operation
        op: String,
    },
    /// Reset a session's execution state
    Reset {
        /// Session id
        session: String,
    },
    /// End a session
    End {
        /// Session id
        session: String,
    },
}

impl SessionCommand {
    pub async fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        let client = client(config);

        match self {
            SessionCommand::Start => {
                let session = client.start_session().await?;
                Output::new(json)
                    .field("session", session.as_str())
                    .message(&format!("Session: {}", session))
                    .print();
            }
            SessionCommand::Exec { session, op } => {
                let ok = client.execute(&SessionId::new(session), &op).await?;
                print_flag("execute", ok, json);
            }
            SessionCommand::Reset { session } => {
                let ok = client.reset(&SessionId::new(session)).await?;
                print_flag("reset", ok, json);
            }
            SessionCommand::End { session } => {
                let ok = client.end_session(&SessionId::new(session)).await?;
                print_flag("end", ok, json);
            }
        }

        Ok(())
    }
}

fn print_flag(action: &str, ok: bool, json: bool) {
    Output::new(json)
        .field("action", action)
        .field_bool("success", ok)
        .message(&format!("{}: {}", action, if ok { "ok" } else { "rejected" }))
        .print();
}
