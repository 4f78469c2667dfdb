mod session;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing::info;

use crate::application::LeaveService;
use crate::domain::default_roster;
use crate::io::load_roster;
use crate::presentation;

pub use session::*;

/// Leavebook - Employee Leave Ledger
#[derive(Parser)]
#[command(name = "leavebook")]
#[command(about = "Track employee leave balances and requests in memory")]
#[command(version)]
pub struct Cli {
    /// Roster file: CSV with a `name,balance` header, or a .json array
    #[arg(short, long)]
    pub roster: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read leave commands from stdin, one per line
    Session,

    /// List employees and their opening balances
    Roster,

    /// Show the company leave policy
    Policy,

    /// Compose an approval or rejection message
    Approval {
        /// Employee name
        name: String,

        /// The request was approved
        #[arg(long)]
        approved: bool,

        /// Reason shown on rejection
        #[arg(short, long)]
        reason: Option<String>,
    },
}

impl Cli {
    /// Build the service from `--roster` or the built-in roster.
    pub fn service(&self) -> Result<LeaveService> {
        let roster = match &self.roster {
            Some(path) => load_roster(path)?,
            None => default_roster(),
        };
        info!(employees = roster.len(), "roster loaded");
        LeaveService::new(roster).context("Cannot seed the ledger")
    }

    pub async fn run(self) -> Result<()> {
        let service = self.service()?;

        // No subcommand means an interactive session
        match self.command.unwrap_or(Commands::Session) {
            Commands::Session => {
                let stdin = BufReader::new(tokio::io::stdin());
                let mut stdout = std::io::stdout();
                run_session(&service, stdin, &mut stdout).await?;
            }

            Commands::Roster => {
                println!("{}", presentation::roster(&service.list_employees().await));
            }

            Commands::Policy => {
                print!("{}", service.leave_policy());
            }

            Commands::Approval {
                name,
                approved,
                reason,
            } => {
                println!(
                    "{}",
                    service.approval_message(&name, approved, reason.as_deref())
                );
            }
        }

        Ok(())
    }
}
