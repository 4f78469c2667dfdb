use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::application::LeaveService;
use crate::io::{ExportFormat, Exporter};
use crate::presentation;

/// One line typed into a session
#[derive(Parser, Debug)]
#[command(name = "leavebook", no_binary_name = true)]
pub struct SessionLine {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    /// Apply for leave
    Apply {
        /// Employee name
        name: String,

        /// First day of leave (YYYY-MM-DD)
        start_date: String,

        /// Last day of leave, inclusive (YYYY-MM-DD)
        end_date: String,

        /// Leave type (defaults to Annual)
        #[arg(short = 't', long = "type")]
        leave_type: Option<String>,
    },

    /// Show remaining leave balance
    Balance {
        /// Employee name
        name: String,
    },

    /// List an employee's leave requests
    Requests {
        /// Employee name
        name: String,
    },

    /// Cancel a leave request by its number
    Cancel {
        /// Employee name
        name: String,

        /// Request number as shown by `requests`
        number: usize,
    },

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

    /// List employees and balances
    Roster,

    /// Write all requests out
    Export {
        /// Format: csv, json
        #[arg(short, long, default_value = "csv")]
        format: String,
    },

    /// End the session
    #[command(alias = "exit")]
    Quit,
}

/// Whether the session keeps reading after a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Split a line into words. Double quotes group words containing spaces.
pub fn split_words(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_word = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                has_word = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_word {
                    words.push(std::mem::take(&mut current));
                    has_word = false;
                }
            }
            c => {
                current.push(c);
                has_word = true;
            }
        }
    }

    if in_quotes {
        bail!("Unterminated quote");
    }
    if has_word {
        words.push(current);
    }
    Ok(words)
}

/// Run one command against the service and return the text to show.
/// Operation failures become `Error: ...` text; they never end the session.
pub async fn respond(service: &LeaveService, command: SessionCommand) -> Result<String> {
    let text = match command {
        SessionCommand::Apply {
            name,
            start_date,
            end_date,
            leave_type,
        } => match service
            .apply_leave(&name, &start_date, &end_date, leave_type.as_deref())
            .await
        {
            Ok(result) => presentation::applied(&result),
            Err(e) => presentation::error(&e),
        },

        SessionCommand::Balance { name } => match service.check_balance(&name).await {
            Ok(entry) => presentation::balance(&entry),
            Err(e) => presentation::error(&e),
        },

        SessionCommand::Requests { name } => match service.view_requests(&name).await {
            Ok(list) => presentation::requests(&list),
            Err(e) => presentation::error(&e),
        },

        SessionCommand::Cancel { name, number } => {
            match service.cancel_leave(&name, number).await {
                Ok(outcome) => presentation::cancelled(&outcome),
                Err(e) => presentation::error(&e),
            }
        }

        SessionCommand::Policy => service.leave_policy().trim_end().to_string(),

        SessionCommand::Approval {
            name,
            approved,
            reason,
        } => service.approval_message(&name, approved, reason.as_deref()),

        SessionCommand::Roster => presentation::roster(&service.list_employees().await),

        SessionCommand::Export { format } => {
            let Some(format) = ExportFormat::from_str(&format) else {
                return Ok(format!("Error: Unknown export format '{}'. Use csv or json", format));
            };
            let mut buf = Vec::new();
            let count = Exporter::new(service).export(format, &mut buf).await?;
            debug!(format = format.as_str(), count, "ledger exported");
            String::from_utf8(buf)?.trim_end().to_string()
        }

        SessionCommand::Quit => String::new(),
    };
    Ok(text)
}

/// Handle one raw input line, writing any output to `out`.
pub async fn handle_line<W: Write>(service: &LeaveService, line: &str, out: &mut W) -> Result<Flow> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(Flow::Continue);
    }

    let words = match split_words(line) {
        Ok(words) => words,
        Err(e) => {
            writeln!(out, "Error: {}", e)?;
            return Ok(Flow::Continue);
        }
    };

    let command = match SessionLine::try_parse_from(words) {
        Ok(parsed) => parsed.command,
        Err(e) => {
            // Covers `help` and `--help` too
            write!(out, "{}", e.render())?;
            return Ok(Flow::Continue);
        }
    };

    if command == SessionCommand::Quit {
        return Ok(Flow::Stop);
    }

    let text = respond(service, command).await?;
    writeln!(out, "{}", text)?;
    Ok(Flow::Continue)
}

/// Read commands from `input` until it ends or `quit` is entered.
pub async fn run_session<R, W>(service: &LeaveService, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if handle_line(service, &line, out).await? == Flow::Stop {
            break;
        }
        out.flush()?;
    }
    Ok(())
}
