// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use leavebook::application::LeaveService;
use leavebook::cli::run_session;
use leavebook::domain::{Employee, default_roster};

/// Helper to create a service seeded with the built-in roster
pub fn test_service() -> Result<LeaveService> {
    Ok(LeaveService::new(default_roster())?)
}

/// Helper to create a service with a custom roster
pub fn service_with(roster: &[(&str, i64)]) -> Result<LeaveService> {
    let roster = roster
        .iter()
        .map(|(name, balance)| Employee::new(*name, *balance))
        .collect();
    Ok(LeaveService::new(roster)?)
}

/// Feed a script to a session and return everything it printed
pub async fn run_script(service: &LeaveService, script: &str) -> Result<String> {
    let mut out = Vec::new();
    run_session(service, script.as_bytes(), &mut out).await?;
    Ok(String::from_utf8(out)?)
}
