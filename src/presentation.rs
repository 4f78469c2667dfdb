//! Human-readable text for operation results.
//!
//! The service returns typed values; these functions produce the strings a
//! front end hands back to its caller.

use crate::application::{AppError, BalanceEntry, RequestList};
use crate::domain::{AppliedLeave, CancelOutcome, Employee};

pub fn applied(result: &AppliedLeave) -> String {
    format!(
        "Leave applied for {} ({}) from {} to {}. Remaining balance: {} days.",
        result.employee,
        result.request.leave_type,
        result.request.start_date,
        result.request.end_date,
        result.remaining
    )
}

pub fn balance(entry: &BalanceEntry) -> String {
    format!("{} has {} days of leave remaining.", entry.employee, entry.balance)
}

pub fn requests(list: &RequestList) -> String {
    if list.requests.is_empty() {
        return format!("{} has no leave requests.", list.employee);
    }

    let mut out = format!("Leave requests for {}:", list.employee);
    for (i, req) in list.requests.iter().enumerate() {
        out.push_str(&format!(
            "\n{}. {} leave from {} to {} ({} days) - Status: {}",
            i + 1,
            req.leave_type,
            req.start_date,
            req.end_date,
            req.days,
            req.status
        ));
    }
    out
}

pub fn cancelled(outcome: &CancelOutcome) -> String {
    match outcome {
        CancelOutcome::Cancelled {
            employee,
            number,
            balance,
            ..
        } => format!(
            "Leave request #{} for {} has been cancelled. Balance restored to {} days.",
            number, employee, balance
        ),
        CancelOutcome::AlreadyCancelled { .. } => {
            "This leave request is already cancelled.".to_string()
        }
    }
}

pub fn roster(employees: &[Employee]) -> String {
    if employees.is_empty() {
        return "No employees on record.".to_string();
    }

    let mut out = format!("{:<20} {:>8}", "EMPLOYEE", "BALANCE");
    out.push_str(&format!("\n{}", "-".repeat(29)));
    for employee in employees {
        out.push_str(&format!("\n{:<20} {:>8}", employee.name, employee.balance));
    }
    out
}

pub fn error(err: &AppError) -> String {
    format!("Error: {}", err)
}
