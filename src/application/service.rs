use chrono::NaiveDate;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::{
    AppliedLeave, CancelOutcome, Days, Employee, LEAVE_POLICY_URI, LeaveRequest, Ledger,
    approval_message, leave_policy,
};

use super::AppError;

/// Application service providing the leave operations.
/// This is the primary interface for any front end (session, tool host, etc.).
///
/// All state lives in one `Ledger` behind one lock, so apply and cancel are
/// serialized and concurrent callers cannot overdraw a balance.
pub struct LeaveService {
    ledger: Mutex<Ledger>,
}

/// Balance of a single employee
#[derive(Debug, Clone)]
pub struct BalanceEntry {
    pub employee: String,
    pub balance: Days,
}

/// Requests of a single employee, oldest first
#[derive(Debug, Clone)]
pub struct RequestList {
    pub employee: String,
    pub requests: Vec<LeaveRequest>,
}

/// Every employee with their requests, used for export
#[derive(Debug, Clone)]
pub struct LedgerSnapshot {
    pub entries: Vec<(Employee, Vec<LeaveRequest>)>,
}

impl LeaveService {
    /// Create a service seeded with the given roster.
    pub fn new(roster: Vec<Employee>) -> Result<Self, AppError> {
        let ledger = Ledger::new(roster)?;
        Ok(Self::from_ledger(ledger))
    }

    pub fn from_ledger(ledger: Ledger) -> Self {
        Self {
            ledger: Mutex::new(ledger),
        }
    }

    // ========================
    // Ledger operations
    // ========================

    /// Apply for leave between two ISO dates (inclusive).
    pub async fn apply_leave(
        &self,
        name: &str,
        start_date: &str,
        end_date: &str,
        leave_type: Option<&str>,
    ) -> Result<AppliedLeave, AppError> {
        let mut ledger = self.ledger.lock().await;

        // Unknown names are reported before any date problems
        if !ledger.contains(name) {
            warn!(employee = name, "leave application for unknown employee");
            return Err(AppError::UnknownEmployee(name.to_string()));
        }

        let start = parse_iso_date(start_date)?;
        let end = parse_iso_date(end_date)?;

        let result = ledger.apply(name, start, end, leave_type);
        drop(ledger);

        match result {
            Ok(applied) => {
                info!(
                    employee = %applied.employee,
                    request = applied.number,
                    id = %applied.request.id,
                    days = applied.request.days,
                    remaining = applied.remaining,
                    "leave applied"
                );
                Ok(applied)
            }
            Err(err) => {
                warn!(employee = name, %start, %end, error = %err, "leave application rejected");
                Err(err.into())
            }
        }
    }

    /// Get the remaining balance of an employee.
    pub async fn check_balance(&self, name: &str) -> Result<BalanceEntry, AppError> {
        let balance = self.ledger.lock().await.balance(name)?;
        debug!(employee = name, balance, "balance checked");
        Ok(BalanceEntry {
            employee: name.to_string(),
            balance,
        })
    }

    /// List all requests of an employee, cancelled ones included.
    pub async fn view_requests(&self, name: &str) -> Result<RequestList, AppError> {
        let requests = self.ledger.lock().await.requests(name)?.to_vec();
        debug!(employee = name, count = requests.len(), "requests listed");
        Ok(RequestList {
            employee: name.to_string(),
            requests,
        })
    }

    /// Cancel request `number` (1-based) and restore its days.
    pub async fn cancel_leave(&self, name: &str, number: usize) -> Result<CancelOutcome, AppError> {
        let result = self.ledger.lock().await.cancel(name, number);
        match result {
            Ok(outcome) => {
                match &outcome {
                    CancelOutcome::Cancelled {
                        employee,
                        request,
                        balance,
                        ..
                    } => info!(
                        employee = %employee,
                        request = number,
                        id = %request.id,
                        days = request.days,
                        balance,
                        "leave cancelled"
                    ),
                    CancelOutcome::AlreadyCancelled { employee, .. } => {
                        debug!(employee = %employee, request = number, "leave already cancelled")
                    }
                }
                Ok(outcome)
            }
            Err(err) => {
                warn!(employee = name, request = number, error = %err, "cancellation rejected");
                Err(err.into())
            }
        }
    }

    // ========================
    // Static content
    // ========================

    /// The company leave policy.
    pub fn leave_policy(&self) -> &'static str {
        debug!(uri = LEAVE_POLICY_URI, "policy served");
        leave_policy()
    }

    /// Approval or rejection message for an employee.
    pub fn approval_message(&self, name: &str, approved: bool, reason: Option<&str>) -> String {
        approval_message(name, approved, reason.unwrap_or_default())
    }

    // ========================
    // Roster and export
    // ========================

    /// Every employee with their current balance, in roster order.
    pub async fn list_employees(&self) -> Vec<Employee> {
        self.ledger.lock().await.employees()
    }

    /// Copy of the whole ledger.
    pub async fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            entries: self.ledger.lock().await.snapshot(),
        }
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_iso_date(input: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::InvalidDate(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(
            parse_iso_date("2025-01-10").unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
        );
        assert!(matches!(
            parse_iso_date("2025-02-30"),
            Err(AppError::InvalidDate(_))
        ));
        assert!(matches!(
            parse_iso_date("10/01/2025"),
            Err(AppError::InvalidDate(_))
        ));
        assert!(matches!(parse_iso_date(""), Err(AppError::InvalidDate(_))));
    }
}
