use chrono::NaiveDate;
use std::collections::HashMap;

use super::{Days, Employee, LeaveRequest, LeaveStatus};

/// Balance and request history for one employee.
#[derive(Debug, Clone)]
struct Account {
    name: String,
    balance: Days,
    /// Insertion order; position + 1 is the request number
    requests: Vec<LeaveRequest>,
}

/// The in-memory leave ledger: every seeded employee's remaining balance
/// together with the ordered list of leave requests they have made.
///
/// Request numbers are 1-based positions in an employee's list. Requests
/// are never removed, so a number stays valid for the life of the ledger.
#[derive(Debug, Clone)]
pub struct Ledger {
    accounts: Vec<Account>,
    by_name: HashMap<String, usize>,
}

/// Result of a successful apply
#[derive(Debug, Clone)]
pub struct AppliedLeave {
    pub employee: String,
    pub number: usize,
    pub request: LeaveRequest,
    pub remaining: Days,
}

/// Result of a cancel that passed validation
#[derive(Debug, Clone)]
pub enum CancelOutcome {
    Cancelled {
        employee: String,
        number: usize,
        request: LeaveRequest,
        balance: Days,
    },
    /// The request was cancelled earlier; nothing changed
    AlreadyCancelled { employee: String, number: usize },
}

impl Ledger {
    /// Build a ledger from a roster. Names must be unique and balances
    /// non-negative.
    pub fn new(roster: Vec<Employee>) -> Result<Self, LedgerError> {
        let mut accounts = Vec::with_capacity(roster.len());
        let mut by_name = HashMap::with_capacity(roster.len());

        for employee in roster {
            if employee.balance < 0 {
                return Err(LedgerError::NegativeOpeningBalance {
                    employee: employee.name,
                    balance: employee.balance,
                });
            }
            if by_name.contains_key(&employee.name) {
                return Err(LedgerError::DuplicateEmployee(employee.name));
            }
            by_name.insert(employee.name.clone(), accounts.len());
            accounts.push(Account {
                name: employee.name,
                balance: employee.balance,
                requests: Vec::new(),
            });
        }

        Ok(Self { accounts, by_name })
    }

    fn account(&self, name: &str) -> Result<&Account, LedgerError> {
        self.by_name
            .get(name)
            .map(|&idx| &self.accounts[idx])
            .ok_or_else(|| LedgerError::UnknownEmployee(name.to_string()))
    }

    fn account_mut(&mut self, name: &str) -> Result<&mut Account, LedgerError> {
        match self.by_name.get(name) {
            Some(&idx) => Ok(&mut self.accounts[idx]),
            None => Err(LedgerError::UnknownEmployee(name.to_string())),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Record a leave request for `start..=end` and debit its days.
    /// The request is built here, so its day count and `Pending` status
    /// always match the dates.
    pub fn apply(
        &mut self,
        name: &str,
        start: NaiveDate,
        end: NaiveDate,
        leave_type: Option<&str>,
    ) -> Result<AppliedLeave, LedgerError> {
        let account = self.account_mut(name)?;

        if end < start {
            return Err(LedgerError::InvalidDateRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        let mut request = LeaveRequest::new(start, end);
        if let Some(lt) = leave_type.map(str::trim).filter(|lt| !lt.is_empty()) {
            request = request.with_leave_type(lt);
        }

        if request.days > account.balance {
            return Err(LedgerError::InsufficientBalance {
                employee: account.name.clone(),
                available: account.balance,
                requested: request.days,
            });
        }

        account.balance -= request.days;
        account.requests.push(request.clone());

        Ok(AppliedLeave {
            employee: account.name.clone(),
            number: account.requests.len(),
            request,
            remaining: account.balance,
        })
    }

    /// Remaining balance for an employee.
    pub fn balance(&self, name: &str) -> Result<Days, LedgerError> {
        Ok(self.account(name)?.balance)
    }

    /// All requests for an employee in the order they were made.
    pub fn requests(&self, name: &str) -> Result<&[LeaveRequest], LedgerError> {
        Ok(&self.account(name)?.requests)
    }

    /// Cancel request `number` (1-based) and credit its days back.
    pub fn cancel(&mut self, name: &str, number: usize) -> Result<CancelOutcome, LedgerError> {
        let account = self.account_mut(name)?;
        let count = account.requests.len();

        if number == 0 || number > count {
            return Err(LedgerError::InvalidRequestNumber {
                employee: account.name.clone(),
                number,
                count,
            });
        }

        let request = &mut account.requests[number - 1];
        if request.is_cancelled() {
            return Ok(CancelOutcome::AlreadyCancelled {
                employee: account.name.clone(),
                number,
            });
        }

        request.status = LeaveStatus::Cancelled;
        let request = request.clone();
        account.balance += request.days;

        Ok(CancelOutcome::Cancelled {
            employee: account.name.clone(),
            number,
            request,
            balance: account.balance,
        })
    }

    /// Current balance of every employee, in roster order.
    pub fn employees(&self) -> Vec<Employee> {
        self.accounts
            .iter()
            .map(|a| Employee::new(a.name.clone(), a.balance))
            .collect()
    }

    /// Every employee with a copy of their requests, in roster order.
    pub fn snapshot(&self) -> Vec<(Employee, Vec<LeaveRequest>)> {
        self.accounts
            .iter()
            .map(|a| (Employee::new(a.name.clone(), a.balance), a.requests.clone()))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    UnknownEmployee(String),
    InsufficientBalance {
        employee: String,
        available: Days,
        requested: Days,
    },
    InvalidRequestNumber {
        employee: String,
        number: usize,
        count: usize,
    },
    InvalidDateRange {
        start: String,
        end: String,
    },
    DuplicateEmployee(String),
    NegativeOpeningBalance {
        employee: String,
        balance: Days,
    },
}

impl std::fmt::Display for LedgerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerError::UnknownEmployee(name) => write!(f, "No record found for {}", name),
            LedgerError::InsufficientBalance {
                available,
                requested,
                ..
            } => write!(
                f,
                "Not enough leave balance. Available: {} days, requested: {} days",
                available, requested
            ),
            LedgerError::InvalidRequestNumber {
                employee,
                number,
                count,
            } => write!(
                f,
                "Invalid leave request number {} for {} ({} on record)",
                number, employee, count
            ),
            LedgerError::InvalidDateRange { start, end } => {
                write!(f, "End date {} is before start date {}", end, start)
            }
            LedgerError::DuplicateEmployee(name) => {
                write!(f, "Employee listed more than once: {}", name)
            }
            LedgerError::NegativeOpeningBalance { employee, balance } => {
                write!(f, "Opening balance for {} is negative: {}", employee, balance)
            }
        }
    }
}

impl std::error::Error for LedgerError {}
