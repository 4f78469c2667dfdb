use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Days;

pub type RequestId = Uuid;

/// Leave type used when the caller does not name one.
pub const DEFAULT_LEAVE_TYPE: &str = "Annual";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeaveStatus {
    /// Recorded and holding its days against the balance
    Pending,
    /// Days returned to the balance; terminal
    Cancelled,
}

impl LeaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "Pending",
            LeaveStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Inclusive number of calendar days between two dates.
/// Example: 2025-01-10..2025-01-12 -> 3
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> Days {
    (end - start).num_days() + 1
}

/// A single leave request. Its day count is fixed when it is created;
/// the only later change is the move to `Cancelled`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub id: RequestId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Free-form label, e.g. "Annual" or "Sick"
    pub leave_type: String,
    pub days: Days,
    pub status: LeaveStatus,
    /// When the request was recorded
    pub applied_at: DateTime<Utc>,
}

impl LeaveRequest {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            start_date,
            end_date,
            leave_type: DEFAULT_LEAVE_TYPE.to_string(),
            days: inclusive_days(start_date, end_date),
            status: LeaveStatus::Pending,
            applied_at: Utc::now(),
        }
    }

    pub fn with_leave_type(mut self, leave_type: impl Into<String>) -> Self {
        self.leave_type = leave_type.into();
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == LeaveStatus::Cancelled
    }
}
