use thiserror::Error;

use crate::domain::{Days, LedgerError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("No record found for {0}")]
    UnknownEmployee(String),

    #[error("Not enough leave balance. Available: {available} days, requested: {requested} days")]
    InsufficientBalance {
        employee: String,
        available: Days,
        requested: Days,
    },

    #[error("Invalid leave request number {number} for {employee} ({count} on record)")]
    InvalidRequestNumber {
        employee: String,
        number: usize,
        count: usize,
    },

    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("End date {end} is before start date {start}")]
    InvalidDateRange { start: String, end: String },

    #[error("Invalid roster: {0}")]
    InvalidRoster(String),
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::UnknownEmployee(name) => AppError::UnknownEmployee(name),
            LedgerError::InsufficientBalance {
                employee,
                available,
                requested,
            } => AppError::InsufficientBalance {
                employee,
                available,
                requested,
            },
            LedgerError::InvalidRequestNumber {
                employee,
                number,
                count,
            } => AppError::InvalidRequestNumber {
                employee,
                number,
                count,
            },
            LedgerError::InvalidDateRange { start, end } => {
                AppError::InvalidDateRange { start, end }
            }
            err @ (LedgerError::DuplicateEmployee(_)
            | LedgerError::NegativeOpeningBalance { .. }) => {
                AppError::InvalidRoster(err.to_string())
            }
        }
    }
}
