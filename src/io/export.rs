use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::application::LeaveService;
use crate::domain::{Days, LeaveRequest};

/// Ledger snapshot for JSON export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerExport {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub employees: Vec<EmployeeExport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeExport {
    pub name: String,
    pub balance: Days,
    pub requests: Vec<LeaveRequest>,
}

/// Export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Some(ExportFormat::Csv),
            "json" => Some(ExportFormat::Json),
            _ => None,
        }
    }
}

/// Exporter for writing ledger contents out
pub struct Exporter<'a> {
    service: &'a LeaveService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a LeaveService) -> Self {
        Self { service }
    }

    /// Write in the given format, returning the number of requests written.
    pub async fn export<W: Write>(&self, format: ExportFormat, writer: W) -> Result<usize> {
        match format {
            ExportFormat::Csv => self.export_requests_csv(writer).await,
            ExportFormat::Json => {
                let export = self.export_json(writer).await?;
                Ok(export.employees.iter().map(|e| e.requests.len()).sum())
            }
        }
    }

    /// Export every request as one CSV row
    pub async fn export_requests_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let snapshot = self.service.snapshot().await;
        let mut csv_writer = csv::Writer::from_writer(writer);

        // Write header
        csv_writer.write_record([
            "employee",
            "number",
            "id",
            "leave_type",
            "start_date",
            "end_date",
            "days",
            "status",
            "applied_at",
        ])?;

        let mut count = 0;
        for (employee, requests) in &snapshot.entries {
            for (i, req) in requests.iter().enumerate() {
                csv_writer.write_record([
                    employee.name.clone(),
                    (i + 1).to_string(),
                    req.id.to_string(),
                    req.leave_type.clone(),
                    req.start_date.to_string(),
                    req.end_date.to_string(),
                    req.days.to_string(),
                    req.status.as_str().to_string(),
                    req.applied_at.to_rfc3339(),
                ])?;
                count += 1;
            }
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export balances and requests as a JSON snapshot
    pub async fn export_json<W: Write>(&self, mut writer: W) -> Result<LedgerExport> {
        let snapshot = self.service.snapshot().await;

        let export = LedgerExport {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            employees: snapshot
                .entries
                .into_iter()
                .map(|(employee, requests)| EmployeeExport {
                    name: employee.name,
                    balance: employee.balance,
                    requests,
                })
                .collect(),
        };

        let json = serde_json::to_string_pretty(&export)?;
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        Ok(export)
    }
}
