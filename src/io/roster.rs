use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use crate::domain::{Days, Employee};

/// One row of a roster file
#[derive(Debug, Clone, Deserialize)]
struct RosterRecord {
    name: String,
    balance: Days,
}

/// Roster file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterFormat {
    Csv,
    Json,
}

impl RosterFormat {
    /// `.json` files are JSON, everything else is read as CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => RosterFormat::Json,
            _ => RosterFormat::Csv,
        }
    }
}

/// Load a roster from a file, picking the format from its extension.
pub fn load_roster(path: &Path) -> Result<Vec<Employee>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Cannot open roster file {}", path.display()))?;
    read_roster(file, RosterFormat::from_path(path))
        .with_context(|| format!("Invalid roster file {}", path.display()))
}

/// Read a roster. CSV needs a `name,balance` header; JSON is an array of
/// `{ "name": ..., "balance": ... }` objects. Duplicate names and negative
/// balances are left for `Ledger::new` to reject.
pub fn read_roster<R: Read>(reader: R, format: RosterFormat) -> Result<Vec<Employee>> {
    let records: Vec<RosterRecord> = match format {
        RosterFormat::Json => serde_json::from_reader(reader)?,
        RosterFormat::Csv => {
            let mut csv_reader = csv::ReaderBuilder::new()
                .trim(csv::Trim::All)
                .from_reader(reader);
            let mut records = Vec::new();
            for (line_num, result) in csv_reader.deserialize().enumerate() {
                let line = line_num + 2; // +2 for header and 0-indexing
                let record: RosterRecord =
                    result.with_context(|| format!("CSV parse error on line {}", line))?;
                records.push(record);
            }
            records
        }
    };

    let mut employees: Vec<Employee> = Vec::with_capacity(records.len());
    for record in records {
        let name = record.name.trim();
        if name.is_empty() {
            bail!("Employee name must not be empty");
        }
        employees.push(Employee::new(name, record.balance));
    }

    Ok(employees)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv_roster() {
        let data = "name,balance\nAsha, 7\nBilal,0\n";
        let roster = read_roster(data.as_bytes(), RosterFormat::Csv).unwrap();
        assert_eq!(
            roster,
            vec![Employee::new("Asha", 7), Employee::new("Bilal", 0)]
        );
    }

    #[test]
    fn test_read_json_roster() {
        let data = r#"[{"name": "Asha", "balance": 7}, {"name": "Bilal", "balance": 3}]"#;
        let roster = read_roster(data.as_bytes(), RosterFormat::Json).unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[1], Employee::new("Bilal", 3));
    }

    #[test]
    fn test_rejects_empty_name() {
        let data = r#"[{"name": "  ", "balance": 4}]"#;
        let err = read_roster(data.as_bytes(), RosterFormat::Json).unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn test_names_are_trimmed() {
        let data = r#"[{"name": " Asha ", "balance": 4}]"#;
        let roster = read_roster(data.as_bytes(), RosterFormat::Json).unwrap();
        assert_eq!(roster, vec![Employee::new("Asha", 4)]);
    }

    #[test]
    fn test_rejects_non_numeric_balance() {
        let data = "name,balance\nAsha,lots\n";
        assert!(read_roster(data.as_bytes(), RosterFormat::Csv).is_err());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            RosterFormat::from_path(Path::new("staff.JSON")),
            RosterFormat::Json
        );
        assert_eq!(
            RosterFormat::from_path(Path::new("staff.csv")),
            RosterFormat::Csv
        );
        assert_eq!(RosterFormat::from_path(Path::new("staff")), RosterFormat::Csv);
    }
}
