use serde::{Deserialize, Serialize};

/// Leave is counted in whole calendar days.
pub type Days = i64;

/// An employee known to the ledger, keyed by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub name: String,
    /// Opening balance in days
    pub balance: Days,
}

impl Employee {
    pub fn new(name: impl Into<String>, balance: Days) -> Self {
        Self {
            name: name.into(),
            balance,
        }
    }
}

/// The roster the service starts with when no roster file is given.
pub fn default_roster() -> Vec<Employee> {
    vec![
        Employee::new("Gaurav", 15),
        Employee::new("Shubha", 12),
        Employee::new("Vibhanshu", 10),
        Employee::new("Rajeev", 8),
        Employee::new("Lakshay", 20),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roster_balances() {
        let roster = default_roster();
        assert_eq!(roster.len(), 5);
        assert_eq!(roster[0], Employee::new("Gaurav", 15));
        assert_eq!(roster[3], Employee::new("Rajeev", 8));
    }

    #[test]
    fn test_default_roster_names_are_unique() {
        let roster = default_roster();
        let mut names: Vec<&str> = roster.iter().map(|e| e.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), roster.len());
    }
}
