//! Employee directory.
//!
//! An in-memory registry of employees keyed by ID. Records can be added and
//! looked up but never changed or removed, and listing returns them in the
//! order they were registered.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{Error, Result};

/// Highest hourly rate the directory accepts.
pub const MAX_HOURLY_RATE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// A registered employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeRecord {
    /// Externally assigned identifier, unique within the directory.
    pub id: String,
    /// Name shown on screens and in reports.
    pub name: String,
    /// Login PIN, compared verbatim.
    pub pin: String,
    /// Pay per hour worked.
    pub hourly_rate: Decimal,
}

/// Insertion-ordered employee registry.
#[derive(Debug, Default)]
pub struct EmployeeDirectory {
    records: Vec<EmployeeRecord>,
    index: HashMap<String, usize>,
}

impl EmployeeDirectory {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new employee.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateId`] if the ID is taken (the existing record
    /// is left as it was) and [`Error::InvalidRate`] for a rate below zero or
    /// above [`MAX_HOURLY_RATE`].
    pub fn add(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        pin: impl Into<String>,
        hourly_rate: Decimal,
    ) -> Result<&EmployeeRecord> {
        let id = id.into();
        if self.index.contains_key(&id) {
            return Err(Error::DuplicateId { employee_id: id });
        }
        if hourly_rate < Decimal::ZERO || hourly_rate > MAX_HOURLY_RATE {
            return Err(Error::InvalidRate { rate: hourly_rate });
        }

        debug!("Registering employee {}", id);
        let position = self.records.len();
        self.index.insert(id.clone(), position);
        self.records.push(EmployeeRecord {
            id,
            name: name.into(),
            pin: pin.into(),
            hourly_rate,
        });
        Ok(&self.records[position])
    }

    /// Look up an employee by ID.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmployeeNotFound`] if no such employee exists.
    pub fn get(&self, id: &str) -> Result<&EmployeeRecord> {
        self.index
            .get(id)
            .and_then(|&position| self.records.get(position))
            .ok_or_else(|| Error::employee_not_found(id))
    }

    /// All employees in registration order.
    pub fn list(&self) -> impl Iterator<Item = &EmployeeRecord> {
        self.records.iter()
    }

    /// Check whether no employee is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Check an employee's login.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmployeeNotFound`] for an unknown ID and
    /// [`Error::InvalidCredentials`] when the PIN does not match exactly.
    pub fn verify_credentials(&self, id: &str, pin: &str) -> Result<&EmployeeRecord> {
        let record = self.get(id)?;
        if record.pin != pin {
            debug!("Rejected PIN for employee {}", id);
            return Err(Error::InvalidCredentials);
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn create_test_directory() -> EmployeeDirectory {
        let mut directory = EmployeeDirectory::new();
        directory.add("E1", "Alice", "1111", rate("60.0")).unwrap();
        directory.add("E2", "Bob", "2222", rate("75.50")).unwrap();
        directory
    }

    #[test]
    fn test_add_then_get() {
        let mut directory = EmployeeDirectory::new();
        directory.add("E9", "Carol", "0420", rate("55.25")).unwrap();

        let record = directory.get("E9").unwrap();
        assert_eq!(record.id, "E9");
        assert_eq!(record.name, "Carol");
        assert_eq!(record.pin, "0420");
        assert_eq!(record.hourly_rate, rate("55.25"));
    }

    #[test]
    fn test_add_duplicate_keeps_original() {
        let mut directory = create_test_directory();

        let result = directory.add("E1", "Mallory", "9999", rate("999"));
        assert!(matches!(
            result,
            Err(Error::DuplicateId { ref employee_id }) if employee_id == "E1"
        ));

        let record = directory.get("E1").unwrap();
        assert_eq!(record.name, "Alice");
        assert_eq!(record.pin, "1111");
        assert_eq!(record.hourly_rate, rate("60.0"));
        assert_eq!(directory.list().count(), 2);
    }

    #[test]
    fn test_add_negative_rate() {
        let mut directory = EmployeeDirectory::new();
        let result = directory.add("E1", "Alice", "1111", rate("-1"));
        assert!(matches!(result, Err(Error::InvalidRate { .. })));
        assert!(directory.is_empty());
    }

    #[test]
    fn test_add_rate_above_ceiling() {
        let mut directory = EmployeeDirectory::new();
        let result = directory.add("E1", "Alice", "1111", Decimal::MAX);
        assert!(matches!(result, Err(Error::InvalidRate { .. })));
        assert!(directory.is_empty());

        assert!(directory
            .add("E2", "Bob", "2222", MAX_HOURLY_RATE)
            .is_ok());
    }

    #[test]
    fn test_add_zero_rate() {
        let mut directory = EmployeeDirectory::new();
        assert!(directory.add("V1", "Volunteer", "0000", Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_get_missing() {
        let directory = create_test_directory();
        let result = directory.get("E404");
        assert!(matches!(result, Err(Error::EmployeeNotFound { .. })));
    }

    #[test]
    fn test_list_in_insertion_order() {
        let mut directory = create_test_directory();
        directory.add("A0", "Zed", "3333", rate("10")).unwrap();

        let ids: Vec<&str> = directory.list().map(|record| record.id.as_str()).collect();
        assert_eq!(ids, vec!["E1", "E2", "A0"]);
    }

    #[test]
    fn test_verify_credentials() {
        let directory = create_test_directory();

        let record = directory.verify_credentials("E2", "2222").unwrap();
        assert_eq!(record.name, "Bob");

        assert!(matches!(
            directory.verify_credentials("E2", "1111"),
            Err(Error::InvalidCredentials)
        ));
        assert!(matches!(
            directory.verify_credentials("E3", "2222"),
            Err(Error::EmployeeNotFound { .. })
        ));
    }

    #[test]
    fn test_verify_credentials_is_exact() {
        let directory = create_test_directory();
        assert!(directory.verify_credentials("E1", " 1111").is_err());
        assert!(directory.verify_credentials("E1", "").is_err());
    }
}
