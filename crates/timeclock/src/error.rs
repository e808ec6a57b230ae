//! Error types for timeclock.
//!
//! Every operation of the directory, the attendance manager and the report
//! storage returns one of these variants. The first group covers conditions
//! the operator can fix at the terminal; the rest are environment failures.

use std::path::PathBuf;

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for timeclock operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Attendance Errors ===
    /// No employee is registered under the given ID.
    #[error("employee ID not found: {employee_id}")]
    EmployeeNotFound {
        /// The ID that was looked up.
        employee_id: String,
    },

    /// A PIN did not match.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// An employee with this ID is already registered.
    #[error("employee ID already exists: {employee_id}")]
    DuplicateId {
        /// The conflicting ID.
        employee_id: String,
    },

    /// The employee already has an open session.
    #[error("employee {employee_id} is already timed in")]
    AlreadyTimedIn {
        /// The employee holding the open session.
        employee_id: String,
    },

    /// The employee has no open session to close.
    #[error("employee {employee_id} must time in first")]
    NotTimedIn {
        /// The employee without a session.
        employee_id: String,
    },

    /// A session was stopped without ever being started.
    #[error("cannot time out without a recorded time in")]
    NoStartRecorded,

    /// A report was requested but no session has been completed yet.
    #[error("no completed sessions available")]
    NoData,

    /// Hourly rates must lie between zero and the directory's ceiling.
    #[error("invalid hourly rate: {rate}")]
    InvalidRate {
        /// The rejected rate.
        rate: Decimal,
    },

    /// Hours or pay grew beyond what a decimal can hold.
    #[error("amount out of range while computing {what}")]
    AmountOverflow {
        /// The quantity being computed.
        what: &'static str,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create the report directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Reading or writing a CSV file failed.
    #[error("CSV error in {path}: {source}")]
    Csv {
        /// The file being processed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: csv::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for timeclock operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an employee-not-found error.
    #[must_use]
    pub fn employee_not_found(employee_id: impl Into<String>) -> Self {
        Self::EmployeeNotFound {
            employee_id: employee_id.into(),
        }
    }

    /// Create a CSV error tagged with the file it concerns.
    #[must_use]
    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }

    /// Check if the operator caused this error and can correct it.
    ///
    /// Anything else points at the file system or the configuration.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::EmployeeNotFound { .. }
                | Self::InvalidCredentials
                | Self::DuplicateId { .. }
                | Self::AlreadyTimedIn { .. }
                | Self::NotTimedIn { .. }
                | Self::NoStartRecorded
                | Self::NoData
                | Self::InvalidRate { .. }
                | Self::AmountOverflow { .. }
        )
    }
}
