//! Work session records.
//!
//! An [`ActiveSession`] exists between an employee's time-in and time-out.
//! Timing out turns it into an immutable [`CompletedSession`].

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::clock::{self, Elapsed};
use crate::directory::EmployeeRecord;

/// A session that has been started but not yet stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSession {
    /// The employee working this session.
    pub employee_id: String,
    /// Employee name at time-in.
    pub employee_name: String,
    /// Hourly rate at time-in; pay is computed from this snapshot.
    pub hourly_rate: Decimal,
    /// When the employee timed in.
    pub start: NaiveDateTime,
}

impl ActiveSession {
    /// Open a session for `employee` starting at `start`.
    #[must_use]
    pub fn new(employee: &EmployeeRecord, start: NaiveDateTime) -> Self {
        Self {
            employee_id: employee.id.clone(),
            employee_name: employee.name.clone(),
            hourly_rate: employee.hourly_rate,
            start,
        }
    }

    /// Close the session with the computed elapsed time.
    #[must_use]
    pub fn complete(self, elapsed: Elapsed) -> CompletedSession {
        CompletedSession {
            date: self.start.date(),
            employee_id: self.employee_id,
            employee_name: self.employee_name,
            start: self.start,
            stop: elapsed.stop,
            hours_worked: elapsed.hours_worked,
            pay: elapsed.pay,
        }
    }
}

/// A finished session.
///
/// Hours and pay are kept unrounded; [`CompletedSession::to_record`] rounds
/// them for output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedSession {
    /// The employee who worked this session.
    pub employee_id: String,
    /// Employee name at time-in.
    pub employee_name: String,
    /// Calendar day the session started on.
    pub date: NaiveDate,
    /// When the employee timed in.
    pub start: NaiveDateTime,
    /// When the employee timed out.
    pub stop: NaiveDateTime,
    /// Elapsed hours, never negative.
    pub hours_worked: Decimal,
    /// Estimated time compensation: `hours_worked * hourly_rate`.
    pub pay: Decimal,
}

impl CompletedSession {
    /// Render the session as a daily log row.
    #[must_use]
    pub fn to_record(&self) -> [String; 7] {
        [
            self.employee_id.clone(),
            self.employee_name.clone(),
            clock::format_date(self.date),
            clock::format_time(self.start),
            clock::format_time(self.stop),
            clock::format_amount(self.hours_worked),
            clock::format_amount(self.pay),
        ]
    }
}
