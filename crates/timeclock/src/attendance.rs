//! Attendance manager.
//!
//! The [`AttendanceManager`] is the single owner of all runtime state: the
//! employee directory, the open sessions, the completed sessions and the
//! report storage. It is constructed once and passed by reference to the
//! presentation layer; nothing here is global.
//!
//! An employee has at most one open session at a time. Timing out writes the
//! session to the daily log before the in-memory state changes, so a failed
//! write leaves the employee timed in and the error is reported to the caller.

use std::collections::HashMap;
use std::path::PathBuf;

use rust_decimal::Decimal;
use tracing::info;

use crate::clock::{self, Clock};
use crate::config::{Config, DEFAULT_ADMIN_PIN};
use crate::directory::{EmployeeDirectory, EmployeeRecord};
use crate::error::{Error, Result};
use crate::report::{aggregate_by_employee, ReportStyle, ReportWindow};
use crate::session::{ActiveSession, CompletedSession};
use crate::storage::Storage;

/// What an employee is told after timing out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeOutSummary {
    /// Formatted stop time, e.g. `05:00 PM`.
    pub time_out: String,
    /// Unrounded hours worked.
    pub hours_worked: Decimal,
    /// Unrounded pay for the session.
    pub pay: Decimal,
}

/// Owner of the directory, the sessions and the report files.
#[derive(Debug)]
pub struct AttendanceManager {
    directory: EmployeeDirectory,
    active: HashMap<String, ActiveSession>,
    completed: Vec<CompletedSession>,
    admin_pin: String,
    currency_symbol: String,
    weekly_window_days: u32,
    monthly_window_days: u32,
    clock: Box<dyn Clock>,
    storage: Storage,
}

impl AttendanceManager {
    /// Create a manager with an empty directory and default settings.
    #[must_use]
    pub fn new(storage: Storage, clock: Box<dyn Clock>) -> Self {
        Self {
            directory: EmployeeDirectory::new(),
            active: HashMap::new(),
            completed: Vec::new(),
            admin_pin: DEFAULT_ADMIN_PIN.to_string(),
            currency_symbol: "₱".to_string(),
            weekly_window_days: 7,
            monthly_window_days: 30,
            clock,
            storage,
        }
    }

    /// Create a manager from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the report directory cannot be created.
    pub fn from_config(config: &Config, clock: Box<dyn Clock>) -> Result<Self> {
        let storage = Storage::open(config.report_dir(), config.report_files())?;
        let mut manager = Self::new(storage, clock);
        manager.admin_pin.clone_from(&config.admin.pin);
        manager
            .currency_symbol
            .clone_from(&config.display.currency_symbol);
        manager.weekly_window_days = config.reports.weekly_window_days;
        manager.monthly_window_days = config.reports.monthly_window_days;
        Ok(manager)
    }

    /// Replace the admin PIN.
    #[must_use]
    pub fn with_admin_pin(mut self, pin: impl Into<String>) -> Self {
        self.admin_pin = pin.into();
        self
    }

    /// Symbol printed before money amounts.
    #[must_use]
    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    /// The report storage.
    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    // === Directory ===

    /// Register a new employee.
    ///
    /// # Errors
    ///
    /// See [`EmployeeDirectory::add`].
    pub fn add_employee(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        pin: impl Into<String>,
        hourly_rate: Decimal,
    ) -> Result<&EmployeeRecord> {
        let record = self.directory.add(id, name, pin, hourly_rate)?;
        info!("Added employee {} ({})", record.id, record.name);
        Ok(record)
    }

    /// The employee directory.
    #[must_use]
    pub fn directory(&self) -> &EmployeeDirectory {
        &self.directory
    }

    /// Check an employee's login.
    ///
    /// # Errors
    ///
    /// See [`EmployeeDirectory::verify_credentials`].
    pub fn verify_employee(&self, id: &str, pin: &str) -> Result<&EmployeeRecord> {
        self.directory.verify_credentials(id, pin)
    }

    /// Check the admin PIN.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCredentials`] if the PIN does not match.
    pub fn verify_admin(&self, pin: &str) -> Result<()> {
        if pin == self.admin_pin {
            Ok(())
        } else {
            Err(Error::InvalidCredentials)
        }
    }

    // === Sessions ===

    /// Open a session for an employee.
    ///
    /// Returns the formatted start time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyTimedIn`] if the employee has an open session
    /// (which is left untouched) and [`Error::EmployeeNotFound`] for an
    /// unknown ID.
    pub fn time_in(&mut self, employee_id: &str) -> Result<String> {
        if self.active.contains_key(employee_id) {
            return Err(Error::AlreadyTimedIn {
                employee_id: employee_id.to_string(),
            });
        }
        let employee = self.directory.get(employee_id)?;

        let start = clock::record_start(self.clock.as_ref());
        let session = ActiveSession::new(employee, start);
        self.active.insert(employee_id.to_string(), session);

        info!("Employee {} timed in at {}", employee_id, start);
        Ok(clock::format_time(start))
    }

    /// Close an employee's open session and log it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotTimedIn`] if the employee has no open session, or
    /// a storage error if the daily log cannot be written. In the latter case
    /// the session stays open.
    pub fn time_out(&mut self, employee_id: &str) -> Result<TimeOutSummary> {
        let active = self
            .active
            .get(employee_id)
            .ok_or_else(|| Error::NotTimedIn {
                employee_id: employee_id.to_string(),
            })?;

        let elapsed = clock::record_stop(Some(active.start), self.clock.now(), active.hourly_rate)?;
        let completed = active.clone().complete(elapsed);

        self.storage.append_daily(&completed)?;
        self.active.remove(employee_id);

        info!(
            "Employee {} timed out at {} after {} hours",
            employee_id,
            elapsed.stop,
            clock::format_amount(completed.hours_worked)
        );

        let summary = TimeOutSummary {
            time_out: clock::format_time(elapsed.stop),
            hours_worked: completed.hours_worked,
            pay: completed.pay,
        };
        self.completed.push(completed);
        Ok(summary)
    }

    /// Describe an employee's current state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmployeeNotFound`] for an unknown ID without an open
    /// session.
    pub fn status_summary(&self, employee_id: &str) -> Result<String> {
        if let Some(session) = self.active.get(employee_id) {
            return Ok(format!(
                "Current Status: Timed In\nTime In: {}\nHourly Rate: {}{}/hr",
                clock::format_time(session.start),
                self.currency_symbol,
                clock::format_amount(session.hourly_rate)
            ));
        }

        let employee = self.directory.get(employee_id)?;
        Ok(format!(
            "Current Status: Not Timed In\nHourly Rate: {}{}/hr",
            self.currency_symbol,
            clock::format_amount(employee.hourly_rate)
        ))
    }

    /// Check whether an employee has an open session.
    #[must_use]
    pub fn is_timed_in(&self, employee_id: &str) -> bool {
        self.active.contains_key(employee_id)
    }

    /// The open session of an employee, if any.
    #[must_use]
    pub fn active_session(&self, employee_id: &str) -> Option<&ActiveSession> {
        self.active.get(employee_id)
    }

    /// Every session completed during this run, oldest first.
    #[must_use]
    pub fn completed_sessions(&self) -> &[CompletedSession] {
        &self.completed
    }

    // === Reports ===

    /// Write a report over the last `window_days` days.
    ///
    /// Itemized reports overwrite the weekly report file, aggregated reports
    /// overwrite the monthly one. Returns the path written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoData`] if no session has been completed yet, or a
    /// storage error if the file cannot be written.
    pub fn generate_period_report(&self, window_days: u32, aggregate: bool) -> Result<PathBuf> {
        if self.completed.is_empty() {
            return Err(Error::NoData);
        }

        let window = ReportWindow::trailing(self.clock.now().date(), window_days);
        let sessions = window.select(&self.completed);

        let (path, rows) = match ReportStyle::from(aggregate) {
            ReportStyle::Itemized => {
                let path = self.storage.weekly_report_path();
                let rows = self.storage.write_sessions(&path, sessions)?;
                (path, rows)
            }
            ReportStyle::Aggregated => {
                let path = self.storage.monthly_report_path();
                let rows = self
                    .storage
                    .write_totals(&path, &aggregate_by_employee(sessions)?)?;
                (path, rows)
            }
        };

        info!(
            "Wrote {} rows covering {} to {} into {}",
            rows,
            window.first,
            window.last,
            path.display()
        );
        Ok(path)
    }

    /// Write the itemized report over the weekly window.
    ///
    /// # Errors
    ///
    /// See [`AttendanceManager::generate_period_report`].
    pub fn weekly_report(&self) -> Result<PathBuf> {
        self.generate_period_report(self.weekly_window_days, false)
    }

    /// Write the aggregated report over the monthly window.
    ///
    /// # Errors
    ///
    /// See [`AttendanceManager::generate_period_report`].
    pub fn monthly_report(&self) -> Result<PathBuf> {
        self.generate_period_report(self.monthly_window_days, true)
    }

    /// Raw rows of the daily log, header included.
    ///
    /// # Errors
    ///
    /// Returns an error if the log exists but cannot be read.
    pub fn daily_log_rows(&self) -> Result<Vec<Vec<String>>> {
        self.storage.read_daily()
    }
}
