//! `timeclock` - An employee time clock with CSV payroll logs
//!
//! This library provides the core of a shared time clock: an in-memory employee
//! directory, time-in/time-out session tracking with pay calculation, an
//! append-only CSV daily log, and weekly/monthly reports.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod attendance;
pub mod cli;
pub mod clock;
pub mod config;
pub mod directory;
pub mod error;
pub mod kiosk;
pub mod logging;
pub mod report;
pub mod session;
pub mod storage;

pub use attendance::{AttendanceManager, TimeOutSummary};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use directory::{EmployeeDirectory, EmployeeRecord};
pub use error::{Error, Result};
pub use kiosk::Kiosk;
pub use logging::init_logging;
pub use report::{EmployeeTotals, ReportWindow};
pub use session::{ActiveSession, CompletedSession};
pub use storage::{ReportFiles, Storage};
