//! CSV layouts written by timeclock.
//!
//! Header rows for the daily log and the period reports, plus the default
//! file names they are written to.

/// Default file name of the append-only daily log.
pub const DAILY_LOG_FILE: &str = "daily_report.csv";

/// Default file name of the itemized weekly report.
pub const WEEKLY_REPORT_FILE: &str = "weekly_report.csv";

/// Default file name of the aggregated monthly report.
pub const MONTHLY_REPORT_FILE: &str = "monthly_report.csv";

/// Columns of the daily log and of itemized period reports.
pub const SESSION_HEADER: [&str; 7] = [
    "Employee ID",
    "Employee Name",
    "Date",
    "Time In",
    "Time Out",
    "Hours Worked",
    "ETC",
];

/// Columns of aggregated period reports.
pub const TOTALS_HEADER: [&str; 5] = [
    "Employee ID",
    "Employee Name",
    "Days Worked",
    "Total Hours",
    "Total ETC",
];
