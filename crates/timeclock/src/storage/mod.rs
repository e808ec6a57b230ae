//! Storage layer for timeclock.
//!
//! Completed sessions are persisted as CSV: every time-out appends one row to
//! the daily log, and period reports are rewritten from scratch each time they
//! are generated. All files live in a single report directory.

pub mod schema;

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::report::EmployeeTotals;
use crate::session::CompletedSession;

/// File names used inside the report directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFiles {
    /// Append-only log of every completed session.
    pub daily_log: String,
    /// Itemized report over the weekly window.
    pub weekly_report: String,
    /// Aggregated report over the monthly window.
    pub monthly_report: String,
}

impl Default for ReportFiles {
    fn default() -> Self {
        Self {
            daily_log: schema::DAILY_LOG_FILE.to_string(),
            weekly_report: schema::WEEKLY_REPORT_FILE.to_string(),
            monthly_report: schema::MONTHLY_REPORT_FILE.to_string(),
        }
    }
}

/// CSV storage rooted at a report directory.
#[derive(Debug, Clone)]
pub struct Storage {
    /// Directory holding every file.
    directory: PathBuf,
    /// Names of the files inside it.
    files: ReportFiles,
}

impl Storage {
    /// Open storage in `directory`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory does not exist and cannot be created.
    pub fn open(directory: impl AsRef<Path>, files: ReportFiles) -> Result<Self> {
        let directory = directory.as_ref().to_path_buf();

        if !directory.exists() {
            std::fs::create_dir_all(&directory).map_err(|source| Error::DirectoryCreate {
                path: directory.clone(),
                source,
            })?;
        }

        info!("Report directory at {}", directory.display());
        Ok(Self { directory, files })
    }

    /// Get the report directory.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the daily log.
    #[must_use]
    pub fn daily_log_path(&self) -> PathBuf {
        self.directory.join(&self.files.daily_log)
    }

    /// Path of the weekly report.
    #[must_use]
    pub fn weekly_report_path(&self) -> PathBuf {
        self.directory.join(&self.files.weekly_report)
    }

    /// Path of the monthly report.
    #[must_use]
    pub fn monthly_report_path(&self) -> PathBuf {
        self.directory.join(&self.files.monthly_report)
    }

    /// Append one completed session to the daily log.
    ///
    /// The header row is written only when the log file is first created.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or written.
    pub fn append_daily(&self, session: &CompletedSession) -> Result<()> {
        let path = self.daily_log_path();
        let is_new = !path.exists();

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut writer = csv::Writer::from_writer(file);

        if is_new {
            debug!("Creating daily log at {}", path.display());
            writer
                .write_record(schema::SESSION_HEADER)
                .map_err(|e| Error::csv(&path, e))?;
        }
        writer
            .write_record(&session.to_record())
            .map_err(|e| Error::csv(&path, e))?;
        writer.flush()?;

        debug!(
            "Appended session for {} to {}",
            session.employee_id,
            path.display()
        );
        Ok(())
    }

    /// Read the daily log as raw rows, header included.
    ///
    /// A log that has not been created yet reads as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn read_daily(&self) -> Result<Vec<Vec<String>>> {
        let path = self.daily_log_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&path)
            .map_err(|e| Error::csv(&path, e))?;

        reader
            .records()
            .map(|record| {
                record
                    .map(|r| r.iter().map(str::to_string).collect::<Vec<_>>())
                    .map_err(|e| Error::csv(&path, e))
            })
            .collect()
    }

    /// Overwrite `path` with an itemized report.
    ///
    /// Returns the number of data rows written.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn write_sessions<'a>(
        &self,
        path: &Path,
        sessions: impl IntoIterator<Item = &'a CompletedSession>,
    ) -> Result<usize> {
        let mut writer = csv::Writer::from_path(path).map_err(|e| Error::csv(path, e))?;
        writer
            .write_record(schema::SESSION_HEADER)
            .map_err(|e| Error::csv(path, e))?;

        let mut rows = 0;
        for session in sessions {
            writer
                .write_record(&session.to_record())
                .map_err(|e| Error::csv(path, e))?;
            rows += 1;
        }
        writer.flush()?;

        debug!("Wrote {} session rows to {}", rows, path.display());
        Ok(rows)
    }

    /// Overwrite `path` with an aggregated report.
    ///
    /// Returns the number of data rows written.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn write_totals(&self, path: &Path, totals: &[EmployeeTotals]) -> Result<usize> {
        let mut writer = csv::Writer::from_path(path).map_err(|e| Error::csv(path, e))?;
        writer
            .write_record(schema::TOTALS_HEADER)
            .map_err(|e| Error::csv(path, e))?;

        for entry in totals {
            writer
                .write_record(&entry.to_record())
                .map_err(|e| Error::csv(path, e))?;
        }
        writer.flush()?;

        debug!("Wrote {} total rows to {}", totals.len(), path.display());
        Ok(totals.len())
    }
}
