//! Session clock.
//!
//! Start and stop instants are local wall-clock times. The [`Clock`] trait is
//! the only source of "now", so the attendance manager can be driven by a
//! [`ManualClock`] in tests and by [`SystemClock`] everywhere else.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use tracing::warn;

use crate::error::{Error, Result};

/// Display format for clock times, e.g. `02:15 PM`.
pub const TIME_FORMAT: &str = "%I:%M %p";

/// Display format for calendar dates, e.g. `2026-10-19`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Source of the current instant.
pub trait Clock: std::fmt::Debug {
    /// The current local wall-clock time.
    fn now(&self) -> NaiveDateTime;
}

/// Reads the operating system clock in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same instant, so a test can keep one handle and give the
/// other to the attendance manager.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<NaiveDateTime>>,
}

impl ManualClock {
    /// Create a clock frozen at `now`.
    #[must_use]
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Rc::new(Cell::new(now)),
        }
    }

    /// Move the clock to an absolute instant.
    pub fn set(&self, now: NaiveDateTime) {
        self.now.set(now);
    }

    /// Move the clock by `delta` (which may be negative).
    pub fn advance(&self, delta: Duration) {
        self.now.set(self.now.get() + delta);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}

/// Outcome of stopping a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elapsed {
    /// When the session stopped.
    pub stop: NaiveDateTime,
    /// Hours between start and stop, unrounded.
    pub hours_worked: Decimal,
    /// `hours_worked * hourly_rate`, unrounded.
    pub pay: Decimal,
}

/// Fix the start point of a session.
#[must_use]
pub fn record_start(clock: &dyn Clock) -> NaiveDateTime {
    clock.now()
}

/// Close a session started at `start` and compute the hours and pay.
///
/// A stop instant earlier than the start (the system clock was moved back)
/// counts as zero elapsed time.
///
/// # Errors
///
/// Returns [`Error::NoStartRecorded`] if `start` is `None` and
/// [`Error::AmountOverflow`] if the pay does not fit in a decimal.
pub fn record_stop(
    start: Option<NaiveDateTime>,
    stop: NaiveDateTime,
    hourly_rate: Decimal,
) -> Result<Elapsed> {
    let start = start.ok_or(Error::NoStartRecorded)?;

    let mut millis = (stop - start).num_milliseconds();
    if millis < 0 {
        warn!(
            "Stop time {} precedes start time {}, counting zero hours",
            stop, start
        );
        millis = 0;
    }

    let hours_worked = Decimal::from(millis) / Decimal::from(MILLIS_PER_HOUR);
    let pay = hours_worked
        .checked_mul(hourly_rate)
        .ok_or(Error::AmountOverflow { what: "pay" })?;
    Ok(Elapsed {
        stop,
        hours_worked,
        pay,
    })
}

/// Format an instant as a 12-hour clock time.
#[must_use]
pub fn format_time(instant: NaiveDateTime) -> String {
    instant.format(TIME_FORMAT).to_string()
}

/// Format a calendar date.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Round to cents and render with exactly two decimals.
#[must_use]
pub fn format_amount(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}
