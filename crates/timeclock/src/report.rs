//! Period report selection and aggregation.
//!
//! Reports cover a trailing window of calendar days ending today. Itemized
//! reports list every session in the window; aggregated reports fold them
//! into one line per employee.

use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use crate::clock;
use crate::error::{Error, Result};
use crate::session::CompletedSession;

/// Shape of a period report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStyle {
    /// One row per completed session.
    Itemized,
    /// One row per employee with counts and sums.
    Aggregated,
}

impl From<bool> for ReportStyle {
    fn from(aggregate: bool) -> Self {
        if aggregate {
            Self::Aggregated
        } else {
            Self::Itemized
        }
    }
}

/// Inclusive range of calendar days `[first, last]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    /// Earliest day included.
    pub first: NaiveDate,
    /// Latest day included.
    pub last: NaiveDate,
}

impl ReportWindow {
    /// The `days` days before `today`, plus today itself.
    #[must_use]
    pub fn trailing(today: NaiveDate, days: u32) -> Self {
        let first = today
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        Self { first, last: today }
    }

    /// Check whether `date` falls inside the window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.first <= date && date <= self.last
    }

    /// The sessions dated inside the window, in their original order.
    pub fn select<'a>(
        &self,
        sessions: &'a [CompletedSession],
    ) -> impl Iterator<Item = &'a CompletedSession> + 'a {
        let window = *self;
        sessions
            .iter()
            .filter(move |session| window.contains(session.date))
    }
}

/// Per-employee totals for an aggregated report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeTotals {
    /// The employee these totals belong to.
    pub employee_id: String,
    /// Name recorded on the employee's first session in the window.
    pub employee_name: String,
    /// Number of sessions in the window.
    pub days_worked: usize,
    /// Sum of unrounded hours.
    pub total_hours: Decimal,
    /// Sum of unrounded pay.
    pub total_pay: Decimal,
}

impl EmployeeTotals {
    /// Render the totals as an aggregated report row.
    #[must_use]
    pub fn to_record(&self) -> [String; 5] {
        [
            self.employee_id.clone(),
            self.employee_name.clone(),
            self.days_worked.to_string(),
            clock::format_amount(self.total_hours),
            clock::format_amount(self.total_pay),
        ]
    }
}

/// Group sessions by employee, in order of each employee's first session.
///
/// # Errors
///
/// Returns [`Error::AmountOverflow`] if an employee's hours or pay total does
/// not fit in a decimal.
pub fn aggregate_by_employee<'a>(
    sessions: impl IntoIterator<Item = &'a CompletedSession>,
) -> Result<Vec<EmployeeTotals>> {
    let mut totals: Vec<EmployeeTotals> = Vec::new();
    let mut positions: HashMap<&'a str, usize> = HashMap::new();

    for session in sessions {
        let position = *positions
            .entry(session.employee_id.as_str())
            .or_insert_with(|| {
                totals.push(EmployeeTotals {
                    employee_id: session.employee_id.clone(),
                    employee_name: session.employee_name.clone(),
                    days_worked: 0,
                    total_hours: Decimal::ZERO,
                    total_pay: Decimal::ZERO,
                });
                totals.len() - 1
            });

        let entry = &mut totals[position];
        entry.days_worked += 1;
        entry.total_hours = entry
            .total_hours
            .checked_add(session.hours_worked)
            .ok_or(Error::AmountOverflow {
                what: "total hours",
            })?;
        entry.total_pay = entry
            .total_pay
            .checked_add(session.pay)
            .ok_or(Error::AmountOverflow { what: "total pay" })?;
    }

    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn create_test_session(id: &str, date: NaiveDate, hours: i64, rate: i64) -> CompletedSession {
        let start = date.and_hms_opt(9, 0, 0).unwrap();
        CompletedSession {
            employee_id: id.to_string(),
            employee_name: format!("Employee {id}"),
            date,
            start,
            stop: start + chrono::Duration::hours(hours),
            hours_worked: Decimal::from(hours),
            pay: Decimal::from(hours * rate),
        }
    }

    #[test]
    fn test_report_style_from_bool() {
        assert_eq!(ReportStyle::from(true), ReportStyle::Aggregated);
        assert_eq!(ReportStyle::from(false), ReportStyle::Itemized);
    }

    #[test]
    fn test_trailing_window_bounds() {
        let window = ReportWindow::trailing(day(19), 7);
        assert_eq!(window.first, day(12));
        assert_eq!(window.last, day(19));

        assert!(window.contains(day(12)));
        assert!(window.contains(day(19)));
        assert!(!window.contains(day(11)));
        assert!(!window.contains(day(20)));
    }

    #[test]
    fn test_zero_day_window_is_today_only() {
        let window = ReportWindow::trailing(day(19), 0);
        assert!(window.contains(day(19)));
        assert!(!window.contains(day(18)));
    }

    #[test]
    fn test_select_filters_and_keeps_order() {
        let sessions = vec![
            create_test_session("E1", day(1), 4, 50),
            create_test_session("E2", day(15), 3, 50),
            create_test_session("E1", day(18), 5, 50),
        ];
        let window = ReportWindow::trailing(day(19), 7);

        let selected: Vec<&str> = window
            .select(&sessions)
            .map(|s| s.employee_id.as_str())
            .collect();
        assert_eq!(selected, vec!["E2", "E1"]);
    }

    #[test]
    fn test_aggregate_same_employee() {
        let sessions = vec![
            create_test_session("E1", day(17), 3, 50),
            create_test_session("E1", day(18), 5, 50),
        ];

        let totals = aggregate_by_employee(&sessions).unwrap();
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].days_worked, 2);
        assert_eq!(totals[0].total_hours, Decimal::from(8));
        assert_eq!(totals[0].total_pay, Decimal::from(400));
        assert_eq!(
            totals[0].to_record(),
            [
                "E1".to_string(),
                "Employee E1".to_string(),
                "2".to_string(),
                "8.00".to_string(),
                "400.00".to_string(),
            ]
        );
    }

    #[test]
    fn test_aggregate_first_seen_order() {
        let sessions = vec![
            create_test_session("E2", day(16), 2, 40),
            create_test_session("E1", day(17), 3, 50),
            create_test_session("E2", day(18), 1, 40),
        ];

        let totals = aggregate_by_employee(&sessions).unwrap();
        let ids: Vec<&str> = totals.iter().map(|t| t.employee_id.as_str()).collect();
        assert_eq!(ids, vec!["E2", "E1"]);
        assert_eq!(totals[0].days_worked, 2);
        assert_eq!(totals[0].total_pay, Decimal::from(120));
    }

    #[test]
    fn test_aggregate_empty() {
        assert!(aggregate_by_employee(std::iter::empty())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_aggregate_pay_out_of_range() {
        let mut first = create_test_session("E1", day(17), 1, 1);
        first.pay = Decimal::MAX;
        let mut second = create_test_session("E1", day(18), 1, 1);
        second.pay = Decimal::MAX;

        let result = aggregate_by_employee(&[first, second]);
        assert!(matches!(
            result,
            Err(Error::AmountOverflow { what: "total pay" })
        ));
    }
}
