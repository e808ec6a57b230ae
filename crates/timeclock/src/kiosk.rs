//! Interactive terminal front end.
//!
//! The kiosk walks an operator through the login screen, the employee panel
//! and the admin panel, calling into the [`AttendanceManager`] for every
//! action. It reads answers line by line from any [`BufRead`] and writes
//! screens to any [`Write`], so the same code serves a real terminal and a
//! scripted test. Running out of input ends the session like choosing quit.

use std::io::{BufRead, Write};

use rust_decimal::Decimal;
use tabled::{
    builder::Builder,
    settings::{object::Columns, Alignment, Style},
};
use tracing::error;

use crate::attendance::AttendanceManager;
use crate::clock;
use crate::error::{Error, Result};

/// Whether the operator wants to keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// A terminal session bound to one attendance manager.
#[derive(Debug)]
pub struct Kiosk<'a, R, W> {
    manager: &'a mut AttendanceManager,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Kiosk<'a, R, W> {
    /// Create a kiosk reading from `input` and drawing to `output`.
    pub fn new(manager: &'a mut AttendanceManager, input: R, output: W) -> Self {
        Self {
            manager,
            input,
            output,
        }
    }

    /// Run the main menu until the operator quits or input ends.
    ///
    /// Failed operations are shown on screen and the session continues.
    ///
    /// # Errors
    ///
    /// Returns an error only if the terminal itself cannot be read or written.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.heading("Timekeeping System")?;
            writeln!(self.output, "  1) Employee Login")?;
            writeln!(self.output, "  2) Admin Login")?;
            writeln!(self.output, "  q) Quit")?;

            let Some(choice) = self.prompt("Select: ")? else {
                break;
            };
            let flow = match choice.as_str() {
                "1" => self.employee_login()?,
                "2" => self.admin_login()?,
                "q" | "Q" | "quit" => Flow::Quit,
                _ => {
                    self.invalid_choice(&choice)?;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                break;
            }
        }

        writeln!(self.output, "Goodbye.")?;
        self.output.flush()?;
        Ok(())
    }

    // === Employee screens ===

    fn employee_login(&mut self) -> Result<Flow> {
        self.heading("Employee Login")?;
        let Some(employee_id) = self.prompt("Employee ID: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(pin) = self.prompt("PIN: ")? else {
            return Ok(Flow::Quit);
        };

        if employee_id.is_empty() || pin.is_empty() {
            writeln!(self.output, "Error: Please fill all fields!")?;
            return Ok(Flow::Continue);
        }

        let verified = self
            .manager
            .verify_employee(&employee_id, &pin)
            .map(|employee| employee.name.clone());
        match verified {
            Ok(name) => self.employee_panel(&employee_id, &name),
            Err(e) => {
                self.failure("Login Failed", &e)?;
                Ok(Flow::Continue)
            }
        }
    }

    fn employee_panel(&mut self, employee_id: &str, name: &str) -> Result<Flow> {
        loop {
            self.heading(&format!("Employee Panel - {name}"))?;
            writeln!(self.output, "Welcome, {name}!")?;
            writeln!(self.output, "Employee ID: {employee_id}")?;
            writeln!(self.output)?;
            match self.manager.status_summary(employee_id) {
                Ok(summary) => writeln!(self.output, "{summary}")?,
                Err(e) => self.failure("Error", &e)?,
            }
            writeln!(self.output)?;
            writeln!(self.output, "  1) Time In")?;
            writeln!(self.output, "  2) Time Out")?;
            writeln!(self.output, "  3) Logout")?;

            let Some(choice) = self.prompt("Select: ")? else {
                return Ok(Flow::Quit);
            };
            match choice.as_str() {
                "1" => match self.manager.time_in(employee_id) {
                    Ok(time_in) => writeln!(self.output, "Time In recorded at {time_in}")?,
                    Err(e) => self.failure("Error", &e)?,
                },
                "2" => match self.manager.time_out(employee_id) {
                    Ok(summary) => {
                        writeln!(self.output, "Time Out recorded at {}", summary.time_out)?;
                        writeln!(
                            self.output,
                            "Hours Worked: {} hours",
                            clock::format_amount(summary.hours_worked)
                        )?;
                        writeln!(
                            self.output,
                            "ETC: {}{}",
                            self.manager.currency_symbol(),
                            clock::format_amount(summary.pay)
                        )?;
                        writeln!(self.output)?;
                        writeln!(self.output, "Thank you for your work today!")?;

                        let Some(answer) = self.prompt(
                            "Do you want to logout and return to main login screen? [y/N]: ",
                        )?
                        else {
                            return Ok(Flow::Quit);
                        };
                        if is_yes(&answer) {
                            return Ok(Flow::Continue);
                        }
                    }
                    Err(e) => self.failure("Error", &e)?,
                },
                "3" => return Ok(Flow::Continue),
                _ => self.invalid_choice(&choice)?,
            }
        }
    }

    // === Admin screens ===

    fn admin_login(&mut self) -> Result<Flow> {
        self.heading("Admin Login")?;
        let Some(pin) = self.prompt("Admin PIN: ")? else {
            return Ok(Flow::Quit);
        };

        if pin.is_empty() {
            writeln!(self.output, "Error: Please enter PIN!")?;
            return Ok(Flow::Continue);
        }

        match self.manager.verify_admin(&pin) {
            Ok(()) => self.admin_panel(),
            Err(e) => {
                self.failure("Login Failed", &e)?;
                Ok(Flow::Continue)
            }
        }
    }

    fn admin_panel(&mut self) -> Result<Flow> {
        loop {
            self.heading("Admin Panel")?;
            writeln!(self.output, "  1) Add Employee")?;
            writeln!(self.output, "  2) View Employees")?;
            writeln!(self.output, "  3) View Daily Report")?;
            writeln!(self.output, "  4) Generate Weekly Report")?;
            writeln!(self.output, "  5) Generate Monthly Report")?;
            writeln!(self.output, "  6) Logout")?;

            let Some(choice) = self.prompt("Select: ")? else {
                return Ok(Flow::Quit);
            };
            match choice.as_str() {
                "1" => {
                    if self.add_employee()? == Flow::Quit {
                        return Ok(Flow::Quit);
                    }
                }
                "2" => self.list_employees()?,
                "3" => self.daily_report()?,
                "4" => {
                    let result = self.manager.weekly_report();
                    self.report_outcome("Weekly", result)?;
                }
                "5" => {
                    let result = self.manager.monthly_report();
                    self.report_outcome("Monthly", result)?;
                }
                "6" => return Ok(Flow::Continue),
                _ => self.invalid_choice(&choice)?,
            }
        }
    }

    fn add_employee(&mut self) -> Result<Flow> {
        self.heading("Add New Employee")?;
        let rate_label = format!("Hourly Rate ({}): ", self.manager.currency_symbol());

        let Some(employee_id) = self.prompt("Employee ID: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(name) = self.prompt("Name: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(pin) = self.prompt("PIN: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(rate) = self.prompt(&rate_label)? else {
            return Ok(Flow::Quit);
        };

        if [&employee_id, &name, &pin, &rate]
            .iter()
            .any(|field| field.is_empty())
        {
            writeln!(self.output, "Error: Please fill all fields!")?;
            return Ok(Flow::Continue);
        }

        let Ok(hourly_rate) = rate.parse::<Decimal>() else {
            writeln!(self.output, "Error: Invalid hourly rate!")?;
            return Ok(Flow::Continue);
        };

        let added = self
            .manager
            .add_employee(employee_id, name, pin, hourly_rate)
            .map(|_| ());
        match added {
            Ok(()) => writeln!(self.output, "Employee added successfully!")?,
            Err(e) => self.failure("Error", &e)?,
        }
        Ok(Flow::Continue)
    }

    fn list_employees(&mut self) -> Result<()> {
        self.heading("Employee List")?;
        if self.manager.directory().is_empty() {
            writeln!(self.output, "No employees registered.")?;
            return Ok(());
        }

        let currency = self.manager.currency_symbol();
        let mut builder = Builder::default();
        builder.push_record(["Employee ID", "Name", "Hourly Rate"]);
        for employee in self.manager.directory().list() {
            builder.push_record([
                employee.id.clone(),
                employee.name.clone(),
                format!("{currency}{}", clock::format_amount(employee.hourly_rate)),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.modify(Columns::new(2..3), Alignment::right());
        writeln!(self.output, "{table}")?;
        Ok(())
    }

    fn daily_report(&mut self) -> Result<()> {
        self.heading("Daily Attendance Report")?;
        match self.manager.daily_log_rows() {
            Ok(rows) if rows.is_empty() => writeln!(self.output, "No data available.")?,
            Ok(rows) => {
                for row in rows {
                    writeln!(self.output, "{}", row.join(" | "))?;
                }
            }
            Err(e) => self.failure("Error", &e)?,
        }
        Ok(())
    }

    fn report_outcome(&mut self, period: &str, result: Result<std::path::PathBuf>) -> Result<()> {
        match result {
            Ok(path) => writeln!(
                self.output,
                "{period} report saved to {}",
                path.display()
            )?,
            Err(e) => self.failure("Error", &e)?,
        }
        Ok(())
    }

    // === Terminal helpers ===

    fn heading(&mut self, title: &str) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "=== {title} ===")?;
        Ok(())
    }

    /// Show `label` and read one trimmed line, or `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn failure(&mut self, label: &str, err: &Error) -> Result<()> {
        if !err.is_user_error() {
            error!("{}", err);
        }
        writeln!(self.output, "{label}: {err}")?;
        Ok(())
    }

    fn invalid_choice(&mut self, choice: &str) -> Result<()> {
        writeln!(self.output, "Invalid choice: {choice}")?;
        Ok(())
    }
}

fn is_yes(answer: &str) -> bool {
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}
