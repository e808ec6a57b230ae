//! Command-line interface for timeclock.
//!
//! This module provides the CLI structure for the `timeclock` binary.

mod commands;
pub mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{ConfigCommand, LogCommand, OutputFormat};

/// timeclock - Employee time clock and payroll log
///
/// Employees time in and out at a shared terminal; completed shifts are
/// appended to a CSV daily log and rolled up into weekly and monthly reports.
#[derive(Debug, Parser)]
#[command(name = "timeclock")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute (defaults to `kiosk`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the interactive time clock terminal
    Kiosk,

    /// Inspect the daily attendance log
    #[command(subcommand)]
    Log(LogCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn cli_with(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            command: None,
        }
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "timeclock");
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(cli_with(0, true).verbosity(), crate::logging::Verbosity::Quiet);
        assert_eq!(cli_with(3, true).verbosity(), crate::logging::Verbosity::Quiet);
        assert_eq!(
            cli_with(0, false).verbosity(),
            crate::logging::Verbosity::Normal
        );
        assert_eq!(
            cli_with(1, false).verbosity(),
            crate::logging::Verbosity::Verbose
        );
        assert_eq!(
            cli_with(2, false).verbosity(),
            crate::logging::Verbosity::Trace
        );
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_without_command() {
        let cli = Cli::try_parse_from(["timeclock"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_kiosk() {
        let cli = Cli::try_parse_from(["timeclock", "kiosk"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Kiosk)));
    }

    #[test]
    fn test_parse_log_show_format() {
        let cli = Cli::try_parse_from(["timeclock", "log", "show", "--format", "json"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Log(LogCommand::Show {
                format: OutputFormat::Json
            }))
        ));

        let cli = Cli::try_parse_from(["timeclock", "log", "show"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Log(LogCommand::Show {
                format: OutputFormat::Plain
            }))
        ));
    }

    #[test]
    fn test_parse_config_validate_file() {
        let cli =
            Cli::try_parse_from(["timeclock", "config", "validate", "-f", "/tmp/t.toml"]).unwrap();
        match cli.command {
            Some(Command::Config(ConfigCommand::Validate { file })) => {
                assert_eq!(file, Some(PathBuf::from("/tmp/t.toml")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_with_config() {
        let cli =
            Cli::try_parse_from(["timeclock", "-c", "/custom/config.toml", "config", "path"])
                .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_with_verbose_and_quiet() {
        let cli = Cli::try_parse_from(["timeclock", "-vv", "kiosk"]).unwrap();
        assert_eq!(cli.verbose, 2);

        let cli = Cli::try_parse_from(["timeclock", "-q"]).unwrap();
        assert!(cli.quiet);
    }

    #[test]
    fn test_parse_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["timeclock", "log", "show", "--format", "xml"]).is_err());
    }
}
