//! `timeclock` - CLI for the employee time clock
//!
//! This binary runs the interactive time clock terminal and provides commands
//! for inspecting the daily log and configuration.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io;

use clap::Parser;

use timeclock::cli::render::render_rows;
use timeclock::cli::{Cli, Command, ConfigCommand, LogCommand, OutputFormat};
use timeclock::config::DEFAULT_ADMIN_PIN;
use timeclock::{init_logging, AttendanceManager, Config, Kiosk, Storage, SystemClock};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    match cli.command.unwrap_or(Command::Kiosk) {
        Command::Kiosk => handle_kiosk(&config),
        Command::Log(LogCommand::Show { format }) => handle_log_show(&config, format),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

fn handle_kiosk(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut manager = AttendanceManager::from_config(config, Box::new(SystemClock))?;

    if config.admin.pin == DEFAULT_ADMIN_PIN {
        println!("Admin PIN: {DEFAULT_ADMIN_PIN} (set [admin] pin in the config file to change it)");
    }
    println!(
        "Reports directory: {}",
        manager.storage().directory().display()
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    Kiosk::new(&mut manager, stdin.lock(), stdout.lock()).run()?;
    Ok(())
}

fn handle_log_show(config: &Config, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let storage = Storage::open(config.report_dir(), config.report_files())?;
    let rows = storage.read_daily()?;
    println!("{}", render_rows(&rows, format)?);
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                let mut value = serde_json::to_value(config)?;
                value["admin"]["pin"] = "********".into();
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Admin]");
                println!(
                    "  PIN:                {}",
                    if config.admin.pin == DEFAULT_ADMIN_PIN {
                        "default"
                    } else {
                        "custom"
                    }
                );
                println!();
                println!("[Reports]");
                println!("  Directory:          {}", config.report_dir().display());
                println!("  Daily log:          {}", config.reports.daily_log);
                println!("  Weekly report:      {}", config.reports.weekly_report);
                println!("  Monthly report:     {}", config.reports.monthly_report);
                println!(
                    "  Weekly window:      {} days",
                    config.reports.weekly_window_days
                );
                println!(
                    "  Monthly window:     {} days",
                    config.reports.monthly_window_days
                );
                println!();
                println!("[Display]");
                println!("  Currency symbol:    {}", config.display.currency_symbol);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
