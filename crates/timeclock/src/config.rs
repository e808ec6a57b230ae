//! Configuration management for timeclock.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};
use crate::storage::{schema, ReportFiles};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "timeclock";

/// Admin PIN used when none is configured.
pub const DEFAULT_ADMIN_PIN: &str = "admin123";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `TIMECLOCK_`)
/// 2. TOML config file at `~/.config/timeclock/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Admin access.
    pub admin: AdminConfig,
    /// Report files and windows.
    pub reports: ReportsConfig,
    /// Presentation settings.
    pub display: DisplayConfig,
}

/// Admin-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// PIN that unlocks the admin panel. Fixed for the lifetime of a run.
    #[serde(deserialize_with = "pin_from_text_or_number")]
    pub pin: String,
}

/// Report-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportsConfig {
    /// Directory for the daily log and period reports.
    /// Defaults to `~/.local/share/timeclock`
    pub directory: Option<PathBuf>,
    /// File name of the append-only daily log.
    pub daily_log: String,
    /// File name of the itemized weekly report.
    pub weekly_report: String,
    /// File name of the aggregated monthly report.
    pub monthly_report: String,
    /// Trailing days covered by the weekly report.
    pub weekly_window_days: u32,
    /// Trailing days covered by the monthly report.
    pub monthly_window_days: u32,
}

/// Presentation-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Symbol printed before money amounts.
    pub currency_symbol: String,
}

/// Accept a PIN written as a string or as a bare number.
///
/// Environment values and unquoted TOML like `pin = 4321` arrive as integers.
/// Leading zeros are already gone by then, so such PINs must be quoted.
fn pin_from_text_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Pin {
        Text(String),
        Unsigned(u64),
        Signed(i64),
    }

    Ok(match Pin::deserialize(deserializer)? {
        Pin::Text(text) => text,
        Pin::Unsigned(number) => number.to_string(),
        Pin::Signed(number) => number.to_string(),
    })
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            pin: DEFAULT_ADMIN_PIN.to_string(),
        }
    }
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            directory: None, // Will be resolved to default at runtime
            daily_log: schema::DAILY_LOG_FILE.to_string(),
            weekly_report: schema::WEEKLY_REPORT_FILE.to_string(),
            monthly_report: schema::MONTHLY_REPORT_FILE.to_string(),
            weekly_window_days: 7,
            monthly_window_days: 30,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "₱".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `TIMECLOCK_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file).nested())
            .merge(Env::prefixed("TIMECLOCK_").split("_"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.admin.pin.is_empty() {
            return Err(Error::ConfigValidation {
                message: "admin pin must not be empty".to_string(),
            });
        }

        let files = [
            ("daily_log", &self.reports.daily_log),
            ("weekly_report", &self.reports.weekly_report),
            ("monthly_report", &self.reports.monthly_report),
        ];
        for (key, name) in files {
            if name.trim().is_empty() {
                return Err(Error::ConfigValidation {
                    message: format!("{key} file name must not be empty"),
                });
            }
        }
        if files[0].1 == files[1].1 || files[0].1 == files[2].1 || files[1].1 == files[2].1 {
            return Err(Error::ConfigValidation {
                message: "daily_log, weekly_report and monthly_report must use distinct file names"
                    .to_string(),
            });
        }

        if self.reports.weekly_window_days == 0 || self.reports.monthly_window_days == 0 {
            return Err(Error::ConfigValidation {
                message: "report windows must be at least 1 day".to_string(),
            });
        }

        Ok(())
    }

    /// Get the report directory, resolving defaults if not set.
    #[must_use]
    pub fn report_dir(&self) -> PathBuf {
        self.reports
            .directory
            .clone()
            .unwrap_or_else(Self::default_data_dir)
    }

    /// Get the report file names.
    #[must_use]
    pub fn report_files(&self) -> ReportFiles {
        ReportFiles {
            daily_log: self.reports.daily_log.clone(),
            weekly_report: self.reports.weekly_report.clone(),
            monthly_report: self.reports.monthly_report.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.admin.pin, "admin123");
        assert_eq!(config.display.currency_symbol, "₱");
        assert!(config.reports.directory.is_none());
    }

    #[test]
    fn test_default_reports_config() {
        let reports = ReportsConfig::default();

        assert_eq!(reports.daily_log, "daily_report.csv");
        assert_eq!(reports.weekly_report, "weekly_report.csv");
        assert_eq!(reports.monthly_report, "monthly_report.csv");
        assert_eq!(reports.weekly_window_days, 7);
        assert_eq!(reports.monthly_window_days, 30);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_admin_pin() {
        let mut config = Config::default();
        config.admin.pin = String::new();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("admin pin"));
    }

    #[test]
    fn test_validate_empty_file_name() {
        let mut config = Config::default();
        config.reports.weekly_report = "  ".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("weekly_report"));
    }

    #[test]
    fn test_validate_clashing_file_names() {
        let mut config = Config::default();
        config.reports.monthly_report = config.reports.daily_log.clone();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("distinct"));
    }

    #[test]
    fn test_validate_zero_window() {
        let mut config = Config::default();
        config.reports.monthly_window_days = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("at least 1 day"));
    }

    #[test]
    fn test_report_dir_default() {
        let config = Config::default();
        assert!(config.report_dir().to_string_lossy().contains("timeclock"));
    }

    #[test]
    fn test_report_dir_custom() {
        let mut config = Config::default();
        config.reports.directory = Some(PathBuf::from("/srv/payroll"));

        assert_eq!(config.report_dir(), PathBuf::from("/srv/payroll"));
    }

    #[test]
    fn test_report_files() {
        let mut config = Config::default();
        config.reports.daily_log = "shifts.csv".to_string();

        let files = config.report_files();
        assert_eq!(files.daily_log, "shifts.csv");
        assert_eq!(files.weekly_report, "weekly_report.csv");
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("timeclock"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        // A missing file falls back to defaults.
        let result = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")));
        assert!(result.is_ok());
    }

    #[test]
    fn test_load_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[admin]\npin = \"s3cret\"\n\n[reports]\nweekly_window_days = 14\n\n[display]\ncurrency_symbol = \"$\"\n",
        )
        .unwrap();

        let config = Config::load_from(Some(path)).unwrap();
        assert_eq!(config.reports.weekly_window_days, 14);
        assert_eq!(config.display.currency_symbol, "$");
        assert_eq!(config.reports.monthly_window_days, 30);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[reports]\nweekly_window_days = 0\n").unwrap();

        let result = Config::load_from(Some(path));
        assert!(matches!(result, Err(Error::ConfigValidation { .. })));
    }

    #[test]
    fn test_load_numeric_pin_from_env() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("TIMECLOCK_ADMIN_PIN", "4321");
            let path = jail.directory().join("config.toml");

            let config = Config::load_from(Some(path)).map_err(|e| e.to_string())?;
            assert_eq!(config.admin.pin, "4321");
            Ok(())
        });
    }

    #[test]
    fn test_load_numeric_pin_from_toml() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[admin]\npin = 987654\n")?;
            let path = jail.directory().join("config.toml");

            let config = Config::load_from(Some(path)).map_err(|e| e.to_string())?;
            assert_eq!(config.admin.pin, "987654");
            Ok(())
        });
    }

    #[test]
    fn test_admin_pin_keeps_quoted_text() {
        let admin: AdminConfig = serde_json::from_str(r#"{"pin": "0042"}"#).unwrap();
        assert_eq!(admin.pin, "0042");
    }

    #[test]
    fn test_reports_config_deserialize() {
        let json = r#"{"directory": "/tmp/reports", "monthly_window_days": 31}"#;
        let reports: ReportsConfig = serde_json::from_str(json).unwrap();
        assert_eq!(reports.directory, Some(PathBuf::from("/tmp/reports")));
        assert_eq!(reports.monthly_window_days, 31);
        assert_eq!(reports.weekly_window_days, 7);
    }

    #[test]
    fn test_admin_config_serialize() {
        let json = serde_json::to_string(&AdminConfig::default()).unwrap();
        assert!(json.contains("pin"));
    }
}
