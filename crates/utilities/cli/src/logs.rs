//! Logging configuration types.

use crate::{LogArgs, LogFormat};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

/// The rotation of the log files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate the log files every minute.
    Minutely,
    /// Rotate the log files hourly.
    Hourly,
    /// Rotate the log files daily.
    Daily,
    /// Do not rotate the log files.
    #[default]
    Never,
}

/// Configuration for file logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLogConfig {
    /// The directory the log files are written to.
    pub directory_path: PathBuf,
    /// The format of the log files.
    pub format: LogFormat,
    /// The rotation of the log files.
    pub rotation: LogRotation,
}

/// Configuration for stdout logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StdoutLogConfig {
    /// The format of the logs printed to stdout.
    pub format: LogFormat,
}

/// Global configuration for logging.
/// Default is to only print logs to stdout in full format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Global verbosity level.
    pub global_level: LevelFilter,
    /// The configuration for stdout logging.
    pub stdout_logs: Option<StdoutLogConfig>,
    /// The configuration for file logging.
    pub file_logs: Option<FileLogConfig>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            global_level: LevelFilter::INFO,
            stdout_logs: Some(StdoutLogConfig { format: LogFormat::Full }),
            file_logs: None,
        }
    }
}

impl From<LogArgs> for LogConfig {
    fn from(args: LogArgs) -> Self {
        Self::new(args)
    }
}

impl LogConfig {
    /// Creates a new [`LogConfig`] from [`LogArgs`].
    pub fn new(args: LogArgs) -> Self {
        let global_level = match args.level {
            0 => LevelFilter::OFF,
            1 => LevelFilter::ERROR,
            2 => LevelFilter::WARN,
            3 => LevelFilter::INFO,
            4 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        };

        let stdout_logs =
            (!args.stdout_quiet).then_some(StdoutLogConfig { format: args.stdout_format });

        let file_logs = args.file_directory.map(|directory_path| FileLogConfig {
            directory_path,
            format: args.file_format,
            rotation: args.file_rotation,
        });

        Self { global_level, stdout_logs, file_logs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::off(0, LevelFilter::OFF)]
    #[case::error(1, LevelFilter::ERROR)]
    #[case::warn(2, LevelFilter::WARN)]
    #[case::info(3, LevelFilter::INFO)]
    #[case::debug(4, LevelFilter::DEBUG)]
    #[case::trace(5, LevelFilter::TRACE)]
    #[case::beyond(9, LevelFilter::TRACE)]
    fn test_verbosity_to_level(#[case] level: u8, #[case] expected: LevelFilter) {
        let config = LogConfig::new(LogArgs { level, ..Default::default() });
        assert_eq!(config.global_level, expected);
    }

    #[test]
    fn test_default_args_match_default_config() {
        assert_eq!(LogConfig::from(LogArgs::default()), LogConfig::default());
    }

    #[test]
    fn test_quiet_with_file_logs() {
        let config = LogConfig::new(LogArgs {
            stdout_quiet: true,
            file_directory: Some(PathBuf::from("logs")),
            file_rotation: LogRotation::Hourly,
            ..Default::default()
        });
        assert!(config.stdout_logs.is_none());
        assert_eq!(
            config.file_logs,
            Some(FileLogConfig {
                directory_path: PathBuf::from("logs"),
                format: LogFormat::Full,
                rotation: LogRotation::Hourly,
            })
        );
    }
}
