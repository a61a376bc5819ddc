//! Arguments for logging.

use crate::{LogFormat, LogRotation};
use clap::{ArgAction, Args};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Logging arguments.
#[derive(Args, Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LogArgs {
    /// Verbosity level (1-5).
    /// By default, the verbosity level is set to 3 (info level).
    ///
    /// This verbosity level is shared by both stdout and file logging (if enabled).
    #[arg(
        short = 'v',
        global = true,
        default_value = "3",
        env = "MORPH_NODE_LOG_LEVEL",
        action = ArgAction::Count,
    )]
    pub level: u8,
    /// If set, no logs are printed to stdout.
    #[arg(
        long = "logs.stdout.quiet",
        short = 'q',
        global = true,
        default_value = "false",
        env = "MORPH_NODE_LOG_STDOUT_QUIET"
    )]
    pub stdout_quiet: bool,
    /// The format of the logs printed to stdout. One of: full, json, pretty, compact.
    #[arg(
        long = "logs.stdout.format",
        global = true,
        default_value = "full",
        env = "MORPH_NODE_LOG_STDOUT_FORMAT"
    )]
    pub stdout_format: LogFormat,
    /// The directory to store the log files.
    /// If not set, no logs are printed to files.
    #[arg(long = "logs.file.directory", global = true, env = "MORPH_NODE_LOG_FILE_DIRECTORY")]
    pub file_directory: Option<PathBuf>,
    /// The format of the logs printed to log files. One of: full, json, pretty, compact.
    #[arg(
        long = "logs.file.format",
        global = true,
        default_value = "full",
        env = "MORPH_NODE_LOG_FILE_FORMAT"
    )]
    pub file_format: LogFormat,
    /// The rotation of the log files. One of: minutely, hourly, daily, never.
    #[arg(
        long = "logs.file.rotation",
        global = true,
        default_value = "never",
        env = "MORPH_NODE_LOG_FILE_ROTATION"
    )]
    pub file_rotation: LogRotation,
}

impl Default for LogArgs {
    fn default() -> Self {
        Self {
            level: 3,
            stdout_quiet: false,
            stdout_format: LogFormat::Full,
            file_directory: None,
            file_format: LogFormat::Full,
            file_rotation: LogRotation::Never,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        logs: LogArgs,
    }

    #[test]
    fn test_default_verbosity_level() {
        let cli = TestCli::parse_from(["test_app"]);
        assert_eq!(cli.logs, LogArgs::default());
    }

    #[test]
    fn test_verbosity_count() {
        assert_eq!(TestCli::parse_from(["test_app", "-v"]).logs.level, 1);
        assert_eq!(TestCli::parse_from(["test_app", "-vvvv"]).logs.level, 4);
    }

    #[test]
    fn test_file_logging_flags() {
        let cli = TestCli::parse_from([
            "test_app",
            "--logs.file.directory",
            "/tmp/morph",
            "--logs.file.format",
            "json",
            "--logs.file.rotation",
            "daily",
            "-q",
        ]);
        assert!(cli.logs.stdout_quiet);
        assert_eq!(cli.logs.file_directory, Some(PathBuf::from("/tmp/morph")));
        assert_eq!(cli.logs.file_format, LogFormat::Json);
        assert_eq!(cli.logs.file_rotation, LogRotation::Daily);
    }
}
