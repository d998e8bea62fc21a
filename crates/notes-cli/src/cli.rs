//! CLI argument definitions for the discharge-summary extractor.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{ColorChoice, Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

use crate::logging::{LogConfig, LogFormat};

#[derive(Parser)]
#[command(
    name = "notes-extract",
    version,
    about = "Extract normalized discharge summaries from a clinical notes export",
    long_about = "Read discharge.csv from the notes directory, keep the discharge summaries (DS),\n\
                  tokenize and lower-case their text, and write\n\
                  SUBJECT_ID,HADM_ID,CHARTTIME,TEXT rows to OUTPUT."
)]
pub struct Cli {
    /// Destination CSV file (overwritten if it exists).
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Directory containing discharge.csv (default: $MIMIC_4_DIR).
    #[arg(long = "notes-dir", value_name = "DIR")]
    pub notes_dir: Option<PathBuf>,

    /// Disable the interactive progress spinner.
    #[arg(long = "no-progress")]
    pub no_progress: bool,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Allow subject and admission identifiers in trace logs.
    #[arg(long = "log-data")]
    pub log_data: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

/// Build logging configuration from CLI flags with consistent precedence.
///
/// `--log-level` beats `-v`/`-q`, and either one stops `RUST_LOG` from
/// overriding the level.
pub fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level_filter = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    LogConfig {
        level_filter,
        use_env_filter: !(cli.verbosity.is_present() || cli.log_level.is_some()),
        with_ansi,
        format,
        log_file: cli.log_file.clone(),
        log_data: cli.log_data,
        ..LogConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["notes-extract", "out.csv", "--color", "never"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults_defer_to_rust_log() {
        let config = log_config_from_cli(&parse(&[]));
        assert_eq!(config.level_filter, LevelFilter::WARN);
        assert!(config.use_env_filter);
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(!config.with_ansi);
        assert!(!config.log_data);
    }

    #[test]
    fn test_verbosity_pins_level() {
        let config = log_config_from_cli(&parse(&["-vv"]));
        assert_eq!(config.level_filter, LevelFilter::DEBUG);
        assert!(!config.use_env_filter);

        let config = log_config_from_cli(&parse(&["-q"]));
        assert_eq!(config.level_filter, LevelFilter::ERROR);
        assert!(!config.use_env_filter);
    }

    #[test]
    fn test_log_level_beats_verbosity() {
        let config = log_config_from_cli(&parse(&["-vvv", "--log-level", "warn"]));
        assert_eq!(config.level_filter, LevelFilter::WARN);
        assert!(!config.use_env_filter);
    }

    #[test]
    fn test_log_file_format_and_data_flags() {
        let config = log_config_from_cli(&parse(&[
            "--log-format",
            "json",
            "--log-file",
            "run.log",
            "--log-data",
        ]));
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.log_file, Some(PathBuf::from("run.log")));
        assert!(config.log_data);
    }

    #[test]
    fn test_color_always_enables_ansi() {
        let cli = Cli::try_parse_from(["notes-extract", "out.csv", "--color", "always"]).unwrap();
        assert!(log_config_from_cli(&cli).with_ansi);
    }

    #[test]
    fn test_output_is_required() {
        assert!(Cli::try_parse_from(["notes-extract"]).is_err());
    }
}
