// Sat Oct 17 2026 - Alex

use colored::*;
use log::{Level, LevelFilter};
use std::io::Write;

pub struct LoggingUtils;

impl LoggingUtils {
    /// Installs an `env_logger` backend writing to stderr. `RUST_LOG`
    /// still wins for module-level filters.
    pub fn init_logger(level: LevelFilter, use_color: bool) {
        let mut builder = env_logger::Builder::new();
        builder
            .filter_level(level)
            .format_timestamp(None)
            .parse_env("RUST_LOG")
            .format(move |buf, record| {
                let label = if use_color {
                    Self::format_level(record.level()).to_string()
                } else {
                    format!("{:5}", record.level())
                };
                writeln!(buf, "{} {}", label, record.args())
            });
        // A second init (tests, embedding) keeps the first logger.
        builder.try_init().ok();
    }

    pub fn format_level(level: Level) -> ColoredString {
        match level {
            Level::Error => "ERROR".red().bold(),
            Level::Warn => "WARN ".yellow().bold(),
            Level::Info => "INFO ".green().bold(),
            Level::Debug => "DEBUG".blue().bold(),
            Level::Trace => "TRACE".magenta().bold(),
        }
    }

    pub fn level_from_str(s: &str) -> LevelFilter {
        match s.to_lowercase().as_str() {
            "error" => LevelFilter::Error,
            "warn" | "warning" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            "off" => LevelFilter::Off,
            _ => LevelFilter::Info,
        }
    }

    /// Level for a `-v` count; `None` when no `-v` was given.
    pub fn level_from_verbosity(verbose: u8) -> Option<LevelFilter> {
        match verbose {
            0 => None,
            1 => Some(LevelFilter::Debug),
            _ => Some(LevelFilter::Trace),
        }
    }

    /// `-v` beats `--log-level`; `--quiet` caps either at errors.
    pub fn effective_level(requested: &str, verbose: u8, quiet: bool) -> LevelFilter {
        let level = Self::level_from_verbosity(verbose)
            .unwrap_or_else(|| Self::level_from_str(requested));
        if quiet {
            level.min(LevelFilter::Error)
        } else {
            level
        }
    }
}
