// Logging for the aasx-plugins host
//
// Text or JSON lines, to the console (stderr), a file, or both, each with its
// own level. Console levels may be coloured. Timestamps are local time as
// YYYY-MM-DD HH:MM:SS. JSON lines carry the log target in `detail`.
//
// Example usage:
// ```
// let config = LogConfig {
//     console_level: LevelFilter::Info,
//     file_level: Some(LevelFilter::Debug),
//     format: LogFormat::Json,
//     destination: LogDestination::Both(PathBuf::from("plugins.log")),
//     color: false,
// };
// init_logger(config)?;
// log::info!("Host started");
// ```

use log::{Level, LevelFilter};
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Local};
use colored::Colorize;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogFormat {
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: {}. Valid options: text, json", s)),
        }
    }
}

/// Log destination options
#[derive(Debug, Clone, PartialEq)]
pub enum LogDestination {
    Console,
    File(PathBuf),
    Both(PathBuf),
}

impl LogDestination {
    fn file_path(&self) -> Option<&Path> {
        match self {
            LogDestination::Console => None,
            LogDestination::File(path) | LogDestination::Both(path) => Some(path),
        }
    }

    fn has_console(&self) -> bool {
        !matches!(self, LogDestination::File(_))
    }
}

/// JSON log line
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonLogEntry {
    pub timestamp: String,
    pub level: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub console_level: LevelFilter,
    pub file_level: Option<LevelFilter>,
    pub format: LogFormat,
    pub destination: LogDestination,
    /// Colour level names on the console (text format only)
    pub color: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            console_level: LevelFilter::Info,
            file_level: None,
            format: LogFormat::Text,
            destination: LogDestination::Console,
            color: false,
        }
    }
}

impl LogConfig {
    /// Most verbose level any destination wants
    pub fn max_level(&self) -> LevelFilter {
        let console = if self.destination.has_console() { self.console_level } else { LevelFilter::Off };
        match self.file_level {
            Some(file_level) if self.destination.file_path().is_some() => console.max(file_level),
            _ => console,
        }
    }
}

pub struct AasxLogger {
    config: LogConfig,
    file: Option<Mutex<File>>,
}

impl AasxLogger {
    /// Create the logger, opening the log file for appending if one is configured
    pub fn new(config: LogConfig) -> Result<Self> {
        let file = match config.destination.file_path() {
            Some(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("Failed to open log file: {}", path.display()))?;
                Some(Mutex::new(file))
            }
            None => None,
        };
        Ok(Self { config, file })
    }

    fn format_timestamp() -> String {
        let now: DateTime<Local> = Local::now();
        now.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    fn level_label(level: Level, color: bool) -> String {
        let label = level.to_string().to_uppercase();
        if !color {
            return label;
        }
        match level {
            Level::Error => label.red().bold().to_string(),
            Level::Warn => label.yellow().to_string(),
            Level::Info => label.green().to_string(),
            Level::Debug => label.blue().to_string(),
            Level::Trace => label.dimmed().to_string(),
        }
    }

    fn format_text_message(&self, level: Level, message: &str, color: bool) -> String {
        format!("{} [{}] {}", Self::format_timestamp(), Self::level_label(level, color), message)
    }

    fn format_json_message(&self, level: Level, target: &str, message: &str) -> Result<String> {
        let entry = JsonLogEntry {
            timestamp: Self::format_timestamp(),
            level: level.to_string().to_uppercase(),
            message: message.to_string(),
            detail: Some(serde_json::json!({ "target": target })),
        };
        serde_json::to_string(&entry).context("Failed to serialize log entry to JSON")
    }

    fn format_line(&self, record: &log::Record, color: bool) -> String {
        let message = record.args().to_string();
        match self.config.format {
            LogFormat::Text => self.format_text_message(record.level(), &message, color),
            LogFormat::Json => self
                .format_json_message(record.level(), record.target(), &message)
                .unwrap_or_else(|e| {
                    eprintln!("JSON formatting error: {}. Falling back to text format.", e);
                    self.format_text_message(record.level(), &message, false)
                }),
        }
    }

    fn should_log_to_console(&self, level: Level) -> bool {
        self.config.destination.has_console() && level <= self.config.console_level
    }

    fn should_log_to_file(&self, level: Level) -> bool {
        self.file.is_some() && self.config.file_level.is_some_and(|file_level| level <= file_level)
    }

    fn write_to_file(&self, line: &str) -> Result<()> {
        if let Some(file) = &self.file {
            writeln!(file.lock(), "{}", line).context("Failed to write to log file")?;
        }
        Ok(())
    }
}

impl log::Log for AasxLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.should_log_to_console(metadata.level()) || self.should_log_to_file(metadata.level())
    }

    fn log(&self, record: &log::Record) {
        let level = record.level();

        if self.should_log_to_console(level) {
            let line = self.format_line(record, self.config.color);
            if let Err(e) = writeln!(io::stderr(), "{}", line) {
                eprintln!("Console logging error: {}", e);
            }
        }

        if self.should_log_to_file(level) {
            let line = self.format_line(record, false);
            if let Err(e) = self.write_to_file(&line) {
                eprintln!("File logging error: {}", e);
            }
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
        if let Some(file) = &self.file {
            let _ = file.lock().flush();
        }
    }
}

/// Install the logger as the global `log` backend
pub fn init_logger(config: LogConfig) -> Result<()> {
    let max_level = config.max_level();
    let logger = AasxLogger::new(config)?;

    log::set_boxed_logger(Box::new(logger)).context("Failed to set global logger")?;
    log::set_max_level(max_level);

    Ok(())
}

/// Convert string to LevelFilter
pub fn parse_log_level(level_str: &str) -> Result<LevelFilter> {
    match level_str.trim().to_lowercase().as_str() {
        "error" => Ok(LevelFilter::Error),
        "warn" | "warning" => Ok(LevelFilter::Warn),
        "info" => Ok(LevelFilter::Info),
        "debug" => Ok(LevelFilter::Debug),
        "trace" => Ok(LevelFilter::Trace),
        "off" => Ok(LevelFilter::Off),
        _ => Err(anyhow::anyhow!(
            "Invalid log level: {}. Valid levels: error, warn, info, debug, trace, off",
            level_str
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error").unwrap(), LevelFilter::Error);
        assert_eq!(parse_log_level("Warning").unwrap(), LevelFilter::Warn);
        assert_eq!(parse_log_level(" debug ").unwrap(), LevelFilter::Debug);
        assert_eq!(parse_log_level("off").unwrap(), LevelFilter::Off);
        assert!(parse_log_level("loud").is_err());
    }

    #[test]
    fn test_timestamp_format() {
        let timestamp = AasxLogger::format_timestamp();
        assert_eq!(timestamp.len(), 19);
        assert_eq!(timestamp.chars().nth(4), Some('-'));
        assert_eq!(timestamp.chars().nth(10), Some(' '));
        assert_eq!(timestamp.chars().nth(16), Some(':'));
    }

    #[test]
    fn test_text_message_without_color() {
        let logger = AasxLogger::new(LogConfig::default()).unwrap();
        let formatted = logger.format_text_message(Level::Warn, "options file skipped", false);
        assert!(formatted.ends_with("[WARN] options file skipped"));
    }

    #[test]
    fn test_json_message_carries_target() {
        let logger = AasxLogger::new(LogConfig::default()).unwrap();
        let formatted = logger
            .format_json_message(Level::Info, "aasx_plugins::options::loader", "loaded")
            .unwrap();
        let entry: JsonLogEntry = serde_json::from_str(&formatted).unwrap();
        assert_eq!(entry.level, "INFO");
        assert_eq!(entry.message, "loaded");
        assert_eq!(entry.detail.unwrap()["target"], "aasx_plugins::options::loader");
    }

    #[test]
    fn test_max_level() {
        let config = LogConfig {
            console_level: LevelFilter::Warn,
            file_level: Some(LevelFilter::Debug),
            destination: LogDestination::Both(PathBuf::from("unused.log")),
            ..LogConfig::default()
        };
        assert_eq!(config.max_level(), LevelFilter::Debug);

        let console_only = LogConfig { file_level: Some(LevelFilter::Trace), ..LogConfig::default() };
        assert_eq!(console_only.max_level(), LevelFilter::Info);
    }

    #[test]
    fn test_init_logger_installs_global_backend() {
        let config = LogConfig { console_level: LevelFilter::Error, ..LogConfig::default() };
        init_logger(config.clone()).unwrap();
        assert_eq!(log::max_level(), LevelFilter::Error);
        assert!(init_logger(config).is_err());
    }

    #[test]
    fn test_file_destination_writes_lines() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("host.log");
        let config = LogConfig {
            file_level: Some(LevelFilter::Debug),
            destination: LogDestination::File(path.clone()),
            ..LogConfig::default()
        };
        let logger = AasxLogger::new(config).unwrap();
        assert!(!logger.should_log_to_console(Level::Error));
        assert!(logger.should_log_to_file(Level::Debug));
        assert!(!logger.should_log_to_file(Level::Trace));

        logger.write_to_file("first line").unwrap();
        log::Log::flush(&logger);
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "first line\n");
    }
}
