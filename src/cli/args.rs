use clap::{Parser, Subcommand, ValueEnum};
use anyhow::Result;
use std::path::PathBuf;
use log::debug;
use serde_json::Value;

use crate::aas::KeyType;

/// AASX plugin host
#[derive(Parser, Debug)]
#[command(name = "aasx-plugins")]
#[command(about = "Loads AASX explorer plugins, bootstraps their options and invokes their actions")]
#[command(version)]
pub struct Args {
    /// Verbose output (debug level logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output (error level logging only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Debug output (trace level logging)
    #[arg(long, global = true)]
    pub debug: bool,

    /// Log format: text or json
    #[arg(long, value_name = "FORMAT", global = true)]
    pub log_format: Option<String>,

    /// Log file path for file output
    #[arg(long, value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Log level for file output (independent of console level)
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_file_level: Option<String>,

    /// Configuration file path
    #[arg(long, value_name = "FILE", global = true)]
    pub config_file: Option<PathBuf>,

    /// Configuration section name
    #[arg(long, value_name = "SECTION", global = true)]
    pub config_name: Option<String>,

    /// Directory holding plugin options files
    #[arg(long, value_name = "DIR", global = true)]
    pub options_dir: Option<PathBuf>,

    /// Disable coloured log levels
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List registered plugins and their actions
    Plugins,

    /// Show a plugin's active options after bootstrap
    Options {
        plugin: String,
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
    },

    /// Invoke a plugin action; each ARG is JSON, or taken as a string
    Invoke {
        plugin: String,
        action: String,
        #[arg(value_name = "ARG")]
        args: Vec<String>,
    },

    /// Find the record whose semantic id matches
    Find {
        plugin: String,
        semantic_id: String,
        /// Key type of the query key (defaults to GlobalReference)
        #[arg(long, value_name = "TYPE")]
        key_type: Option<KeyType>,
    },

    /// Upgrade an options file to the current schema
    Upgrade {
        plugin: String,
        file: PathBuf,
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// List the entries of an embedded library resource
    Library { resource: String },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Text,
}

/// Parse command line arguments
pub fn parse_args() -> Args {
    let args = Args::parse();
    debug!("Parsed CLI arguments: {:?}", args);
    args
}

/// Validate CLI argument combinations
pub fn validate_args(args: &Args) -> Result<()> {
    let log_flags_count = [args.verbose, args.quiet, args.debug]
        .iter()
        .filter(|&&flag| flag)
        .count();

    if log_flags_count > 1 {
        return Err(anyhow::anyhow!(
            "Conflicting log level flags: only one of --verbose, --quiet, or --debug may be specified"
        ));
    }

    if let Some(format) = &args.log_format {
        match format.to_lowercase().as_str() {
            "text" | "json" => {}
            _ => return Err(anyhow::anyhow!("Invalid log format '{}'. Valid options: text, json", format)),
        }
    }

    if let Some(level) = &args.log_file_level {
        crate::logging::parse_log_level(level)?;
    }

    if args.log_file_level.is_some() && args.log_file.is_none() {
        return Err(anyhow::anyhow!("--log-file-level requires --log-file to be specified"));
    }

    Ok(())
}

/// Action argument from the command line: JSON when it parses, a string otherwise
pub fn parse_invocation_arg(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
