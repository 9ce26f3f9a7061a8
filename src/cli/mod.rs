//! CLI module containing argument parsing

pub mod args;

pub use args::{parse_args, parse_invocation_arg, validate_args, Args, Command, OutputFormat};
