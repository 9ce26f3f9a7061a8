use anyhow::Result;
use std::io;
use std::process;
use log::{debug, error};
use aasx_plugins::{app, cli, logging};

fn main() {
    if let Err(e) = run() {
        error!("Application error: {:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = cli::parse_args();

    cli::validate_args(&args)?;

    let config_manager = app::load_configuration(&args)?;

    let log_config = app::configure_logging(&args, &config_manager)?;
    if !log_config.color {
        colored::control::set_override(false);
    }
    logging::init_logger(log_config)?;

    let options_dir = app::resolve_options_dir(&args, &config_manager)?;
    debug!("Options directory: {}", options_dir.display());

    let registry = app::initialize_builtin_plugins(&config_manager, &options_dir)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    app::execute(&args.command, &registry, &mut out)
}
