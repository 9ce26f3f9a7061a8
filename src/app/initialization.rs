//! Application initialization and configuration

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::str::FromStr;
use log::{debug, info, warn, LevelFilter};
use crate::{cli, config, logging, plugin};

pub fn load_configuration(args: &cli::Args) -> Result<config::ConfigManager> {
    let mut manager = if let Some(config_file) = &args.config_file {
        debug!("Loading configuration from explicit file: {}", config_file.display());
        config::ConfigManager::load_from_file(config_file.clone())?
    } else {
        config::ConfigManager::load()?
    };

    if let Some(section_name) = &args.config_name {
        manager.select_section(section_name.clone());
    }

    Ok(manager)
}

/// Logging setup; command line flags win over the configuration file
pub fn configure_logging(args: &cli::Args, config: &config::ConfigManager) -> Result<logging::LogConfig> {
    let console_level = if args.debug {
        LevelFilter::Trace
    } else if args.verbose {
        LevelFilter::Debug
    } else if args.quiet {
        LevelFilter::Error
    } else {
        config
            .get_log_level("base", "console-level")
            .context("Invalid console-level in configuration")?
            .unwrap_or(LevelFilter::Info)
    };

    let format = match args.log_format.as_deref().or_else(|| config.get_value("base", "log-format").map(String::as_str)) {
        Some(format) => logging::LogFormat::from_str(format).map_err(|e| anyhow::anyhow!(e))?,
        None => logging::LogFormat::Text,
    };

    let log_file_path = args.log_file.clone().or_else(|| config.get_path("base", "log-file"));

    let file_log_level = match &args.log_file_level {
        Some(level) => Some(logging::parse_log_level(level)?),
        None => config
            .get_log_level("base", "file-log-level")
            .context("Invalid file-log-level in configuration")?,
    };

    let (destination, file_level) = match (log_file_path, file_log_level) {
        (Some(path), level) => (logging::LogDestination::Both(path), Some(level.unwrap_or(console_level))),
        (None, Some(_)) => return Err(anyhow::anyhow!("Log file level specified without log file")),
        (None, None) => (logging::LogDestination::Console, None),
    };

    let color = !args.no_color && config.get_bool("base", "color")?.unwrap_or(true);

    Ok(logging::LogConfig {
        console_level,
        file_level,
        format,
        destination,
        color,
    })
}

/// `--options-dir`, then `[plugins] options-dir`, then the working directory
pub fn resolve_options_dir(args: &cli::Args, config: &config::ConfigManager) -> Result<PathBuf> {
    if let Some(dir) = args.options_dir.clone().or_else(|| config.options_directory()) {
        return Ok(dir);
    }
    std::env::current_dir().context("Failed to get current directory")
}

/// Register every enabled built-in plugin and bootstrap its options
pub fn initialize_builtin_plugins(
    config: &config::ConfigManager,
    options_dir: &std::path::Path,
) -> Result<plugin::PluginRegistry> {
    let mut registry = plugin::PluginRegistry::new();

    for name in plugin::builtin::get_builtin_plugins() {
        if !config.plugin_enabled(name)? {
            info!("Plugin {} disabled by configuration", name);
            continue;
        }
        let Some(instance) = plugin::builtin::create_builtin_plugin(name) else {
            warn!("Built-in plugin {} could not be created", name);
            continue;
        };
        instance
            .initialize(options_dir)
            .with_context(|| format!("Failed to initialize plugin {}", name))?;
        registry
            .register_plugin(instance)
            .with_context(|| format!("Failed to register plugin {}", name))?;
    }

    debug!("{} plugin(s) registered", registry.plugin_count());
    Ok(registry)
}
