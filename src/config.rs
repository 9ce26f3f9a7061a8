use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use toml::Value;
use log::{debug, info};

/// Configuration storage - section_name -> key -> value
pub type Configuration = HashMap<String, HashMap<String, String>>;

pub const CONFIG_ENV_VAR: &str = "AASX_PLUGINS_CONFIG";

const BASE_SECTION: &str = "base";
const PLUGINS_SECTION: &str = "plugins";

/// Host configuration read from TOML
pub struct ConfigManager {
    config: Configuration,
    config_file_path: Option<PathBuf>,
    selected_section: Option<String>,
}

impl ConfigManager {
    pub fn from_config(config: Configuration) -> Self {
        Self {
            config,
            config_file_path: None,
            selected_section: None,
        }
    }

    /// Load the first configuration file found by discovery, or an empty
    /// configuration when there is none
    pub fn load() -> Result<Self> {
        debug!("Starting configuration discovery");

        for path in discover_config_files() {
            debug!("Attempting to load config from: {}", path.display());
            if path.exists() {
                return Self::load_from_file(path);
            }
        }

        info!("No configuration file found, using empty configuration");
        Ok(Self::from_config(Configuration::new()))
    }

    pub fn load_from_file(path: PathBuf) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = parse_toml_config(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        info!("Loaded configuration from: {}", path.display());
        Ok(Self {
            config,
            config_file_path: Some(path),
            selected_section: None,
        })
    }

    pub fn config_file_path(&self) -> Option<&Path> {
        self.config_file_path.as_deref()
    }

    /// Get value with fallback: selected section -> `section` -> base
    pub fn get_value(&self, section: &str, key: &str) -> Option<&String> {
        if let Some(selected) = &self.selected_section {
            if let Some(value) = self.config.get(selected).and_then(|s| s.get(key)) {
                return Some(value);
            }
        }

        if let Some(value) = self.config.get(section).and_then(|s| s.get(key)) {
            return Some(value);
        }

        self.config.get(BASE_SECTION).and_then(|s| s.get(key))
    }

    /// Select configuration section for --config-name
    pub fn select_section(&mut self, section: String) {
        debug!("Selecting configuration section: {}", section);
        self.selected_section = Some(section);
    }

    pub fn get_bool(&self, section: &str, key: &str) -> Result<Option<bool>> {
        match self.get_value(section, key) {
            Some(value) => match value.to_lowercase().as_str() {
                "true" => Ok(Some(true)),
                "false" => Ok(Some(false)),
                _ => Err(anyhow::anyhow!("Invalid boolean value for {}.{}: {}", section, key, value)),
            },
            None => Ok(None),
        }
    }

    pub fn get_log_level(&self, section: &str, key: &str) -> Result<Option<log::LevelFilter>> {
        match self.get_value(section, key) {
            Some(value) => Ok(Some(crate::logging::parse_log_level(value)?)),
            None => Ok(None),
        }
    }

    pub fn get_path(&self, section: &str, key: &str) -> Option<PathBuf> {
        self.get_value(section, key).map(PathBuf::from)
    }

    /// Directory holding `<plugin>.options.json` files
    pub fn options_directory(&self) -> Option<PathBuf> {
        self.get_path(PLUGINS_SECTION, "options-dir")
    }

    /// `[plugins.<name>] enabled`, true unless set otherwise
    pub fn plugin_enabled(&self, plugin_name: &str) -> Result<bool> {
        let section = format!("{}.{}", PLUGINS_SECTION, plugin_name);
        let enabled = self
            .config
            .get(&section)
            .and_then(|s| s.get("enabled"))
            .map(|value| match value.to_lowercase().as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(anyhow::anyhow!("Invalid boolean value for {}.enabled: {}", section, value)),
            })
            .transpose()?;
        Ok(enabled.unwrap_or(true))
    }
}

/// Configuration file candidates in order of precedence
fn discover_config_files() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        paths.push(PathBuf::from(env_path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("aasx-plugins").join("config.toml"));
    }

    if let Some(home_dir) = dirs::home_dir() {
        paths.push(home_dir.join(".aasx-plugins.toml"));
    }

    paths.push(PathBuf::from("./.aasx-plugins.toml"));

    debug!("Config discovery paths: {:?}", paths);
    paths
}

/// Parse TOML into `section -> key -> value`. Nested tables become dotted
/// section names; top-level keys belong to `base`.
fn parse_toml_config(content: &str) -> Result<Configuration> {
    let table: toml::Table = toml::from_str(content).context("Failed to parse TOML content")?;

    let mut config = Configuration::new();
    flatten_toml_table(&table, BASE_SECTION, &mut config);

    debug!("Parsed configuration: {:?}", config);
    Ok(config)
}

fn flatten_toml_table(table: &toml::Table, section: &str, config: &mut Configuration) {
    for (key, value) in table {
        match value {
            Value::Table(subtable) => {
                let name = if section == BASE_SECTION {
                    key.clone()
                } else {
                    format!("{}.{}", section, key)
                };
                config.entry(name.clone()).or_default();
                flatten_toml_table(subtable, &name, config);
            }
            _ => {
                config
                    .entry(section.to_string())
                    .or_default()
                    .insert(key.clone(), toml_value_to_string(value));
            }
        }
    }
}

fn toml_value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Datetime(d) => d.to_string(),
        Value::Array(_) | Value::Table(_) => value.to_string(),
    }
}
