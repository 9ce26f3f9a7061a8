//! Command execution against the plugin registry

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use colored::Colorize;
use log::{debug, info};
use serde_json::Value;
use crate::aas::{Key, KeyType, Reference};
use crate::cli::{self, Command, OutputFormat};
use crate::definitions::nameplate::{self, NameplateDefinitions};
use crate::options::embedded_library;
use crate::plugin::{self, ActionResult, PluginError, PluginRegistry};

/// Run one subcommand, writing its output to `out`
pub fn execute<W: Write>(command: &Command, registry: &PluginRegistry, out: &mut W) -> Result<()> {
    debug!("Executing {:?}", command);
    match command {
        Command::Plugins => list_plugins(registry, out),
        Command::Options { plugin, format } => show_options(registry, plugin, *format, out),
        Command::Invoke { plugin, action, args } => invoke(registry, plugin, action, args, out),
        Command::Find { plugin, semantic_id, key_type } => {
            find(registry, plugin, semantic_id, key_type.unwrap_or(KeyType::GlobalReference), out)
        }
        Command::Upgrade { plugin, file, output } => upgrade(plugin, file, output.as_deref(), out),
        Command::Library { resource } => list_library(resource, out),
    }
}

fn list_plugins<W: Write>(registry: &PluginRegistry, out: &mut W) -> Result<()> {
    let names = registry.list_plugins();
    if names.is_empty() {
        writeln!(out, "No plugins available.")?;
        return Ok(());
    }

    for name in names {
        let Some(plugin) = registry.get_plugin(&name) else { continue };
        let info = plugin.plugin_info();
        writeln!(out, "{} {} (API {})", info.name.as_str().bold(), info.version, info.api_version)?;
        writeln!(out, "  {}", info.description)?;
        for action in plugin.list_actions() {
            writeln!(out, "    {:<32} {}", action.name, action.info)?;
        }
    }
    Ok(())
}

/// Active options of `plugin`, as JSON text
fn options_json(registry: &PluginRegistry, plugin: &str) -> Result<Value> {
    let result = registry
        .invoke(plugin, "get-json-options", Vec::new())?
        .with_context(|| format!("Plugin '{}' does not expose its options", plugin))?;
    match result.payload() {
        Some(Value::String(text)) => serde_json::from_str(text).context("Plugin returned malformed options JSON"),
        Some(other) => Ok(other.clone()),
        None => Err(anyhow::anyhow!("Plugin '{}' returned no options payload", plugin)),
    }
}

fn show_options<W: Write>(registry: &PluginRegistry, plugin: &str, format: OutputFormat, out: &mut W) -> Result<()> {
    let options = options_json(registry, plugin)?;
    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&options)?)?,
        OutputFormat::Yaml => write!(out, "{}", serde_yaml::to_string(&options)?)?,
        OutputFormat::Text => {
            let instance = registry.get_plugin(plugin).ok_or_else(|| PluginError::plugin_not_found(plugin))?;
            let records = instance.option_records();
            writeln!(out, "{} record(s)", records.len())?;
            for record in &records {
                let semantic_id = record.semantic_id.as_ref().map(|key| key.value.as_str()).unwrap_or("-");
                writeln!(out, "  {:<16} {:<32} {}", record.tag, record.title, semantic_id)?;
            }
        }
    }
    Ok(())
}

fn write_result<W: Write>(result: Option<ActionResult>, out: &mut W) -> Result<()> {
    match result {
        Some(result) => writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?,
        None => writeln!(out, "null")?,
    }
    Ok(())
}

fn invoke<W: Write>(registry: &PluginRegistry, plugin: &str, action: &str, args: &[String], out: &mut W) -> Result<()> {
    let args = args.iter().map(|a| cli::parse_invocation_arg(a)).collect();
    let result = registry.invoke(plugin, action, args)?;
    write_result(result, out)
}

fn find<W: Write>(
    registry: &PluginRegistry,
    plugin: &str,
    semantic_id: &str,
    key_type: KeyType,
    out: &mut W,
) -> Result<()> {
    let reference = Reference::from_key(Key::new(key_type, semantic_id));
    let result = registry.invoke(plugin, "find-form-desc", vec![serde_json::to_value(&reference)?])?;
    if result.is_none() {
        info!("No record of '{}' matches {}", plugin, reference);
    }
    write_result(result, out)
}

/// Feed `file` through a fresh instance of the plugin so only the built-in
/// options and the file itself are involved
fn upgrade<W: Write>(plugin: &str, file: &Path, output: Option<&Path>, out: &mut W) -> Result<()> {
    let instance = plugin::builtin::create_builtin_plugin(plugin)
        .with_context(|| format!("Plugin '{}' is not a built-in plugin", plugin))?;
    let text = fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;

    let mut registry = PluginRegistry::new();
    registry.register_plugin(instance)?;
    registry
        .invoke(plugin, "set-json-options", vec![Value::String(text)])?
        .with_context(|| format!("Failed to upgrade {}", file.display()))?;

    let upgraded = serde_json::to_string_pretty(&options_json(&registry, plugin)?)?;
    match output {
        Some(path) => {
            fs::write(path, upgraded).with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Upgraded options written to {}", path.display());
        }
        None => writeln!(out, "{}", upgraded)?,
    }
    Ok(())
}

fn list_library<W: Write>(resource: &str, out: &mut W) -> Result<()> {
    let library = embedded_library(resource)?;
    writeln!(out, "version: {}", library.version().unwrap_or("-"))?;
    for entry in library.entries() {
        writeln!(out, "  {}", entry.name)?;
    }

    if resource == nameplate::LIBRARY_NAME {
        let definitions = NameplateDefinitions::from_library(&library);
        writeln!(
            out,
            "{} of {} nameplate concept description(s) resolved",
            definitions.concept_descriptions().len(),
            NameplateDefinitions::field_names().filter(|n| n.starts_with("CD_")).count()
        )?;
    }
    Ok(())
}
