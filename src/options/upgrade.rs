//! Upgrade mappings and the substitution engine
//!
//! Options documents written against an older schema are recognised by a
//! trigger substring anywhere in the raw text. The first mapping whose
//! trigger is present is selected; its literal replacements are applied in
//! declaration order, then its regex replacements in declaration order, and
//! the result is deserialized into the mapping's legacy root type and
//! converted into the current schema.
//!
//! Replacements are not canonicalised: when one replacement produces text
//! another one matches, the outcome depends on declaration order, and that
//! order is part of the mapping's contract.

use log::debug;
use regex::Regex;
use serde::de::DeserializeOwned;
use std::fmt;
use super::error::{OptionsError, OptionsResult};
use super::record::PluginOptions;

type UpgradeFn<T> = Box<dyn Fn(&str) -> OptionsResult<T> + Send + Sync>;

/// Declarative conversion of one legacy schema into the current one
pub struct UpgradeMapping<T> {
    info: String,
    trigger: String,
    old_root_type: &'static str,
    replacements: Vec<(String, String)>,
    regex_replacements: Vec<(Regex, String)>,
    upgrade: UpgradeFn<T>,
}

impl<T: 'static> UpgradeMapping<T> {
    /// Create a mapping from legacy root type `Old`.
    ///
    /// `convert` returns `None` when the legacy document cannot be expressed
    /// in the current schema.
    pub fn new<Old, F>(info: impl Into<String>, trigger: impl Into<String>, convert: F) -> Self
    where
        Old: DeserializeOwned + 'static,
        F: Fn(Old) -> Option<T> + Send + Sync + 'static,
    {
        let info = info.into();
        let old_root_type = short_type_name::<Old>();
        let mapping_name = info.clone();

        let upgrade = Box::new(move |text: &str| -> OptionsResult<T> {
            let old: Old = serde_json::from_str(text)
                .map_err(|e| OptionsError::parse(old_root_type, e.to_string()))?;
            convert(old).ok_or_else(|| {
                OptionsError::upgrade(mapping_name.as_str(), "conversion produced no options")
            })
        });

        Self {
            info,
            trigger: trigger.into(),
            old_root_type,
            replacements: Vec::new(),
            regex_replacements: Vec::new(),
            upgrade,
        }
    }

    /// Add a plain substring replacement
    pub fn with_replacement(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.replacements.push((from.into(), to.into()));
        self
    }

    /// Add a regex replacement; `replacement` uses `$1`/`${name}` expansion
    /// and `$$` for a literal dollar sign
    pub fn with_regex_replacement(
        mut self,
        pattern: &str,
        replacement: impl Into<String>,
    ) -> OptionsResult<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| OptionsError::invalid_pattern(pattern, e.to_string()))?;
        self.regex_replacements.push((regex, replacement.into()));
        Ok(self)
    }

    pub fn info(&self) -> &str {
        &self.info
    }

    pub fn trigger(&self) -> &str {
        &self.trigger
    }

    pub fn old_root_type(&self) -> &'static str {
        self.old_root_type
    }

    /// An empty trigger never fires
    pub fn is_triggered_by(&self, text: &str) -> bool {
        !self.trigger.is_empty() && text.contains(self.trigger.as_str())
    }

    /// Apply literal, then regex replacements, each in declaration order
    pub fn apply_substitutions(&self, text: &str) -> String {
        let mut result = text.to_string();
        for (from, to) in &self.replacements {
            if !from.is_empty() {
                result = result.replace(from.as_str(), to);
            }
        }
        for (regex, to) in &self.regex_replacements {
            result = regex.replace_all(&result, to.as_str()).into_owned();
        }
        result
    }

    /// Substitute, deserialize into the legacy root and convert
    pub fn upgrade(&self, text: &str) -> OptionsResult<T> {
        let transformed = self.apply_substitutions(text);
        debug!(
            "Upgrading options via '{}' ({} -> current schema)",
            self.info, self.old_root_type
        );
        (self.upgrade)(&transformed)
    }
}

impl<T> fmt::Debug for UpgradeMapping<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpgradeMapping")
            .field("info", &self.info)
            .field("trigger", &self.trigger)
            .field("old_root_type", &self.old_root_type)
            .field("replacements", &self.replacements.len())
            .field("regex_replacements", &self.regex_replacements.len())
            .finish()
    }
}

/// First mapping, in list order, whose trigger occurs in `text`
pub fn select_mapping<'a, T: 'static>(
    text: &str,
    mappings: &'a [UpgradeMapping<T>],
) -> Option<&'a UpgradeMapping<T>> {
    mappings.iter().find(|m| m.is_triggered_by(text))
}

/// Turn raw options text into the current schema, upgrading if a legacy
/// trigger is found
pub fn upgrade_text<T: PluginOptions>(text: &str, mappings: &[UpgradeMapping<T>]) -> OptionsResult<T> {
    if text.trim().is_empty() {
        return Err(OptionsError::EmptyDocument);
    }

    match select_mapping(text, mappings) {
        Some(mapping) => mapping.upgrade(text),
        None => serde_json::from_str(text)
            .map_err(|e| OptionsError::parse(T::schema_name(), e.to_string())),
    }
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Old {
        name: String,
    }

    fn mapping(trigger: &str) -> UpgradeMapping<String> {
        UpgradeMapping::new::<Old, _>("test", trigger, |old| Some(old.name))
    }

    #[test]
    fn test_literal_replacements_apply_in_declaration_order() {
        let m = mapping("x")
            .with_replacement("alpha", "beta")
            .with_replacement("beta", "gamma");
        assert_eq!(m.apply_substitutions("alpha"), "gamma");

        let reversed = mapping("x")
            .with_replacement("beta", "gamma")
            .with_replacement("alpha", "beta");
        assert_eq!(reversed.apply_substitutions("alpha"), "beta");
    }

    #[test]
    fn test_regex_runs_after_literals() {
        let m = mapping("x")
            .with_regex_replacement(r"Form(\w+)", "Form${1}V20")
            .unwrap()
            .with_replacement("Prop", "Property");
        assert_eq!(m.apply_substitutions("FormProp"), "FormPropertyV20");
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let result = mapping("x").with_regex_replacement("(unclosed", "y");
        assert!(matches!(result, Err(OptionsError::InvalidPattern { .. })));
    }

    #[test]
    fn test_first_triggered_mapping_wins() {
        let mappings = vec![mapping("V10"), mapping("V20"), mapping("V10")];
        let selected = select_mapping("doc V20 and V10", &mappings).unwrap();
        assert!(std::ptr::eq(selected, &mappings[0]));

        let selected = select_mapping("doc V20 only", &mappings).unwrap();
        assert!(std::ptr::eq(selected, &mappings[1]));

        assert!(select_mapping("nothing here", &mappings).is_none());
    }

    #[test]
    fn test_empty_trigger_never_fires() {
        assert!(!mapping("").is_triggered_by("anything"));
    }

    #[test]
    fn test_upgrade_reports_failures() {
        let m = mapping("legacy");
        assert_eq!(m.upgrade(r#"{"name":"legacy"}"#).unwrap(), "legacy");
        assert!(matches!(m.upgrade("{}"), Err(OptionsError::Parse { .. })));

        let refusing = UpgradeMapping::new::<Old, _>("refusing", "legacy", |_| None::<String>);
        assert!(matches!(
            refusing.upgrade(r#"{"name":"legacy"}"#),
            Err(OptionsError::Upgrade { .. })
        ));
    }

    #[test]
    fn test_old_root_type_is_short_name() {
        assert_eq!(mapping("x").old_root_type(), "Old");
    }
}
