//! Integration tests for the options bootstrap of the generic forms plugin
//!
//! Option files are written to a temporary directory and picked up through
//! `Plugin::initialize`, the way the host does at startup.

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use aasx_plugins::aas::{Key, KeyType, MatchMode, Reference};
use aasx_plugins::options::{find_by_semantic_id, OptionsLoader};
use aasx_plugins::plugin::builtin::generic_forms::{legacy, GenericFormOptions, PLUGIN_NAME};
use aasx_plugins::plugin::builtin::GenericFormsPlugin;
use aasx_plugins::plugin::{ActionResult, Plugin, PluginAction};

const V20_OPTIONS: &str = r#"{
    "$type": "AdminShellNS.AdminShellV20+GenericFormOptions",
    "Records": [{
        "FormTag": "NP",
        "FormTitle": "Nameplate (V2.0)",
        "FormSubmodel": {
            "PresetIdShort": "Nameplate",
            "KeySemanticId": {"type": "Submodel", "local": false,
                "value": "https://admin-shell.io/zvei/nameplate/1/0/Nameplate", "idType": "IRI"},
            "SubmodelElements": [
                {"$type": "FormProperty", "PresetIdShort": "ManufacturerName", "Multiplicity": "One"},
                {"$type": "FormMultiLangProp", "PresetIdShort": "ManufacturerProductDesignation", "Multiplicity": "ZeroToOne"}
            ]
        }
    }]
}"#;

fn write(dir: &Path, name: &str, text: &str) {
    fs::write(dir.join(name), text).unwrap();
}

fn record(tag: &str, title: &str) -> String {
    format!(r#"{{"Records":[{{"FormTag":"{}","FormTitle":"{}"}}]}}"#, tag, title)
}

fn initialized(dir: &Path) -> GenericFormsPlugin {
    let plugin = GenericFormsPlugin::new();
    plugin.initialize(dir).unwrap();
    plugin
}

fn tags(plugin: &GenericFormsPlugin) -> Vec<String> {
    plugin.options().records.iter().map(|r| r.form_tag.clone()).collect()
}

#[test]
fn test_empty_directory_keeps_builtin_form() {
    let temp = TempDir::new().unwrap();
    let plugin = initialized(temp.path());
    assert_eq!(tags(&plugin), vec!["SMP"]);

    let result = plugin.activate_action(PluginAction::GetListNewSubmodel);
    assert_eq!(result, Some(ActionResult::StringList(vec!["Sample Submodel Template".to_string()])));
}

#[test]
fn test_options_file_replaces_builtin_form() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "AasxPluginGenericForms.options.json",
        r#"{"Records":[{"FormTag":"A","FormTitle":"Alpha"},{"FormTag":"B","FormTitle":"Beta"}]}"#,
    );

    let plugin = initialized(temp.path());
    assert_eq!(tags(&plugin), vec!["A", "B"]);
}

#[test]
fn test_unusable_options_file_keeps_builtin_form() {
    for text in ["", "   \n", "{ not json", r#"{"Records": 7}"#] {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "AasxPluginGenericForms.options.json", text);
        let plugin = initialized(temp.path());
        assert_eq!(tags(&plugin), vec!["SMP"], "options text {:?}", text);
    }
}

#[test]
fn test_additional_files_append_in_name_order() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "AasxPluginGenericForms.b.add-options.json", &record("B", "Beta"));
    write(temp.path(), "AasxPluginGenericForms.add-options.json", &record("X", "Extra"));
    write(temp.path(), "AasxPluginGenericForms.a.add-options.json", &record("A", "Alpha"));
    write(temp.path(), "AasxPluginGenericForms.c.add-options.json", "broken");
    write(temp.path(), "SomeOtherPlugin.add-options.json", &record("O", "Other"));

    let plugin = initialized(temp.path());
    assert_eq!(tags(&plugin), vec!["SMP", "A", "X", "B"]);
}

#[test]
fn test_additional_files_duplicate_existing_records() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "AasxPluginGenericForms.options.json", &record("A", "Alpha"));
    write(temp.path(), "AasxPluginGenericForms.add-options.json", &record("A", "Alpha again"));

    let plugin = initialized(temp.path());
    assert_eq!(tags(&plugin), vec!["A", "A"]);

    let result = plugin.activate_action(PluginAction::GenerateSubmodel { title: "Alpha again".to_string() });
    assert!(matches!(result, Some(ActionResult::GeneratedSubmodel(_))));
}

#[test]
fn test_v20_options_file_is_upgraded() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "AasxPluginGenericForms.options.json", V20_OPTIONS);
    write(temp.path(), "AasxPluginGenericForms.add-options.json", &record("Z", "Zulu"));

    let plugin = initialized(temp.path());
    assert_eq!(tags(&plugin), vec!["NP", "Z"]);

    let options = plugin.options();
    let form = &options.records[0].form_submodel;
    assert_eq!(form.element_count(), 2);

    let query = Key::new(KeyType::GlobalReference, " HTTPS://admin-shell.io/zvei/nameplate/1/0/nameplate ");
    let found = find_by_semantic_id(&options.records, Some(&Reference::from_key(query)), MatchMode::Relaxed);
    assert_eq!(found.map(|r| r.form_tag.as_str()), Some("NP"));
}

#[test]
fn test_loader_used_directly() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "AasxPluginGenericForms.options.json", V20_OPTIONS);

    let mappings = legacy::upgrade_mappings();
    let loader = OptionsLoader::new(PLUGIN_NAME, &mappings);
    assert_eq!(loader.options_file(temp.path()), temp.path().join("AasxPluginGenericForms.options.json"));

    let options = loader.bootstrap(GenericFormOptions::builtin(), temp.path());
    assert_eq!(options.records.len(), 1);
    assert_eq!(options.records[0].form_title, "Nameplate (V2.0)");
}
