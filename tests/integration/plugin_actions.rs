//! Integration tests for action dispatch through the plugin registry
//!
//! Actions are invoked by name with JSON arguments, as the host's `invoke`
//! command does.

use std::sync::Arc;
use serde_json::{json, Value};

use aasx_plugins::aas::{Reference, Submodel};
use aasx_plugins::plugin::builtin::generic_forms::options::SMP_SEMANTIC_ID;
use aasx_plugins::plugin::builtin::{create_builtin_plugin, GenericFormsPlugin};
use aasx_plugins::plugin::{ActionResult, PluginError, PluginEventKind, PluginRegistry};

const PLUGIN: &str = "AasxPluginGenericForms";

fn registry() -> PluginRegistry {
    let mut registry = PluginRegistry::new();
    registry.register_plugin(Arc::new(GenericFormsPlugin::new())).unwrap();
    registry
}

fn smp_submodel() -> Value {
    let submodel = Submodel::new("urn:sm:smp:1", "SMP").with_semantic_id(Reference::external(SMP_SEMANTIC_ID));
    serde_json::to_value(submodel).unwrap()
}

#[test]
fn test_unknown_plugin_is_reported() {
    let result = registry().invoke("NoSuchPlugin", "get-events", vec![]);
    assert!(matches!(result, Err(PluginError::PluginNotFound { .. })));
}

#[test]
fn test_unknown_action_is_silent() {
    let registry = registry();
    assert_eq!(registry.invoke(PLUGIN, "frobnicate", vec![json!(1)]).unwrap(), None);
    assert!(registry.get_plugins_with_action("frobnicate").is_empty());
    assert_eq!(registry.get_plugins_with_action("find-form-desc"), vec![PLUGIN]);
}

#[test]
fn test_options_round_trip() {
    let registry = registry();

    let exported = registry.invoke(PLUGIN, "get-json-options", vec![]).unwrap().unwrap();
    let Some(Value::String(text)) = exported.payload().cloned() else {
        panic!("unexpected result {:?}", exported);
    };

    let replaced = registry
        .invoke(PLUGIN, "set-json-options", vec![json!(r#"{"Records":[{"FormTag":"T","FormTitle":"Temp"}]}"#)])
        .unwrap();
    assert_eq!(replaced, Some(ActionResult::ok(json!(true))));
    assert_eq!(
        registry.invoke(PLUGIN, "get-list-new-submodel", vec![]).unwrap(),
        Some(ActionResult::StringList(vec!["Temp".to_string()]))
    );

    registry.invoke(PLUGIN, "set-json-options", vec![json!(text)]).unwrap();
    assert_eq!(
        registry.invoke(PLUGIN, "get-list-new-submodel", vec![]).unwrap(),
        Some(ActionResult::StringList(vec!["Sample Submodel Template".to_string()]))
    );
}

#[test]
fn test_rejected_options_leave_state_alone() {
    let registry = registry();
    assert_eq!(registry.invoke(PLUGIN, "set-json-options", vec![json!("{ broken")]).unwrap(), None);
    assert_eq!(registry.invoke(PLUGIN, "set-json-options", vec![json!(42)]).unwrap(), None);
    assert_eq!(
        registry.invoke(PLUGIN, "get-list-new-submodel", vec![]).unwrap(),
        Some(ActionResult::StringList(vec!["Sample Submodel Template".to_string()]))
    );
}

#[test]
fn test_visual_extension_session_lifecycle() {
    let registry = registry();

    let check = registry.invoke(PLUGIN, "call-check-visual-extension", vec![smp_submodel()]).unwrap();
    assert!(matches!(check, Some(ActionResult::VisualExtension(ref ext)) if ext.tag == "SMP"));

    let filled = registry
        .invoke(PLUGIN, "fill-anyui-visual-extension", vec![json!(7), smp_submodel()])
        .unwrap()
        .unwrap();
    assert_eq!(filled.payload(), Some(&json!({"session": "7", "formTag": "SMP"})));

    match registry.invoke(PLUGIN, "get-events", vec![]).unwrap() {
        Some(ActionResult::Event(event)) => {
            assert_eq!(event.kind, PluginEventKind::RedrawAllElements { session_id: Some("7".to_string()) });
        }
        other => panic!("expected an event, got {:?}", other),
    }
    assert_eq!(registry.invoke(PLUGIN, "get-events", vec![]).unwrap(), None);

    for expected in 1..=2 {
        let updated = registry.invoke(PLUGIN, "update-anyui-visual-extension", vec![json!("7")]).unwrap();
        assert_eq!(updated, Some(ActionResult::ok(json!(expected))));
    }

    let disposed = registry.invoke(PLUGIN, "dispose-anyui-visual-extension", vec![json!("7")]).unwrap();
    assert_eq!(disposed, Some(ActionResult::ok(json!(true))));
    assert_eq!(registry.invoke(PLUGIN, "update-anyui-visual-extension", vec![json!("7")]).unwrap(), None);
}

#[test]
fn test_generate_and_find() {
    let registry = registry();

    match registry.invoke(PLUGIN, "generate-submodel", vec![json!("Sample Submodel Template")]).unwrap() {
        Some(ActionResult::GeneratedSubmodel(generated)) => {
            assert!(generated.submodel.id.starts_with("urn:uuid:"));
            assert_eq!(generated.submodel.id_short, "SMP");
            assert_eq!(generated.submodel.submodel_elements.len(), 1);
        }
        other => panic!("expected a submodel, got {:?}", other),
    }
    assert_eq!(registry.invoke(PLUGIN, "generate-submodel", vec![json!("Unknown")]).unwrap(), None);

    let found = registry.invoke(PLUGIN, "find-form-desc", vec![json!(SMP_SEMANTIC_ID)]).unwrap().unwrap();
    assert_eq!(found.payload().and_then(|p| p.get("PresetIdShort")), Some(&json!("SMP")));
    assert_eq!(registry.invoke(PLUGIN, "find-form-desc", vec![Value::Null]).unwrap(), None);
}

#[test]
fn test_builtin_factory() {
    let plugin = create_builtin_plugin(PLUGIN).unwrap();
    assert_eq!(plugin.plugin_info().name, PLUGIN);
    assert!(create_builtin_plugin("Missing").is_none());
}

#[test]
fn test_concurrent_readers_see_whole_option_sets() {
    let registry = Arc::new(registry());
    let replacement = r#"{"Records":[{"FormTag":"A","FormTitle":"Alpha"},{"FormTag":"B","FormTitle":"Beta"}]}"#;

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                for _ in 0..200 {
                    match registry.invoke(PLUGIN, "get-list-new-submodel", vec![]).unwrap() {
                        Some(ActionResult::StringList(titles)) => {
                            assert!(titles == ["Sample Submodel Template"] || titles == ["Alpha", "Beta"]);
                        }
                        other => panic!("unexpected result {:?}", other),
                    }
                }
            })
        })
        .collect();

    for _ in 0..50 {
        registry.invoke(PLUGIN, "set-json-options", vec![json!(replacement)]).unwrap();
    }
    for reader in readers {
        reader.join().unwrap();
    }
}
