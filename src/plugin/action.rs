//! Plugin Actions and Results
//!
//! The host talks to plugins through a fixed action vocabulary. Every action
//! is a variant carrying typed arguments; `from_invocation` is the one place
//! where an action name and positional JSON arguments are turned into a
//! variant, so argument contracts live next to the action definitions.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use crate::aas::{ConceptDescription, Key, Reference, Submodel};
use super::error::{PluginError, PluginResult};

/// Opaque identifier of a visual extension session, chosen by the host
pub type SessionId = String;

/// Action names in dispatch order; polled actions come first
pub const ACTION_NAMES: [&str; 12] = [
    "get-events",
    "event-return",
    "get-json-options",
    "set-json-options",
    "get-licenses",
    "call-check-visual-extension",
    "fill-anyui-visual-extension",
    "update-anyui-visual-extension",
    "dispose-anyui-visual-extension",
    "get-list-new-submodel",
    "generate-submodel",
    "find-form-desc",
];

/// A request to a plugin
#[derive(Debug, Clone, PartialEq)]
pub enum PluginAction {
    GetEvents,
    EventReturn(PluginEventReturn),
    GetJsonOptions,
    SetJsonOptions { json: String },
    GetLicenses,
    CallCheckVisualExtension { submodel: Submodel },
    FillVisualExtension { session_id: SessionId, submodel: Submodel },
    UpdateVisualExtension { session_id: SessionId },
    DisposeVisualExtension { session_id: SessionId },
    GetListNewSubmodel,
    GenerateSubmodel { title: String },
    FindFormDesc { semantic_id: Option<Reference> },
}

impl PluginAction {
    pub fn name(&self) -> &'static str {
        match self {
            PluginAction::GetEvents => "get-events",
            PluginAction::EventReturn(_) => "event-return",
            PluginAction::GetJsonOptions => "get-json-options",
            PluginAction::SetJsonOptions { .. } => "set-json-options",
            PluginAction::GetLicenses => "get-licenses",
            PluginAction::CallCheckVisualExtension { .. } => "call-check-visual-extension",
            PluginAction::FillVisualExtension { .. } => "fill-anyui-visual-extension",
            PluginAction::UpdateVisualExtension { .. } => "update-anyui-visual-extension",
            PluginAction::DisposeVisualExtension { .. } => "dispose-anyui-visual-extension",
            PluginAction::GetListNewSubmodel => "get-list-new-submodel",
            PluginAction::GenerateSubmodel { .. } => "generate-submodel",
            PluginAction::FindFormDesc { .. } => "find-form-desc",
        }
    }

    /// Build an action from its name and positional arguments.
    ///
    /// Unknown names yield `Ok(None)`; a known name with arguments that do
    /// not fit its contract yields `PluginError::InvalidArguments`.
    pub fn from_invocation(name: &str, args: Vec<Value>) -> PluginResult<Option<Self>> {
        let mut args = Arguments::new(name, args);
        let action = match name {
            "get-events" => PluginAction::GetEvents,
            "event-return" => PluginAction::EventReturn(args.typed(0, "an event return")?),
            "get-json-options" => PluginAction::GetJsonOptions,
            "set-json-options" => PluginAction::SetJsonOptions { json: args.string(0)? },
            "get-licenses" => PluginAction::GetLicenses,
            "call-check-visual-extension" => PluginAction::CallCheckVisualExtension {
                submodel: args.typed(0, "a submodel")?,
            },
            "fill-anyui-visual-extension" => PluginAction::FillVisualExtension {
                session_id: args.session_id(0)?,
                submodel: args.typed(1, "a submodel")?,
            },
            "update-anyui-visual-extension" => PluginAction::UpdateVisualExtension {
                session_id: args.session_id(0)?,
            },
            "dispose-anyui-visual-extension" => PluginAction::DisposeVisualExtension {
                session_id: args.session_id(0)?,
            },
            "get-list-new-submodel" => PluginAction::GetListNewSubmodel,
            "generate-submodel" => PluginAction::GenerateSubmodel { title: args.string(0)? },
            "find-form-desc" => PluginAction::FindFormDesc { semantic_id: args.semantic_id(0)? },
            _ => return Ok(None),
        };
        Ok(Some(action))
    }
}

/// Positional argument accessor producing contract errors
struct Arguments<'a> {
    action: &'a str,
    values: Vec<Value>,
}

impl<'a> Arguments<'a> {
    fn new(action: &'a str, values: Vec<Value>) -> Self {
        Self { action, values }
    }

    fn take(&mut self, index: usize) -> PluginResult<Value> {
        match self.values.get_mut(index) {
            Some(value) => Ok(value.take()),
            None => Err(PluginError::invalid_arguments(
                self.action,
                format!("expected at least {} argument(s), got {}", index + 1, self.values.len()),
            )),
        }
    }

    fn string(&mut self, index: usize) -> PluginResult<String> {
        match self.take(index)? {
            Value::String(s) => Ok(s),
            other => Err(self.mismatch(index, "a string", &other)),
        }
    }

    fn session_id(&mut self, index: usize) -> PluginResult<SessionId> {
        match self.take(index)? {
            Value::String(s) if !s.is_empty() => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(self.mismatch(index, "a session id", &other)),
        }
    }

    fn typed<T: serde::de::DeserializeOwned>(&mut self, index: usize, expected: &str) -> PluginResult<T> {
        let value = self.take(index)?;
        serde_json::from_value(value).map_err(|e| {
            PluginError::invalid_arguments(self.action, format!("argument {} is not {}: {}", index, expected, e))
        })
    }

    /// A reference, a single key, or a bare identifier string; `null` is no id
    fn semantic_id(&mut self, index: usize) -> PluginResult<Option<Reference>> {
        match self.take(index)? {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(Reference::external(s))),
            value @ Value::Object(_) => {
                if value.get("keys").is_some() {
                    serde_json::from_value::<Reference>(value).map(Some)
                } else {
                    serde_json::from_value::<Key>(value).map(|k| Some(Reference::from_key(k)))
                }
                .map_err(|e| {
                    PluginError::invalid_arguments(self.action, format!("argument {} is not a semantic id: {}", index, e))
                })
            }
            other => Err(self.mismatch(index, "a semantic id", &other)),
        }
    }

    fn mismatch(&self, index: usize, expected: &str, got: &Value) -> PluginError {
        PluginError::invalid_arguments(
            self.action,
            format!("argument {} must be {}, got {}", index, expected, json_kind(got)),
        )
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Name and short description of an action a plugin supports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDescription {
    pub name: String,
    pub info: String,
}

impl ActionDescription {
    pub fn new<N: Into<String>, I: Into<String>>(name: N, info: I) -> Self {
        Self { name: name.into(), info: info.into() }
    }
}

/// Results returned by plugin actions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum ActionResult {
    /// Status text with an opaque payload
    BaseObject { text: String, payload: Value },
    Event(PluginEvent),
    Licenses(LicenseBundle),
    VisualExtension(VisualExtension),
    StringList(Vec<String>),
    GeneratedSubmodel(GeneratedSubmodel),
}

impl ActionResult {
    pub fn ok(payload: Value) -> Self {
        ActionResult::BaseObject { text: "OK".to_string(), payload }
    }

    pub fn payload(&self) -> Option<&Value> {
        match self {
            ActionResult::BaseObject { payload, .. } => Some(payload),
            _ => None,
        }
    }
}

/// Event a plugin raises for the host to pick up via `get-events`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginEvent {
    pub id: Uuid,
    #[serde(flatten)]
    pub kind: PluginEventKind,
}

impl PluginEvent {
    pub fn new(kind: PluginEventKind) -> Self {
        Self { id: Uuid::now_v7(), kind }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum PluginEventKind {
    /// Host should redraw the element tree, optionally for one session
    RedrawAllElements { session_id: Option<SessionId> },
}

/// Host's answer to an event that asked for one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginEventReturn {
    pub source_event_id: Uuid,
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseBundle {
    pub short_license: String,
    pub is_standard_license: bool,
    pub long_license: String,
}

/// Tells the host a plugin can render a submodel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualExtension {
    pub tag: String,
    pub caption: String,
    pub info: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedSubmodel {
    pub submodel: Submodel,
    pub concept_descriptions: Vec<ConceptDescription>,
}
