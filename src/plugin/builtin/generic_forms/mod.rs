//! Generic Forms Plugin
//!
//! Offers form templates for submodels: lists them for "new submodel"
//! menus, instantiates them, finds the template for an existing submodel
//! and keeps one session per submodel the host displays through it.
//!
//! Options come from `AasxPluginGenericForms.options.json` and any
//! `AasxPluginGenericForms[.*].add-options.json` next to it; V2.0 files are
//! upgraded on load.

use std::path::Path;
use std::sync::Arc;
use log::{debug, info};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::aas::{MatchMode, Reference, Submodel};
use crate::options::{
    find_by_semantic_id, find_by_title, upgrade_text, OptionsLoader, PluginOptions, RecordSummary, SharedOptions,
    UpgradeMapping,
};
use crate::plugin::action::{
    ActionDescription, ActionResult, GeneratedSubmodel, LicenseBundle, PluginAction, PluginEventKind,
    SessionId, VisualExtension,
};
use crate::plugin::error::{PluginError, PluginResult};
use crate::plugin::events::PluginEventStack;
use crate::plugin::session::SessionRegistry;
use crate::plugin::traits::{Plugin, PluginInfo};
use crate::plugin::version::get_api_version;

pub mod form_desc;
pub mod options;
pub mod legacy;
pub mod generate;

pub use form_desc::{FormDescSubmodel, FormDescSubmodelElement, FormMultiplicity};
pub use options::{GenericFormOptions, GenericFormsOptionsRecord};

pub const PLUGIN_NAME: &str = "AasxPluginGenericForms";

const SHORT_LICENSE: &str = "The generic forms plugin is distributed under the MIT license.";

/// State of one displayed submodel
#[derive(Debug, Clone, PartialEq)]
pub struct FormSession {
    pub form_tag: String,
    pub submodel: Submodel,
    pub refresh_count: u64,
    /// Redraw event raised when the session opened
    pub redraw_event: Uuid,
    /// Host's answer to `redraw_event`, once it has been picked up
    pub redraw_answer: Option<Value>,
}

pub struct GenericFormsPlugin {
    info: PluginInfo,
    options: SharedOptions<GenericFormOptions>,
    mappings: Vec<UpgradeMapping<GenericFormOptions>>,
    events: PluginEventStack,
    sessions: SessionRegistry<FormSession>,
}

impl GenericFormsPlugin {
    /// Plugin holding the built-in options
    pub fn new() -> Self {
        Self::with_options(GenericFormOptions::builtin())
    }

    pub fn with_options(options: GenericFormOptions) -> Self {
        let info = PluginInfo::new(
            PLUGIN_NAME,
            env!("CARGO_PKG_VERSION"),
            get_api_version(),
            "Form templates for creating and editing submodels",
            "aasx-plugins",
        )
        .with_license("MIT");

        Self {
            info,
            options: SharedOptions::new(options),
            mappings: legacy::upgrade_mappings(),
            events: PluginEventStack::new(),
            sessions: SessionRegistry::new(),
        }
    }

    pub fn options(&self) -> Arc<GenericFormOptions> {
        self.options.snapshot()
    }

    pub fn upgrade_mappings(&self) -> &[UpgradeMapping<GenericFormOptions>] {
        &self.mappings
    }

    pub fn events(&self) -> &PluginEventStack {
        &self.events
    }

    pub fn session(&self, id: &str) -> Option<FormSession> {
        self.sessions.get(id)
    }

    fn record_for(&self, semantic_id: Option<&Reference>) -> Option<GenericFormsOptionsRecord> {
        let options = self.options.snapshot();
        find_by_semantic_id(&options.records, semantic_id, MatchMode::Relaxed).cloned()
    }

    fn get_json_options(&self) -> PluginResult<Option<ActionResult>> {
        let json = serde_json::to_string_pretty(self.options.snapshot().as_ref())?;
        Ok(Some(ActionResult::ok(Value::String(json))))
    }

    fn set_json_options(&self, json: &str) -> PluginResult<Option<ActionResult>> {
        let options = upgrade_text(json, &self.mappings)?;
        info!("{}: options replaced, {} record(s)", PLUGIN_NAME, options.records.len());
        self.options.replace(options);
        Ok(Some(ActionResult::ok(Value::Bool(true))))
    }

    fn get_licenses(&self) -> ActionResult {
        ActionResult::Licenses(LicenseBundle {
            short_license: SHORT_LICENSE.to_string(),
            is_standard_license: true,
            long_license: String::new(),
        })
    }

    fn check_visual_extension(&self, submodel: &Submodel) -> Option<ActionResult> {
        let record = self.record_for(submodel.semantic_id.as_ref())?;
        Some(ActionResult::VisualExtension(VisualExtension {
            tag: record.form_tag,
            caption: record.form_title,
            info: "Edit the submodel through its form".to_string(),
        }))
    }

    fn fill_visual_extension(&self, session_id: SessionId, submodel: Submodel) -> PluginResult<Option<ActionResult>> {
        let record = self.record_for(submodel.semantic_id.as_ref()).ok_or_else(|| {
            PluginError::execution_failed(format!("no form matches submodel '{}'", submodel.id_short))
        })?;

        let redraw_event =
            self.events.push_event(PluginEventKind::RedrawAllElements { session_id: Some(session_id.clone()) });
        let session = FormSession {
            form_tag: record.form_tag.clone(),
            submodel,
            refresh_count: 0,
            redraw_event,
            redraw_answer: None,
        };
        if self.sessions.create(session_id.clone(), session).is_some() {
            debug!("{}: session {} reopened", PLUGIN_NAME, session_id);
        }

        Ok(Some(ActionResult::ok(json!({ "session": session_id, "formTag": record.form_tag }))))
    }

    fn update_visual_extension(&self, session_id: &str) -> PluginResult<Option<ActionResult>> {
        let count = self.sessions.update(session_id, |session| {
            session.refresh_count += 1;
            if session.redraw_answer.is_none() {
                if let Some(answer) = self.events.take_event_return(&session.redraw_event) {
                    debug!("{}: session {} redraw answered with {}", PLUGIN_NAME, session_id, answer);
                    session.redraw_answer = Some(answer);
                }
            }
            session.refresh_count
        })?;
        Ok(Some(ActionResult::ok(json!(count))))
    }

    fn dispose_visual_extension(&self, session_id: &str) -> PluginResult<Option<ActionResult>> {
        let session = self.sessions.remove(session_id)?;
        debug!("{}: session {} closed after {} refresh(es)", PLUGIN_NAME, session_id, session.refresh_count);
        Ok(Some(ActionResult::ok(Value::Bool(true))))
    }

    fn list_new_submodels(&self) -> ActionResult {
        let options = self.options.snapshot();
        ActionResult::StringList(options.records.iter().map(|r| r.form_title.clone()).collect())
    }

    fn generate_submodel(&self, title: &str) -> Option<ActionResult> {
        let options = self.options.snapshot();
        let Some(record) = find_by_title(&options.records, title) else {
            debug!("{}: no form titled '{}'", PLUGIN_NAME, title);
            return None;
        };
        let submodel = generate::instantiate_submodel(&record.form_submodel, generate::new_submodel_id());
        Some(ActionResult::GeneratedSubmodel(GeneratedSubmodel {
            submodel,
            concept_descriptions: record.concept_descriptions.clone(),
        }))
    }

    fn find_form_desc(&self, semantic_id: Option<&Reference>) -> PluginResult<Option<ActionResult>> {
        match self.record_for(semantic_id) {
            Some(record) => Ok(Some(ActionResult::ok(serde_json::to_value(&record.form_submodel)?))),
            None => Ok(None),
        }
    }
}

impl Default for GenericFormsPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for GenericFormsPlugin {
    fn plugin_info(&self) -> &PluginInfo {
        &self.info
    }

    /// Run the options bootstrap against `options_dir`, starting from the
    /// options currently held
    fn initialize(&self, options_dir: &Path) -> PluginResult<()> {
        let loader = OptionsLoader::new(PLUGIN_NAME, &self.mappings);
        let current = (*self.options.snapshot()).clone();
        let loaded = loader.bootstrap(current, options_dir);
        info!("{}: {} form record(s) active", PLUGIN_NAME, loaded.records.len());
        self.options.replace(loaded);
        Ok(())
    }

    fn option_records(&self) -> Vec<RecordSummary> {
        self.options.snapshot().summaries()
    }

    fn list_actions(&self) -> Vec<ActionDescription> {
        vec![
            ActionDescription::new("get-events", "Pops the next pending event."),
            ActionDescription::new("event-return", "Delivers the answer to an event."),
            ActionDescription::new("get-json-options", "Gets the active options as JSON."),
            ActionDescription::new("set-json-options", "Replaces the options from JSON, upgrading if needed."),
            ActionDescription::new("get-licenses", "Reports the plugin license."),
            ActionDescription::new("call-check-visual-extension", "Tells whether a form matches the submodel."),
            ActionDescription::new("fill-anyui-visual-extension", "Opens a form session for a submodel."),
            ActionDescription::new("update-anyui-visual-extension", "Refreshes a form session."),
            ActionDescription::new("dispose-anyui-visual-extension", "Closes a form session."),
            ActionDescription::new("get-list-new-submodel", "Lists the titles of all forms."),
            ActionDescription::new("generate-submodel", "Instantiates the form with the given title."),
            ActionDescription::new("find-form-desc", "Finds the form description for a semantic id."),
        ]
    }

    fn handle_action(&self, action: PluginAction) -> PluginResult<Option<ActionResult>> {
        match action {
            PluginAction::GetEvents => Ok(self.events.pop_event().map(ActionResult::Event)),
            PluginAction::EventReturn(ret) => {
                let id = ret.source_event_id;
                if !self.events.push_event_return(ret) {
                    debug!("{}: answer to event {} dropped", PLUGIN_NAME, id);
                }
                Ok(None)
            }
            PluginAction::GetJsonOptions => self.get_json_options(),
            PluginAction::SetJsonOptions { json } => self.set_json_options(&json),
            PluginAction::GetLicenses => Ok(Some(self.get_licenses())),
            PluginAction::CallCheckVisualExtension { submodel } => Ok(self.check_visual_extension(&submodel)),
            PluginAction::FillVisualExtension { session_id, submodel } => {
                self.fill_visual_extension(session_id, submodel)
            }
            PluginAction::UpdateVisualExtension { session_id } => self.update_visual_extension(&session_id),
            PluginAction::DisposeVisualExtension { session_id } => self.dispose_visual_extension(&session_id),
            PluginAction::GetListNewSubmodel => Ok(Some(self.list_new_submodels())),
            PluginAction::GenerateSubmodel { title } => Ok(self.generate_submodel(&title)),
            PluginAction::FindFormDesc { semantic_id } => self.find_form_desc(semantic_id.as_ref()),
        }
    }
}
