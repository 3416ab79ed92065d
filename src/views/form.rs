//! Create/edit form for a single scope

use std::rc::Rc;

use tracing::{debug, info};

use super::alert::RemoteAlert;
use super::icons::icon_rows;
use super::route::Route;
use crate::api::{ApiError, Dispatcher, Origin, Request, Ticket};
use crate::domain::ScopeRecord;
use crate::store::{ScopeModel, SharedStore};

/// Editable copy of the form inputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeFormFields {
    pub value: String,
    pub description: String,
    pub icon: String,
    pub default_scope: bool,
    pub allow_dyn_reg: bool,
    pub structured: bool,
    pub structured_param_description: String,
}

impl From<&ScopeRecord> for ScopeFormFields {
    fn from(record: &ScopeRecord) -> Self {
        Self {
            value: record.value.clone(),
            description: record.description.clone().unwrap_or_default(),
            icon: record.icon.clone().unwrap_or_default(),
            default_scope: record.default_scope,
            allow_dyn_reg: record.allow_dyn_reg,
            structured: record.structured,
            structured_param_description: record
                .structured_param_description
                .clone()
                .unwrap_or_default(),
        }
    }
}

impl ScopeFormFields {
    /// Copy the inputs onto `base`, keeping fields the form does not edit
    pub fn apply_to(&self, base: &ScopeRecord) -> ScopeRecord {
        ScopeRecord {
            value: self.value.trim().to_string(),
            description: non_empty(&self.description),
            icon: non_empty(&self.icon),
            default_scope: self.default_scope,
            allow_dyn_reg: self.allow_dyn_reg,
            structured: self.structured,
            structured_param_description: non_empty(&self.structured_param_description),
            ..base.clone()
        }
    }
}

fn non_empty(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// What happened when the user pressed save
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Blank scope value; nothing was sent
    Rejected,
    /// A save is already in flight
    Busy,
    /// The save request was queued
    Submitted(Ticket),
}

/// What the admin should do after a save completed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveResult {
    Navigate(Route),
    Alert(RemoteAlert),
}

/// Form bound to one scope, new or existing
pub struct ScopeFormView {
    model: Rc<ScopeModel>,
    fields: ScopeFormFields,
    structured_param_visible: bool,
    icon_picker_open: bool,
    saving: Option<Ticket>,
}

impl ScopeFormView {
    /// Form for a scope that does not exist yet
    pub fn new_scope() -> Self {
        Self::edit(ScopeModel::new(ScopeRecord::default()))
    }

    /// Form bound to an existing scope
    pub fn edit(model: Rc<ScopeModel>) -> Self {
        let mut view = Self {
            model,
            fields: ScopeFormFields::default(),
            structured_param_visible: false,
            icon_picker_open: false,
            saving: None,
        };
        view.render();
        view
    }

    /// Load the inputs from the bound scope
    pub fn render(&mut self) {
        self.fields = self.model.with(|record| ScopeFormFields::from(record));
        self.sync_structured_param();
    }

    pub fn model(&self) -> &Rc<ScopeModel> {
        &self.model
    }

    pub fn is_new(&self) -> bool {
        self.model.id().is_none()
    }

    pub fn title(&self) -> String {
        match self.model.id() {
            Some(_) => format!("Edit Scope: {}", self.model.value()),
            None => "New Scope".to_string(),
        }
    }

    pub fn fields(&self) -> &ScopeFormFields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut ScopeFormFields {
        &mut self.fields
    }

    /// The "structured" checkbox changed
    pub fn set_structured(&mut self, checked: bool) {
        self.fields.structured = checked;
        self.sync_structured_param();
    }

    fn sync_structured_param(&mut self) {
        self.structured_param_visible = self.fields.structured;
    }

    pub fn is_structured_param_visible(&self) -> bool {
        self.structured_param_visible
    }

    pub fn open_icon_picker(&mut self) {
        self.icon_picker_open = true;
    }

    pub fn close_icon_picker(&mut self) {
        self.icon_picker_open = false;
    }

    pub fn is_icon_picker_open(&self) -> bool {
        self.icon_picker_open
    }

    /// Picker grid, shared by every form
    pub fn icon_rows(&self) -> &'static [&'static [&'static str]] {
        icon_rows()
    }

    /// Take an icon from the picker. Saved only with the rest of the form.
    pub fn select_icon(&mut self, icon: &str) {
        self.fields.icon = icon.to_string();
        self.icon_picker_open = false;
    }

    /// Validate, copy the inputs onto the scope and persist it
    pub fn save(&mut self, dispatcher: &Dispatcher) -> SaveOutcome {
        if self.saving.is_some() {
            return SaveOutcome::Busy;
        }
        if self.fields.value.trim().is_empty() {
            debug!("Refusing to save a scope with a blank value");
            return SaveOutcome::Rejected;
        }

        let record = self.fields.apply_to(&self.model.snapshot());
        self.model.set(record.clone());

        let ticket = dispatcher.submit(Origin::FormSave, Request::Save(record));
        self.saving = Some(ticket);
        SaveOutcome::Submitted(ticket)
    }

    /// Leave without saving
    pub fn cancel(&self) -> Route {
        Route::List
    }

    /// Ticket of the save in flight
    pub fn saving(&self) -> Option<Ticket> {
        self.saving
    }

    /// Apply a save completion
    pub fn on_save_result(
        &mut self,
        result: Result<ScopeRecord, ApiError>,
        store: &SharedStore,
    ) -> SaveResult {
        self.saving = None;
        match result {
            Ok(saved) => {
                apply_saved(&self.model, saved, store);
                SaveResult::Navigate(Route::List)
            }
            Err(err) => SaveResult::Alert(RemoteAlert::from_error(&err)),
        }
    }
}

/// Take the server's copy of a saved scope and make sure the store has it
pub fn apply_saved(model: &Rc<ScopeModel>, saved: ScopeRecord, store: &SharedStore) {
    info!("Saved scope {:?} ({})", saved.id, saved.value);
    model.set(saved);
    store.borrow_mut().add(model.clone());
}
