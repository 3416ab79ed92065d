//! Scope admin controller: routing, actions and completion handling

use std::collections::VecDeque;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::alert::RemoteAlert;
use super::form::{SaveOutcome, SaveResult, ScopeFormView, apply_saved};
use super::list::{Continuation, ScopeListView};
use super::route::Route;
use crate::api::{ApiError, Completion, Dispatcher, Origin, Reply, Ticket};
use crate::domain::{ScopeId, ScopeRecord};
use crate::store::{ScopeModel, SharedStore};

/// Something the user did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminAction {
    Navigate(Route),
    NewScope,
    RefreshList,
    EditScope(ScopeId),
    RequestDelete(ScopeId),
    ConfirmDelete,
    CancelDelete,
    SetStructured(bool),
    OpenIconPicker,
    CloseIconPicker,
    SelectIcon(String),
    SaveForm,
    CancelForm,
    DismissAlert,
}

/// Owns the views and routes actions and completions between them
pub struct ScopeAdmin {
    store: SharedStore,
    dispatcher: Dispatcher,
    route: Route,
    list: ScopeListView,
    form: Option<ScopeFormView>,
    /// Saves still in flight for forms that were closed
    orphaned_saves: Vec<(Ticket, Rc<ScopeModel>)>,
    /// Front is on screen; the rest wait their turn
    alerts: VecDeque<RemoteAlert>,
}

impl ScopeAdmin {
    pub fn new(store: SharedStore, dispatcher: Dispatcher) -> Self {
        Self {
            list: ScopeListView::new(store.clone()),
            store,
            dispatcher,
            route: Route::List,
            form: None,
            orphaned_saves: Vec::new(),
            alerts: VecDeque::new(),
        }
    }

    /// Switch to a route, loading the store first where the route needs it
    pub fn navigate(&mut self, route: Route) {
        info!("Navigating to {}", route);
        self.leave_form();
        self.route = route;

        match route {
            Route::List => {
                if let Some(next) = self.list.load(&self.dispatcher, Continuation::ShowList) {
                    self.run(next);
                }
            }
            Route::New => {
                self.list.dispose();
                self.form = Some(ScopeFormView::new_scope());
            }
            Route::Edit(id) => {
                self.list.dispose();
                if let Some(next) = self.list.load(&self.dispatcher, Continuation::EditScope(id)) {
                    self.run(next);
                }
            }
        }
    }

    fn leave_form(&mut self) {
        if let Some(form) = self.form.take() {
            if let Some(ticket) = form.saving() {
                self.orphaned_saves.push((ticket, form.model().clone()));
            }
        }
    }

    fn run(&mut self, next: Continuation) {
        match next {
            Continuation::ShowList => {
                if self.route == Route::List {
                    self.list.render();
                }
            }
            Continuation::EditScope(id) => {
                if self.route != Route::Edit(id) {
                    return;
                }
                let model = self.store.borrow().get(id);
                match model {
                    Some(model) => self.form = Some(ScopeFormView::edit(model)),
                    None => {
                        warn!("No scope with id {}", id);
                        self.raise(RemoteAlert::new(
                            "not_found",
                            format!("There is no scope with id {}.", id),
                        ));
                        self.navigate(Route::List);
                    }
                }
            }
        }
    }

    /// Apply a user action. Only `DismissAlert` is accepted while an alert is open.
    pub fn apply(&mut self, action: AdminAction) {
        if !self.alerts.is_empty() && action != AdminAction::DismissAlert {
            debug!("Ignoring {:?} while an alert is open", action);
            return;
        }

        match action {
            AdminAction::Navigate(route) => self.navigate(route),
            AdminAction::NewScope => {
                let route = self.list.new_scope();
                self.navigate(route);
            }
            AdminAction::RefreshList => {
                self.list.refresh(&self.dispatcher);
            }
            AdminAction::EditScope(id) => {
                if let Some(route) = self.list.row(id).and_then(|row| row.edit()) {
                    self.navigate(route);
                }
            }
            AdminAction::RequestDelete(id) => self.list.request_delete(id),
            AdminAction::ConfirmDelete => {
                self.list.confirm_delete(&self.dispatcher);
            }
            AdminAction::CancelDelete => self.list.cancel_delete(),
            AdminAction::SetStructured(checked) => {
                if let Some(form) = &mut self.form {
                    form.set_structured(checked);
                }
            }
            AdminAction::OpenIconPicker => {
                if let Some(form) = &mut self.form {
                    form.open_icon_picker();
                }
            }
            AdminAction::CloseIconPicker => {
                if let Some(form) = &mut self.form {
                    form.close_icon_picker();
                }
            }
            AdminAction::SelectIcon(icon) => {
                if let Some(form) = &mut self.form {
                    form.select_icon(&icon);
                }
            }
            AdminAction::SaveForm => {
                if let Some(form) = &mut self.form {
                    if let SaveOutcome::Submitted(ticket) = form.save(&self.dispatcher) {
                        debug!("Save queued as {:?}", ticket);
                    }
                }
            }
            AdminAction::CancelForm => {
                if let Some(route) = self.form.as_ref().map(ScopeFormView::cancel) {
                    self.navigate(route);
                }
            }
            AdminAction::DismissAlert => {
                self.alerts.pop_front();
            }
        }
    }

    /// Handle every completion that is ready. Returns how many were handled.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Some(completion) = self.dispatcher.try_next() {
            self.handle(completion, Instant::now());
            handled += 1;
        }
        handled
    }

    /// Block until every outstanding request has completed and been handled,
    /// waiting at most `timeout` for each one.
    pub fn pump_blocking(&mut self, timeout: Duration) -> usize {
        let mut handled = 0;
        while self.dispatcher.outstanding() > 0 {
            match self.dispatcher.next_blocking(timeout) {
                Some(completion) => {
                    self.handle(completion, Instant::now());
                    handled += 1;
                }
                None => break,
            }
        }
        handled
    }

    /// Route one completion to whoever issued the request
    pub fn handle(&mut self, completion: Completion, now: Instant) {
        let Completion {
            ticket,
            origin,
            result,
        } = completion;

        match origin {
            Origin::StoreFetch => match expect_fetched(result) {
                Ok(records) => {
                    self.store.borrow_mut().apply_fetch(ticket, records);
                    for next in self.list.on_fetched(now) {
                        self.run(next);
                    }
                }
                Err(err) => {
                    self.store.borrow_mut().fetch_failed(ticket);
                    self.list.on_fetch_failed();
                    self.raise(RemoteAlert::from_error(&err));
                }
            },
            Origin::FormSave => self.on_save(ticket, expect_saved(result)),
            Origin::RowDelete(id) => {
                let result = expect_deleted(result);
                if let Some(alert) = self.list.on_delete_result(id, ticket, result, now) {
                    self.raise(alert);
                }
            }
        }
    }

    /// Show `alert`, after any alert already on screen has been dismissed
    fn raise(&mut self, alert: RemoteAlert) {
        self.alerts.push_back(alert);
    }

    fn on_save(&mut self, ticket: Ticket, result: Result<ScopeRecord, ApiError>) {
        if let Some(form) = self.form.as_mut().filter(|f| f.saving() == Some(ticket)) {
            match form.on_save_result(result, &self.store) {
                SaveResult::Navigate(route) => self.navigate(route),
                SaveResult::Alert(alert) => self.raise(alert),
            }
            return;
        }

        let Some(index) = self.orphaned_saves.iter().position(|(t, _)| *t == ticket) else {
            warn!("Save completion {:?} has no owner", ticket);
            return;
        };
        let (_, model) = self.orphaned_saves.remove(index);
        match result {
            Ok(saved) => apply_saved(&model, saved, &self.store),
            Err(err) => self.raise(RemoteAlert::from_error(&err)),
        }
    }

    /// Advance animations. Returns whether another frame is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.list.tick(now)
    }

    /// Whether requests are in flight
    pub fn is_busy(&self) -> bool {
        self.dispatcher.outstanding() > 0
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn list(&self) -> &ScopeListView {
        &self.list
    }

    pub fn form(&self) -> Option<&ScopeFormView> {
        self.form.as_ref()
    }

    /// Alerts raised but not yet dismissed, including the one on screen
    pub fn pending_alerts(&self) -> usize {
        self.alerts.len()
    }

    pub fn form_mut(&mut self) -> Option<&mut ScopeFormView> {
        self.form.as_mut()
    }

    /// Alert on screen
    pub fn alert(&self) -> Option<&RemoteAlert> {
        self.alerts.front()
    }
}

fn unexpected(reply: Reply) -> ApiError {
    ApiError::Decode(format!("unexpected reply {:?}", reply))
}

fn expect_fetched(result: Result<Reply, ApiError>) -> Result<Vec<ScopeRecord>, ApiError> {
    match result? {
        Reply::Fetched(records) => Ok(records),
        other => Err(unexpected(other)),
    }
}

fn expect_saved(result: Result<Reply, ApiError>) -> Result<ScopeRecord, ApiError> {
    match result? {
        Reply::Saved(record) => Ok(record),
        other => Err(unexpected(other)),
    }
}

fn expect_deleted(result: Result<Reply, ApiError>) -> Result<(), ApiError> {
    match result? {
        Reply::Deleted => Ok(()),
        other => Err(unexpected(other)),
    }
}
