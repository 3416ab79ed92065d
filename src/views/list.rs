//! Scope table view

use std::time::Instant;

use tracing::{debug, info};

use super::alert::RemoteAlert;
use super::loading::LoadingIndicator;
use super::route::Route;
use super::row::ScopeRowView;
use crate::api::{ApiError, Dispatcher, Ticket};
use crate::domain::ScopeId;
use crate::store::{FetchStatus, SharedStore};

/// Loading-sheet label for the scope collection
pub const SCOPES_LABEL: &str = "Scopes";

/// What to do once the store is populated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// Render the scope table
    ShowList,
    /// Open the edit form for a scope
    EditScope(ScopeId),
}

/// Which part of the table area is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableVisibility {
    /// Not rendered (or disposed)
    Hidden,
    /// The table of rows
    Table,
    /// The "no scopes" placeholder
    Placeholder,
}

/// Lists every scope in the store, one [`ScopeRowView`] per scope
pub struct ScopeListView {
    store: SharedStore,
    rows: Vec<ScopeRowView>,
    visibility: TableVisibility,
    loading: LoadingIndicator,
    waiting: Vec<Continuation>,
    render_after_fetch: bool,
    confirming: Option<ScopeId>,
}

impl ScopeListView {
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            rows: Vec::new(),
            visibility: TableVisibility::Hidden,
            loading: LoadingIndicator::default(),
            waiting: Vec::new(),
            render_after_fetch: false,
            confirming: None,
        }
    }

    /// Make sure the store is populated, then continue with `then`.
    ///
    /// Returns `then` straight back when the store was already fetched; no
    /// loading indicator is shown in that case. Otherwise the continuation is
    /// held until [`on_fetched`](Self::on_fetched).
    pub fn load(&mut self, dispatcher: &Dispatcher, then: Continuation) -> Option<Continuation> {
        let status = self.store.borrow_mut().fetch_if_needed(dispatcher);
        match status {
            FetchStatus::Ready => Some(then),
            FetchStatus::Pending(ticket) => {
                debug!("Waiting on {:?} before {:?}", ticket, then);
                self.loading.show(SCOPES_LABEL);
                self.waiting.push(then);
                None
            }
        }
    }

    /// Re-fetch the collection and re-render once it arrives
    pub fn refresh(&mut self, dispatcher: &Dispatcher) -> Ticket {
        self.loading.show(SCOPES_LABEL);
        self.render_after_fetch = true;
        self.store.borrow_mut().refresh(dispatcher)
    }

    /// The store has been populated; returns the continuations to run.
    ///
    /// The loading sheet shows the label as loaded until [`tick`](Self::tick)
    /// hides it.
    pub fn on_fetched(&mut self, now: Instant) -> Vec<Continuation> {
        self.loading.finish(SCOPES_LABEL, now);
        if std::mem::take(&mut self.render_after_fetch) {
            self.render();
        }
        std::mem::take(&mut self.waiting)
    }

    /// The fetch failed; waiting continuations are dropped
    pub fn on_fetch_failed(&mut self) {
        self.loading.hide();
        self.render_after_fetch = false;
        self.waiting.clear();
    }

    /// Rebuild the table from the store, in store order
    pub fn render(&mut self) {
        self.confirming = None;
        self.rows = self
            .store
            .borrow()
            .iter()
            .cloned()
            .map(ScopeRowView::new)
            .collect();
        info!("Rendered {} scope rows", self.rows.len());
        self.toggle_placeholder();
    }

    /// Show the table when the store has scopes, the placeholder otherwise
    pub fn toggle_placeholder(&mut self) {
        self.visibility = if self.store.borrow().is_empty() {
            TableVisibility::Placeholder
        } else {
            TableVisibility::Table
        };
    }

    /// Leave the list for the creation form
    pub fn new_scope(&mut self) -> Route {
        self.dispose();
        Route::New
    }

    /// Drop every row (and its model subscription)
    pub fn dispose(&mut self) {
        self.rows.clear();
        self.confirming = None;
        self.visibility = TableVisibility::Hidden;
    }

    /// Ask the user to confirm deleting a scope
    pub fn request_delete(&mut self, id: ScopeId) {
        if self.row(id).is_some() {
            self.confirming = Some(id);
        }
    }

    pub fn cancel_delete(&mut self) {
        self.confirming = None;
    }

    /// Scope awaiting delete confirmation
    pub fn confirming(&self) -> Option<ScopeId> {
        self.confirming
    }

    /// The user confirmed; issue the remote delete
    pub fn confirm_delete(&mut self, dispatcher: &Dispatcher) -> Option<Ticket> {
        let id = self.confirming.take()?;
        self.rows
            .iter_mut()
            .find(|row| row.id() == Some(id))?
            .confirm_delete(dispatcher)
    }

    /// Apply a delete completion. Returns the alert to show on failure.
    pub fn on_delete_result(
        &mut self,
        id: ScopeId,
        ticket: Ticket,
        result: Result<(), ApiError>,
        now: Instant,
    ) -> Option<RemoteAlert> {
        let row = self
            .rows
            .iter_mut()
            .find(|row| row.pending_delete() == Some(ticket));

        match result {
            Ok(()) => {
                info!("Deleted scope {}", id);
                self.store.borrow_mut().remove(id);
                let animating = match row {
                    Some(row) => {
                        row.on_delete_succeeded(now);
                        true
                    }
                    None => false,
                };
                if !animating && self.visibility != TableVisibility::Hidden {
                    self.toggle_placeholder();
                }
                None
            }
            Err(err) => {
                if let Some(row) = row {
                    row.on_delete_failed();
                }
                Some(RemoteAlert::from_error(&err))
            }
        }
    }

    /// Advance row removals and the loading sheet. Returns whether an
    /// animation is still running.
    pub fn tick(&mut self, now: Instant) -> bool {
        let lingering = self.loading.tick(now);

        let mut finished = false;
        for row in &mut self.rows {
            finished |= row.tick(now);
        }
        if finished {
            self.rows.retain(|row| !row.is_removed());
        }

        let removing = self.rows.iter().any(ScopeRowView::is_removing);
        // Rows still fading keep the table up even when the store is already empty
        if finished && !removing {
            self.toggle_placeholder();
        }
        lingering || removing
    }

    pub fn rows(&self) -> &[ScopeRowView] {
        &self.rows
    }

    pub fn row(&self, id: ScopeId) -> Option<&ScopeRowView> {
        self.rows.iter().find(|row| row.id() == Some(id))
    }

    pub fn visibility(&self) -> TableVisibility {
        self.visibility
    }

    pub fn loading(&self) -> &LoadingIndicator {
        &self.loading
    }

    pub fn is_table_visible(&self) -> bool {
        self.visibility == TableVisibility::Table
    }

    pub fn is_placeholder_visible(&self) -> bool {
        self.visibility == TableVisibility::Placeholder
    }
}
