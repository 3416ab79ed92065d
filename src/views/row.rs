//! One row of the scope table

use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::debug;

use super::route::Route;
use crate::api::{Dispatcher, Origin, Request, Ticket};
use crate::domain::{ScopeId, ScopeRecord};
use crate::store::{ScopeModel, Subscription};

/// Tooltip on the dynamic-registration indicator
pub const DYN_REG_TOOLTIP: &str = "This scope can be used by dynamically registered clients";

/// Question asked before a scope is deleted
pub const DELETE_CONFIRMATION: &str = "Are you sure you would like to delete this scope? \
     Clients that have this scope will still be able to ask for it.";

/// Fade-out time of a deleted row
pub const ROW_FADE: Duration = Duration::from_millis(200);
/// Collapse time after the fade
pub const ROW_COLLAPSE: Duration = Duration::from_millis(200);

/// Rendered presentation of a scope row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowContent {
    pub id: Option<ScopeId>,
    pub value: String,
    pub description: String,
    pub icon: Option<String>,
    pub default_scope: bool,
    pub allow_dyn_reg: bool,
    pub structured: bool,
    /// Present only when the dynamic-registration indicator is shown
    pub dyn_reg_tooltip: Option<&'static str>,
}

/// Turns a record into its row presentation
pub type RowTemplate = fn(&ScopeRecord) -> RowContent;

/// Default row template
pub fn scope_row_template(record: &ScopeRecord) -> RowContent {
    RowContent {
        id: record.id,
        value: record.value.clone(),
        description: record.description.clone().unwrap_or_default(),
        icon: record.icon_name().map(str::to_string),
        default_scope: record.default_scope,
        allow_dyn_reg: record.allow_dyn_reg,
        structured: record.structured,
        dyn_reg_tooltip: record.allow_dyn_reg.then_some(DYN_REG_TOOLTIP),
    }
}

/// Opacity and height factor of a row being removed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RemovalFrame {
    pub opacity: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowPhase {
    Shown,
    Deleting(Ticket),
    Removing(Instant),
    Removed,
}

/// Table row bound to one scope for its whole lifetime.
///
/// The row re-renders itself whenever the bound model changes; the
/// subscription ends when the row is dropped.
pub struct ScopeRowView {
    model: Rc<ScopeModel>,
    content: Rc<RefCell<RowContent>>,
    renders: Rc<Cell<usize>>,
    phase: RowPhase,
    _subscription: Subscription,
}

impl ScopeRowView {
    pub fn new(model: Rc<ScopeModel>) -> Self {
        Self::with_template(model, scope_row_template)
    }

    pub fn with_template(model: Rc<ScopeModel>, template: RowTemplate) -> Self {
        let content = Rc::new(RefCell::new(model.with(template)));
        let renders = Rc::new(Cell::new(1));

        let weak = Rc::downgrade(&model);
        let sink = content.clone();
        let counter = renders.clone();
        let subscription = model.observe(move || {
            if let Some(model) = weak.upgrade() {
                *sink.borrow_mut() = model.with(template);
                counter.set(counter.get() + 1);
            }
        });

        Self {
            model,
            content,
            renders,
            phase: RowPhase::Shown,
            _subscription: subscription,
        }
    }

    pub fn model(&self) -> &Rc<ScopeModel> {
        &self.model
    }

    pub fn id(&self) -> Option<ScopeId> {
        self.model.id()
    }

    /// Current row presentation
    pub fn content(&self) -> Ref<'_, RowContent> {
        self.content.borrow()
    }

    /// How many times the row has been rendered, the initial render included
    pub fn render_count(&self) -> usize {
        self.renders.get()
    }

    /// Route of the edit form for this scope
    pub fn edit(&self) -> Option<Route> {
        self.id().map(Route::Edit)
    }

    /// Issue the remote delete after the user confirmed it
    pub fn confirm_delete(&mut self, dispatcher: &Dispatcher) -> Option<Ticket> {
        if self.phase != RowPhase::Shown {
            return None;
        }
        let id = self.id()?;
        let ticket = dispatcher.submit(Origin::RowDelete(id), Request::Delete(id));
        self.phase = RowPhase::Deleting(ticket);
        Some(ticket)
    }

    pub fn pending_delete(&self) -> Option<Ticket> {
        match self.phase {
            RowPhase::Deleting(ticket) => Some(ticket),
            _ => None,
        }
    }

    /// Start the removal animation
    pub fn on_delete_succeeded(&mut self, now: Instant) {
        debug!("Removing row for scope {:?}", self.id());
        self.phase = RowPhase::Removing(now);
    }

    /// The row stays as it was
    pub fn on_delete_failed(&mut self) {
        self.phase = RowPhase::Shown;
    }

    /// Advance the removal animation; true once the row has just finished it
    pub fn tick(&mut self, now: Instant) -> bool {
        if let RowPhase::Removing(started) = self.phase {
            if now.saturating_duration_since(started) >= ROW_FADE + ROW_COLLAPSE {
                self.phase = RowPhase::Removed;
                return true;
            }
        }
        false
    }

    /// Animation frame while the row is being removed
    pub fn removal_frame(&self, now: Instant) -> Option<RemovalFrame> {
        let RowPhase::Removing(started) = self.phase else {
            return None;
        };
        let elapsed = now.saturating_duration_since(started);
        let frame = if elapsed < ROW_FADE {
            RemovalFrame {
                opacity: 1.0 - elapsed.as_secs_f32() / ROW_FADE.as_secs_f32(),
                height: 1.0,
            }
        } else {
            let collapse = (elapsed - ROW_FADE).as_secs_f32() / ROW_COLLAPSE.as_secs_f32();
            RemovalFrame {
                opacity: 0.0,
                height: (1.0 - collapse).max(0.0),
            }
        };
        Some(frame)
    }

    pub fn is_removing(&self) -> bool {
        matches!(self.phase, RowPhase::Removing(_))
    }

    pub fn is_removed(&self) -> bool {
        self.phase == RowPhase::Removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(value: &str, allow_dyn_reg: bool) -> Rc<ScopeModel> {
        ScopeModel::new(ScopeRecord {
            id: Some(4),
            value: value.to_string(),
            allow_dyn_reg,
            ..ScopeRecord::default()
        })
    }

    #[test]
    fn test_initial_render() {
        let row = ScopeRowView::new(model("email", true));
        let content = row.content();
        assert_eq!(content.value, "email");
        assert_eq!(content.dyn_reg_tooltip, Some(DYN_REG_TOOLTIP));
        assert_eq!(row.render_count(), 1);
    }

    #[test]
    fn test_rerenders_on_model_change() {
        let scope = model("email", false);
        let row = ScopeRowView::new(scope.clone());

        let mut changed = scope.snapshot();
        changed.description = Some("Your email address".to_string());
        changed.allow_dyn_reg = true;
        scope.set(changed);

        assert_eq!(row.render_count(), 2);
        assert_eq!(row.content().description, "Your email address");
        assert!(row.content().dyn_reg_tooltip.is_some());
    }

    #[test]
    fn test_drop_releases_observer() {
        let scope = model("email", false);
        let row = ScopeRowView::new(scope.clone());
        assert_eq!(scope.observer_count(), 1);
        drop(row);
        assert_eq!(scope.observer_count(), 0);
    }

    #[test]
    fn test_edit_route() {
        let row = ScopeRowView::new(model("email", false));
        assert_eq!(row.edit(), Some(Route::Edit(4)));
    }

    #[test]
    fn test_removal_animation() {
        let mut row = ScopeRowView::new(model("email", false));
        let start = Instant::now();
        row.on_delete_succeeded(start);

        let fading = row.removal_frame(start + ROW_FADE / 2).unwrap();
        assert!(fading.opacity > 0.0 && fading.opacity < 1.0);
        assert_eq!(fading.height, 1.0);

        let collapsing = row.removal_frame(start + ROW_FADE + ROW_COLLAPSE / 2).unwrap();
        assert_eq!(collapsing.opacity, 0.0);
        assert!(collapsing.height < 1.0);

        assert!(!row.tick(start + ROW_FADE));
        assert!(row.tick(start + ROW_FADE + ROW_COLLAPSE));
        assert!(row.is_removed());
        assert!(!row.tick(start + ROW_FADE + ROW_COLLAPSE * 2));
    }
}
