//! View state for the scope admin screens.
//!
//! Everything here is toolkit independent: the `gui` module draws these
//! views with egui and feeds user input back as [`AdminAction`]s.

mod admin;
mod alert;
mod form;
mod icons;
mod list;
mod loading;
mod route;
mod row;

pub use admin::{AdminAction, ScopeAdmin};
pub use alert::RemoteAlert;
pub use form::{SaveOutcome, SaveResult, ScopeFormFields, ScopeFormView, apply_saved};
pub use icons::{ICON_NAMES, ICONS_PER_ROW, icon_rows, is_known_icon};
pub use list::{Continuation, SCOPES_LABEL, ScopeListView, TableVisibility};
pub use loading::{LOADING_LINGER, LoadingIndicator, LoadingLabel};
pub use route::Route;
pub use row::{
    DELETE_CONFIRMATION, DYN_REG_TOOLTIP, ROW_COLLAPSE, ROW_FADE, RemovalFrame, RowContent,
    RowTemplate, ScopeRowView, scope_row_template,
};
