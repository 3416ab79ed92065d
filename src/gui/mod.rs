//! GUI module for the scope admin
//!
//! Draws the toolkit independent views from `crate::views` with egui and
//! turns clicks into `AdminAction`s.

mod animations;
mod app;
mod dialogs;
mod scope_form;
mod scope_list;
pub mod runner;
pub mod theme;

pub use app::ScopeAdminApp;
pub use runner::run_gui;
