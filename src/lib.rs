//! scope-admin - manage the system scopes of an OpenID Connect server
//!
//! System scopes are the scope strings (`openid`, `email`, `read_profile`, ...)
//! that clients of the authorization server may request. This crate talks to
//! the server's `api/scopes` REST endpoint and offers two front ends:
//!
//! 1. **GUI (Primary)**: an egui admin screen with a scope table, a
//!    create/edit form, an icon picker and delete confirmation.
//!
//! 2. **CLI**: `list`, `show`, `create` and `delete` for scripting.
//!
//! The layers, bottom up: `api` (REST client and request thread), `store`
//! (shared observable scope models), `views` (toolkit independent screen
//! state) and `gui` (egui rendering).

pub mod api;
pub mod config;
pub mod domain;
pub mod gui;
pub mod store;
pub mod views;

pub use domain::*;
