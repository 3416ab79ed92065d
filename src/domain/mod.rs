//! Core domain types for scope-admin

mod scope;

pub use scope::{ScopeId, ScopeRecord};
