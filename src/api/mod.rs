//! REST access to the authorization server's scope collection

mod client;
mod dispatch;
mod error;

pub use client::{SCOPES_PATH, ScopeApi, ScopeClient, collection_url};
pub use dispatch::{Completion, Dispatcher, Origin, Reply, Request, Ticket, Waker};
pub use error::ApiError;
