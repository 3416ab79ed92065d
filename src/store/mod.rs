//! Client-side scope collection mirroring `api/scopes`.
//!
//! The store keeps one [`ScopeModel`] per server scope, in server order, and
//! remembers whether it has been populated this session so views can reuse it
//! instead of fetching again.

mod model;
mod subset;

pub use model::{ScopeModel, Subscription};
pub use subset::ScopeSubset;

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info};

use crate::api::{Dispatcher, Origin, Request, Ticket};
use crate::domain::{ScopeId, ScopeRecord};

/// Store handle passed to every view that needs it
pub type SharedStore = Rc<RefCell<ScopeStore>>;

/// Outcome of [`ScopeStore::fetch_if_needed`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    /// Already populated, nothing was sent
    Ready,
    /// Waiting on this fetch
    Pending(Ticket),
}

/// Error type for value lookups
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("No scope with value '{0}'")]
    NotFound(String),

    #[error("{count} scopes share the value '{value}'")]
    Ambiguous { value: String, count: usize },
}

/// Ordered collection of scopes, unique by id
#[derive(Debug, Default)]
pub struct ScopeStore {
    models: Vec<Rc<ScopeModel>>,
    fetched: bool,
    in_flight: Option<Ticket>,
}

impl ScopeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a store in the shared handle the views expect
    pub fn shared(self) -> SharedStore {
        Rc::new(RefCell::new(self))
    }

    /// A store that counts as fetched, holding the given records
    pub fn from_records(records: Vec<ScopeRecord>) -> Self {
        let mut store = Self::new();
        store.merge(records);
        store.fetched = true;
        store
    }

    /// Whether a fetch has completed this session
    pub fn is_fetched(&self) -> bool {
        self.fetched
    }

    pub fn fetch_in_flight(&self) -> Option<Ticket> {
        self.in_flight
    }

    /// Fetch the collection unless it was already fetched.
    ///
    /// A call while a fetch is outstanding joins that fetch.
    pub fn fetch_if_needed(&mut self, dispatcher: &Dispatcher) -> FetchStatus {
        if self.fetched {
            return FetchStatus::Ready;
        }
        if let Some(ticket) = self.in_flight {
            return FetchStatus::Pending(ticket);
        }
        FetchStatus::Pending(self.refresh(dispatcher))
    }

    /// Always fetch the full collection
    pub fn refresh(&mut self, dispatcher: &Dispatcher) -> Ticket {
        let ticket = dispatcher.submit(Origin::StoreFetch, Request::FetchAll);
        self.in_flight = Some(ticket);
        ticket
    }

    /// Apply a fetch result and mark the store fetched
    pub fn apply_fetch(&mut self, ticket: Ticket, records: Vec<ScopeRecord>) {
        if self.in_flight == Some(ticket) {
            self.in_flight = None;
        }
        info!("Fetched {} scopes", records.len());
        self.merge(records);
        self.fetched = true;
    }

    /// Forget a failed fetch; the next `fetch_if_needed` tries again
    pub fn fetch_failed(&mut self, ticket: Ticket) {
        if self.in_flight == Some(ticket) {
            self.in_flight = None;
        }
    }

    /// Adopt the server's list: known ids keep their model (and observers),
    /// new ids get a fresh model, ids no longer present are dropped.
    fn merge(&mut self, records: Vec<ScopeRecord>) {
        let mut merged: Vec<Rc<ScopeModel>> = Vec::with_capacity(records.len());
        for record in records {
            match record.id {
                Some(id) if merged.iter().any(|m| m.id() == Some(id)) => {
                    debug!("Ignoring duplicate scope id {}", id);
                }
                Some(id) => match self.get(id) {
                    Some(existing) => {
                        existing.set(record);
                        merged.push(existing);
                    }
                    None => merged.push(ScopeModel::new(record)),
                },
                None => merged.push(ScopeModel::new(record)),
            }
        }
        self.models = merged;
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rc<ScopeModel>> {
        self.models.iter()
    }

    pub fn get(&self, id: ScopeId) -> Option<Rc<ScopeModel>> {
        self.models.iter().find(|m| m.id() == Some(id)).cloned()
    }

    /// Whether this exact model is in the store
    pub fn contains(&self, model: &Rc<ScopeModel>) -> bool {
        self.models.iter().any(|m| Rc::ptr_eq(m, model))
    }

    /// Append a model unless it, or another model with its id, is present.
    ///
    /// Returns whether the model was added.
    pub fn add(&mut self, model: Rc<ScopeModel>) -> bool {
        if self.contains(&model) {
            return false;
        }
        if let Some(id) = model.id() {
            if self.get(id).is_some() {
                return false;
            }
        }
        self.models.push(model);
        true
    }

    pub fn remove(&mut self, id: ScopeId) -> Option<Rc<ScopeModel>> {
        let index = self.models.iter().position(|m| m.id() == Some(id))?;
        Some(self.models.remove(index))
    }

    /// The single scope with this value
    pub fn find_by_value(&self, value: &str) -> Result<Rc<ScopeModel>, LookupError> {
        let mut matches = self
            .models
            .iter()
            .filter(|m| m.with(|record| record.value == value));

        let first = matches
            .next()
            .ok_or_else(|| LookupError::NotFound(value.to_string()))?;
        let extra = matches.count();
        if extra > 0 {
            return Err(LookupError::Ambiguous {
                value: value.to_string(),
                count: extra + 1,
            });
        }
        Ok(first.clone())
    }

    /// Scopes granted to clients by default
    pub fn default_subset(&self) -> ScopeSubset {
        self.filter(|record| record.default_scope)
    }

    /// Scopes dynamically registered clients may request
    pub fn dyn_reg_subset(&self) -> ScopeSubset {
        self.filter(|record| record.allow_dyn_reg)
    }

    /// Default scopes that dynamically registered clients may also request
    pub fn default_dyn_reg_subset(&self) -> ScopeSubset {
        self.filter(|record| record.default_scope && record.allow_dyn_reg)
    }

    fn filter(&self, keep: impl Fn(&ScopeRecord) -> bool) -> ScopeSubset {
        ScopeSubset::new(
            self.models
                .iter()
                .filter(|m| m.with(&keep))
                .cloned()
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope(id: ScopeId, value: &str, default_scope: bool, allow_dyn_reg: bool) -> ScopeRecord {
        ScopeRecord {
            id: Some(id),
            value: value.to_string(),
            default_scope,
            allow_dyn_reg,
            ..ScopeRecord::default()
        }
    }

    fn sample_store() -> ScopeStore {
        ScopeStore::from_records(vec![
            scope(1, "openid", true, true),
            scope(2, "profile", true, false),
            scope(3, "email", false, true),
            scope(4, "offline_access", false, false),
        ])
    }

    #[test]
    fn test_default_subset() {
        let store = sample_store();
        let subset = store.default_subset();
        assert_eq!(subset.values(), vec!["openid", "profile"]);
        assert!(subset.len() <= store.len());
    }

    #[test]
    fn test_dyn_reg_subsets() {
        let store = sample_store();
        assert_eq!(store.dyn_reg_subset().values(), vec!["openid", "email"]);
        assert_eq!(store.default_dyn_reg_subset().values(), vec!["openid"]);
    }

    #[test]
    fn test_subset_shares_identity() {
        let store = sample_store();
        let openid = store.get(1).unwrap();
        let subset = store.default_subset();
        assert!(subset.contains(&openid));

        // A change through the store is visible through the subset
        let mut changed = openid.snapshot();
        changed.description = Some("Log in".to_string());
        openid.set(changed);
        let seen = subset.iter().next().unwrap().snapshot();
        assert_eq!(seen.description.as_deref(), Some("Log in"));
    }

    #[test]
    fn test_find_by_value() {
        let store = sample_store();
        assert_eq!(store.find_by_value("email").unwrap().id(), Some(3));
        assert_eq!(
            store.find_by_value("phone").unwrap_err(),
            LookupError::NotFound("phone".to_string())
        );
    }

    #[test]
    fn test_find_by_value_ambiguous() {
        let store = ScopeStore::from_records(vec![
            scope(1, "email", false, false),
            scope(2, "email", true, false),
        ]);
        assert_eq!(
            store.find_by_value("email").unwrap_err(),
            LookupError::Ambiguous {
                value: "email".to_string(),
                count: 2
            }
        );
    }

    #[test]
    fn test_merge_keeps_models_and_adopts_server_order() {
        let mut store = sample_store();
        let email = store.get(3).unwrap();

        store.merge(vec![scope(3, "email", true, true), scope(5, "phone", false, false)]);

        assert_eq!(store.len(), 2);
        assert!(Rc::ptr_eq(&store.get(3).unwrap(), &email));
        assert!(email.snapshot().default_scope);
        assert!(store.get(1).is_none());
        assert_eq!(store.get(5).unwrap().value(), "phone");
    }

    #[test]
    fn test_merge_ignores_duplicate_ids() {
        let store = ScopeStore::from_records(vec![
            scope(1, "openid", false, false),
            scope(1, "openid-dup", false, false),
        ]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(1).unwrap().value(), "openid");
    }

    #[test]
    fn test_add_is_unique_by_id() {
        let mut store = sample_store();
        assert!(!store.add(ScopeModel::new(scope(2, "profile", true, false))));
        assert!(store.add(ScopeModel::new(scope(9, "phone", false, false))));
        let phone = store.get(9).unwrap();
        assert!(!store.add(phone));
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn test_remove() {
        let mut store = sample_store();
        let removed = store.remove(2).unwrap();
        assert_eq!(removed.value(), "profile");
        assert!(store.remove(2).is_none());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_new_store_is_not_fetched() {
        let store = ScopeStore::new();
        assert!(!store.is_fetched());
        assert!(store.is_empty());
        assert!(ScopeStore::from_records(Vec::new()).is_fetched());
    }
}
