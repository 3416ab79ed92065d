//! Shared test utilities: an in-memory scope server and admin setup

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use scope_admin::api::{ApiError, Dispatcher, ScopeApi};
use scope_admin::store::ScopeStore;
use scope_admin::views::{LOADING_LINGER, Route, ScopeAdmin};
use scope_admin::{ScopeId, ScopeRecord};

/// Upper bound for one request to come back from the worker thread
pub const WAIT: Duration = Duration::from_secs(5);

/// One call the mock received
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Get(ScopeId),
    Create(ScopeRecord),
    Update(ScopeId, ScopeRecord),
    Delete(ScopeId),
}

#[derive(Default)]
struct MockState {
    scopes: Vec<ScopeRecord>,
    next_id: ScopeId,
    calls: Vec<Call>,
    failures: VecDeque<ApiError>,
}

/// In-memory stand-in for the `api/scopes` endpoint
#[derive(Clone, Default)]
pub struct MockApi {
    state: Arc<Mutex<MockState>>,
}

impl MockApi {
    /// Server that already holds `scopes`, assigning ids 1, 2, ... in order
    pub fn with_scopes(values: &[&str]) -> Self {
        let api = Self::default();
        {
            let mut state = api.state.lock().unwrap();
            for value in values {
                state.next_id += 1;
                let id = state.next_id;
                state.scopes.push(ScopeRecord {
                    id: Some(id),
                    ..ScopeRecord::new(*value)
                });
            }
        }
        api
    }

    /// Make the next call fail with `err`; repeated calls fail later calls in turn
    pub fn fail_next(&self, err: ApiError) {
        self.state.lock().unwrap().failures.push_back(err);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn scopes(&self) -> Vec<ScopeRecord> {
        self.state.lock().unwrap().scopes.clone()
    }

    fn record(&self, call: Call) -> Result<std::sync::MutexGuard<'_, MockState>, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        match state.failures.pop_front() {
            Some(err) => Err(err),
            None => Ok(state),
        }
    }
}

fn not_found(id: ScopeId) -> ApiError {
    ApiError::Remote {
        status: 404,
        error: "not_found".to_string(),
        description: format!("Could not find scope {}", id),
    }
}

impl ScopeApi for MockApi {
    fn list(&self) -> Result<Vec<ScopeRecord>, ApiError> {
        let state = self.record(Call::List)?;
        Ok(state.scopes.clone())
    }

    fn get(&self, id: ScopeId) -> Result<ScopeRecord, ApiError> {
        let state = self.record(Call::Get(id))?;
        state
            .scopes
            .iter()
            .find(|s| s.id == Some(id))
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    fn create(&self, scope: &ScopeRecord) -> Result<ScopeRecord, ApiError> {
        let mut state = self.record(Call::Create(scope.clone()))?;
        state.next_id += 1;
        let saved = ScopeRecord {
            id: Some(state.next_id),
            ..scope.clone()
        };
        state.scopes.push(saved.clone());
        Ok(saved)
    }

    fn update(&self, id: ScopeId, scope: &ScopeRecord) -> Result<ScopeRecord, ApiError> {
        let mut state = self.record(Call::Update(id, scope.clone()))?;
        let slot = state
            .scopes
            .iter_mut()
            .find(|s| s.id == Some(id))
            .ok_or_else(|| not_found(id))?;
        *slot = scope.clone();
        Ok(slot.clone())
    }

    fn delete(&self, id: ScopeId) -> Result<(), ApiError> {
        let mut state = self.record(Call::Delete(id))?;
        let before = state.scopes.len();
        state.scopes.retain(|s| s.id != Some(id));
        if state.scopes.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }
}

/// Admin wired to `api` with an empty store, not yet navigated anywhere
pub fn admin_for(api: &MockApi) -> ScopeAdmin {
    let dispatcher = Dispatcher::spawn(Arc::new(api.clone()));
    ScopeAdmin::new(ScopeStore::new().shared(), dispatcher)
}

/// Admin showing the scope list, with the initial fetch finished and the
/// loading sheet gone
pub fn admin_on_list(api: &MockApi) -> ScopeAdmin {
    let mut admin = admin_for(api);
    admin.navigate(Route::List);
    admin.pump_blocking(WAIT);
    admin.tick(Instant::now() + LOADING_LINGER);
    admin
}
