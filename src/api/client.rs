//! HTTP client for the authorization server's `api/scopes` endpoint.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::ApiError;
use crate::config::ServerSettings;
use crate::domain::{ScopeId, ScopeRecord};

/// Collection path relative to the server base URL
pub const SCOPES_PATH: &str = "api/scopes";

/// Operations on the remote scope collection.
///
/// Calls block; the GUI runs them on the dispatcher thread.
pub trait ScopeApi: Send + Sync {
    /// `GET api/scopes`
    fn list(&self) -> Result<Vec<ScopeRecord>, ApiError>;

    /// `GET api/scopes/{id}`
    fn get(&self, id: ScopeId) -> Result<ScopeRecord, ApiError>;

    /// `POST api/scopes`, returns the stored scope with its new id
    fn create(&self, scope: &ScopeRecord) -> Result<ScopeRecord, ApiError>;

    /// `PUT api/scopes/{id}`
    fn update(&self, id: ScopeId, scope: &ScopeRecord) -> Result<ScopeRecord, ApiError>;

    /// `DELETE api/scopes/{id}`
    fn delete(&self, id: ScopeId) -> Result<(), ApiError>;

    /// Create or update depending on whether the scope has an id
    fn save(&self, scope: &ScopeRecord) -> Result<ScopeRecord, ApiError> {
        match scope.id {
            Some(id) => self.update(id, scope),
            None => self.create(scope),
        }
    }
}

/// Blocking `ureq` implementation of [`ScopeApi`]
#[derive(Clone)]
pub struct ScopeClient {
    collection_url: String,
    access_token: Option<String>,
    agent: ureq::Agent,
}

impl ScopeClient {
    /// Create a client for the given server base URL with default timeouts
    pub fn new(base_url: &str) -> Self {
        Self::from_settings(&ServerSettings {
            base_url: base_url.to_string(),
            ..ServerSettings::default()
        })
    }

    /// Create a client from the `[server]` config section
    pub fn from_settings(settings: &ServerSettings) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(settings.connect_timeout_secs))
            .timeout_read(Duration::from_secs(settings.read_timeout_secs))
            .build();

        Self {
            collection_url: collection_url(&settings.base_url),
            access_token: settings
                .access_token
                .clone()
                .filter(|token| !token.trim().is_empty()),
            agent,
        }
    }

    /// Absolute URL of the scope collection
    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }

    fn item_url(&self, id: ScopeId) -> String {
        format!("{}/{}", self.collection_url, id)
    }

    fn request(&self, method: &str, url: &str) -> ureq::Request {
        debug!("{} {}", method, url);
        let request = self
            .agent
            .request(method, url)
            .set("Accept", "application/json");
        match &self.access_token {
            Some(token) => request.set("Authorization", &format!("Bearer {}", token)),
            None => request,
        }
    }
}

impl ScopeApi for ScopeClient {
    fn list(&self) -> Result<Vec<ScopeRecord>, ApiError> {
        let response = self.request("GET", &self.collection_url).call();
        decode(response)
    }

    fn get(&self, id: ScopeId) -> Result<ScopeRecord, ApiError> {
        let response = self.request("GET", &self.item_url(id)).call();
        decode(response)
    }

    fn create(&self, scope: &ScopeRecord) -> Result<ScopeRecord, ApiError> {
        let mut body = scope.clone();
        body.id = None;
        let response = self.request("POST", &self.collection_url).send_json(&body);
        decode(response)
    }

    fn update(&self, id: ScopeId, scope: &ScopeRecord) -> Result<ScopeRecord, ApiError> {
        let mut body = scope.clone();
        body.id = Some(id);
        let response = self.request("PUT", &self.item_url(id)).send_json(&body);
        decode(response)
    }

    fn delete(&self, id: ScopeId) -> Result<(), ApiError> {
        self.request("DELETE", &self.item_url(id))
            .call()
            .map(|_| ())
            .map_err(map_error)
    }
}

/// Join the base URL and the collection path with exactly one slash
pub fn collection_url(base_url: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), SCOPES_PATH)
}

fn decode<T: DeserializeOwned>(response: Result<ureq::Response, ureq::Error>) -> Result<T, ApiError> {
    let response = response.map_err(map_error)?;
    let body = response
        .into_string()
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn map_error(err: ureq::Error) -> ApiError {
    match err {
        ureq::Error::Status(status, response) => {
            let body = response.into_string().unwrap_or_default();
            ApiError::from_status_body(status, &body)
        }
        ureq::Error::Transport(transport) => ApiError::Transport(transport.to_string()),
    }
}
