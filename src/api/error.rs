//! Errors raised by the scopes REST endpoint

use serde::Deserialize;

/// Longest slice of an unreadable error body kept for display
const MAX_RAW_BODY: usize = 512;

/// Error type for calls against `api/scopes`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Non-2xx response carrying the server's `error` / `error_description` pair
    #[error("{error}: {description}")]
    Remote {
        status: u16,
        error: String,
        description: String,
    },

    /// Non-2xx response whose body is not the JSON error object
    #[error("HTTP {status} with unreadable error body")]
    MalformedErrorBody { status: u16, body: String },

    /// The request never produced an HTTP response
    #[error("Request failed: {0}")]
    Transport(String),

    /// A 2xx response that could not be decoded
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
    error_description: String,
}

impl ApiError {
    /// Classify a non-2xx response body
    pub fn from_status_body(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => ApiError::Remote {
                status,
                error: parsed.error,
                description: parsed.error_description,
            },
            Err(_) => ApiError::MalformedErrorBody {
                status,
                body: truncate(body, MAX_RAW_BODY),
            },
        }
    }

    /// HTTP status, when the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Remote { status, .. } | ApiError::MalformedErrorBody { status, .. } => {
                Some(*status)
            }
            ApiError::Transport(_) | ApiError::Decode(_) => None,
        }
    }
}

fn truncate(body: &str, max: usize) -> String {
    let body = body.trim();
    if body.len() <= max {
        return body.to_string();
    }
    let mut end = max;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
