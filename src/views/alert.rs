use tracing::warn;

use crate::api::ApiError;

/// Contents of the blocking error dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteAlert {
    /// Short error code, shown as the dialog header
    pub title: String,
    /// Human-readable description, shown as the dialog body
    pub body: String,
}

impl RemoteAlert {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Report a failed remote operation.
    ///
    /// Server-provided `error` / `error_description` are shown verbatim; any
    /// other failure gets a generic code and whatever text is available.
    pub fn from_error(err: &ApiError) -> Self {
        warn!("Remote operation failed: {}", err);
        match err {
            ApiError::Remote {
                error, description, ..
            } => Self::new(error, description),
            ApiError::MalformedErrorBody { status, body } => {
                let body = if body.is_empty() {
                    format!("The server answered with HTTP {} and no details.", status)
                } else {
                    body.clone()
                };
                Self::new(format!("http_{}", status), body)
            }
            ApiError::Transport(reason) => Self::new("connection_error", reason),
            ApiError::Decode(reason) => Self::new("invalid_response", reason),
        }
    }
}
