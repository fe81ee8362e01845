use serde_json::Value;
use shared::error::ApiError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum HttpError {
    #[error("invalid server url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server responded with status {status}")]
    Status { status: u16, body: Option<Value> },
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl HttpError {
    /// Structured error payload, when the server sent one.
    pub fn api_error(&self) -> Option<ApiError> {
        match self {
            HttpError::Status {
                body: Some(body), ..
            } => serde_json::from_value(body.clone()).ok(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for HttpError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            HttpError::Decode(value.to_string())
        } else {
            HttpError::Transport(value.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum NotificationsError {
    #[error("could not retrieve notification settings: {0}")]
    FetchFailed(#[source] HttpError),
    #[error("could not update notification settings: {source}")]
    SubmitFailed {
        error_type: Option<String>,
        #[source]
        source: HttpError,
    },
    #[error("notification settings task stopped: {0}")]
    TaskStopped(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("mailing list {key:?} is not in the catalog")]
pub struct UnknownMailingList {
    pub key: String,
}
