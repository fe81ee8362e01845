use serde::{Deserialize, Serialize};

/// `error_type` the settings API reports when the user was never on the list
/// they are being removed from.
pub const NOT_SUBSCRIBED: &str = "not_subscribed";

/// Structured error body returned by the settings API on non-2xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub error_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_short: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_long: Option<String>,
}

impl ApiError {
    pub fn new(error_type: impl Into<String>) -> Self {
        Self {
            error_type: error_type.into(),
            message_short: None,
            message_long: None,
        }
    }

    pub fn with_messages(mut self, short: impl Into<String>, long: impl Into<String>) -> Self {
        self.message_short = Some(short.into());
        self.message_long = Some(long.into());
        self
    }

    pub fn is_not_subscribed(&self) -> bool {
        self.error_type == NOT_SUBSCRIBED
    }
}
