use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

pub mod error;
pub mod flash;
pub mod i18n;
pub mod observable;
pub mod panel;
pub mod transport;
pub mod view_model;

pub use error::{HttpError, NotificationsError, UnknownMailingList};
pub use flash::{MessageClass, StatusMessage, FLASH_TIMEOUT};
pub use i18n::{Localizer, PassthroughLocalizer, TranslationTable};
pub use observable::Observable;
pub use panel::{CheckboxState, NotificationsPanel, NotificationsView};
pub use transport::ReqwestJsonClient;
pub use view_model::{NotificationsViewModel, SubmitOutcome};

pub const DEFAULT_SUPPORT_EMAIL: &str = "support@osf.io";

/// JSON over HTTP, relative to whatever server and session the implementation
/// is bound to.
#[async_trait]
pub trait JsonHttpClient: Send + Sync {
    async fn get_json(&self, path: &str) -> Result<Value, HttpError>;
    /// Any 2xx counts as success; the response body is ignored.
    async fn post_json(&self, path: &str, body: &Value) -> Result<(), HttpError>;
}

pub trait SupportLink: Send + Sync {
    fn support_link(&self) -> String;
}

/// Renders the support contact as an HTML `mailto:` anchor.
#[derive(Debug, Clone)]
pub struct MailtoSupportLink {
    address: String,
}

impl MailtoSupportLink {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

impl Default for MailtoSupportLink {
    fn default() -> Self {
        Self::new(DEFAULT_SUPPORT_EMAIL)
    }
}

impl SupportLink for MailtoSupportLink {
    fn support_link(&self) -> String {
        format!(
            "<a href=\"mailto:{address}\">{address}</a>",
            address = self.address
        )
    }
}

/// Support contact for views that cannot render markup.
#[derive(Debug, Clone)]
pub struct PlainSupportLink {
    address: String,
}

impl PlainSupportLink {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

impl SupportLink for PlainSupportLink {
    fn support_link(&self) -> String {
        self.address.clone()
    }
}

/// Everything the view-model talks to besides its own state.
#[derive(Clone)]
pub struct Collaborators {
    pub http: Arc<dyn JsonHttpClient>,
    pub localizer: Arc<dyn Localizer>,
    pub support_link: Arc<dyn SupportLink>,
}

impl Collaborators {
    pub fn new(http: Arc<dyn JsonHttpClient>) -> Self {
        Self {
            http,
            localizer: Arc::new(PassthroughLocalizer),
            support_link: Arc::new(MailtoSupportLink::default()),
        }
    }

    pub fn with_localizer(mut self, localizer: Arc<dyn Localizer>) -> Self {
        self.localizer = localizer;
        self
    }

    pub fn with_support_link(mut self, support_link: Arc<dyn SupportLink>) -> Self {
        self.support_link = support_link;
        self
    }
}

#[cfg(test)]
#[path = "tests/view_model_tests.rs"]
mod view_model_tests;

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod transport_tests;

#[cfg(test)]
#[path = "tests/panel_tests.rs"]
mod panel_tests;
