//! Mailing-list subscription view-model: loads the user's subscriptions,
//! tracks checkbox toggles and submits the full preference map.

use std::{sync::Arc, time::Duration};

use shared::{
    domain::{Catalog, MailingListKey},
    error::ApiError,
    protocol::{
        NotificationPreferences, NotificationSettingsResponse, NOTIFICATION_SETTINGS_PATH,
        NOTIFICATION_SETTINGS_UPDATE_PATH,
    },
};
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

use crate::{
    i18n::{MSG_FETCH_FAILED, MSG_REPORT_TO, MSG_SETTINGS_UPDATED, MSG_SUBMIT_FAILED},
    panel::CheckboxState,
    Collaborators, HttpError, MessageClass, NotificationsError, Observable, StatusMessage,
    UnknownMailingList, FLASH_TIMEOUT,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Updated,
    /// The server answered `not_subscribed`; nothing is shown to the user.
    NotSubscribed,
}

pub struct NotificationsViewModel {
    catalog: Catalog,
    subscribed: Observable<Vec<MailingListKey>>,
    status: Observable<StatusMessage>,
    collaborators: Collaborators,
}

impl NotificationsViewModel {
    pub fn new(catalog: Catalog, collaborators: Collaborators) -> Arc<Self> {
        Arc::new(Self {
            catalog,
            subscribed: Observable::new(Vec::new()),
            status: Observable::new(StatusMessage::default()),
            collaborators,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn subscribed(&self) -> Vec<MailingListKey> {
        self.subscribed.get()
    }

    pub fn subscribed_observable(&self) -> &Observable<Vec<MailingListKey>> {
        &self.subscribed
    }

    pub fn status(&self) -> StatusMessage {
        self.status.get()
    }

    pub fn status_observable(&self) -> &Observable<StatusMessage> {
        &self.status
    }

    pub fn is_subscribed(&self, key: &str) -> bool {
        self.subscribed
            .with(|subscribed| subscribed.iter().any(|k| k.as_str() == key))
    }

    /// One entry per catalog key, in catalog order.
    pub fn checkboxes(&self) -> Vec<CheckboxState> {
        self.subscribed.with(|subscribed| {
            self.catalog
                .iter()
                .map(|key| CheckboxState {
                    key: key.clone(),
                    checked: subscribed.contains(key),
                })
                .collect()
        })
    }

    /// Checkbox write-back. Checking appends to the end of the subscribed
    /// list, unchecking removes. Returns whether anything changed.
    pub fn set_subscribed(&self, key: &str, checked: bool) -> Result<bool, UnknownMailingList> {
        let key = self
            .catalog
            .get(key)
            .cloned()
            .ok_or_else(|| UnknownMailingList {
                key: key.to_string(),
            })?;

        Ok(self.subscribed.update(|subscribed| {
            let position = subscribed.iter().position(|k| *k == key);
            match (checked, position) {
                (true, None) => {
                    subscribed.push(key);
                    true
                }
                (false, Some(index)) => {
                    subscribed.remove(index);
                    true
                }
                _ => false,
            }
        }))
    }

    pub async fn load(&self) -> Result<(), NotificationsError> {
        let response = match self.fetch_settings().await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "notifications: could not retrieve settings");
                let message = self.collaborators.localizer.translate(MSG_FETCH_FAILED);
                self.change_message(message, Some(MessageClass::Danger), Some(FLASH_TIMEOUT));
                return Err(NotificationsError::FetchFailed(err));
            }
        };

        let catalog = &self.catalog;
        self.subscribed.update(|subscribed| {
            let mut changed = false;
            for key in catalog.iter() {
                if response.is_subscribed(key.as_str()) && !subscribed.contains(key) {
                    subscribed.push(key.clone());
                    changed = true;
                }
            }
            changed
        });

        let ignored = response
            .mailing_lists
            .keys()
            .filter(|key| !catalog.contains(key.as_str()))
            .count();
        info!(
            subscribed = self.subscribed.with(Vec::len),
            ignored, "notifications: loaded mailing list subscriptions"
        );
        Ok(())
    }

    async fn fetch_settings(&self) -> Result<NotificationSettingsResponse, HttpError> {
        let body = self
            .collaborators
            .http
            .get_json(NOTIFICATION_SETTINGS_PATH)
            .await?;
        serde_json::from_value(body).map_err(|e| HttpError::Decode(e.to_string()))
    }

    /// Shows `text` right away. With a timeout, a reset to the empty message
    /// is scheduled; earlier resets are not cancelled and may clear a newer
    /// message.
    pub fn change_message(
        &self,
        text: impl Into<String>,
        class: Option<MessageClass>,
        timeout: Option<Duration>,
    ) {
        self.status
            .set(StatusMessage::new(text, class.unwrap_or_default()));

        // A zero timeout means no auto-clear.
        let Some(timeout) = timeout.filter(|t| !t.is_zero()) else {
            return;
        };
        let Ok(handle) = Handle::try_current() else {
            warn!("notifications: no async runtime, status message will not auto-clear");
            return;
        };
        let status = self.status.clone();
        handle.spawn(async move {
            tokio::time::sleep(timeout).await;
            status.set(StatusMessage::default());
        });
    }

    pub fn preferences(&self) -> NotificationPreferences {
        self.subscribed
            .with(|subscribed| NotificationPreferences::from_subscribed(&self.catalog, subscribed))
    }

    pub async fn submit(&self) -> Result<SubmitOutcome, NotificationsError> {
        let payload = self.preferences().to_json();
        let result = self
            .collaborators
            .http
            .post_json(NOTIFICATION_SETTINGS_UPDATE_PATH, &payload)
            .await;

        match result {
            Ok(()) => {
                info!("notifications: settings updated");
                let message = self.collaborators.localizer.translate(MSG_SETTINGS_UPDATED);
                self.change_message(message, Some(MessageClass::Success), Some(FLASH_TIMEOUT));
                Ok(SubmitOutcome::Updated)
            }
            Err(err) => {
                let api_error = err.api_error();
                if api_error.as_ref().is_some_and(ApiError::is_not_subscribed) {
                    debug!("notifications: server reported not_subscribed, nothing to show");
                    return Ok(SubmitOutcome::NotSubscribed);
                }

                warn!(error = %err, "notifications: could not update settings");
                let localizer = &self.collaborators.localizer;
                let support_link = self.collaborators.support_link.support_link();
                let message = format!(
                    "{}{}",
                    localizer.translate(MSG_SUBMIT_FAILED),
                    localizer.format(MSG_REPORT_TO, &[support_link.as_str()])
                );
                self.change_message(message, Some(MessageClass::Danger), Some(FLASH_TIMEOUT));
                Err(NotificationsError::SubmitFailed {
                    error_type: api_error.map(|e| e.error_type),
                    source: err,
                })
            }
        }
    }
}
