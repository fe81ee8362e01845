use serde::{ser::SerializeMap, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::domain::{Catalog, MailingListKey};

pub const NOTIFICATION_SETTINGS_PATH: &str = "/api/v1/settings/notifications";
/// The update endpoint is registered with a trailing slash.
pub const NOTIFICATION_SETTINGS_UPDATE_PATH: &str = "/api/v1/settings/notifications/";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationSettingsResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub mailing_lists: Map<String, Value>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Map<String, Value>, D::Error> {
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

impl NotificationSettingsResponse {
    /// Keys the server did not mention are treated as not subscribed.
    pub fn is_subscribed(&self, key: &str) -> bool {
        self.mailing_lists.get(key).is_some_and(is_truthy)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Full preference map sent on submit: one entry per catalog key, in catalog
/// order, whether or not the key changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationPreferences {
    entries: Vec<(MailingListKey, bool)>,
}

impl NotificationPreferences {
    pub fn from_subscribed(catalog: &Catalog, subscribed: &[MailingListKey]) -> Self {
        let entries = catalog
            .iter()
            .map(|key| (key.clone(), subscribed.contains(key)))
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[(MailingListKey, bool)] {
        &self.entries
    }

    pub fn get(&self, key: &str) -> Option<bool> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, subscribed)| *subscribed)
    }

    /// Object keys keep catalog order (`serde_json` is built with
    /// `preserve_order`).
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.entries
                .iter()
                .map(|(key, subscribed)| (key.0.clone(), Value::Bool(*subscribed)))
                .collect(),
        )
    }
}

impl Serialize for NotificationPreferences {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, subscribed) in &self.entries {
            map.serialize_entry(key.as_str(), subscribed)?;
        }
        map.end()
    }
}
