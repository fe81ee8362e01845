use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a single mailing list, e.g. `osf_general`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MailingListKey(pub String);

impl MailingListKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MailingListKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MailingListKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for MailingListKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("mailing list key at position {index} is empty")]
    EmptyKey { index: usize },
}

/// Ordered, duplicate-free list of the mailing lists known to the client.
///
/// The order given at construction is the order checkboxes are rendered in
/// and the order subscriptions are loaded in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    keys: Vec<MailingListKey>,
}

impl Catalog {
    pub fn new<I, K>(keys: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = K>,
        K: Into<MailingListKey>,
    {
        let mut deduped: Vec<MailingListKey> = Vec::new();
        for (index, key) in keys.into_iter().enumerate() {
            let key = key.into();
            if key.as_str().trim().is_empty() {
                return Err(CatalogError::EmptyKey { index });
            }
            if !deduped.contains(&key) {
                deduped.push(key);
            }
        }
        Ok(Self { keys: deduped })
    }

    pub fn keys(&self) -> &[MailingListKey] {
        &self.keys
    }

    pub fn iter(&self) -> impl Iterator<Item = &MailingListKey> {
        self.keys.iter()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k.as_str() == key)
    }

    pub fn get(&self, key: &str) -> Option<&MailingListKey> {
        self.keys.iter().find(|k| k.as_str() == key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
