//! Message lookup and gettext/sprintf-style formatting.

use std::{collections::HashMap, fs, path::Path};

use thiserror::Error;

pub const MSG_FETCH_FAILED: &str = "Could not retrieve settings information.";
pub const MSG_SETTINGS_UPDATED: &str = "Settings updated.";
pub const MSG_SUBMIT_FAILED: &str =
    "Could not update email preferences at this time. If this issue persists, ";
pub const MSG_REPORT_TO: &str = "please report it to %1$s.";

pub trait Localizer: Send + Sync {
    fn translate(&self, msgid: &str) -> String;

    fn format(&self, msgid: &str, args: &[&str]) -> String {
        format_positional(&self.translate(msgid), args)
    }
}

/// Message ids are the English text, so returning them unchanged is the
/// English locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughLocalizer;

impl Localizer for PassthroughLocalizer {
    fn translate(&self, msgid: &str) -> String {
        msgid.to_string()
    }
}

#[derive(Debug, Error)]
pub enum TranslationLoadError {
    #[error("failed to read translations from {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid translations file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Message id → translation. Missing ids fall back to the id itself.
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    messages: HashMap<String, String>,
}

impl TranslationTable {
    pub fn new(messages: HashMap<String, String>) -> Self {
        Self { messages }
    }

    /// Top-level string keys, e.g. `"Settings updated." = "設定を更新しました。"`.
    pub fn from_toml_str(raw: &str) -> Result<Self, TranslationLoadError> {
        let messages = toml::from_str::<HashMap<String, String>>(raw)?;
        Ok(Self { messages })
    }

    pub fn from_file(path: &Path) -> Result<Self, TranslationLoadError> {
        let raw = fs::read_to_string(path).map_err(|source| TranslationLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Localizer for TranslationTable {
    fn translate(&self, msgid: &str) -> String {
        self.messages
            .get(msgid)
            .cloned()
            .unwrap_or_else(|| msgid.to_string())
    }
}

/// Substitutes `%N$s` (1-based), sequential `%s` and `%%`. Placeholders without
/// a matching argument are left as written.
pub fn format_positional(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut next_sequential = 0;
    let mut rest = template;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let directive = &rest[pos + 1..];

        if let Some(after) = directive.strip_prefix('%') {
            out.push('%');
            rest = after;
            continue;
        }
        if let Some(after) = directive.strip_prefix('s') {
            match args.get(next_sequential) {
                Some(arg) => out.push_str(arg),
                None => out.push_str("%s"),
            }
            next_sequential += 1;
            rest = after;
            continue;
        }

        let digits = directive.bytes().take_while(u8::is_ascii_digit).count();
        if digits > 0 && directive[digits..].starts_with("$s") {
            let literal = &rest[pos..pos + 1 + digits + 2];
            let arg = directive[..digits]
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|index| args.get(index));
            match arg {
                Some(arg) => out.push_str(arg),
                None => out.push_str(literal),
            }
            rest = &directive[digits + 2..];
            continue;
        }

        out.push('%');
        rest = directive;
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_arguments_are_substituted() {
        assert_eq!(
            format_positional(MSG_REPORT_TO, &["support@osf.io"]),
            "please report it to support@osf.io."
        );
        assert_eq!(format_positional("%2$s then %1$s", &["a", "b"]), "b then a");
    }

    #[test]
    fn sequential_and_escaped_placeholders() {
        assert_eq!(format_positional("%s and %s, 100%%", &["x", "y"]), "x and y, 100%");
    }

    #[test]
    fn unmatched_placeholders_are_kept() {
        assert_eq!(format_positional("%3$s / %s / %d", &[]), "%3$s / %s / %d");
        assert_eq!(format_positional("trailing %", &[]), "trailing %");
    }

    #[test]
    fn translation_table_falls_back_to_msgid() {
        let table = TranslationTable::from_toml_str(
            r#""Settings updated." = "設定を更新しました。"
"please report it to %1$s." = "%1$s までご報告ください。"
"#,
        )
        .expect("parse");
        assert_eq!(table.len(), 2);
        assert_eq!(table.translate(MSG_SETTINGS_UPDATED), "設定を更新しました。");
        assert_eq!(table.translate(MSG_FETCH_FAILED), MSG_FETCH_FAILED);
        assert_eq!(
            table.format(MSG_REPORT_TO, &["help@example.org"]),
            "help@example.org までご報告ください。"
        );
    }

    #[test]
    fn translation_table_rejects_non_string_values() {
        assert!(TranslationTable::from_toml_str("answer = 42").is_err());
    }
}
