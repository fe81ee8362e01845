use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub catalog: Vec<String>,
    pub support_email: String,
    pub translations_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            catalog: vec!["osf_general".into(), "osf_help".into()],
            support_email: client_core::DEFAULT_SUPPORT_EMAIL.into(),
            translations_path: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    server_url: Option<String>,
    catalog: Option<Vec<String>>,
    support_email: Option<String>,
    translations: Option<PathBuf>,
}

/// Defaults, then the TOML file at `path` if it exists, then `APP__*`
/// environment variables.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match fs::read_to_string(path) {
        Ok(raw) => apply_file(&mut settings, &raw)
            .with_context(|| format!("invalid settings file '{}'", path.display()))?,
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read '{}'", path.display()));
        }
    }

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.server_url {
        settings.server_url = v;
    }
    if let Some(v) = file_cfg.catalog {
        settings.catalog = v;
    }
    if let Some(v) = file_cfg.support_email {
        settings.support_email = v;
    }
    if let Some(v) = file_cfg.translations {
        settings.translations_path = Some(v);
    }
    Ok(())
}

fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("APP__SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = lookup("APP__CATALOG") {
        settings.catalog = split_list(&v);
    }
    if let Some(v) = lookup("APP__SUPPORT_EMAIL") {
        settings.support_email = v;
    }
    if let Some(v) = lookup("APP__TRANSLATIONS") {
        settings.translations_path = Some(PathBuf::from(v));
    }
}

pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
