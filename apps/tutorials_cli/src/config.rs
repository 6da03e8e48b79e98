use std::{fs, path::Path};

use anyhow::Context;
use serde::Deserialize;
use url::Url;

pub const SETTINGS_FILE: &str = "tutorials.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080/api".into(),
            request_timeout_secs: 10,
            log_filter: "info".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    request_timeout_secs: Option<u64>,
    log_filter: Option<String>,
}

pub fn load_settings() -> anyhow::Result<Settings> {
    load_settings_with(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then the settings file if present, then environment variables.
pub fn load_settings_with(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if path.exists() {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
        let file_cfg: FileSettings = toml::from_str(&raw)
            .with_context(|| format!("invalid settings file '{}'", path.display()))?;
        if let Some(v) = file_cfg.api_base_url {
            settings.api_base_url = v;
        }
        if let Some(v) = file_cfg.request_timeout_secs {
            settings.request_timeout_secs = v;
        }
        if let Some(v) = file_cfg.log_filter {
            settings.log_filter = v;
        }
    }

    if let Some(v) = env("TUTORIALS_API_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.trim().parse::<u64>() {
            settings.request_timeout_secs = parsed;
        }
    }

    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    Ok(settings)
}

pub fn prepare_api_base_url(raw_api_base_url: &str) -> anyhow::Result<String> {
    let api_base_url = normalize_api_base_url(raw_api_base_url);
    Url::parse(&api_base_url)
        .with_context(|| format!("invalid tutorial service url '{api_base_url}'"))?;
    Ok(api_base_url)
}

fn normalize_api_base_url(raw_api_base_url: &str) -> String {
    let raw_api_base_url = raw_api_base_url.trim().trim_end_matches('/');

    if raw_api_base_url.is_empty() {
        return Settings::default().api_base_url;
    }

    if raw_api_base_url.contains("://") {
        return raw_api_base_url.to_string();
    }

    format!("http://{raw_api_base_url}")
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
