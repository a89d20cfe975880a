use std::{fs, path::Path, time::Duration};

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;
use url::Url;

use crate::content::{DEFAULT_MAX_RANDOM_ATTEMPTS, DEFAULT_RANDOM_SAMPLE_SIZE};

pub const SETTINGS_FILE: &str = "spectrum.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid settings file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid {field} '{value}': {source}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        source: url::ParseError,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_url: String,
    pub article_url: String,
    pub thumbnail_size: u32,
    pub random_sample_size: usize,
    pub max_random_attempts: usize,
    pub request_timeout_ms: u64,
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "https://en.wikipedia.org/w/api.php".into(),
            article_url: "https://en.wikipedia.org/".into(),
            thumbnail_size: 200,
            random_sample_size: DEFAULT_RANDOM_SAMPLE_SIZE,
            max_random_attempts: DEFAULT_MAX_RANDOM_ATTEMPTS,
            request_timeout_ms: 10_000,
            user_agent: concat!("spectrum/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileSettings {
    api_url: Option<String>,
    article_url: Option<String>,
    thumbnail_size: Option<u32>,
    random_sample_size: Option<usize>,
    max_random_attempts: Option<usize>,
    request_timeout_ms: Option<u64>,
    user_agent: Option<String>,
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn api_url(&self) -> Result<Url, SettingsError> {
        parse_url("api_url", &self.api_url)
    }

    pub fn article_url(&self) -> Result<Url, SettingsError> {
        parse_url("article_url", &self.article_url)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.api_url()?;
        self.article_url()?;
        Ok(())
    }

    /// Overlay values present in a TOML document.
    pub fn merge_toml(&mut self, raw: &str) -> Result<(), SettingsError> {
        let file: FileSettings = toml::from_str(raw)?;
        if let Some(v) = file.api_url {
            self.api_url = v;
        }
        if let Some(v) = file.article_url {
            self.article_url = v;
        }
        if let Some(v) = file.thumbnail_size {
            self.thumbnail_size = v;
        }
        if let Some(v) = file.random_sample_size {
            self.random_sample_size = v;
        }
        if let Some(v) = file.max_random_attempts {
            self.max_random_attempts = v;
        }
        if let Some(v) = file.request_timeout_ms {
            self.request_timeout_ms = v;
        }
        if let Some(v) = file.user_agent {
            self.user_agent = v;
        }
        Ok(())
    }

    /// Overlay environment variables. Unparsable numbers are ignored.
    pub fn merge_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("SPECTRUM_API_URL") {
            self.api_url = v;
        }
        if let Some(v) = lookup("APP__API_URL") {
            self.api_url = v;
        }

        if let Some(v) = lookup("SPECTRUM_ARTICLE_URL") {
            self.article_url = v;
        }
        if let Some(v) = lookup("APP__ARTICLE_URL") {
            self.article_url = v;
        }

        if let Some(v) = lookup("SPECTRUM_USER_AGENT") {
            self.user_agent = v;
        }

        if let Some(parsed) = parse_env(&lookup, "APP__THUMBNAIL_SIZE") {
            self.thumbnail_size = parsed;
        }
        if let Some(parsed) = parse_env(&lookup, "APP__RANDOM_SAMPLE_SIZE") {
            self.random_sample_size = parsed;
        }
        if let Some(parsed) = parse_env(&lookup, "APP__MAX_RANDOM_ATTEMPTS") {
            self.max_random_attempts = parsed;
        }
        if let Some(parsed) = parse_env(&lookup, "APP__REQUEST_TIMEOUT_MS") {
            self.request_timeout_ms = parsed;
        }
    }
}

/// Defaults, then `spectrum.toml` in the working directory, then environment.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();
    let path = Path::new(SETTINGS_FILE);
    if path.exists() {
        if let Err(err) = merge_file(&mut settings, path) {
            warn!("ignoring settings file: {err}");
        }
    }
    settings.merge_env(|name| std::env::var(name).ok());
    settings
}

/// Like [`load_settings`] but with an explicit file that must exist and parse.
pub fn load_settings_from(path: &Path) -> Result<Settings, SettingsError> {
    let mut settings = Settings::default();
    merge_file(&mut settings, path)?;
    settings.merge_env(|name| std::env::var(name).ok());
    Ok(settings)
}

fn merge_file(settings: &mut Settings, path: &Path) -> Result<(), SettingsError> {
    let raw = fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.display().to_string(),
        source,
    })?;
    settings.merge_toml(&raw)
}

fn parse_env<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Option<T> {
    let raw = lookup(name)?;
    match raw.trim().parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!("ignoring {name}={raw}: not a number");
            None
        }
    }
}

fn parse_url(field: &'static str, value: &str) -> Result<Url, SettingsError> {
    Url::parse(value).map_err(|source| SettingsError::InvalidUrl {
        field,
        value: value.to_string(),
        source,
    })
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
