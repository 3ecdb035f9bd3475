//! Engine Configuration
//!
//! Loaded from an optional JSON file, then overridden from the environment.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::localization::{Language, LocaleError};

pub const DEFAULT_PLACEHOLDER: &str = "[invalid translation]";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Locale(#[from] LocaleError),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// How validation violations gate a save.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FailureMode {
    #[default]
    Block,
    Warn,
    Log,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogConfig {
    /// Canonical language: fallback for resolution, key language for color names.
    #[serde(default)]
    pub default_language: Language,
    #[serde(default = "default_priority")]
    pub language_priority: Vec<Language>,
    #[serde(default = "default_placeholder")]
    pub malformed_placeholder: String,
    /// Closed set of finish categories. Empty accepts any category.
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub failure_mode: FailureMode,
}

fn default_priority() -> Vec<Language> { Language::PRIORITY.to_vec() }
fn default_placeholder() -> String { DEFAULT_PLACEHOLDER.to_string() }

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_language: Language::DEFAULT,
            language_priority: default_priority(),
            malformed_placeholder: default_placeholder(),
            categories: vec![],
            failure_mode: FailureMode::default(),
        }
    }
}

impl CatalogConfig {
    /// Load from a JSON file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = if path.exists() {
            let content = fs::read_to_string(path)?;
            serde_json::from_str::<Self>(&content)?
        } else {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Apply `CATALOG_DEFAULT_LANGUAGE` and `CATALOG_PLACEHOLDER` overrides.
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Ok(code) = std::env::var("CATALOG_DEFAULT_LANGUAGE") {
            self.default_language = Language::from_code(&code)?;
        }
        if let Ok(placeholder) = std::env::var("CATALOG_PLACEHOLDER") {
            self.malformed_placeholder = placeholder;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.language_priority.is_empty() {
            return Err(ConfigError::Invalid("languagePriority must not be empty".into()));
        }
        if !self.language_priority.contains(&self.default_language) {
            return Err(ConfigError::Invalid(format!(
                "default language '{}' is missing from languagePriority",
                self.default_language
            )));
        }
        if self.malformed_placeholder.trim().is_empty() {
            return Err(ConfigError::Invalid("malformedPlaceholder must not be blank".into()));
        }
        Ok(())
    }

    pub fn is_known_category(&self, category: &str) -> bool {
        self.categories.is_empty() || self.categories.iter().any(|c| c == category)
    }
}
