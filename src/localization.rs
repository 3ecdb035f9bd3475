//! Localization Resolver - Deterministic Fallback
//!
//! Resolution order for a requested language:
//! 1. the requested language
//! 2. the fallback language (default language unless overridden)
//! 3. the first populated language in priority order
//! 4. empty when every present value is null
//! 5. otherwise the configured placeholder, so a broken row still renders

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

use crate::config::CatalogConfig;
use crate::model::{MultilingualField, Translation};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocaleError {
    #[error("Unknown language code: '{0}'")]
    UnknownLanguage(String),
}

/// A supported display language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Language {
    #[default]
    Sr,
    En,
    De,
}

impl Language {
    pub const DEFAULT: Language = Language::Sr;
    pub const PRIORITY: [Language; 3] = [Language::Sr, Language::En, Language::De];

    /// Parse a language code, ignoring case and surrounding whitespace.
    pub fn from_code(code: &str) -> Result<Language, LocaleError> {
        match code.trim().to_ascii_lowercase().as_str() {
            "sr" => Ok(Language::Sr),
            "en" => Ok(Language::En),
            "de" => Ok(Language::De),
            _ => Err(LocaleError::UnknownLanguage(code.to_string())),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::Sr => "sr",
            Language::En => "en",
            Language::De => "de",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_code(s)
    }
}

impl TryFrom<String> for Language {
    type Error = LocaleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Language::from_code(&value)
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        language.code().to_string()
    }
}

/// Normalize a requested language code.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_lowercase()
}

enum Slot<'a> {
    Null,
    Value(Translation),
    Borrowed(&'a Translation),
    Unusable,
}

impl Slot<'_> {
    fn translation(&self) -> Option<&Translation> {
        match self {
            Slot::Value(t) => Some(t),
            Slot::Borrowed(t) => Some(t),
            Slot::Null | Slot::Unusable => None,
        }
    }
}

/// Uniform view over the object shapes a field can take.
struct Entries<'a> {
    slots: Vec<(&'a str, Slot<'a>)>,
}

impl<'a> Entries<'a> {
    fn from_field(field: &'a MultilingualField) -> Option<Self> {
        let slots = match field {
            MultilingualField::Localized(map) => map
                .iter()
                .map(|(key, value)| {
                    let slot = match value {
                        Some(t) => Slot::Borrowed(t),
                        None => Slot::Null,
                    };
                    (key.as_str(), slot)
                })
                .collect(),
            MultilingualField::Other(Value::Object(map)) => map
                .iter()
                .map(|(key, value)| (key.as_str(), lenient_slot(value)))
                .collect(),
            _ => return None,
        };
        Some(Self { slots })
    }

    /// Every value stored under `code`, ignoring key case.
    fn lookup<'s>(&'s self, code: &'s str) -> impl Iterator<Item = &'s Translation> + 's {
        self.slots
            .iter()
            .filter(move |(key, _)| key.eq_ignore_ascii_case(code))
            .filter_map(|(_, slot)| slot.translation())
    }

    fn all_null(&self) -> bool {
        self.slots.iter().all(|(_, slot)| matches!(slot, Slot::Null))
    }
}

fn lenient_slot(value: &Value) -> Slot<'static> {
    match value {
        Value::Null => Slot::Null,
        Value::String(s) => Slot::Value(Translation::Text(s.clone())),
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .map_or(Slot::Unusable, |list| Slot::Value(Translation::List(list))),
        _ => Slot::Unusable,
    }
}

enum Resolution<T> {
    Found(T),
    Empty,
    Malformed,
}

fn pick_text(t: &Translation) -> Option<String> {
    match t {
        Translation::Text(s) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn pick_list(t: &Translation) -> Option<Vec<String>> {
    match t {
        Translation::List(items) if !items.is_empty() => Some(items.clone()),
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub struct LocalizationResolver {
    default_language: Language,
    priority: Vec<Language>,
    placeholder: String,
}

impl LocalizationResolver {
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            default_language: config.default_language,
            priority: config.language_priority.clone(),
            placeholder: config.malformed_placeholder.clone(),
        }
    }

    pub fn default_language(&self) -> Language {
        self.default_language
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Resolve a text field, falling back to the default language.
    pub fn resolve(&self, field: &MultilingualField, language: &str) -> String {
        self.resolve_with_fallback(field, language, self.default_language.code())
    }

    pub fn resolve_with_fallback(
        &self,
        field: &MultilingualField,
        language: &str,
        fallback: &str,
    ) -> String {
        match field {
            MultilingualField::LegacyText(text) => return text.clone(),
            MultilingualField::LegacyList(_) => return String::new(),
            _ => {}
        }
        let Some(entries) = Entries::from_field(field) else {
            return String::new();
        };

        match self.walk(&entries, language, fallback, pick_text) {
            Resolution::Found(text) => text,
            Resolution::Empty => String::new(),
            Resolution::Malformed => {
                warn!(language, "text field has no resolvable value, rendering placeholder");
                self.placeholder.clone()
            }
        }
    }

    /// Resolve a list field (tags), falling back to the default language.
    pub fn resolve_array(&self, field: &MultilingualField, language: &str) -> Vec<String> {
        self.resolve_array_with_fallback(field, language, self.default_language.code())
    }

    pub fn resolve_array_with_fallback(
        &self,
        field: &MultilingualField,
        language: &str,
        fallback: &str,
    ) -> Vec<String> {
        match field {
            MultilingualField::LegacyList(items) => return items.clone(),
            MultilingualField::LegacyText(text) if text.trim().is_empty() => return vec![],
            MultilingualField::LegacyText(text) => return vec![text.clone()],
            _ => {}
        }
        let Some(entries) = Entries::from_field(field) else {
            return vec![];
        };

        match self.walk(&entries, language, fallback, pick_list) {
            Resolution::Found(items) => items,
            Resolution::Empty => vec![],
            Resolution::Malformed => {
                warn!(language, "list field has no resolvable value, rendering empty list");
                vec![]
            }
        }
    }

    /// Lowercase codes of the languages holding a usable value.
    pub fn available_languages(&self, field: &MultilingualField) -> Vec<String> {
        match field {
            MultilingualField::LegacyText(text) if !text.trim().is_empty() => {
                vec![self.default_language.code().to_string()]
            }
            MultilingualField::LegacyList(items) if !items.is_empty() => {
                vec![self.default_language.code().to_string()]
            }
            _ => Entries::from_field(field)
                .map(|entries| {
                    entries
                        .slots
                        .iter()
                        .filter(|(_, slot)| {
                            slot.translation()
                                .map_or(false, |t| pick_text(t).is_some() || pick_list(t).is_some())
                        })
                        .map(|(key, _)| normalize_code(key))
                        .collect()
                })
                .unwrap_or_default(),
        }
    }

    fn walk<T>(
        &self,
        entries: &Entries<'_>,
        language: &str,
        fallback: &str,
        pick: impl Fn(&Translation) -> Option<T>,
    ) -> Resolution<T> {
        let requested = normalize_code(language);
        let fallback = normalize_code(fallback);

        let candidates = [requested.as_str(), fallback.as_str()]
            .into_iter()
            .chain(self.priority.iter().map(|language| -> &str { language.code() }));

        for code in candidates {
            if let Some(value) = entries.lookup(code).find_map(&pick) {
                return Resolution::Found(value);
            }
        }

        if entries.all_null() {
            Resolution::Empty
        } else {
            Resolution::Malformed
        }
    }
}

impl Default for LocalizationResolver {
    fn default() -> Self {
        Self::new(&CatalogConfig::default())
    }
}
