//! Catalog Data Model - Shape Contracts
//!
//! Entities arrive from the persistence API. Text fields are either legacy
//! single-language values or per-language maps; nothing here resolves them.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub type ProductId = String;

/// A single per-language value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Translation {
    Text(String),
    List(Vec<String>),
}

/// A text field as stored by the API.
///
/// Variant order matters for deserialization: a plain string is legacy data,
/// an object of strings/lists/nulls is localized, anything else is kept
/// verbatim so the resolver can report it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MultilingualField {
    LegacyText(String),
    LegacyList(Vec<String>),
    Localized(BTreeMap<String, Option<Translation>>),
    Other(Value),
}

impl Default for MultilingualField {
    fn default() -> Self {
        Self::Localized(BTreeMap::new())
    }
}

impl MultilingualField {
    /// Build a localized text field from `(code, text)` pairs.
    pub fn text<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self::Localized(
            pairs
                .into_iter()
                .map(|(code, text)| (code.to_string(), Some(Translation::Text(text.to_string()))))
                .collect(),
        )
    }

    /// Build a localized list field from `(code, items)` pairs.
    pub fn list<'a>(pairs: impl IntoIterator<Item = (&'a str, Vec<&'a str>)>) -> Self {
        Self::Localized(
            pairs
                .into_iter()
                .map(|(code, items)| {
                    let items = items.into_iter().map(str::to_string).collect();
                    (code.to_string(), Some(Translation::List(items)))
                })
                .collect(),
        )
    }

    /// Look up the raw entry for a language code, ignoring key case.
    ///
    /// `None` means the key is absent; `Some(None)` means it is present but null.
    pub fn entry(&self, code: &str) -> Option<&Option<Translation>> {
        match self {
            Self::Localized(map) => map
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(code))
                .map(|(_, value)| value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    /// Canonical (default-language) color name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_association: Option<String>,
    /// Absent means the image applies under any category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_association: Option<String>,
    #[serde(default)]
    pub order: u32,
}

impl GalleryImage {
    pub fn new(url: impl Into<String>, order: u32) -> Self {
        Self {
            url: url.into(),
            alt: None,
            color_association: None,
            category_association: None,
            order,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color_association = Some(color.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category_association = Some(category.into());
        self
    }

    /// No color association: shown for any color.
    pub fn is_color_neutral(&self) -> bool {
        self.color_association.is_none()
    }

    pub fn fits_category(&self, category: &str) -> bool {
        self.category_association
            .as_deref()
            .map_or(true, |assoc| assoc == category)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    pub name: MultilingualField,
    pub hex_code: String,
    pub category: String,
    #[serde(default = "default_true")]
    pub available: bool,
}

fn default_true() -> bool { true }

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    pub name: MultilingualField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub title: MultilingualField,
    #[serde(default)]
    pub description: MultilingualField,
    #[serde(default)]
    pub category: MultilingualField,
    #[serde(default)]
    pub tags: MultilingualField,
    #[serde(default)]
    pub colors: Vec<Color>,
    #[serde(default)]
    pub sizes: Vec<Size>,
    #[serde(default)]
    pub gallery: Vec<GalleryImage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub title: MultilingualField,
    #[serde(default)]
    pub description: MultilingualField,
    #[serde(default)]
    pub category: MultilingualField,
    #[serde(default)]
    pub client: MultilingualField,
    #[serde(default)]
    pub location: MultilingualField,
    #[serde(default)]
    pub tags: MultilingualField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    #[serde(default)]
    pub gallery: Vec<GalleryImage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedSlot {
    pub product_id: ProductId,
    pub order: u8,
}

impl FeaturedSlot {
    pub fn new(product_id: impl Into<ProductId>, order: u8) -> Self {
        Self { product_id: product_id.into(), order }
    }
}
