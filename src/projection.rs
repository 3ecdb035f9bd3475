//! Entity Projection - Localized Views
//!
//! A view borrows its source entity and carries the resolved strings next to
//! it. The source is never mutated, so views in several languages can coexist.

use serde::Serialize;
use tracing::debug;

use crate::hashing::fingerprint;
use crate::localization::{normalize_code, LocalizationResolver};
use crate::model::{Color, Product, Project, Size};

#[cfg(feature = "test-hooks")]
use std::sync::atomic::{AtomicU32, Ordering};

#[cfg(feature = "test-hooks")]
static PROJECTION_COUNT: AtomicU32 = AtomicU32::new(0);

#[cfg(feature = "test-hooks")]
pub fn get_projection_count() -> u32 {
    PROJECTION_COUNT.load(Ordering::SeqCst)
}

#[cfg(feature = "test-hooks")]
pub fn reset_projection_count() {
    PROJECTION_COUNT.store(0, Ordering::SeqCst);
}

/// An entity whose text fields can be resolved for a display language.
pub trait Localize: Serialize {
    /// Owned resolved text, cheap to clone and cache.
    type Text: Clone;
    type View<'a>: Serialize
    where
        Self: 'a;

    fn localize(&self, resolver: &LocalizationResolver, language: &str) -> Self::Text;

    fn view<'a>(&'a self, language: &str, text: Self::Text) -> Self::View<'a>;

    fn project<'a>(&'a self, resolver: &LocalizationResolver, language: &str) -> Self::View<'a> {
        self.view(language, self.localize(resolver, language))
    }
}

/// A nested item (color, size) with its resolved name attached.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedItem<'a, T> {
    #[serde(flatten)]
    pub item: &'a T,
    pub localized_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductText {
    pub title: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub color_names: Vec<String>,
    pub size_names: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView<'a> {
    #[serde(flatten)]
    pub source: &'a Product,
    pub language: String,
    pub localized_title: String,
    pub localized_description: String,
    pub localized_category: String,
    pub localized_tags: Vec<String>,
    pub localized_colors: Vec<LocalizedItem<'a, Color>>,
    pub localized_sizes: Vec<LocalizedItem<'a, Size>>,
}

impl Localize for Product {
    type Text = ProductText;
    type View<'a> = ProductView<'a>;

    fn localize(&self, resolver: &LocalizationResolver, language: &str) -> ProductText {
        ProductText {
            title: resolver.resolve(&self.title, language),
            description: resolver.resolve(&self.description, language),
            category: resolver.resolve(&self.category, language),
            tags: resolver.resolve_array(&self.tags, language),
            color_names: self.colors.iter().map(|c| resolver.resolve(&c.name, language)).collect(),
            size_names: self.sizes.iter().map(|s| resolver.resolve(&s.name, language)).collect(),
        }
    }

    fn view<'a>(&'a self, language: &str, text: ProductText) -> ProductView<'a> {
        ProductView {
            source: self,
            language: normalize_code(language),
            localized_title: text.title,
            localized_description: text.description,
            localized_category: text.category,
            localized_tags: text.tags,
            localized_colors: attach_names(&self.colors, text.color_names),
            localized_sizes: attach_names(&self.sizes, text.size_names),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectText {
    pub title: String,
    pub description: String,
    pub category: String,
    pub client: String,
    pub location: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectView<'a> {
    #[serde(flatten)]
    pub source: &'a Project,
    pub language: String,
    pub localized_title: String,
    pub localized_description: String,
    pub localized_category: String,
    pub localized_client: String,
    pub localized_location: String,
    pub localized_tags: Vec<String>,
}

impl Localize for Project {
    type Text = ProjectText;
    type View<'a> = ProjectView<'a>;

    fn localize(&self, resolver: &LocalizationResolver, language: &str) -> ProjectText {
        ProjectText {
            title: resolver.resolve(&self.title, language),
            description: resolver.resolve(&self.description, language),
            category: resolver.resolve(&self.category, language),
            client: resolver.resolve(&self.client, language),
            location: resolver.resolve(&self.location, language),
            tags: resolver.resolve_array(&self.tags, language),
        }
    }

    fn view<'a>(&'a self, language: &str, text: ProjectText) -> ProjectView<'a> {
        ProjectView {
            source: self,
            language: normalize_code(language),
            localized_title: text.title,
            localized_description: text.description,
            localized_category: text.category,
            localized_client: text.client,
            localized_location: text.location,
            localized_tags: text.tags,
        }
    }
}

fn attach_names<T>(items: &[T], names: Vec<String>) -> Vec<LocalizedItem<'_, T>> {
    items
        .iter()
        .zip(names)
        .map(|(item, localized_name)| LocalizedItem { item, localized_name })
        .collect()
}

/// Remembers the last projection, keyed on content fingerprint and language.
pub struct ProjectionMemo<T: Localize> {
    key: Option<(String, String)>,
    text: Option<T::Text>,
}

impl<T: Localize> ProjectionMemo<T> {
    pub fn new() -> Self {
        Self { key: None, text: None }
    }

    /// Project `entity`, reusing the cached text when neither content nor
    /// language changed since the previous call.
    pub fn project<'a>(
        &mut self,
        entity: &'a T,
        resolver: &LocalizationResolver,
        language: &str,
    ) -> Result<T::View<'a>, serde_json::Error> {
        let key = (fingerprint(entity)?, normalize_code(language));

        let cached = match (&self.key, &self.text) {
            (Some(cached_key), Some(text)) if *cached_key == key => Some(text.clone()),
            _ => None,
        };

        let text = match cached {
            Some(text) => text,
            None => {
                #[cfg(feature = "test-hooks")]
                PROJECTION_COUNT.fetch_add(1, Ordering::SeqCst);

                debug!(language = %key.1, "recomputing localized view");
                let text = entity.localize(resolver, language);
                self.key = Some(key);
                self.text = Some(text.clone());
                text
            }
        };

        Ok(entity.view(language, text))
    }

    pub fn clear(&mut self) {
        self.key = None;
        self.text = None;
    }
}

impl<T: Localize> Default for ProjectionMemo<T> {
    fn default() -> Self {
        Self::new()
    }
}
