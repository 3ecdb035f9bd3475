//! Catalog Facade - Single Entry Point
//!
//! Bundles configuration and resolver so callers (detail views, admin forms,
//! the CLI bridge) go through one object instead of wiring modules by hand.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::{CatalogConfig, ConfigError};
use crate::featured::{CurationError, FeaturedSlotCurator};
use crate::gallery::{order_payload, reorder, OrderUpdate};
use crate::hashing::payload_digest;
use crate::localization::{LocaleError, LocalizationResolver};
use crate::matcher::{canonical_color_name, select_image};
use crate::model::{FeaturedSlot, GalleryImage, Product, Project};
use crate::projection::{Localize, ProductView, ProjectView};
use crate::validation::{ValidationResult, Validator};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Locale(#[from] LocaleError),

    #[error("Curation rejected: {0}")]
    Curation(#[from] CurationError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Color/category selection coming from a detail view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRequest {
    /// Color name as displayed to the visitor.
    pub color: String,
    pub category: String,
    pub display_language: String,
    #[serde(default)]
    pub current_index: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImageChoice {
    pub canonical_color: String,
    pub matched: Option<usize>,
    /// Index to display: the match, or the current index when nothing matched.
    pub index: Option<usize>,
}

/// Save request for a reordered gallery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryOrderRequest {
    pub gallery: Vec<GalleryImage>,
    pub updates: Vec<OrderUpdate>,
    pub digest: String,
}

/// Validated full-replacement list of featured slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedSaveRequest {
    pub slots: Vec<FeaturedSlot>,
    pub digest: String,
}

pub struct Catalog {
    config: CatalogConfig,
    resolver: LocalizationResolver,
}

impl Catalog {
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        config.validate()?;
        let resolver = LocalizationResolver::new(&config);
        Ok(Self { config, resolver })
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn resolver(&self) -> &LocalizationResolver {
        &self.resolver
    }

    pub fn project_product<'a>(&self, product: &'a Product, language: &str) -> ProductView<'a> {
        product.project(&self.resolver, language)
    }

    pub fn project_project<'a>(&self, project: &'a Project, language: &str) -> ProjectView<'a> {
        project.project(&self.resolver, language)
    }

    /// Translate the displayed color to its canonical name, then match.
    pub fn choose_image(&self, product: &Product, request: &ImageRequest) -> ImageChoice {
        let canonical_color = canonical_color_name(
            &product.colors,
            &request.color,
            &request.display_language,
            &request.category,
            &self.resolver,
        );
        let matched = select_image(&product.gallery, &canonical_color, &request.category);
        if matched.is_none() {
            debug!(color = %canonical_color, category = %request.category, "no gallery image for selection");
        }

        ImageChoice {
            canonical_color,
            matched,
            index: matched.or(request.current_index),
        }
    }

    pub fn reorder_gallery(
        &self,
        gallery: &[GalleryImage],
        from: usize,
        to: usize,
    ) -> Result<GalleryOrderRequest, CatalogError> {
        let gallery = reorder(gallery, from, to);
        let updates = order_payload(&gallery);
        let digest = payload_digest("gallery", &updates)?;
        Ok(GalleryOrderRequest { gallery, updates, digest })
    }

    pub fn featured_save_request(&self, curator: &FeaturedSlotCurator) -> Result<FeaturedSaveRequest, CatalogError> {
        let slots = curator.save_payload()?;
        let digest = payload_digest("featured", &slots)?;
        Ok(FeaturedSaveRequest { slots, digest })
    }

    pub fn validate_product(&self, product: &Product) -> ValidationResult {
        Validator::for_products().validate(product, &self.config)
    }

    pub fn validate_project(&self, project: &Project) -> ValidationResult {
        Validator::for_projects().validate(project, &self.config)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        let config = CatalogConfig::default();
        let resolver = LocalizationResolver::new(&config);
        Self { config, resolver }
    }
}
