//! Catalog Core - Multilingual Content and Gallery Curation
//!
//! # Guarantees
//! 1. Resolution never fails: fallback language, then priority scan, then empty or placeholder
//! 2. Source entities are never mutated by projection
//! 3. Image association keys are canonical color names, never display names
//! 4. Reordering is a permutation and returns the whole gallery
//! 5. Featured slots are checked in full before every save

pub mod model;
pub mod config;
pub mod localization;
pub mod projection;
pub mod matcher;
pub mod gallery;
pub mod featured;
pub mod sync;
pub mod validation;
pub mod hashing;
pub mod catalog;

pub use model::{Color, FeaturedSlot, GalleryImage, MultilingualField, Product, Project, Size, Translation};
pub use config::{CatalogConfig, ConfigError, FailureMode};
pub use localization::{Language, LocaleError, LocalizationResolver};
pub use projection::{Localize, ProductView, ProjectView, ProjectionMemo};
pub use matcher::{canonical_color_name, select_image, select_image_or_keep, ImageSelection};
pub use gallery::{order_payload, reorder, OrderUpdate};
pub use featured::{next_free_order, validate_before_save, CurationError, FeaturedSlotCurator, MAX_FEATURED_SLOTS};
pub use sync::{Optimistic, Outcome, SaveTicket};
pub use validation::{ValidationResult, ValidationViolation, Validator, ViolationSeverity};
pub use hashing::{canonical_json, fingerprint};
pub use catalog::{Catalog, CatalogError, ImageChoice, ImageRequest};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
