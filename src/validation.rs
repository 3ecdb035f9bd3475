//! Validation System - Rule/Policy Separation
//!
//! Rules produce structured violations.
//! Policy (`FailureMode`) decides whether they block a save.

use serde::{Deserialize, Serialize};

use crate::config::{CatalogConfig, FailureMode};
use crate::localization::LocalizationResolver;
use crate::model::{GalleryImage, MultilingualField, Product, Project};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViolationSeverity {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationViolation {
    pub rule: String,
    pub severity: ViolationSeverity,
    pub message: String,
    #[serde(default)]
    pub field: Option<String>,
    pub expected: Option<String>,
    pub actual: Option<String>,
    pub remediation: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub violations: Vec<ValidationViolation>,
    pub entity_id: String,
}

impl ValidationResult {
    pub fn has_errors(&self) -> bool {
        self.violations.iter().any(|v| v.severity == ViolationSeverity::Error)
    }
}

/// What the rules need to know about an entity.
pub trait Validated {
    fn entity_id(&self) -> &str;
    /// Fields that must be filled in the default language.
    fn required_text(&self) -> Vec<(&'static str, &MultilingualField)>;
    /// Fields checked for translation coverage.
    fn translated_text(&self) -> Vec<(&'static str, &MultilingualField)>;
    fn gallery(&self) -> &[GalleryImage];
}

impl Validated for Product {
    fn entity_id(&self) -> &str { &self.id }

    fn required_text(&self) -> Vec<(&'static str, &MultilingualField)> {
        vec![("title", &self.title), ("description", &self.description)]
    }

    fn translated_text(&self) -> Vec<(&'static str, &MultilingualField)> {
        vec![("title", &self.title), ("description", &self.description), ("category", &self.category)]
    }

    fn gallery(&self) -> &[GalleryImage] { &self.gallery }
}

impl Validated for Project {
    fn entity_id(&self) -> &str { &self.id }

    fn required_text(&self) -> Vec<(&'static str, &MultilingualField)> {
        vec![("title", &self.title)]
    }

    fn translated_text(&self) -> Vec<(&'static str, &MultilingualField)> {
        vec![
            ("title", &self.title),
            ("description", &self.description),
            ("location", &self.location),
        ]
    }

    fn gallery(&self) -> &[GalleryImage] { &self.gallery }
}

/// Validation rule trait - produces violations
pub trait ValidationRule<T> {
    fn name(&self) -> &'static str;
    fn validate(&self, subject: &T, config: &CatalogConfig) -> Vec<ValidationViolation>;
}

// --- Concrete Rules ---

pub struct DefaultLanguageRule;

impl<T: Validated> ValidationRule<T> for DefaultLanguageRule {
    fn name(&self) -> &'static str { "default_language" }

    fn validate(&self, subject: &T, config: &CatalogConfig) -> Vec<ValidationViolation> {
        let resolver = LocalizationResolver::new(config);
        let code = config.default_language.code();

        subject
            .required_text()
            .into_iter()
            .filter(|(_, field)| !resolver.available_languages(field).iter().any(|c| c == code))
            .map(|(name, _)| ValidationViolation {
                rule: ValidationRule::<T>::name(self).to_string(),
                severity: ViolationSeverity::Error,
                message: format!("{} is empty in the default language", name),
                field: Some(name.to_string()),
                expected: Some(format!("non-empty '{}' value", code)),
                actual: None,
                remediation: vec![format!("Fill in the '{}' {}", code, name)],
            })
            .collect()
    }
}

pub struct TranslationCoverageRule;

impl<T: Validated> ValidationRule<T> for TranslationCoverageRule {
    fn name(&self) -> &'static str { "translation_coverage" }

    fn validate(&self, subject: &T, config: &CatalogConfig) -> Vec<ValidationViolation> {
        let resolver = LocalizationResolver::new(config);
        let mut violations = vec![];

        for (name, field) in subject.translated_text() {
            let available = resolver.available_languages(field);
            if available.is_empty() {
                continue;
            }
            let missing: Vec<_> = config
                .language_priority
                .iter()
                .map(|language| language.code())
                .filter(|code| !available.iter().any(|c| c == code))
                .collect();
            if !missing.is_empty() {
                violations.push(ValidationViolation {
                    rule: ValidationRule::<T>::name(self).to_string(),
                    severity: ViolationSeverity::Warning,
                    message: format!("{} has no translation for {}", name, missing.join(", ")),
                    field: Some(name.to_string()),
                    expected: None,
                    actual: Some(available.join(", ")),
                    remediation: vec!["Visitors will see the fallback language".to_string()],
                });
            }
        }

        violations
    }
}

pub struct CategoryAssociationRule;

impl<T: Validated> ValidationRule<T> for CategoryAssociationRule {
    fn name(&self) -> &'static str { "category_association" }

    fn validate(&self, subject: &T, config: &CatalogConfig) -> Vec<ValidationViolation> {
        subject
            .gallery()
            .iter()
            .filter_map(|image| {
                let category = image.category_association.as_deref()?;
                if config.is_known_category(category) {
                    return None;
                }
                Some(ValidationViolation {
                    rule: ValidationRule::<T>::name(self).to_string(),
                    severity: ViolationSeverity::Error,
                    message: format!("Image {} uses an unknown category", image.url),
                    field: Some("gallery".to_string()),
                    expected: Some(config.categories.join(" | ")),
                    actual: Some(category.to_string()),
                    remediation: vec!["Pick a listed category or clear it to make the image generic".to_string()],
                })
            })
            .collect()
    }
}

pub struct GalleryOrderRule;

impl<T: Validated> ValidationRule<T> for GalleryOrderRule {
    fn name(&self) -> &'static str { "gallery_order" }

    fn validate(&self, subject: &T, _config: &CatalogConfig) -> Vec<ValidationViolation> {
        let mut orders: Vec<u32> = subject.gallery().iter().map(|image| image.order).collect();
        orders.sort_unstable();
        let before = orders.len();
        orders.dedup();

        if orders.len() == before {
            return vec![];
        }
        vec![ValidationViolation {
            rule: ValidationRule::<T>::name(self).to_string(),
            severity: ViolationSeverity::Warning,
            message: "Gallery contains repeated order values".to_string(),
            field: Some("gallery".to_string()),
            expected: Some("distinct order per image".to_string()),
            actual: Some(format!("{} distinct of {}", orders.len(), before)),
            remediation: vec!["Reorder any image once to renumber the gallery".to_string()],
        }]
    }
}

/// Gallery colors must name a product color in the canonical language.
pub struct ColorAssociationRule;

impl ValidationRule<Product> for ColorAssociationRule {
    fn name(&self) -> &'static str { "color_association" }

    fn validate(&self, product: &Product, config: &CatalogConfig) -> Vec<ValidationViolation> {
        let resolver = LocalizationResolver::new(config);
        let canonical = config.default_language.code();
        let known: Vec<String> = product
            .colors
            .iter()
            .map(|color| resolver.resolve(&color.name, canonical))
            .collect();

        product
            .gallery
            .iter()
            .filter_map(|image| {
                let color = image.color_association.as_deref()?;
                if known.iter().any(|name| name == color) {
                    return None;
                }
                Some(ValidationViolation {
                    rule: self.name().to_string(),
                    severity: ViolationSeverity::Error,
                    message: format!("Image {} references an unknown color", image.url),
                    field: Some("gallery".to_string()),
                    expected: Some(known.join(" | ")),
                    actual: Some(color.to_string()),
                    remediation: vec![format!(
                        "Associate the image using the '{}' color name",
                        canonical
                    )],
                })
            })
            .collect()
    }
}

/// Validator orchestrates rules and applies policy
pub struct Validator<T> {
    rules: Vec<Box<dyn ValidationRule<T>>>,
}

impl Validator<Product> {
    pub fn for_products() -> Self {
        Self {
            rules: vec![
                Box::new(DefaultLanguageRule),
                Box::new(TranslationCoverageRule),
                Box::new(ColorAssociationRule),
                Box::new(CategoryAssociationRule),
                Box::new(GalleryOrderRule),
            ],
        }
    }
}

impl Validator<Project> {
    pub fn for_projects() -> Self {
        Self {
            rules: vec![
                Box::new(DefaultLanguageRule),
                Box::new(TranslationCoverageRule),
                Box::new(CategoryAssociationRule),
                Box::new(GalleryOrderRule),
            ],
        }
    }
}

impl<T: Validated> Validator<T> {
    pub fn validate(&self, subject: &T, config: &CatalogConfig) -> ValidationResult {
        let mut all_violations = vec![];

        for rule in &self.rules {
            all_violations.extend(rule.validate(subject, config));
        }

        let has_errors = all_violations
            .iter()
            .any(|v| v.severity == ViolationSeverity::Error);

        let valid = match config.failure_mode {
            FailureMode::Block => !has_errors,
            // Never block, just record
            FailureMode::Warn | FailureMode::Log => true,
        };

        if config.failure_mode == FailureMode::Log {
            for v in &all_violations {
                tracing::info!(rule = %v.rule, entity = subject.entity_id(), "{}", v.message);
            }
        }

        ValidationResult {
            valid,
            violations: all_violations,
            entity_id: subject.entity_id().to_string(),
        }
    }
}
