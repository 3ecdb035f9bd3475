//! Contract Invariant Tests
//!
//! These tests verify the guarantees callers rely on across modules.

use catalog_core::{
    gallery::is_permutation,
    hashing::fingerprint,
    Catalog, CatalogConfig, Color, CurationError, FeaturedSlot, FeaturedSlotCurator,
    GalleryImage, ImageRequest, ImageSelection, LocalizationResolver, MultilingualField,
    Optimistic, Outcome, Product, ProjectionMemo,
};
use serde_json::json;

fn create_test_product() -> Product {
    serde_json::from_value(json!({
        "id": "window-70",
        "title": {"sr": "Prozor", "en": "", "de": null},
        "description": {"sr": "PVC prozor", "en": "PVC window", "de": "PVC-Fenster"},
        "category": {"sr": "Prozori", "en": "Windows"},
        "tags": {"sr": ["PVC", "termo"], "en": ["PVC", "thermal"]},
        "colors": [
            {"name": {"sr": "Bela", "en": "White", "de": "Weiß"}, "hexCode": "#ffffff", "category": "smooth"},
            {"name": {"sr": "Hrast", "en": "Oak", "de": "Eiche"}, "hexCode": "#8b5a2b", "category": "wood"},
            {"name": {"sr": "Antracit", "en": "Anthracite"}, "hexCode": "#383e42", "category": "smooth"}
        ],
        "gallery": [
            {"url": "bela.jpg", "colorAssociation": "Bela", "categoryAssociation": "smooth", "order": 0},
            {"url": "hrast.jpg", "colorAssociation": "Hrast", "categoryAssociation": "wood", "order": 1},
            {"url": "detalj.jpg", "categoryAssociation": "smooth", "order": 2}
        ]
    }))
    .unwrap()
}

fn create_catalog() -> Catalog {
    Catalog::new(CatalogConfig {
        categories: vec!["smooth".into(), "wood".into()],
        ..Default::default()
    })
    .unwrap()
}

#[test]
fn invariant_title_falls_back_to_default_language() {
    let catalog = create_catalog();
    let product = create_test_product();

    let view = catalog.project_product(&product, "EN");
    assert_eq!(view.localized_title, "Prozor");
    assert_eq!(view.localized_description, "PVC window");
    assert_eq!(view.localized_tags, vec!["PVC", "thermal"]);
}

#[test]
fn invariant_projection_never_mutates_source() {
    let catalog = create_catalog();
    let product = create_test_product();
    let snapshot = fingerprint(&product).unwrap();

    for language in ["sr", "en", "de", "fr"] {
        let _ = catalog.project_product(&product, language);
    }

    assert_eq!(fingerprint(&product).unwrap(), snapshot);
}

#[test]
fn invariant_display_color_is_translated_before_matching() {
    let catalog = create_catalog();
    let product = create_test_product();

    let choice = catalog.choose_image(
        &product,
        &ImageRequest {
            color: "Eiche".into(),
            category: "wood".into(),
            display_language: "de".into(),
            current_index: Some(0),
        },
    );

    assert_eq!(choice.canonical_color, "Hrast");
    assert_eq!(choice.matched, Some(1));
    assert_eq!(choice.index, Some(1));
}

#[test]
fn invariant_generic_image_for_color_without_photo() {
    let catalog = create_catalog();
    let product = create_test_product();

    let choice = catalog.choose_image(
        &product,
        &ImageRequest {
            color: "Anthracite".into(),
            category: "smooth".into(),
            display_language: "en".into(),
            current_index: None,
        },
    );

    assert_eq!(choice.canonical_color, "Antracit");
    assert_eq!(choice.matched, Some(2));
}

#[test]
fn invariant_no_match_keeps_previous_image() {
    // Regression: switching to a color with no image must not jump to index 0.
    let catalog = create_catalog();
    let mut product = create_test_product();
    product.gallery.retain(|image| image.color_association.is_some());

    let choice = catalog.choose_image(
        &product,
        &ImageRequest {
            color: "Anthracite".into(),
            category: "smooth".into(),
            display_language: "en".into(),
            current_index: Some(1),
        },
    );
    assert_eq!(choice.matched, None);
    assert_eq!(choice.index, Some(1));

    let mut selection = ImageSelection::new(1);
    selection.select(&product.gallery, "Antracit", "smooth");
    assert_eq!(selection.current(), 1);
}

#[test]
fn invariant_failed_reorder_save_reverts() {
    let catalog = create_catalog();
    let product = create_test_product();
    let mut gallery = Optimistic::new(product.gallery.clone());

    let request = catalog.reorder_gallery(gallery.displayed(), 0, 2).unwrap();
    assert!(is_permutation(&product.gallery, &request.gallery));
    assert_eq!(request.updates[2].image_url, "bela.jpg");
    assert_eq!(request.updates[2].color_association.as_deref(), Some("Bela"));

    let ticket = gallery.begin(request.gallery);
    assert_eq!(gallery.displayed()[0].url, "hrast.jpg");

    assert_eq!(gallery.reject(&ticket), Outcome::RolledBack);
    assert_eq!(gallery.displayed(), &product.gallery);
}

#[test]
fn invariant_last_issued_save_wins() {
    let mut slots = Optimistic::new(vec![FeaturedSlot::new("a", 1)]);

    let older = slots.begin(vec![FeaturedSlot::new("a", 1), FeaturedSlot::new("b", 2)]);
    let newer = slots.begin(vec![FeaturedSlot::new("b", 1)]);

    assert_eq!(slots.confirm(&newer, vec![FeaturedSlot::new("b", 1)]), Outcome::Confirmed);
    assert_eq!(slots.confirm(&older, vec![FeaturedSlot::new("a", 1)]), Outcome::Stale);
    assert_eq!(slots.confirmed(), &vec![FeaturedSlot::new("b", 1)]);
}

#[test]
fn invariant_featured_capacity_and_save_boundary() {
    let catalog = create_catalog();
    let mut curator = FeaturedSlotCurator::default();
    for id in ["p1", "p2", "p3", "p4"] {
        curator.add(id, None).unwrap();
    }
    assert_eq!(curator.add("p5", None), Err(CurationError::Capacity { max: 4 }));

    curator.set_order("p4", 1).unwrap();
    let err = catalog.featured_save_request(&curator).unwrap_err();
    assert!(err.to_string().contains("slot 1"));

    curator.remove("p1");
    let request = catalog.featured_save_request(&curator).unwrap();
    assert_eq!(request.slots[0].product_id, "p4");
    assert_eq!(request.digest.len(), 64);
}

#[test]
fn invariant_validation_catches_display_language_association() {
    let catalog = create_catalog();
    let mut product = create_test_product();
    assert!(catalog.validate_product(&product).valid);

    product.gallery[0].color_association = Some("White".into());
    let result = catalog.validate_product(&product);
    assert!(!result.valid);
    assert!(result.violations.iter().any(|v| v.rule == "color_association"));
}

#[test]
fn invariant_memo_tracks_entity_and_language() {
    let resolver = LocalizationResolver::default();
    let mut memo = ProjectionMemo::new();
    let mut product = create_test_product();

    assert_eq!(memo.project(&product, &resolver, "de").unwrap().localized_category, "Prozori");

    product.colors.push(Color {
        name: MultilingualField::text([("sr", "Crna")]),
        hex_code: "#000000".into(),
        category: "smooth".into(),
        available: false,
    });
    let view = memo.project(&product, &resolver, "de").unwrap();
    assert_eq!(view.localized_colors.len(), 4);
    assert_eq!(view.localized_colors[3].localized_name, "Crna");
}

#[cfg(feature = "test-hooks")]
#[test]
fn invariant_memo_skips_unchanged_projection() {
    use catalog_core::projection::{get_projection_count, reset_projection_count};

    let resolver = LocalizationResolver::default();
    let mut memo = ProjectionMemo::new();
    let product = create_test_product();

    reset_projection_count();
    memo.project(&product, &resolver, "en").unwrap();
    memo.project(&product, &resolver, "EN").unwrap();
    memo.project(&product.clone(), &resolver, "en").unwrap();
    assert_eq!(get_projection_count(), 1);

    memo.project(&product, &resolver, "de").unwrap();
    assert_eq!(get_projection_count(), 2);
}

#[test]
fn invariant_legacy_rows_still_render() {
    let catalog = create_catalog();
    let product: Product = serde_json::from_value(json!({
        "id": "legacy",
        "title": "Stari prozor",
        "tags": ["PVC"],
        "gallery": [GalleryImage::new("x.jpg", 0)]
    }))
    .unwrap();

    let view = catalog.project_product(&product, "de");
    assert_eq!(view.localized_title, "Stari prozor");
    assert_eq!(view.localized_tags, vec!["PVC"]);
    assert_eq!(view.localized_description, "");
}
