//! Image Selection - Color and Category Matching
//!
//! Images store the canonical (default-language) color name. Callers holding a
//! display-language name translate it with `canonical_color_name` first.
//!
//! Priority, first match wins:
//! 1. color matches and category matches or is absent
//! 2. color-neutral image whose category matches or is absent
//! 3. no match: the caller keeps whatever image it was showing

use crate::localization::LocalizationResolver;
use crate::model::{Color, GalleryImage};

/// Index of the image to show for a color/category selection.
pub fn select_image(gallery: &[GalleryImage], color_name: &str, category: &str) -> Option<usize> {
    gallery
        .iter()
        .position(|image| is_color_match(image, color_name, category))
        .or_else(|| gallery.iter().position(|image| is_generic_match(image, category)))
}

/// Like `select_image`, but falls back to `current` instead of resetting.
pub fn select_image_or_keep(
    gallery: &[GalleryImage],
    color_name: &str,
    category: &str,
    current: usize,
) -> usize {
    select_image(gallery, color_name, category).unwrap_or(current)
}

/// Every index eligible for the selection, in gallery order.
pub fn images_for_selection(gallery: &[GalleryImage], color_name: &str, category: &str) -> Vec<usize> {
    gallery
        .iter()
        .enumerate()
        .filter(|(_, image)| is_color_match(image, color_name, category) || is_generic_match(image, category))
        .map(|(index, _)| index)
        .collect()
}

fn is_color_match(image: &GalleryImage, color_name: &str, category: &str) -> bool {
    image.color_association.as_deref() == Some(color_name) && image.fits_category(category)
}

fn is_generic_match(image: &GalleryImage, category: &str) -> bool {
    image.is_color_neutral() && image.fits_category(category)
}

/// Translate a color name shown in `display_language` back to its canonical
/// name. Colors of the selected `category` are searched first, since finish
/// categories may reuse a display name. Names that match no color pass
/// through unchanged.
pub fn canonical_color_name(
    colors: &[Color],
    display_name: &str,
    display_language: &str,
    category: &str,
    resolver: &LocalizationResolver,
) -> String {
    let canonical_code = resolver.default_language().code();
    let shown_as = |color: &&Color| resolver.resolve(&color.name, display_language) == display_name;

    colors
        .iter()
        .filter(|color| color.category == category)
        .find(shown_as)
        .or_else(|| colors.iter().find(shown_as))
        .map(|color| resolver.resolve(&color.name, canonical_code))
        .unwrap_or_else(|| display_name.to_string())
}

/// Colors offered under a finish category.
pub fn colors_in_category<'a>(colors: &'a [Color], category: &str) -> Vec<&'a Color> {
    colors.iter().filter(|color| color.category == category).collect()
}

/// Tracks the displayed image across selection changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageSelection {
    current: usize,
}

impl ImageSelection {
    pub fn new(current: usize) -> Self {
        Self { current }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Apply a color/category change. Returns whether the displayed image moved.
    pub fn select(&mut self, gallery: &[GalleryImage], color_name: &str, category: &str) -> bool {
        match select_image(gallery, color_name, category) {
            Some(index) if index != self.current => {
                self.current = index;
                true
            }
            _ => false,
        }
    }

    /// Manual thumbnail click; out-of-range indices are ignored.
    pub fn show(&mut self, gallery: &[GalleryImage], index: usize) {
        if index < gallery.len() {
            self.current = index;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MultilingualField;

    fn gallery() -> Vec<GalleryImage> {
        vec![
            GalleryImage::new("red-a.jpg", 0).with_color("Red").with_category("A"),
            GalleryImage::new("generic.jpg", 1),
        ]
    }

    #[test]
    fn test_color_and_category_match_first() {
        assert_eq!(select_image(&gallery(), "Red", "A"), Some(0));
    }

    #[test]
    fn test_generic_when_color_missing() {
        assert_eq!(select_image(&gallery(), "Blue", "A"), Some(1));
    }

    #[test]
    fn test_no_match_without_generic() {
        let only_red = vec![GalleryImage::new("red-a.jpg", 0).with_color("Red").with_category("A")];
        assert_eq!(select_image(&only_red, "Blue", "B"), None);
    }

    #[test]
    fn test_color_match_with_absent_category() {
        let g = vec![
            GalleryImage::new("generic.jpg", 0),
            GalleryImage::new("blue.jpg", 1).with_color("Blue"),
        ];
        assert_eq!(select_image(&g, "Blue", "B"), Some(1));
    }

    #[test]
    fn test_wrong_category_color_image_is_skipped() {
        let g = vec![
            GalleryImage::new("red-a.jpg", 0).with_color("Red").with_category("A"),
            GalleryImage::new("red-b.jpg", 1).with_color("Red").with_category("B"),
        ];
        assert_eq!(select_image(&g, "Red", "B"), Some(1));
    }

    #[test]
    fn test_no_match_keeps_current_index() {
        let g = vec![
            GalleryImage::new("red-a.jpg", 0).with_color("Red").with_category("A"),
            GalleryImage::new("green-a.jpg", 1).with_color("Green").with_category("A"),
        ];
        assert_eq!(select_image_or_keep(&g, "Blue", "B", 1), 1);

        let mut selection = ImageSelection::new(1);
        assert!(!selection.select(&g, "Blue", "B"));
        assert_eq!(selection.current(), 1);
        assert!(selection.select(&g, "Red", "A"));
        assert_eq!(selection.current(), 0);
    }

    #[test]
    fn test_images_for_selection() {
        let mut g = gallery();
        g.push(GalleryImage::new("blue-a.jpg", 2).with_color("Blue").with_category("A"));
        assert_eq!(images_for_selection(&g, "Red", "A"), vec![0, 1]);
        assert_eq!(images_for_selection(&g, "Red", "B"), vec![1]);
    }

    #[test]
    fn test_canonical_color_name_from_display_language() {
        let resolver = LocalizationResolver::default();
        let colors = vec![
            Color {
                name: MultilingualField::text([("sr", "Bela"), ("en", "White"), ("de", "Weiß")]),
                hex_code: "#ffffff".into(),
                category: "matte".into(),
                available: true,
            },
            Color {
                name: MultilingualField::text([("sr", "Siva")]),
                hex_code: "#888888".into(),
                category: "gloss".into(),
                available: true,
            },
        ];

        assert_eq!(canonical_color_name(&colors, "Weiß", "de", "matte", &resolver), "Bela");
        assert_eq!(canonical_color_name(&colors, "Weiß", "de", "gloss", &resolver), "Bela");
        assert_eq!(canonical_color_name(&colors, "Siva", "en", "gloss", &resolver), "Siva");
        assert_eq!(canonical_color_name(&colors, "Unknown", "en", "matte", &resolver), "Unknown");
        assert_eq!(colors_in_category(&colors, "gloss").len(), 1);
    }

    #[test]
    fn test_shared_display_name_resolved_within_category() {
        let resolver = LocalizationResolver::default();
        let colors = vec![
            Color {
                name: MultilingualField::text([("sr", "Bela mat"), ("en", "White")]),
                hex_code: "#fafafa".into(),
                category: "matte".into(),
                available: true,
            },
            Color {
                name: MultilingualField::text([("sr", "Bela sjaj"), ("en", "White")]),
                hex_code: "#ffffff".into(),
                category: "gloss".into(),
                available: true,
            },
        ];
        let gallery = vec![
            GalleryImage::new("mat.jpg", 0).with_color("Bela mat").with_category("matte"),
            GalleryImage::new("sjaj.jpg", 1).with_color("Bela sjaj").with_category("gloss"),
        ];

        let gloss = canonical_color_name(&colors, "White", "en", "gloss", &resolver);
        assert_eq!(gloss, "Bela sjaj");
        assert_eq!(select_image(&gallery, &gloss, "gloss"), Some(1));

        let matte = canonical_color_name(&colors, "White", "en", "matte", &resolver);
        assert_eq!(matte, "Bela mat");
        assert_eq!(select_image(&gallery, &matte, "matte"), Some(0));
    }
}
