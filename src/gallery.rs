//! Gallery Ordering
//!
//! `reorder` always returns a complete new gallery, never a diff, so callers
//! can swap back to the last confirmed gallery when a save fails.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::model::GalleryImage;

/// One entry of the gallery-order save request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    pub image_url: String,
    pub new_position: u32,
    pub color_association: Option<String>,
}

/// Move the image at `from` to `to`, shifting the others.
///
/// Out-of-range indices or `from == to` return the gallery unchanged.
/// Otherwise every `order` is rewritten to its new position.
pub fn reorder(gallery: &[GalleryImage], from: usize, to: usize) -> Vec<GalleryImage> {
    if from == to || from >= gallery.len() || to >= gallery.len() {
        return gallery.to_vec();
    }

    let mut next = gallery.to_vec();
    let moved = next.remove(from);
    next.insert(to, moved);
    renumber(&mut next);
    next
}

/// Rewrite `order` to match position.
pub fn renumber(gallery: &mut [GalleryImage]) {
    for (position, image) in gallery.iter_mut().enumerate() {
        image.order = position as u32;
    }
}

/// Copy of the gallery sorted by `order`; ties keep their input order.
pub fn sort_by_order(gallery: &[GalleryImage]) -> Vec<GalleryImage> {
    let mut sorted = gallery.to_vec();
    sorted.sort_by_key(|image| image.order);
    sorted
}

/// Request body for persisting the current order.
pub fn order_payload(gallery: &[GalleryImage]) -> Vec<OrderUpdate> {
    gallery
        .iter()
        .enumerate()
        .map(|(position, image)| OrderUpdate {
            image_url: image.url.clone(),
            new_position: position as u32,
            color_association: image.color_association.clone(),
        })
        .collect()
}

/// Whether `b` holds exactly the images of `a`, associations included.
pub fn is_permutation(a: &[GalleryImage], b: &[GalleryImage]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut counts: HashMap<(&str, Option<&str>, Option<&str>), i64> = HashMap::new();
    for image in a {
        *counts.entry(identity(image)).or_default() += 1;
    }
    for image in b {
        *counts.entry(identity(image)).or_default() -= 1;
    }
    counts.values().all(|count| *count == 0)
}

fn identity(image: &GalleryImage) -> (&str, Option<&str>, Option<&str>) {
    (
        image.url.as_str(),
        image.color_association.as_deref(),
        image.category_association.as_deref(),
    )
}
