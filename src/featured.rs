//! Featured Products Curation
//!
//! At most four products, each in a distinct slot `1..=4`. Edits may collide
//! on an order while the admin relabels slots; collisions are rejected only
//! by `validate_before_save`.

use thiserror::Error;

use crate::model::{FeaturedSlot, ProductId};

pub const MAX_FEATURED_SLOTS: usize = 4;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CurationError {
    #[error("At most {max} products can be featured")]
    Capacity { max: usize },

    #[error("Product {0} is already featured")]
    DuplicateProduct(ProductId),

    #[error("More than one product is assigned to slot {0}")]
    DuplicateOrder(u8),

    #[error("Slot {0} is outside 1..=4")]
    OrderOutOfRange(u8),
}

impl CurationError {
    /// Stable identifier for mapping to a localized UI message.
    pub fn code(&self) -> &'static str {
        match self {
            CurationError::Capacity { .. } => "capacity",
            CurationError::DuplicateProduct(_) => "duplicate_product",
            CurationError::DuplicateOrder(_) => "duplicate_order",
            CurationError::OrderOutOfRange(_) => "order_out_of_range",
        }
    }
}

fn valid_order(order: u8) -> bool {
    (1..=MAX_FEATURED_SLOTS as u8).contains(&order)
}

/// First unoccupied slot scanning 1 to 4.
pub fn next_free_order(slots: &[FeaturedSlot]) -> Option<u8> {
    (1..=MAX_FEATURED_SLOTS as u8).find(|order| slots.iter().all(|slot| slot.order != *order))
}

/// Check every save-time invariant, reporting the first violation.
pub fn validate_before_save(slots: &[FeaturedSlot]) -> Result<(), CurationError> {
    if slots.len() > MAX_FEATURED_SLOTS {
        return Err(CurationError::Capacity { max: MAX_FEATURED_SLOTS });
    }

    for (index, slot) in slots.iter().enumerate() {
        if !valid_order(slot.order) {
            return Err(CurationError::OrderOutOfRange(slot.order));
        }
        let earlier = &slots[..index];
        if earlier.iter().any(|other| other.product_id == slot.product_id) {
            return Err(CurationError::DuplicateProduct(slot.product_id.clone()));
        }
        if earlier.iter().any(|other| other.order == slot.order) {
            return Err(CurationError::DuplicateOrder(slot.order));
        }
    }

    Ok(())
}

/// In-memory curation list edited before a wholesale save.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeaturedSlotCurator {
    slots: Vec<FeaturedSlot>,
}

impl FeaturedSlotCurator {
    pub fn new(slots: Vec<FeaturedSlot>) -> Self {
        Self { slots }
    }

    pub fn slots(&self) -> &[FeaturedSlot] {
        &self.slots
    }

    pub fn is_featured(&self, product_id: &str) -> bool {
        self.slots.iter().any(|slot| slot.product_id == product_id)
    }

    pub fn next_free_order(&self) -> Option<u8> {
        next_free_order(&self.slots)
    }

    /// Feature a product, taking the next free slot when `order` is omitted.
    /// Returns the slot the product landed in.
    pub fn add(&mut self, product_id: impl Into<ProductId>, order: Option<u8>) -> Result<u8, CurationError> {
        let product_id = product_id.into();
        if self.slots.len() >= MAX_FEATURED_SLOTS {
            return Err(CurationError::Capacity { max: MAX_FEATURED_SLOTS });
        }
        if self.is_featured(&product_id) {
            return Err(CurationError::DuplicateProduct(product_id));
        }

        let order = match order {
            Some(order) if !valid_order(order) => return Err(CurationError::OrderOutOfRange(order)),
            Some(order) => order,
            None => self
                .next_free_order()
                .ok_or(CurationError::Capacity { max: MAX_FEATURED_SLOTS })?,
        };

        self.slots.push(FeaturedSlot { product_id, order });
        Ok(order)
    }

    /// Remove a product; absent products are ignored.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.slots.len();
        self.slots.retain(|slot| slot.product_id != product_id);
        self.slots.len() != before
    }

    /// Relabel a product's slot. Collisions are allowed until save.
    /// Returns `false` when the product is not featured.
    pub fn set_order(&mut self, product_id: &str, new_order: u8) -> Result<bool, CurationError> {
        if !valid_order(new_order) {
            return Err(CurationError::OrderOutOfRange(new_order));
        }
        match self.slots.iter_mut().find(|slot| slot.product_id == product_id) {
            Some(slot) => {
                slot.order = new_order;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn validate_before_save(&self) -> Result<(), CurationError> {
        validate_before_save(&self.slots)
    }

    /// Validated full-replacement list, sorted by slot.
    pub fn save_payload(&self) -> Result<Vec<FeaturedSlot>, CurationError> {
        self.validate_before_save()?;
        let mut payload = self.slots.clone();
        payload.sort_by_key(|slot| slot.order);
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(id: &str, order: u8) -> FeaturedSlot {
        FeaturedSlot::new(id, order)
    }

    #[test]
    fn test_next_free_order_fills_gap() {
        assert_eq!(next_free_order(&[slot("a", 1), slot("b", 3)]), Some(2));
        assert_eq!(next_free_order(&[]), Some(1));
        let full = [slot("a", 4), slot("b", 3), slot("c", 2), slot("d", 1)];
        assert_eq!(next_free_order(&full), None);
    }

    #[test]
    fn test_add_uses_next_free_order() {
        let mut curator = FeaturedSlotCurator::new(vec![slot("a", 1), slot("b", 3)]);
        assert_eq!(curator.add("c", None), Ok(2));
        assert_eq!(curator.add("d", None), Ok(4));
    }

    #[test]
    fn test_fifth_product_is_rejected() {
        let mut curator = FeaturedSlotCurator::default();
        for id in ["a", "b", "c", "d"] {
            curator.add(id, None).unwrap();
        }
        let err = curator.add("e", None).unwrap_err();
        assert_eq!(err, CurationError::Capacity { max: 4 });
        assert_eq!(err.code(), "capacity");
    }

    #[test]
    fn test_duplicate_product_is_rejected() {
        let mut curator = FeaturedSlotCurator::new(vec![slot("a", 1)]);
        assert_eq!(curator.add("a", Some(2)), Err(CurationError::DuplicateProduct("a".into())));
    }

    #[test]
    fn test_add_with_explicit_order() {
        let mut curator = FeaturedSlotCurator::new(vec![slot("a", 1)]);
        assert_eq!(curator.add("b", Some(9)), Err(CurationError::OrderOutOfRange(9)));
        assert_eq!(curator.add("b", Some(1)), Ok(1));
        assert_eq!(curator.validate_before_save(), Err(CurationError::DuplicateOrder(1)));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut curator = FeaturedSlotCurator::new(vec![slot("a", 1)]);
        assert!(curator.remove("a"));
        assert!(!curator.remove("a"));
        assert!(curator.slots().is_empty());
    }

    #[test]
    fn test_set_order_allows_transient_collision() {
        let mut curator = FeaturedSlotCurator::new(vec![slot("a", 1), slot("b", 2)]);
        assert_eq!(curator.set_order("b", 1), Ok(true));
        assert_eq!(curator.validate_before_save(), Err(CurationError::DuplicateOrder(1)));
        assert_eq!(curator.set_order("a", 2), Ok(true));
        assert!(curator.validate_before_save().is_ok());
        assert_eq!(curator.set_order("a", 0), Err(CurationError::OrderOutOfRange(0)));
        assert_eq!(curator.set_order("zzz", 3), Ok(false));
    }

    #[test]
    fn test_validate_duplicate_order() {
        let err = validate_before_save(&[slot("a", 2), slot("b", 2)]).unwrap_err();
        assert_eq!(err.code(), "duplicate_order");
    }

    #[test]
    fn test_validate_rejects_wire_level_breakage() {
        let five: Vec<_> = (1..=5).map(|i| slot(&i.to_string(), i)).collect();
        assert_eq!(validate_before_save(&five), Err(CurationError::Capacity { max: 4 }));
        assert_eq!(
            validate_before_save(&[slot("a", 1), slot("a", 2)]),
            Err(CurationError::DuplicateProduct("a".into()))
        );
    }

    #[test]
    fn test_save_payload_sorted() {
        let curator = FeaturedSlotCurator::new(vec![slot("c", 3), slot("a", 1), slot("b", 2)]);
        let payload = curator.save_payload().unwrap();
        assert_eq!(payload.iter().map(|s| s.order).collect::<Vec<_>>(), vec![1, 2, 3]);
    }
}
