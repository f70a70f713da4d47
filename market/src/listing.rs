//! # Listing Index
//!
//! The set of item ids currently flagged for sale. This is a *derived*
//! structure: membership here must mirror each item's `for_sale` flag on
//! every mutation, and [`crate::market::Marketplace`] is the only writer
//! that keeps the two in lockstep.
//!
//! Internally the index pairs an order vector with a slot map, giving O(1)
//! membership checks and O(1) removal (swap-with-last). Removal does not
//! preserve the order of the remaining entries — callers must not rely
//! on listing order surviving a sale.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::item::ItemId;

/// An unordered set of for-sale item ids with O(1) insert, lookup, and
/// removal, iterable in insertion order between removals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingIndex {
    /// Ids in index order. Removal swaps the last entry into the gap.
    order: Vec<ItemId>,
    /// Position of each id inside `order`.
    slots: HashMap<ItemId, usize>,
}

impl ListingIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an id, returning `false` if it was already present.
    ///
    /// Idempotent by construction: an id can never appear twice.
    pub fn insert(&mut self, id: ItemId) -> bool {
        if self.slots.contains_key(&id) {
            return false;
        }
        self.slots.insert(id, self.order.len());
        self.order.push(id);
        true
    }

    /// Removes an id, returning `false` if it was not present.
    pub fn remove(&mut self, id: ItemId) -> bool {
        let Some(slot) = self.slots.remove(&id) else {
            return false;
        };
        self.order.swap_remove(slot);
        // The former last entry (if any) now lives in the vacated slot.
        if let Some(&moved) = self.order.get(slot) {
            self.slots.insert(moved, slot);
        }
        true
    }

    /// Returns `true` if the id is currently listed.
    pub fn contains(&self, id: ItemId) -> bool {
        self.slots.contains_key(&id)
    }

    /// The listed ids, in index order.
    pub fn ids(&self) -> &[ItemId] {
        &self.order
    }

    /// Number of listed ids.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if nothing is listed.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
