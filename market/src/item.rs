//! # Item Registry
//!
//! The item table: one record of sale metadata per minted asset. Records
//! are created at mint and never deleted — a sold item stays in the table
//! with `for_sale` toggled off, so the registry doubles as the historical
//! record of everything ever minted.
//!
//! Ids are allocated by the asset ledger collaborator, starting at 1 and
//! strictly increasing. The registry enforces that monotonicity on insert
//! so a misbehaving collaborator can never recycle an id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::MarketError;
use crate::AccountId;

/// Unique item identifier. Shared with the asset ledger: the item id *is*
/// the asset id.
pub type ItemId = u64;

/// Sale metadata for one unique asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique id, assigned at mint, never reused.
    pub id: ItemId,
    /// The account credited as original creator. Immutable after mint.
    pub artist: AccountId,
    /// Listed price in the smallest unit of the settlement currency.
    pub price: u64,
    /// Whether the item is currently flagged for sale.
    pub for_sale: bool,
    /// Timestamp when the item was minted.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the most recent list or sale.
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Creates a freshly minted item record, flagged for sale.
    pub fn new(id: ItemId, artist: AccountId, price: u64) -> Self {
        let now = Utc::now();
        Self {
            id,
            artist,
            price,
            for_sale: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The item table, keyed by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemRegistry {
    items: HashMap<ItemId, Item>,
    /// Highest id ever inserted. New ids must exceed it.
    last_id: ItemId,
}

impl ItemRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new item record.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::TransferFailure`] if the item's id is not
    /// strictly greater than every id already in the table — that can only
    /// happen when the asset ledger hands out a stale or duplicate id.
    pub fn insert(&mut self, item: Item) -> Result<(), MarketError> {
        if item.id <= self.last_id {
            return Err(MarketError::TransferFailure {
                reason: format!(
                    "asset ledger allocated id {} but the registry has already seen id {}",
                    item.id, self.last_id
                ),
            });
        }
        self.last_id = item.id;
        self.items.insert(item.id, item);
        Ok(())
    }

    /// Looks up an item by id.
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    /// Looks up an item mutably. Crate-internal: only the marketplace
    /// facade may mutate records, and only `price`, `for_sale`, and
    /// `updated_at` ever change after mint.
    pub(crate) fn get_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.get_mut(&id)
    }

    /// Returns `true` if the id has been minted.
    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    /// The highest id ever inserted, or 0 for an empty registry.
    pub fn last_id(&self) -> ItemId {
        self.last_id
    }

    /// Number of items ever minted.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing has been minted yet.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over all item records in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }
}
