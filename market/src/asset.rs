//! # Asset Ledger Capability
//!
//! Canonical asset identity and transfer live *outside* the marketplace.
//! The core only consumes this capability: mint an asset for an owner,
//! read who owns it, request a transfer, attach a metadata reference.
//!
//! [`InMemoryAssetLedger`] is the reference implementation used by tests
//! and the CLI. It allocates ids sequentially from 1, which is exactly
//! the contract [`crate::item::ItemRegistry`] expects.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::item::ItemId;
use crate::AccountId;

/// Errors reported by an asset ledger collaborator.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The referenced asset has never been minted.
    #[error("unknown asset {0}")]
    UnknownAsset(ItemId),

    /// A transfer named a `from` account that does not own the asset.
    #[error("asset {id} is owned by {owner}, not {claimed}")]
    WrongOwner {
        /// The asset in question.
        id: ItemId,
        /// The actual owner.
        owner: AccountId,
        /// The account the caller claimed owns it.
        claimed: AccountId,
    },
}

/// Capability interface consumed from the asset ledger collaborator.
pub trait AssetLedger {
    /// Creates a new asset owned by `owner` and returns its id.
    ///
    /// Ids must be fresh and strictly increasing — the marketplace rejects
    /// anything else.
    fn mint_asset(&mut self, owner: &str) -> Result<ItemId, AssetError>;

    /// Returns the current owner of an asset.
    fn owner_of(&self, id: ItemId) -> Result<AccountId, AssetError>;

    /// Transfers an asset from its current owner to a new one.
    fn transfer_asset(&mut self, id: ItemId, from: &str, to: &str) -> Result<(), AssetError>;

    /// Attaches a metadata reference (typically a URI) to an asset.
    fn set_metadata(&mut self, id: ItemId, reference: &str) -> Result<(), AssetError>;
}

/// In-memory asset ledger: sequential ids, an ownership map, and a
/// metadata map. The reference collaborator for tests and the CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryAssetLedger {
    owners: HashMap<ItemId, AccountId>,
    metadata: HashMap<ItemId, String>,
    next_id: ItemId,
}

impl InMemoryAssetLedger {
    /// Creates an empty ledger. The first minted asset gets id 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// The metadata reference attached to an asset, if any.
    pub fn metadata_of(&self, id: ItemId) -> Option<&str> {
        self.metadata.get(&id).map(String::as_str)
    }

    /// Number of assets minted so far.
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    /// Returns `true` if no asset has been minted.
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

impl AssetLedger for InMemoryAssetLedger {
    fn mint_asset(&mut self, owner: &str) -> Result<ItemId, AssetError> {
        self.next_id += 1;
        self.owners.insert(self.next_id, owner.to_string());
        Ok(self.next_id)
    }

    fn owner_of(&self, id: ItemId) -> Result<AccountId, AssetError> {
        self.owners
            .get(&id)
            .cloned()
            .ok_or(AssetError::UnknownAsset(id))
    }

    fn transfer_asset(&mut self, id: ItemId, from: &str, to: &str) -> Result<(), AssetError> {
        let owner = self.owners.get_mut(&id).ok_or(AssetError::UnknownAsset(id))?;
        if owner != from {
            return Err(AssetError::WrongOwner {
                id,
                owner: owner.clone(),
                claimed: from.to_string(),
            });
        }
        *owner = to.to_string();
        Ok(())
    }

    fn set_metadata(&mut self, id: ItemId, reference: &str) -> Result<(), AssetError> {
        if !self.owners.contains_key(&id) {
            return Err(AssetError::UnknownAsset(id));
        }
        self.metadata.insert(id, reference.to_string());
        Ok(())
    }
}
