//! # Error Taxonomy
//!
//! Every failure a marketplace operation can surface, in one enum. Each
//! variant carries the offending values so callers can render a precise
//! message instead of a shrug. An error always means the whole operation
//! was aborted with no state change — there is no partial failure here.

use thiserror::Error;

use crate::asset::AssetError;
use crate::auth::Role;
use crate::item::ItemId;
use crate::payout::PayoutError;
use crate::AccountId;

/// Errors that can occur during marketplace operations.
#[derive(Debug, Error)]
pub enum MarketError {
    /// The caller does not hold the role required for this operation.
    #[error("unauthorized: account {account} does not hold the {role} role")]
    Unauthorized {
        /// The role the operation requires.
        role: Role,
        /// The account that attempted the call.
        account: AccountId,
    },

    /// Minting with a zero price.
    #[error("invalid price: items cannot be minted at price 0")]
    InvalidPrice,

    /// A listing attempt by someone who does not own the asset.
    #[error("not owner: {caller} tried to list an asset owned by {owner}")]
    NotOwner {
        /// The account that attempted the call.
        caller: AccountId,
        /// The actual owner according to the asset ledger.
        owner: AccountId,
    },

    /// The referenced item has never been minted.
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),

    /// A purchase attempt on an item that is not flagged for sale.
    #[error("item {0} is not for sale")]
    NotForSale(ItemId),

    /// The tendered value is below the listed price.
    #[error("insufficient payment: required {required}, sent {sent}")]
    InsufficientPayment {
        /// The listed price.
        required: u64,
        /// The value the buyer actually tendered.
        sent: u64,
    },

    /// A fee update exceeding the hard caps.
    #[error("fee out of range: artist {artist_pct}% (cap {artist_cap}%), platform {platform_pct}% (cap {platform_cap}%)")]
    FeeOutOfRange {
        /// Requested artist percentage.
        artist_pct: u8,
        /// Requested platform percentage.
        platform_pct: u8,
        /// Maximum allowed artist percentage.
        artist_cap: u8,
        /// Maximum allowed platform percentage.
        platform_cap: u8,
    },

    /// The platform address cannot be the null identity.
    #[error("invalid address: the platform address cannot be the null identity")]
    InvalidAddress,

    /// Withdrawal with nothing to withdraw.
    #[error("no funds: account {account} has a zero balance")]
    NoFunds {
        /// The account that attempted the withdrawal.
        account: AccountId,
    },

    /// A credit would push a pending balance past `u64::MAX`.
    ///
    /// If you're hitting this, someone has accrued more than 18.4
    /// quintillion units. That's either a bug or an attack.
    #[error("balance overflow: account {account} holds {current}, credit of {credit} rejected")]
    BalanceOverflow {
        /// The account being credited.
        account: AccountId,
        /// The balance before the failed credit.
        current: u64,
        /// The credit that caused the overflow.
        credit: u64,
    },

    /// The underlying asset or value transfer failed.
    #[error("transfer failure: {reason}")]
    TransferFailure {
        /// What the collaborator reported.
        reason: String,
    },
}

impl From<AssetError> for MarketError {
    fn from(err: AssetError) -> Self {
        MarketError::TransferFailure {
            reason: err.to_string(),
        }
    }
}

impl From<PayoutError> for MarketError {
    fn from(err: PayoutError) -> Self {
        MarketError::TransferFailure {
            reason: err.to_string(),
        }
    }
}
