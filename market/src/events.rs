//! # Observable Events
//!
//! What external indexers and UIs are allowed to see. The marketplace
//! appends one entry per committed state change to its event log; how the
//! log leaves the process (websocket, chain log, file) is someone else's
//! problem. An event is only ever appended after the operation it
//! describes has fully committed.

use serde::{Deserialize, Serialize};

use crate::item::ItemId;
use crate::AccountId;

/// One committed marketplace state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketEvent {
    /// A new item was minted.
    Minted {
        /// The new item's id.
        id: ItemId,
        /// The creator, credited as artist for the item's lifetime.
        artist: AccountId,
        /// The initial price.
        price: u64,
        /// The metadata reference stored with the asset ledger.
        metadata_ref: String,
    },
    /// An item was flagged for sale.
    Listed {
        /// The listed item.
        id: ItemId,
        /// The listing price.
        price: u64,
        /// The owner who listed it.
        seller: AccountId,
    },
    /// A purchase settled.
    Sold {
        /// The item that changed hands.
        id: ItemId,
        /// The previous owner.
        seller: AccountId,
        /// The new owner.
        buyer: AccountId,
        /// The full tendered value, including any overpayment.
        amount_paid: u64,
    },
    /// The fee rates were replaced.
    FeesUpdated {
        /// The new artist royalty rate.
        artist_pct: u8,
        /// The new platform commission rate.
        platform_pct: u8,
    },
    /// A stakeholder withdrew their pending balance.
    Withdrawn {
        /// The account that withdrew.
        account: AccountId,
        /// The amount paid out.
        amount: u64,
    },
}

impl std::fmt::Display for MarketEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarketEvent::Minted {
                id, artist, price, ..
            } => {
                write!(f, "minted item {id} by {artist} at {price}")
            }
            MarketEvent::Listed { id, price, seller } => {
                write!(f, "listed item {id} at {price} by {seller}")
            }
            MarketEvent::Sold {
                id,
                seller,
                buyer,
                amount_paid,
            } => write!(f, "sold item {id}: {seller} -> {buyer} for {amount_paid}"),
            MarketEvent::FeesUpdated {
                artist_pct,
                platform_pct,
            } => write!(f, "fees updated: artist {artist_pct}%, platform {platform_pct}%"),
            MarketEvent::Withdrawn { account, amount } => {
                write!(f, "withdrawn {amount} by {account}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialization_roundtrip() {
        let event = MarketEvent::Sold {
            id: 1,
            seller: "a".into(),
            buyer: "b".into(),
            amount_paid: 100,
        };
        let json = serde_json::to_string(&event).expect("serialize");
        let recovered: MarketEvent = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(event, recovered);
    }

    #[test]
    fn display_is_compact() {
        let event = MarketEvent::Withdrawn {
            account: "alice".into(),
            amount: 90,
        };
        assert_eq!(event.to_string(), "withdrawn 90 by alice");
    }
}
