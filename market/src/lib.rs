// Copyright (c) 2026 Galleria Contributors. MIT License.
// See LICENSE for details.

//! # Galleria Market — Ledger Core
//!
//! The marketplace ledger for unique digital assets: mint an item, flag it
//! for sale, settle a purchase with automatic fee-splitting, and let every
//! stakeholder withdraw their accrued funds on their own schedule.
//!
//! The crate deliberately owns *only* the marketplace state machine. The
//! canonical asset registry (who holds which asset) and the role store are
//! external collaborators consumed behind capability traits — we read
//! `owner_of`, request `transfer_asset`, and ask `has_role`, nothing more.
//!
//! ## Architecture
//!
//! - **fees** — two capped percentage rates and the split arithmetic.
//! - **item** — the item table: sale metadata keyed by id, ids never reused.
//! - **listing** — the for-sale index. A derived structure; keeping it in
//!   lockstep with the item table is half the job of this crate.
//! - **balance** — pull-payment balances. Nobody gets pushed money here;
//!   you withdraw, or the funds wait.
//! - **market** — the [`Marketplace`] facade that ties the ledgers together
//!   and enforces settlement atomicity.
//! - **auth** / **asset** / **payout** — capability traits for the external
//!   collaborators, plus in-memory reference implementations.
//! - **events** — what an external indexer is allowed to observe.
//!
//! ## Design Principles
//!
//! 1. All monetary arithmetic is checked or widened — wrapping math and
//!    money do not mix.
//! 2. Every public operation is all-or-nothing: an error leaves the ledger
//!    exactly as it was.
//! 3. External calls never run while ledger state is half-committed. The
//!    exclusive borrow on [`Marketplace`] spans each operation's whole body,
//!    so nothing can re-enter and observe uncommitted state.
//! 4. Every public type is serializable (serde) for persistence and wire
//!    transport.

pub mod asset;
pub mod auth;
pub mod balance;
pub mod error;
pub mod events;
pub mod fees;
pub mod item;
pub mod listing;
pub mod market;
pub mod payout;

/// Account identity: the hex-encoded public key of a participant.
///
/// The empty string is the null identity and is rejected wherever an
/// account must actually be able to receive funds.
pub type AccountId = String;

pub use asset::{AssetError, AssetLedger, InMemoryAssetLedger};
pub use auth::{AccessControl, Role, RoleTable};
pub use balance::BalanceLedger;
pub use error::MarketError;
pub use events::MarketEvent;
pub use fees::{FeePolicy, FeeSplit, ARTIST_FEE_CAP, PLATFORM_FEE_CAP};
pub use item::{Item, ItemId, ItemRegistry};
pub use listing::ListingIndex;
pub use market::Marketplace;
pub use payout::{Payout, PayoutError, PayoutLog, ValueTransfer};
