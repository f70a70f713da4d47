//! # Marketplace Facade
//!
//! The single writer over all ledger state: item table, listing index,
//! pending balances, fee policy, platform address, and event log. Every
//! public operation executes as one indivisible transaction — it either
//! commits all of its effects or none of them.
//!
//! ## Atomicity and Re-entrancy
//!
//! Each mutating operation takes `&mut self` for its entire body, so no
//! nested call can re-enter the marketplace and observe half-committed
//! state; the exclusive borrow is the re-entrancy lock. The two operations
//! that call out to a collaborator mid-flight (`buy`'s asset transfer,
//! `withdraw`'s payout) reverse their already-applied ledger effects when
//! the external call fails, which restores the all-or-nothing guarantee.
//!
//! ## External Capabilities
//!
//! Role checks, asset custody, and the payout rail are *not* owned here.
//! Each gated call receives the capability it needs as an explicit trait
//! object, so the core stays independent of any particular role store or
//! asset registry.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::asset::AssetLedger;
use crate::auth::{AccessControl, Role};
use crate::balance::BalanceLedger;
use crate::error::MarketError;
use crate::events::MarketEvent;
use crate::fees::{FeePolicy, FeeSplit};
use crate::item::{Item, ItemId, ItemRegistry};
use crate::listing::ListingIndex;
use crate::payout::ValueTransfer;
use crate::AccountId;

/// The marketplace ledger core.
///
/// Owns all mutable marketplace state. Collaborators mutate nothing here;
/// conversely, the marketplace holds no asset custody and no role data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Marketplace {
    items: ItemRegistry,
    listings: ListingIndex,
    fees: FeePolicy,
    balances: BalanceLedger,
    platform_address: AccountId,
    events: Vec<MarketEvent>,
}

impl Marketplace {
    /// Creates a marketplace with zero fees and the given platform address.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::InvalidAddress`] if the platform address is
    /// the null identity.
    pub fn new(platform_address: impl Into<AccountId>) -> Result<Self, MarketError> {
        let platform_address = platform_address.into();
        if platform_address.is_empty() {
            return Err(MarketError::InvalidAddress);
        }
        Ok(Self {
            items: ItemRegistry::new(),
            listings: ListingIndex::new(),
            fees: FeePolicy::default(),
            balances: BalanceLedger::new(),
            platform_address,
            events: Vec::new(),
        })
    }

    // -----------------------------------------------------------------------
    // Minting and listing
    // -----------------------------------------------------------------------

    /// Mints a new item: creates the asset, stores its metadata reference,
    /// and inserts the sale record.
    ///
    /// The fresh record is flagged `for_sale` but is *not* entered into the
    /// listing index — it stays invisible to [`listed_items`](Self::listed_items)
    /// until the owner calls [`list`](Self::list). Known quirk, kept for
    /// compatibility with existing indexers.
    ///
    /// # Errors
    ///
    /// - [`MarketError::Unauthorized`] if the caller lacks the minter role.
    /// - [`MarketError::InvalidPrice`] if `price` is 0.
    /// - [`MarketError::TransferFailure`] if the asset ledger fails or
    ///   allocates a non-fresh id.
    pub fn mint(
        &mut self,
        auth: &dyn AccessControl,
        assets: &mut dyn AssetLedger,
        caller: &str,
        metadata_ref: &str,
        price: u64,
    ) -> Result<ItemId, MarketError> {
        if !auth.has_role(Role::Minter, caller) {
            return Err(MarketError::Unauthorized {
                role: Role::Minter,
                account: caller.to_string(),
            });
        }
        if price == 0 {
            return Err(MarketError::InvalidPrice);
        }

        let id = assets.mint_asset(caller)?;
        assets.set_metadata(id, metadata_ref)?;
        self.items.insert(Item::new(id, caller.to_string(), price))?;

        info!(id, artist = caller, price, "item minted");
        self.events.push(MarketEvent::Minted {
            id,
            artist: caller.to_string(),
            price,
            metadata_ref: metadata_ref.to_string(),
        });
        Ok(id)
    }

    /// Flags an item for sale at a price.
    ///
    /// Only the current asset owner may list. Listing an already-listed
    /// item updates the price; the index holds each id at most once.
    ///
    /// # Errors
    ///
    /// - [`MarketError::ItemNotFound`] if the item was never minted.
    /// - [`MarketError::NotOwner`] if the caller does not own the asset.
    /// - [`MarketError::TransferFailure`] if the asset ledger fails.
    pub fn list(
        &mut self,
        assets: &dyn AssetLedger,
        caller: &str,
        id: ItemId,
        price: u64,
    ) -> Result<(), MarketError> {
        if !self.items.contains(id) {
            return Err(MarketError::ItemNotFound(id));
        }
        let owner = assets.owner_of(id)?;
        if owner != caller {
            return Err(MarketError::NotOwner {
                caller: caller.to_string(),
                owner,
            });
        }

        let item = self.items.get_mut(id).unwrap();
        item.price = price;
        item.for_sale = true;
        item.updated_at = chrono::Utc::now();
        self.listings.insert(id);

        debug!(id, price, seller = caller, "item listed");
        self.events.push(MarketEvent::Listed {
            id,
            price,
            seller: caller.to_string(),
        });
        Ok(())
    }

    /// A snapshot of every currently listed item, in index order.
    pub fn listed_items(&self) -> Vec<Item> {
        self.listings
            .ids()
            .iter()
            .filter_map(|&id| self.items.get(id).cloned())
            .collect()
    }

    // -----------------------------------------------------------------------
    // Settlement
    // -----------------------------------------------------------------------

    /// Settles a purchase: splits the tendered value among artist,
    /// platform, and seller, transfers the asset, and delists the item.
    ///
    /// Overpayment above the listed price flows entirely to the seller;
    /// there is no refund path. The three balance credits, the ownership
    /// transfer, and the item/index updates commit together or not at all.
    ///
    /// # Errors
    ///
    /// - [`MarketError::ItemNotFound`] / [`MarketError::NotForSale`] for an
    ///   absent or unlisted item.
    /// - [`MarketError::InsufficientPayment`] if `tendered` is below the price.
    /// - [`MarketError::BalanceOverflow`] if a stakeholder's pending balance
    ///   would overflow.
    /// - [`MarketError::TransferFailure`] if the asset ledger rejects the
    ///   ownership transfer; all credited balances are rolled back.
    pub fn buy(
        &mut self,
        assets: &mut dyn AssetLedger,
        caller: &str,
        id: ItemId,
        tendered: u64,
    ) -> Result<FeeSplit, MarketError> {
        let (price, for_sale, artist) = match self.items.get(id) {
            Some(item) => (item.price, item.for_sale, item.artist.clone()),
            None => return Err(MarketError::ItemNotFound(id)),
        };
        if !for_sale {
            return Err(MarketError::NotForSale(id));
        }
        if tendered < price {
            return Err(MarketError::InsufficientPayment {
                required: price,
                sent: tendered,
            });
        }

        let seller = assets.owner_of(id)?;
        let split = self.fees.split(tendered);
        let platform = self.platform_address.clone();
        let credits = [
            (artist.as_str(), split.artist_cut),
            (platform.as_str(), split.platform_cut),
            (seller.as_str(), split.seller_cut),
        ];
        self.balances.credit_many(&credits)?;

        // The one external call of the operation. Ledger credits are
        // already in; reverse them if the custody transfer refuses.
        if let Err(err) = assets.transfer_asset(id, &seller, caller) {
            warn!(id, %err, "asset transfer failed, reversing settlement credits");
            self.balances.debit_many(&credits);
            return Err(err.into());
        }

        let item = self.items.get_mut(id).unwrap();
        item.for_sale = false;
        item.updated_at = chrono::Utc::now();
        self.listings.remove(id);

        info!(
            id,
            seller = %seller,
            buyer = caller,
            amount = tendered,
            artist_cut = split.artist_cut,
            platform_cut = split.platform_cut,
            seller_cut = split.seller_cut,
            "purchase settled"
        );
        self.events.push(MarketEvent::Sold {
            id,
            seller,
            buyer: caller.to_string(),
            amount_paid: tendered,
        });
        Ok(split)
    }

    // -----------------------------------------------------------------------
    // Withdrawal
    // -----------------------------------------------------------------------

    /// Pays out the caller's entire pending balance.
    ///
    /// Checks-effects-interactions: the balance is zeroed *before* the
    /// rail is invoked, so any nested attempt to withdraw again observes
    /// an empty balance. A failed payment restores the balance and aborts.
    ///
    /// Returns the amount withdrawn.
    ///
    /// # Errors
    ///
    /// - [`MarketError::NoFunds`] if the caller's balance is zero.
    /// - [`MarketError::TransferFailure`] if the rail rejects the payment;
    ///   the balance is restored in full.
    pub fn withdraw(
        &mut self,
        rail: &mut dyn ValueTransfer,
        caller: &str,
    ) -> Result<u64, MarketError> {
        let amount = self.balances.zero_out(caller);
        if amount == 0 {
            return Err(MarketError::NoFunds {
                account: caller.to_string(),
            });
        }

        if let Err(err) = rail.pay(caller, amount) {
            warn!(account = caller, amount, %err, "payout failed, restoring balance");
            self.balances.restore(caller, amount);
            return Err(err.into());
        }

        info!(account = caller, amount, "balance withdrawn");
        self.events.push(MarketEvent::Withdrawn {
            account: caller.to_string(),
            amount,
        });
        Ok(amount)
    }

    // -----------------------------------------------------------------------
    // Administration
    // -----------------------------------------------------------------------

    /// Replaces both fee rates atomically. Admin only.
    ///
    /// # Errors
    ///
    /// - [`MarketError::Unauthorized`] if the caller lacks the admin role.
    /// - [`MarketError::FeeOutOfRange`] if either rate exceeds its cap;
    ///   the previous rates stay in force.
    pub fn set_fees(
        &mut self,
        auth: &dyn AccessControl,
        caller: &str,
        artist_pct: u8,
        platform_pct: u8,
    ) -> Result<(), MarketError> {
        self.require_admin(auth, caller)?;
        self.fees.set(artist_pct, platform_pct)?;

        info!(artist_pct, platform_pct, "fee rates updated");
        self.events.push(MarketEvent::FeesUpdated {
            artist_pct,
            platform_pct,
        });
        Ok(())
    }

    /// Redirects future platform-fee credits to a new address. Admin only.
    ///
    /// Balances already credited to the previous address stay with it.
    ///
    /// # Errors
    ///
    /// - [`MarketError::Unauthorized`] if the caller lacks the admin role.
    /// - [`MarketError::InvalidAddress`] if the new address is the null
    ///   identity.
    pub fn set_platform_address(
        &mut self,
        auth: &dyn AccessControl,
        caller: &str,
        new_address: &str,
    ) -> Result<(), MarketError> {
        self.require_admin(auth, caller)?;
        if new_address.is_empty() {
            return Err(MarketError::InvalidAddress);
        }
        self.platform_address = new_address.to_string();
        info!(platform_address = new_address, "platform address updated");
        Ok(())
    }

    fn require_admin(&self, auth: &dyn AccessControl, caller: &str) -> Result<(), MarketError> {
        if auth.has_role(Role::Admin, caller) {
            Ok(())
        } else {
            Err(MarketError::Unauthorized {
                role: Role::Admin,
                account: caller.to_string(),
            })
        }
    }

    // -----------------------------------------------------------------------
    // Read-only accessors
    // -----------------------------------------------------------------------

    /// The item record for an id, if minted.
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id)
    }

    /// The current `(artist_pct, platform_pct)` fee rates.
    pub fn fees(&self) -> (u8, u8) {
        (self.fees.artist_pct(), self.fees.platform_pct())
    }

    /// The account currently entitled to platform fees.
    pub fn platform_address(&self) -> &str {
        &self.platform_address
    }

    /// The pending balance of an account.
    pub fn balance_of(&self, account: &str) -> u64 {
        self.balances.balance_of(account)
    }

    /// The pending-balance ledger, for inspection.
    pub fn balances(&self) -> &BalanceLedger {
        &self.balances
    }

    /// Events committed so far, oldest first.
    pub fn events(&self) -> &[MarketEvent] {
        &self.events
    }

    /// Drains the event log, handing the entries to an external consumer.
    pub fn take_events(&mut self) -> Vec<MarketEvent> {
        std::mem::take(&mut self.events)
    }
}
