//! # Fee Policy
//!
//! Two percentage rates, each with a hard cap: the artist royalty and the
//! platform commission. Whatever the two cuts leave behind goes to the
//! seller, so the split always sums to the tendered amount exactly —
//! truncation from integer division is absorbed by the seller's share.

use serde::{Deserialize, Serialize};

use crate::error::MarketError;

/// Maximum artist royalty, in percent of the sale amount.
pub const ARTIST_FEE_CAP: u8 = 30;

/// Maximum platform commission, in percent of the sale amount.
pub const PLATFORM_FEE_CAP: u8 = 15;

/// The current fee rates. Both rates are updated together or not at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeePolicy {
    artist_pct: u8,
    platform_pct: u8,
}

/// How one sale amount divides among the three stakeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSplit {
    /// The artist's royalty cut.
    pub artist_cut: u64,
    /// The platform's commission cut.
    pub platform_cut: u64,
    /// Everything left over, including any overpayment above the list price.
    pub seller_cut: u64,
}

impl FeePolicy {
    /// Creates a policy with the given rates.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::FeeOutOfRange`] if either rate exceeds its cap.
    pub fn new(artist_pct: u8, platform_pct: u8) -> Result<Self, MarketError> {
        let mut policy = Self::default();
        policy.set(artist_pct, platform_pct)?;
        Ok(policy)
    }

    /// Replaces both rates atomically.
    ///
    /// Validation happens before either field is written, so a rejected
    /// update leaves the previous rates fully intact.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::FeeOutOfRange`] if either rate exceeds its cap.
    pub fn set(&mut self, artist_pct: u8, platform_pct: u8) -> Result<(), MarketError> {
        if artist_pct > ARTIST_FEE_CAP || platform_pct > PLATFORM_FEE_CAP {
            return Err(MarketError::FeeOutOfRange {
                artist_pct,
                platform_pct,
                artist_cap: ARTIST_FEE_CAP,
                platform_cap: PLATFORM_FEE_CAP,
            });
        }
        self.artist_pct = artist_pct;
        self.platform_pct = platform_pct;
        Ok(())
    }

    /// The current artist royalty rate, in percent.
    pub fn artist_pct(&self) -> u8 {
        self.artist_pct
    }

    /// The current platform commission rate, in percent.
    pub fn platform_pct(&self) -> u8 {
        self.platform_pct
    }

    /// Splits a sale amount among artist, platform, and seller.
    ///
    /// Cuts use truncating integer division. The intermediate product is
    /// widened to `u128`, so the split cannot overflow for any `u64` amount.
    pub fn split(&self, amount: u64) -> FeeSplit {
        let artist_cut = (amount as u128 * self.artist_pct as u128 / 100) as u64;
        let platform_cut = (amount as u128 * self.platform_pct as u128 / 100) as u64;
        // Caps sum to 45%, so the two cuts can never exceed the amount.
        let seller_cut = amount - artist_cut - platform_cut;
        FeeSplit {
            artist_cut,
            platform_cut,
            seller_cut,
        }
    }
}
