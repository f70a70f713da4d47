//! # Balance Ledger (Pull Payments)
//!
//! Per-account pending-withdrawal balances. A sale never pushes money to
//! anyone — it credits this ledger, and each stakeholder withdraws on their
//! own transaction. That isolates a failing or hostile recipient to their
//! own withdrawal instead of wedging someone else's purchase.
//!
//! Entries are created lazily on first credit and persist at zero after a
//! withdrawal: an account that withdrew everything is indistinguishable in
//! amount from one never credited, but its key remains as a historical
//! trace.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::MarketError;
use crate::AccountId;

/// Pending-withdrawal balances keyed by account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BalanceLedger {
    balances: HashMap<AccountId, u64>,
}

impl BalanceLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits an account, creating its entry on first use.
    ///
    /// Returns the new balance.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::BalanceOverflow`] if the credit would exceed
    /// `u64::MAX`. The balance is left unchanged in that case.
    pub fn credit(&mut self, account: &str, amount: u64) -> Result<u64, MarketError> {
        let balance = self.balances.entry(account.to_string()).or_insert(0);
        let updated = balance
            .checked_add(amount)
            .ok_or(MarketError::BalanceOverflow {
                account: account.to_string(),
                current: *balance,
                credit: amount,
            })?;
        *balance = updated;
        Ok(updated)
    }

    /// Applies a batch of credits atomically.
    ///
    /// Either every credit lands or none does: if one credit overflows,
    /// the credits already applied are reversed before the error is
    /// returned. The same account may appear more than once in the batch
    /// (an artist selling their own work is credited twice in one sale).
    pub fn credit_many(&mut self, credits: &[(&str, u64)]) -> Result<(), MarketError> {
        for (applied, &(account, amount)) in credits.iter().enumerate() {
            if let Err(err) = self.credit(account, amount) {
                self.debit_many(&credits[..applied]);
                return Err(err);
            }
        }
        Ok(())
    }

    /// Reverses previously applied credits. Crate-internal: callers must
    /// only pass credits they know were applied, which makes the
    /// subtraction infallible.
    pub(crate) fn debit_many(&mut self, credits: &[(&str, u64)]) {
        for &(account, amount) in credits {
            let balance = self
                .balances
                .get_mut(account)
                .expect("reversing a credit that was never applied");
            *balance -= amount;
        }
    }

    /// Zeroes an account's balance, returning what it held.
    ///
    /// The entry itself persists at zero. An account with no entry simply
    /// returns 0 and no entry is created.
    pub fn zero_out(&mut self, account: &str) -> u64 {
        match self.balances.get_mut(account) {
            Some(balance) => std::mem::take(balance),
            None => 0,
        }
    }

    /// Restores a balance taken by [`zero_out`](Self::zero_out) after a
    /// failed external transfer. Crate-internal: the amount was held
    /// moments ago, so the addition cannot overflow.
    pub(crate) fn restore(&mut self, account: &str, amount: u64) {
        *self.balances.entry(account.to_string()).or_insert(0) += amount;
    }

    /// The pending balance of an account, 0 if never credited.
    pub fn balance_of(&self, account: &str) -> u64 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Iterates over all `(account, balance)` entries, including those
    /// sitting at zero after a withdrawal.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.balances.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of accounts ever credited.
    pub fn len(&self) -> usize {
        self.balances.len()
    }

    /// Returns `true` if no account was ever credited.
    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }
}
