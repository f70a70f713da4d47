//! # Value Transfer Capability
//!
//! The rail that actually moves money out of the marketplace during a
//! withdrawal. On a chain this is the native value transfer; in tests and
//! the CLI it is [`PayoutLog`], which just records what was paid to whom.
//!
//! A withdrawal is only final if the rail accepts the payment — the
//! marketplace rolls the zeroed balance back when `pay` fails.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::AccountId;

/// Errors reported by a value-transfer collaborator.
#[derive(Debug, Error)]
pub enum PayoutError {
    /// The rail refused or failed to execute the payment.
    #[error("payout to {account} rejected: {reason}")]
    Rejected {
        /// The intended recipient.
        account: AccountId,
        /// What the rail reported.
        reason: String,
    },
}

/// Capability interface for pushing withdrawn funds to an account.
pub trait ValueTransfer {
    /// Pays `amount` to `to`. Must either fully succeed or fully fail.
    fn pay(&mut self, to: &str, amount: u64) -> Result<(), PayoutError>;
}

/// One completed payout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    /// The recipient account.
    pub account: AccountId,
    /// The amount paid.
    pub amount: u64,
    /// When the payout was executed.
    pub paid_at: DateTime<Utc>,
}

/// A rail that records every payout it executes. Never fails.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PayoutLog {
    payouts: Vec<Payout>,
}

impl PayoutLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// All payouts, oldest first.
    pub fn payouts(&self) -> &[Payout] {
        &self.payouts
    }

    /// Total amount ever paid to an account.
    pub fn total_paid(&self, account: &str) -> u64 {
        self.payouts
            .iter()
            .filter(|p| p.account == account)
            .map(|p| p.amount)
            .sum()
    }
}

impl ValueTransfer for PayoutLog {
    fn pay(&mut self, to: &str, amount: u64) -> Result<(), PayoutError> {
        self.payouts.push(Payout {
            account: to.to_string(),
            amount,
            paid_at: Utc::now(),
        });
        Ok(())
    }
}
