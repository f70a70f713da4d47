//! # CLI Interface
//!
//! Defines the command-line argument structure for the `galleria` binary
//! using `clap` derive. Every subcommand is one ledger transaction: the
//! binary loads the state file, applies the operation, and writes the
//! state back — so invocations form a strictly sequential operation log.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Galleria marketplace ledger.
///
/// A file-backed front end for the marketplace core: mint items, list
/// them for sale, settle purchases with automatic fee-splitting, and
/// withdraw accrued balances.
#[derive(Parser, Debug)]
#[command(
    name = "galleria",
    about = "Galleria marketplace ledger",
    version,
    propagate_version = true
)]
pub struct GalleriaCli {
    /// Path to the ledger state file (JSON).
    #[arg(long, short = 's', env = "GALLERIA_STATE", default_value = "galleria.json")]
    pub state: PathBuf,

    /// Log output format: "pretty" or "json".
    #[arg(long, env = "GALLERIA_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the galleria binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new ledger state file.
    Init(InitArgs),
    /// Grant a role to an account (admin only).
    Grant(GrantArgs),
    /// Mint a new item (minter only).
    Mint(MintArgs),
    /// Flag an item for sale at a price (owner only).
    List(ListArgs),
    /// Print every item currently listed for sale.
    Listed,
    /// Buy a listed item.
    Buy(BuyArgs),
    /// Withdraw the caller's entire pending balance.
    Withdraw(CallerArg),
    /// Print an account's pending balance.
    Balance(AccountArg),
    /// Update the fee rates (admin only).
    SetFees(SetFeesArgs),
    /// Redirect future platform fees to a new address (admin only).
    SetPlatform(SetPlatformArgs),
    /// Print a summary of the whole ledger and its event log.
    Show,
}

/// Arguments for `init`.
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// The super-admin account. Implicitly holds every role.
    #[arg(long)]
    pub root: String,

    /// The account credited with platform fees.
    #[arg(long)]
    pub platform: String,
}

/// Arguments for `grant`.
#[derive(Parser, Debug)]
pub struct GrantArgs {
    /// The admin performing the grant.
    #[arg(long)]
    pub caller: String,

    /// Role to grant: "minter" or "admin".
    pub role: String,

    /// The account receiving the role.
    pub account: String,
}

/// Arguments for `mint`.
#[derive(Parser, Debug)]
pub struct MintArgs {
    /// The minting artist.
    #[arg(long)]
    pub caller: String,

    /// Metadata reference stored with the asset (typically a URI).
    #[arg(long, default_value = "")]
    pub metadata: String,

    /// Initial price in the smallest currency unit. Must be nonzero.
    pub price: u64,
}

/// Arguments for `list`.
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// The item owner.
    #[arg(long)]
    pub caller: String,

    /// The item to list.
    pub id: u64,

    /// The listing price.
    pub price: u64,
}

/// Arguments for `buy`.
#[derive(Parser, Debug)]
pub struct BuyArgs {
    /// The buyer.
    #[arg(long)]
    pub caller: String,

    /// The item to buy.
    pub id: u64,

    /// The tendered value. Anything above the list price goes to the
    /// seller — there is no refund path.
    pub amount: u64,
}

/// A subcommand that only needs the calling account.
#[derive(Parser, Debug)]
pub struct CallerArg {
    /// The calling account.
    #[arg(long)]
    pub caller: String,
}

/// A subcommand that only needs a target account.
#[derive(Parser, Debug)]
pub struct AccountArg {
    /// The account to inspect.
    pub account: String,
}

/// Arguments for `set-fees`.
#[derive(Parser, Debug)]
pub struct SetFeesArgs {
    /// The admin performing the update.
    #[arg(long)]
    pub caller: String,

    /// Artist royalty in percent (cap 30).
    pub artist_pct: u8,

    /// Platform commission in percent (cap 15).
    pub platform_pct: u8,
}

/// Arguments for `set-platform`.
#[derive(Parser, Debug)]
pub struct SetPlatformArgs {
    /// The admin performing the update.
    #[arg(long)]
    pub caller: String,

    /// The new platform fee address. Must not be empty.
    pub address: String,
}
