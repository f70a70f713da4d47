// Copyright (c) 2026 Galleria Contributors. MIT License.
// See LICENSE for details.

//! # Galleria CLI
//!
//! Entry point for the `galleria` binary. Parses CLI arguments, initializes
//! logging, and applies exactly one marketplace operation per invocation
//! against a JSON state file.
//!
//! The file is the transaction log's single writer: each run loads the
//! ledger, executes the operation atomically in memory, and only then
//! replaces the file. A failed operation writes nothing back.

mod cli;
mod logging;
mod store;

use anyhow::{bail, Context, Result};
use clap::Parser;

use galleria_market::Role;

use cli::{Commands, GalleriaCli};
use logging::LogFormat;
use store::LedgerState;

fn main() -> Result<()> {
    let cli = GalleriaCli::parse();
    logging::init_logging(
        "galleria=info,galleria_market=info",
        LogFormat::from_str_lossy(&cli.log_format),
    );

    let path = cli.state.as_path();
    match cli.command {
        Commands::Init(args) => {
            let state = LedgerState::new(&args.root, &args.platform)?;
            store::init(path, &state)?;
            println!("Ledger initialized at {}", path.display());
            println!("  Root account     : {}", args.root);
            println!("  Platform address : {}", args.platform);
            Ok(())
        }

        Commands::Grant(args) => transact(path, |state| {
            let role = parse_role(&args.role)?;
            state.roles.grant(&args.caller, role, &args.account)?;
            println!("granted {role} to {}", args.account);
            Ok(())
        }),

        Commands::Mint(args) => transact(path, |state| {
            let id = state.market.mint(
                &state.roles,
                &mut state.assets,
                &args.caller,
                &args.metadata,
                args.price,
            )?;
            println!("minted item {id} at price {}", args.price);
            Ok(())
        }),

        Commands::List(args) => transact(path, |state| {
            state
                .market
                .list(&state.assets, &args.caller, args.id, args.price)?;
            println!("listed item {} at price {}", args.id, args.price);
            Ok(())
        }),

        Commands::Listed => {
            let state = store::load(path)?;
            let listed = state.market.listed_items();
            if listed.is_empty() {
                println!("nothing is listed for sale");
            }
            for item in listed {
                println!(
                    "item {:>4}  price {:>12}  artist {}",
                    item.id, item.price, item.artist
                );
            }
            Ok(())
        }

        Commands::Buy(args) => transact(path, |state| {
            let split = state
                .market
                .buy(&mut state.assets, &args.caller, args.id, args.amount)?;
            println!("bought item {} for {}", args.id, args.amount);
            println!("  artist cut   : {}", split.artist_cut);
            println!("  platform cut : {}", split.platform_cut);
            println!("  seller cut   : {}", split.seller_cut);
            Ok(())
        }),

        Commands::Withdraw(args) => transact(path, |state| {
            let amount = state.market.withdraw(&mut state.payouts, &args.caller)?;
            println!("withdrew {amount} for {}", args.caller);
            Ok(())
        }),

        Commands::Balance(args) => {
            let state = store::load(path)?;
            println!("{}", state.market.balance_of(&args.account));
            Ok(())
        }

        Commands::SetFees(args) => transact(path, |state| {
            state
                .market
                .set_fees(&state.roles, &args.caller, args.artist_pct, args.platform_pct)?;
            println!(
                "fees set: artist {}%, platform {}%",
                args.artist_pct, args.platform_pct
            );
            Ok(())
        }),

        Commands::SetPlatform(args) => transact(path, |state| {
            state
                .market
                .set_platform_address(&state.roles, &args.caller, &args.address)?;
            println!("platform address set to {}", args.address);
            Ok(())
        }),

        Commands::Show => {
            let state = store::load(path)?;
            print_summary(&state);
            Ok(())
        }
    }
}

/// Loads the ledger, applies one operation, and saves it back.
///
/// The save only happens after the operation succeeds, so a rejected
/// operation leaves the file byte-for-byte unchanged.
fn transact(path: &std::path::Path, op: impl FnOnce(&mut LedgerState) -> Result<()>) -> Result<()> {
    let mut state = store::load(path).context("is the ledger initialized? (galleria init)")?;
    op(&mut state)?;
    store::save(path, &state)
}

/// Parses a role name from the command line.
fn parse_role(s: &str) -> Result<Role> {
    match s.to_lowercase().as_str() {
        "minter" => Ok(Role::Minter),
        "admin" => Ok(Role::Admin),
        other => bail!("unknown role '{other}' (expected 'minter' or 'admin')"),
    }
}

/// Prints the whole ledger: fees, listings, balances, and the event log.
fn print_summary(state: &LedgerState) {
    let (artist_pct, platform_pct) = state.market.fees();
    println!("fees             : artist {artist_pct}%, platform {platform_pct}%");
    println!("platform address : {}", state.market.platform_address());

    println!("listed items:");
    let listed = state.market.listed_items();
    if listed.is_empty() {
        println!("  (none)");
    }
    for item in listed {
        println!(
            "  item {:>4}  price {:>12}  artist {}",
            item.id, item.price, item.artist
        );
    }

    println!("pending balances:");
    let mut balances: Vec<_> = state.market.balances().iter().collect();
    balances.sort();
    if balances.is_empty() {
        println!("  (none)");
    }
    for (account, amount) in balances {
        println!("  {account:<24} {amount:>12}");
    }

    println!("events:");
    if state.market.events().is_empty() {
        println!("  (none)");
    }
    for event in state.market.events() {
        println!("  {event}");
    }

    println!("payouts:");
    if state.payouts.payouts().is_empty() {
        println!("  (none)");
    }
    for payout in state.payouts.payouts() {
        println!("  {:<24} {:>12}  {}", payout.account, payout.amount, payout.paid_at);
    }
}
