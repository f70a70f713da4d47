//! # Ledger State Store
//!
//! Persists the full application state — marketplace core plus its three
//! in-memory collaborators — as one JSON document. Saving writes to a
//! sibling temp file first and renames it into place, so a crash mid-write
//! leaves the previous state intact and the load-apply-save cycle keeps
//! its all-or-nothing character at the file level too.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use galleria_market::{InMemoryAssetLedger, Marketplace, PayoutLog, RoleTable};

/// Everything the CLI persists between invocations.
#[derive(Debug, Serialize, Deserialize)]
pub struct LedgerState {
    /// The marketplace core: items, listings, balances, fees, events.
    pub market: Marketplace,
    /// The in-memory asset registry standing in for the external ledger.
    pub assets: InMemoryAssetLedger,
    /// The role store, rooted at the super-admin chosen at init.
    pub roles: RoleTable,
    /// The payout rail's record of completed withdrawals.
    pub payouts: PayoutLog,
}

impl LedgerState {
    /// Creates a fresh ledger with the given super-admin and platform
    /// fee address.
    pub fn new(root: &str, platform: &str) -> Result<Self> {
        Ok(Self {
            market: Marketplace::new(platform)?,
            assets: InMemoryAssetLedger::new(),
            roles: RoleTable::new(root),
            payouts: PayoutLog::new(),
        })
    }
}

/// Creates the state file. Refuses to overwrite an existing ledger.
pub fn init(path: &Path, state: &LedgerState) -> Result<()> {
    if path.exists() {
        bail!("ledger state already exists at {}", path.display());
    }
    save(path, state)
}

/// Loads the ledger state from disk.
pub fn load(path: &Path) -> Result<LedgerState> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read ledger state from {}", path.display()))?;
    serde_json::from_slice(&bytes)
        .with_context(|| format!("failed to parse ledger state in {}", path.display()))
}

/// Saves the ledger state, replacing the file atomically via rename.
pub fn save(path: &Path, state: &LedgerState) -> Result<()> {
    let json = serde_json::to_vec_pretty(state).context("failed to serialize ledger state")?;

    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json)
        .with_context(|| format!("failed to write ledger state to {}", tmp.display()))?;
    std::fs::rename(&tmp, path)
        .with_context(|| format!("failed to move ledger state into {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use galleria_market::{AccessControl, Role};

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");

        let mut state = LedgerState::new("root", "platform").unwrap();
        state
            .market
            .set_fees(&state.roles, "root", 20, 10)
            .unwrap();
        state
            .market
            .mint(&state.roles, &mut state.assets, "root", "ipfs://x", 100)
            .unwrap();
        save(&path, &state).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.market.fees(), (20, 10));
        assert_eq!(loaded.market.item(1).unwrap().price, 100);
        assert_eq!(loaded.assets.metadata_of(1), Some("ipfs://x"));
        assert!(loaded.roles.has_role(Role::Admin, "root"));
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");

        let state = LedgerState::new("root", "platform").unwrap();
        init(&path, &state).unwrap();
        assert!(init(&path, &state).is_err());
    }

    #[test]
    fn load_missing_file_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("absent.json"));
    }
}
