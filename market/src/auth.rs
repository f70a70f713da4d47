//! # Authorization Capability
//!
//! The marketplace core does not store roles. Gated operations ask an
//! [`AccessControl`] capability whether the caller holds the required role,
//! which keeps the core decoupled from wherever roles actually live —
//! a contract, a database, or the in-memory [`RoleTable`] below.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::MarketError;
use crate::AccountId;

/// The roles a gated marketplace operation can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// May mint new items.
    Minter,
    /// May update fees, the platform address, and role grants.
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Minter => write!(f, "minter"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// Capability interface consumed from the authorization collaborator.
pub trait AccessControl {
    /// Returns `true` if `account` holds `role`.
    fn has_role(&self, role: Role, account: &str) -> bool;
}

/// An in-memory role store with a super-admin root.
///
/// The root account implicitly holds every role and cannot be revoked.
/// Used by tests and the CLI; production deployments put their own role
/// storage behind [`AccessControl`] instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleTable {
    root: AccountId,
    minters: HashSet<AccountId>,
    admins: HashSet<AccountId>,
}

impl RoleTable {
    /// Creates a table whose `root` implicitly holds every role.
    pub fn new(root: impl Into<AccountId>) -> Self {
        Self {
            root: root.into(),
            minters: HashSet::new(),
            admins: HashSet::new(),
        }
    }

    /// Grants a role. The granter must hold the admin role.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::Unauthorized`] if the granter is not an admin.
    pub fn grant(&mut self, granter: &str, role: Role, account: &str) -> Result<(), MarketError> {
        self.require_admin(granter)?;
        match role {
            Role::Minter => self.minters.insert(account.to_string()),
            Role::Admin => self.admins.insert(account.to_string()),
        };
        Ok(())
    }

    /// Revokes a role. The revoker must hold the admin role. Revoking from
    /// the root account has no effect — its roles are implicit.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::Unauthorized`] if the revoker is not an admin.
    pub fn revoke(&mut self, revoker: &str, role: Role, account: &str) -> Result<(), MarketError> {
        self.require_admin(revoker)?;
        match role {
            Role::Minter => self.minters.remove(account),
            Role::Admin => self.admins.remove(account),
        };
        Ok(())
    }

    fn require_admin(&self, account: &str) -> Result<(), MarketError> {
        if self.has_role(Role::Admin, account) {
            Ok(())
        } else {
            Err(MarketError::Unauthorized {
                role: Role::Admin,
                account: account.to_string(),
            })
        }
    }
}

impl AccessControl for RoleTable {
    fn has_role(&self, role: Role, account: &str) -> bool {
        if account == self.root {
            return true;
        }
        match role {
            Role::Minter => self.minters.contains(account),
            Role::Admin => self.admins.contains(account),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_holds_every_role() {
        let table = RoleTable::new("root");
        assert!(table.has_role(Role::Minter, "root"));
        assert!(table.has_role(Role::Admin, "root"));
        assert!(!table.has_role(Role::Minter, "alice"));
    }

    #[test]
    fn grant_and_revoke() {
        let mut table = RoleTable::new("root");
        table.grant("root", Role::Minter, "alice").unwrap();
        assert!(table.has_role(Role::Minter, "alice"));
        assert!(!table.has_role(Role::Admin, "alice"));

        table.revoke("root", Role::Minter, "alice").unwrap();
        assert!(!table.has_role(Role::Minter, "alice"));
    }

    #[test]
    fn non_admin_cannot_grant() {
        let mut table = RoleTable::new("root");
        let result = table.grant("alice", Role::Minter, "bob");
        assert!(matches!(result, Err(MarketError::Unauthorized { .. })));
        assert!(!table.has_role(Role::Minter, "bob"));
    }

    #[test]
    fn granted_admin_can_grant_further() {
        let mut table = RoleTable::new("root");
        table.grant("root", Role::Admin, "alice").unwrap();
        table.grant("alice", Role::Minter, "bob").unwrap();
        assert!(table.has_role(Role::Minter, "bob"));
    }
}
