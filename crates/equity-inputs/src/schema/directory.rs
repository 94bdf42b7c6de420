//! Account/asset directory and balance snapshots supplied by external
//! services.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One directory entry, shared by accounts and assets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DirectoryItem {
    pub id: String,
    pub alias: String,
}

/// Read-only snapshot of directory state the core consults while resolving
/// inputs. Balances are keyed by input-name prefix, matching how the state
/// container exposes them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DirectorySnapshot {
    #[serde(default)]
    pub accounts: Vec<DirectoryItem>,
    #[serde(default)]
    pub assets: Vec<DirectoryItem>,
    #[serde(default)]
    pub balances: BTreeMap<String, u64>,
}

impl DirectorySnapshot {
    #[must_use]
    pub fn asset_alias(&self, id: &str) -> Option<&str> {
        self.assets
            .iter()
            .find(|asset| asset.id == id)
            .map(|asset| asset.alias.as_str())
    }

    #[must_use]
    pub fn account_alias(&self, id: &str) -> Option<&str> {
        self.accounts
            .iter()
            .find(|account| account.id == id)
            .map(|account| account.alias.as_str())
    }

    #[must_use]
    pub fn balance(&self, name_prefix: &str) -> Option<u64> {
        self.balances.get(name_prefix).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alias_lookups() {
        let snapshot = DirectorySnapshot {
            accounts: vec![DirectoryItem {
                id: "acct1".to_string(),
                alias: "alice".to_string(),
            }],
            assets: vec![DirectoryItem {
                id: "ff00".to_string(),
                alias: "gold".to_string(),
            }],
            balances: BTreeMap::from([("contractValue.deposit".to_string(), 500)]),
        };
        assert_eq!(snapshot.account_alias("acct1"), Some("alice"));
        assert_eq!(snapshot.asset_alias("ff00"), Some("gold"));
        assert_eq!(snapshot.asset_alias("missing"), None);
        assert_eq!(snapshot.balance("contractValue.deposit"), Some(500));
        assert_eq!(snapshot.balance("contractValue.other"), None);
    }
}
