//! Gas fee scaling and the fee/unlock transaction actions.

use std::fmt;
use std::str::FromStr;

use crate::error::InputError;
use crate::inputs::node::{InputMap, lookup};
use crate::schema::template::ContractUtxo;
use crate::schema::witness::Action;

/// Asset id the network charges transaction fees in.
pub const FEE_ASSET_ID: &str = "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff";

/// Denomination of a user-entered gas amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GasUnit {
    Btm,
    Mbtm,
    Neu,
}

impl GasUnit {
    /// Atomic units (neu) per one unit of this denomination.
    #[must_use]
    pub const fn factor(self) -> u64 {
        match self {
            Self::Btm => 100_000_000,
            Self::Mbtm => 100_000,
            Self::Neu => 1,
        }
    }

    /// Decimal places a fractional amount may carry in this denomination.
    const fn decimals(self) -> usize {
        match self {
            Self::Btm => 8,
            Self::Mbtm => 5,
            Self::Neu => 0,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Btm => "btm",
            Self::Mbtm => "mbtm",
            Self::Neu => "neu",
        }
    }
}

impl fmt::Display for GasUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GasUnit {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "btm" => Ok(Self::Btm),
            "mbtm" => Ok(Self::Mbtm),
            "neu" => Ok(Self::Neu),
            other => Err(InputError::InvalidAmount(format!(
                "unknown gas unit '{other}'"
            ))),
        }
    }
}

/// Scale a decimal gas amount to atomic units, exactly.
///
/// Rejects negative amounts, malformed decimals and fractions finer than the
/// unit supports; the scaling never rounds.
///
/// # Errors
///
/// Fails with [`InputError::InvalidAmount`] on any input that does not map to
/// a whole number of atomic units.
pub fn scale_gas(amount: &str, unit: GasUnit) -> Result<u64, InputError> {
    let invalid = || InputError::InvalidAmount(format!("'{amount}' is not a valid {unit} amount"));
    let trimmed = amount.trim();
    if trimmed.is_empty() {
        return Err(invalid());
    }
    let (integer, fraction) = match trimmed.split_once('.') {
        Some((integer, fraction)) => (integer, fraction),
        None => (trimmed, ""),
    };
    if integer.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if !integer.bytes().all(|b| b.is_ascii_digit())
        || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }
    if fraction.len() > unit.decimals() {
        return Err(invalid());
    }

    let whole: u64 = if integer.is_empty() {
        0
    } else {
        integer.parse().map_err(|_| invalid())?
    };
    let mut padded = fraction.to_string();
    while padded.len() < unit.decimals() {
        padded.push('0');
    }
    let fractional: u64 = if padded.is_empty() {
        0
    } else {
        padded.parse().map_err(|_| invalid())?
    };
    whole
        .checked_mul(unit.factor())
        .and_then(|scaled| scaled.checked_add(fractional))
        .ok_or_else(invalid)
}

/// Build the fee-paying action from the spend map's `unlockValue` subtree.
///
/// # Errors
///
/// Fails when the paying account is not selected or the gas amount does not
/// scale to a whole number of atomic units.
pub fn build_fee_action(spend_map: &InputMap) -> Result<Action, InputError> {
    let account = lookup(spend_map, "unlockValue.accountInput")?;
    if account.value.is_empty() {
        return Err(InputError::MissingInput(
            "unlockValue.accountInput".to_string(),
        ));
    }
    let gas = lookup(spend_map, "unlockValue.gasInput")?;
    let unit: GasUnit = lookup(spend_map, "unlockValue.gasInput.btmUnitInput")?
        .value
        .parse()?;
    let amount = scale_gas(&gas.value, unit)?;
    tracing::debug!(account = %account.value, amount, "built gas fee action");
    Ok(Action::SpendFromAccount {
        account_id: account.value.clone(),
        amount,
        asset_id: FEE_ASSET_ID.to_string(),
    })
}

/// Build the action paying the contract's locked value out to the receiving
/// account, or `None` while no account is selected.
#[must_use]
pub fn build_unlock_action(utxo: &ContractUtxo, spend_map: &InputMap) -> Option<Action> {
    let account = spend_map.get("unlockValue.accountInput")?;
    if account.value.is_empty() {
        return None;
    }
    Some(Action::ControlWithAddress {
        account_id: account.value.clone(),
        asset_id: utxo.asset_id.clone(),
        amount: utxo.amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::kind::InputKind;
    use crate::inputs::tree::generate_spend_input_map;
    use crate::schema::template::CompiledTemplate;

    fn spend_map() -> InputMap {
        let template = CompiledTemplate {
            name: "LockWithPublicKey".to_string(),
            params: Vec::new(),
            clause_info: Vec::new(),
            value: String::new(),
        };
        generate_spend_input_map(&template, "spend")
    }

    fn set(map: &mut InputMap, id: &str, value: &str) {
        map.get_mut(id).expect("node exists").value = value.to_string();
    }

    #[test]
    fn scales_whole_and_fractional_btm() {
        assert_eq!(scale_gas("5", GasUnit::Btm).expect("scales"), 500_000_000);
        assert_eq!(scale_gas("0.00000001", GasUnit::Btm).expect("scales"), 1);
        assert_eq!(scale_gas("1.5", GasUnit::Mbtm).expect("scales"), 150_000);
        assert_eq!(scale_gas("250000", GasUnit::Neu).expect("scales"), 250_000);
        assert_eq!(scale_gas(".5", GasUnit::Btm).expect("scales"), 50_000_000);
    }

    #[test]
    fn rejects_amounts_that_do_not_scale_exactly() {
        assert!(scale_gas("0.5", GasUnit::Neu).is_err());
        assert!(scale_gas("1.000000001", GasUnit::Btm).is_err());
        assert!(scale_gas("-1", GasUnit::Btm).is_err());
        assert!(scale_gas("", GasUnit::Btm).is_err());
        assert!(scale_gas(".", GasUnit::Btm).is_err());
        assert!(scale_gas("1.2.3", GasUnit::Btm).is_err());
        assert!(scale_gas("abc", GasUnit::Neu).is_err());
        assert!(scale_gas("999999999999999999999", GasUnit::Btm).is_err());
    }

    #[test]
    fn fee_action_spends_scaled_gas_in_fee_asset() {
        let mut map = spend_map();
        set(&mut map, "unlockValue.accountInput", "acct1");
        set(&mut map, "unlockValue.gasInput", "5");
        let action = build_fee_action(&map).expect("builds");
        assert_eq!(
            action,
            Action::SpendFromAccount {
                account_id: "acct1".to_string(),
                amount: 500_000_000,
                asset_id: FEE_ASSET_ID.to_string(),
            }
        );
    }

    #[test]
    fn fee_action_requires_paying_account() {
        let mut map = spend_map();
        set(&mut map, "unlockValue.gasInput", "5");
        let err = build_fee_action(&map).expect_err("no account selected");
        assert!(matches!(err, InputError::MissingInput(id) if id == "unlockValue.accountInput"));
    }

    #[test]
    fn unlock_action_pays_the_utxo_to_the_selected_account() {
        let utxo = ContractUtxo {
            id: "utxo1".to_string(),
            asset_id: "aa".repeat(32),
            amount: 42,
            template: CompiledTemplate {
                name: "LockWithPublicKey".to_string(),
                params: Vec::new(),
                clause_info: Vec::new(),
                value: String::new(),
            },
        };
        let mut map = spend_map();
        assert_eq!(build_unlock_action(&utxo, &map), None);
        set(&mut map, "unlockValue.accountInput", "acct1");
        assert_eq!(
            build_unlock_action(&utxo, &map),
            Some(Action::ControlWithAddress {
                account_id: "acct1".to_string(),
                asset_id: "aa".repeat(32),
                amount: 42,
            })
        );
        assert!(matches!(
            map["unlockValue.gasInput"].kind,
            InputKind::Gas
        ));
    }
}
