//! Clause-value resolution: which asset/amount a clause requires the spender
//! to supply, and whether the chosen funding account can cover it.

use crate::error::InputError;
use crate::inputs::kind::InputKind;
use crate::inputs::node::{InputMap, lookup_mut};
use crate::runtime::derive::compute_data;
use crate::schema::directory::DirectorySnapshot;
use crate::schema::template::ClauseInfo;

/// The asset/amount pair a clause requires the spending transaction to
/// provide. Amount stays a decimal string until the construction service
/// parses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredValue {
    pub asset_id: String,
    pub amount: String,
}

/// Id of the clause's value parameter node in the spend map, if the selected
/// clause declares one.
#[must_use]
pub fn clause_value_id(clause_name: &str, spend_map: &InputMap) -> Option<String> {
    spend_map.values().find_map(|node| {
        let in_clause = node.name.split('.').nth(1) == Some(clause_name);
        (in_clause && node.value == "valueInput").then(|| node.name.clone())
    })
}

/// Resolve the value a clause requires, reading the asset and amount from the
/// lock-time contract parameters the clause declaration points at.
///
/// Returns `None` while the requirement cannot be fully resolved yet: no
/// value parameter in the spend map, no declared asset/amount references, or
/// unresolved lock-time inputs.
#[must_use]
pub fn resolve_clause_value(
    clause: &ClauseInfo,
    input_map: &InputMap,
    spend_map: &InputMap,
) -> Option<RequiredValue> {
    let value_id = clause_value_id(&clause.name, spend_map)?;
    let param_name = value_id.rsplit('.').next()?;
    let declared = clause.values.iter().find(|value| value.name == param_name)?;
    let asset_param = declared.asset.as_ref()?;
    let amount_param = declared.amount.as_ref()?;

    let asset_input_id = format!("contractParameters.{asset_param}.assetInput");
    let asset_input = input_map.get(&asset_input_id)?;
    let asset_id = match &asset_input.computed_data {
        Some(computed) => computed.clone(),
        None => compute_data(&asset_input_id, input_map).ok()?,
    };

    let amount_input = input_map.get(&format!("contractParameters.{amount_param}.amountInput"))?;
    if amount_input.value.is_empty() {
        return None;
    }
    Some(RequiredValue {
        asset_id,
        amount: amount_input.value.clone(),
    })
}

/// Write a resolved requirement into the spend map's value subtree, fixing
/// the asset and amount the user must fund.
///
/// # Errors
///
/// Fails with [`InputError::Lookup`] when `value_id` does not name a value
/// parameter subtree in the map.
pub fn apply_required_value(
    spend_map: &mut InputMap,
    value_id: &str,
    required: &RequiredValue,
) -> Result<(), InputError> {
    let asset_id = format!("{value_id}.valueInput.assetInput");
    let asset_node = lookup_mut(spend_map, &asset_id)?;
    asset_node.computed_data = Some(required.asset_id.clone());
    let asset_leaf = lookup_mut(spend_map, &format!("{value_id}.valueInput.assetInput.assetAliasInput"))?;
    asset_leaf.value = required.asset_id.clone();
    let amount_node = lookup_mut(spend_map, &format!("{value_id}.valueInput.amountInput"))?;
    amount_node.value = required.amount.clone();
    Ok(())
}

/// Whether the funding account's balance covers the entered amount, or `None`
/// while either side is still unknown.
///
/// `prefix` is the value node's id for lock-flow trees and the value
/// parameter's id for spend trees, matching how balances are keyed.
#[must_use]
pub fn has_sufficient_balance(
    prefix: &str,
    map: &InputMap,
    snapshot: &DirectorySnapshot,
) -> Option<bool> {
    let amount_id = if prefix.starts_with("clauseParameters") {
        format!("{prefix}.valueInput.amountInput")
    } else {
        format!("{prefix}.amountInput")
    };
    let amount_node = map.get(&amount_id)?;
    if !matches!(amount_node.kind, InputKind::Amount) {
        return None;
    }
    let amount: u64 = amount_node.value.parse().ok()?;
    let balance = snapshot.balance(prefix)?;
    Some(balance >= amount)
}
