//! Per-node and per-flow validation over the input tree.
//!
//! Validation is read-only and recursive: a variant composite is valid only
//! when its `value` names a declared variant and that child subtree is valid,
//! so switching a variant never makes an unrelated subtree matter.

use crate::inputs::kind::InputKind;
use crate::inputs::node::{InputMap, InputNode};
use crate::runtime::derive::parse_timestamp;
use crate::runtime::fee::{GasUnit, scale_gas};
use crate::schema::template::ClauseInfo;

/// Whether the node at `id` (and its relevant descendants) holds an
/// acceptable value. Unknown ids are simply invalid.
#[must_use]
pub fn is_valid_input(id: &str, map: &InputMap) -> bool {
    map.get(id).is_some_and(|node| is_valid_node(node, map))
}

fn active_child_valid(node: &InputNode, map: &InputMap) -> bool {
    node.active_child_id()
        .is_some_and(|child_id| is_valid_input(&child_id, map))
}

fn is_valid_node(node: &InputNode, map: &InputMap) -> bool {
    match &node.kind {
        InputKind::Number | InputKind::Amount => node.value.parse::<u64>().is_ok(),
        InputKind::Boolean => matches!(node.value.as_str(), "true" | "false"),
        InputKind::Timestamp => parse_timestamp(&node.value).is_some(),
        InputKind::GenerateString => node.value.parse::<usize>().is_ok_and(|length| length > 0),
        InputKind::ProvideString
        | InputKind::ProvideOrigin
        | InputKind::Password
        | InputKind::Path
        | InputKind::AccountAlias
        | InputKind::AssetAlias => !node.value.is_empty(),
        InputKind::ProvideHash | InputKind::PrivateKey => {
            !node.value.is_empty() && hex::decode(&node.value).is_ok()
        }
        InputKind::ChoosePublicKey { key_map } => key_map.contains_key(&node.value),
        InputKind::BtmUnit => node.value.parse::<GasUnit>().is_ok(),
        InputKind::Gas => {
            let Some(unit_node) = map.get(&node.child_id("btmUnitInput")) else {
                return false;
            };
            unit_node
                .value
                .parse::<GasUnit>()
                .is_ok_and(|unit| scale_gas(&node.value, unit).is_ok())
        }
        InputKind::Value => ["accountInput", "assetInput", "amountInput"]
            .iter()
            .all(|segment| is_valid_input(&node.child_id(segment), map)),
        InputKind::String
        | InputKind::Hash { .. }
        | InputKind::GenerateHash { .. }
        | InputKind::PublicKey
        | InputKind::Signature
        | InputKind::Time
        | InputKind::Program
        | InputKind::Asset
        | InputKind::Parameter { .. } => active_child_valid(node, map),
    }
}

/// Whether the value subtree at `value_id` is complete enough to submit for
/// signing: the core value triple plus the spending password and a valid gas
/// amount.
#[must_use]
pub fn is_ready_to_sign(value_id: &str, map: &InputMap) -> bool {
    let Some(node) = map.get(value_id) else {
        return false;
    };
    if !matches!(node.kind, InputKind::Value) {
        return false;
    }
    is_valid_node(node, map)
        && is_valid_input(&node.child_id("passwordInput"), map)
        && is_valid_input(&node.child_id("gasInput"), map)
}

/// Whether every clause parameter of the selected clause, plus the receiving
/// account when present, is valid in the spend map.
#[must_use]
pub fn are_spend_inputs_valid(clause: &ClauseInfo, spend_map: &InputMap) -> bool {
    let params_ok = clause.params.iter().all(|param| {
        is_valid_input(
            &format!("clauseParameters.{}.{}", clause.name, param.name),
            spend_map,
        )
    });
    let account_ok = match spend_map.get("unlockValue.accountInput") {
        Some(account) => !account.value.is_empty(),
        None => true,
    };
    params_ok && account_ok
}
