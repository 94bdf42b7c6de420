//! Input tree construction from a compiled template's declared parameters.
//!
//! Building is pure and deterministic: identical declared-parameter input
//! always yields an identical initial map. Composite nodes default to their
//! first declared variant, leaves to empty values.

use crate::inputs::kind::{ChildRule, InputKind};
use crate::inputs::node::{InputMap, InputNode};
use crate::schema::template::{ClauseInfo, CompiledTemplate, DeclaredType};

/// Insert a node of `kind` at `name` together with its full descendant
/// subtree.
fn insert_subtree(map: &mut InputMap, kind: InputKind, name: &str) {
    let children = match kind.child_rule() {
        ChildRule::Leaf => Vec::new(),
        ChildRule::OneOf(variants) => variants,
        ChildRule::AllOf(children) => children,
    };
    let value = kind.default_value();
    map.insert(
        name.to_string(),
        InputNode {
            name: name.to_string(),
            kind,
            value,
            computed_data: None,
        },
    );
    for child in children {
        let child_name = format!("{name}.{}", child.segment());
        insert_subtree(map, child, &child_name);
    }
}

/// Add one declared parameter at `name`, wrapped in a `parameterInput` node
/// that remembers the declared type for display, plus its typed subtree.
pub fn add_parameter_input(map: &mut InputMap, ty: DeclaredType, name: &str) {
    let inner = InputKind::for_declared_type(ty);
    let inner_name = format!("{name}.{}", inner.segment());
    map.insert(
        name.to_string(),
        InputNode {
            name: name.to_string(),
            kind: InputKind::Parameter { value_type: ty },
            value: inner.segment().to_string(),
            computed_data: None,
        },
    );
    insert_subtree(map, inner, &inner_name);
}

/// Collapse hash-typed declarations for the unlock flow, where the user
/// provides the on-chain digest instead of re-deriving it.
const fn unlock_declared_type(ty: DeclaredType) -> DeclaredType {
    match ty {
        DeclaredType::Sha3PublicKey
        | DeclaredType::Sha3String
        | DeclaredType::Sha256PublicKey
        | DeclaredType::Sha256String => DeclaredType::Hash,
        other => other,
    }
}

/// Build the locking-flow input map: one subtree per declared contract
/// parameter plus, when the template declares a value parameter, one value
/// subtree under `contractValue`.
#[must_use]
pub fn generate_input_map(template: &CompiledTemplate) -> InputMap {
    let mut map = InputMap::new();
    for param in &template.params {
        add_parameter_input(&mut map, param.ty, &format!("contractParameters.{}", param.name));
    }
    if !template.value.is_empty() {
        add_parameter_input(
            &mut map,
            DeclaredType::Value,
            &format!("contractValue.{}", template.value),
        );
    }
    map
}

/// Build the unlock-display input map: like [`generate_input_map`] but with
/// hash parameters collapsed to provided digests.
#[must_use]
pub fn generate_unlock_input_map(template: &CompiledTemplate) -> InputMap {
    let mut map = InputMap::new();
    for param in &template.params {
        add_parameter_input(
            &mut map,
            unlock_declared_type(param.ty),
            &format!("contractParameters.{}", param.name),
        );
    }
    if !template.value.is_empty() {
        add_parameter_input(
            &mut map,
            DeclaredType::Value,
            &format!("contractValue.{}", template.value),
        );
    }
    map
}

/// Build the spend input map for one selected clause: one subtree per clause
/// parameter under `clauseParameters.<clause>.`, plus the `unlockValue`
/// subtree naming the receiving account and fee.
#[must_use]
pub fn generate_spend_input_map(template: &CompiledTemplate, clause_name: &str) -> InputMap {
    let mut map = InputMap::new();
    if let Some(clause) = template.clause(clause_name) {
        for param in &clause.params {
            add_parameter_input(
                &mut map,
                unlock_declared_type(param.ty),
                &format!("clauseParameters.{clause_name}.{}", param.name),
            );
        }
    }
    insert_subtree(&mut map, InputKind::Value, "unlockValue");
    map
}

/// Ids of the top-level contract parameter nodes, in declared order.
#[must_use]
pub fn parameter_ids(template: &CompiledTemplate) -> Vec<String> {
    template
        .params
        .iter()
        .map(|param| format!("contractParameters.{}", param.name))
        .collect()
}

/// Ids of the top-level clause parameter nodes, in declared order.
#[must_use]
pub fn clause_parameter_ids(clause: &ClauseInfo) -> Vec<String> {
    clause
        .params
        .iter()
        .map(|param| format!("clauseParameters.{}.{}", clause.name, param.name))
        .collect()
}
