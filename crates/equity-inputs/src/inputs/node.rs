//! Input nodes and the flat-map tree encoding.
//!
//! The tree is stored as a map keyed by full dotted path; a child's name is
//! always `parent.name + "." + childSegment`, so the hierarchy is recoverable
//! from string identity alone. Lookups that miss fail loudly with
//! [`InputError::Lookup`] instead of silently producing defaults.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::inputs::kind::{ChildRule, InputKind};

/// One unit of the input tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InputNode {
    /// Full dotted path uniquely identifying this node's position.
    pub name: String,
    #[serde(flatten)]
    pub kind: InputKind,
    /// Scalar the user typed, or the active child segment for variant
    /// composites.
    pub value: String,
    /// Derived value (hash digest, resolved asset id, ...). Never
    /// user-writable; recomputed from descendant leaves.
    #[serde(
        rename = "computedData",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub computed_data: Option<String>,
}

impl InputNode {
    /// Id of the child node for the given segment.
    #[must_use]
    pub fn child_id(&self, segment: &str) -> String {
        format!("{}.{segment}", self.name)
    }

    /// Id of the currently selected child for variant composites; `None` for
    /// leaves, aggregates and composites whose `value` names no declared
    /// variant.
    #[must_use]
    pub fn active_child_id(&self) -> Option<String> {
        match self.kind.child_rule() {
            ChildRule::OneOf(variants)
                if variants
                    .iter()
                    .any(|variant| variant.segment() == self.value) =>
            {
                Some(self.child_id(&self.value))
            }
            _ => None,
        }
    }
}

/// Flat input tree keyed by full dotted path. `BTreeMap` keeps iteration
/// deterministic.
pub type InputMap = BTreeMap<String, InputNode>;

/// Fetch a node or fail with a loud lookup error.
pub fn lookup<'a>(map: &'a InputMap, id: &str) -> Result<&'a InputNode, InputError> {
    map.get(id).ok_or_else(|| InputError::Lookup(id.to_string()))
}

/// Mutable counterpart of [`lookup`].
pub fn lookup_mut<'a>(map: &'a mut InputMap, id: &str) -> Result<&'a mut InputNode, InputError> {
    map.get_mut(id)
        .ok_or_else(|| InputError::Lookup(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_child_follows_selected_variant() {
        let node = InputNode {
            name: "contractParameters.pubKey.publicKeyInput".to_string(),
            kind: InputKind::PublicKey,
            value: "provideStringInput".to_string(),
            computed_data: None,
        };
        assert_eq!(
            node.active_child_id().as_deref(),
            Some("contractParameters.pubKey.publicKeyInput.provideStringInput")
        );
    }

    #[test]
    fn unset_composite_has_no_active_child() {
        let node = InputNode {
            name: "contractParameters.pubKey.publicKeyInput".to_string(),
            kind: InputKind::PublicKey,
            value: String::new(),
            computed_data: None,
        };
        assert_eq!(node.active_child_id(), None);
    }

    #[test]
    fn lookup_misses_loudly() {
        let map = InputMap::new();
        let err = lookup(&map, "contractParameters.missing").expect_err("must fail");
        assert!(matches!(err, InputError::Lookup(id) if id == "contractParameters.missing"));
    }

    #[test]
    fn node_serializes_with_flattened_kind() {
        let node = InputNode {
            name: "unlockValue.gasInput".to_string(),
            kind: InputKind::Gas,
            value: "5".to_string(),
            computed_data: None,
        };
        assert_eq!(
            serde_json::to_value(&node).expect("serialize"),
            serde_json::json!({
                "name": "unlockValue.gasInput",
                "type": "gasInput",
                "value": "5"
            })
        );
    }
}
