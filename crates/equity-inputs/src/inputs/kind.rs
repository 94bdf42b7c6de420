//! The closed set of input kinds and the per-kind child structure.
//!
//! Serialization note: kind tags use the widget type spelling
//! (`"signatureInput"`, `"accountInput"`, ...) so serialized maps share one
//! vocabulary with the dotted path segments.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::schema::template::{DeclaredType, HashInputType, HashTemplate};

/// Key material referenced by a `choosePublicKeyInput` selector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeyData {
    #[serde(rename = "rootXpub")]
    pub root_xpub: String,
    #[serde(rename = "pubkeyDerivationPath")]
    pub pubkey_derivation_path: Vec<String>,
}

/// Every input kind the tree can contain.
///
/// Composite kinds either pick one active child variant (the node's `value`
/// names it) or aggregate a fixed child set; see [`InputKind::child_rule`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum InputKind {
    #[serde(rename = "numberInput")]
    Number,
    #[serde(rename = "booleanInput")]
    Boolean,
    #[serde(rename = "stringInput")]
    String,
    #[serde(rename = "generateStringInput")]
    GenerateString,
    #[serde(rename = "provideStringInput")]
    ProvideString,
    #[serde(rename = "provideOriginInput")]
    ProvideOrigin,
    #[serde(rename = "hashInput")]
    Hash {
        /// Declared hash metadata; absent for the unlock-flow collapse where
        /// only a provided digest is accepted.
        #[serde(rename = "hashType", default, skip_serializing_if = "Option::is_none")]
        hash_type: Option<HashTemplate>,
    },
    #[serde(rename = "generateHashInput")]
    GenerateHash {
        #[serde(rename = "hashType")]
        hash_type: HashTemplate,
    },
    #[serde(rename = "provideHashInput")]
    ProvideHash,
    #[serde(rename = "publicKeyInput")]
    PublicKey,
    #[serde(rename = "privateKeyInput")]
    PrivateKey,
    #[serde(rename = "signatureInput")]
    Signature,
    #[serde(rename = "timeInput")]
    Time,
    #[serde(rename = "timestampTimeInput")]
    Timestamp,
    #[serde(rename = "programInput")]
    Program,
    #[serde(rename = "choosePublicKeyInput")]
    ChoosePublicKey {
        #[serde(rename = "keyMap")]
        key_map: BTreeMap<String, KeyData>,
    },
    #[serde(rename = "accountInput")]
    AccountAlias,
    #[serde(rename = "assetAliasInput")]
    AssetAlias,
    #[serde(rename = "assetInput")]
    Asset,
    #[serde(rename = "amountInput")]
    Amount,
    #[serde(rename = "valueInput")]
    Value,
    #[serde(rename = "gasInput")]
    Gas,
    #[serde(rename = "btmUnitInput")]
    BtmUnit,
    #[serde(rename = "passwordInput")]
    Password,
    #[serde(rename = "pathInput")]
    Path,
    #[serde(rename = "parameterInput")]
    Parameter {
        #[serde(rename = "valueType")]
        value_type: DeclaredType,
    },
}

/// How a kind structures its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildRule {
    /// No children; `value` is a user-supplied scalar.
    Leaf,
    /// `value` selects exactly one of these variants; only the active child
    /// subtree participates in validation and derivation.
    OneOf(Vec<InputKind>),
    /// All children are always active; `value` is unused (or, for `gasInput`,
    /// holds the node's own scalar).
    AllOf(Vec<InputKind>),
}

impl InputKind {
    /// Path segment this kind contributes to its children's names.
    ///
    /// `parameterInput` nodes are named after their declared parameter, not a
    /// fixed segment, so they have none.
    #[must_use]
    pub const fn segment(&self) -> &'static str {
        match self {
            Self::Number => "numberInput",
            Self::Boolean => "booleanInput",
            Self::String => "stringInput",
            Self::GenerateString => "generateStringInput",
            Self::ProvideString => "provideStringInput",
            Self::ProvideOrigin => "provideOriginInput",
            Self::Hash { .. } => "hashInput",
            Self::GenerateHash { .. } => "generateHashInput",
            Self::ProvideHash => "provideHashInput",
            Self::PublicKey => "publicKeyInput",
            Self::PrivateKey => "privateKeyInput",
            Self::Signature => "signatureInput",
            Self::Time => "timeInput",
            Self::Timestamp => "timestampTimeInput",
            Self::Program => "programInput",
            Self::ChoosePublicKey { .. } => "choosePublicKeyInput",
            Self::AccountAlias => "accountInput",
            Self::AssetAlias => "assetAliasInput",
            Self::Asset => "assetInput",
            Self::Amount => "amountInput",
            Self::Value => "valueInput",
            Self::Gas => "gasInput",
            Self::BtmUnit => "btmUnitInput",
            Self::Password => "passwordInput",
            Self::Path => "pathInput",
            Self::Parameter { .. } => "parameterInput",
        }
    }

    /// Fixed child structure for this kind.
    #[must_use]
    pub fn child_rule(&self) -> ChildRule {
        match self {
            Self::Number
            | Self::Boolean
            | Self::GenerateString
            | Self::ProvideString
            | Self::ProvideOrigin
            | Self::ProvideHash
            | Self::PrivateKey
            | Self::Timestamp
            | Self::ChoosePublicKey { .. }
            | Self::AccountAlias
            | Self::AssetAlias
            | Self::Amount
            | Self::BtmUnit
            | Self::Password
            | Self::Path => ChildRule::Leaf,

            Self::String => ChildRule::OneOf(vec![Self::GenerateString, Self::ProvideString]),
            Self::Hash { hash_type } => match hash_type {
                Some(template) => ChildRule::OneOf(vec![
                    Self::GenerateHash {
                        hash_type: *template,
                    },
                    Self::ProvideHash,
                ]),
                None => ChildRule::OneOf(vec![Self::ProvideHash]),
            },
            Self::GenerateHash { hash_type } => {
                let preimage = match hash_type.input_type {
                    HashInputType::PublicKey => Self::PublicKey,
                    HashInputType::String => Self::String,
                };
                ChildRule::OneOf(vec![preimage])
            }
            Self::PublicKey | Self::Program => {
                ChildRule::OneOf(vec![Self::AccountAlias, Self::ProvideString])
            }
            Self::Signature => ChildRule::OneOf(vec![Self::AccountAlias]),
            Self::Time => ChildRule::OneOf(vec![Self::Timestamp]),
            Self::Asset => ChildRule::OneOf(vec![Self::AssetAlias, Self::ProvideString]),
            Self::Parameter { value_type } => {
                ChildRule::OneOf(vec![Self::for_declared_type(*value_type)])
            }

            Self::Value => ChildRule::AllOf(vec![
                Self::AccountAlias,
                Self::Asset,
                Self::Amount,
                Self::Password,
                Self::Gas,
            ]),
            Self::Gas => ChildRule::AllOf(vec![Self::BtmUnit]),
        }
    }

    /// Default `value` a freshly built node of this kind carries: composites
    /// select their first declared variant, leaves start empty except the gas
    /// unit selector.
    #[must_use]
    pub fn default_value(&self) -> String {
        match self.child_rule() {
            ChildRule::OneOf(variants) => variants[0].segment().to_string(),
            ChildRule::AllOf(_) | ChildRule::Leaf => match self {
                Self::BtmUnit => "btm".to_string(),
                _ => String::new(),
            },
        }
    }

    /// The input kind collecting a declared parameter of the given type.
    #[must_use]
    pub fn for_declared_type(ty: DeclaredType) -> Self {
        match ty {
            DeclaredType::Number => Self::Number,
            DeclaredType::Boolean => Self::Boolean,
            DeclaredType::String => Self::String,
            DeclaredType::Hash => Self::Hash { hash_type: None },
            DeclaredType::PublicKey => Self::PublicKey,
            DeclaredType::PrivateKey => Self::PrivateKey,
            DeclaredType::Signature => Self::Signature,
            DeclaredType::Time => Self::Time,
            DeclaredType::Program => Self::Program,
            DeclaredType::Asset => Self::Asset,
            DeclaredType::Amount => Self::Amount,
            DeclaredType::Value => Self::Value,
            DeclaredType::Sha3PublicKey
            | DeclaredType::Sha3String
            | DeclaredType::Sha256PublicKey
            | DeclaredType::Sha256String => Self::Hash {
                // hash_template() is Some for exactly these four forms
                hash_type: ty.hash_template(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::template::HashFunction;

    #[test]
    fn composite_defaults_select_first_variant() {
        assert_eq!(InputKind::PublicKey.default_value(), "accountInput");
        assert_eq!(InputKind::String.default_value(), "generateStringInput");
        assert_eq!(InputKind::Asset.default_value(), "assetAliasInput");
        assert_eq!(
            InputKind::Hash { hash_type: None }.default_value(),
            "provideHashInput"
        );
        assert_eq!(InputKind::BtmUnit.default_value(), "btm");
        assert_eq!(InputKind::Amount.default_value(), "");
    }

    #[test]
    fn lock_hash_offers_generate_and_provide() {
        let kind = InputKind::for_declared_type(DeclaredType::Sha3PublicKey);
        let ChildRule::OneOf(variants) = kind.child_rule() else {
            panic!("hash must be a variant composite");
        };
        assert_eq!(variants.len(), 2);
        assert!(matches!(
            &variants[0],
            InputKind::GenerateHash { hash_type } if hash_type.hash_function == HashFunction::Sha3
        ));
        assert_eq!(variants[1], InputKind::ProvideHash);
    }

    #[test]
    fn generate_hash_preimage_follows_input_type() {
        let kind = InputKind::GenerateHash {
            hash_type: HashTemplate {
                hash_function: HashFunction::Sha256,
                input_type: HashInputType::String,
            },
        };
        assert_eq!(
            kind.child_rule(),
            ChildRule::OneOf(vec![InputKind::String])
        );
    }

    #[test]
    fn value_aggregates_fixed_children() {
        let ChildRule::AllOf(children) = InputKind::Value.child_rule() else {
            panic!("value must aggregate");
        };
        let segments: Vec<_> = children.iter().map(InputKind::segment).collect();
        assert_eq!(
            segments,
            vec![
                "accountInput",
                "assetInput",
                "amountInput",
                "passwordInput",
                "gasInput"
            ]
        );
    }

    #[test]
    fn kind_tag_serialization_matches_segments() {
        let json = serde_json::to_value(&InputKind::Signature).expect("serialize");
        assert_eq!(json, serde_json::json!({ "type": "signatureInput" }));
    }
}
