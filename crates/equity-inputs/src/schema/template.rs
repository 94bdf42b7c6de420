//! Compiled contract template schema, as delivered by the template compiler
//! service.
//!
//! Serialization note: declared type tags keep the compiler service's
//! spelling (`"Sha3(PublicKey)"`, `"PublicKey"`, ...).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Hash function used by a hash-typed contract parameter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HashFunction {
    Sha3,
    Sha256,
}

/// What kind of pre-image a generated hash digests.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum HashInputType {
    PublicKey,
    String,
}

/// Declared hash metadata carried by `Sha3(..)`/`Sha256(..)` parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HashTemplate {
    #[serde(rename = "hashFunction")]
    pub hash_function: HashFunction,
    #[serde(rename = "inputType")]
    pub input_type: HashInputType,
}

/// Closed set of declared parameter types a compiled template can name.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DeclaredType {
    Number,
    Boolean,
    String,
    Hash,
    PublicKey,
    PrivateKey,
    Signature,
    Time,
    Program,
    Asset,
    Amount,
    Value,
    #[serde(rename = "Sha3(PublicKey)")]
    Sha3PublicKey,
    #[serde(rename = "Sha3(String)")]
    Sha3String,
    #[serde(rename = "Sha256(PublicKey)")]
    Sha256PublicKey,
    #[serde(rename = "Sha256(String)")]
    Sha256String,
}

impl DeclaredType {
    /// Hash metadata for the `Sha3(..)`/`Sha256(..)` forms, `None` otherwise.
    #[must_use]
    pub const fn hash_template(self) -> Option<HashTemplate> {
        let (hash_function, input_type) = match self {
            Self::Sha3PublicKey => (HashFunction::Sha3, HashInputType::PublicKey),
            Self::Sha3String => (HashFunction::Sha3, HashInputType::String),
            Self::Sha256PublicKey => (HashFunction::Sha256, HashInputType::PublicKey),
            Self::Sha256String => (HashFunction::Sha256, HashInputType::String),
            _ => return None,
        };
        Some(HashTemplate {
            hash_function,
            input_type,
        })
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Number => "Number",
            Self::Boolean => "Boolean",
            Self::String => "String",
            Self::Hash => "Hash",
            Self::PublicKey => "PublicKey",
            Self::PrivateKey => "PrivateKey",
            Self::Signature => "Signature",
            Self::Time => "Time",
            Self::Program => "Program",
            Self::Asset => "Asset",
            Self::Amount => "Amount",
            Self::Value => "Value",
            Self::Sha3PublicKey => "Sha3(PublicKey)",
            Self::Sha3String => "Sha3(String)",
            Self::Sha256PublicKey => "Sha256(PublicKey)",
            Self::Sha256String => "Sha256(String)",
        };
        f.write_str(label)
    }
}

/// One declared parameter: name plus declared type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContractParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: DeclaredType,
}

/// Declared value-parameter metadata for one clause: which sibling parameters
/// name the asset and amount the clause requires.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClauseValueInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
}

/// One unlocking clause: ordered parameters plus declared value requirements.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClauseInfo {
    pub name: String,
    #[serde(default)]
    pub params: Vec<ContractParameter>,
    #[serde(default)]
    pub values: Vec<ClauseValueInfo>,
}

/// A compiled contract template as received from the compiler service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompiledTemplate {
    pub name: String,
    #[serde(default)]
    pub params: Vec<ContractParameter>,
    #[serde(default)]
    pub clause_info: Vec<ClauseInfo>,
    /// Name of the declared value parameter; empty when the template locks no
    /// explicit value.
    #[serde(default)]
    pub value: String,
}

impl CompiledTemplate {
    /// Look up a clause by name.
    #[must_use]
    pub fn clause(&self, name: &str) -> Option<&ClauseInfo> {
        self.clause_info.iter().find(|clause| clause.name == name)
    }

    /// Whether spends of this template need a trailing clause-selector flag.
    #[must_use]
    pub fn is_multi_clause(&self) -> bool {
        self.clause_info.len() > 1
    }
}

/// A contract-locked UTXO selected for spending.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContractUtxo {
    pub id: String,
    #[serde(rename = "assetId")]
    pub asset_id: String,
    pub amount: u64,
    pub template: CompiledTemplate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_type_roundtrips_source_spelling() {
        let json = serde_json::json!({ "name": "publicKeyHash", "type": "Sha3(PublicKey)" });
        let param: ContractParameter = serde_json::from_value(json.clone()).expect("deserialize");
        assert_eq!(param.ty, DeclaredType::Sha3PublicKey);
        assert_eq!(serde_json::to_value(&param).expect("serialize"), json);
    }

    #[test]
    fn hash_template_only_for_hash_forms() {
        assert_eq!(
            DeclaredType::Sha256String.hash_template(),
            Some(HashTemplate {
                hash_function: HashFunction::Sha256,
                input_type: HashInputType::String,
            })
        );
        assert_eq!(DeclaredType::Signature.hash_template(), None);
        assert_eq!(DeclaredType::Hash.hash_template(), None);
    }

    #[test]
    fn template_clause_lookup() {
        let template = CompiledTemplate {
            name: "TradeOffer".to_string(),
            params: Vec::new(),
            clause_info: vec![
                ClauseInfo {
                    name: "trade".to_string(),
                    params: Vec::new(),
                    values: Vec::new(),
                },
                ClauseInfo {
                    name: "cancel".to_string(),
                    params: Vec::new(),
                    values: Vec::new(),
                },
            ],
            value: String::new(),
        };
        assert!(template.is_multi_clause());
        assert_eq!(template.clause("cancel").map(|c| c.name.as_str()), Some("cancel"));
        assert!(template.clause("missing").is_none());
    }
}
