//! Derived-value computation over a populated input tree.
//!
//! All computation is pure: repeated calls against an unchanged map return
//! identical results, and nothing here mutates the tree except the explicit
//! [`store_computed_data`] writer. During interactive editing a
//! [`InputError::Computation`] simply means "no value yet"; the witness
//! compiler escalates it to `MissingInput` at commit time.

use chrono::NaiveDateTime;
use sha2::{Digest, Sha256};
use sha3::Sha3_256;

use crate::encoding::ArgValue;
use crate::error::InputError;
use crate::inputs::kind::InputKind;
use crate::inputs::node::{InputMap, InputNode, lookup, lookup_mut};
use crate::schema::template::{HashFunction, HashInputType};

fn computation(id: &str, message: impl Into<String>) -> InputError {
    InputError::Computation {
        id: id.to_string(),
        message: message.into(),
    }
}

/// Parse a timestamp leaf: either bare Unix seconds or a
/// `YYYY-MM-DDTHH:MM[:SS]` datetime interpreted as UTC.
pub(crate) fn parse_timestamp(value: &str) -> Option<u64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return trimmed.parse().ok();
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return u64::try_from(datetime.and_utc().timestamp()).ok();
        }
    }
    None
}

fn digest(function: HashFunction, preimage: &[u8]) -> Vec<u8> {
    match function {
        HashFunction::Sha3 => Sha3_256::digest(preimage).to_vec(),
        HashFunction::Sha256 => Sha256::digest(preimage).to_vec(),
    }
}

/// Deterministic byte sequence for `generateStringInput`: SHA-256 of the
/// length string, extended by rehashing until `length` bytes exist.
fn derived_bytes(length: usize, seed: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(length);
    let mut block = Sha256::digest(seed.as_bytes());
    while out.len() < length {
        out.extend_from_slice(&block);
        block = Sha256::digest(&block);
    }
    out.truncate(length);
    out
}

fn active_child<'a>(node: &InputNode, map: &'a InputMap) -> Result<&'a InputNode, InputError> {
    let child_id = node
        .active_child_id()
        .ok_or_else(|| computation(&node.name, "no active child variant selected"))?;
    lookup(map, &child_id)
}

/// Resolve a generate-hash pre-image subtree to the bytes that get hashed:
/// raw public-key bytes for `PublicKey` pre-images, string/derived bytes for
/// `String` pre-images.
fn resolve_preimage(
    child: &InputNode,
    map: &InputMap,
    input_type: HashInputType,
) -> Result<Vec<u8>, InputError> {
    let resolved = get_data(&child.name, map)?;
    let bytes = match resolved {
        ArgValue::Bytes(bytes) => bytes,
        ArgValue::Number(n) => n.to_le_bytes().to_vec(),
    };
    match input_type {
        HashInputType::PublicKey => {
            let hex_string = String::from_utf8(bytes)
                .map_err(|_| computation(&child.name, "public key pre-image is not text"))?;
            hex::decode(hex_string.trim())
                .map_err(|error| computation(&child.name, format!("invalid public key hex: {error}")))
        }
        HashInputType::String => Ok(bytes),
    }
}

/// Resolve the wire value of a node, recursing through the active child of
/// each composite.
///
/// Account-backed and signature inputs have no locally derivable value; for
/// those this fails with [`InputError::Computation`] and the caller decides
/// whether that is "not yet" (editing) or fatal (witness compilation).
pub fn get_data(id: &str, map: &InputMap) -> Result<ArgValue, InputError> {
    let node = lookup(map, id)?;
    match &node.kind {
        InputKind::Number | InputKind::Amount => node
            .value
            .parse::<u64>()
            .map(ArgValue::Number)
            .map_err(|_| computation(id, "value is not a non-negative integer")),
        InputKind::Boolean => match node.value.as_str() {
            "true" => Ok(ArgValue::Number(1)),
            "false" => Ok(ArgValue::Number(0)),
            _ => Err(computation(id, "value is not a boolean")),
        },
        InputKind::Timestamp => parse_timestamp(&node.value)
            .map(ArgValue::Number)
            .ok_or_else(|| computation(id, "value is not a timestamp")),
        InputKind::ProvideString | InputKind::ProvideOrigin | InputKind::Path => {
            if node.value.is_empty() {
                return Err(computation(id, "value is empty"));
            }
            Ok(ArgValue::Bytes(node.value.clone().into_bytes()))
        }
        InputKind::ProvideHash | InputKind::PrivateKey | InputKind::AssetAlias => {
            if node.value.is_empty() {
                return Err(computation(id, "value is empty"));
            }
            hex::decode(&node.value)
                .map(ArgValue::Bytes)
                .map_err(|error| computation(id, format!("invalid hex: {error}")))
        }
        InputKind::GenerateString => {
            let length: usize = node
                .value
                .parse()
                .map_err(|_| computation(id, "length is not a non-negative integer"))?;
            if length == 0 {
                return Err(computation(id, "length must be positive"));
            }
            Ok(ArgValue::Bytes(derived_bytes(length, &node.value)))
        }
        InputKind::GenerateHash { hash_type } => {
            let child = active_child(node, map)?;
            let preimage = resolve_preimage(child, map, hash_type.input_type)?;
            Ok(ArgValue::Bytes(digest(hash_type.hash_function, &preimage)))
        }
        InputKind::String
        | InputKind::Hash { .. }
        | InputKind::PublicKey
        | InputKind::Program
        | InputKind::Asset
        | InputKind::Time
        | InputKind::Parameter { .. } => {
            let child = active_child(node, map)?;
            get_data(&child.name, map)
        }
        InputKind::AccountAlias => Err(computation(
            id,
            "account-backed values are resolved by the signing service",
        )),
        InputKind::Signature => Err(computation(
            id,
            "signatures are produced by the signing service",
        )),
        InputKind::ChoosePublicKey { .. } => Err(computation(
            id,
            "key material is resolved by the signing service",
        )),
        InputKind::Value | InputKind::Gas | InputKind::BtmUnit | InputKind::Password => {
            Err(computation(id, "input kind has no wire encoding"))
        }
    }
}

/// Compute the displayable derived value for nodes that carry one: hash
/// digests, generated strings, resolved asset ids and key-derivation data.
pub fn compute_data(id: &str, map: &InputMap) -> Result<String, InputError> {
    let node = lookup(map, id)?;
    match &node.kind {
        InputKind::GenerateHash { .. } | InputKind::GenerateString => match get_data(id, map)? {
            ArgValue::Bytes(bytes) => Ok(hex::encode(bytes)),
            ArgValue::Number(n) => Ok(hex::encode(n.to_le_bytes())),
        },
        InputKind::Asset => {
            let child = active_child(node, map)?;
            if child.value.is_empty() {
                return Err(computation(id, "no asset selected"));
            }
            Ok(child.value.clone())
        }
        InputKind::ChoosePublicKey { key_map } => {
            let key_data = key_map
                .get(&node.value)
                .ok_or_else(|| computation(id, "no known key selected"))?;
            Ok(serde_json::to_string(key_data)?)
        }
        _ => Err(computation(id, "input kind has no derived value")),
    }
}

/// Recompute and store `computed_data` on one node.
///
/// The stored value is purely a cache of [`compute_data`]; it is cleared when
/// recomputation fails so stale derivations never outlive their inputs.
pub fn store_computed_data(map: &mut InputMap, id: &str) -> Result<(), InputError> {
    let computed = compute_data(id, map);
    let node = lookup_mut(map, id)?;
    match computed {
        Ok(value) => {
            node.computed_data = Some(value);
            Ok(())
        }
        Err(error) => {
            node.computed_data = None;
            Err(error)
        }
    }
}
