//! Witness components and transaction actions handed to the
//! signing/submission service.
//!
//! Serialization note: field names follow the construction service's wire
//! JSON exactly (`raw_data`, `accountId`, `spendUnspentOutput`, ...).

use serde::{Deserialize, Serialize};

/// Payload of a `data` witness: either a pre-encoded hex string or a wrapped
/// value object the signer resolves further.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RawData {
    Object { value: String },
    Hex(String),
}

/// One element of the ordered argument list a spend presents to satisfy a
/// contract clause.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WitnessComponent {
    Data {
        raw_data: RawData,
    },
    /// Placeholder naming the account whose public-key hash the signer must
    /// instantiate at signing time.
    PublickeyHash {
        #[serde(rename = "accountId")]
        account_id: String,
    },
    /// Placeholder naming the account that must sign; the signature bytes are
    /// produced outside this crate.
    Signature {
        #[serde(rename = "accountId")]
        account_id: String,
    },
}

/// A transaction action prepared for the construction service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Action {
    #[serde(rename_all = "camelCase")]
    SpendUnspentOutput {
        output_id: String,
        arguments: Vec<WitnessComponent>,
    },
    #[serde(rename_all = "camelCase")]
    SpendFromAccount {
        account_id: String,
        amount: u64,
        asset_id: String,
    },
    #[serde(rename_all = "camelCase")]
    ControlWithAddress {
        account_id: String,
        asset_id: String,
        amount: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_witness_wire_shape() {
        let witness = WitnessComponent::Signature {
            account_id: "acct1".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&witness).expect("serialize"),
            serde_json::json!({ "type": "signature", "accountId": "acct1" })
        );
    }

    #[test]
    fn data_witness_hex_and_object_shapes() {
        let hex = WitnessComponent::Data {
            raw_data: RawData::Hex("0100000000000000".to_string()),
        };
        assert_eq!(
            serde_json::to_value(&hex).expect("serialize"),
            serde_json::json!({ "type": "data", "raw_data": "0100000000000000" })
        );

        let object = WitnessComponent::Data {
            raw_data: RawData::Object {
                value: "00000000".to_string(),
            },
        };
        assert_eq!(
            serde_json::to_value(&object).expect("serialize"),
            serde_json::json!({ "type": "data", "raw_data": { "value": "00000000" } })
        );
    }

    #[test]
    fn raw_data_deserializes_untagged() {
        let object: RawData =
            serde_json::from_value(serde_json::json!({ "value": "abcd" })).expect("object");
        assert_eq!(
            object,
            RawData::Object {
                value: "abcd".to_string()
            }
        );

        let hex: RawData = serde_json::from_value(serde_json::json!("abcd")).expect("hex");
        assert_eq!(hex, RawData::Hex("abcd".to_string()));
    }

    #[test]
    fn spend_action_wire_shape() {
        let action = Action::SpendUnspentOutput {
            output_id: "utxo1".to_string(),
            arguments: vec![WitnessComponent::PublickeyHash {
                account_id: "acct1".to_string(),
            }],
        };
        assert_eq!(
            serde_json::to_value(&action).expect("serialize"),
            serde_json::json!({
                "type": "spendUnspentOutput",
                "outputId": "utxo1",
                "arguments": [{ "type": "publickey_hash", "accountId": "acct1" }]
            })
        );
    }
}
