//! Clause-witness compilation: turn a filled spend map into the ordered
//! argument list the construction service expects.

use std::collections::BTreeMap;

use crate::encoding::{data_to_arg_string, str_to_hex_char_code};
use crate::error::InputError;
use crate::inputs::kind::InputKind;
use crate::inputs::node::{InputMap, lookup};
use crate::runtime::derive::get_data;
use crate::schema::template::{CompiledTemplate, DeclaredType};
use crate::schema::witness::{Action, RawData, WitnessComponent};

/// Per-template, per-clause selector flags appended to multi-clause spends.
///
/// The flag is a pre-encoded hex word selecting the clause branch inside the
/// compiled program. The table is explicit configuration: templates absent
/// from it cannot produce multi-clause witnesses, loudly.
#[derive(Debug, Clone)]
pub struct ClauseFlagTable {
    flags: BTreeMap<(String, String), String>,
}

impl ClauseFlagTable {
    /// Empty table; every multi-clause lookup fails until flags are inserted.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            flags: BTreeMap::new(),
        }
    }

    /// Register the selector flag for one template clause.
    pub fn insert(
        &mut self,
        template: impl Into<String>,
        clause: impl Into<String>,
        flag: impl Into<String>,
    ) {
        self.flags
            .insert((template.into(), clause.into()), flag.into());
    }

    /// Selector flag for the given template clause.
    ///
    /// # Errors
    ///
    /// Fails with [`InputError::UnknownClauseFlag`] when the pair was never
    /// registered.
    pub fn lookup(&self, template: &str, clause: &str) -> Result<&str, InputError> {
        self.flags
            .get(&(template.to_string(), clause.to_string()))
            .map(String::as_str)
            .ok_or_else(|| InputError::UnknownClauseFlag {
                template: template.to_string(),
                clause: clause.to_string(),
            })
    }
}

impl Default for ClauseFlagTable {
    /// Flags for the stock contract templates.
    fn default() -> Self {
        let mut table = Self::empty();
        table.insert("TradeOffer", "trade", "00000000");
        table.insert("TradeOffer", "cancel", "13000000");
        table.insert("Escrow", "approve", "00000000");
        table.insert("Escrow", "reject", "1a000000");
        table.insert("LoanCollateral", "repay", "00000000");
        table.insert("LoanCollateral", "default", "1b000000");
        table.insert("CallOption", "exercise", "00000000");
        table.insert("CallOption", "expire", "20000000");
        table
    }
}

fn missing(id: String) -> InputError {
    InputError::MissingInput(id)
}

fn provided_string(spend_map: &InputMap, id: &str) -> Option<String> {
    spend_map.get(id).and_then(|node| {
        (matches!(node.kind, InputKind::ProvideString) && !node.value.is_empty())
            .then(|| node.value.clone())
    })
}

fn public_key_component(
    spend_map: &InputMap,
    composite_id: &str,
) -> Result<WitnessComponent, InputError> {
    // A directly provided key wins over the account-backed placeholder.
    if let Some(value) = provided_string(spend_map, &format!("{composite_id}.provideStringInput")) {
        return Ok(WitnessComponent::Data {
            raw_data: RawData::Object { value },
        });
    }
    let account_path = format!("{composite_id}.accountInput");
    let account = spend_map.get(&account_path).ok_or_else(|| missing(account_path.clone()))?;
    if !matches!(account.kind, InputKind::AccountAlias) || account.value.is_empty() {
        return Err(missing(account_path));
    }
    Ok(WitnessComponent::PublickeyHash {
        account_id: account.value.clone(),
    })
}

fn string_component(
    spend_map: &InputMap,
    composite_id: &str,
) -> Result<WitnessComponent, InputError> {
    let provide_id = format!("{composite_id}.provideStringInput");
    if let Some(value) = provided_string(spend_map, &provide_id) {
        return Ok(WitnessComponent::Data {
            raw_data: RawData::Object { value },
        });
    }
    // Raw-origin strings are passed as hex char codes of the text.
    let origin_id = format!("{composite_id}.provideOriginInput");
    if let Some(origin) = spend_map.get(&origin_id) {
        if matches!(origin.kind, InputKind::ProvideOrigin) && !origin.value.is_empty() {
            return Ok(WitnessComponent::Data {
                raw_data: RawData::Object {
                    value: str_to_hex_char_code(&origin.value),
                },
            });
        }
    }
    Err(missing(provide_id))
}

fn signature_component(
    spend_map: &InputMap,
    param_id: &str,
) -> Result<WitnessComponent, InputError> {
    let account_path = format!("{param_id}.signatureInput.accountInput");
    let account = spend_map
        .get(&account_path)
        .ok_or_else(|| missing(account_path.clone()))?;
    if account.value.is_empty() {
        return Err(missing(account_path));
    }
    Ok(WitnessComponent::Signature {
        account_id: account.value.clone(),
    })
}

/// Compile the witness argument list for one clause of a spend.
///
/// Arguments appear in clause-parameter declaration order; multi-clause
/// templates get the clause selector flag appended last.
///
/// # Errors
///
/// Fails with [`InputError::MissingInput`] naming the first unfilled input,
/// with [`InputError::UnknownClauseFlag`] for an unregistered multi-clause
/// template, or with [`InputError::Lookup`] when `clause_name` is not a
/// clause of `template`.
pub fn compile_clause_witness(
    template: &CompiledTemplate,
    clause_name: &str,
    spend_map: &InputMap,
    flags: &ClauseFlagTable,
) -> Result<Vec<WitnessComponent>, InputError> {
    let clause = template
        .clause(clause_name)
        .ok_or_else(|| InputError::Lookup(format!("{}.{clause_name}", template.name)))?;

    let mut witness = Vec::with_capacity(clause.params.len() + 1);
    for param in &clause.params {
        let param_id = format!("clauseParameters.{clause_name}.{}", param.name);
        let node = lookup(spend_map, &param_id)
            .map_err(|error| error.into_missing_input(&param_id))?;
        let declared = match &node.kind {
            InputKind::Parameter { value_type } => Some(*value_type),
            _ => None,
        };
        let component = match declared {
            Some(DeclaredType::PublicKey) => {
                public_key_component(spend_map, &format!("{param_id}.publicKeyInput"))?
            }
            Some(DeclaredType::String) => {
                string_component(spend_map, &format!("{param_id}.stringInput"))?
            }
            Some(DeclaredType::Signature) => signature_component(spend_map, &param_id)?,
            _ => {
                let data = get_data(&param_id, spend_map)
                    .map_err(|error| error.into_missing_input(&param_id))?;
                WitnessComponent::Data {
                    raw_data: RawData::Hex(data_to_arg_string(&data)),
                }
            }
        };
        witness.push(component);
    }

    if template.is_multi_clause() {
        let flag = flags.lookup(&template.name, clause_name)?;
        witness.push(WitnessComponent::Data {
            raw_data: RawData::Object {
                value: flag.to_string(),
            },
        });
    }

    tracing::debug!(
        template = %template.name,
        clause = clause_name,
        components = witness.len(),
        "compiled clause witness"
    );
    Ok(witness)
}

/// Wrap a compiled witness into the action spending the contract UTXO.
#[must_use]
pub fn build_spend_action(utxo_id: &str, witness: Vec<WitnessComponent>) -> Action {
    Action::SpendUnspentOutput {
        output_id: utxo_id.to_string(),
        arguments: witness,
    }
}
