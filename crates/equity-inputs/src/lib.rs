//! Input tree and clause-witness compiler for Equity contract spends.
//!
//! The crate models contract lock/unlock forms as a flat tree of typed input
//! nodes keyed by dotted path, derives computed values (hash digests,
//! generated strings, resolved asset ids) from the tree, and compiles a
//! filled spend tree into the witness arguments and transaction actions the
//! construction service consumes.

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

pub mod encoding;
pub mod error;
pub mod inputs;
pub mod runtime;
pub mod schema;

pub use encoding::{ArgValue, data_to_arg_string, str_to_hex_char_code};
pub use error::InputError;
pub use inputs::kind::{ChildRule, InputKind, KeyData};
pub use inputs::node::{InputMap, InputNode};
pub use inputs::tree::{
    add_parameter_input, generate_input_map, generate_spend_input_map, generate_unlock_input_map,
};
pub use runtime::derive::{compute_data, get_data, store_computed_data};
pub use runtime::fee::{FEE_ASSET_ID, GasUnit, build_fee_action, build_unlock_action, scale_gas};
pub use runtime::validate::{are_spend_inputs_valid, is_ready_to_sign, is_valid_input};
pub use runtime::value::{
    RequiredValue, apply_required_value, clause_value_id, has_sufficient_balance,
    resolve_clause_value,
};
pub use runtime::witness::{ClauseFlagTable, build_spend_action, compile_clause_witness};
pub use schema::directory::{DirectoryItem, DirectorySnapshot};
pub use schema::template::{
    ClauseInfo, ClauseValueInfo, CompiledTemplate, ContractParameter, ContractUtxo, DeclaredType,
    HashFunction, HashInputType, HashTemplate,
};
pub use schema::witness::{Action, RawData, WitnessComponent};
