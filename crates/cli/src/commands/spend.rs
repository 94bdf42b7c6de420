use std::fs;

use anyhow::{Context, Result, anyhow};

use clap::Subcommand;

use equity_inputs::{
    Action, ClauseFlagTable, ContractUtxo, InputMap, apply_required_value,
    are_spend_inputs_valid, build_fee_action, build_spend_action, build_unlock_action,
    clause_value_id, compile_clause_witness, generate_spend_input_map, resolve_clause_value,
};

#[derive(Subcommand, Debug)]
pub enum Spend {
    /// Print the blank spend input map for one clause of a locked UTXO
    Build {
        /// Path to the contract UTXO JSON (includes its compiled template)
        #[arg(long = "utxo")]
        utxo: String,
        /// Clause to spend with
        #[arg(long = "clause")]
        clause: String,
    },
    /// Compile a filled spend map into witness arguments and actions
    Compile {
        /// Path to the contract UTXO JSON (includes its compiled template)
        #[arg(long = "utxo")]
        utxo: String,
        /// Clause to spend with
        #[arg(long = "clause")]
        clause: String,
        /// Path to the filled spend input map JSON
        #[arg(long = "inputs")]
        inputs: String,
        /// Path to the lock-time input map JSON, needed when the clause
        /// declares a required payment value
        #[arg(long = "lock-inputs")]
        lock_inputs: Option<String>,
    },
}

fn load_utxo(path: &str) -> Result<ContractUtxo> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading utxo {path}"))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing utxo {path}"))
}

fn load_map(path: &str) -> Result<InputMap> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading input map {path}"))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing input map {path}"))
}

impl Spend {
    pub fn handle(&self) -> Result<()> {
        match self {
            Spend::Build { utxo, clause } => {
                let utxo = load_utxo(utxo)?;
                utxo.template
                    .clause(clause)
                    .ok_or_else(|| anyhow!("template {} has no clause {clause}", utxo.template.name))?;
                let map = generate_spend_input_map(&utxo.template, clause);
                println!("{}", serde_json::to_string_pretty(&map)?);
                Ok(())
            }
            Spend::Compile {
                utxo,
                clause,
                inputs,
                lock_inputs,
            } => {
                let utxo = load_utxo(utxo)?;
                let clause_info = utxo
                    .template
                    .clause(clause)
                    .ok_or_else(|| anyhow!("template {} has no clause {clause}", utxo.template.name))?
                    .clone();
                let mut spend_map = load_map(inputs)?;

                if let Some(lock_path) = lock_inputs {
                    let lock_map = load_map(lock_path)?;
                    if let Some(required) =
                        resolve_clause_value(&clause_info, &lock_map, &spend_map)
                    {
                        let value_id = clause_value_id(clause, &spend_map)
                            .ok_or_else(|| anyhow!("spend map has no value parameter"))?;
                        apply_required_value(&mut spend_map, &value_id, &required)?;
                        tracing::info!(
                            asset = %required.asset_id,
                            amount = %required.amount,
                            "clause requires payment value"
                        );
                    }
                }

                if !are_spend_inputs_valid(&clause_info, &spend_map) {
                    return Err(anyhow!("spend inputs are incomplete or invalid"));
                }

                let witness = compile_clause_witness(
                    &utxo.template,
                    clause,
                    &spend_map,
                    &ClauseFlagTable::default(),
                )?;

                let mut actions: Vec<Action> = vec![build_spend_action(&utxo.id, witness)];
                if let Some(unlock) = build_unlock_action(&utxo, &spend_map) {
                    actions.push(unlock);
                }
                actions.push(build_fee_action(&spend_map)?);

                println!("{}", serde_json::to_string_pretty(&actions)?);
                Ok(())
            }
        }
    }
}
