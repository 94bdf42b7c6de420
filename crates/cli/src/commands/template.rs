use std::fs;

use anyhow::{Context, Result};

use clap::Subcommand;

use equity_inputs::{CompiledTemplate, generate_input_map, generate_unlock_input_map};

#[derive(Subcommand, Debug)]
pub enum Template {
    /// Print a compiled template's parameters, clauses and value requirements
    Inspect {
        /// Path to the compiled template JSON
        #[arg(long = "file")]
        file: String,
    },
    /// Print the initial lock-flow input map for a compiled template
    LockMap {
        /// Path to the compiled template JSON
        #[arg(long = "file")]
        file: String,
    },
    /// Print the unlock-display input map (hash parameters collapsed)
    UnlockMap {
        /// Path to the compiled template JSON
        #[arg(long = "file")]
        file: String,
    },
}

pub fn load_template(path: &str) -> Result<CompiledTemplate> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading template {path}"))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing template {path}"))
}

impl Template {
    pub fn handle(&self) -> Result<()> {
        match self {
            Template::Inspect { file } => {
                let template = load_template(file)?;
                println!("template: {}", template.name);
                for param in &template.params {
                    println!("  param {} : {}", param.name, param.ty);
                }
                for clause in &template.clause_info {
                    println!("  clause {}", clause.name);
                    for param in &clause.params {
                        println!("    param {} : {}", param.name, param.ty);
                    }
                    for value in &clause.values {
                        println!(
                            "    value {} (asset: {}, amount: {})",
                            value.name,
                            value.asset.as_deref().unwrap_or("-"),
                            value.amount.as_deref().unwrap_or("-"),
                        );
                    }
                }
                if !template.value.is_empty() {
                    println!("  locks value: {}", template.value);
                }
                Ok(())
            }
            Template::LockMap { file } => {
                let template = load_template(file)?;
                let map = generate_input_map(&template);
                println!("{}", serde_json::to_string_pretty(&map)?);
                Ok(())
            }
            Template::UnlockMap { file } => {
                let template = load_template(file)?;
                let map = generate_unlock_input_map(&template);
                println!("{}", serde_json::to_string_pretty(&map)?);
                Ok(())
            }
        }
    }
}
