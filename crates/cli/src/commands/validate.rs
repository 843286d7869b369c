use std::path::Path;
use std::process;

use dmntab_core::DefinitionFile;

use crate::{report_error, OutputFormat};

pub(crate) fn cmd_validate(table_path: &Path, output: OutputFormat, quiet: bool) {
    let table_str = match std::fs::read_to_string(table_path) {
        Ok(s) => s,
        Err(_) => {
            let msg = format!("error: table file not found: {}", table_path.display());
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    match table_str.parse::<DefinitionFile>() {
        Ok(file) => {
            if quiet {
                return;
            }
            match output {
                OutputFormat::Json => {
                    let decisions: Vec<serde_json::Value> = file
                        .decisions
                        .iter()
                        .map(|d| {
                            serde_json::json!({
                                "id": d.id,
                                "hit_policy": d.hit_policy.name(),
                                "inputs": d.inputs.len(),
                                "outputs": d.outputs.len(),
                                "rules": d.rules.len(),
                            })
                        })
                        .collect();
                    let report = serde_json::json!({ "valid": true, "decisions": decisions });
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&report)
                            .unwrap_or_else(|e| format!("serialization error: {}", e))
                    );
                }
                OutputFormat::Text => {
                    for d in &file.decisions {
                        println!(
                            "{}: {} policy, {} input(s), {} output(s), {} rule(s)",
                            d.id,
                            d.hit_policy.name(),
                            d.inputs.len(),
                            d.outputs.len(),
                            d.rules.len(),
                        );
                    }
                    println!("definition is valid");
                }
            }
        }
        Err(e) => {
            let msg = format!("invalid definition: {}", e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    }
}
