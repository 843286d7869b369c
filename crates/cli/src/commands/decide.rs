use std::path::Path;
use std::process;

use dmntab_core::DefinitionFile;
use dmntab_eval::{assemble_bindings, evaluate, EvaluationResult};

use crate::{report_error, OutputFormat};

pub(crate) fn cmd_decide(
    table_path: &Path,
    decision_id: Option<&str>,
    inputs: Option<&str>,
    inputs_file: Option<&Path>,
    output_file: Option<&Path>,
    output: OutputFormat,
    quiet: bool,
) {
    // Read and load the definition file
    let table_str = match std::fs::read_to_string(table_path) {
        Ok(s) => s,
        Err(_) => {
            let msg = format!("error: table file not found: {}", table_path.display());
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };
    let file: DefinitionFile = match table_str.parse() {
        Ok(f) => f,
        Err(e) => {
            let msg = format!("error: {}", e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };
    let table = match file.decision(decision_id) {
        Ok(t) => t,
        Err(e) => {
            let msg = format!("error: {}", e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    // Inputs: from a file, an inline JSON string, or empty
    let inputs_str = match inputs_file {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(_) => {
                let msg = format!("error: inputs file not found: {}", path.display());
                report_error(&msg, output, quiet);
                process::exit(1);
            }
        },
        None => inputs.unwrap_or("{}").to_string(),
    };
    let inputs_json: serde_json::Value = match serde_json::from_str(&inputs_str) {
        Ok(v) => v,
        Err(e) => {
            let msg = format!("error: invalid JSON inputs: {}", e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let bindings = match assemble_bindings(table, &inputs_json) {
        Ok(b) => b,
        Err(e) => {
            let msg = format!("evaluation error: {}", e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    match evaluate(table, &bindings) {
        Ok(result) => emit_result(&result, output_file, output, quiet),
        Err(e) => {
            let msg = format!("evaluation error: {}", e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    }
}

fn emit_result(
    result: &EvaluationResult,
    output_file: Option<&Path>,
    output: OutputFormat,
    quiet: bool,
) {
    let json = serde_json::to_string_pretty(&result.to_json())
        .unwrap_or_else(|e| format!("serialization error: {}", e));

    if let Some(path) = output_file {
        if let Err(e) = std::fs::write(path, &json) {
            let msg = format!("error: cannot write {}: {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
        if !quiet && output == OutputFormat::Text {
            println!("result written to {}", path.display());
        }
        return;
    }

    if quiet {
        return;
    }
    match output {
        OutputFormat::Json => println!("{}", json),
        OutputFormat::Text => {
            if result.is_empty() {
                println!("no rule matched");
            } else {
                for (name, value) in result.iter() {
                    println!("{} = {}", name, value);
                }
            }
        }
    }
}
