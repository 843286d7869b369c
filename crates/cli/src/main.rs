mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Decision-table toolchain.
#[derive(Parser)]
#[command(name = "dmntab", version, about = "Decides inputs against a decision table")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a decision table against named input values
    Decide {
        /// Path to the decision-table definition file
        table: PathBuf,
        /// Decision id to evaluate (defaults to the first decision)
        #[arg(short = 'd', long)]
        decision: Option<String>,
        /// Input values as an inline JSON object
        #[arg(short = 'i', long)]
        inputs: Option<String>,
        /// Read input values from a JSON file instead
        #[arg(long, conflicts_with = "inputs")]
        inputs_file: Option<PathBuf>,
        /// Write the result to a file instead of stdout
        #[arg(long)]
        output_file: Option<PathBuf>,
    },

    /// Load a definition file and report what it contains
    Validate {
        /// Path to the decision-table definition file
        table: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Decide {
            table,
            decision,
            inputs,
            inputs_file,
            output_file,
        } => {
            commands::decide::cmd_decide(
                &table,
                decision.as_deref(),
                inputs.as_deref(),
                inputs_file.as_deref(),
                output_file.as_deref(),
                cli.output,
                cli.quiet,
            );
        }
        Commands::Validate { table } => {
            commands::validate::cmd_validate(&table, cli.output, cli.quiet);
        }
    }
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{{\"error\": \"{}\"}}", msg.replace('"', "\\\""));
        }
    }
}
