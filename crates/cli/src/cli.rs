use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

use alertcond_core::config::OutputFormat;

/// Evaluate classic alert conditions against query results.
///
/// Condition definitions use the legacy `{"conditions": [...]}` shape, as
/// JSON or (for `.yml`/`.yaml` files) YAML. Vars files map each query
/// reference ID to its results.
#[derive(Parser, Debug)]
#[command(name = "alertcond", version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the query reference IDs a definition reads, one per line
    NeedsVars {
        /// Condition definition file
        conditions: PathBuf,

        /// Reference ID of the expression holding the definition
        #[arg(long)]
        ref_id: Option<String>,
    },

    /// Execute a definition against a vars file and print the verdict
    Eval {
        /// Condition definition file
        conditions: PathBuf,

        /// Vars file: {"A": [{"series": {...}}, {"number": {...}}, "no_data"]}
        vars: PathBuf,

        /// Reference ID of the expression holding the definition
        #[arg(long)]
        ref_id: Option<String>,

        /// Evaluation time (RFC 3339); defaults to now
        #[arg(long)]
        now: Option<DateTime<Utc>>,

        /// Output format: text or json (overrides ALERTCOND_OUTPUT)
        #[arg(long)]
        format: Option<OutputFormat>,
    },
}
