mod cli;
mod output;

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing::{debug, info};

use alertcond_classic::ConditionsCmd;
use alertcond_core::config::{self, OutputFormat};
use alertcond_core::{read_vars, Config};

use crate::cli::{CliArgs, Command};

fn main() -> Result<()> {
    config::load_dotenv();
    let config = Config::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    config.log_summary();

    let args = CliArgs::parse();

    match args.command {
        Command::NeedsVars { conditions, ref_id } => {
            let ref_id = ref_id.unwrap_or_else(|| config.ref_id.clone());
            let cmd = load_conditions(&conditions, &ref_id)?;
            for var in cmd.needs_vars() {
                println!("{}", var);
            }
        }
        Command::Eval {
            conditions,
            vars,
            ref_id,
            now,
            format,
        } => {
            let ref_id = ref_id.unwrap_or_else(|| config.ref_id.clone());
            let cmd = load_conditions(&conditions, &ref_id)?;
            let vars = read_vars(&vars)
                .with_context(|| format!("failed to read vars: {}", vars.display()))?;

            let missing: Vec<String> = cmd
                .needs_vars()
                .into_iter()
                .filter(|id| !vars.contains_key(id))
                .collect();
            if !missing.is_empty() {
                info!(?missing, "inputs absent from vars, treated as no data");
            }

            let now = now.unwrap_or_else(Utc::now);
            let results = cmd.execute(now, &vars);

            match format.unwrap_or(config.output) {
                OutputFormat::Json => {
                    let json = output::render_json(&results)
                        .context("failed to serialize results")?;
                    println!("{}", json);
                }
                OutputFormat::Text => {
                    let number = output::verdict_number(&results)
                        .context("conditions produced no verdict")?;
                    print!("{}", output::render_text(number));
                }
            }
        }
    }

    Ok(())
}

/// Parse a definition file, as YAML for `.yml`/`.yaml` and JSON otherwise.
fn load_conditions(path: &Path, ref_id: &str) -> Result<ConditionsCmd> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read conditions: {}", path.display()))?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yml") | Some("yaml")
    );
    debug!(path = %path.display(), yaml = is_yaml, "loading conditions");

    let cmd = if is_yaml {
        ConditionsCmd::from_yaml_str(&text, ref_id)
    } else {
        ConditionsCmd::from_json_str(&text, ref_id)
    };
    cmd.with_context(|| format!("failed to parse conditions: {}", path.display()))
}
