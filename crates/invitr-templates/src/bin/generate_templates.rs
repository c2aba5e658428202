use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

/// Writes the invitation template catalogue as JSON.
#[derive(Debug, Parser)]
#[command(name = "generate-templates", version)]
struct Args {
    /// Output file
    #[arg(short, long, default_value = "templates_output.json")]
    output: PathBuf,

    /// Single-line JSON instead of indented
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "generate_templates=info".into()),
        )
        .init();

    let args = Args::parse();
    let catalogue = invitr_templates::generate_catalogue();

    let json = if args.compact {
        serde_json::to_string(&catalogue)?
    } else {
        serde_json::to_string_pretty(&catalogue)?
    };
    fs::write(&args.output, json).with_context(|| format!("Cannot write {}", args.output.display()))?;

    for (category, templates) in catalogue.categories() {
        info!("{}: {} templates", category, templates.len());
    }
    info!("Wrote {} templates to {}", catalogue.len(), args.output.display());
    Ok(())
}
