use anyhow::{Context, Result};
use clap::Parser;
use ffdir_core::schema::SchemaRegistry;
use ffdir_core::validator::{validate_community, ValidationStatus};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ffdir_validate")]
#[command(about = "Validate one community API file against the schema directory", long_about = None)]
struct Cli {
    /// Directory of <version>.json schema files
    #[arg(long, default_value = "specs")]
    specs_dir: PathBuf,

    /// Community API file to check
    record: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(true) => std::process::exit(0),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("validator error: {:#}", e);
            std::process::exit(2);
        }
    }
}

fn run(cli: &Cli) -> Result<bool> {
    let registry = SchemaRegistry::load(&cli.specs_dir)
        .with_context(|| format!("loading schemas from {}", cli.specs_dir.display()))?;
    let text = std::fs::read_to_string(&cli.record)
        .with_context(|| format!("reading {}", cli.record.display()))?;
    let record: Value = serde_json::from_str(&text).context("parsing community file")?;

    match validate_community(&registry, &record) {
        Some(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(result.status != ValidationStatus::Invalid)
        }
        None => {
            println!("null");
            Ok(false)
        }
    }
}
