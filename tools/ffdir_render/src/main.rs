use anyhow::{bail, Context, Result};
use clap::Parser;
use ffdir_core::config::SiteConfig;
use ffdir_core::fetch::{fetch_directory, fetch_schema_bundle, SchemaBundle};
use ffdir_core::page::{HtmlTemplates, PageAssembler};
use ffdir_core::schema::SchemaRegistry;
use ffdir_core::site::{read_directory, SiteBuilder};
use serde_json::Value;
use std::path::PathBuf;
use time::OffsetDateTime;
use tracing::info;

#[derive(Parser)]
#[command(name = "ffdir_render")]
#[command(about = "Render the community API directory as static HTML", long_about = None)]
struct Cli {
    /// Output directory for the generated pages
    out_dir: PathBuf,

    /// TOML file with source URLs, timeouts and paths
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use schema files from this directory instead of downloading them
    #[arg(long)]
    specs_dir: Option<PathBuf>,

    /// Read the community directory from this file instead of fetching it
    #[arg(long)]
    directory: Option<PathBuf>,

    /// Static assets copied next to the pages
    #[arg(long)]
    static_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let cfg = resolve_config(&cli)?;

    // Dropping the bundle removes the downloaded schema files, also on error.
    let mut bundle: Option<SchemaBundle> = None;
    let registry = match &cfg.specs_dir {
        Some(dir) => SchemaRegistry::load(dir)
            .with_context(|| format!("loading schemas from {}", dir.display()))?,
        None => {
            let url = cfg.schema_bundle_url()?;
            info!(url = %url, "fetching schema bundle");
            let fetched = fetch_schema_bundle(&url, cfg.bundle_timeout())
                .context("fetching schema bundle")?;
            if fetched.is_empty() {
                bail!("schema bundle at {} contains no specs/*.json files", url);
            }
            let registry = fetched.load_registry().context("loading fetched schemas")?;
            bundle = Some(fetched);
            registry
        }
    };
    info!(versions = ?registry.versions(), "schemas loaded");

    let directory: Value = match &cfg.directory_file {
        Some(path) => read_directory(path)
            .with_context(|| format!("reading community directory {}", path.display()))?,
        None => {
            let url = cfg.directory_url()?;
            info!(url = %url, "fetching community directory");
            fetch_directory(&url, cfg.directory_timeout())
                .context("fetching community directory")?
        }
    };

    let templates = HtmlTemplates {
        site_title: cfg.site_title.clone(),
    };
    let assembler = PageAssembler::new(&registry, OffsetDateTime::now_utc());
    let report = SiteBuilder::new(&cli.out_dir, assembler, &templates)
        .with_static_dir(&cfg.static_dir)
        .build(&directory)
        .with_context(|| format!("building site in {}", cli.out_dir.display()))?;

    if let Some(bundle) = bundle {
        bundle.close().context("removing temporary schema files")?;
    }

    info!(
        rendered = report.rendered.len(),
        skipped = report.skipped.len(),
        assets = report.assets_copied,
        "generated pages in {}",
        cli.out_dir.display()
    );
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<SiteConfig> {
    let mut cfg = match &cli.config {
        Some(path) => SiteConfig::load(path)?,
        None => SiteConfig::default(),
    };
    if let Some(dir) = &cli.specs_dir {
        cfg.specs_dir = Some(dir.clone());
    }
    if let Some(path) = &cli.directory {
        cfg.directory_file = Some(path.clone());
    }
    if let Some(dir) = &cli.static_dir {
        cfg.static_dir = dir.clone();
    }
    cfg.validate()?;
    Ok(cfg)
}
