//! refvocab: regenerates reference vocabularies and their manifest.
//!
//! # Usage
//!
//! ```bash
//! # Reuse any sources already in .temp/
//! refvocab
//!
//! # Re-download everything into another output tree
//! refvocab --force-download --output-dir ./resources
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod pipeline;

use pipeline::Pipeline;
use refvocab_core::config::parse_max_downloads;
use refvocab_core::{RefVocabConfig, ResourceCatalog};
use refvocab_skos::{AliasTable, Normalizer};

#[derive(Parser)]
#[command(name = "refvocab")]
#[command(about = "Fetch and normalize reference vocabularies", long_about = None)]
struct Cli {
    /// Force file download even if it exists locally
    #[arg(short, long)]
    force_download: bool,

    /// Output directory (defaults to $REFVOCAB_OUTPUT_DIR, then the current directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// JSON file overriding the field alias table
    #[arg(long)]
    aliases: Option<PathBuf>,

    /// Maximum concurrent downloads (overrides $REFVOCAB_MAX_DOWNLOADS)
    #[arg(long, value_parser = parse_max_downloads)]
    max_downloads: Option<usize>,

    /// Base URL for manifest entries (overrides $REFVOCAB_PUBLISH_URL)
    #[arg(long)]
    publish_url: Option<String>,
}

fn resolve_output_dir(cli: &Cli) -> PathBuf {
    cli.output_dir
        .clone()
        .or_else(|| std::env::var("REFVOCAB_OUTPUT_DIR").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let output_dir = resolve_output_dir(&cli);

    let mut config = RefVocabConfig::from_env(&output_dir)
        .with_context(|| format!("Failed to prepare {}", output_dir.display()))?;
    if let Some(n) = cli.max_downloads {
        config.max_downloads = n;
    }
    if let Some(url) = cli.publish_url {
        config.publish_base_url = url;
    }

    let aliases = match &cli.aliases {
        Some(path) => AliasTable::from_json_file(path)
            .with_context(|| format!("Failed to load alias table {}", path.display()))?,
        None => AliasTable::skos_default(),
    };

    info!("Output directory: {}", config.paths.root.display());

    let started = std::time::Instant::now();
    let summary = Pipeline {
        config,
        catalog: ResourceCatalog::default_sources(),
        normalizer: Normalizer::new(aliases),
        force_download: cli.force_download,
    }
    .run()
    .await?;

    for vocab in &summary.vocabularies {
        info!("  {:<4} {:>6} concepts  [{}]", vocab.name, vocab.concepts, vocab.columns.join(", "));
    }
    info!(
        "Done in {:.1}s: {} downloaded, {} reused, {} vocabularies, {} EDMO codes, {} manifest entries",
        started.elapsed().as_secs_f64(),
        summary.downloaded,
        summary.skipped,
        summary.vocabularies.len(),
        summary.edmo_codes,
        summary.manifest.len()
    );

    Ok(())
}
