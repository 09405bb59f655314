//! Batch pipeline: fetch → normalize → write artifacts → manifest.

use anyhow::Context;
use tracing::info;

use refvocab_core::{RefVocabConfig, Resource, ResourceCatalog, ResourceKind};
use refvocab_export::{
    load_edmo_codes, write_edmo_csv, write_relation_files, Artifact, ConceptTable, Manifest,
};
use refvocab_fetch::{DownloadOutcome, DownloadTask, Downloader};
use refvocab_skos::Normalizer;

/// Per-vocabulary counts.
#[derive(Debug, Clone)]
pub struct VocabularySummary {
    pub name: String,
    pub concepts: usize,
    pub columns: Vec<&'static str>,
}

/// What a run produced.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub downloaded: usize,
    pub skipped: usize,
    pub vocabularies: Vec<VocabularySummary>,
    pub edmo_codes: usize,
    pub manifest: Manifest,
}

/// Everything one run needs; cloned into the blocking materialization task.
#[derive(Debug, Clone)]
pub struct Pipeline {
    pub config: RefVocabConfig,
    pub catalog: ResourceCatalog,
    pub normalizer: Normalizer,
    pub force_download: bool,
}

impl Pipeline {
    pub async fn run(self) -> anyhow::Result<RunSummary> {
        let tasks: Vec<DownloadTask> = self
            .catalog
            .resources
            .iter()
            .map(|r| DownloadTask::for_resource(r, &self.config.paths.temp))
            .collect();

        let downloader = Downloader::new(self.config.max_downloads, self.force_download)?;
        let reports = downloader
            .fetch_all(tasks)
            .await
            .context("Failed to fetch upstream sources")?;

        let skipped = reports
            .iter()
            .filter(|r| r.outcome == DownloadOutcome::Skipped)
            .count();
        let downloaded = reports.len() - skipped;

        let mut summary = tokio::task::spawn_blocking(move || self.materialize())
            .await
            .context("Materialization task panicked")??;

        summary.downloaded = downloaded;
        summary.skipped = skipped;
        Ok(summary)
    }

    /// Turn already-downloaded sources into artifacts and the manifest.
    pub fn materialize(&self) -> anyhow::Result<RunSummary> {
        let root = &self.config.paths.root;
        let mut summary = RunSummary::default();
        let mut artifacts: Vec<Artifact> = Vec::new();

        for resource in &self.catalog.resources {
            let source = self.config.paths.temp.join(&resource.temp_file);
            match resource.kind {
                ResourceKind::SdnVocabulary => {
                    info!("Loading SDN {}...", resource.name);
                    let vocab = self
                        .normalizer
                        .normalize_file(&source)
                        .with_context(|| format!("Failed to normalize {}", source.display()))?;

                    let relation_artifacts = write_relation_files(root, &resource.name, &vocab)
                        .with_context(|| format!("Failed to write {} relations", resource.name))?;

                    let table = ConceptTable::from_vocabulary(&vocab);
                    table
                        .write_csv(&root.join(&resource.table_file))
                        .with_context(|| format!("Failed to write {}", resource.table_file))?;

                    info!(
                        "{}: {} concepts, columns {:?}",
                        resource.name,
                        table.len(),
                        table.columns()
                    );

                    artifacts.push(table_artifact(resource));
                    artifacts.extend(relation_artifacts);
                    summary.vocabularies.push(VocabularySummary {
                        name: resource.name.clone(),
                        concepts: table.len(),
                        columns: table.columns(),
                    });
                }
                ResourceKind::EdmoCodes => {
                    let codes = load_edmo_codes(&source)
                        .with_context(|| format!("Failed to parse {}", source.display()))?;
                    write_edmo_csv(&codes, &root.join(&resource.table_file))
                        .with_context(|| format!("Failed to write {}", resource.table_file))?;

                    info!("{}: {} organization codes", resource.name, codes.len());
                    artifacts.push(table_artifact(resource));
                    summary.edmo_codes = codes.len();
                }
            }
        }

        let manifest = Manifest::build(&artifacts, root, &self.config.publish_base_url)
            .context("Failed to hash artifacts")?;
        manifest
            .write(&self.config.paths.manifest_file)
            .context("Failed to write manifest")?;
        summary.manifest = manifest;

        Ok(summary)
    }
}

fn table_artifact(resource: &Resource) -> Artifact {
    Artifact::new(resource.name.clone(), resource.table_file.clone())
}
