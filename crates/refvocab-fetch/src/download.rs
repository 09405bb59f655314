//! HTTP download fan-out.

use std::path::{Path, PathBuf};

use futures::{StreamExt, TryStreamExt};
use reqwest::header::USER_AGENT;
use reqwest::Client;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::types::{DownloadOutcome, DownloadReport, DownloadTask};
use refvocab_core::{Error, Result};

/// Fetches [`DownloadTask`]s with at most `max_concurrent` requests in flight.
pub struct Downloader {
    client: Client,
    max_concurrent: usize,
    force: bool,
}

impl Downloader {
    /// `force` re-downloads files that already exist locally.
    pub fn new(max_concurrent: usize, force: bool) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| Error::Http(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(client, max_concurrent, force))
    }

    pub fn with_client(client: Client, max_concurrent: usize, force: bool) -> Self {
        Self {
            client,
            max_concurrent: max_concurrent.max(1),
            force,
        }
    }

    /// Run all tasks. Reports come back in the order tasks were given;
    /// the first failure (in that order) aborts the batch.
    pub async fn fetch_all(&self, tasks: Vec<DownloadTask>) -> Result<Vec<DownloadReport>> {
        info!(
            "Fetching {} sources ({} concurrent, force={})",
            tasks.len(),
            self.max_concurrent,
            self.force
        );

        futures::stream::iter(tasks)
            .map(|task| self.fetch_one(task))
            .buffered(self.max_concurrent)
            .try_collect()
            .await
    }

    /// Fetch a single task, honouring the skip-if-present rule.
    pub async fn fetch_one(&self, task: DownloadTask) -> Result<DownloadReport> {
        if !self.force && tokio::fs::try_exists(&task.dest).await? {
            debug!("{} already present at {}, skipping", task.name, task.dest.display());
            return Ok(DownloadReport {
                name: task.name,
                dest: task.dest,
                outcome: DownloadOutcome::Skipped,
            });
        }

        info!("downloading {}...", task.dest.display());

        let mut request = self.client.get(&task.url);
        if let Some(agent) = &task.user_agent {
            request = request.header(USER_AGENT, agent.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Http(format!("Request to {} failed: {}", task.url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("{} returned {}: {}", task.url, status, body);
            return Err(Error::Http(format!(
                "Could not download {} from {}: {}",
                task.name, task.url, status
            )));
        }

        let bytes = write_body(response, &task.dest).await?;
        info!("{} done! ({} bytes)", task.dest.display(), bytes);

        Ok(DownloadReport {
            name: task.name,
            dest: task.dest,
            outcome: DownloadOutcome::Downloaded { bytes },
        })
    }
}

/// Stream the body to `<dest>.part`, then rename into place; `dest` never
/// holds a partial body.
async fn write_body(response: reqwest::Response, dest: &Path) -> Result<u64> {
    let part = part_path(dest);
    let mut file = tokio::fs::File::create(&part).await?;
    let mut stream = response.bytes_stream();
    let mut written = 0u64;

    while let Some(chunk) = stream.next().await {
        let bytes = chunk.map_err(|e| Error::Http(format!("Stream read error: {}", e)))?;
        file.write_all(&bytes).await?;
        written += bytes.len() as u64;
    }

    file.flush().await?;
    drop(file);
    tokio::fs::rename(&part, dest).await?;
    Ok(written)
}

fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    dest.with_file_name(name)
}
