//! Download task and report types.

use std::path::{Path, PathBuf};

use refvocab_core::Resource;
use serde::Serialize;

/// One file to fetch.
#[derive(Debug, Clone, Serialize)]
pub struct DownloadTask {
    pub name: String,
    pub url: String,
    pub dest: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl DownloadTask {
    pub fn new(name: impl Into<String>, url: impl Into<String>, dest: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            dest: dest.into(),
            user_agent: None,
        }
    }

    /// Task for a catalog resource, landing in `temp_dir`.
    pub fn for_resource(resource: &Resource, temp_dir: &Path) -> Self {
        Self {
            name: resource.name.clone(),
            url: resource.url.clone(),
            dest: temp_dir.join(&resource.temp_file),
            user_agent: resource.user_agent.clone(),
        }
    }
}

/// What happened to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "status")]
pub enum DownloadOutcome {
    Downloaded { bytes: u64 },
    /// Destination already existed and no refresh was forced.
    Skipped,
}

/// Result of one task, reported in submission order.
#[derive(Debug, Clone, Serialize)]
pub struct DownloadReport {
    pub name: String,
    pub dest: PathBuf,
    #[serde(flatten)]
    pub outcome: DownloadOutcome,
}
