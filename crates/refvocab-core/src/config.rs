//! Configuration and output directory management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Raw-URL prefix under which the generated artifacts are published.
pub const DEFAULT_PUBLISH_URL: &str =
    "https://raw.githubusercontent.com/emso-eric/emso-metadata-specifications/refs/heads/develop/";

/// Default number of concurrent downloads.
pub const DEFAULT_MAX_DOWNLOADS: usize = 10;

/// Paths to all refvocab output directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputPaths {
    /// Root output directory; CSV tables land here.
    pub root: PathBuf,
    /// Relation graphs (`relations/`).
    pub relations: PathBuf,
    /// Raw downloaded sources (`.temp/`).
    pub temp: PathBuf,
    /// Manifest file (`manifest.json`).
    pub manifest_file: PathBuf,
}

impl OutputPaths {
    /// Create output paths from a root directory. Creates directories if needed.
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        let paths = Self {
            relations: root.join("relations"),
            temp: root.join(".temp"),
            manifest_file: root.join("manifest.json"),
            root,
        };
        paths.ensure_dirs()?;
        Ok(paths)
    }

    fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.relations)?;
        std::fs::create_dir_all(&self.temp)?;
        Ok(())
    }

    /// Resolve a path relative to the output root (as recorded in the manifest).
    pub fn resolve(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }
}

/// Top-level refvocab configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefVocabConfig {
    /// Output directory paths.
    pub paths: OutputPaths,
    /// Base URL prepended to every artifact path in the manifest.
    pub publish_base_url: String,
    /// Maximum number of downloads in flight.
    pub max_downloads: usize,
}

impl RefVocabConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env(output_dir: impl AsRef<Path>) -> Result<Self> {
        let publish_base_url = std::env::var("REFVOCAB_PUBLISH_URL")
            .unwrap_or_else(|_| DEFAULT_PUBLISH_URL.to_string());

        let max_downloads = match std::env::var("REFVOCAB_MAX_DOWNLOADS") {
            Ok(raw) => parse_max_downloads(&raw)?,
            Err(_) => DEFAULT_MAX_DOWNLOADS,
        };

        let paths = OutputPaths::new(output_dir)?;
        tracing::debug!(
            "Output root {}, publish base {}, max downloads {}",
            paths.root.display(),
            publish_base_url,
            max_downloads
        );

        Ok(Self {
            paths,
            publish_base_url,
            max_downloads,
        })
    }
}

/// Parse a download bound; zero would stall the fan-out, so it is rejected.
pub fn parse_max_downloads(raw: &str) -> Result<usize> {
    match raw.trim().parse::<usize>() {
        Ok(0) => Err(Error::Config("max downloads must be at least 1".into())),
        Ok(n) => Ok(n),
        Err(e) => Err(Error::Config(format!(
            "invalid max downloads '{}': {}",
            raw, e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_paths_create_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let paths = OutputPaths::new(dir.path().join("out")).unwrap();
        assert!(paths.relations.is_dir());
        assert!(paths.temp.is_dir());
        assert_eq!(paths.manifest_file, dir.path().join("out/manifest.json"));
        assert_eq!(
            paths.resolve("relations/P01.broader.json"),
            dir.path().join("out/relations/P01.broader.json")
        );
    }

    #[test]
    fn test_parse_max_downloads() {
        assert_eq!(parse_max_downloads("4").unwrap(), 4);
        assert_eq!(parse_max_downloads(" 12 ").unwrap(), 12);
        assert!(matches!(parse_max_downloads("0"), Err(Error::Config(_))));
        assert!(matches!(parse_max_downloads("many"), Err(Error::Config(_))));
    }
}
