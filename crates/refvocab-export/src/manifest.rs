//! Published-artifact manifest with MD5 content digests.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use md5::{Digest, Md5};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::{debug, info};

use refvocab_core::Result;

/// A generated file, addressed relative to the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Manifest key, e.g. `P01` or `P01.broader`.
    pub name: String,
    /// Path relative to the output root, e.g. `relations/P01.broader.json`.
    pub path: String,
}

impl Artifact {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    pub url: String,
    pub hash: String,
}

/// Resource name → `{url, hash}`, serialized in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<(String, ManifestEntry)>,
}

impl Manifest {
    /// Hash every artifact under `root` and pair it with its published URL.
    pub fn build(artifacts: &[Artifact], root: &Path, base_url: &str) -> Result<Self> {
        let mut manifest = Self::default();
        for artifact in artifacts {
            let hash = file_md5(&root.join(&artifact.path))?;
            debug!("{} md5={}", artifact.path, hash);
            manifest.insert(
                artifact.name.clone(),
                ManifestEntry {
                    url: format!("{}{}", base_url, artifact.path),
                    hash,
                },
            );
        }
        Ok(manifest)
    }

    /// Insert or replace; a replaced name keeps its position.
    pub fn insert(&mut self, name: String, entry: ManifestEntry) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = entry,
            None => self.entries.push((name, entry)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ManifestEntry> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, e)| e)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write as pretty-printed JSON (two-space indent).
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        info!("Wrote manifest with {} entries to {}", self.entries.len(), path.display());
        Ok(())
    }
}

impl Serialize for Manifest {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, entry) in &self.entries {
            map.serialize_entry(name, entry)?;
        }
        map.end()
    }
}

/// MD5 of a file's contents as lowercase hex, read in 64 KiB chunks.
pub fn file_md5(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Md5::new();
    let mut buf = vec![0u8; 64 * 1024];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}
