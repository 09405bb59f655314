//! Alias-tolerant field lookup.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::fields::ConceptField;
use refvocab_core::{Error, Result};

/// Logical field name → serialized keys to try, highest priority first.
///
/// Built once at startup and handed to the [`Normalizer`](crate::Normalizer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasTable {
    aliases: HashMap<String, Vec<String>>,
}

impl AliasTable {
    /// Table covering the spellings found across NVS collections.
    pub fn skos_default() -> Self {
        let entries: [(&str, &[&str]); 5] = [
            ("definition", &["definition", "skos:definition"]),
            ("prefLabel", &["prefLabel", "skos:prefLabel"]),
            ("identifier", &["dc:identifier", "dce:identifier"]),
            ("altLabel", &["altLabel", "skos:altLabel"]),
            ("uri", &["@id"]),
        ];
        let aliases = entries
            .iter()
            .map(|(key, candidates)| {
                (
                    key.to_string(),
                    candidates.iter().map(|c| c.to_string()).collect(),
                )
            })
            .collect();
        Self { aliases }
    }

    /// Load a table from a JSON object of `"field": ["key", ...]`.
    ///
    /// Fields may be named by any tracked spelling (`dc:identifier`, `id`,
    /// `skos:prefLabel`, ...); each is stored under its canonical key.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let entries: HashMap<String, Vec<String>> = serde_json::from_str(&raw)?;

        let mut aliases = HashMap::with_capacity(entries.len());
        for (name, candidates) in entries {
            let field = ConceptField::from_internal_name(&name).ok_or_else(|| {
                Error::Config(format!("unknown field '{}' in {}", name, path.display()))
            })?;
            if candidates.is_empty() {
                return Err(Error::Config(format!(
                    "alias '{}' in {} has no candidate keys",
                    name,
                    path.display()
                )));
            }
            let key = field.canonical_key().to_string();
            if aliases.insert(key, candidates).is_some() {
                return Err(Error::Config(format!(
                    "field '{}' is listed twice in {}",
                    field.canonical_key(),
                    path.display()
                )));
            }
        }

        Ok(Self { aliases })
    }

    /// Candidate keys for a logical field, if the table has an entry.
    pub fn candidates(&self, canonical_key: &str) -> Option<&[String]> {
        self.aliases.get(canonical_key).map(Vec::as_slice)
    }

    /// Resolve a logical field in `node`.
    ///
    /// Without a table entry the key itself is looked up. A miss is `None`,
    /// never an error.
    pub fn resolve<'a>(&self, node: &'a Map<String, Value>, canonical_key: &str) -> Option<&'a Value> {
        match self.candidates(canonical_key) {
            None => node.get(canonical_key),
            Some(candidates) => candidates.iter().find_map(|key| node.get(key)),
        }
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::skos_default()
    }
}
