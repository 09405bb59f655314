//! Concept-graph normalization: JSON-LD `@graph` → concept records + relation maps.

use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::alias::AliasTable;
use crate::fields::ConceptField;
use crate::relations::{RelationKind, RelationMap, RelationValue};
use refvocab_core::{Error, Result};

/// Type tag of the nodes that become records.
pub const CONCEPT_TYPE: &str = "skos:Concept";

/// Keys that may carry a node's type tag, checked in order.
const TYPE_KEYS: [&str; 2] = ["@type", "rdf:type"];

/// One normalized vocabulary entry. Absent fields stay `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConceptRecord {
    pub uri: String,
    #[serde(rename = "prefLabel", skip_serializing_if = "Option::is_none")]
    pub pref_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(rename = "altLabel", skip_serializing_if = "Option::is_none")]
    pub alt_label: Option<String>,
    #[serde(rename = "id", skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

impl ConceptRecord {
    fn new(uri: String) -> Self {
        Self {
            uri,
            pref_label: None,
            definition: None,
            alt_label: None,
            identifier: None,
        }
    }

    pub fn get(&self, field: ConceptField) -> Option<&str> {
        match field {
            ConceptField::Uri => Some(self.uri.as_str()),
            ConceptField::Identifier => self.identifier.as_deref(),
            ConceptField::PrefLabel => self.pref_label.as_deref(),
            ConceptField::Definition => self.definition.as_deref(),
            ConceptField::AltLabel => self.alt_label.as_deref(),
        }
    }

    fn set(&mut self, field: ConceptField, value: String) {
        match field {
            ConceptField::Uri => self.uri = value,
            ConceptField::Identifier => self.identifier = Some(value),
            ConceptField::PrefLabel => self.pref_label = Some(value),
            ConceptField::Definition => self.definition = Some(value),
            ConceptField::AltLabel => self.alt_label = Some(value),
        }
    }

    /// Fields that carry a value, in published column order.
    pub fn present_fields(&self) -> impl Iterator<Item = ConceptField> + '_ {
        ConceptField::COLUMN_ORDER
            .into_iter()
            .filter(|f| self.get(*f).is_some())
    }
}

/// Output of one normalization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedVocabulary {
    /// Records in `@graph` order.
    pub records: Vec<ConceptRecord>,
    pub narrower: RelationMap,
    pub broader: RelationMap,
    pub related: RelationMap,
}

impl NormalizedVocabulary {
    pub fn relation(&self, kind: RelationKind) -> &RelationMap {
        match kind {
            RelationKind::Narrower => &self.narrower,
            RelationKind::Broader => &self.broader,
            RelationKind::Related => &self.related,
        }
    }

    fn relation_mut(&mut self, kind: RelationKind) -> &mut RelationMap {
        match kind {
            RelationKind::Narrower => &mut self.narrower,
            RelationKind::Broader => &mut self.broader,
            RelationKind::Related => &mut self.related,
        }
    }

    /// Fields present in any record, in order of first appearance.
    pub fn fields(&self) -> Vec<ConceptField> {
        let mut seen: Vec<ConceptField> = Vec::new();
        for record in &self.records {
            for field in record.present_fields() {
                if !seen.contains(&field) {
                    seen.push(field);
                }
            }
            if seen.len() == ConceptField::ALL.len() {
                break;
            }
        }
        seen
    }

    /// Published column names (`identifier` becomes `id`).
    pub fn columns(&self) -> Vec<&'static str> {
        self.fields().into_iter().map(ConceptField::column_name).collect()
    }
}

/// Turns SKOS JSON-LD documents into [`NormalizedVocabulary`] values.
///
/// Holds no mutable state; one instance can serve any number of documents,
/// from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    aliases: AliasTable,
}

impl Normalizer {
    pub fn new(aliases: AliasTable) -> Self {
        Self { aliases }
    }

    /// Read and normalize a JSON-LD file.
    pub fn normalize_file(&self, path: &Path) -> Result<NormalizedVocabulary> {
        let raw = std::fs::read_to_string(path)?;
        let document: Value = serde_json::from_str(&raw)?;
        self.normalize(&document)
    }

    /// Normalize a parsed JSON-LD document.
    ///
    /// Any malformed concept aborts the whole document.
    pub fn normalize(&self, document: &Value) -> Result<NormalizedVocabulary> {
        let graph = document
            .get("@graph")
            .and_then(Value::as_array)
            .ok_or(Error::MissingGraph)?;

        let mut vocab = NormalizedVocabulary::default();
        let mut skipped = 0usize;

        for (index, node) in graph.iter().enumerate() {
            let node = match node.as_object() {
                Some(obj) if is_concept(obj) => obj,
                _ => {
                    skipped += 1;
                    continue;
                }
            };

            let uri = node
                .get("@id")
                .and_then(Value::as_str)
                .filter(|id| !id.is_empty())
                .ok_or(Error::MissingNodeIdentifier { index })?;

            vocab.records.push(self.extract_record(node, uri)?);

            for kind in RelationKind::ALL {
                // Entry exists even when the node carries no such relation.
                vocab.relation_mut(kind).insert(uri.to_string(), Vec::new());
                let targets = extract_relation(node, uri, kind)?;
                vocab.relation_mut(kind).insert(uri.to_string(), targets);
            }
        }

        debug!(
            "Normalized {} concepts ({} non-concept nodes skipped)",
            vocab.records.len(),
            skipped
        );

        Ok(vocab)
    }

    fn extract_record(&self, node: &Map<String, Value>, uri: &str) -> Result<ConceptRecord> {
        let mut record = ConceptRecord::new(uri.to_string());

        for field in ConceptField::ALL {
            // The record's uri is the node's own @id, whatever the alias table says.
            if field == ConceptField::Uri {
                continue;
            }
            let Some(value) = self.aliases.resolve(node, field.canonical_key()) else {
                continue;
            };
            if let Some(scalar) = collapse_scalar(value, uri, field)? {
                record.set(field, scalar);
            }
        }

        Ok(record)
    }
}

fn is_concept(node: &Map<String, Value>) -> bool {
    TYPE_KEYS
        .iter()
        .find_map(|key| node.get(*key))
        .and_then(Value::as_str)
        == Some(CONCEPT_TYPE)
}

/// Reduce a field value to one string: `{"@value": ..}` yields its payload,
/// a sequence yields its first element. `null` counts as absent.
fn collapse_scalar(value: &Value, uri: &str, field: ConceptField) -> Result<Option<String>> {
    let malformed = |reason: &str| Error::MalformedLiteral {
        uri: uri.to_string(),
        field: field.canonical_key().to_string(),
        reason: reason.to_string(),
    };

    let value = match value {
        Value::Array(items) => items
            .first()
            .ok_or_else(|| malformed("empty sequence"))?,
        other => other,
    };

    let value = match value {
        Value::Object(obj) => obj
            .get("@value")
            .ok_or_else(|| malformed("object without @value"))?,
        other => other,
    };

    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Array(_) => Err(malformed("nested sequence")),
        Value::Object(_) => Err(malformed("nested object")),
    }
}

fn extract_relation(node: &Map<String, Value>, uri: &str, kind: RelationKind) -> Result<Vec<String>> {
    let Some(value) = kind.keys().iter().find_map(|key| node.get(*key)) else {
        return Ok(Vec::new());
    };

    RelationValue::classify(value)
        .map(RelationValue::into_targets)
        .map_err(|shape| Error::MalformedRelationShape {
            uri: uri.to_string(),
            relation: kind.name().to_string(),
            found: shape.0.to_string(),
        })
}
