//! SKOS relation kinds, relation value shapes, and ordered relation maps.

use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// The three semantic relations published per vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    Narrower,
    Broader,
    Related,
}

impl RelationKind {
    pub const ALL: [RelationKind; 3] = [
        RelationKind::Narrower,
        RelationKind::Broader,
        RelationKind::Related,
    ];

    /// Name used in file names and manifest keys.
    pub fn name(self) -> &'static str {
        match self {
            Self::Narrower => "narrower",
            Self::Broader => "broader",
            Self::Related => "related",
        }
    }

    /// Keys checked on a node, namespaced spelling first.
    pub fn keys(self) -> [&'static str; 2] {
        match self {
            Self::Narrower => ["skos:narrower", "narrower"],
            Self::Broader => ["skos:broader", "broader"],
            Self::Related => ["skos:related", "related"],
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Description of a JSON value that is not a valid relation shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnexpectedShape(pub &'static str);

/// Element of a relation sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationItem<'a> {
    /// `{"@id": "..."}`
    Reference(&'a str),
    /// `"..."`
    Bare(&'a str),
}

impl<'a> RelationItem<'a> {
    fn classify(value: &'a Value) -> Result<Self, UnexpectedShape> {
        match value {
            Value::Object(obj) => reference_id(obj)
                .map(Self::Reference)
                .ok_or(UnexpectedShape("sequence element without @id")),
            Value::String(s) => Ok(Self::Bare(s)),
            Value::Array(_) => Err(UnexpectedShape("nested sequence")),
            Value::Number(_) => Err(UnexpectedShape("number in sequence")),
            Value::Bool(_) => Err(UnexpectedShape("boolean in sequence")),
            Value::Null => Err(UnexpectedShape("null in sequence")),
        }
    }

    fn target(self) -> &'a str {
        match self {
            Self::Reference(id) | Self::Bare(id) => id,
        }
    }
}

/// The shapes a relation value may take in NVS JSON-LD.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationValue<'a> {
    /// A single `{"@id": "..."}` object.
    SingleReference(&'a str),
    /// An array of references and/or bare strings, possibly mixed.
    Sequence(Vec<RelationItem<'a>>),
    /// A bare URI string.
    BareString(&'a str),
}

impl<'a> RelationValue<'a> {
    /// Classify a raw value. Anything outside the three shapes is rejected.
    pub fn classify(value: &'a Value) -> Result<Self, UnexpectedShape> {
        match value {
            Value::Object(obj) => reference_id(obj)
                .map(Self::SingleReference)
                .ok_or(UnexpectedShape("object without @id")),
            Value::Array(items) => items
                .iter()
                .map(RelationItem::classify)
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Sequence),
            Value::String(s) => Ok(Self::BareString(s)),
            Value::Number(_) => Err(UnexpectedShape("number")),
            Value::Bool(_) => Err(UnexpectedShape("boolean")),
            Value::Null => Err(UnexpectedShape("null")),
        }
    }

    /// Target URIs in source order.
    pub fn into_targets(self) -> Vec<String> {
        match self {
            Self::SingleReference(id) | Self::BareString(id) => vec![id.to_string()],
            Self::Sequence(items) => items.into_iter().map(|i| i.target().to_string()).collect(),
        }
    }
}

fn reference_id(obj: &Map<String, Value>) -> Option<&str> {
    obj.get("@id").and_then(Value::as_str)
}

/// Concept URI → related URIs, keeping first-insertion key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationMap {
    entries: Vec<(String, Vec<String>)>,
    index: HashMap<String, usize>,
}

impl RelationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. A replaced key keeps its original position.
    pub fn insert(&mut self, uri: String, targets: Vec<String>) {
        match self.index.get(&uri) {
            Some(&pos) => self.entries[pos].1 = targets,
            None => {
                self.index.insert(uri.clone(), self.entries.len());
                self.entries.push((uri, targets));
            }
        }
    }

    pub fn get(&self, uri: &str) -> Option<&[String]> {
        self.index
            .get(uri)
            .map(|&pos| self.entries[pos].1.as_slice())
    }

    pub fn contains_key(&self, uri: &str) -> bool {
        self.index.contains_key(uri)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Total number of edges across all keys.
    pub fn edge_count(&self) -> usize {
        self.entries.iter().map(|(_, v)| v.len()).sum()
    }
}

impl Serialize for RelationMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (uri, targets) in &self.entries {
            map.serialize_entry(uri, targets)?;
        }
        map.end()
    }
}

struct RelationMapVisitor;

impl<'de> Visitor<'de> for RelationMapVisitor {
    type Value = RelationMap;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping URIs to arrays of URIs")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<RelationMap, A::Error> {
        let mut map = RelationMap::new();
        while let Some((uri, targets)) = access.next_entry::<String, Vec<String>>()? {
            map.insert(uri, targets);
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for RelationMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RelationMapVisitor)
    }
}
