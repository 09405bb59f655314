//! Concept field identifiers and their published column names.

use serde::{Deserialize, Serialize};

/// Scalar fields extracted from every concept node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConceptField {
    Uri,
    Identifier,
    PrefLabel,
    Definition,
    AltLabel,
}

impl ConceptField {
    /// All fields in extraction order.
    pub const ALL: [ConceptField; 5] = [
        ConceptField::Uri,
        ConceptField::Identifier,
        ConceptField::PrefLabel,
        ConceptField::Definition,
        ConceptField::AltLabel,
    ];

    /// Per-record column order of the published table; `id` goes last.
    pub const COLUMN_ORDER: [ConceptField; 5] = [
        ConceptField::Uri,
        ConceptField::PrefLabel,
        ConceptField::Definition,
        ConceptField::AltLabel,
        ConceptField::Identifier,
    ];

    /// Logical key used to consult the alias table.
    pub fn canonical_key(self) -> &'static str {
        match self {
            Self::Uri => "uri",
            Self::Identifier => "identifier",
            Self::PrefLabel => "prefLabel",
            Self::Definition => "definition",
            Self::AltLabel => "altLabel",
        }
    }

    /// Column name in the published table.
    pub fn column_name(self) -> &'static str {
        match self {
            Self::Uri => "uri",
            Self::Identifier => "id",
            Self::PrefLabel => "prefLabel",
            Self::Definition => "definition",
            Self::AltLabel => "altLabel",
        }
    }

    /// Map a serialized or legacy field name to its field.
    ///
    /// Only names listed in [`INTERNAL_NAMES`] are recognized; no prefix
    /// stripping happens at runtime.
    pub fn from_internal_name(name: &str) -> Option<Self> {
        INTERNAL_NAMES
            .iter()
            .find(|(internal, _)| *internal == name)
            .map(|(_, field)| *field)
    }
}

/// Every spelling a field has been tracked under, prefixed or not.
pub const INTERNAL_NAMES: &[(&str, ConceptField)] = &[
    ("@id", ConceptField::Uri),
    ("uri", ConceptField::Uri),
    ("dc:identifier", ConceptField::Identifier),
    ("dce:identifier", ConceptField::Identifier),
    ("identifier", ConceptField::Identifier),
    ("id", ConceptField::Identifier),
    ("skos:prefLabel", ConceptField::PrefLabel),
    ("prefLabel", ConceptField::PrefLabel),
    ("skos:definition", ConceptField::Definition),
    ("definition", ConceptField::Definition),
    ("skos:altLabel", ConceptField::AltLabel),
    ("altLabel", ConceptField::AltLabel),
];
