//! refvocab SKOS: normalizes SKOS-flavored JSON-LD collections into flat
//! concept records and narrower/broader/related relation graphs.
//!
//! Field spellings differ between NVS collections (`prefLabel` vs
//! `skos:prefLabel`, `dc:identifier` vs `dce:identifier`); an [`AliasTable`]
//! maps each logical field to the spellings worth trying.

pub mod alias;
pub mod fields;
pub mod normalize;
pub mod relations;

pub use alias::AliasTable;
pub use fields::ConceptField;
pub use normalize::{ConceptRecord, NormalizedVocabulary, Normalizer, CONCEPT_TYPE};
pub use relations::{RelationKind, RelationMap, RelationValue};
