//! refvocab export: writes the published artifacts.
//!
//! Concept tables and EDMO codes as CSV, relation graphs as JSON objects of
//! arrays, and a `manifest.json` mapping each artifact to its published URL
//! and MD5 digest.

pub mod edmo;
pub mod manifest;
pub mod relations;
pub mod table;

pub use edmo::{load_edmo_codes, parse_edmo_codes, write_edmo_csv, EdmoCode};
pub use manifest::{file_md5, Artifact, Manifest, ManifestEntry};
pub use relations::write_relation_files;
pub use table::ConceptTable;
