//! refvocab core: error type, output configuration, resource catalog.

pub mod catalog;
pub mod config;
pub mod error;

pub use catalog::{Resource, ResourceCatalog, ResourceKind};
pub use config::{OutputPaths, RefVocabConfig};
pub use error::{Error, Result};
