//! refvocab fetch: downloads raw upstream documents.
//!
//! Downloads run with bounded concurrency and come back in submission
//! order. Files already present are reused unless a forced refresh is
//! requested. There is no retry: the first failure aborts the batch.

pub mod download;
pub mod types;

pub use download::Downloader;
pub use types::*;
