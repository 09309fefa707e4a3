//! Output handler trait and error types

use crate::model::{EntityDescriptor, EntityDetail};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Receives extraction results
///
/// `write_entity` is called once per harvested entity; `write_index` once
/// the whole entity list is complete.
pub trait OutputHandler {
    fn write_entity(&self, detail: &EntityDetail) -> OutputResult<()>;

    fn write_index(&self, entities: &[EntityDescriptor]) -> OutputResult<()>;
}
