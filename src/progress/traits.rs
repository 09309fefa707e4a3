//! Progress store trait and error types

use crate::model::EntityDescriptor;
use crate::progress::CrawlRecord;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing crawl progress
#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The progress file exists but cannot be interpreted
    #[error("Corrupt progress file {path}: {message}")]
    Corrupt { path: PathBuf, message: String },
}

/// Result type for progress operations
pub type ProgressResult<T> = Result<T, ProgressError>;

/// Result of a `mark_completed` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkOutcome {
    /// The record moved from pending to completed
    Completed,

    /// The record was already completed; nothing changed
    AlreadyCompleted,

    /// No record has this full name; nothing changed
    NotFound,
}

/// Completion counts for a record set
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressStatistics {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Completed share in percent; 0 when there are no records
    pub percentage: f64,
}

impl ProgressStatistics {
    pub fn from_records(records: &[CrawlRecord]) -> Self {
        let total = records.len();
        let completed = records.iter().filter(|r| r.completed).count();
        let percentage = if total == 0 {
            0.0
        } else {
            completed as f64 / total as f64 * 100.0
        };

        Self {
            total,
            completed,
            pending: total - completed,
            percentage,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.pending == 0
    }
}

impl fmt::Display for ProgressStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} completed ({:.1}%), {} pending",
            self.completed, self.total, self.percentage, self.pending
        )
    }
}

/// Durable per-entity completion tracking
///
/// Records keep the order in which `initialize` received them. A record
/// only ever moves from pending to completed.
pub trait ProgressStore {
    /// Replaces every existing record with one pending record per entity
    fn initialize(&mut self, entities: &[EntityDescriptor]) -> ProgressResult<()>;

    /// Returns pending records in insertion order, at most `limit` of them
    fn list_pending(&self, limit: Option<usize>) -> ProgressResult<Vec<CrawlRecord>>;

    /// Marks the record with this full name as completed
    fn mark_completed(&mut self, full_name: &str) -> ProgressResult<MarkOutcome>;

    fn statistics(&self) -> ProgressResult<ProgressStatistics>;

    /// Returns all records in insertion order
    fn records(&self) -> ProgressResult<Vec<CrawlRecord>>;

    /// Whether durable progress exists yet
    fn exists(&self) -> bool;
}
