//! Durable crawl progress
//!
//! One record per entity, pending until its output has been written. The
//! record set lives in a CSV file so an interrupted crawl resumes from the
//! first pending entity on the next run.

mod record;
mod store;
mod traits;

pub use record::{CrawlRecord, HEADERS};
pub use store::CsvProgressStore;
pub use traits::{MarkOutcome, ProgressError, ProgressResult, ProgressStatistics, ProgressStore};
