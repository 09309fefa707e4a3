use crate::model::EntityDescriptor;
use crate::progress::record::HEADERS;
use crate::progress::{
    CrawlRecord, MarkOutcome, ProgressError, ProgressResult, ProgressStatistics, ProgressStore,
};
use chrono::Utc;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Progress store backed by a single CSV file
///
/// Every call reads the whole file; every mutation rewrites it through a
/// sibling temp file that is renamed over the original. Assumes one writer.
#[derive(Debug, Clone)]
pub struct CsvProgressStore {
    path: PathBuf,
}

impl CsvProgressStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> ProgressResult<Vec<CrawlRecord>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ProgressError::Io(e)),
        };

        let mut reader = csv::Reader::from_reader(file);
        let mut records = Vec::new();

        for row in reader.deserialize::<CrawlRecord>() {
            let record = row.map_err(|e| self.corrupt(e.to_string()))?;
            records.push(record);
        }

        Ok(records)
    }

    fn save(&self, records: &[CrawlRecord]) -> ProgressResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = self.path.with_extension("csv.tmp");

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&temp_path)?;
        writer.write_record(HEADERS)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        drop(writer);

        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }

    fn corrupt(&self, message: String) -> ProgressError {
        ProgressError::Corrupt {
            path: self.path.clone(),
            message,
        }
    }
}

impl ProgressStore for CsvProgressStore {
    fn initialize(&mut self, entities: &[EntityDescriptor]) -> ProgressResult<()> {
        let mut seen = HashSet::new();
        let mut records = Vec::with_capacity(entities.len());

        for entity in entities {
            if !seen.insert(entity.full_name.as_str()) {
                tracing::warn!("Duplicate entity {} ignored", entity.full_name);
                continue;
            }
            records.push(CrawlRecord::pending(entity));
        }

        self.save(&records)?;
        tracing::info!(
            "Initialized progress for {} entities at {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }

    fn list_pending(&self, limit: Option<usize>) -> ProgressResult<Vec<CrawlRecord>> {
        let pending = self
            .load()?
            .into_iter()
            .filter(|record| !record.completed)
            .take(limit.unwrap_or(usize::MAX))
            .collect();
        Ok(pending)
    }

    fn mark_completed(&mut self, full_name: &str) -> ProgressResult<MarkOutcome> {
        let mut records = self.load()?;

        let Some(record) = records.iter_mut().find(|r| r.full_name == full_name) else {
            tracing::warn!("No progress record for {}", full_name);
            return Ok(MarkOutcome::NotFound);
        };

        if record.completed {
            tracing::debug!("{} already completed", full_name);
            return Ok(MarkOutcome::AlreadyCompleted);
        }

        record.completed = true;
        record.last_updated = Some(Utc::now());

        self.save(&records)?;
        Ok(MarkOutcome::Completed)
    }

    fn statistics(&self) -> ProgressResult<ProgressStatistics> {
        Ok(ProgressStatistics::from_records(&self.load()?))
    }

    fn records(&self) -> ProgressResult<Vec<CrawlRecord>> {
        self.load()
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }
}
