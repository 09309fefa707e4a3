//! Harvest coordinator - the per-entity processing loop
//!
//! Entities are processed strictly one at a time in progress-store order:
//! fetch, extract, render, then mark completed. A failure on one entity is
//! logged and counted and the loop moves on; the entity stays pending for
//! the next run. Progress-store failures abort the run.

use crate::crawler::PageSource;
use crate::extract::MemberExtractor;
use crate::model::{EntityDescriptor, EntityDetail};
use crate::output::OutputHandler;
use crate::progress::{ProgressStatistics, ProgressStore};
use crate::HarvestError;
use std::future::Future;

/// Outcome of one harvest session
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Entities harvested and marked completed
    pub processed: usize,

    /// Entities that failed and stay pending
    pub failed: usize,

    /// Whether the session was cut short by a shutdown signal
    pub interrupted: bool,

    /// Whether the index was (re)generated
    pub index_written: bool,

    /// Store statistics at the end of the session
    pub statistics: ProgressStatistics,
}

/// Drives extraction of every pending entity
pub struct Harvester<S, P, O> {
    source: S,
    store: P,
    output: O,
    extractor: MemberExtractor,
}

impl<S, P, O> Harvester<S, P, O>
where
    S: PageSource,
    P: ProgressStore,
    O: OutputHandler,
{
    pub fn new(source: S, store: P, output: O) -> Self {
        Self {
            source,
            store,
            output,
            extractor: MemberExtractor::default(),
        }
    }

    pub fn with_extractor(mut self, extractor: MemberExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    /// Seeds the progress store unless it already exists
    ///
    /// With `fresh`, existing progress is discarded. Returns whether the
    /// store was (re)initialized.
    pub fn prepare(
        &mut self,
        entities: &[EntityDescriptor],
        fresh: bool,
    ) -> Result<bool, HarvestError> {
        if self.store.exists() && !fresh {
            return Ok(false);
        }

        self.store.initialize(entities)?;
        Ok(true)
    }

    /// Fetches, extracts and renders one entity without touching progress
    pub async fn harvest_one(
        &self,
        descriptor: &EntityDescriptor,
    ) -> Result<EntityDetail, HarvestError> {
        let html = self.source.fetch(&descriptor.locator).await?;
        let detail = self.extractor.extract_html(&html, descriptor);
        self.output.write_entity(&detail)?;

        tracing::debug!(
            "Harvested {} ({} members, {} base types)",
            descriptor.full_name,
            detail.member_count(),
            detail.base_types.len()
        );
        Ok(detail)
    }

    /// Processes pending entities until done or Ctrl-C
    pub async fn run(&mut self, limit: Option<usize>) -> Result<RunSummary, HarvestError> {
        self.run_until(limit, ctrl_c()).await
    }

    /// Processes up to `limit` pending entities, stopping early when
    /// `shutdown` completes
    ///
    /// An entity in flight when `shutdown` fires is abandoned and stays
    /// pending. Once nothing is pending the index is written.
    pub async fn run_until<F>(
        &mut self,
        limit: Option<usize>,
        shutdown: F,
    ) -> Result<RunSummary, HarvestError>
    where
        F: Future<Output = ()>,
    {
        let start = self.store.statistics()?;
        tracing::info!(
            "Progress: {}/{} completed ({:.1}%)",
            start.completed,
            start.total,
            start.percentage
        );

        let pending = self.store.list_pending(limit)?;
        if !pending.is_empty() {
            tracing::info!("Starting to harvest {} entities", pending.len());
        }

        tokio::pin!(shutdown);

        let mut processed = 0;
        let mut failed = 0;
        let mut interrupted = false;

        for (position, record) in pending.iter().enumerate() {
            let descriptor = record.to_descriptor();

            let outcome = tokio::select! {
                biased;
                _ = &mut shutdown => None,
                result = self.harvest_one(&descriptor) => Some(result),
            };

            let Some(result) = outcome else {
                tracing::warn!("Interrupted; {} stays pending", descriptor.full_name);
                interrupted = true;
                break;
            };

            match result {
                Ok(_) => {
                    self.store.mark_completed(&descriptor.full_name)?;
                    processed += 1;
                    tracing::info!(
                        "[{}/{}] {}",
                        position + 1,
                        pending.len(),
                        descriptor.full_name
                    );
                }
                Err(e) => {
                    tracing::error!("Failed to harvest {}: {}", descriptor.full_name, e);
                    failed += 1;
                }
            }
        }

        let statistics = self.store.statistics()?;
        let mut index_written = false;

        if !interrupted && statistics.is_finished() {
            tracing::info!("All entities completed, generating index");
            self.write_index()?;
            index_written = true;
        }

        Ok(RunSummary {
            processed,
            failed,
            interrupted,
            index_written,
            statistics,
        })
    }

    /// Writes the index of every entity known to the progress store
    pub fn write_index(&self) -> Result<(), HarvestError> {
        let entities: Vec<EntityDescriptor> = self
            .store
            .records()?
            .iter()
            .map(|record| record.to_descriptor())
            .collect();

        self.output.write_index(&entities)?;
        Ok(())
    }
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::FetchError;
    use crate::model::EntityKind;
    use crate::output::OutputResult;
    use crate::progress::CsvProgressStore;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use tempfile::TempDir;

    struct MapSource {
        pages: HashMap<String, String>,
    }

    impl PageSource for MapSource {
        async fn fetch(&self, locator: &str) -> Result<String, FetchError> {
            self.pages
                .get(locator)
                .cloned()
                .ok_or_else(|| FetchError::Status {
                    url: locator.to_string(),
                    status: 404,
                })
        }
    }

    #[derive(Default)]
    struct RecordingOutput {
        entities: RefCell<Vec<String>>,
        index: RefCell<Option<usize>>,
    }

    impl OutputHandler for RecordingOutput {
        fn write_entity(&self, detail: &EntityDetail) -> OutputResult<()> {
            self.entities
                .borrow_mut()
                .push(detail.descriptor.full_name.clone());
            Ok(())
        }

        fn write_index(&self, entities: &[EntityDescriptor]) -> OutputResult<()> {
            *self.index.borrow_mut() = Some(entities.len());
            Ok(())
        }
    }

    fn entity(name: &str) -> EntityDescriptor {
        EntityDescriptor {
            name: name.to_string(),
            full_name: format!("Test.{name}"),
            namespace: "Test".to_string(),
            kind: EntityKind::Class,
            locator: format!("class_test_1_1_{}.html", name.to_lowercase()),
            summary: String::new(),
        }
    }

    fn page(method: &str) -> String {
        format!(
            r##"<table class="memberdecls">
            <tr class="heading"><td colspan="2"><h2><a id="pub-methods"></a>Methods</h2></td></tr>
            <tr class="memitem:m1"><td class="memItemLeft">void</td><td class="memItemRight"><a href="#m1">{method}</a> ()</td></tr>
            </table>"##
        )
    }

    fn harvester(
        dir: &TempDir,
        served: &[&str],
    ) -> Harvester<MapSource, CsvProgressStore, RecordingOutput> {
        let pages = served
            .iter()
            .map(|name| (entity(name).locator, page("run")))
            .collect();
        Harvester::new(
            MapSource { pages },
            CsvProgressStore::new(dir.path().join("progress.csv")),
            RecordingOutput::default(),
        )
    }

    #[tokio::test]
    async fn test_failures_are_isolated() {
        let dir = TempDir::new().unwrap();
        let mut harvester = harvester(&dir, &["Alpha", "Gamma"]);
        let entities = vec![entity("Alpha"), entity("Beta"), entity("Gamma")];
        assert!(harvester.prepare(&entities, false).unwrap());

        let summary = harvester.run_until(None, std::future::pending()).await.unwrap();

        assert_eq!(summary.processed, 2);
        assert_eq!(summary.failed, 1);
        assert!(!summary.interrupted);
        assert!(!summary.index_written);
        assert_eq!(summary.statistics.pending, 1);

        let pending = harvester.store().list_pending(None).unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].full_name, "Test.Beta");
        assert_eq!(
            *harvester.output().entities.borrow(),
            vec!["Test.Alpha", "Test.Gamma"]
        );
    }

    #[tokio::test]
    async fn test_limit_and_index() {
        let dir = TempDir::new().unwrap();
        let mut harvester = harvester(&dir, &["Alpha", "Beta"]);
        harvester
            .prepare(&[entity("Alpha"), entity("Beta")], false)
            .unwrap();

        let first = harvester.run_until(Some(1), std::future::pending()).await.unwrap();
        assert_eq!(first.processed, 1);
        assert!(!first.index_written);
        assert_eq!(*harvester.output().index.borrow(), None);

        let second = harvester.run_until(None, std::future::pending()).await.unwrap();
        assert_eq!(second.processed, 1);
        assert!(second.index_written);
        assert_eq!(second.statistics.percentage, 100.0);
        assert_eq!(*harvester.output().index.borrow(), Some(2));
    }

    #[tokio::test]
    async fn test_shutdown_leaves_entities_pending() {
        let dir = TempDir::new().unwrap();
        let mut harvester = harvester(&dir, &["Alpha", "Beta"]);
        harvester
            .prepare(&[entity("Alpha"), entity("Beta")], false)
            .unwrap();

        let summary = harvester.run_until(None, async {}).await.unwrap();

        assert!(summary.interrupted);
        assert_eq!(summary.processed, 0);
        assert!(!summary.index_written);
        assert_eq!(harvester.store().list_pending(None).unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_prepare_keeps_existing_progress() {
        let dir = TempDir::new().unwrap();
        let mut harvester = harvester(&dir, &["Alpha"]);
        harvester.prepare(&[entity("Alpha")], false).unwrap();
        harvester.run_until(None, std::future::pending()).await.unwrap();

        assert!(!harvester.prepare(&[entity("Alpha")], false).unwrap());
        assert_eq!(harvester.store().statistics().unwrap().completed, 1);

        assert!(harvester.prepare(&[entity("Alpha")], true).unwrap());
        assert_eq!(harvester.store().statistics().unwrap().completed, 0);
    }

    #[tokio::test]
    async fn test_harvest_one_extracts_members() {
        let dir = TempDir::new().unwrap();
        let harvester = harvester(&dir, &["Alpha"]);

        let detail = harvester.harvest_one(&entity("Alpha")).await.unwrap();
        assert_eq!(detail.methods.len(), 1);
        assert_eq!(detail.methods[0].name, "run");
        assert!(!harvester.store().exists());
    }
}
