//! Crawling: page fetching, the entity list and the harvest loop
//!
//! - `HttpFetcher`: HTTP transport with retry and a politeness delay
//! - `EntityCatalog`: the listing page's entities, cached as JSON
//! - `Harvester`: sequential fetch, extract, render, mark-completed loop

mod catalog;
mod coordinator;
mod fetcher;

pub use catalog::EntityCatalog;
pub use coordinator::{Harvester, RunSummary};
pub use fetcher::{backoff_delay, build_http_client, FetchError, HttpFetcher, PageSource};
