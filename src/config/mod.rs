//! Configuration loading, parsing and validation
//!
//! # Example
//!
//! ```no_run
//! use doxygen_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Listing page: {}", config.site.listing_page);
//! ```

mod parser;
mod types;
mod validation;

pub use types::{Config, LocatorConfig, OutputConfig, ScrapingConfig, SiteConfig};

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
