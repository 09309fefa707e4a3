//! Doxygen-Harvest: structured API reference extraction from Doxygen sites
//!
//! This crate walks a Doxygen-generated documentation site, recovers each
//! documented type's qualified name from its page locator, extracts its
//! members and inheritance, and renders Markdown and JSON output. Progress
//! is tracked durably so an interrupted harvest resumes where it stopped.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod locator;
pub mod model;
pub mod output;
pub mod progress;
pub mod signature;

use thiserror::Error;

/// Main error type for harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] crawler::FetchError),

    #[error("Progress error: {0}")]
    Progress(#[from] progress::ProgressError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("No entity named {0}")]
    EntityNotFound(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use extract::{parse_listing, MemberExtractor};
pub use locator::{decode_locator, LocatorScheme};
pub use model::{EntityDescriptor, EntityDetail, EntityKind, Member, MemberKind, Scope};
pub use progress::{CsvProgressStore, ProgressStore};
pub use signature::{format_parameter, format_signature};

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_store_errors_convert_into_harvest_error() {
        let corrupt = progress::ProgressError::Corrupt {
            path: PathBuf::from("output/progress.csv"),
            message: "bad completed value".to_string(),
        };
        let error: HarvestError = corrupt.into();

        assert!(matches!(error, HarvestError::Progress(_)));
        assert!(error.to_string().starts_with("Progress error:"));
    }

    #[test]
    fn test_entity_not_found_message() {
        let error = HarvestError::EntityNotFound("Yukar.Missing".to_string());
        assert_eq!(error.to_string(), "No entity named Yukar.Missing");
    }
}
