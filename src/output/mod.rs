//! Rendering of extraction results
//!
//! - Markdown page and JSON document per entity
//! - Markdown index of every entity
//! - Terminal statistics

mod files;
mod json;
mod markdown;
pub mod stats;
mod traits;

pub use files::FileOutputHandler;
pub use json::{format_entity_json, EntityDocument};
pub use markdown::{format_entity_markdown, format_index_markdown, GLOBAL_NAMESPACE};
pub use stats::{print_statistics, progress_bar};
pub use traits::{OutputError, OutputHandler, OutputResult};

/// File name stem for an entity's output files
///
/// Qualified names are kept as-is apart from characters that cannot appear
/// in a file name.
pub fn file_stem(full_name: &str) -> String {
    full_name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect()
}
