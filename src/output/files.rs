use crate::config::{OutputConfig, SiteConfig};
use crate::model::{EntityDescriptor, EntityDetail};
use crate::output::json::format_entity_json;
use crate::output::markdown::{format_entity_markdown, format_index_markdown};
use crate::output::{file_stem, OutputError, OutputHandler, OutputResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes one Markdown and one JSON file per entity, plus the index
#[derive(Debug, Clone)]
pub struct FileOutputHandler {
    classes_dir: PathBuf,
    json_dir: PathBuf,
    index_path: PathBuf,
    base_url: Option<String>,
}

impl FileOutputHandler {
    pub fn new(classes_dir: PathBuf, json_dir: PathBuf, index_path: PathBuf) -> Self {
        Self {
            classes_dir,
            json_dir,
            index_path,
            base_url: None,
        }
    }

    pub fn from_config(output: &OutputConfig, site: &SiteConfig) -> Self {
        Self::new(
            output.classes_dir.clone(),
            output.json_dir.clone(),
            output.index_path(),
        )
        .with_base_url(&site.base_url)
    }

    /// Sets the site base used to build document URLs
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(base_url.to_string());
        self
    }

    pub fn markdown_path(&self, full_name: &str) -> PathBuf {
        self.classes_dir.join(format!("{}.md", file_stem(full_name)))
    }

    pub fn json_path(&self, full_name: &str) -> PathBuf {
        self.json_dir.join(format!("{}.json", file_stem(full_name)))
    }

    pub fn index_path(&self) -> &Path {
        &self.index_path
    }

    fn document_url(&self, descriptor: &EntityDescriptor) -> Option<String> {
        self.base_url
            .as_ref()
            .map(|base| format!("{}{}", base, descriptor.locator))
    }

    /// Link prefix from the index file to the Markdown directory
    fn classes_link(&self) -> String {
        let index_dir = self.index_path.parent().unwrap_or(Path::new(""));
        let relative = self
            .classes_dir
            .strip_prefix(index_dir)
            .unwrap_or(&self.classes_dir);
        relative.to_string_lossy().replace('\\', "/")
    }
}

impl OutputHandler for FileOutputHandler {
    fn write_entity(&self, detail: &EntityDetail) -> OutputResult<()> {
        let full_name = &detail.descriptor.full_name;
        let document_url = self.document_url(&detail.descriptor);

        let markdown = format_entity_markdown(detail, document_url.as_deref());
        let markdown_path = self.markdown_path(full_name);
        write_file(&markdown_path, &markdown)?;

        let json = format_entity_json(detail, document_url.as_deref())?;
        let json_path = self.json_path(full_name);
        write_file(&json_path, &json)?;

        tracing::debug!(
            "Wrote {} and {}",
            markdown_path.display(),
            json_path.display()
        );
        Ok(())
    }

    fn write_index(&self, entities: &[EntityDescriptor]) -> OutputResult<()> {
        let markdown = format_index_markdown(entities, &self.classes_link());
        write_file(&self.index_path, &markdown)?;
        tracing::info!("Index written to {}", self.index_path.display());
        Ok(())
    }
}

fn write_file(path: &Path, content: &str) -> OutputResult<()> {
    let io_error = |source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
    }
    fs::write(path, content).map_err(io_error)
}
