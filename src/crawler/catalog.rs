use crate::crawler::{FetchError, PageSource};
use crate::extract::parse_listing;
use crate::locator::LocatorScheme;
use crate::model::EntityDescriptor;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// The site's entity list, cached as JSON between runs
#[derive(Debug, Clone)]
pub struct EntityCatalog {
    cache_path: PathBuf,
    listing_page: String,
    scheme: LocatorScheme,
}

impl EntityCatalog {
    pub fn new(cache_path: PathBuf, listing_page: String, scheme: LocatorScheme) -> Self {
        Self {
            cache_path,
            listing_page,
            scheme,
        }
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    pub fn scheme(&self) -> &LocatorScheme {
        &self.scheme
    }

    /// Returns the entity list
    ///
    /// A readable cache is used unless `force` is set. Otherwise the listing
    /// page is fetched and parsed, and the cache rewritten. Cache problems
    /// are logged, never returned.
    pub async fn load<S: PageSource>(
        &self,
        source: &S,
        force: bool,
    ) -> Result<Vec<EntityDescriptor>, FetchError> {
        if !force {
            if let Some(entities) = self.read_cache() {
                tracing::info!(
                    "Loaded {} entities from cache {}",
                    entities.len(),
                    self.cache_path.display()
                );
                return Ok(entities);
            }
        }

        tracing::info!("Fetching entity list from {}", self.listing_page);
        let html = source.fetch(&self.listing_page).await?;
        let entities = parse_listing(&html, &self.scheme);

        match self.write_cache(&entities) {
            Ok(()) => tracing::info!("Saved entity list to {}", self.cache_path.display()),
            Err(e) => tracing::warn!(
                "Failed to write entity cache {}: {}",
                self.cache_path.display(),
                e
            ),
        }

        Ok(entities)
    }

    fn read_cache(&self) -> Option<Vec<EntityDescriptor>> {
        let content = match fs::read_to_string(&self.cache_path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("Cannot read entity cache {}: {}", self.cache_path.display(), e);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(entities) => Some(entities),
            Err(e) => {
                tracing::warn!(
                    "Ignoring unreadable entity cache {}: {}",
                    self.cache_path.display(),
                    e
                );
                None
            }
        }
    }

    fn write_cache(&self, entities: &[EntityDescriptor]) -> io::Result<()> {
        if let Some(parent) = self.cache_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(entities)?;
        let temp_path = self.cache_path.with_extension("json.tmp");
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, &self.cache_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EntityKind;
    use std::cell::Cell;
    use tempfile::TempDir;

    const LISTING: &str = r#"<div class="directory"><table>
        <tr><td class="entry"><a class="el" href="class_sharp_kmy_audio_1_1_sound.html">Sound</a></td><td class="desc">Plays a sound</td></tr>
        <tr><td class="entry"><a class="el" href="enum_yukar_1_1_mode.html">Mode</a></td><td class="desc"></td></tr>
        </table></div>"#;

    struct StaticSource {
        calls: Cell<usize>,
    }

    impl PageSource for StaticSource {
        async fn fetch(&self, locator: &str) -> Result<String, FetchError> {
            assert_eq!(locator, "annotated.html");
            self.calls.set(self.calls.get() + 1);
            Ok(LISTING.to_string())
        }
    }

    fn catalog(dir: &TempDir) -> EntityCatalog {
        EntityCatalog::new(
            dir.path().join("cache/class_list.json"),
            "annotated.html".to_string(),
            LocatorScheme::default(),
        )
    }

    #[tokio::test]
    async fn test_fetches_then_uses_cache() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog(&dir);
        let source = StaticSource { calls: Cell::new(0) };

        let first = catalog.load(&source, false).await.unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first[1].kind, EntityKind::Enum);
        assert!(catalog.cache_path().exists());

        let second = catalog.load(&source, false).await.unwrap();
        assert_eq!(second, first);
        assert_eq!(source.calls.get(), 1);
    }

    #[tokio::test]
    async fn test_force_bypasses_cache() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog(&dir);
        let source = StaticSource { calls: Cell::new(0) };

        catalog.load(&source, false).await.unwrap();
        catalog.load(&source, true).await.unwrap();
        assert_eq!(source.calls.get(), 2);
    }

    #[tokio::test]
    async fn test_unreadable_cache_is_refetched() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog(&dir);
        fs::create_dir_all(catalog.cache_path().parent().unwrap()).unwrap();
        fs::write(catalog.cache_path(), "{ not json").unwrap();
        let source = StaticSource { calls: Cell::new(0) };

        let entities = catalog.load(&source, false).await.unwrap();
        assert_eq!(entities[0].full_name, "SharpKmyAudio.Sound");
        assert_eq!(source.calls.get(), 1);
    }
}
