use crate::common::{fast_scraping, site_config, LISTING, SOUND_PAGE, VECTOR_PAGE};
use doxygen_harvest::crawler::{EntityCatalog, Harvester, HttpFetcher};
use doxygen_harvest::locator::LocatorScheme;
use doxygen_harvest::output::FileOutputHandler;
use doxygen_harvest::progress::{CsvProgressStore, ProgressStore};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_page(server: &MockServer, page: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/docs/{page}")))
        .respond_with(ResponseTemplate::new(200).set_body_string(body.to_string()))
        .mount(server)
        .await;
}

fn output_handler(out: &Path, server: &MockServer) -> FileOutputHandler {
    FileOutputHandler::new(out.join("classes"), out.join("json"), out.join("index.md"))
        .with_base_url(&site_config(server).base_url)
}

fn catalog(out: &Path) -> EntityCatalog {
    EntityCatalog::new(
        out.join("class_list.json"),
        "annotated.html".to_string(),
        LocatorScheme::default(),
    )
}

#[tokio::test]
async fn test_full_harvest_with_resume() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("output");

    mount_page(&server, "annotated.html", LISTING).await;
    mount_page(&server, "class_sharp_kmy_audio_1_1_sound.html", SOUND_PAGE).await;
    // Vector3 is not served yet, so its fetch fails with 404

    let fetcher = HttpFetcher::new(&site_config(&server), &fast_scraping()).unwrap();
    let entities = catalog(&out).load(&fetcher, false).await.unwrap();
    assert_eq!(entities.len(), 2);
    assert!(out.join("class_list.json").exists());

    let store = CsvProgressStore::new(out.join("progress.csv"));
    let mut harvester = Harvester::new(fetcher, store, output_handler(&out, &server));
    assert!(harvester.prepare(&entities, false).unwrap());

    let first = harvester.run_until(None, std::future::pending()).await.unwrap();
    assert_eq!(first.processed, 1);
    assert_eq!(first.failed, 1);
    assert!(!first.index_written);
    assert_eq!(first.statistics.percentage, 50.0);
    assert!(!out.join("index.md").exists());

    let sound_md = fs::read_to_string(out.join("classes/SharpKmyAudio.Sound.md")).unwrap();
    assert!(sound_md.contains("# SharpKmyAudio.Sound"));
    assert!(sound_md.contains("Wraps a native sound."));
    assert!(sound_md.contains("bool play (Vector3 position, float* volume)"));
    assert!(sound_md.contains("Starts playback on the given mode."));

    let sound_json: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(out.join("json/SharpKmyAudio.Sound.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(sound_json["entity"]["kind"], "class");
    assert_eq!(sound_json["methods"]["instance"][0]["summary"], "Starts playback.");
    assert_eq!(sound_json["methods"]["static"][0]["name"], "load");
    assert_eq!(sound_json["methods"]["static"][0]["declared_type"], "Sound");
    assert!(sound_json["entity"]["document_url"]
        .as_str()
        .unwrap()
        .ends_with("/docs/class_sharp_kmy_audio_1_1_sound.html"));

    // Second run: only the failed entity is retried
    mount_page(&server, "struct_yukar_1_1_common_1_1_vector3.html", VECTOR_PAGE).await;

    let second = harvester.run_until(None, std::future::pending()).await.unwrap();
    assert_eq!(second.processed, 1);
    assert_eq!(second.failed, 0);
    assert!(second.index_written);
    assert_eq!(second.statistics.completed, 2);

    let vector_json: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(out.join("json/Yukar.Common.Vector3.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(vector_json["fields"][0]["name"], "x");

    let index = fs::read_to_string(out.join("index.md")).unwrap();
    assert!(index.contains("## SharpKmyAudio"));
    assert!(index.contains("## Yukar.Common"));
    assert!(index.contains("[SharpKmyAudio.Sound](classes/SharpKmyAudio.Sound.md) - Plays a sound"));
    assert!(index.contains("### Structs"));
}

#[tokio::test]
async fn test_progress_survives_restart() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("output");

    mount_page(&server, "annotated.html", LISTING).await;
    mount_page(&server, "class_sharp_kmy_audio_1_1_sound.html", SOUND_PAGE).await;
    mount_page(&server, "struct_yukar_1_1_common_1_1_vector3.html", VECTOR_PAGE).await;

    let fetcher = HttpFetcher::new(&site_config(&server), &fast_scraping()).unwrap();
    let entities = catalog(&out).load(&fetcher, false).await.unwrap();

    {
        let store = CsvProgressStore::new(out.join("progress.csv"));
        let mut harvester = Harvester::new(fetcher.clone(), store, output_handler(&out, &server));
        harvester.prepare(&entities, false).unwrap();
        let summary = harvester.run_until(Some(1), std::future::pending()).await.unwrap();
        assert_eq!(summary.processed, 1);
    }

    let store = CsvProgressStore::new(out.join("progress.csv"));
    let pending = store.list_pending(None).unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].full_name, "Yukar.Common.Vector3");

    let mut harvester = Harvester::new(fetcher, store, output_handler(&out, &server));
    assert!(!harvester.prepare(&entities, false).unwrap());
    let summary = harvester.run_until(None, std::future::pending()).await.unwrap();
    assert_eq!(summary.processed, 1);
    assert!(summary.index_written);
}

#[tokio::test]
async fn test_catalog_cache_avoids_refetch() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("output");

    Mock::given(method("GET"))
        .and(path("/docs/annotated.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LISTING))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&site_config(&server), &fast_scraping()).unwrap();
    let first = catalog(&out).load(&fetcher, false).await.unwrap();
    let second = catalog(&out).load(&fetcher, false).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(second[1].summary, "3D vector");
}
