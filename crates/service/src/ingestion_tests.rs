#![expect(clippy::unwrap_used, reason = "test code")]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use catalog_feed_core::{ParseError, RawEntry};
use catalog_feed_source::{CatalogSource, SourceError, SourceFormat, decode_snapshot};
use catalog_feed_storage::Store;
use tempfile::TempDir;
use tokio::sync::Notify;

use crate::{CycleOutcome, CycleReport, IngestionScheduler, IngestionService, ServiceError};

fn raw(id: i64, title: &str) -> RawEntry {
    RawEntry {
        permalink: Some(format!("https://catalog.example.com/threads/game.{id}/")),
        display_title: title.to_owned(),
        creators: vec!["Studio".to_owned()],
        cover: Some(format!("https://img.example.com/{id}.jpg")),
        ..RawEntry::default()
    }
}

fn create_test_store() -> (Store, TempDir) {
    let dir = TempDir::new().unwrap();
    let store = Store::new(&dir.path().join("ingest.db")).unwrap();
    (store, dir)
}

fn completed(outcome: CycleOutcome) -> CycleReport {
    match outcome {
        CycleOutcome::Completed(report) => report,
        CycleOutcome::Skipped => panic!("cycle was skipped"),
    }
}

/// Serves the same snapshot on every fetch.
struct StaticSource {
    entries: Vec<RawEntry>,
    calls: AtomicUsize,
}

impl StaticSource {
    fn new(entries: Vec<RawEntry>) -> Self {
        Self { entries, calls: AtomicUsize::new(0) }
    }
}

#[async_trait]
impl CatalogSource for StaticSource {
    async fn fetch(&self) -> Result<Vec<RawEntry>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.entries.clone())
    }
}

/// Holds the fetch open until released.
struct GatedSource {
    entered: Notify,
    release: Notify,
    entries: Vec<RawEntry>,
}

#[async_trait]
impl CatalogSource for GatedSource {
    async fn fetch(&self) -> Result<Vec<RawEntry>, SourceError> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(self.entries.clone())
    }
}

/// First fetch succeeds, later fetches hang past any timeout.
struct StallingSource {
    entries: Vec<RawEntry>,
    calls: AtomicUsize,
}

#[async_trait]
impl CatalogSource for StallingSource {
    async fn fetch(&self) -> Result<Vec<RawEntry>, SourceError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) > 0 {
            tokio::time::sleep(Duration::from_secs(30)).await;
        }
        Ok(self.entries.clone())
    }
}

/// Fails once with a status error, then serves `entries`.
struct FlakySource {
    entries: Vec<RawEntry>,
    calls: AtomicUsize,
}

#[async_trait]
impl CatalogSource for FlakySource {
    async fn fetch(&self) -> Result<Vec<RawEntry>, SourceError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            return Err(SourceError::Status { code: 502, body: "bad gateway".to_owned() });
        }
        Ok(self.entries.clone())
    }
}

#[tokio::test]
async fn test_malformed_entry_is_isolated() {
    let (store, _dir) = create_test_store();
    let entries = vec![
        raw(1, "One [1.0]"),
        raw(2, "Two [2.0]"),
        raw(3, "Three without a version"),
        raw(4, "Four [4.0]"),
    ];
    let service =
        IngestionService::new(Arc::new(StaticSource::new(entries)), store.clone(), Duration::from_secs(5));

    let report = completed(service.ingestion_cycle().await.unwrap());
    assert_eq!(report.fetched, 4);
    assert_eq!(report.committed(), 3);
    assert_eq!(report.parse_failures.len(), 1);
    assert_eq!(report.parse_failures[0].index, 2);
    assert!(matches!(report.parse_failures[0].error, ParseError::TitleShape(_)));
    assert!(report.store_failures.is_empty());

    assert_eq!(store.game_count().unwrap(), 3);
    assert!(store.get_game_by_id(4).unwrap().is_some(), "cycle must not stop at the bad entry");
    assert!(store.get_game_by_id(3).unwrap().is_none());
}

#[tokio::test]
async fn test_wrong_typed_json_entries_are_isolated() {
    let (store, _dir) = create_test_store();
    let body = serde_json::json!({
        "msg": {
            "data": [
                { "thread_id": 1, "title": "One", "version": "1.0", "creator": "A" },
                { "thread_id": "oops", "title": "Two", "version": "2.0", "creator": "B" },
                { "thread_id": 3, "title": "Three", "version": "3.0", "creator": "C", "tags": null },
                { "thread_id": 4, "title": "Four", "version": "4.0", "creator": "D", "tags": [7] }
            ]
        }
    });
    let entries = decode_snapshot(body.to_string().as_bytes(), SourceFormat::Json).unwrap();
    let service =
        IngestionService::new(Arc::new(StaticSource::new(entries)), store.clone(), Duration::from_secs(5));

    let report = completed(service.ingestion_cycle().await.unwrap());
    assert_eq!(report.fetched, 4);
    assert_eq!(report.committed(), 2);
    let failed: Vec<usize> = report.parse_failures.iter().map(|f| f.index).collect();
    assert_eq!(failed, vec![1, 2]);
    assert!(report.parse_failures.iter().all(|f| matches!(f.error, ParseError::Undecodable(_))));

    assert!(store.get_game_by_id(3).unwrap().is_none());
    assert_eq!(store.get_game_by_id(4).unwrap().unwrap().tags, vec![7]);
}

#[tokio::test]
async fn test_failed_write_is_rolled_back_and_cycle_continues() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("ingest.db");
    let store = Store::new(&db_path).unwrap();
    rusqlite::Connection::open(&db_path)
        .unwrap()
        .execute_batch(
            "CREATE TRIGGER reject_cover_2 BEFORE INSERT ON covers
             WHEN NEW.game_id = 2
             BEGIN SELECT RAISE(ABORT, 'cover rejected'); END;",
        )
        .unwrap();

    let entries = vec![raw(1, "One [1]"), raw(2, "Two [1]"), raw(3, "Three [1]")];
    let service =
        IngestionService::new(Arc::new(StaticSource::new(entries)), store.clone(), Duration::from_secs(5));

    let report = completed(service.ingestion_cycle().await.unwrap());
    assert_eq!(report.committed(), 2);
    assert!(report.parse_failures.is_empty());
    assert_eq!(report.store_failures.len(), 1);
    assert_eq!(report.store_failures[0].id, 2);
    assert!(report.store_failures[0].reason.contains("cover rejected"), "{:?}", report.store_failures);

    assert!(store.get_game_by_id(2).unwrap().is_none(), "game row must roll back with its cover");
    assert!(store.get_game_by_id(3).unwrap().is_some());
    assert_eq!(store.game_count().unwrap(), 2);
}

#[tokio::test]
async fn test_repeat_cycle_updates_in_place() {
    let (store, _dir) = create_test_store();
    let source = Arc::new(StaticSource::new(vec![raw(10, "Ten [1]"), raw(11, "Eleven [1]")]));
    let service = IngestionService::new(source.clone(), store.clone(), Duration::from_secs(5));

    let first = completed(service.ingestion_cycle().await.unwrap());
    let before = store.get_game_by_id(10).unwrap().unwrap();
    let second = completed(service.ingestion_cycle().await.unwrap());
    let after = store.get_game_by_id(10).unwrap().unwrap();

    assert_eq!((first.created, first.updated), (2, 0));
    assert_eq!((second.created, second.updated), (0, 2));
    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    assert_eq!(store.game_count().unwrap(), 2);
    assert_eq!(after.created_at, before.created_at);
    assert!(after.updated_at >= before.updated_at);
}

#[tokio::test]
async fn test_overlapping_cycle_is_skipped() {
    let (store, _dir) = create_test_store();
    let source = Arc::new(GatedSource {
        entered: Notify::new(),
        release: Notify::new(),
        entries: vec![raw(1, "One [1]")],
    });
    let service =
        Arc::new(IngestionService::new(source.clone(), store.clone(), Duration::from_secs(5)));

    let first = tokio::spawn({
        let service = Arc::clone(&service);
        async move { service.ingestion_cycle().await }
    });
    source.entered.notified().await;
    assert!(service.is_running());

    assert_eq!(service.ingestion_cycle().await.unwrap(), CycleOutcome::Skipped);

    source.release.notify_one();
    let report = completed(first.await.unwrap().unwrap());
    assert_eq!(report.committed(), 1);
    assert!(!service.is_running());
}

#[tokio::test]
async fn test_fetch_timeout_keeps_earlier_commits() {
    let (store, _dir) = create_test_store();
    let source = Arc::new(StallingSource {
        entries: vec![raw(1, "One [1]"), raw(2, "Two [1]")],
        calls: AtomicUsize::new(0),
    });
    let service = IngestionService::new(source, store.clone(), Duration::from_millis(100));

    completed(service.ingestion_cycle().await.unwrap());
    let err = service.ingestion_cycle().await.unwrap_err();
    assert!(matches!(err, ServiceError::Fetch(SourceError::Timeout)), "got {err:?}");

    assert!(!service.is_running());
    assert_eq!(store.game_count().unwrap(), 2);
    assert_eq!(store.get_game_by_id(2).unwrap().unwrap().title, "Two");
}

#[tokio::test]
async fn test_fetch_failure_does_not_poison_next_cycle() {
    let (store, _dir) = create_test_store();
    let source =
        Arc::new(FlakySource { entries: vec![raw(5, "Five [0.5]")], calls: AtomicUsize::new(0) });
    let service = IngestionService::new(source, store.clone(), Duration::from_secs(5));

    let err = service.ingestion_cycle().await.unwrap_err();
    assert!(matches!(err, ServiceError::Fetch(SourceError::Status { code: 502, .. })));
    assert_eq!(store.game_count().unwrap(), 0);

    let report = completed(service.ingestion_cycle().await.unwrap());
    assert_eq!(report.committed(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_scheduler_fires_cycles() {
    let (store, _dir) = create_test_store();
    let source = Arc::new(StaticSource::new(vec![raw(1, "One [1]")]));
    let service =
        Arc::new(IngestionService::new(source.clone(), store.clone(), Duration::from_secs(5)));

    let scheduler = IngestionScheduler::start(Arc::clone(&service), "* * * * * *").await.unwrap();
    for _ in 0..50 {
        if source.calls.load(Ordering::SeqCst) > 0 && store.game_count().unwrap() > 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    scheduler.shutdown().await.unwrap();

    assert!(source.calls.load(Ordering::SeqCst) >= 1);
    assert_eq!(store.game_count().unwrap(), 1);
}

#[tokio::test]
async fn test_invalid_schedule_is_config_error() {
    let (store, _dir) = create_test_store();
    let service = Arc::new(IngestionService::new(
        Arc::new(StaticSource::new(Vec::new())),
        store,
        Duration::from_secs(5),
    ));

    let err = IngestionScheduler::start(service, "not a schedule").await.unwrap_err();
    assert!(err.is_config(), "got {err:?}");
}
