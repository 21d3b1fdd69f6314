//! Test utilities and module declarations for store tests.

use crate::Store;
use catalog_feed_core::{CanonicalRecord, GameId};
use tempfile::TempDir;

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_test_store() -> (Store, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let store = Store::new(&db_path).unwrap();
    (store, temp_dir)
}

pub fn create_test_record(id: GameId) -> CanonicalRecord {
    CanonicalRecord::new(id, format!("Game {id}"), "1.0", "Studio")
        .cover(format!("https://cdn.example.com/{id}/cover.jpg"))
        .previews(vec![
            format!("https://cdn.example.com/{id}/p1.jpg"),
            format!("https://cdn.example.com/{id}/p2.jpg"),
        ])
        .tags([10, 20])
        .prefixes([1])
}

mod concurrency_tests;
mod facet_tests;
