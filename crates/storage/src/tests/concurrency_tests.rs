#![expect(clippy::unwrap_used, reason = "test code")]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use catalog_feed_core::CanonicalRecord;

use super::create_test_store;

/// Write `n` of game 1: every field and the cover carry `n`.
fn generation(n: u32) -> CanonicalRecord {
    CanonicalRecord::new(1, format!("Title {n}"), n.to_string(), format!("Studio {n}"))
        .cover(format!("https://cdn.example.com/1/{n}.jpg"))
}

#[test]
fn test_readers_never_observe_half_written_record() {
    let (store, _temp_dir) = create_test_store();
    store.upsert_game(&generation(0)).unwrap();

    let done = Arc::new(AtomicBool::new(false));
    let writer = {
        let store = store.clone();
        let done = Arc::clone(&done);
        thread::spawn(move || {
            for n in 1..=200 {
                store.upsert_game(&generation(n)).unwrap();
            }
            done.store(true, Ordering::SeqCst);
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = store.clone();
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let mut reads = 0usize;
                while !done.load(Ordering::SeqCst) || reads == 0 {
                    let view = store.get_game_by_id(1).unwrap().unwrap();
                    let n = view.version.as_str();
                    assert_eq!(view.title, format!("Title {n}"), "mixed write observed: {view:?}");
                    assert_eq!(view.creator, format!("Studio {n}"), "mixed write observed: {view:?}");
                    assert_eq!(
                        view.cover.as_deref(),
                        Some(format!("https://cdn.example.com/1/{n}.jpg").as_str()),
                        "cover out of step with its row: {view:?}"
                    );
                    reads += 1;
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
}

#[test]
fn test_concurrent_first_insert_of_creator() {
    let (store, _temp_dir) = create_test_store();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = store.clone();
            thread::spawn(move || store.upsert_creator("Racing Studio").unwrap())
        })
        .collect();
    let ids: Vec<i64> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert!(ids.windows(2).all(|w| w[0] == w[1]), "creator ids diverged: {ids:?}");
}
