#![expect(clippy::unwrap_used, reason = "test code")]

use catalog_feed_core::CanonicalRecord;

use super::create_test_store;

#[test]
fn test_append_cover_is_idempotent() {
    let (store, _temp_dir) = create_test_store();
    store.upsert_game(&CanonicalRecord::new(1, "G", "1", "S")).unwrap();

    assert!(store.append_cover_if_absent(1, "https://a/c.jpg").unwrap());
    assert!(!store.append_cover_if_absent(1, "https://a/c.jpg").unwrap());
    assert_eq!(store.get_game_by_id(1).unwrap().unwrap().cover.as_deref(), Some("https://a/c.jpg"));
}

#[test]
fn test_append_preview_is_idempotent() {
    let (store, _temp_dir) = create_test_store();
    store.upsert_game(&CanonicalRecord::new(1, "G", "1", "S")).unwrap();

    assert!(store.append_preview_if_absent(1, "https://a/p1.jpg").unwrap());
    assert!(store.append_preview_if_absent(1, "https://a/p2.jpg").unwrap());
    assert!(!store.append_preview_if_absent(1, "https://a/p1.jpg").unwrap());

    let view = store.get_game_by_id(1).unwrap().unwrap();
    assert_eq!(view.previews, vec!["https://a/p1.jpg".to_owned(), "https://a/p2.jpg".to_owned()]);
}

#[test]
fn test_asset_url_unique_per_game_only() {
    let (store, _temp_dir) = create_test_store();
    store.upsert_game(&CanonicalRecord::new(1, "A", "1", "S").cover("https://a/shared.jpg")).unwrap();
    store.upsert_game(&CanonicalRecord::new(2, "B", "1", "S").cover("https://a/shared.jpg")).unwrap();

    assert_eq!(store.get_game_by_id(1).unwrap().unwrap().cover.as_deref(), Some("https://a/shared.jpg"));
    assert_eq!(store.get_game_by_id(2).unwrap().unwrap().cover.as_deref(), Some("https://a/shared.jpg"));
}

#[test]
fn test_membership_reinsert_is_noop() {
    let (store, _temp_dir) = create_test_store();
    store.upsert_game(&CanonicalRecord::new(1, "G", "1", "S")).unwrap();

    assert_eq!(store.append_tag_memberships(1, &[5, 6]).unwrap(), 2);
    assert_eq!(store.append_tag_memberships(1, &[6, 7]).unwrap(), 1);
    assert_eq!(store.append_tag_memberships(1, &[]).unwrap(), 0);
    assert_eq!(store.append_prefix_memberships(1, &[3, 3]).unwrap(), 1);

    let view = store.get_game_by_id(1).unwrap().unwrap();
    assert_eq!(view.tags, vec![5, 6, 7]);
    assert_eq!(view.prefixes, vec![3]);
}

#[test]
fn test_facet_for_unknown_game_is_constraint_error() {
    let (store, _temp_dir) = create_test_store();
    let err = store.append_cover_if_absent(999, "https://a/c.jpg").unwrap_err();
    assert!(err.is_constraint(), "unexpected error: {err}");
}
