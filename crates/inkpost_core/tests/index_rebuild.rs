use chrono::{DateTime, TimeZone, Utc};
use inkpost_core::{Article, ArticleIndex, FsRecordStore, RecordStore};
use tempfile::tempdir;

fn timestamp(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

fn article_at(title: &str, created_secs: i64) -> Article {
    let created = timestamp(created_secs);
    Article {
        title: title.to_string(),
        author: "alice".to_string(),
        description: "preview".to_string(),
        text: "full body".to_string(),
        created,
        updated: created,
    }
}

#[test]
fn rebuild_orders_by_created_ascending_regardless_of_write_order() {
    let dir = tempdir().unwrap();
    let store = FsRecordStore::open(dir.path()).unwrap();

    store.write("newest", &article_at("Newest", 3_000)).unwrap();
    store.write("oldest", &article_at("Oldest", 1_000)).unwrap();
    store.write("middle", &article_at("Middle", 2_000)).unwrap();

    let index = ArticleIndex::new();
    let report = index.rebuild(&store).unwrap();
    assert_eq!(report.indexed, 3);
    assert!(report.skipped.is_empty());

    let titles: Vec<_> = index
        .snapshot()
        .into_iter()
        .map(|article| article.title)
        .collect();
    assert_eq!(titles, ["Oldest", "Middle", "Newest"]);
}

#[test]
fn rebuild_strips_bodies_but_keeps_metadata() {
    let dir = tempdir().unwrap();
    let store = FsRecordStore::open(dir.path()).unwrap();
    store.write("post", &article_at("Post", 1_000)).unwrap();

    let index = ArticleIndex::new();
    index.rebuild(&store).unwrap();

    let snapshot = index.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert!(snapshot[0].text.is_empty());
    assert_eq!(snapshot[0].description, "preview");
    assert_eq!(snapshot[0].created, timestamp(1_000));
}

#[test]
fn created_ties_keep_key_order() {
    let dir = tempdir().unwrap();
    let store = FsRecordStore::open(dir.path()).unwrap();

    store.write("b-second", &article_at("B Second", 1_000)).unwrap();
    store.write("a-first", &article_at("A First", 1_000)).unwrap();

    let index = ArticleIndex::new();
    index.rebuild(&store).unwrap();

    let titles: Vec<_> = index
        .snapshot()
        .into_iter()
        .map(|article| article.title)
        .collect();
    assert_eq!(titles, ["A First", "B Second"]);
}

#[test]
fn corrupt_records_are_skipped_and_reported() {
    let dir = tempdir().unwrap();
    let store = FsRecordStore::open(dir.path()).unwrap();

    store.write("good-one", &article_at("Good One", 1_000)).unwrap();
    store.write("good-two", &article_at("Good Two", 2_000)).unwrap();
    std::fs::write(dir.path().join("broken.json"), b"%%%").unwrap();

    let index = ArticleIndex::new();
    let report = index.rebuild(&store).unwrap();

    assert_eq!(report.indexed, 2);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].0, "broken");

    let titles: Vec<_> = index
        .snapshot()
        .into_iter()
        .map(|article| article.title)
        .collect();
    assert_eq!(titles, ["Good One", "Good Two"]);
}

#[test]
fn rebuild_replaces_the_previous_view() {
    let dir = tempdir().unwrap();
    let store = FsRecordStore::open(dir.path()).unwrap();
    let index = ArticleIndex::new();

    store.write("post", &article_at("Post", 1_000)).unwrap();
    index.rebuild(&store).unwrap();
    assert_eq!(index.len(), 1);

    store.delete("post").unwrap();
    index.rebuild(&store).unwrap();
    assert!(index.is_empty());
}

#[test]
fn snapshot_is_a_copy() {
    let dir = tempdir().unwrap();
    let store = FsRecordStore::open(dir.path()).unwrap();
    store.write("post", &article_at("Post", 1_000)).unwrap();

    let index = ArticleIndex::new();
    index.rebuild(&store).unwrap();

    let mut first = index.snapshot();
    first.clear();
    assert_eq!(index.snapshot().len(), 1);
}
