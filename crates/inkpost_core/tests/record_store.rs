use inkpost_core::{Article, FsRecordStore, RecordStore, StoreError};
use tempfile::tempdir;

fn sample(title: &str) -> Article {
    Article::new(title, "alice", "body text").unwrap()
}

#[test]
fn write_and_read_roundtrip() {
    let dir = tempdir().unwrap();
    let store = FsRecordStore::open(dir.path()).unwrap();

    let article = sample("Hello World");
    store.write("hello-world", &article).unwrap();

    let loaded = store.read("hello-world").unwrap();
    assert_eq!(loaded, article);
}

#[test]
fn write_overwrites_existing_record() {
    let dir = tempdir().unwrap();
    let store = FsRecordStore::open(dir.path()).unwrap();

    store.write("post", &sample("Post")).unwrap();
    let replacement = Article::new("Post", "bob", "newer body").unwrap();
    store.write("post", &replacement).unwrap();

    let loaded = store.read("post").unwrap();
    assert_eq!(loaded.author, "bob");
    assert_eq!(loaded.text, "newer body");
}

#[test]
fn read_missing_record_is_not_found() {
    let dir = tempdir().unwrap();
    let store = FsRecordStore::open(dir.path()).unwrap();

    let err = store.read("absent").unwrap_err();
    assert!(matches!(err, StoreError::NotFound(key) if key == "absent"));
}

#[test]
fn write_new_rejects_occupied_key() {
    let dir = tempdir().unwrap();
    let store = FsRecordStore::open(dir.path()).unwrap();

    store.write_new("post", &sample("Post")).unwrap();
    let err = store.write_new("post", &sample("Post")).unwrap_err();
    assert!(matches!(err, StoreError::Conflict(key) if key == "post"));

    // The loser must not have touched the stored record.
    assert_eq!(store.read("post").unwrap().author, "alice");
}

#[test]
fn delete_removes_record_and_fails_on_absent_key() {
    let dir = tempdir().unwrap();
    let store = FsRecordStore::open(dir.path()).unwrap();

    store.write("post", &sample("Post")).unwrap();
    store.delete("post").unwrap();
    assert!(matches!(
        store.read("post").unwrap_err(),
        StoreError::NotFound(_)
    ));

    let err = store.delete("post").unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[test]
fn rename_relocates_record() {
    let dir = tempdir().unwrap();
    let store = FsRecordStore::open(dir.path()).unwrap();

    let article = sample("Post");
    store.write("old", &article).unwrap();
    store.rename("old", "new").unwrap();

    assert!(matches!(
        store.read("old").unwrap_err(),
        StoreError::NotFound(_)
    ));
    assert_eq!(store.read("new").unwrap(), article);
}

#[test]
fn rename_to_occupied_key_is_conflict_and_changes_nothing() {
    let dir = tempdir().unwrap();
    let store = FsRecordStore::open(dir.path()).unwrap();

    store.write("a", &sample("A")).unwrap();
    store.write("b", &sample("B")).unwrap();

    let err = store.rename("a", "b").unwrap_err();
    assert!(matches!(err, StoreError::Conflict(key) if key == "b"));
    assert_eq!(store.read("a").unwrap().title, "A");
    assert_eq!(store.read("b").unwrap().title, "B");
}

#[test]
fn rename_of_absent_key_is_not_found() {
    let dir = tempdir().unwrap();
    let store = FsRecordStore::open(dir.path()).unwrap();

    let err = store.rename("ghost", "anywhere").unwrap_err();
    assert!(matches!(err, StoreError::NotFound(key) if key == "ghost"));
}

#[test]
fn corrupt_record_reads_as_decode_error() {
    let dir = tempdir().unwrap();
    let store = FsRecordStore::open(dir.path()).unwrap();

    std::fs::write(dir.path().join("bad.json"), b"{ not json").unwrap();

    let err = store.read("bad").unwrap_err();
    assert!(matches!(err, StoreError::Decode { key, .. } if key == "bad"));
}

#[test]
fn list_keys_returns_only_record_files() {
    let dir = tempdir().unwrap();
    let store = FsRecordStore::open(dir.path()).unwrap();

    store.write("one", &sample("One")).unwrap();
    store.write("two", &sample("Two")).unwrap();
    std::fs::write(dir.path().join("notes.txt"), b"not a record").unwrap();

    let mut keys = store.list_keys().unwrap();
    keys.sort_unstable();
    assert_eq!(keys, ["one", "two"]);
}

#[test]
fn records_are_field_tagged_json_on_disk() {
    let dir = tempdir().unwrap();
    let store = FsRecordStore::open(dir.path()).unwrap();

    store.write("post", &sample("Post")).unwrap();

    let raw = std::fs::read_to_string(dir.path().join("post.json")).unwrap();
    for tag in ["\"Title\"", "\"Author\"", "\"Description\"", "\"Text\"", "\"Created\"", "\"Updated\""] {
        assert!(raw.contains(tag), "missing field tag {tag}");
    }
}
