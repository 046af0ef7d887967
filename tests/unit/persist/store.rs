use super::*;
use crate::{EditAction, PostFormat};

fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "brandpost-store-{tag}-{}",
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn memory_store_roundtrips_and_counts() {
    let mut store = MemoryStore::new();
    assert!(store.load("k").unwrap().is_none());

    let doc = LayoutDocument::default().apply(EditAction::SetFormat(PostFormat::Portrait));
    store.save("k", &doc).unwrap();
    store.save("k", &doc).unwrap();
    assert_eq!(store.save_count(), 2);
    assert_eq!(store.load("k").unwrap(), Some(doc));
}

#[test]
fn memory_store_surfaces_corrupt_values() {
    let mut store = MemoryStore::new();
    store.insert_raw("k", "{broken");
    assert!(matches!(store.load("k"), Err(BrandpostError::Serde(_))));
}

#[test]
fn file_store_missing_key_is_absent() {
    let store = JsonFileStore::new(scratch_dir("missing"));
    assert!(store.load("layout").unwrap().is_none());
}

#[test]
fn file_store_last_write_wins() {
    let dir = scratch_dir("lww");
    let mut store = JsonFileStore::new(&dir);
    let first = LayoutDocument::default().apply(EditAction::SetMainImageY(10.0));
    let second = first.clone().apply(EditAction::SetMainImageY(90.0));
    store.save("layout", &first).unwrap();
    store.save("layout", &second).unwrap();

    assert_eq!(store.load("layout").unwrap(), Some(second));
    assert!(!dir.join("layout.json.tmp").exists());
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn file_store_rejects_path_like_keys() {
    let store = JsonFileStore::new(scratch_dir("keys"));
    assert!(store.path_for("../escape").is_err());
    assert!(store.path_for("").is_err());
    assert!(store.path_for(".hidden").is_err());
    assert!(store.path_for("brandpost.layout").is_ok());
}

#[test]
fn file_store_write_failures_are_persistence_errors() {
    let blocker = scratch_dir("blocked");
    std::fs::write(&blocker, b"not a directory").unwrap();
    let mut store = JsonFileStore::new(&blocker);

    let err = store.save("layout", &LayoutDocument::default()).unwrap_err();
    assert!(matches!(err, BrandpostError::Persistence(_)), "{err:?}");
    std::fs::remove_file(&blocker).unwrap();
}
