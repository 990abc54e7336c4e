use camino::Utf8PathBuf;
use powergate_config::LOGOUT_FLAG_KEY;
use powergate_infra::{FileKvStore, StoreError};

fn temp_store() -> (tempfile::TempDir, FileKvStore) {
    let dir = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::from_path_buf(dir.path().join("nested").join("state.json")).unwrap();
    (dir, FileKvStore::new(path))
}

#[test]
fn missing_file_reads_as_empty() {
    let (_dir, store) = temp_store();
    assert_eq!(store.get::<bool>(LOGOUT_FLAG_KEY).unwrap(), None);
    assert!(!store.remove(LOGOUT_FLAG_KEY).unwrap());
    assert!(!store.path().exists(), "remove of a missing key must not create the file");
}

#[test]
fn values_survive_a_new_handle() {
    let (_dir, store) = temp_store();
    store.set(LOGOUT_FLAG_KEY, &true).unwrap();
    store.set("auth-token", &"abc".to_string()).unwrap();

    let reopened = FileKvStore::new(store.path().to_owned());
    assert_eq!(reopened.get::<bool>(LOGOUT_FLAG_KEY).unwrap(), Some(true));
    assert_eq!(
        reopened.get::<String>("auth-token").unwrap().as_deref(),
        Some("abc")
    );
}

#[test]
fn remove_only_drops_the_named_key() {
    let (_dir, store) = temp_store();
    store.set(LOGOUT_FLAG_KEY, &true).unwrap();
    store.set("auth-token", &"abc".to_string()).unwrap();

    assert!(store.remove("auth-token").unwrap());
    assert_eq!(store.get::<String>("auth-token").unwrap(), None);
    assert_eq!(store.get::<bool>(LOGOUT_FLAG_KEY).unwrap(), Some(true));
}

#[test]
fn corrupt_file_is_reported_not_overwritten() {
    let (_dir, store) = temp_store();
    std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    std::fs::write(store.path(), "{ not json").unwrap();

    let err = store.get::<bool>(LOGOUT_FLAG_KEY).unwrap_err();
    assert!(matches!(err, StoreError::Serde(_)));
    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "{ not json");
}

#[test]
fn no_temp_file_is_left_behind() {
    let (_dir, store) = temp_store();
    store.set(LOGOUT_FLAG_KEY, &false).unwrap();

    let tmp = format!("{}.tmp", store.path());
    assert!(!std::path::Path::new(&tmp).exists());
}
