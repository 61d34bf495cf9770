use freezerapp::api::FreezerApi;
use freezerapp::config::{CorruptDataPolicy, FreezerConfig};
use freezerapp::error::FreezerError;
use freezerapp::model::Item;
use freezerapp::store::fs::FileStore;
use freezerapp::store::fs_backend::FsBackend;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn open(dir: &Path, config: &FreezerConfig) -> freezerapp::error::Result<FreezerApi<FsBackend>> {
    FreezerApi::open(FileStore::new_fs(dir.to_path_buf(), config))
}

fn item(id: &str, name: &str, qty: u32) -> Item {
    Item {
        id: id.to_string(),
        name: name.to_string(),
        qty,
    }
}

enum Step {
    Scan(&'static str),
    Decrement(&'static str),
}

#[test]
fn every_step_is_durable() {
    let dir = TempDir::new().unwrap();
    let config = FreezerConfig::default();

    let steps = vec![
        (Step::Scan("111"), vec![item("111", "Product 111", 1)]),
        (Step::Scan("111"), vec![item("111", "Product 111", 2)]),
        (Step::Decrement("111"), vec![item("111", "Product 111", 1)]),
        (Step::Decrement("111"), vec![]),
    ];

    for (step, expected) in steps {
        // Reopen before each step: nothing may live only in memory.
        let mut api = open(dir.path(), &config).unwrap();
        match step {
            Step::Scan(code) => {
                api.scan_add(code).unwrap();
            }
            Step::Decrement(id) => {
                api.decrement(id);
            }
        }
        assert_eq!(api.current_items(), expected.as_slice());

        let reopened = open(dir.path(), &config).unwrap();
        assert_eq!(reopened.current_items(), expected.as_slice());
    }
}

#[test]
fn first_name_survives_restart() {
    let dir = TempDir::new().unwrap();
    let config = FreezerConfig::default();

    let mut api = open(dir.path(), &config).unwrap();
    api.add_manual("Peas").unwrap();
    let id = api.current_items()[0].id.clone();
    drop(api);

    let mut api = open(dir.path(), &config).unwrap();
    api.scan_add(&id).unwrap();
    assert_eq!(api.current_items(), &[item(&id, "Peas", 2)]);
}

#[test]
fn generated_ids_do_not_collide_with_stored_ones() {
    let dir = TempDir::new().unwrap();
    let config = FreezerConfig::default();

    let mut api = open(dir.path(), &config).unwrap();
    api.add_manual("Peas").unwrap();
    drop(api);

    let mut api = open(dir.path(), &config).unwrap();
    api.add_manual("Peas").unwrap();
    api.add_manual("Peas").unwrap();

    let items = api.current_items();
    assert_eq!(items.len(), 3);
    assert_ne!(items[0].id, items[1].id);
    assert_ne!(items[1].id, items[2].id);
    assert_ne!(items[0].id, items[2].id);
}

#[test]
fn corrupt_file_resets_with_backup() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("freezer_stock.json"), "{\"oops\":").unwrap();

    let mut api = open(dir.path(), &FreezerConfig::default()).unwrap();
    assert!(api.recovered_from_corrupt());
    assert!(api.current_items().is_empty());
    assert_eq!(
        fs::read_to_string(dir.path().join("freezer_stock.corrupt.json")).unwrap(),
        "{\"oops\":"
    );

    api.scan_add("222").unwrap();
    let reopened = open(dir.path(), &FreezerConfig::default()).unwrap();
    assert_eq!(reopened.current_items(), &[item("222", "Product 222", 1)]);
}

#[test]
fn corrupt_file_fails_when_configured() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("freezer_stock.json"),
        r#"[{"id":"a","name":"x","qty":1},{"id":"a","name":"x","qty":1}]"#,
    )
    .unwrap();
    let config = FreezerConfig {
        on_corrupt: CorruptDataPolicy::Fail,
        ..Default::default()
    };

    let err = open(dir.path(), &config).err().unwrap();
    assert!(matches!(err, FreezerError::CorruptSnapshot { .. }));
}

#[test]
fn non_utf8_file_resets_with_backup() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("freezer_stock.json"), [0xff, 0xfe, b'[', 0x80]).unwrap();

    let mut api = open(dir.path(), &FreezerConfig::default()).unwrap();
    assert!(api.recovered_from_corrupt());
    assert!(api.current_items().is_empty());
    let backup = fs::read_to_string(dir.path().join("freezer_stock.corrupt.json")).unwrap();
    assert!(backup.contains('['));

    api.scan_add("111").unwrap();
    let reopened = open(dir.path(), &FreezerConfig::default()).unwrap();
    assert!(!reopened.recovered_from_corrupt());
    assert_eq!(reopened.current_items(), &[item("111", "Product 111", 1)]);
}

#[test]
fn non_utf8_file_fails_when_configured() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("freezer_stock.json"), [0xff, 0xfe]).unwrap();
    let config = FreezerConfig {
        on_corrupt: CorruptDataPolicy::Fail,
        ..Default::default()
    };

    let err = open(dir.path(), &config).err().unwrap();
    assert!(matches!(err, FreezerError::CorruptSnapshot { .. }));
}

#[test]
fn second_corruption_keeps_first_backup() {
    let dir = TempDir::new().unwrap();
    let config = FreezerConfig::default();

    fs::write(dir.path().join("freezer_stock.json"), "{\"oops\":").unwrap();
    open(dir.path(), &config).unwrap().scan_add("111").unwrap();

    fs::write(dir.path().join("freezer_stock.json"), "[{\"id\":").unwrap();
    let api = open(dir.path(), &config).unwrap();
    assert!(api.recovered_from_corrupt());

    assert_eq!(
        fs::read_to_string(dir.path().join("freezer_stock.corrupt.json")).unwrap(),
        "{\"oops\":"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("freezer_stock.corrupt.1.json")).unwrap(),
        "[{\"id\":"
    );
}
