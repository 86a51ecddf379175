use beanprice_core::store::error::StoreError;
use beanprice_core::store::port::{KvStore, KvStoreExt};
use beanprice_store::file::FileStore;
use beanprice_store::mem::MemStore;
use serde::{Deserialize, Serialize};
use tempfile::tempdir;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
struct TestItem {
    date: String,
    price: String,
}

#[test]
fn test_mem_store_raw_ops() {
    let store = MemStore::new();
    let key = "raw_key";

    // 测试存取
    store.set_item(key, "[1,2,3]".to_string()).unwrap();
    assert_eq!(store.get_item(key).unwrap().as_deref(), Some("[1,2,3]"));
    assert_eq!(store.len(), 1);

    // 覆盖写
    store.set_item(key, "[]".to_string()).unwrap();
    assert_eq!(store.get_item(key).unwrap().as_deref(), Some("[]"));

    // 测试删除
    store.remove_item(key).unwrap();
    assert!(store.get_item(key).unwrap().is_none());
    assert!(store.is_empty());

    // 删除不存在的键同样成功
    store.remove_item(key).unwrap();
}

#[test]
fn test_mem_store_typed_ops() {
    let store = MemStore::new();
    let items = vec![TestItem {
        date: "2025-09-22".to_string(),
        price: "60000".to_string(),
    }];

    store.set_json("typed_key", &items).unwrap();
    let result: Vec<TestItem> = store.get_json("typed_key").unwrap().unwrap();
    assert_eq!(result, items);

    let missing: Option<Vec<TestItem>> = store.get_json("missing").unwrap();
    assert!(missing.is_none());
}

#[test]
fn test_typed_get_reports_deserialize_error() {
    let store = MemStore::new();
    store.set_item("broken", "{not json".to_string()).unwrap();

    let res: Result<Option<Vec<TestItem>>, _> = store.get_json("broken");
    assert!(matches!(res, Err(StoreError::Deserialize(_))));
}

#[test]
fn test_file_store_persists_across_instances() -> anyhow::Result<()> {
    let tmp_dir = tempdir()?;
    let root = tmp_dir.path().join("nested").join("data");

    let store = FileStore::open(&root)?;
    assert!(store.get_item("priceData")?.is_none());

    store.set_item("priceData", r#"[{"date":"2025-09-22","price":"60000"}]"#.to_string())?;
    assert!(root.join("priceData.json").exists());
    assert!(!root.join("priceData.json.tmp").exists());

    // 重新打开同一目录，数据仍在
    let reopened = FileStore::open(&root)?;
    assert_eq!(
        reopened.get_item("priceData")?.as_deref(),
        Some(r#"[{"date":"2025-09-22","price":"60000"}]"#)
    );

    reopened.remove_item("priceData")?;
    assert!(reopened.get_item("priceData")?.is_none());
    reopened.remove_item("priceData")?;
    Ok(())
}

#[test]
fn test_file_store_rejects_path_like_keys() -> anyhow::Result<()> {
    let tmp_dir = tempdir()?;
    let store = FileStore::open(tmp_dir.path())?;

    for key in ["", "../escape", "a/b", ".hidden", "a\\b"] {
        assert!(
            matches!(store.get_item(key), Err(StoreError::Read(_))),
            "get should reject {key:?}"
        );
        assert!(
            matches!(store.set_item(key, "x".to_string()), Err(StoreError::Write(_))),
            "set should reject {key:?}"
        );
    }
    Ok(())
}

#[test]
fn test_file_store_write_failure_keeps_previous_value() -> anyhow::Result<()> {
    let tmp_dir = tempdir()?;
    let store = FileStore::open(tmp_dir.path())?;
    store.set_item("priceData", "old".to_string())?;

    // 目标路径被目录占用时 rename 失败
    let blocked = FileStore::open(tmp_dir.path().join("blocked"))?;
    std::fs::create_dir_all(blocked.root().join("priceData.json"))?;
    assert!(matches!(
        blocked.set_item("priceData", "new".to_string()),
        Err(StoreError::Write(_))
    ));
    assert!(!blocked.root().join("priceData.json.tmp").exists());

    assert_eq!(store.get_item("priceData")?.as_deref(), Some("old"));
    Ok(())
}

#[test]
fn test_file_store_uses_configured_root_dir() -> anyhow::Result<()> {
    let tmp_dir = tempdir()?;
    let root = tmp_dir.path().join("configured");
    assert!(beanprice_store::config::set_root_dir(root.clone()));
    assert_eq!(beanprice_store::config::get_root_dir(), root);

    // 只允许设置一次
    assert!(!beanprice_store::config::set_root_dir(tmp_dir.path().join("other")));

    let store = FileStore::new()?;
    assert_eq!(store.root(), root.as_path());
    assert!(root.is_dir());
    Ok(())
}
