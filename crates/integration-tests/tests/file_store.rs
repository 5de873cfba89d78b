//! File-backed carts.

use std::fs;

use gomarket_cart::{CartConfig, CartStore, FileStore, KeyValueStore};
use gomarket_core::ProductId;
use gomarket_integration_tests::{product, quantities, temp_dir};

#[tokio::test]
async fn test_cart_survives_reopen() {
    let dir = temp_dir("reopen");
    let _ = fs::remove_dir_all(&dir);
    let config = CartConfig::default().with_data_dir(dir.clone());

    {
        let store = CartStore::open_file(&config).await;
        store.add_to_cart(product("p1")).await.expect("add");
        store.add_to_cart(product("p2")).await.expect("add");
        store.increment(&ProductId::new("p2")).await.expect("increment");
    }

    let reopened = CartStore::open_file(&config).await;
    assert_eq!(
        quantities(&reopened.snapshot()),
        vec![("p1".to_string(), 1), ("p2".to_string(), 2)]
    );

    let _ = fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_file_name_is_encoded_key() {
    let dir = temp_dir("encoded_key");
    let _ = fs::remove_dir_all(&dir);
    let config = CartConfig::default().with_data_dir(dir.clone());

    let store = CartStore::open_file(&config).await;
    store.add_to_cart(product("p1")).await.expect("add");

    let path = dir.join("%40GoMarket%3Aproducts");
    assert!(path.is_file(), "expected {}", path.display());
    let on_disk = fs::read(&path).expect("read cart file");
    let via_store = FileStore::new(dir.clone())
        .get(store.key())
        .await
        .expect("get")
        .expect("present");
    assert_eq!(on_disk, via_store);

    // No temporary files left behind
    let entries = fs::read_dir(&dir).expect("read dir").count();
    assert_eq!(entries, 1);

    let _ = fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_missing_directory_loads_empty() {
    let dir = temp_dir("never_created");
    let _ = fs::remove_dir_all(&dir);
    let config = CartConfig::default().with_data_dir(dir.clone());

    let store = CartStore::open_file(&config).await;

    assert!(store.snapshot().is_empty());
    assert!(!dir.exists());
}
