//! End-to-end cart behaviour over an in-memory backend.

use gomarket_cart::{CartConfig, CartStore, KeyValueStore, MemoryStore, StoreStatus, codec};
use gomarket_core::{NewLineItem, ProductId, UnitPrice};
use gomarket_integration_tests::{persisted, product, quantities};

fn tomato() -> NewLineItem {
    NewLineItem {
        id: ProductId::new("p1"),
        title: "Tomato".to_string(),
        image_url: "u".to_string(),
        price: "2.5".parse::<UnitPrice>().expect("valid price"),
    }
}

#[tokio::test]
async fn test_add_to_empty_cart() {
    let storage = MemoryStore::new();
    let store = CartStore::open(storage.clone(), &CartConfig::default()).await;

    store.add_to_cart(tomato()).await.expect("add");

    let snapshot = store.snapshot();
    assert_eq!(quantities(&snapshot), vec![("p1".to_string(), 1)]);
    let item = snapshot.get(&ProductId::new("p1")).expect("line item");
    assert_eq!(item.title, "Tomato");
    assert_eq!(item.price.to_string(), "2.50");

    let raw = storage
        .get(store.key())
        .await
        .expect("get")
        .expect("cart written");
    assert_eq!(
        String::from_utf8(raw).expect("utf-8"),
        r#"[{"id":"p1","title":"Tomato","image_url":"u","price":2.5,"quantity":1}]"#
    );
}

#[tokio::test]
async fn test_adding_same_product_increments() {
    let store = CartStore::open(MemoryStore::new(), &CartConfig::default()).await;

    store.add_to_cart(tomato()).await.expect("add");
    store.add_to_cart(tomato()).await.expect("add again");

    assert_eq!(quantities(&store.snapshot()), vec![("p1".to_string(), 2)]);
}

#[tokio::test]
async fn test_decrement_stops_at_one() {
    let storage = MemoryStore::new();
    let store = CartStore::open(storage.clone(), &CartConfig::default()).await;
    store.add_to_cart(tomato()).await.expect("add");
    let before = store.snapshot();

    store.decrement(&ProductId::new("p1")).await.expect("decrement");

    assert_eq!(quantities(&store.snapshot()), vec![("p1".to_string(), 1)]);
    assert!(store.snapshot().ptr_eq(&before));
    assert_eq!(persisted(&storage, &store).await, Some(before));
}

#[tokio::test]
async fn test_decrement_from_three() {
    let store = CartStore::open(MemoryStore::new(), &CartConfig::default()).await;
    let id = ProductId::new("p1");
    store.add_to_cart(tomato()).await.expect("add");
    store.increment(&id).await.expect("increment");
    store.increment(&id).await.expect("increment");

    store.decrement(&id).await.expect("decrement");

    assert_eq!(quantities(&store.snapshot()), vec![("p1".to_string(), 2)]);
}

#[tokio::test]
async fn test_load_returns_persisted_cart() {
    let config = CartConfig::default();
    let seeded = MemoryStore::with_entry(
        config.storage_key.clone(),
        r#"[{"id":"p2","title":"Pear","image_url":"u","price":1.25,"quantity":5}]"#,
    );
    let store = CartStore::new(seeded, &config);
    assert!(store.snapshot().is_empty());

    store.initialize().await;

    assert_eq!(store.status(), StoreStatus::Ready);
    assert_eq!(quantities(&store.snapshot()), vec![("p2".to_string(), 5)]);
}

#[tokio::test]
async fn test_unknown_ids_are_ignored() {
    let storage = MemoryStore::new();
    let store = CartStore::open(storage.clone(), &CartConfig::default()).await;
    let ghost = ProductId::new("ghost");

    store.increment(&ghost).await.expect("increment");
    store.decrement(&ghost).await.expect("decrement");

    assert!(store.snapshot().is_empty());
    assert_eq!(persisted(&storage, &store).await, None);
}

#[tokio::test]
async fn test_new_products_append_in_order() {
    let store = CartStore::open(MemoryStore::new(), &CartConfig::default()).await;

    for id in ["b", "a", "c"] {
        store.add_to_cart(product(id)).await.expect("add");
    }
    store.add_to_cart(product("a")).await.expect("add");

    assert_eq!(
        quantities(&store.snapshot()),
        vec![
            ("b".to_string(), 1),
            ("a".to_string(), 2),
            ("c".to_string(), 1)
        ]
    );
}

#[tokio::test]
async fn test_readding_keeps_original_fields() {
    let store = CartStore::open(MemoryStore::new(), &CartConfig::default()).await;
    store.add_to_cart(tomato()).await.expect("add");

    let mut renamed = tomato();
    renamed.title = "Heirloom Tomato".to_string();
    store.add_to_cart(renamed).await.expect("add");

    let snapshot = store.snapshot();
    let item = snapshot.get(&ProductId::new("p1")).expect("line item");
    assert_eq!(item.title, "Tomato");
    assert_eq!(item.quantity.get(), 2);
}

#[tokio::test]
async fn test_custom_key_is_used_for_load_and_write() {
    let config = CartConfig::default().with_storage_key("tenant:cart");
    let storage = MemoryStore::new();
    let store = CartStore::open(storage.clone(), &config).await;

    store.add_to_cart(tomato()).await.expect("add");

    assert!(storage.get("tenant:cart").await.expect("get").is_some());
    assert!(
        storage
            .get(&CartConfig::default().storage_key)
            .await
            .expect("get")
            .is_none()
    );

    let reopened = CartStore::open(storage, &config).await;
    assert_eq!(reopened.snapshot(), store.snapshot());
}

#[tokio::test]
async fn test_persisted_bytes_decode_to_snapshot() {
    let storage = MemoryStore::new();
    let store = CartStore::open(storage.clone(), &CartConfig::default()).await;
    store.add_to_cart(product("x")).await.expect("add");
    store.increment(&ProductId::new("x")).await.expect("increment");

    let raw = storage
        .get(store.key())
        .await
        .expect("get")
        .expect("cart written");
    assert_eq!(codec::decode(&raw).expect("decode"), store.snapshot());
}
